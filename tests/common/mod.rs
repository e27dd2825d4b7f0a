//! Shared handlers and helpers for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use route_dispatch::config::{RouteConfig, ServerConfig};
use route_dispatch::dispatch::{ActionResult, ActionTable, Handler, HandlerRegistry};
use route_dispatch::http::RequestContext;
use route_dispatch::AppServer;

#[derive(Default)]
pub struct HomeHandler {
    request: RequestContext,
}

impl HomeHandler {
    fn index(&mut self) -> &'static str {
        "home index"
    }

    fn about(&mut self) -> &'static str {
        "home about"
    }

    fn echo(&mut self) -> String {
        format!(
            "{} {} {}",
            self.request.method(),
            self.request.path(),
            String::from_utf8_lossy(self.request.body())
        )
    }

    fn greet(&mut self, name: String) -> String {
        format!("Hello, {}!", name)
    }
}

impl Handler for HomeHandler {
    const NAME: &'static str = "HomeHandler";

    fn set_context(&mut self, context: RequestContext) {
        self.request = context;
    }

    fn actions(actions: &mut ActionTable<Self>) {
        actions
            .action("Index", &[], Self::index)
            .action("About", &[], Self::about)
            .action("Echo", &[], Self::echo)
            .action("Greet", &["name"], Self::greet);
    }
}

#[derive(Default)]
pub struct ProductsHandler;

impl ProductsHandler {
    fn show(&mut self, id: u32) -> ActionResult {
        ActionResult::json(serde_json::json!({ "id": id }))
    }

    fn page(&mut self, category: String, page: u16) -> String {
        format!("{} page {}", category, page)
    }

    fn old(&mut self) -> ActionResult {
        ActionResult::redirect("/product/1")
    }
}

impl Handler for ProductsHandler {
    const NAME: &'static str = "ProductsHandler";

    fn set_context(&mut self, _context: RequestContext) {}

    fn actions(actions: &mut ActionTable<Self>) {
        actions
            .action("Show", &["id"], Self::show)
            .action("Page", &["category", "page"], Self::page)
            .action("Old", &[], Self::old);
    }
}

pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register::<HomeHandler>()
        .unwrap()
        .register::<ProductsHandler>()
        .unwrap();
    registry
}

/// Config with parameterised routes ahead of the conventional route.
pub fn config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.routes = vec![
        RouteConfig::new("product", "/product/{id}")
            .with_default("controller", "products")
            .with_default("action", "show"),
        RouteConfig::new("category", "/category/{category}/{page}")
            .with_default("controller", "products")
            .with_default("action", "page")
            .with_default("page", 1i64),
        RouteConfig::conventional(),
    ];
    config
}

pub fn server() -> AppServer {
    AppServer::new(config(), registry()).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Send one request through the router in-process.
pub async fn send(router: Router, method: Method, path: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn get(router: Router, path: &str) -> TestResponse {
    send(router, Method::GET, path, "").await
}
