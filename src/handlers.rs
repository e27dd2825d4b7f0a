//! Demo handlers served by the binary.

use route_dispatch::config::RouteConfig;
use route_dispatch::dispatch::{ActionResult, ActionTable, Handler, HandlerRegistry, RegistryError};
use route_dispatch::http::RequestContext;
use serde_json::json;

#[derive(Default)]
pub struct HomeHandler {
    request: RequestContext,
}

impl HomeHandler {
    fn index(&mut self) -> String {
        format!(
            "<h1>route-dispatch</h1><p>You asked for <code>{}</code>.</p>",
            self.request.path()
        )
    }

    fn about(&mut self) -> &'static str {
        "<p>Routes map to handlers by naming convention.</p>"
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
            .action("Greet", &["name"], Self::greet);
    }
}

#[derive(Default)]
pub struct ProductsHandler {
    request: RequestContext,
}

impl ProductsHandler {
    fn show(&mut self, id: u32) -> ActionResult {
        ActionResult::json(json!({
            "id": id,
            "name": format!("Product {}", id),
            "request_id": self.request.request_id(),
        }))
    }

    fn featured(&mut self) -> ActionResult {
        ActionResult::json(json!([
            { "id": 1, "name": "Product 1" },
            { "id": 7, "name": "Product 7" },
        ]))
    }

    fn legacy(&mut self) -> ActionResult {
        ActionResult::redirect_permanent("/products/featured")
    }
}

impl Handler for ProductsHandler {
    const NAME: &'static str = "ProductsHandler";

    fn set_context(&mut self, context: RequestContext) {
        self.request = context;
    }

    fn actions(actions: &mut ActionTable<Self>) {
        actions
            .action("Show", &["id"], Self::show)
            .action("Featured", &[], Self::featured)
            .action("Legacy", &[], Self::legacy);
    }
}

/// Registry with every demo handler.
pub fn registry() -> Result<HandlerRegistry, RegistryError> {
    let mut registry = HandlerRegistry::new();
    registry
        .register::<HomeHandler>()?
        .register::<ProductsHandler>()?;
    Ok(registry)
}

/// Routes reaching the parameterised demo actions, tried before the default route.
pub fn demo_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("product", "/product/{id}")
            .with_default("controller", "products")
            .with_default("action", "show"),
        RouteConfig::new("greet", "/hello/{name}")
            .with_default("controller", "home")
            .with_default("action", "greet"),
    ]
}
