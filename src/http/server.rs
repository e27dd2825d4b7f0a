//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router whose fallback runs the middleware pipeline
//! - Wire up middleware (tracing, timeout, request ID)
//! - Buffer request bodies within the configured limit
//! - Map pipeline outcomes and dispatch errors to responses
//! - Bind server to listener with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::dispatch::{Dispatcher, HandlerRegistry};
use crate::http::context::{HttpContext, RequestContext};
use crate::http::pipeline::{MiddlewareResult, Pipeline};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::{PatternError, RouteTable};

/// Application state injected into the fallback handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub max_body_bytes: usize,
}

/// HTTP server hosting the routing pipeline.
pub struct AppServer {
    router: Router,
    config: ServerConfig,
}

impl AppServer {
    /// Build the server from configured routes and registered handlers.
    pub fn new(config: ServerConfig, handlers: HandlerRegistry) -> Result<Self, PatternError> {
        let routes = RouteTable::from_config(&config.routes)?;
        Ok(Self::with_routes(config, routes, handlers))
    }

    /// Build the server from an explicit route table; `config.routes` is ignored.
    pub fn with_routes(config: ServerConfig, routes: RouteTable, handlers: HandlerRegistry) -> Self {
        tracing::info!(
            routes = routes.len(),
            handlers = handlers.len(),
            "Dispatcher initialized"
        );

        let pipeline = Pipeline::new().with(Dispatcher::new(routes, handlers));
        let state = AppState {
            pipeline: Arc::new(pipeline),
            max_body_bytes: config.listener.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(pipeline_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The Axum router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Runs every request through the pipeline.
async fn pipeline_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Failed to read request body");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let mut ctx = HttpContext::new(RequestContext::from_parts(parts, body));

    match state.pipeline.run(&mut ctx) {
        Ok(MiddlewareResult::Processed) => ctx
            .take_response()
            .unwrap_or_else(|| StatusCode::OK.into_response()),
        Ok(MiddlewareResult::Continue) => {
            tracing::warn!(
                request_id = ctx.request().request_id().unwrap_or("unknown"),
                path = %ctx.request().path(),
                "No route matched"
            );
            (StatusCode::NOT_FOUND, "No matching route found").into_response()
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(
                    request_id = ctx.request().request_id().unwrap_or("unknown"),
                    path = %ctx.request().path(),
                    error = %e,
                    "Dispatch failed"
                );
            } else {
                tracing::warn!(
                    request_id = ctx.request().request_id().unwrap_or("unknown"),
                    path = %ctx.request().path(),
                    error = %e,
                    "Dispatch failed"
                );
            }
            (status, e.to_string()).into_response()
        }
    }
}
