//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, CORS, limits, request ID)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::cache::CachePolicy;
use crate::http::handlers::{get_head, get_tail, health, post_head, post_tail};
use crate::http::middleware::apply_http_layers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub cache_policy: CachePolicy,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let cache_policy = CachePolicy::from_config(&config.cache);
        Self {
            config: Arc::new(config),
            cache_policy,
        }
    }
}

/// HTTP server for the list service.
pub struct HttpServer {
    router: Router,
    config: Arc<ServiceConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(config);
        let config = state.config.clone();
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let lists = Router::new()
            .route("/lists/head", get(get_head).post(post_head))
            .route("/lists/tail", get(get_tail).post(post_tail));

        let router = Router::new()
            .route("/health", get(health))
            .nest("/v1", lists)
            .with_state(state.clone());

        apply_http_layers(router, &state.config)
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            app_name = %self.config.app_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
