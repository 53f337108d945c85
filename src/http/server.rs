//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Swap in rebuilt menus on configuration updates
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{NavConfig, ValidationError};
use crate::http::handlers::{active_route, health, list_menus};
use crate::http::request::{MakeRequestUuidV4, X_REQUEST_ID};
use crate::navigation::MenuRegistry;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<MenuRegistry>>,
}

impl AppState {
    pub fn new(registry: MenuRegistry) -> Self {
        metrics::record_menus_loaded(registry.len());
        Self {
            inner: Arc::new(ArcSwap::from_pointee(registry)),
        }
    }

    /// Rebuild menus from `config` and swap them in.
    ///
    /// On failure the current menus stay in place.
    pub fn apply_config(&self, config: &NavConfig) -> Result<(), Vec<ValidationError>> {
        let registry = MenuRegistry::from_config(&config.menus)?;
        metrics::record_menus_loaded(registry.len());
        tracing::info!(menus = registry.len(), "Menus reloaded");
        self.inner.store(Arc::new(registry));
        Ok(())
    }
}

/// HTTP server for the navigation API.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: NavConfig,
}

impl HttpServer {
    /// Build menus and the router. Fails on any configuration defect.
    pub fn new(config: NavConfig) -> Result<Self, Vec<ValidationError>> {
        let registry = MenuRegistry::from_config(&config.menus)?;
        let state = AppState::new(registry);
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &NavConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/menus", get(list_menus))
            .route("/menus/{name}/active", get(active_route))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Router clone, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<NavConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, menus = self.state.inner.load().len(), "HTTP server starting");

        let state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(errors) = state.apply_config(&config) {
                    for error in &errors {
                        tracing::error!(error = %error, "Rejected configuration update");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
