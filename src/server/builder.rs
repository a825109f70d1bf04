//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_food_routes, health_routes};
use crate::config::{IdentityMode, ServiceConfig};
use crate::core::{ClaimsIdentityResolver, FoodStore, IdentityResolver, NoIdentityResolver};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Default upper bound for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Builder for the food service router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryFoodStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn FoodStore>>,
    identity_resolver: Arc<dyn IdentityResolver>,
    store_timeout: Duration,
    permissive_cors: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            identity_resolver: Arc::new(NoIdentityResolver),
            store_timeout: DEFAULT_STORE_TIMEOUT,
            permissive_cors: false,
            custom_routes: Vec::new(),
        }
    }

    /// Create a builder from loaded configuration, opening the configured store
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let store = crate::storage::open_store(&config.store).await?;

        let builder = Self::new()
            .with_shared_store(store)
            .with_store_timeout(config.store.timeout())
            .with_permissive_cors(config.server.permissive_cors);

        Ok(match config.identity.mode {
            IdentityMode::None => builder,
            IdentityMode::Claims => builder.with_identity_resolver(ClaimsIdentityResolver),
        })
    }

    /// Set the food store (required)
    pub fn with_store(mut self, store: impl FoodStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared food store
    pub fn with_shared_store(mut self, store: Arc<dyn FoodStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the identity resolver (defaults to [`NoIdentityResolver`])
    pub fn with_identity_resolver(mut self, resolver: impl IdentityResolver + 'static) -> Self {
        self.identity_resolver = Arc::new(resolver);
        self
    }

    /// Bound every store call; an expired call answers 500
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Allow any origin, method and header
    pub fn with_permissive_cors(mut self, enabled: bool) -> Self {
        self.permissive_cors = enabled;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints outside the food API, such as an upstream
    /// token introspection callback.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Food routes
    /// - Custom routes
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("FoodStore is required. Call .with_store()"))?;

        let state = AppState {
            store,
            identity_resolver: self.identity_resolver,
            store_timeout: self.store_timeout,
        };

        let mut app = health_routes().merge(build_food_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        app = app.layer(TraceLayer::new_for_http());
        if self.permissive_cors {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
