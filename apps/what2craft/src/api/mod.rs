//! # what2craft HTTP API Module
//!
//! This module implements the HTTP server using axum.
//!
//! ## Endpoints
//!
//! - `GET /items` - Every crafting-relevant item (JSON array, ordered by id)
//! - `GET /health` - Health check, reports whether the closure is computed
//! - `GET /` - Front-end assets from `static_dir`, when configured
//!
//! ## Configuration (Environment Variables)
//!
//! - `WHAT2CRAFT_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `WHAT2CRAFT_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

pub use handlers::{health_handler, items_handler};
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{ErrorResponse, HealthResponse};

use crate::config::Config;
use crate::error::AppError;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use what2craft_core::{CatalogLoader, ClosureCache, DirectorySource};

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    /// The memoized crafting closure.
    pub catalog: Arc<ClosureCache>,
    /// Front-end assets served at `/`.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Create app state around a closure cache.
    #[must_use]
    pub fn new(catalog: ClosureCache) -> Self {
        Self {
            catalog: Arc::new(catalog),
            static_dir: None,
        }
    }

    /// Build state for `config`: a directory source over `items_dir`
    /// filtered to `edition`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let cache = ClosureCache::new(
            DirectorySource::new(&config.items_dir),
            CatalogLoader::new(config.edition.as_str()),
        );
        Self::new(cache).with_static_dir(config.static_dir.clone())
    }

    #[must_use]
    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        self.static_dir = static_dir;
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `WHAT2CRAFT_CORS_ORIGINS`.
///
/// - "*": allows all origins
/// - not set: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("WHAT2CRAFT_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (WHAT2CRAFT_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in WHAT2CRAFT_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => build_localhost_cors(),
    }
}

/// Origins allowed when `WHAT2CRAFT_CORS_ORIGINS` is unset: the server's own
/// default address, where the bundled front end is served from.
const LOCALHOST_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://127.0.0.1:8080"];

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = LOCALHOST_ORIGINS
        .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - global requests/second cap (if enabled)
pub fn create_router(state: AppState) -> Router {
    let rate_limiter = create_rate_limiter(get_rate_limit_from_env());
    if rate_limiter.is_some() {
        tracing::info!("Rate limiting enabled");
    } else {
        tracing::info!("Rate limiting disabled");
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/items", get(handlers::items_handler));

    if let Some(dir) = &state.static_dir {
        tracing::info!("Serving front-end assets from {}", dir.display());
        router = router.fallback_service(ServeDir::new(dir));
    }

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer()),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &Config) -> Result<(), AppError> {
    let state = AppState::from_config(config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("what2craft HTTP server listening on {}", addr);

    if config.warm_on_start {
        warm_up(Arc::clone(&state.catalog));
    }

    let router = create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Io(format!("Server error: {}", e)))
}

/// Compute the closure in the background so the first request is fast.
fn warm_up(catalog: Arc<ClosureCache>) {
    tokio::task::spawn_blocking(move || {
        if let Ok(closure) = catalog.get() {
            tracing::info!(items = closure.len(), "crafting closure ready");
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
