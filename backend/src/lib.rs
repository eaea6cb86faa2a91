//! # Product Catalog Backend
//!
//! REST API managing products and the options that belong to them.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (axum handlers, error → status translation)
//!     ↓
//! Domain Layer (ProductService: validation, orchestration, mapping)
//!     ↓
//! Storage Layer (request-scoped repository → SQLite store)
//! ```
//!
//! Each request gets its own repository, so staged changes never leak
//! between requests. The only shared state is the connection pool.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::domain::ProductService;
use crate::storage::{DbConnection, ProductStore, SqliteProductStore, StagingProductRepository};

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn from_connection(db: DbConnection) -> Self {
        Self::new(Arc::new(SqliteProductStore::new(db)))
    }

    /// A service over a fresh repository; one per request
    pub fn product_service(&self) -> ProductService<StagingProductRepository> {
        ProductService::new(StagingProductRepository::new(self.store.clone()))
    }
}

/// Install the global tracing subscriber.
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::from_connection(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(io::health))
        .route("/products", get(io::list_products).post(io::create_product))
        .route(
            "/products/:id",
            get(io::get_product)
                .put(io::update_product)
                .delete(io::delete_product),
        )
        .route(
            "/products/:id/options",
            get(io::list_product_options).post(io::create_product_option),
        )
        .route(
            "/products/:id/options/:option_id",
            get(io::get_product_option)
                .put(io::update_product_option)
                .delete(io::delete_product_option),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
