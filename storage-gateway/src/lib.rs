//! Storage Gateway: upload files to an S3 bucket, list its contents, and a
//! stubbed prediction endpoint.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod storage;

use config::ServerConfig;
use storage::{ObjectLocator, ObjectStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub locator: Arc<ObjectLocator>,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, locator: ObjectLocator) -> Self {
        Self {
            store,
            locator: Arc::new(locator),
        }
    }
}

/// Any origin, method and header, with credentials. The request's own
/// values are mirrored back since `*` is not allowed alongside credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Build the application router with all routes and middleware
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/predict", post(handlers::predict::predict))
        .route("/upload", post(handlers::upload::upload_file))
        .route("/list", get(handlers::list::list_files))
        .layer(DefaultBodyLimit::disable());

    let router = match server.body_limit_bytes() {
        Some(limit) => router.layer(RequestBodyLimitLayer::new(limit)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
