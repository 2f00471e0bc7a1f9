pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod policy;
pub mod routes;
pub mod state;
pub mod storage;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: PgPool, config: Config) -> Router {
    let max_upload_size = config.max_upload_size;

    let state: SharedState = Arc::new(AppState { pool, config });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
