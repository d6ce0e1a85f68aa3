use anyhow::Context;
use axum::{Router, http::HeaderValue, middleware, routing::post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::TransformService;

mod catalog;
mod error;
pub mod observability;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

/// Header values stamped on every response.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    pub allow_origin: HeaderValue,
    pub allow_headers: HeaderValue,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub transform: TransformService,

    pub max_body_bytes: usize,

    pub cors: CorsHeaders,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Arc<Self>> {
        let cors = CorsHeaders {
            allow_origin: HeaderValue::from_str(&config.server.cors_allow_origin)
                .context("Invalid server.cors_allow_origin")?,
            allow_headers: HeaderValue::from_str(&config.server.cors_allow_headers)
                .context("Invalid server.cors_allow_headers")?,
        };

        Ok(Arc::new(Self {
            transform: TransformService::new(config.transform.missing_image),
            max_body_bytes: config.server.max_body_bytes,
            cors,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(catalog::filter_catalog))
        .fallback(catalog::not_found)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(
            state,
            observability::cors_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
