use axum::{
    Json,
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, validation};
use crate::constants::metrics as names;
use crate::models::catalog::ProjectedEntry;

/// `POST /`: filters the submitted catalog and returns the projected shows.
///
/// The content type is checked before any of the body is read.
pub async fn filter_catalog(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<ProjectedEntry>>, ApiError> {
    validation::validate_content_type(request.headers())?;

    let limit = state.max_body_bytes;
    let body = to_bytes(request.into_body(), limit)
        .await
        .map_err(|err| body_read_error(&err, limit))?;

    let payload = validation::decode_payload(&body)?;
    let outcome = state.transform.filter_and_map(payload)?;

    metrics::counter!(names::ENTRIES_RECEIVED_TOTAL).increment(outcome.received as u64);
    metrics::counter!(names::ENTRIES_RETURNED_TOTAL).increment(outcome.entries.len() as u64);
    metrics::counter!(names::ENTRIES_SKIPPED_TOTAL).increment(outcome.skipped as u64);

    Ok(Json(outcome.entries))
}

fn body_read_error(err: &axum::Error, limit: usize) -> ApiError {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(current) = source {
        if current.is::<http_body_util::LengthLimitError>() {
            return ApiError::PayloadTooLarge { limit };
        }
        source = current.source();
    }

    ApiError::MalformedJson(format!("failed to read request body: {err}"))
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
