use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::constants::DECODE_ERROR_MESSAGE;
use crate::services::TransformError;

#[derive(Debug)]
pub enum ApiError {
    ContentType(Option<String>),

    MalformedJson(String),

    PayloadShape(&'static str),

    PayloadTooLarge { limit: usize },

    Transform(TransformError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ContentType(Some(content_type)) => {
                write!(f, "Content type is not JSON: {}", content_type)
            }
            ApiError::ContentType(None) => write!(f, "Content type is missing"),
            ApiError::MalformedJson(msg) => write!(f, "Malformed JSON body: {}", msg),
            ApiError::PayloadShape(msg) => write!(f, "Invalid payload: {}", msg),
            ApiError::PayloadTooLarge { limit } => {
                write!(f, "Request body exceeds {} bytes", limit)
            }
            ApiError::Transform(err) => write!(f, "Could not transform payload: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::ContentType(_) | ApiError::MalformedJson(_) | ApiError::PayloadShape(_) => {
                tracing::debug!("Rejecting request: {}", self);
                (StatusCode::BAD_REQUEST, DECODE_ERROR_MESSAGE.to_string())
            }
            ApiError::PayloadTooLarge { .. } => {
                tracing::debug!("Rejecting request: {}", self);
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            ApiError::Transform(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        (status, Json(ErrorBody::new(error_message))).into_response()
    }
}

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        ApiError::Transform(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedJson(err.to_string())
    }
}

impl ApiError {
    pub fn payload_shape(msg: &'static str) -> Self {
        ApiError::PayloadShape(msg)
    }

    /// Whether the error maps onto the uniform decode failure.
    #[must_use]
    pub const fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            ApiError::ContentType(_) | ApiError::MalformedJson(_) | ApiError::PayloadShape(_)
        )
    }
}
