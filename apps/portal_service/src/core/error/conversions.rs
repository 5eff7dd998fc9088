use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::*;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::Forum(ForumError::EmptyReply) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Forum(ForumError::TopicNotFound(_)) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Rejected request ({}): {}", status, self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<&str> for ApiError {
    fn from(message: &str) -> Self {
        ApiError::InvalidInput(message.to_string())
    }
}
