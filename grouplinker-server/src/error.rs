use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use grouplinker_libs::data::GroupError;
use serde_json::json;

/// Transport wrapper for registry errors: both variants are client-input
/// errors, surfaced as a status plus a `detail` body.
pub struct ApiError(GroupError);

impl From<GroupError> for ApiError {
    fn from(e: GroupError) -> ApiError {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GroupError::AlreadyExists { .. } => StatusCode::BAD_REQUEST,
            GroupError::NotFound { .. } => StatusCode::NOT_FOUND,
        };

        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
