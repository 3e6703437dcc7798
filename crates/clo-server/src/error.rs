use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clo_core::error::CloError;

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// Construct a 400 Bad Request error for a named request field.
    pub fn bad_request(field: &str, reason: impl Into<String>) -> Self {
        Self(CloError::invalid(field, reason).into())
    }

    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CloError>() {
            Some(e) => match e {
                CloError::MissingField(_)
                | CloError::InvalidField { .. }
                | CloError::NotInitialized => StatusCode::BAD_REQUEST,
                CloError::RecordNotFound(_) => StatusCode::NOT_FOUND,
                CloError::Io(_)
                | CloError::Yaml(_)
                | CloError::Json(_)
                | CloError::Csv(_)
                | CloError::Xlsx(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
