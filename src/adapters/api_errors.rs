use crate::domain::error::CalendarError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so the HTTP mapping lives in this layer.
#[derive(Debug)]
pub struct ApiError(pub CalendarError);

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CalendarError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CalendarError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let (status, message) = if self.0.is_validation() {
            tracing::warn!(error_code = kind, "rejected request: {}", self.0);
            (StatusCode::BAD_REQUEST, self.0.to_string())
        } else {
            match &self.0 {
                CalendarError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
                CalendarError::DuplicateName(_) | CalendarError::Conflict(_) => {
                    (StatusCode::CONFLICT, self.0.to_string())
                }
                CalendarError::StorageUnavailable(err) => {
                    tracing::error!("database error: {err}");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "storage unavailable".to_string(),
                    )
                }
                CalendarError::Serialization(err) => {
                    tracing::error!("serialization error: {err}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
                _ => (StatusCode::BAD_REQUEST, self.0.to_string()),
            }
        };

        let body = serde_json::json!({
            "error_code": kind,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
