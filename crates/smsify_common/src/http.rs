// --- File: crates/smsify_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::{HttpStatusCode, SmsifyError};
use crate::services::SendOutcome;

// Include the client module
pub mod client;

/// The uniform envelope returned by every SMS operation route.
///
/// `code` is 200 when the underlying operation succeeded and 500 otherwise;
/// the HTTP status stays 200 so clients always get the envelope body.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data,
        }
    }

    pub fn failed(message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            code: 500,
            message: message.into(),
            data,
        }
    }
}

impl From<SendOutcome> for ApiResponse {
    fn from(outcome: SendOutcome) -> Self {
        Self {
            code: if outcome.success { 200 } else { 500 },
            message: outcome.message,
            data: outcome.data,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Extension trait for SmsifyError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for SmsifyError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = self.to_string();

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for SmsifyError to make it easier to use in Axum handlers.
impl IntoResponse for SmsifyError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
