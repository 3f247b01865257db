//! # Response Envelope
//!
//! Every JSON route answers with `{"success": bool, "data": ... | "error": ...}`.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// The uniform response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<Value> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler error type: a status code plus a failure envelope
pub type ApiError = (StatusCode, Json<ApiResponse<Value>>);

/// Build an `ApiError` from a numeric status and a message
pub fn api_error(status: u16, message: impl Into<String>) -> ApiError {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ApiResponse::failure(message)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let response = ApiResponse::ok(json!({"version": 2}));
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["success"], true);
        assert_eq!(encoded["data"]["version"], 2);
        assert!(encoded.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope() {
        let response = ApiResponse::failure("Section not found: hero");
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["success"], false);
        assert_eq!(encoded["error"], "Section not found: hero");
        assert!(encoded.get("data").is_none());
    }

    #[test]
    fn test_api_error_status() {
        let (status, _) = api_error(404, "missing");
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Out-of-range codes fall back to 500
        let (status, _) = api_error(1, "bogus");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
