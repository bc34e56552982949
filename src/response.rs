use crate::models::Record;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// A status plus an optional JSON body. Records are sent bare, not wrapped.
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: Some(body),
        }
    }

    pub fn created(body: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: Some(body),
        }
    }
}

impl ApiResponse<()> {
    /// 200 with no body (preflight).
    pub fn empty() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Attach the operation message to a freshly read record.
pub fn with_message(mut record: Record, message: &str) -> Record {
    record.insert("message".to_string(), Value::String(message.to_string()));
    record
}
