use axum::{
    Json,
    response::{IntoResponse, Response},
};

use crate::message::MessageResponse;

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for MessageResponse {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for MessageResponse {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Always a 200; failures go through `ErrorResponse` instead.
impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
