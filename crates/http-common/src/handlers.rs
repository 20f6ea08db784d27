use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use http_contracts::{ErrorResponse, StatusResponse};

use crate::status::StatusInfo;

pub async fn healthz_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn status_handler(status: Arc<StatusInfo>) -> StatusResponse {
    status.report()
}

#[tracing::instrument(name = "not_found_handler", skip_all)]
pub async fn not_found_handler() -> impl IntoResponse {
    ErrorResponse::single("not_found", "nothing to see here").with_status(StatusCode::NOT_FOUND)
}
