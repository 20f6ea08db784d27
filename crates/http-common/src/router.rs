use std::sync::Arc;

use axum::{Router, routing::get};

use crate::{
    handlers::{healthz_handler, not_found_handler, status_handler},
    skipper::{HEALTH_PATH, STATUS_PATH},
    status::StatusInfo,
};

pub fn base_routes<S>(status: Arc<StatusInfo>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(HEALTH_PATH, get(healthz_handler))
        .route(STATUS_PATH, get(move || status_handler(status.clone())))
        .fallback(not_found_handler)
}
