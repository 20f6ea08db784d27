use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http_contracts::HandlerError;
use tracing::{error, info, warn};

use crate::{middleware::RequestContext, skipper};

pub async fn request_log(request: Request, next: Next) -> Response {
    if skipper::is_probe(&request) {
        return next.run(request).await;
    }

    let method = request.method().clone();
    let (path, request_id, started_at) = match request.extensions().get::<RequestContext>() {
        Some(ctx) => (ctx.path.clone(), ctx.request_id.clone(), ctx.started_at),
        None => (request.uri().path().to_owned(), String::new(), Instant::now()),
    };

    info!(%path, %method, %request_id, "request received");

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency_ms = started_at.elapsed().as_millis() as u64;
    let error = response
        .extensions()
        .get::<HandlerError>()
        .map(|e| e.0.as_str());

    match status {
        500..=599 => {
            error!(%path, %method, %request_id, status, latency_ms, error, "request finished")
        }
        400..=499 => {
            warn!(%path, %method, %request_id, status, latency_ms, error, "request finished")
        }
        _ => info!(%path, %method, %request_id, status, latency_ms, error, "request finished"),
    }

    response
}
