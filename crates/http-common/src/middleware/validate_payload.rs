use std::sync::Arc;

use axum::{
    body::{self, Body},
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_contracts::ErrorResponse;
use tracing::debug;

use crate::{payload::PayloadRegistry, pipeline::BODY_LIMIT, skipper};

/// Binds and validates the JSON body of routes that declared a payload type.
///
/// On failure the chain halts with a 400 and the handler never runs. On
/// success the decoded value is stored for the `Payload<T>` extractor and the
/// request continues with an empty body.
pub async fn validate_payload(
    State(registry): State<Arc<PayloadRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    if skipper::is_builtin(&request) {
        return next.run(request).await;
    }

    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let Some(binder) = registry.binder(request.method(), &path) else {
        return next.run(request).await;
    };

    let (mut parts, body) = request.into_parts();
    let bytes = match body::to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(%path, error = %err, "payload could not be buffered");
            return ErrorResponse::single(
                "payload_too_large",
                format!("request body exceeds {BODY_LIMIT} bytes"),
            )
            .with_status(StatusCode::PAYLOAD_TOO_LARGE);
        }
    };

    if let Err(errors) = binder(&bytes, &mut parts.extensions) {
        return errors.into_response();
    }

    next.run(Request::from_parts(parts, Body::empty())).await
}
