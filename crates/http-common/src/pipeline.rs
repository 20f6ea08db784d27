use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{request_id, request_log, validate_payload},
    payload::PayloadRegistry,
    trace_layer::custom_make_span::CustomMakeSpan,
};

/// Largest request body accepted by default.
pub const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Wraps every route already on `router` with the request pipeline.
///
/// Stages run outermost first: request id, trace span, request log, payload
/// validation. Routes added afterwards are not covered.
pub fn with_pipeline(router: Router, registry: Arc<PayloadRegistry>) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(CustomMakeSpan)
                    .on_request(())
                    .on_response(())
                    .on_failure(()),
            )
            .layer(middleware::from_fn(request_log))
            .layer(middleware::from_fn_with_state(registry, validate_payload))
            .layer(DefaultBodyLimit::max(BODY_LIMIT)),
    )
}
