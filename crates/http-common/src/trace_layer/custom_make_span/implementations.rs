use axum::http::{Request, header};
use tower_http::trace::MakeSpan;
use tracing::Span;

use crate::{middleware::RequestContext, skipper, trace_layer::custom_make_span::CustomMakeSpan};

impl<B> MakeSpan<B> for CustomMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        if skipper::is_probe(request) {
            return Span::none();
        }

        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown");
        let request_id = request
            .extensions()
            .get::<RequestContext>()
            .map(|ctx| ctx.request_id.as_str())
            .unwrap_or_default();

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            version = ?request.version(),
            user_agent = %user_agent,
            request_id = %request_id,
        )
    }
}
