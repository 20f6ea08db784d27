use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::middleware::{REQUEST_ID_HEADER, RequestContext};

/// Assigns the correlation id.
///
/// An inbound non-empty `x-request-id` is echoed unchanged; otherwise a UUID v4
/// is generated and written to both the request and the response.
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let inbound = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty())
        .cloned();

    let header = match inbound {
        Some(value) => value,
        None => {
            let generated = Uuid::new_v4().to_string();
            let value = HeaderValue::from_str(&generated)
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request
                .headers_mut()
                .insert(REQUEST_ID_HEADER, value.clone());
            value
        }
    };

    let context = RequestContext {
        request_id: String::from_utf8_lossy(header.as_bytes()).into_owned(),
        path: request.uri().path().to_owned(),
        started_at: Instant::now(),
    };
    request.extensions_mut().insert(context);

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header);
    response
}
