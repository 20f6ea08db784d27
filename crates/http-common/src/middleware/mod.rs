pub mod request_id;
pub mod request_log;
pub mod validate_payload;

use std::time::Instant;

use axum::http::HeaderName;

pub use request_id::request_id;
pub use request_log::request_log;
pub use validate_payload::validate_payload;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Per-request facts recorded at pipeline entry.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub request_id: String,
    pub path: String,
    pub started_at: Instant,
}
