pub mod handlers;
pub mod middleware;
pub mod payload;
pub mod pipeline;
pub mod router;
pub mod skipper;
pub mod status;
pub mod trace_layer;

pub use middleware::{REQUEST_ID_HEADER, RequestContext};
pub use payload::{Payload, PayloadRegistry};
pub use pipeline::{BODY_LIMIT, with_pipeline};
pub use router::base_routes;
pub use status::StatusInfo;
