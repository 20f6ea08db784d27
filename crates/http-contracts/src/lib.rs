pub mod error;
pub mod message;
pub mod status;

pub use error::{
    ErrorEntry, ErrorResponse, FieldError, FieldErrorKind, HandlerError, ValidationErrorSet,
};
pub use message::MessageResponse;
pub use status::{BuildInfo, StatusResponse};
