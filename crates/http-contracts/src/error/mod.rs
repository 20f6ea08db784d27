pub mod implementation;

use serde::{Deserialize, Serialize};

/// One `{code, message}` record of an outgoing error body.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ErrorEntry {
    pub code: String,
    pub message: String,
}

/// Outgoing error body, `{"errors": [{"code": "", "message": ""}, ...]}`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Default, Debug)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorEntry>,
}

/// Response extension describing why a request failed.
///
/// Handlers and pipeline stages attach it to error responses so the request
/// log can report the failure without re-reading the body.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HandlerError(pub String);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldErrorKind {
    MissingRequired,
    InvalidJson,
    InvalidValue,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
}

/// Field-level failures of one payload binding or validation, ordered by field path.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ValidationErrorSet {
    errors: Vec<FieldError>,
}
