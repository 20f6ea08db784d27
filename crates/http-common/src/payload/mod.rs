pub mod implementation;

use std::{collections::HashMap, sync::Arc};

use axum::http::{Extensions, Method};
use http_contracts::ValidationErrorSet;

/// Decodes and validates a raw body, storing the typed value in the extensions.
pub type Binder =
    Arc<dyn Fn(&[u8], &mut Extensions) -> Result<(), ValidationErrorSet> + Send + Sync>;

/// Payload binders keyed by `(method, route template)`, filled at route registration.
#[derive(Clone, Default)]
pub struct PayloadRegistry {
    binders: HashMap<(Method, String), Binder>,
}

/// A request body that already passed decoding and validation.
#[derive(Debug)]
pub struct Payload<T>(pub Arc<T>);
