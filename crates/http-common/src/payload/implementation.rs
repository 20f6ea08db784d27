use std::{fmt, ops::Deref, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{Extensions, Method, StatusCode, request::Parts},
    response::Response,
};
use http_contracts::{ErrorResponse, ValidationErrorSet};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::payload::{Binder, Payload, PayloadRegistry};

impl PayloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that `method path` expects a JSON body of type `T`.
    ///
    /// `path` is the route template as registered with the router, e.g. `/v1/users/{id}`.
    pub fn register<T>(&mut self, method: Method, path: impl Into<String>)
    where
        T: DeserializeOwned + Validate + Send + Sync + 'static,
    {
        let binder: Binder = Arc::new(|bytes: &[u8], extensions: &mut Extensions| {
            let value: T = serde_json::from_slice(bytes)
                .map_err(|err| ValidationErrorSet::from_json_error(&err))?;
            value.validate().map_err(ValidationErrorSet::from)?;
            extensions.insert(Payload(Arc::new(value)));
            Ok(())
        });
        self.binders.insert((method, path.into()), binder);
    }

    pub fn binder(&self, method: &Method, path: &str) -> Option<&Binder> {
        self.binders.get(&(method.clone(), path.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.binders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

impl fmt::Debug for PayloadRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.binders.keys()).finish()
    }
}

impl<T> Clone for Payload<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Payload<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T, S> FromRequestParts<S> for Payload<T>
where
    T: Send + Sync + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.remove::<Payload<T>>().ok_or_else(|| {
            // the route was never registered for this payload type
            ErrorResponse::single("payload_unbound", "request payload was not bound")
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_contracts::FieldErrorKind;
    use serde::Deserialize;

    #[derive(Deserialize, Validate, Debug)]
    struct Greeting {
        #[validate(length(min = 1, code = "required"))]
        message: String,
    }

    fn registry() -> PayloadRegistry {
        let mut registry = PayloadRegistry::new();
        registry.register::<Greeting>(Method::POST, "/v1/hello-world");
        registry
    }

    #[test]
    fn lookup_is_by_method_and_path() {
        let registry = registry();

        assert!(registry.binder(&Method::POST, "/v1/hello-world").is_some());
        assert!(registry.binder(&Method::GET, "/v1/hello-world").is_none());
        assert!(registry.binder(&Method::POST, "/v1/other").is_none());
    }

    #[test]
    fn valid_body_is_stored_in_extensions() {
        let registry = registry();
        let binder = registry.binder(&Method::POST, "/v1/hello-world").unwrap();
        let mut extensions = Extensions::new();

        binder(br#"{"message":"hi"}"#, &mut extensions).unwrap();

        let payload = extensions.get::<Payload<Greeting>>().unwrap();
        assert_eq!(payload.message, "hi");
    }

    #[test]
    fn empty_message_is_missing_required() {
        let registry = registry();
        let binder = registry.binder(&Method::POST, "/v1/hello-world").unwrap();
        let mut extensions = Extensions::new();

        let errors = binder(br#"{"message":""}"#, &mut extensions).unwrap_err();

        assert_eq!(errors.errors()[0].field, "message");
        assert_eq!(errors.errors()[0].kind, FieldErrorKind::MissingRequired);
        assert!(extensions.get::<Payload<Greeting>>().is_none());
    }
}
