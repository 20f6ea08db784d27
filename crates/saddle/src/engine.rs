use std::sync::Arc;

use axum::{Router, http::Method, routing::MethodRouter};
use http_common::{PayloadRegistry, StatusInfo, base_routes, with_pipeline};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Route table handed to [`Service::attach`](crate::Service::attach).
///
/// Built-in `/healthz` and `/status` are present from the start; the request
/// pipeline is applied over everything once attaching is done.
pub struct Engine {
    router: Router,
    payloads: PayloadRegistry,
}

impl Engine {
    pub(crate) fn new(status: Arc<StatusInfo>) -> Self {
        Self {
            router: base_routes(status),
            payloads: PayloadRegistry::new(),
        }
    }

    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        self.router = std::mem::take(&mut self.router).route(path, method_router);
        self
    }

    pub fn nest(&mut self, path: &str, router: Router) -> &mut Self {
        self.router = std::mem::take(&mut self.router).nest(path, router);
        self
    }

    /// Declares that `method path` takes a JSON body of type `T`.
    ///
    /// The body is decoded and validated before the handler runs; handlers
    /// read it with [`Payload<T>`](http_common::Payload). Nested routes must
    /// be declared with their full path.
    pub fn expect_payload<T>(&mut self, method: Method, path: &str) -> &mut Self
    where
        T: DeserializeOwned + Validate + Send + Sync + 'static,
    {
        self.payloads.register::<T>(method, path);
        self
    }

    pub(crate) fn finalize(self) -> Router {
        with_pipeline(self.router, Arc::new(self.payloads))
    }
}
