use std::{error::Error as StdError, fmt};

use opentelemetry_sdk::trace::SdkTracer;
use serde::de::DeserializeOwned;
use tracing::Span;
use validator::Validate;

use crate::engine::Engine;

/// Cleanup run once when the process shuts down.
pub type ShutdownHook = Box<dyn FnOnce() + Send + 'static>;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// A network service embedded in the harness.
pub trait Service: Send + 'static {
    /// Service-owned configuration, read from the same file as the harness table.
    type Config: DeserializeOwned + Validate;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Receives the validated configuration before `attach`.
    fn configure(&mut self, config: Self::Config);

    /// Registers routes on `engine` and optionally hands back a shutdown hook.
    ///
    /// On failure, return the hook produced so far inside the [`AttachError`]
    /// so the harness can still run it.
    fn attach(
        &mut self,
        engine: &mut Engine,
        ctx: &AttachContext,
    ) -> Result<Option<ShutdownHook>, AttachError>;
}

/// What a service gets to see while attaching.
#[derive(Clone, Debug)]
pub struct AttachContext {
    pub service: String,
    pub environment: String,
    pub tracer: SdkTracer,
    pub span: Span,
}

impl AttachContext {
    pub fn new(service: impl Into<String>, environment: impl Into<String>, tracer: SdkTracer) -> Self {
        let service = service.into();
        let environment = environment.into();
        let span = tracing::info_span!("service", name = %service, environment = %environment);
        Self {
            service,
            environment,
            tracer,
            span,
        }
    }
}

pub struct AttachError {
    source: BoxError,
    shutdown: Option<ShutdownHook>,
}

impl AttachError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
            shutdown: None,
        }
    }

    /// Keeps `hook` so it still runs during shutdown.
    pub fn with_shutdown(mut self, hook: ShutdownHook) -> Self {
        self.shutdown = Some(hook);
        self
    }

    pub fn take_shutdown(&mut self) -> Option<ShutdownHook> {
        self.shutdown.take()
    }
}

impl fmt::Debug for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachError")
            .field("source", &self.source)
            .field("has_shutdown", &self.shutdown.is_some())
            .finish()
    }
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to attach service: {}", self.source)
    }
}

impl StdError for AttachError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}
