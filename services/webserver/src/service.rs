use saddle::{AttachContext, AttachError, Engine, Service, ShutdownHook};
use tracing::info;

use crate::{config::WebserverConfig, features};

type Cleanup = Box<dyn FnOnce() + Send + 'static>;

/// Demo service exposing `POST /v1/hello-world`.
#[derive(Default)]
pub struct Webserver {
    config: Option<WebserverConfig>,
    cleanups: Vec<Cleanup>,
}

impl Webserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `cleanup` to run, in registration order, when the service shuts down.
    pub fn on_shutdown(&mut self, cleanup: impl FnOnce() + Send + 'static) {
        self.cleanups.push(Box::new(cleanup));
    }

    pub fn config(&self) -> Option<&WebserverConfig> {
        self.config.as_ref()
    }
}

impl Service for Webserver {
    type Config = WebserverConfig;

    fn name(&self) -> &str {
        "webserver"
    }

    fn description(&self) -> &str {
        "Example service saddled up with a single hello-world route."
    }

    fn configure(&mut self, config: WebserverConfig) {
        self.config = Some(config);
    }

    fn attach(
        &mut self,
        engine: &mut Engine,
        ctx: &AttachContext,
    ) -> Result<Option<ShutdownHook>, AttachError> {
        if let Some(config) = &self.config {
            info!(test = %config.v1.test, environment = %ctx.environment, "attaching routes");
        }

        features::v1::attach_routes(engine);

        let cleanups = std::mem::take(&mut self.cleanups);
        Ok(Some(Box::new(move || {
            for cleanup in cleanups {
                cleanup();
            }
            info!("gracefully shutdown service");
        })))
    }
}
