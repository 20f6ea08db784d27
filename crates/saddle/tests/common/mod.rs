#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    http::Method,
    routing::{get, post},
};
use http_contracts::MessageResponse;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use saddle::{AttachContext, AttachError, Engine, Payload, Service, ShutdownHook};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Scratch directory removed on drop.
pub struct ConfigDir {
    path: PathBuf,
}

impl ConfigDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("saddle-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn write(&self, name: &str, contents: &str) -> &Self {
        fs::write(self.path.join(name), contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ConfigDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct V1 {
    #[validate(length(min = 1, code = "required"))]
    pub test: String,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct GreeterConfig {
    #[validate(nested)]
    pub v1: V1,
}

#[derive(Deserialize, Validate, Debug)]
pub struct GreetRequest {
    #[validate(length(min = 1, code = "required"))]
    pub message: String,
}

/// Minimal service counting how often its shutdown hook runs.
#[derive(Default)]
pub struct Greeter {
    pub config: Option<GreeterConfig>,
    pub hook_calls: Arc<AtomicUsize>,
    pub fail_attach: bool,
}

impl Greeter {
    pub fn hook_calls(&self) -> usize {
        self.hook_calls.load(Ordering::SeqCst)
    }
}

/// Outlives any drain timeout used in tests.
async fn linger() -> &'static str {
    tokio::time::sleep(Duration::from_secs(60)).await;
    "late"
}

async fn greet(payload: Payload<GreetRequest>) -> MessageResponse {
    MessageResponse::new(format!("greetings, {}", payload.message))
}

impl Service for Greeter {
    type Config = GreeterConfig;

    fn name(&self) -> &str {
        "greeter"
    }

    fn description(&self) -> &str {
        "says hello"
    }

    fn configure(&mut self, config: GreeterConfig) {
        self.config = Some(config);
    }

    fn attach(
        &mut self,
        engine: &mut Engine,
        _ctx: &AttachContext,
    ) -> Result<Option<ShutdownHook>, AttachError> {
        let calls = Arc::clone(&self.hook_calls);
        let hook: ShutdownHook = Box::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        if self.fail_attach {
            return Err(AttachError::new("database unreachable").with_shutdown(hook));
        }

        engine
            .expect_payload::<GreetRequest>(Method::POST, "/v1/greet")
            .route("/v1/greet", post(greet))
            .route("/v1/linger", get(linger));
        Ok(Some(hook))
    }
}

pub fn attach_context() -> AttachContext {
    let tracer = SdkTracerProvider::builder().build().tracer("saddle-tests");
    AttachContext::new("greeter", "test", tracer)
}
