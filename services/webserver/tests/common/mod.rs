#![allow(dead_code)]

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, header},
    response::Response,
};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use saddle::{AttachContext, Saddle, Service, ShutdownCoordinator, ShutdownSettings};
use serde::de::DeserializeOwned;
use webserver::{
    Webserver,
    config::{V1Config, WebserverConfig},
};

pub fn configured_webserver() -> Webserver {
    let mut service = Webserver::new();
    service.configure(WebserverConfig {
        v1: V1Config {
            test: "saddle up".into(),
        },
    });
    service
}

pub fn attach_context() -> AttachContext {
    let tracer = SdkTracerProvider::builder().build().tracer("webserver-tests");
    AttachContext::new("webserver", "test", tracer)
}

pub fn coordinator() -> Arc<ShutdownCoordinator> {
    Arc::new(ShutdownCoordinator::new(ShutdownSettings::default()))
}

pub fn saddled(service: &mut Webserver, coordinator: &Arc<ShutdownCoordinator>) -> Saddle {
    Saddle::new(service, &attach_context(), saddle::build_info!(), coordinator).unwrap()
}

pub fn app() -> Router {
    saddled(&mut configured_webserver(), &coordinator()).router()
}

pub fn hello_world(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/v1/hello-world")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Routes events on the current thread into a buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(move || writer.clone())
        .finish();
    (buffer, tracing::subscriber::set_default(subscriber))
}
