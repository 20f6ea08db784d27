use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Failed to build span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("Invalid cloud trace project id `{0}`")]
    InvalidProjectId(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
