pub mod error;
pub mod implementation;

use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use serde::Deserialize;
use validator::{Validate, ValidationError};

pub const DEFAULT_SAMPLE_RATE: f64 = 10.0;
pub const DEFAULT_CLOUD_TRACE_ENDPOINT: &str = "https://telemetry.googleapis.com";

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct CloudTraceSettings {
    #[validate(length(min = 1, code = "required"))]
    pub project_id: String,
    #[validate(required, range(min = 0.0, max = 100.0))]
    pub sample_rate: Option<f64>,
    #[validate(url)]
    pub endpoint: Option<String>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct JaegerSettings {
    #[validate(url)]
    pub uri: String,
    #[validate(required, range(min = 0.0, max = 100.0))]
    pub sample_rate: Option<f64>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct StdOutSettings {
    #[validate(required, range(min = 0.0, max = 100.0))]
    pub sample_rate: Option<f64>,
}

#[derive(Deserialize, Validate, Clone, Debug)]
pub struct NoneSettings {
    #[serde(default)]
    pub disabled: bool,
}

/// Exporter choices as written in configuration; at most one may be set.
#[derive(Deserialize, Validate, Clone, Default, Debug)]
#[validate(schema(function = "at_most_one_exporter"))]
pub struct ExporterSettings {
    #[validate(nested)]
    pub cloud_trace: Option<CloudTraceSettings>,
    #[validate(nested)]
    pub jaeger: Option<JaegerSettings>,
    #[validate(nested)]
    pub stdout: Option<StdOutSettings>,
    #[validate(nested)]
    pub none: Option<NoneSettings>,
}

/// The one exporter picked from validated [`ExporterSettings`].
#[derive(Clone, PartialEq, Debug)]
pub enum TelemetryExporter {
    CloudTrace {
        project_id: String,
        endpoint: String,
        sample_rate: f64,
    },
    Jaeger {
        uri: String,
        sample_rate: f64,
    },
    StdOut {
        sample_rate: f64,
    },
    Disabled,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Deserialize, Validate, Clone, Default, Debug)]
pub struct LoggingConfig {
    pub rust_log: Option<String>,
    pub log_format: Option<LogFormat>,
    pub tracing_level: Option<String>,
    pub with_file: Option<bool>,
    pub with_line_number: Option<bool>,
}

/// Who is emitting telemetry; becomes the OpenTelemetry resource.
#[derive(Clone, Debug)]
pub struct ServiceIdentity {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub hostname: String,
}

pub struct Observability {
    pub tracer_provider: SdkTracerProvider,
    pub tracer: SdkTracer,
}

fn at_most_one_exporter(settings: &ExporterSettings) -> Result<(), ValidationError> {
    let populated = [
        settings.cloud_trace.is_some(),
        settings.jaeger.is_some(),
        settings.stdout.is_some(),
        settings.none.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();

    if populated > 1 {
        return Err(ValidationError::new("exclusive")
            .with_message("only one telemetry exporter may be configured".into()));
    }
    Ok(())
}
