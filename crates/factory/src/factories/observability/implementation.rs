use std::time::Duration;

use opentelemetry::{
    KeyValue, global,
    propagation::TextMapCompositePropagator,
    trace::TracerProvider as _,
};
use opentelemetry_otlp::{SpanExporter, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    propagation::{BaggagePropagator, TraceContextPropagator},
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider, SpanExporter as SdkSpanExporter},
};
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{DEPLOYMENT_ENVIRONMENT_NAME, HOST_NAME, SERVICE_VERSION},
};
use sysinfo::System;
use time::macros::format_description;
use tonic::{
    metadata::{Ascii, MetadataMap, MetadataValue},
    transport::ClientTlsConfig,
};
use tracing::{Level, info, warn};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::factories::observability::{
    DEFAULT_CLOUD_TRACE_ENDPOINT, DEFAULT_SAMPLE_RATE, ExporterSettings, LogFormat, LoggingConfig,
    Observability, ServiceIdentity, TelemetryExporter, error::ObservabilityError,
};

const LOCAL_ENVIRONMENT: &str = "local";
const GOOGLE_PROJECT_HEADER: &str = "x-goog-user-project";

impl ExporterSettings {
    /// Picks the exporter by fixed priority: cloud trace, jaeger, stdout, none.
    ///
    /// With nothing configured, or `none` present but not `disabled`, spans go
    /// to stdout at the default sample rate.
    pub fn select(&self) -> TelemetryExporter {
        if let Some(cloud_trace) = &self.cloud_trace {
            return TelemetryExporter::CloudTrace {
                project_id: cloud_trace.project_id.clone(),
                endpoint: cloud_trace
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CLOUD_TRACE_ENDPOINT.to_string()),
                sample_rate: cloud_trace.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            };
        }
        if let Some(jaeger) = &self.jaeger {
            return TelemetryExporter::Jaeger {
                uri: jaeger.uri.clone(),
                sample_rate: jaeger.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            };
        }
        if let Some(stdout) = &self.stdout {
            return TelemetryExporter::StdOut {
                sample_rate: stdout.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
            };
        }
        if let Some(none) = &self.none
            && none.disabled
        {
            return TelemetryExporter::Disabled;
        }

        TelemetryExporter::StdOut {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl TelemetryExporter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CloudTrace { .. } => "cloud_trace",
            Self::Jaeger { .. } => "jaeger",
            Self::StdOut { .. } => "stdout",
            Self::Disabled => "none",
        }
    }

    /// Sampler for this exporter; the rate is a percentage.
    pub fn sampler(&self) -> Sampler {
        match self {
            Self::CloudTrace { sample_rate, .. }
            | Self::Jaeger { sample_rate, .. }
            | Self::StdOut { sample_rate } => Sampler::TraceIdRatioBased(sample_rate / 100.0),
            Self::Disabled => Sampler::AlwaysOff,
        }
    }
}

impl LoggingConfig {
    /// Explicit format, else pretty for local development and json everywhere else.
    pub fn format_for(&self, environment: &str) -> LogFormat {
        self.log_format.unwrap_or(if environment == LOCAL_ENVIRONMENT {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        })
    }

    pub fn env_filter(&self) -> EnvFilter {
        let level = match self.tracing_level.as_deref() {
            Some("TRACE") => Level::TRACE,
            Some("DEBUG") => Level::DEBUG,
            Some("WARN") => Level::WARN,
            Some("ERROR") => Level::ERROR,
            _ => Level::INFO,
        };

        match &self.rust_log {
            Some(rust_log) => EnvFilter::new(rust_log),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase())),
        }
    }
}

impl ServiceIdentity {
    pub fn new(
        service_name: impl Into<String>,
        service_version: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: service_version.into(),
            environment: environment.into(),
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        }
    }

    pub fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .with_schema_url(
                [
                    KeyValue::new(SERVICE_VERSION, self.service_version.clone()),
                    KeyValue::new(DEPLOYMENT_ENVIRONMENT_NAME, self.environment.clone()),
                    KeyValue::new(HOST_NAME, self.hostname.clone()),
                ],
                SCHEMA_URL,
            )
            .build()
    }
}

impl Observability {
    /// Builds and registers the tracer provider, then installs the logging subscriber.
    pub fn init(
        identity: &ServiceIdentity,
        exporter: &TelemetryExporter,
        logging: &LoggingConfig,
    ) -> Result<Observability, ObservabilityError> {
        global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
            Box::new(TraceContextPropagator::new()),
            Box::new(BaggagePropagator::new()),
        ]));

        let tracer_provider = Self::build_tracer_provider(identity, exporter)?;
        global::set_tracer_provider(tracer_provider.clone());
        let tracer = tracer_provider.tracer(identity.service_name.clone());

        let format = logging.format_for(&identity.environment);
        let timer = LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ));
        let with_file = logging.with_file.unwrap_or(true);
        let with_line_number = logging.with_line_number.unwrap_or(true);

        let fmt_layer = match format {
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .compact()
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .with_timer(timer)
                .with_target(false)
                .with_file(with_file)
                .with_line_number(with_line_number)
                .json()
                .flatten_event(true)
                .with_span_list(false)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(logging.env_filter())
            .with(fmt_layer)
            .with(OpenTelemetryLayer::new(tracer.clone()))
            .try_init()?;

        info!(
            exporter = exporter.name(),
            service = %identity.service_name,
            environment = %identity.environment,
            "telemetry initialized"
        );

        Ok(Observability {
            tracer_provider,
            tracer,
        })
    }

    /// Constructs the tracer provider for `exporter` without registering anything globally.
    pub fn build_tracer_provider(
        identity: &ServiceIdentity,
        exporter: &TelemetryExporter,
    ) -> Result<SdkTracerProvider, ObservabilityError> {
        let resource = identity.resource();
        let sampler = exporter.sampler();

        let provider = match exporter {
            TelemetryExporter::CloudTrace {
                project_id,
                endpoint,
                ..
            } => {
                let project = MetadataValue::<Ascii>::try_from(project_id.as_str())
                    .map_err(|_| ObservabilityError::InvalidProjectId(project_id.clone()))?;
                let mut metadata = MetadataMap::new();
                metadata.insert(GOOGLE_PROJECT_HEADER, project);

                let span_exporter = SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint)
                    .with_compression(opentelemetry_otlp::Compression::Gzip)
                    .with_tls_config(ClientTlsConfig::new().with_native_roots())
                    .with_metadata(metadata)
                    .build()?;
                batched(span_exporter, sampler, resource)
            }
            TelemetryExporter::Jaeger { uri, .. } => {
                let mut builder = SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(uri)
                    .with_compression(opentelemetry_otlp::Compression::Gzip);
                if uri.starts_with("https://") {
                    builder = builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
                }
                batched(builder.build()?, sampler, resource)
            }
            TelemetryExporter::StdOut { .. } => batched(
                opentelemetry_stdout::SpanExporter::default(),
                sampler,
                resource,
            ),
            TelemetryExporter::Disabled => SdkTracerProvider::builder()
                .with_sampler(sampler)
                .with_resource(resource)
                .build(),
        };

        Ok(provider)
    }

    /// Flushes pending spans and shuts the provider down, giving up after `timeout`.
    ///
    /// Failures are logged only; the process is exiting anyway.
    pub async fn shutdown(self, timeout: Duration) {
        let provider = self.tracer_provider;
        let task = tokio::task::spawn_blocking(move || {
            if let Err(err) = provider.force_flush() {
                warn!(error = %err, "telemetry flush failed");
            }
            provider.shutdown()
        });

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(()))) => info!("telemetry flushed"),
            Ok(Ok(Err(err))) => warn!(error = %err, "telemetry shutdown failed"),
            Ok(Err(err)) => warn!(error = %err, "telemetry shutdown task failed"),
            Err(_) => warn!(?timeout, "telemetry flush timed out"),
        }
    }
}

fn batched<E>(exporter: E, sampler: Sampler, resource: Resource) -> SdkTracerProvider
where
    E: SdkSpanExporter + 'static,
{
    SdkTracerProvider::builder()
        .with_id_generator(RandomIdGenerator::default())
        .with_batch_exporter(exporter)
        .with_sampler(sampler)
        .with_resource(resource)
        .build()
}
