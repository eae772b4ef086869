use anyhow::{Context, Result};
use opentelemetry::global;
use opentelemetry_otlp::{LogExporter, MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource, logs::SdkLoggerProvider, metrics::SdkMeterProvider,
    propagation::TraceContextPropagator, trace::SdkTracerProvider,
};
use std::sync::OnceLock;

/// Owns the OpenTelemetry providers of one process. Each `init_*` call
/// installs the provider globally and keeps a handle so `shutdown` can
/// flush everything on exit.
pub struct Telemetry {
    service_name: String,
    endpoint: String,
    tracer_provider: OnceLock<SdkTracerProvider>,
    meter_provider: OnceLock<SdkMeterProvider>,
    logger_provider: OnceLock<SdkLoggerProvider>,
}

impl Telemetry {
    pub fn new(service_name: &str, endpoint: String) -> Self {
        Self {
            service_name: service_name.to_string(),
            endpoint,
            tracer_provider: OnceLock::new(),
            meter_provider: OnceLock::new(),
            logger_provider: OnceLock::new(),
        }
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_service_name(self.service_name.clone())
            .build()
    }

    fn is_stdout(&self) -> bool {
        self.endpoint == "stdout"
    }

    pub fn init_tracer(&self) -> Result<SdkTracerProvider> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let builder = SdkTracerProvider::builder().with_resource(self.resource());

        let provider = if self.is_stdout() {
            builder
                .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
                .build()
        } else {
            let exporter = SpanExporter::builder()
                .with_tonic()
                .with_endpoint(self.endpoint.clone())
                .build()
                .context("Failed to build OTLP span exporter")?;
            builder.with_batch_exporter(exporter).build()
        };

        global::set_tracer_provider(provider.clone());
        let _ = self.tracer_provider.set(provider.clone());

        Ok(provider)
    }

    pub fn init_meter(&self) -> Result<SdkMeterProvider> {
        let builder = SdkMeterProvider::builder().with_resource(self.resource());

        let provider = if self.is_stdout() {
            builder.build()
        } else {
            let exporter = MetricExporter::builder()
                .with_tonic()
                .with_endpoint(self.endpoint.clone())
                .build()
                .context("Failed to build OTLP metric exporter")?;
            builder.with_periodic_exporter(exporter).build()
        };

        global::set_meter_provider(provider.clone());
        let _ = self.meter_provider.set(provider.clone());

        Ok(provider)
    }

    pub fn init_logger(&self) -> Result<SdkLoggerProvider> {
        let builder = SdkLoggerProvider::builder().with_resource(self.resource());

        let provider = if self.is_stdout() {
            builder.build()
        } else {
            let exporter = LogExporter::builder()
                .with_tonic()
                .with_endpoint(self.endpoint.clone())
                .build()
                .context("Failed to build OTLP log exporter")?;
            builder.with_batch_exporter(exporter).build()
        };

        let _ = self.logger_provider.set(provider.clone());

        Ok(provider)
    }

    pub async fn shutdown(&self) -> Result<()> {
        let mut shutdown_errors = Vec::new();

        if let Some(provider) = self.tracer_provider.get() {
            if let Err(e) = provider.shutdown() {
                shutdown_errors.push(format!("tracer provider: {e}"));
            }
        }
        if let Some(provider) = self.meter_provider.get() {
            if let Err(e) = provider.shutdown() {
                shutdown_errors.push(format!("meter provider: {e}"));
            }
        }
        if let Some(provider) = self.logger_provider.get() {
            if let Err(e) = provider.shutdown() {
                shutdown_errors.push(format!("logger provider: {e}"));
            }
        }

        if !shutdown_errors.is_empty() {
            anyhow::bail!(
                "Failed to shutdown providers:\n{}",
                shutdown_errors.join("\n")
            );
        }

        Ok(())
    }
}
