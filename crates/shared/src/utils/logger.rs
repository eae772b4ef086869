use anyhow::{Context, Result};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_DIR: &str = "logs";

/// Installs the global subscriber: console output, a daily JSON log file
/// and the OpenTelemetry log bridge. The returned guard must outlive the
/// process' last log line.
pub fn init_logger(logger_provider: SdkLoggerProvider, service_name: &str) -> Result<WorkerGuard> {
    // Transport crates log through the bridge themselves; keep them out to
    // avoid feedback loops.
    let otel_filter = EnvFilter::new("info,hyper=off,tonic=off,h2=off,reqwest=off");
    let otel_layer = OpenTelemetryTracingBridge::new(&logger_provider).with_filter(otel_filter);

    let fmt_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,{service_name}=debug")));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_names(true)
        .with_target(true)
        .with_filter(fmt_filter);

    let file_appender = tracing_appender::rolling::daily(LOG_DIR, format!("{service_name}.log"));
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(otel_layer)
        .with(fmt_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
