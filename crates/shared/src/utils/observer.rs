use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

use crate::{
    domain::response::ErrorResponse,
    utils::{AppError, Method, Metrics, Status},
};

pub struct TracingContext {
    pub cx: Context,
    pub start_time: Instant,
}

/// Span and metric bookkeeping shared by every service. One observer per
/// service; the service name becomes both the tracer name and the
/// `service` metric label.
#[derive(Clone)]
pub struct Observer {
    service: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl std::fmt::Debug for Observer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("service", &self.service)
            .finish()
    }
}

impl Observer {
    pub fn new(service: &'static str, metrics: Arc<Mutex<Metrics>>) -> Self {
        Self { service, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.service)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, true, message).await;
    }

    pub async fn error(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, false, message).await;
    }

    /// Closes the span as failed and converts the error for the caller.
    pub async fn fail(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        err: AppError,
    ) -> ErrorResponse {
        self.complete(tracing_ctx, method, false, &err.to_string())
            .await;
        ErrorResponse::from(err)
    }

    /// Closes the span from the outcome of an operation.
    pub async fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<T, AppError>,
        message: &str,
    ) -> Result<T, ErrorResponse> {
        match result {
            Ok(value) => {
                self.success(tracing_ctx, method, message).await;
                Ok(value)
            }
            Err(err) => Err(self.fail(tracing_ctx, method, err).await),
        }
    }

    async fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("Operation completed successfully: {message}");
        } else {
            error!("Operation failed: {message}");
        }

        self.metrics
            .lock()
            .await
            .record(self.service, method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
