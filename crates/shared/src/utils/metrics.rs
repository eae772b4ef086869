use prometheus_client::{
    metrics::{counter::Counter, family::Family, gauge::Gauge, histogram::Histogram},
    registry::Registry,
};
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::sync::atomic::AtomicU64;
use std::time::Duration;
use std::sync::Arc;
use sysinfo::System;
use tracing::debug;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct MethodLabels {
    pub service: String,
    pub method: Method,
    pub status: Status,
}

#[derive(Debug)]
pub struct Metrics {
    pub request_counter: Family<MethodLabels, Counter>,
    pub request_duration: Family<MethodLabels, Histogram>,
}

impl Metrics {
    pub fn new() -> Self {
        let request_counter = Family::<MethodLabels, Counter>::default();
        let request_duration = Family::<MethodLabels, Histogram>::new_with_constructor(|| {
            Histogram::new([0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0].into_iter())
        });

        Self {
            request_counter,
            request_duration,
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "kasir_request_counter",
            "Total number of service operations, by service, method and outcome",
            self.request_counter.clone(),
        );
        registry.register(
            "kasir_request_duration",
            "Histogram of service operation durations in seconds",
            self.request_duration.clone(),
        );
    }

    pub fn record(&self, service: &str, method: Method, status: Status, elapsed_secs: f64) {
        let labels = MethodLabels {
            service: service.to_string(),
            method,
            status,
        };

        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(elapsed_secs);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct SystemMetrics {
    pub cpu_usage: Gauge<f64, AtomicU64>,
    pub memory_used_bytes: Gauge,
    pub memory_total_bytes: Gauge,
    pub uptime_seconds: Gauge,
}

impl SystemMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, registry: &mut Registry) {
        registry.register(
            "system_cpu_usage_percent",
            "Global CPU usage in percent",
            self.cpu_usage.clone(),
        );
        registry.register(
            "system_memory_used_bytes",
            "Used memory in bytes",
            self.memory_used_bytes.clone(),
        );
        registry.register(
            "system_memory_total_bytes",
            "Total memory in bytes",
            self.memory_total_bytes.clone(),
        );
        registry.register(
            "system_uptime_seconds",
            "Host uptime in seconds",
            self.uptime_seconds.clone(),
        );
    }

    fn update(&self, sys: &System) {
        self.cpu_usage.set(sys.global_cpu_usage() as f64);
        self.memory_used_bytes.set(sys.used_memory() as i64);
        self.memory_total_bytes.set(sys.total_memory() as i64);
        self.uptime_seconds.set(System::uptime() as i64);
    }
}

pub async fn run_metrics_collector(metrics: Arc<SystemMetrics>) {
    let mut sys = System::new_all();
    let mut interval = tokio::time::interval(Duration::from_secs(15));

    loop {
        interval.tick().await;

        sys.refresh_cpu_usage();
        sys.refresh_memory();
        metrics.update(&sys);

        debug!("System metrics refreshed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn records_are_labelled_per_service() {
        let mut registry = Registry::default();
        let metrics = Metrics::new();
        metrics.register(&mut registry);

        metrics.record("transfer", Method::Post, Status::Success, 0.02);
        metrics.record("transfer", Method::Post, Status::Success, 0.03);
        metrics.record("modal", Method::Get, Status::Error, 0.01);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();

        assert!(buffer.contains(
            r#"kasir_request_counter_total{service="transfer",method="Post",status="Success"} 2"#
        ));
        assert!(buffer.contains(
            r#"kasir_request_counter_total{service="modal",method="Get",status="Error"} 1"#
        ));
    }
}
