mod di;
mod errors;
mod logger;
mod metrics;
mod observer;
mod parsetime;
mod telemetry;

pub use self::di::DependenciesInject;
pub use self::errors::AppError;
pub use self::logger::init_logger;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::observer::{Observer, TracingContext};
pub use self::parsetime::{to_utc, today};
pub use self::telemetry::Telemetry;
