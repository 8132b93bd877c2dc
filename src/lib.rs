//! A process-wide metrics facade. Application code emits gauges, counters,
//! samples and timings through a handful of free functions, and whatever
//! [`MetricSink`] is configured gets the calls, with key segments cleaned up
//! so naming-restrictive backends (prometheus) accept them.
//!
//! Until something calls [`set_metrics`] every call lands in a
//! [`BlackholeSink`], so instrumenting code never has to care whether metrics
//! are wired up.
//!
//! ```ignore
//! metrics_facade::set_metrics(my_sink);
//! metrics_facade::incr_counter(&mut ["my".into(), "namespace".into(), "counter".into()], 1.0);
//! metrics_facade::measure_since(&mut ["http".into(), "GET /users/*".into()], start);
//! ```

use std::time::Instant;

pub mod config;
pub mod normalize;
pub(crate) mod registry;
pub mod runtime;
pub mod sink;

pub use config::{Config, ConfigError};
pub use normalize::{normalize_key, normalize_segment};
pub use registry::{Registry, DEFAULT_REGISTRY};
pub use sink::{BlackholeSink, FanoutSink, MetricSink, ServiceSink};

/// Install `sink` as the process-wide metrics sink, replacing whatever was
/// there before.
pub fn set_metrics<S: MetricSink + 'static>(sink: S) {
    DEFAULT_REGISTRY.configure(sink)
}

/// Build a [`ServiceSink`] around `inner` from `config` and install it.
#[deprecated(note = "build a sink and call `set_metrics` instead")]
pub fn new_metrics<S: MetricSink + 'static>(config: Config, inner: S) -> Result<(), ConfigError> {
    let service = config.service_name.clone();
    set_metrics(ServiceSink::new(config, inner)?);
    tracing::info!(message = "installed service metrics sink", service = %service);
    Ok(())
}

/// Adds a sample to an aggregated metric.
///
/// ```ignore
/// add_sample(&mut ["my".into(), "namespace".into(), "key".into()], 15.0);
/// ```
pub fn add_sample(key: &mut [String], val: f32) {
    DEFAULT_REGISTRY.add_sample(key, val)
}

/// Emits a key/value pair.
pub fn emit_key(key: &mut [String], val: f32) {
    DEFAULT_REGISTRY.emit_key(key, val)
}

/// Increments the counter named by `key`.
pub fn incr_counter(key: &mut [String], val: f32) {
    DEFAULT_REGISTRY.incr_counter(key, val)
}

/// Records the time elapsed since `start`. The duration is taken when this is
/// called.
pub fn measure_since(key: &mut [String], start: Instant) {
    DEFAULT_REGISTRY.measure_since(key, start)
}

/// Sets the named gauge to `val`.
pub fn set_gauge(key: &mut [String], val: f32) {
    DEFAULT_REGISTRY.set_gauge(key, val)
}
