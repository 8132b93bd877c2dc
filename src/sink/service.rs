use std::time::Duration;

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::MetricSink;
use crate::config::{Config, ConfigError, PrefixFilter};

type ComposedKey = SmallVec<[String; 8]>;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Gauge,
    Key,
    Counter,
    Sample,
    Timer,
}

impl Kind {
    fn prefix(self) -> &'static str {
        match self {
            Kind::Gauge => "gauge",
            Kind::Key => "kv",
            Kind::Counter => "counter",
            Kind::Sample => "sample",
            Kind::Timer => "timer",
        }
    }
}

/// Wraps another sink and decorates every key with the service name, the
/// metric type and (for gauges) the host name, dropping anything the prefix
/// filter rejects. Timings are turned into samples measured in units of the
/// configured timer granularity.
pub struct ServiceSink<S> {
    config: Config,
    filter: RwLock<PrefixFilter>,
    inner: S,
}

impl<S: MetricSink> ServiceSink<S> {
    pub fn new(config: Config, inner: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            filter: RwLock::new(config.filter()),
            config,
            inner,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Swap the prefix lists at runtime. The default filter decision stays
    /// whatever the config said.
    pub fn update_filter(
        &self,
        allowed: Vec<String>,
        blocked: Vec<String>,
    ) -> Result<(), ConfigError> {
        if allowed.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFilterPrefix { list: "allowed" });
        }
        if blocked.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFilterPrefix { list: "blocked" });
        }
        tracing::debug!(
            message = "updating metric filter",
            allowed = allowed.len(),
            blocked = blocked.len()
        );
        *self.filter.write() = PrefixFilter::new(allowed, blocked, self.config.filter_default);
        Ok(())
    }

    /// Build the decorated key, or `None` if the filter drops it.
    fn compose(&self, kind: Kind, key: &[String]) -> Option<ComposedKey> {
        let mut composed = ComposedKey::with_capacity(key.len() + 3);
        if !self.config.service_name.is_empty() {
            composed.push(self.config.service_name.clone());
        }
        if self.config.enable_type_prefix {
            composed.push(kind.prefix().to_string());
        }
        if matches!(kind, Kind::Gauge)
            && self.config.enable_hostname
            && !self.config.host_name.is_empty()
        {
            composed.push(self.config.host_name.clone());
        }
        composed.extend(key.iter().cloned());

        let name = composed.join(".");
        if self.filter.read().allows(&name) {
            Some(composed)
        } else {
            tracing::trace!(message = "metric filtered", name = %name);
            None
        }
    }

    fn in_timer_units(&self, elapsed: Duration) -> f32 {
        (elapsed.as_secs_f64() / self.config.timer_granularity.as_secs_f64()) as f32
    }
}

impl<S: MetricSink> MetricSink for ServiceSink<S> {
    fn set_gauge(&self, key: &[String], val: f32) {
        if let Some(key) = self.compose(Kind::Gauge, key) {
            self.inner.set_gauge(&key, val);
        }
    }

    fn emit_key(&self, key: &[String], val: f32) {
        if let Some(key) = self.compose(Kind::Key, key) {
            self.inner.emit_key(&key, val);
        }
    }

    fn incr_counter(&self, key: &[String], val: f32) {
        if let Some(key) = self.compose(Kind::Counter, key) {
            self.inner.incr_counter(&key, val);
        }
    }

    fn add_sample(&self, key: &[String], val: f32) {
        if let Some(key) = self.compose(Kind::Sample, key) {
            self.inner.add_sample(&key, val);
        }
    }

    fn measure_since(&self, key: &[String], elapsed: Duration) {
        if let Some(key) = self.compose(Kind::Timer, key) {
            self.inner.add_sample(&key, self.in_timer_units(elapsed));
        }
    }
}
