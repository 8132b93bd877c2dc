//! Configuration for the [`ServiceSink`](crate::sink::ServiceSink) adapter.
//! There is no loading here, callers build a [`Config`] however they like and
//! hand it over.

use std::time::Duration;

use thiserror::Error;

const DEFAULT_TIMER_GRANULARITY: Duration = Duration::from_millis(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timer granularity must be non-zero")]
    ZeroTimerGranularity,

    #[error("empty prefix in {list} prefix list")]
    EmptyFilterPrefix { list: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Prepended to every key when non-empty.
    pub service_name: String,
    /// Inserted in front of gauge keys when `enable_hostname` is set.
    pub host_name: String,
    pub enable_hostname: bool,
    /// Prefix keys with the metric type (`gauge`, `kv`, `counter`, `sample`,
    /// `timer`).
    pub enable_type_prefix: bool,
    /// Timings are reported as multiples of this.
    pub timer_granularity: Duration,
    pub allowed_prefixes: Vec<String>,
    pub blocked_prefixes: Vec<String>,
    /// Whether keys that match neither prefix list get through.
    pub filter_default: bool,
}

impl Config {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            host_name: gethostname::gethostname().to_string_lossy().into_owned(),
            enable_hostname: true,
            enable_type_prefix: false,
            timer_granularity: DEFAULT_TIMER_GRANULARITY,
            allowed_prefixes: Vec::new(),
            blocked_prefixes: Vec::new(),
            filter_default: true,
        }
    }

    pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
        self.host_name = host_name.into();
        self
    }

    pub fn with_hostname_enabled(mut self, enabled: bool) -> Self {
        self.enable_hostname = enabled;
        self
    }

    pub fn with_type_prefix(mut self, enabled: bool) -> Self {
        self.enable_type_prefix = enabled;
        self
    }

    pub fn with_timer_granularity(mut self, granularity: Duration) -> Self {
        self.timer_granularity = granularity;
        self
    }

    pub fn with_allowed_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.allowed_prefixes = prefixes;
        self
    }

    pub fn with_blocked_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.blocked_prefixes = prefixes;
        self
    }

    pub fn with_filter_default(mut self, allow: bool) -> Self {
        self.filter_default = allow;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer_granularity.is_zero() {
            return Err(ConfigError::ZeroTimerGranularity);
        }
        if self.allowed_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFilterPrefix { list: "allowed" });
        }
        if self.blocked_prefixes.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyFilterPrefix { list: "blocked" });
        }
        Ok(())
    }

    pub(crate) fn filter(&self) -> PrefixFilter {
        PrefixFilter::new(
            self.allowed_prefixes.clone(),
            self.blocked_prefixes.clone(),
            self.filter_default,
        )
    }
}

/// Decides whether a dotted metric name should be emitted. The longest
/// matching prefix from either list wins, blocked beats allowed on a tie.
#[derive(Debug, Clone)]
pub(crate) struct PrefixFilter {
    allowed: Vec<String>,
    blocked: Vec<String>,
    default: bool,
}

impl PrefixFilter {
    pub(crate) fn new(allowed: Vec<String>, blocked: Vec<String>, default: bool) -> Self {
        Self {
            allowed,
            blocked,
            default,
        }
    }

    pub(crate) fn allows(&self, name: &str) -> bool {
        let longest = |prefixes: &[String]| {
            prefixes
                .iter()
                .filter(|p| name.starts_with(p.as_str()))
                .map(String::len)
                .max()
        };
        match (longest(&self.allowed), longest(&self.blocked)) {
            (None, None) => self.default,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some(allowed), Some(blocked)) => allowed > blocked,
        }
    }
}
