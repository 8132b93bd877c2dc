use std::{sync::Arc, time::Duration};

pub(crate) mod blackhole;
pub(crate) mod fanout;
pub(crate) mod service;

pub use blackhole::BlackholeSink;
pub use fanout::FanoutSink;
pub use service::ServiceSink;

/// The capability every metrics backend adapter provides. A sink receives
/// already normalized keys, and is responsible for whatever aggregation,
/// buffering or transport it needs.
///
/// Emission is infallible from the caller's point of view. Sinks that can fail
/// internally should swallow (and probably log) their own errors.
pub trait MetricSink: Send + Sync {
    /// Set the gauge named by `key` to `val`.
    fn set_gauge(&self, key: &[String], val: f32);

    /// Emit a raw key/value pair.
    fn emit_key(&self, key: &[String], val: f32);

    /// Increment the counter named by `key` by `val`.
    fn incr_counter(&self, key: &[String], val: f32);

    /// Add a sample to an aggregated metric.
    fn add_sample(&self, key: &[String], val: f32);

    /// Record a timing. `elapsed` is computed by the caller at the moment of
    /// emission.
    fn measure_since(&self, key: &[String], elapsed: Duration);
}

impl<S: MetricSink + ?Sized> MetricSink for Arc<S> {
    fn set_gauge(&self, key: &[String], val: f32) {
        (**self).set_gauge(key, val)
    }

    fn emit_key(&self, key: &[String], val: f32) {
        (**self).emit_key(key, val)
    }

    fn incr_counter(&self, key: &[String], val: f32) {
        (**self).incr_counter(key, val)
    }

    fn add_sample(&self, key: &[String], val: f32) {
        (**self).add_sample(key, val)
    }

    fn measure_since(&self, key: &[String], elapsed: Duration) {
        (**self).measure_since(key, elapsed)
    }
}

impl<S: MetricSink + ?Sized> MetricSink for Box<S> {
    fn set_gauge(&self, key: &[String], val: f32) {
        (**self).set_gauge(key, val)
    }

    fn emit_key(&self, key: &[String], val: f32) {
        (**self).emit_key(key, val)
    }

    fn incr_counter(&self, key: &[String], val: f32) {
        (**self).incr_counter(key, val)
    }

    fn add_sample(&self, key: &[String], val: f32) {
        (**self).add_sample(key, val)
    }

    fn measure_since(&self, key: &[String], elapsed: Duration) {
        (**self).measure_since(key, elapsed)
    }
}

impl<S: MetricSink + ?Sized> MetricSink for &S {
    #[inline]
    fn set_gauge(&self, key: &[String], val: f32) {
        (**self).set_gauge(key, val)
    }

    #[inline]
    fn emit_key(&self, key: &[String], val: f32) {
        (**self).emit_key(key, val)
    }

    #[inline]
    fn incr_counter(&self, key: &[String], val: f32) {
        (**self).incr_counter(key, val)
    }

    #[inline]
    fn add_sample(&self, key: &[String], val: f32) {
        (**self).add_sample(key, val)
    }

    #[inline]
    fn measure_since(&self, key: &[String], elapsed: Duration) {
        (**self).measure_since(key, elapsed)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use parking_lot::Mutex;

    use super::MetricSink;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Gauge(Vec<String>, f32),
        Key(Vec<String>, f32),
        Counter(Vec<String>, f32),
        Sample(Vec<String>, f32),
        Timer(Vec<String>, Duration),
    }

    /// Remembers every call made against it, in order.
    #[derive(Default)]
    pub struct RecordingSink {
        pub calls: Mutex<Vec<Call>>,
    }

    impl RecordingSink {
        pub fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock())
        }
    }

    impl MetricSink for RecordingSink {
        fn set_gauge(&self, key: &[String], val: f32) {
            self.calls.lock().push(Call::Gauge(key.to_vec(), val));
        }

        fn emit_key(&self, key: &[String], val: f32) {
            self.calls.lock().push(Call::Key(key.to_vec(), val));
        }

        fn incr_counter(&self, key: &[String], val: f32) {
            self.calls.lock().push(Call::Counter(key.to_vec(), val));
        }

        fn add_sample(&self, key: &[String], val: f32) {
            self.calls.lock().push(Call::Sample(key.to_vec(), val));
        }

        fn measure_since(&self, key: &[String], elapsed: Duration) {
            self.calls.lock().push(Call::Timer(key.to_vec(), elapsed));
        }
    }

    pub fn key(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }
}
