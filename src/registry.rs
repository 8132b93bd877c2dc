use arc_swap::ArcSwap;
use std::{
    sync::{Arc, LazyLock},
    time::Instant,
};

use crate::{
    normalize::normalize_key,
    sink::{BlackholeSink, MetricSink},
};

pub static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Holds the currently active [`MetricSink`] and dispatches normalized
/// metric calls to it. There is always a sink, a fresh registry starts out
/// with a [`BlackholeSink`].
///
/// The sink lives behind an [`ArcSwap`], so replacing it is a single pointer
/// swap and emitting never takes a lock.
pub struct Registry {
    sink: ArcSwap<Box<dyn MetricSink>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sink: ArcSwap::from_pointee(Box::new(BlackholeSink) as Box<dyn MetricSink>),
        }
    }

    /// Replace the active sink. The previous sink is dropped once any
    /// in-flight calls holding it finish.
    pub fn configure<S: MetricSink + 'static>(&self, sink: S) {
        let sink: Box<dyn MetricSink> = Box::new(sink);
        self.sink.store(Arc::new(sink));
        tracing::debug!(message = "replaced metrics sink");
    }

    /// Like [`Registry::configure`] but for a sink the caller wants to keep a
    /// handle to.
    pub fn configure_shared(&self, sink: Arc<dyn MetricSink>) {
        self.configure(sink);
    }

    /// Return the active sink. Callers that hold on to it keep the old sink
    /// alive across a later [`Registry::configure`].
    pub fn active(&self) -> Arc<dyn MetricSink> {
        self.sink.load_full()
    }

    pub fn set_gauge(&self, key: &mut [String], val: f32) {
        normalize_key(key);
        self.sink.load().set_gauge(key, val);
    }

    pub fn emit_key(&self, key: &mut [String], val: f32) {
        normalize_key(key);
        self.sink.load().emit_key(key, val);
    }

    pub fn incr_counter(&self, key: &mut [String], val: f32) {
        normalize_key(key);
        self.sink.load().incr_counter(key, val);
    }

    pub fn add_sample(&self, key: &mut [String], val: f32) {
        normalize_key(key);
        self.sink.load().add_sample(key, val);
    }

    /// The elapsed time is taken here, at the call boundary, so a sink that
    /// queues work doesn't inflate the measurement.
    pub fn measure_since(&self, key: &mut [String], start: Instant) {
        let elapsed = start.elapsed();
        normalize_key(key);
        self.sink.load().measure_since(key, elapsed);
    }
}
