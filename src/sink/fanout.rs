use std::{sync::Arc, time::Duration};

use super::MetricSink;

/// Replicate every call to a list of sinks. Useful when migrating between
/// backends, or when shipping the same metrics to two places.
#[derive(Default, Clone)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn MetricSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Arc<dyn MetricSink>>) -> Self {
        Self { sinks }
    }

    pub fn push<S: MetricSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Arc::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl MetricSink for FanoutSink {
    fn set_gauge(&self, key: &[String], val: f32) {
        for sink in &self.sinks {
            sink.set_gauge(key, val);
        }
    }

    fn emit_key(&self, key: &[String], val: f32) {
        for sink in &self.sinks {
            sink.emit_key(key, val);
        }
    }

    fn incr_counter(&self, key: &[String], val: f32) {
        for sink in &self.sinks {
            sink.incr_counter(key, val);
        }
    }

    fn add_sample(&self, key: &[String], val: f32) {
        for sink in &self.sinks {
            sink.add_sample(key, val);
        }
    }

    fn measure_since(&self, key: &[String], elapsed: Duration) {
        for sink in &self.sinks {
            sink.measure_since(key, elapsed);
        }
    }
}
