use std::time::Duration;

use super::MetricSink;

/// A sink that drops everything on the floor. This is what every registry
/// starts out with, so emitting before anything is configured is always safe.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlackholeSink;

impl MetricSink for BlackholeSink {
    fn set_gauge(&self, _key: &[String], _val: f32) {}

    fn emit_key(&self, _key: &[String], _val: f32) {}

    fn incr_counter(&self, _key: &[String], _val: f32) {}

    fn add_sample(&self, _key: &[String], _val: f32) {}

    fn measure_since(&self, _key: &[String], _elapsed: Duration) {}
}
