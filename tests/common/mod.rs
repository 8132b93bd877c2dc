#![allow(dead_code)]

use std::time::Duration;

use metrics_facade::MetricSink;
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Gauge(Vec<String>, f32),
    Key(Vec<String>, f32),
    Counter(Vec<String>, f32),
    Sample(Vec<String>, f32),
    Timer(Vec<String>, Duration),
}

#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<Call>>,
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
