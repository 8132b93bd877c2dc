use std::time::{Duration, Instant};

use metrics_facade::MetricSink;

fn key(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

/// Logs every metric it receives.
struct LogSink;

impl MetricSink for LogSink {
    fn set_gauge(&self, key: &[String], val: f32) {
        tracing::info!(message = "gauge", key = %key.join("."), val);
    }

    fn emit_key(&self, key: &[String], val: f32) {
        tracing::info!(message = "kv", key = %key.join("."), val);
    }

    fn incr_counter(&self, key: &[String], val: f32) {
        tracing::info!(message = "counter", key = %key.join("."), val);
    }

    fn add_sample(&self, key: &[String], val: f32) {
        tracing::info!(message = "sample", key = %key.join("."), val);
    }

    fn measure_since(&self, key: &[String], elapsed: Duration) {
        tracing::info!(message = "timer", key = %key.join("."), elapsed = ?elapsed);
    }
}

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let sink = metrics_facade::ServiceSink::new(metrics_facade::Config::new("demo"), LogSink)?;
    metrics_facade::set_metrics(sink);
    tokio::spawn(metrics_facade::runtime::export_task(Duration::from_secs(1)));

    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    for _ in 0..10 {
        let start = Instant::now();
        ticker.tick().await;
        let mut ticks = key(&["demo", "*/*", "ticks"]);
        metrics_facade::incr_counter(&mut ticks, 1.0);
        let mut wait = key(&["demo", "tick/wait"]);
        metrics_facade::measure_since(&mut wait, start);
    }
    Ok(())
}
