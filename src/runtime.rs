//! Provide simple tokio runtime metrics through the facade. Spawn
//! [`export_task`] on the runtime you want to watch and whatever sink is
//! configured gets the numbers for "free".

use std::time::Duration;

mod keys {
    pub const ALIVE_TASKS: [&str; 3] = ["runtime", "tokio", "alive_tasks"];
    pub const WORKERS: [&str; 3] = ["runtime", "tokio", "workers"];
    pub const GLOBAL_QUEUE_DEPTH: [&str; 3] = ["runtime", "tokio", "global_queue_depth"];
}

fn key(segments: [&str; 3]) -> Vec<String> {
    segments.iter().map(|s| s.to_string()).collect()
}

/// Export tokio runtime gauges every `interval`. Must be spawned on a tokio
/// runtime, and never returns.
pub async fn export_task(interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        export_once();
    }
}

/// Emit a single round of runtime gauges for the current runtime. Does
/// nothing when called outside of a tokio runtime.
pub fn export_once() {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::debug!(message = "no tokio runtime, skipping runtime metrics");
        return;
    };
    let metrics = handle.metrics();
    crate::set_gauge(&mut key(keys::ALIVE_TASKS), metrics.num_alive_tasks() as f32);
    crate::set_gauge(&mut key(keys::WORKERS), metrics.num_workers() as f32);
    crate::set_gauge(
        &mut key(keys::GLOBAL_QUEUE_DEPTH),
        metrics.global_queue_depth() as f32,
    );
    tracing::trace!(message = "exported runtime metrics", workers = metrics.num_workers());
}
