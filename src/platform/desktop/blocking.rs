use std::time::Instant;

use tracing::debug;

/// Runs slow work (file parsing, database writes) inline on the UI thread,
/// inside a tracing span named after the task.
pub fn run_blocking<F, T>(task: &'static str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let _span = tracing::debug_span!("blocking", task).entered();
    let started = Instant::now();
    let result = f();
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "task finished"
    );
    result
}
