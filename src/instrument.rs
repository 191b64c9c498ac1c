//! Execution-time instrumentation for the transforms.
//!
//! Every public transform runs through [`timed`], which emits one `tracing` event at `INFO`
//! with the function name and elapsed wall time once the body returns (successfully or not).
//! Instrumentation is not part of any transform's contract: with no subscriber installed the
//! events are dropped.

use std::time::{Duration, Instant};

/// Run `body`, then log how long it took under `function`.
pub(crate) fn timed<T>(function: &'static str, body: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = body();
    log_elapsed(function, start.elapsed());
    out
}

fn log_elapsed(function: &'static str, elapsed: Duration) {
    tracing::info!(
        function,
        elapsed_secs = elapsed.as_secs_f64(),
        "function {} took {:.6} seconds to execute",
        function,
        elapsed.as_secs_f64()
    );
}
