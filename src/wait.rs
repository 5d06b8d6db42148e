//! Cooperative timed wait.

use std::time::Duration;

/// Suspends the calling task for at least `ms` milliseconds of wall-clock
/// time, then resolves with the requested delay.
///
/// There is no cancellation handle and the future never fails; dropping it
/// is the only way to abandon the timer.
pub async fn wait(ms: u64) -> u64 {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    ms
}
