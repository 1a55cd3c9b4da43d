//! Suspension between attempts.

use std::time::Duration;

use tokio::time::Instant;

/// Suspend the calling task for `duration`.
///
/// ```rust
/// use retry_step::retry::wait;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// wait(Duration::from_millis(1)).await;
/// # });
/// ```
pub async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// [`wait`] for `duration`, then log how long the wait actually took next to
/// the configured duration.
///
/// Both values are emitted at debug level in milliseconds. Under scheduler
/// load the elapsed time can exceed the configured one; the difference is
/// only reported.
pub async fn retry_wait(duration: Duration) {
    let start = Instant::now();
    wait(duration).await;
    let elapsed = start.elapsed();

    tracing::debug!("Waited {}ms", elapsed.as_millis());
    tracing::debug!("Configured wait: {}ms", duration.as_millis());
}
