use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation with backoff.
///
/// # Arguments
/// * `operation` - The async operation to retry
/// * `base_delays` - Waits before each backoff retry
/// * `final_retries` - Number of additional retries at `final_delay`
/// * `final_delay` - Wait before each final retry
///
/// The operation always runs at least once, so empty delays and zero final
/// retries mean a single attempt.
///
/// # Returns
/// The first successful result, or the last error once attempts run out
pub async fn retry_with_backoff<F, Fut, T, E>(
    mut operation: F,
    base_delays: &[Duration],
    final_retries: usize,
    final_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = 1 + base_delays.len() + final_retries;
    let delays = base_delays
        .iter()
        .copied()
        .chain(std::iter::repeat_n(final_delay, final_retries));

    let mut attempt = 1;
    let mut result = operation().await;

    for delay in delays {
        let Err(e) = &result else {
            break;
        };
        warn!(
            "Request failed (attempt {attempt}/{total}): {e}. Retrying after {}ms...",
            delay.as_millis()
        );
        sleep(delay).await;
        attempt += 1;
        result = operation().await;
    }

    result
}
