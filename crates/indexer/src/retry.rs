use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;


/// Every attempt of a retried operation failed.
#[derive(Error, Debug)]
#[error("operation failed after {attempts} attempts")]
pub struct RetryExhausted {
    pub attempts: u32,
    #[source]
    pub source: anyhow::Error,
}


/// Runs `op` up to `max_attempts` times, pausing between attempts.
///
/// The pause after the n-th failure (counting from zero) is
/// `initial_delay * 2^n`. A success returns immediately; the last failure
/// is reported without pausing, wrapped into [`RetryExhausted`] together
/// with the attempt count.
pub async fn retry_with_backoff<T, F, Fut>(
    max_attempts: u32,
    initial_delay: Duration,
    what: &str,
    mut op: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    debug_assert!(max_attempts >= 1);

    let mut attempt = 0;
    loop {
        let err = match op().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        attempt += 1;
        let delay = initial_delay * 2u32.saturating_pow(attempt - 1);

        warn!(
            "{}: attempt {}/{} failed: {:#}, retry delay is {:?}",
            what, attempt, max_attempts, err, delay
        );

        if attempt >= max_attempts {
            return Err(RetryExhausted {
                attempts: attempt,
                source: err,
            });
        }

        tokio::time::sleep(delay).await;
    }
}
