use std::fmt::{Debug, Display};
use std::time::Duration;

/// Attempt cap and fixed inter-attempt delay for [`run_fixed`].
///
/// The delay is deliberately constant, not exponential; the acquisition path
/// stalls initialization for at most `max_attempts * delay` and simplicity
/// wins at that scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Every attempt failed; `last_error` is the terminal failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{attempts} attempts exhausted: {last_error}")]
pub struct RetryExhausted<E: Display + Debug> {
    pub attempts: u32,
    pub last_error: E,
}

/// Run `op` up to `policy.max_attempts` times, sleeping `policy.delay`
/// between attempts through `sleep`. Attempts are 1-based in the callback.
pub fn run_fixed_with<T, E, F, S>(
    policy: RetryPolicy,
    mut op: F,
    mut sleep: S,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Result<T, E>,
    S: FnMut(Duration),
    E: Display + Debug,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(last_error) if attempt == max_attempts => {
                return Err(RetryExhausted {
                    attempts: attempt,
                    last_error,
                })
            }
            Err(err) => {
                tracing::warn!(
                    "attempt {attempt}/{max_attempts} failed: {err}; retrying in {:?}",
                    policy.delay
                );
                sleep(policy.delay);
                attempt += 1;
            }
        }
    }
}

/// [`run_fixed_with`] using a blocking thread sleep.
pub fn run_fixed<T, E, F>(policy: RetryPolicy, op: F) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Result<T, E>,
    E: Display + Debug,
{
    run_fixed_with(policy, op, std::thread::sleep)
}
