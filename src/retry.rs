use std::{fmt, future::Future, time::Duration};

use log::Level;

use crate::{error::Error, result::Result};

/// Receives the log lines produced by the client.
///
/// The default [`LogFacade`] forwards to the [`log`] crate. Swap it out through
/// [`ClientBuilder::log_sink`](crate::ClientBuilder::log_sink) to capture the
/// lines elsewhere.
pub trait LogSink: Send + Sync {
    /// Records one line for the endpoint `method`.
    fn log(&self, level: Level, method: &str, message: &str);
}

/// [`LogSink`] backed by the `log` facade, under the `instapro` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl LogSink for LogFacade {
    fn log(&self, level: Level, method: &str, message: &str) {
        log::log!(target: "instapro", level, "{}: {}", method, message);
    }
}

/// Bounded retry around a single remote call.
///
/// Every failed attempt is reported to the [`LogSink`] at error level. If the
/// attempt was not the last one and the classifier accepts the error, the policy
/// sleeps for `delay` and runs the call again. Otherwise the error goes back to
/// the caller as-is.
#[derive(Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    retry_on: fn(&Error) -> bool,
}

impl RetryPolicy {
    /// Attempts per call unless configured otherwise.
    pub const DEFAULT_ATTEMPTS: u32 = 3;

    /// Pause between two attempts unless configured otherwise.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);

    /// A policy that retries every error `max_attempts - 1` times.
    ///
    /// A value of `0` is treated as `1`.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: Self::DEFAULT_DELAY,
            retry_on: retry_any,
        }
    }

    /// A policy that only retries transport failures.
    ///
    /// See [`Error::is_transient`].
    pub fn transient_only() -> Self {
        Self::default().with_classifier(Error::is_transient)
    }

    /// Replaces the pause between attempts.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Replaces the function deciding whether an error is worth another attempt.
    #[must_use]
    pub fn with_classifier(mut self, retry_on: fn(&Error) -> bool) -> Self {
        self.retry_on = retry_on;
        self
    }

    /// Maximum number of attempts per call.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `op` until it succeeds, the error is not retryable, or the attempts
    /// run out.
    ///
    /// # Errors
    ///
    /// Returns the error of the last attempt, unchanged.
    pub async fn run<T, F, Fut>(&self, sink: &dyn LogSink, method: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    sink.log(
                        Level::Error,
                        method,
                        &format!("attempt {}/{} failed: {}", attempt, self.max_attempts, err),
                    );
                    if attempt >= self.max_attempts || !(self.retry_on)(&err) {
                        return Err(err);
                    }
                }
            }
            attempt += 1;
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn retry_any(_: &Error) -> bool {
    true
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}
