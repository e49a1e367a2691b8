//! Bounded exponential-backoff retry around a [`SeriesSource`].
//!
//! The loop is a small state machine: each attempt outcome moves
//! `Attempting(n)` to `Success`, `PermanentFailure`, `Exhausted` or
//! `Attempting(n + 1)`.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::SeriesSource;
use crate::config::FetchConfig;
use crate::error::SourceError;
use crate::types::Series;

/// Retry limits.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(8_000),
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay(),
            max_delay: config.max_delay(),
        }
    }
}

impl RetryPolicy {
    /// Wait after failed attempt `attempt` (1-based): `base * 2^(attempt - 1)`, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Progress of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// About to make attempt `n` (1-based).
    Attempting(u32),
    Success,
    /// Failed with an error that retrying cannot fix.
    PermanentFailure,
    /// Every allowed attempt failed.
    Exhausted,
}

impl FetchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchState::Attempting(_))
    }

    /// Transition after an attempt finished with `outcome`.
    pub fn advance<T>(self, outcome: &Result<T, SourceError>, policy: &RetryPolicy) -> FetchState {
        let FetchState::Attempting(n) = self else {
            return self;
        };

        match outcome {
            Ok(_) => FetchState::Success,
            Err(e) if !e.is_retryable() => FetchState::PermanentFailure,
            Err(_) if n >= policy.max_attempts => FetchState::Exhausted,
            Err(_) => FetchState::Attempting(n + 1),
        }
    }
}

/// Fetch through `source`, retrying retryable failures per `policy`.
///
/// Returns the last error once the state machine reaches
/// `PermanentFailure` or `Exhausted`.
pub async fn fetch_with_retry(
    source: &dyn SeriesSource,
    instrument: &str,
    lookback_days: u32,
    policy: &RetryPolicy,
) -> Result<Series, SourceError> {
    let mut attempt = 1;

    loop {
        debug!(source = source.name(), instrument, attempt, "fetching series");
        let outcome = source.fetch_series(instrument, lookback_days).await;

        match FetchState::Attempting(attempt).advance(&outcome, policy) {
            FetchState::Attempting(next) => {
                let delay = policy.delay_for(attempt);
                if let Err(ref err) = outcome {
                    warn!(
                        source = source.name(),
                        instrument,
                        attempt,
                        ?delay,
                        %err,
                        "series fetch failed, retrying after backoff"
                    );
                }
                sleep(delay).await;
                attempt = next;
            }
            FetchState::Exhausted => {
                warn!(source = source.name(), instrument, attempt, "series fetch attempts exhausted");
                return outcome;
            }
            FetchState::PermanentFailure | FetchState::Success => return outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct ScriptedSource {
        script: Mutex<Vec<Result<(), SourceError>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(mut script: Vec<Result<(), SourceError>>) -> Self {
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl SeriesSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn fetch_series(&self, instrument: &str, _lookback_days: u32) -> Result<Series, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop().unwrap_or(Ok(()));
            next.map(|_| {
                Series::new(
                    instrument,
                    vec![NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()],
                    vec![100.0],
                    vec![1],
                )
                .unwrap()
            })
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1_000),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for(5), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(60), Duration::from_millis(1_000));
    }

    #[test]
    fn test_transitions() {
        let policy = fast_policy(2);
        let ok: Result<(), SourceError> = Ok(());
        let transient: Result<(), SourceError> = Err(SourceError::Network("reset".into()));
        let missing: Result<(), SourceError> = Err(SourceError::NotFound("9999".into()));

        assert_eq!(FetchState::Attempting(1).advance(&ok, &policy), FetchState::Success);
        assert_eq!(
            FetchState::Attempting(1).advance(&transient, &policy),
            FetchState::Attempting(2)
        );
        assert_eq!(
            FetchState::Attempting(2).advance(&transient, &policy),
            FetchState::Exhausted
        );
        assert_eq!(
            FetchState::Attempting(1).advance(&missing, &policy),
            FetchState::PermanentFailure
        );
        assert_eq!(FetchState::Success.advance(&transient, &policy), FetchState::Success);
        assert!(FetchState::Exhausted.is_terminal());
        assert!(!FetchState::Attempting(1).is_terminal());
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let source = ScriptedSource::new(vec![
            Err(SourceError::Network("reset".into())),
            Err(SourceError::Http { status: 503, message: "busy".into() }),
            Ok(()),
        ]);
        let series = fetch_with_retry(&source, "2330", 30, &fast_policy(3)).await.unwrap();
        assert_eq!(series.symbol(), "2330");
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let source = ScriptedSource::new(vec![Err(SourceError::NotFound("9999".into()))]);
        let err = fetch_with_retry(&source, "9999", 30, &fast_policy(5)).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let source = ScriptedSource::new(vec![
            Err(SourceError::Network("a".into())),
            Err(SourceError::Network("b".into())),
            Err(SourceError::Network("c".into())),
            Ok(()),
        ]);
        let err = fetch_with_retry(&source, "2330", 30, &fast_policy(3)).await.unwrap_err();
        assert_eq!(err, SourceError::Network("c".into()));
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }
}
