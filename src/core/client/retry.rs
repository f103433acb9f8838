use std::time::Duration;

use crate::quote::QuoteOutcome;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ retry)`, where `retry` is 0 for the first retry.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// Delay to wait before the `retry`-th retry (0-based).
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential { base, factor, max } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if !secs.is_finite() || secs >= max.as_secs_f64() {
                    *max
                } else if secs <= 0.0 {
                    Duration::ZERO
                } else {
                    Duration::from_secs_f64(secs)
                }
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
///
/// Only [`QuoteOutcome::TransientFault`] is ever retried. A provider that says the symbol is
/// invalid or that its quota is exhausted ends the request on the first answer.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 2,
            backoff: Backoff::Exponential {
                base: Duration::from_secs(1),
                factor: 2.0,
                max: Duration::from_secs(30),
            },
        }
    }
}

impl RetryConfig {
    /// Disable retries: every fetch makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Total attempts allowed, including the first.
    pub const fn max_attempts(&self) -> u32 {
        if self.enabled {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// Whether `outcome`, observed on 0-based `attempt`, warrants another attempt.
    pub fn should_retry(&self, outcome: &QuoteOutcome, attempt: u32) -> bool {
        outcome.is_retryable() && attempt + 1 < self.max_attempts()
    }

    /// Wait before 0-based `attempt`. The first attempt never waits.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match attempt {
            0 => Duration::ZERO,
            n => self.backoff.delay(n - 1),
        }
    }
}
