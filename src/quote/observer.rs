//! Per-attempt notifications. Observers see what happened; they cannot change it.

use std::time::Duration;

use super::OutcomeKind;
use crate::core::Symbol;

/// What one provider attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// 0-based attempt number.
    pub attempt: u32,
    pub symbol: Symbol,
    pub outcome: OutcomeKind,
    /// Backoff waited before this attempt.
    pub delay: Duration,
    /// Fault description, for transient and fatal outcomes.
    pub cause: Option<String>,
}

/// Receives an [`AttemptRecord`] after each provider attempt.
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, record: &AttemptRecord);
}

/// Emits one structured `tracing` event per attempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AttemptObserver for TracingObserver {
    #[cfg(feature = "tracing")]
    fn on_attempt(&self, record: &AttemptRecord) {
        let delay_ms = u64::try_from(record.delay.as_millis()).unwrap_or(u64::MAX);
        match record.outcome {
            OutcomeKind::Success => tracing::info!(
                attempt = record.attempt,
                symbol = %record.symbol,
                outcome = record.outcome.as_str(),
                delay_ms,
                "provider attempt"
            ),
            _ => tracing::warn!(
                attempt = record.attempt,
                symbol = %record.symbol,
                outcome = record.outcome.as_str(),
                delay_ms,
                cause = record.cause.as_deref().unwrap_or(""),
                "provider attempt"
            ),
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn on_attempt(&self, _record: &AttemptRecord) {}
}
