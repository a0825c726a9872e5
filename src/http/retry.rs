//! Retry policy
//!
//! An immutable description of which failures are retried and how long to
//! wait between attempts. Built once per adapter and handed to the client.

use crate::types::BackoffType;
use std::collections::BTreeSet;
use std::time::Duration;

/// Statuses retried by every adapter
pub const SERVER_ERROR_STATUSES: [u16; 3] = [500, 502, 504];

/// Statuses retried by adapters that also back off on throttling
pub const THROTTLING_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry configuration for a single HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
    backoff_type: BackoffType,
    statuses: BTreeSet<u16>,
    retry_connect: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl RetryPolicy {
    /// 3 retries, 0.3s exponential backoff, retrying 500/502/504
    pub fn standard() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(300),
            max_backoff: Duration::from_secs(120),
            backoff_type: BackoffType::Exponential,
            statuses: SERVER_ERROR_STATUSES.into_iter().collect(),
            retry_connect: true,
        }
    }

    /// Like `standard`, but also retries 429 and 503
    pub fn with_throttling() -> Self {
        Self {
            statuses: THROTTLING_STATUSES.into_iter().collect(),
            ..Self::standard()
        }
    }

    /// Never retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            statuses: BTreeSet::new(),
            retry_connect: false,
            ..Self::standard()
        }
    }

    /// Set max retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.backoff_type = backoff_type;
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Change how the delay grows, keeping its bounds
    #[must_use]
    pub fn backoff_type(mut self, backoff_type: BackoffType) -> Self {
        self.backoff_type = backoff_type;
        self
    }

    /// Replace the retryable status set
    #[must_use]
    pub fn statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// Enable or disable retrying connection failures and timeouts
    #[must_use]
    pub fn retry_connect(mut self, enabled: bool) -> Self {
        self.retry_connect = enabled;
        self
    }

    /// Maximum number of retries after the first attempt
    pub fn get_max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Retryable statuses in ascending order
    pub fn retry_statuses(&self) -> impl Iterator<Item = u16> + '_ {
        self.statuses.iter().copied()
    }

    /// Check whether a status should be retried
    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.statuses.contains(&status)
    }

    /// Check whether transport failures should be retried
    pub fn retries_connect(&self) -> bool {
        self.retry_connect
    }

    /// Calculate backoff delay before retry number `attempt + 1`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff_type {
            BackoffType::Constant => self.initial_backoff,
            BackoffType::Linear => self.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.max_backoff)
    }

    /// Clamp a server-provided `Retry-After` delay to the backoff ceiling
    pub fn clamp(&self, delay: Duration) -> Duration {
        std::cmp::min(delay, self.max_backoff)
    }
}
