// Copyright (c) 2022 MASSA LABS <info@massa.net>
//! Millisecond spans used for every duration in the configuration files and
//! for the inactivity counters of the status reports.
#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A span of time in milliseconds. Deserializes from a plain integer.
#[derive(
    Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DormantTime(u64);

impl fmt::Display for DormantTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl DormantTime {
    /// Zero length span
    pub const ZERO: DormantTime = DormantTime(0);

    /// Span of `value` milliseconds
    pub const fn from_millis(value: u64) -> Self {
        DormantTime(value)
    }

    /// Span of `value` whole seconds
    /// ```
    /// # use dormant_time::DormantTime;
    /// assert_eq!(DormantTime::from_secs(3).to_millis(), 3000);
    /// ```
    pub const fn from_secs(value: u64) -> Self {
        DormantTime(value.saturating_mul(1000))
    }

    /// Milliseconds in the span
    pub const fn to_millis(&self) -> u64 {
        self.0
    }

    /// Whole seconds in the span, rounded down
    /// ```
    /// # use dormant_time::DormantTime;
    /// assert_eq!(DormantTime::from_millis(2999).to_secs(), 2);
    /// ```
    pub const fn to_secs(&self) -> u64 {
        self.0 / 1000
    }

    /// For the tokio timers
    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Is this a zero length span
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// ```
    /// # use dormant_time::DormantTime;
    /// let limit = DormantTime::from_secs(60);
    /// assert_eq!(limit.saturating_sub(DormantTime::from_secs(45)), DormantTime::from_secs(15));
    /// assert_eq!(DormantTime::from_secs(45).saturating_sub(limit), DormantTime::ZERO);
    /// ```
    #[must_use]
    pub fn saturating_sub(self, t: DormantTime) -> Self {
        DormantTime(self.0.saturating_sub(t.0))
    }

    /// Sum capped at the largest span
    #[must_use]
    pub fn saturating_add(self, t: DormantTime) -> Self {
        DormantTime(self.0.saturating_add(t.0))
    }

    /// Human readable rendering used in the logs
    /// ```
    /// # use dormant_time::DormantTime;
    /// let span = DormantTime::from_secs(2 * 3600 + 5 * 60 + 9);
    /// assert_eq!(span.format_duration(), "2 hours, 5 minutes, 9 seconds");
    /// ```
    pub fn format_duration(&self) -> String {
        let secs = self.to_secs();
        format!(
            "{} hours, {} minutes, {} seconds",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}
