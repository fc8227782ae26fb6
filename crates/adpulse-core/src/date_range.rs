//! Reporting date ranges.
//!
//! A dashboard view covers one inclusive [`DateRange`] and compares it against
//! the immediately preceding range of the same length. Named presets resolve
//! relative to an explicit `today` so callers own the clock.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateRangeError {
    #[error("invalid date range: since {since} is after until {until}")]
    SinceAfterUntil { since: NaiveDate, until: NaiveDate },
}

/// An inclusive date range, `since <= until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `since > until`.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::SinceAfterUntil`] when the bounds are reversed.
    pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self, DateRangeError> {
        if since > until {
            return Err(DateRangeError::SinceAfterUntil { since, until });
        }
        Ok(Self { since, until })
    }

    /// Number of days covered, inclusive of both endpoints.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.until - self.since).num_days() + 1
    }

    /// The immediately preceding range of the same length:
    /// `until = since - 1 day`, `since = until - (original span)`.
    #[must_use]
    pub fn previous(&self) -> Self {
        let span = self.until - self.since;
        let until = self.since - Duration::days(1);
        Self {
            since: until - span,
            until,
        }
    }
}

/// Named reporting presets, matching the dashboard's range picker.
///
/// Each preset ends yesterday: the vendor's figures for the current day are
/// still moving, so `until = today - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Last7Days,
    Last14Days,
    Last30Days,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Last7Days, Preset::Last14Days, Preset::Last30Days];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Preset::Last7Days => "last_7d",
            Preset::Last14Days => "last_14d",
            Preset::Last30Days => "last_30d",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Preset::Last7Days => "Last 7 Days",
            Preset::Last14Days => "Last 14 Days",
            Preset::Last30Days => "Last 30 Days",
        }
    }

    #[must_use]
    pub fn days(self) -> i64 {
        match self {
            Preset::Last7Days => 7,
            Preset::Last14Days => 14,
            Preset::Last30Days => 30,
        }
    }

    /// Look a preset up by its wire id (`last_7d`, `last_14d`, `last_30d`).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Resolve the preset against the given `today`.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        DateRange {
            since: today - Duration::days(self.days()),
            until: today - Duration::days(1),
        }
    }
}
