//! Values produced by aggregate queries and the rolling windows they use.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// Number of records sharing one grouping key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// Number of records created within one calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl MonthBucket {
    /// `YYYY-MM` label with a zero padded month.
    pub fn period_label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Rolling window used by the dashboard overview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    Last24Hours,
    Last7Days,
    Last30Days,
    Last90Days,
    /// Requested label was not recognized; no time bound applies.
    AllTime,
}

impl Period {
    pub const DEFAULT_LABEL: &'static str = "7d";

    /// Maps a request label to a window. Absent means the last 7 days,
    /// anything unrecognized means all time.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.unwrap_or(Self::DEFAULT_LABEL) {
            "24h" => Period::Last24Hours,
            "7d" => Period::Last7Days,
            "30d" => Period::Last30Days,
            "90d" => Period::Last90Days,
            _ => Period::AllTime,
        }
    }

    pub fn window(self) -> Option<Duration> {
        match self {
            Period::Last24Hours => Some(Duration::hours(24)),
            Period::Last7Days => Some(Duration::days(7)),
            Period::Last30Days => Some(Duration::days(30)),
            Period::Last90Days => Some(Duration::days(90)),
            Period::AllTime => None,
        }
    }

    /// Earliest creation time counted for this window.
    pub fn cutoff(self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        self.window().map(|window| now - window)
    }
}
