//! Dashboard clock: the reference "now" that generators and exports use.

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum DashClock {
    /// Wall-clock local time, read on every call.
    #[default]
    System,
    /// A pinned instant. Used by tests and reproducible runs.
    Fixed(NaiveDateTime),
}

impl DashClock {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(at) => *at,
        }
    }

    /// `now()` truncated to the minute, the resolution of payout timestamps.
    pub fn now_minute(&self) -> NaiveDateTime {
        let now = self.now();
        now.with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
