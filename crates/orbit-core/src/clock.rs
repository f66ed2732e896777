//! Calendar-day clock.
//!
//! The engine never reads wall-clock time on its own; callers hand it a
//! `Clock` (or a plain `NaiveDate`) so check-ins are deterministic under test.

use chrono::{Local, NaiveDate};

/// Source of "today" at day granularity.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Move the pinned date forward (or backward, for negative `days`).
    pub fn advance(&mut self, days: i64) {
        self.0 += chrono::Duration::days(days);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_by_days() {
        let mut clock = FixedClock(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        clock.advance(2);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
