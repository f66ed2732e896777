pub mod chart;
pub mod config;
pub mod data;
pub mod habit;
pub mod penalty;
pub mod rank;

use chrono::NaiveDate;
use orbit_core::{Clock, FixedClock, HabitFile, HabitStore, SystemClock};

/// `--today` if given, otherwise the local calendar date, fixed for the
/// whole invocation.
pub fn clock(today: Option<NaiveDate>) -> FixedClock {
    let clock = FixedClock(today.unwrap_or_else(|| SystemClock.today()));
    tracing::debug!(today = %clock.today(), overridden = today.is_some(), "clock resolved");
    clock
}

/// Open the persisted collection.
pub fn open_store() -> Result<(HabitFile, HabitStore), Box<dyn std::error::Error>> {
    let file = HabitFile::open()?;
    let store = file.load()?;
    Ok((file, store))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
