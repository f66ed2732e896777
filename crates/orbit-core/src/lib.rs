//! # Orbit Core Library
//!
//! This library provides the scoring engine behind the Orbit habit tracker.
//! Habits are checked in at most once per calendar day; each check-in grows
//! the habit's streak and awards points, while late check-ins first lose
//! points in proportion to the streak at stake.
//!
//! ## Architecture
//!
//! - **Engine**: pure functions over a single [`Habit`] and a caller-supplied
//!   date. The library never reads the wall clock on its own.
//! - **Store**: an owned, ordered [`HabitStore`] that applies create, edit,
//!   delete, check-in and repair operations
//! - **Derived views**: rank from total points, per-category progress series,
//!   and per-habit status. None of these are persisted.
//! - **Storage**: JSON habit documents and TOML configuration
//!
//! ## Key Components
//!
//! - [`check_in`]: the check-in state transition
//! - [`PenaltyPolicy`]: decay rules, including the grace period
//! - [`RankTable`]: injectable rank ladder
//! - [`build_series`]: chart-ready streak series

pub mod clock;
pub mod error;
pub mod habit;
pub mod progress;
pub mod rank;
pub mod series;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, SnapshotError, ValidationError};
pub use habit::{Frequency, Habit, HabitPatch, HistoryEntry, Mode, NewHabit};
pub use progress::{check_in, penalty, CheckInOutcome, HabitStatus, PenaltyEstimate, PenaltyPolicy};
pub use rank::{classify, Rank, RankTable, RankTier};
pub use series::{build_series, CategorySeries, ProgressSeries, SeriesColumn, SeriesRow};
pub use storage::{Config, HabitFile};
pub use store::{HabitStore, RepairSummary};
