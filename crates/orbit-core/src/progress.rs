//! Check-in processing and missed-cadence decay.
//!
//! A check-in always advances the streak by one and awards points. Before
//! the award, a late check-in loses points in proportion to the streak that
//! was at stake and to how many days it overshot the cadence window:
//!
//! ```text
//! allowed = cadence gap + grace period
//! missed  = gap - allowed            (only when gap > allowed)
//! penalty = floor(streak * multiplier * missed)
//! ```
//!
//! Points never go below zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::{Habit, HistoryEntry, Mode};

/// Tunable scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyPolicy {
    /// Extra days added to every cadence window before decay kicks in
    #[serde(default = "default_grace_period_days")]
    pub grace_period_days: u32,
    /// Decay multiplier for `Mode::Flexible`
    #[serde(default = "default_flexible_multiplier")]
    pub flexible_multiplier: f64,
    /// Decay multiplier for `Mode::Strict`
    #[serde(default = "default_strict_multiplier")]
    pub strict_multiplier: f64,
    /// Points awarded by every successful check-in
    #[serde(default = "default_points_per_check_in")]
    pub points_per_check_in: u32,
}

fn default_grace_period_days() -> u32 {
    1
}
fn default_flexible_multiplier() -> f64 {
    0.5
}
fn default_strict_multiplier() -> f64 {
    1.5
}
fn default_points_per_check_in() -> u32 {
    10
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self {
            grace_period_days: default_grace_period_days(),
            flexible_multiplier: default_flexible_multiplier(),
            strict_multiplier: default_strict_multiplier(),
            points_per_check_in: default_points_per_check_in(),
        }
    }
}

impl PenaltyPolicy {
    pub fn multiplier(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Flexible => self.flexible_multiplier,
            Mode::Strict => self.strict_multiplier,
        }
    }

    /// Points lost for a streak that overshot its window by `missed_days`.
    pub fn penalty(&self, streak: u32, mode: Mode, missed_days: u32) -> u32 {
        let raw = (streak as f64 * self.multiplier(mode) * missed_days as f64).floor();
        if raw <= 0.0 {
            0
        } else if raw >= u32::MAX as f64 {
            u32::MAX
        } else {
            raw as u32
        }
    }

    /// Days past the window, or 0 if `gap_days` is within it.
    pub fn missed_days(&self, habit: &Habit, gap_days: i64) -> u32 {
        let allowed = habit.frequency.allowed_gap_days() + self.grace_period_days as i64;
        u32::try_from(gap_days - allowed).unwrap_or(0)
    }
}

/// Penalty under the default policy.
///
/// `penalty(10, Mode::Strict, 2) == 30`.
pub fn penalty(streak: u32, mode: Mode, missed_days: u32) -> u32 {
    PenaltyPolicy::default().penalty(streak, mode, missed_days)
}

/// What a check-in did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckInOutcome {
    /// A check-in already exists for this day; nothing changed
    AlreadyCheckedIn { date: NaiveDate },
    /// `today` precedes the last check-in; nothing changed
    ClockRegression {
        today: NaiveDate,
        last_completed: NaiveDate,
    },
    /// The check-in was recorded
    #[serde(rename_all = "camelCase")]
    Recorded {
        date: NaiveDate,
        /// Days since the previous check-in (`None` for the first one)
        gap_days: Option<i64>,
        missed_days: u32,
        penalty: u32,
        points_awarded: u32,
        streak: u32,
        points: u32,
    },
}

impl CheckInOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, CheckInOutcome::Recorded { .. })
    }
}

/// Apply one check-in for `today` to `habit`.
///
/// Callers must not pass a `today` earlier than `habit.last_completed`. That
/// precondition is not something the engine can repair, so such calls leave
/// the habit untouched and report [`CheckInOutcome::ClockRegression`].
pub fn check_in(habit: &mut Habit, today: NaiveDate, policy: &PenaltyPolicy) -> CheckInOutcome {
    let mut gap_days = None;
    let mut missed_days = 0;
    let mut penalty = 0;

    if let Some(last) = habit.last_completed {
        if last == today {
            tracing::debug!(habit = %habit.id, %today, "already checked in today");
            return CheckInOutcome::AlreadyCheckedIn { date: today };
        }
        if today < last {
            tracing::warn!(
                habit = %habit.id,
                %today,
                last_completed = %last,
                "check-in date precedes last completion, ignoring"
            );
            return CheckInOutcome::ClockRegression {
                today,
                last_completed: last,
            };
        }

        let gap = (today - last).num_days();
        gap_days = Some(gap);
        missed_days = policy.missed_days(habit, gap);
        if missed_days > 0 {
            penalty = policy.penalty(habit.streak, habit.mode, missed_days);
            habit.points = habit.points.saturating_sub(penalty);
        }
    }

    habit.streak = if gap_days.is_some() {
        habit.streak.saturating_add(1)
    } else {
        1
    };
    habit.points = habit.points.saturating_add(policy.points_per_check_in);
    habit.last_completed = Some(today);
    habit.history.push(HistoryEntry {
        date: today,
        streak: habit.streak,
    });

    tracing::debug!(
        habit = %habit.id,
        %today,
        ?gap_days,
        missed_days,
        penalty,
        streak = habit.streak,
        points = habit.points,
        "check-in recorded"
    );

    CheckInOutcome::Recorded {
        date: today,
        gap_days,
        missed_days,
        penalty,
        points_awarded: policy.points_per_check_in,
        streak: habit.streak,
        points: habit.points,
    }
}

/// Result of the standalone estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyEstimate {
    pub streak: u32,
    pub mode: Mode,
    pub missed_days: u32,
    pub multiplier: f64,
    pub penalty: u32,
}

/// Preview the decay for a hypothetical streak without touching any habit.
pub fn estimate(policy: &PenaltyPolicy, streak: u32, mode: Mode, missed_days: u32) -> PenaltyEstimate {
    PenaltyEstimate {
        streak,
        mode,
        missed_days,
        multiplier: policy.multiplier(mode),
        penalty: policy.penalty(streak, mode, missed_days),
    }
}

/// Derived, display-only view of where a habit stands today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    pub id: String,
    pub checked_in_today: bool,
    pub days_since_last: Option<i64>,
    /// Past the bare cadence window (grace period not counted)
    pub overdue: bool,
    pub missed_days_if_checked_in_today: u32,
    pub penalty_if_checked_in_today: u32,
}

pub fn status(habit: &Habit, today: NaiveDate, policy: &PenaltyPolicy) -> HabitStatus {
    let days_since_last = habit.last_completed.map(|last| (today - last).num_days());
    let (overdue, missed) = match days_since_last {
        Some(gap) if gap > 0 => (
            gap > habit.frequency.allowed_gap_days(),
            policy.missed_days(habit, gap),
        ),
        _ => (false, 0),
    };

    HabitStatus {
        id: habit.id.clone(),
        checked_in_today: habit.is_checked_in_on(today),
        days_since_last,
        overdue,
        missed_days_if_checked_in_today: missed,
        penalty_if_checked_in_today: policy.penalty(habit.streak, habit.mode, missed),
    }
}
