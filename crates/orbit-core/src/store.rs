//! In-memory habit collection.
//!
//! The store owns the habits of one user in insertion order. Every mutation
//! takes `&mut self`, so a check-in's same-day guard and its write cannot be
//! interleaved with another mutation of the same habit.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result, SnapshotError, ValidationError};
use crate::habit::{Habit, HabitPatch, NewHabit};
use crate::progress::{self, CheckInOutcome, HabitStatus, PenaltyPolicy};
use crate::rank::{Rank, RankTable};
use crate::series::{self, CategorySeries, ProgressSeries};

/// Before/after of the points repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairSummary {
    pub id: String,
    pub streak: u32,
    pub points_before: u32,
    pub points_after: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a restored collection, rejecting it whole if any record is
    /// invalid or two records share an id.
    pub fn from_habits(habits: Vec<Habit>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(habits.len());
        for (index, habit) in habits.iter().enumerate() {
            habit
                .validate()
                .map_err(|message| SnapshotError::InvariantViolation {
                    index,
                    id: habit.id.clone(),
                    message,
                })?;
            if !seen.insert(habit.id.as_str()) {
                return Err(SnapshotError::DuplicateId(habit.id.clone()));
            }
        }
        Ok(Self { habits })
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Habit> {
        self.habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))
    }

    /// Create a habit and append it.
    ///
    /// # Errors
    ///
    /// Returns a validation error, leaving the store unchanged, if the name
    /// or category is blank.
    pub fn add(&mut self, input: NewHabit) -> Result<&Habit> {
        let habit = Habit::new(input)?;
        tracing::info!(id = %habit.id, name = %habit.name, category = %habit.category, "habit added");
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Edit metadata of an existing habit.
    pub fn update(&mut self, id: &str, patch: HabitPatch) -> Result<&Habit> {
        let habit = self.get_mut(id)?;
        habit.apply_patch(patch)?;
        tracing::info!(id = %habit.id, "habit updated");
        Ok(habit)
    }

    /// Remove a habit. Irreversible.
    pub fn delete(&mut self, id: &str) -> Result<Habit> {
        let idx = self
            .habits
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| CoreError::HabitNotFound(id.to_string()))?;
        let removed = self.habits.remove(idx);
        tracing::info!(id = %removed.id, name = %removed.name, "habit deleted");
        Ok(removed)
    }

    /// Check in one habit for `today`.
    pub fn check_in(
        &mut self,
        id: &str,
        today: NaiveDate,
        policy: &PenaltyPolicy,
    ) -> Result<CheckInOutcome> {
        let habit = self.get_mut(id)?;
        Ok(progress::check_in(habit, today, policy))
    }

    /// Administrative repair: overwrite points with `streak * points_per_check_in`.
    ///
    /// Every penalty ever applied to the habit is discarded, so the caller
    /// has to pass `confirmed = true`.
    pub fn recompute_points(
        &mut self,
        id: &str,
        confirmed: bool,
        policy: &PenaltyPolicy,
    ) -> Result<RepairSummary> {
        if !confirmed {
            return Err(ValidationError::NotConfirmed("recompute points").into());
        }
        let habit = self.get_mut(id)?;
        let points_before = habit.points;
        habit.points = habit.streak.saturating_mul(policy.points_per_check_in);

        tracing::info!(
            id = %habit.id,
            points_before,
            points_after = habit.points,
            "points recomputed from streak"
        );

        Ok(RepairSummary {
            id: habit.id.clone(),
            streak: habit.streak,
            points_before,
            points_after: habit.points,
        })
    }

    pub fn total_points(&self) -> u64 {
        self.habits.iter().map(|h| h.points as u64).sum()
    }

    pub fn rank(&self, table: &RankTable) -> Rank {
        table.classify(self.total_points())
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        series::group_by_category(&self.habits).into_keys().collect()
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Habit> + 'a {
        self.habits.iter().filter(move |h| h.category == category)
    }

    pub fn series_for(&self, category: &str) -> ProgressSeries {
        series::build_series(self.in_category(category))
    }

    pub fn all_series(&self) -> Vec<CategorySeries> {
        series::build_all(&self.habits)
    }

    pub fn status(&self, id: &str, today: NaiveDate, policy: &PenaltyPolicy) -> Option<HabitStatus> {
        self.get(id).map(|h| progress::status(h, today, policy))
    }
}
