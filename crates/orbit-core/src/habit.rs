//! Habit entity and its invariants.
//!
//! A habit is the unit the engine scores. Only its metadata (name, category,
//! cadence, mode) is edited directly; `streak`, `points`, `last_completed`
//! and `history` change exclusively through check-ins and the explicit
//! points repair in [`crate::store::HabitStore`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Category assigned to records written before categories existed.
pub const LEGACY_CATEGORY: &str = "General";

/// Expected check-in cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "2x_week")]
    TwiceWeekly,
    #[serde(rename = "3x_week")]
    ThriceWeekly,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 5] = [
        Frequency::Daily,
        Frequency::TwiceWeekly,
        Frequency::ThriceWeekly,
        Frequency::Weekly,
        Frequency::Monthly,
    ];

    /// Days that may pass between check-ins before one counts as late,
    /// not counting any grace period.
    pub fn allowed_gap_days(&self) -> i64 {
        match self {
            Frequency::Daily => 1,
            Frequency::ThriceWeekly => 3,
            Frequency::TwiceWeekly => 4,
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::TwiceWeekly => "2x_week",
            Frequency::ThriceWeekly => "3x_week",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "frequency".into(),
                message: format!(
                    "'{s}' is not one of daily, 2x_week, 3x_week, weekly, monthly"
                ),
            })
    }
}

/// Penalty severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Flexible,
    Strict,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Flexible => "flexible",
            Mode::Strict => "strict",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flexible" => Ok(Mode::Flexible),
            "strict" => Ok(Mode::Strict),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("'{other}' is not one of flexible, strict"),
            }),
        }
    }
}

/// One successful check-in: the date and the streak reached that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub streak: u32,
}

/// A tracked habit.
///
/// Serialized with camelCase keys; this is also the shape of the portable
/// export document, so nothing derived lives on this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "legacy_category")]
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

fn legacy_category() -> String {
    LEGACY_CATEGORY.to_string()
}

/// Early documents used millisecond timestamps as ids.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// Input for creating a habit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewHabit {
    pub name: String,
    pub category: String,
    pub frequency: Frequency,
    pub mode: Mode,
}

impl NewHabit {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

/// Metadata edits. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<Frequency>,
    pub mode: Option<Mode>,
}

impl HabitPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.frequency.is_none()
            && self.mode.is_none()
    }
}

fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl Habit {
    /// Create a fresh habit with no progress.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if the name or category is
    /// blank.
    pub fn new(input: NewHabit) -> Result<Self, ValidationError> {
        let name = required("name", &input.name)?;
        let category = required("category", &input.category)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            category,
            frequency: input.frequency,
            mode: input.mode,
            streak: 0,
            points: 0,
            last_completed: None,
            history: Vec::new(),
        })
    }

    /// Apply a metadata patch. Either every field is applied or none is.
    pub fn apply_patch(&mut self, patch: HabitPatch) -> Result<(), ValidationError> {
        let name = patch.name.as_deref().map(|n| required("name", n)).transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|c| required("category", c))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        Ok(())
    }

    pub fn is_checked_in_on(&self, day: NaiveDate) -> bool {
        self.last_completed == Some(day)
    }

    /// Streak recorded for `day`, if the habit was checked in that day.
    pub fn streak_on(&self, day: NaiveDate) -> Option<u32> {
        self.history
            .binary_search_by_key(&day, |entry| entry.date)
            .ok()
            .map(|idx| self.history[idx].streak)
    }

    /// Check the structural invariants of a habit.
    ///
    /// History-derived invariants only apply once history exists; legacy
    /// records may carry progress without any history.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("id is empty".into());
        }
        if self.name.trim().is_empty() {
            return Err("name is empty".into());
        }
        if self.category.trim().is_empty() {
            return Err("category is empty".into());
        }

        for pair in self.history.windows(2) {
            if pair[0].date >= pair[1].date {
                return Err(format!(
                    "history is not strictly ascending by date ({} then {})",
                    pair[0].date, pair[1].date
                ));
            }
        }

        if let Some(last) = self.history.last() {
            if self.last_completed != Some(last.date) {
                return Err(format!(
                    "lastCompleted {:?} does not match last history date {}",
                    self.last_completed, last.date
                ));
            }
            if self.streak != last.streak {
                return Err(format!(
                    "streak {} does not match last history streak {}",
                    self.streak, last.streak
                ));
            }
        } else if self.last_completed.is_none() && self.streak != 0 {
            return Err(format!("streak {} without lastCompleted", self.streak));
        }

        Ok(())
    }
}
