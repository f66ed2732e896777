//! Per-category streak series for multi-line charts.
//!
//! Rows are the union of every check-in date in the category, ascending.
//! A habit with no check-in on a row's date has an explicit `None` in that
//! cell so chart lines skip the gap instead of dropping to zero.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::habit::Habit;

/// Minimum number of dates worth drawing as a trend line.
pub const MIN_CHART_POINTS: usize = 2;

/// A column of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesColumn {
    pub id: String,
    pub name: String,
}

/// One date and the streak each column reached on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub date: NaiveDate,
    /// Parallel to [`ProgressSeries::columns`]
    pub values: Vec<Option<u32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSeries {
    pub columns: Vec<SeriesColumn>,
    pub rows: Vec<SeriesRow>,
}

impl ProgressSeries {
    /// Whether there are enough dates to draw a line.
    pub fn is_chartable(&self) -> bool {
        self.rows.len() >= MIN_CHART_POINTS
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a single column in row order.
    pub fn column(&self, id: &str) -> Option<Vec<Option<u32>>> {
        let idx = self.columns.iter().position(|c| c.id == id)?;
        Some(self.rows.iter().map(|row| row.values[idx]).collect())
    }
}

/// Align the histories of `habits` on a shared, ascending date axis.
pub fn build_series<'a, I>(habits: I) -> ProgressSeries
where
    I: IntoIterator<Item = &'a Habit>,
{
    let habits: Vec<&Habit> = habits.into_iter().collect();

    let dates: BTreeSet<NaiveDate> = habits
        .iter()
        .flat_map(|h| h.history.iter().map(|entry| entry.date))
        .collect();

    let rows = dates
        .into_iter()
        .map(|date| SeriesRow {
            date,
            values: habits.iter().map(|h| h.streak_on(date)).collect(),
        })
        .collect();

    ProgressSeries {
        columns: habits
            .iter()
            .map(|h| SeriesColumn {
                id: h.id.clone(),
                name: h.name.clone(),
            })
            .collect(),
        rows,
    }
}

/// Group habits by category in order of first appearance.
pub fn group_by_category(habits: &[Habit]) -> IndexMap<&str, Vec<&Habit>> {
    let mut groups: IndexMap<&str, Vec<&Habit>> = IndexMap::new();
    for habit in habits {
        groups.entry(habit.category.as_str()).or_default().push(habit);
    }
    groups
}

/// Series for one category, keyed by the category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub category: String,
    pub chartable: bool,
    #[serde(flatten)]
    pub series: ProgressSeries,
}

/// Build a series for every category.
pub fn build_all(habits: &[Habit]) -> Vec<CategorySeries> {
    group_by_category(habits)
        .into_iter()
        .map(|(category, members)| {
            let series = build_series(members);
            CategorySeries {
                category: category.to_string(),
                chartable: series.is_chartable(),
                series,
            }
        })
        .collect()
}
