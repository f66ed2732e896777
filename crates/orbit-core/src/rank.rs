//! Rank tiers derived from total points.
//!
//! Tiers come from an ordered table rather than a hard-coded ladder so the
//! thresholds can be changed from configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One band of the ladder; it applies from `min_points` upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTier {
    pub name: String,
    pub color: String,
    pub min_points: u64,
}

impl RankTier {
    pub fn new(name: impl Into<String>, color: impl Into<String>, min_points: u64) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            min_points,
        }
    }
}

/// Validated ladder of tiers, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RankTable {
    tiers: Vec<RankTier>,
}

impl RankTable {
    /// Build a table from tiers ordered lowest first.
    ///
    /// # Errors
    ///
    /// Rejects an empty table, a first tier that does not start at 0, blank
    /// tier names, and thresholds that are not strictly ascending.
    pub fn new(tiers: Vec<RankTier>) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: "rank.tiers".into(),
            message,
        };

        let first = tiers
            .first()
            .ok_or_else(|| invalid("at least one tier is required".into()))?;
        if first.min_points != 0 {
            return Err(invalid(format!(
                "lowest tier '{}' must start at 0, not {}",
                first.name, first.min_points
            )));
        }
        if let Some(blank) = tiers.iter().position(|t| t.name.trim().is_empty()) {
            return Err(invalid(format!("tier {blank} has an empty name")));
        }
        for pair in tiers.windows(2) {
            if pair[1].min_points <= pair[0].min_points {
                return Err(invalid(format!(
                    "thresholds must be strictly ascending: '{}' ({}) follows '{}' ({})",
                    pair[1].name, pair[1].min_points, pair[0].name, pair[0].min_points
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// BRONZE through LEGEND in 500-point steps.
    pub fn standard() -> Self {
        Self {
            tiers: standard_tiers(),
        }
    }

    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// Classify a point total. The lower bound of each tier is inclusive.
    pub fn classify(&self, total_points: u64) -> Rank {
        let idx = self
            .tiers
            .iter()
            .rposition(|tier| tier.min_points <= total_points)
            .unwrap_or(0);
        let tier = &self.tiers[idx];
        let next = self.tiers.get(idx + 1);

        Rank {
            name: tier.name.clone(),
            color: tier.color.clone(),
            threshold: tier.min_points,
            total_points,
            next_name: next.map(|t| t.name.clone()),
            next_threshold: next.map(|t| t.min_points),
            points_to_next: next.map(|t| t.min_points - total_points),
        }
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for RankTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tiers = Vec::<RankTier>::deserialize(deserializer)?;
        RankTable::new(tiers).map_err(serde::de::Error::custom)
    }
}

pub fn standard_tiers() -> Vec<RankTier> {
    vec![
        RankTier::new("BRONZE", "#cd7f32", 0),
        RankTier::new("SILVER", "#94a3b8", 500),
        RankTier::new("GOLD", "#fbbf24", 1000),
        RankTier::new("CRYSTAL", "#22d3ee", 1500),
        RankTier::new("MASTER", "#a855f7", 2000),
        RankTier::new("CHAMPION", "#f43f5e", 2500),
        RankTier::new("LEGEND", "#6366f1", 3000),
    ]
}

/// Classification of a point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub name: String,
    pub color: String,
    pub threshold: u64,
    pub total_points: u64,
    pub next_name: Option<String>,
    pub next_threshold: Option<u64>,
    /// `None` at the top tier
    pub points_to_next: Option<u64>,
}

impl Rank {
    pub fn is_top_tier(&self) -> bool {
        self.next_threshold.is_none()
    }
}

/// Classify against the standard ladder.
pub fn classify(total_points: u64) -> Rank {
    RankTable::standard().classify(total_points)
}
