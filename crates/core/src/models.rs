use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_POIS_PER_DAY: usize = 2;
pub const MAX_HOURS_PER_DAY: f64 = 6.0;
pub const MAX_SINGLE_POI_HOURS: f64 = 6.0;

pub const DAILY_BUDGET_LOW: f64 = 1000.0;
pub const DAILY_BUDGET_MODERATE: f64 = 2500.0;
pub const DAILY_BUDGET_HIGH: f64 = 5000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    Free,
    Budget,
    Moderate,
    Luxury,
}

impl CostTier {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "budget" | "low" => Some(Self::Budget),
            "moderate" | "medium" => Some(Self::Moderate),
            "luxury" | "high" => Some(Self::Luxury),
            _ => None,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Budget => "BUDGET",
            Self::Moderate => "MODERATE",
            Self::Luxury => "LUXURY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Moderate,
    High,
}

impl BudgetTier {
    /// Case-insensitive substring match; anything unrecognized lands on
    /// Moderate.
    pub fn resolve(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.contains("low") {
            Self::Low
        } else if lower.contains("moderate") {
            Self::Moderate
        } else if lower.contains("high") {
            Self::High
        } else {
            Self::Moderate
        }
    }

    pub fn daily_cap(self) -> f64 {
        match self {
            Self::Low => DAILY_BUDGET_LOW,
            Self::Moderate => DAILY_BUDGET_MODERATE,
            Self::High => DAILY_BUDGET_HIGH,
        }
    }

    /// Cost tiers a budget tier admits. Low and Moderate intentionally
    /// resolve to the same set.
    pub fn admits(self, tier: CostTier) -> bool {
        match self {
            Self::Low | Self::Moderate => matches!(tier, CostTier::Free | CostTier::Budget),
            Self::High => true,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::High => "HIGH",
        }
    }
}

/// Optional presentation attributes. Kept as a typed struct so callers
/// never poke at dynamic fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiExtras {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Immutable catalog record. Per-call scoring state lives in a
/// [`crate::scorer::ScoreTable`], never on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    pub category: String,
    pub city: String,
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    pub estimated_cost: f64,
    pub duration_hours: f64,
    pub popularity: f64,
    pub cost_tier: CostTier,
    #[serde(default)]
    pub extras: PoiExtras,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanRequest {
    pub location: String,
    pub days: i32,
    pub budget: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryMetadata {
    pub location: String,
    pub days: u32,
    pub budget: String,
    pub generated_at: DateTime<Utc>,
    pub source_cities: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub cost: f64,
    pub hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryResult {
    pub metadata: ItineraryMetadata,
    pub day_plans: BTreeMap<u32, Vec<Poi>>,
    pub totals: Totals,
    pub summary: String,
}

impl ItineraryResult {
    pub fn total_pois(&self) -> usize {
        self.day_plans.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_pois() == 0
    }
}
