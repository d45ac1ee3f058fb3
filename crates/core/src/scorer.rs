use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::haversine_km;
use crate::models::{BudgetTier, Poi};

pub const FEATURE_COUNT: usize = 8;
pub type FeatureVector = [f32; FEATURE_COUNT];

pub const HEURISTIC_SCORER: &str = "heuristic";

const MODEL_WEIGHT: f64 = 0.9;
const MODEL_PROXIMITY_WEIGHT: f64 = 0.1;
const POPULARITY_WEIGHT: f64 = 0.7;
const HEURISTIC_PROXIMITY_WEIGHT: f64 = 0.3;

/// Prediction function over encoded candidate features. Implementations
/// score a batch in one call; a failure is recovered by the caller with
/// the heuristic path, never retried.
pub trait ScoringBackend: Send + Sync {
    fn model_name(&self) -> &'static str;
    fn predict(&self, features: &[FeatureVector]) -> anyhow::Result<Vec<f32>>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaledFeature {
    pub mean: f64,
    pub scale: f64,
}

impl ScaledFeature {
    pub fn apply(&self, value: f64) -> f32 {
        if self.scale == 0.0 {
            return 0.0;
        }
        ((value - self.mean) / self.scale) as f32
    }

    /// Inverse transform for storage-side scaled columns.
    pub fn denormalize(&self, scaled: f64) -> f64 {
        scaled * self.scale + self.mean
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub cost: ScaledFeature,
    pub hours: ScaledFeature,
    pub distance_km: ScaledFeature,
}

impl Default for FeatureScaler {
    fn default() -> Self {
        Self {
            cost: ScaledFeature {
                mean: 500.0,
                scale: 300.0,
            },
            hours: ScaledFeature {
                mean: 2.0,
                scale: 1.0,
            },
            distance_km: ScaledFeature {
                mean: 5.0,
                scale: 3.0,
            },
        }
    }
}

/// Label-encoder tables for the categorical features. Unknown values
/// encode to 0, matching the training-side label encoders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoders {
    pub city: HashMap<String, u32>,
    pub budget: HashMap<String, u32>,
    pub cost_tier: HashMap<String, u32>,
    pub category: HashMap<String, u32>,
}

impl CategoricalEncoders {
    pub fn city_id(&self, city: &str) -> u32 {
        self.city.get(city).copied().unwrap_or(0)
    }

    pub fn budget_id(&self, label: &str) -> u32 {
        self.budget.get(label).copied().unwrap_or(0)
    }

    pub fn cost_tier_id(&self, label: &str) -> u32 {
        self.cost_tier.get(label).copied().unwrap_or(0)
    }

    pub fn category_id(&self, category: &str) -> u32 {
        self.category.get(category).copied().unwrap_or(0)
    }
}

impl Default for CategoricalEncoders {
    fn default() -> Self {
        fn index_map(values: &[&str]) -> HashMap<String, u32> {
            values
                .iter()
                .enumerate()
                .map(|(idx, value)| (value.to_string(), idx as u32))
                .collect()
        }

        Self {
            city: index_map(&[
                "Delhi",
                "Mumbai",
                "Bangalore",
                "Chennai",
                "Kolkata",
                "Hyderabad",
                "Jaipur",
                "Agra",
                "Goa",
            ]),
            budget: index_map(&["LOW", "MODERATE", "HIGH"]),
            cost_tier: index_map(&["FREE", "BUDGET", "MODERATE", "LUXURY"]),
            category: index_map(&[
                "Historical",
                "Religious",
                "Museum",
                "Park",
                "Beach",
                "Monument",
                "Market",
            ]),
        }
    }
}

/// Per-call score state, keyed by POI id. Created fresh for every plan
/// call and discarded with the result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoiScore {
    pub model_score: f64,
    pub proximity_boost: f64,
    pub final_score: f64,
}

pub type ScoreTable = HashMap<String, PoiScore>;

/// Scoring strategy, decided once per plan call.
pub enum Scorer<'a> {
    Learned { backend: &'a dyn ScoringBackend },
    Heuristic,
}

pub struct ScorerContext<'a> {
    pub encoders: &'a CategoricalEncoders,
    pub scaler: &'a FeatureScaler,
    pub reference: Option<&'a Poi>,
    pub budget: BudgetTier,
}

pub struct Ranking<'a> {
    pub ordered: Vec<&'a Poi>,
    pub scores: ScoreTable,
    pub scorer: &'static str,
    /// Set when a configured backend failed and the heuristic took over.
    pub backend_error: Option<String>,
}

/// Score every candidate and return them sorted by descending final
/// score. The sort is stable, so ties keep catalog relative order.
pub fn score_and_rank<'a>(
    mut candidates: Vec<&'a Poi>,
    scorer: &Scorer<'_>,
    ctx: &ScorerContext<'_>,
) -> Ranking<'a> {
    let mut backend_error = None;

    let (scores, scorer_name) = match scorer {
        Scorer::Learned { backend } => match learned_scores(&candidates, *backend, ctx) {
            Ok(table) => (table, backend.model_name()),
            Err(err) => {
                backend_error = Some(format!("{err:#}"));
                (heuristic_scores(&candidates, ctx), HEURISTIC_SCORER)
            }
        },
        Scorer::Heuristic => (heuristic_scores(&candidates, ctx), HEURISTIC_SCORER),
    };

    candidates.sort_by(|a, b| {
        let lhs = scores.get(&a.id).map_or(0.0, |s| s.final_score);
        let rhs = scores.get(&b.id).map_or(0.0, |s| s.final_score);
        rhs.partial_cmp(&lhs).unwrap_or(Ordering::Equal)
    });

    Ranking {
        ordered: candidates,
        scores,
        scorer: scorer_name,
        backend_error,
    }
}

pub fn feature_vector(poi: &Poi, ctx: &ScorerContext<'_>) -> FeatureVector {
    let distance_km = distance_to_reference(poi, ctx.reference);

    [
        ctx.scaler.cost.apply(poi.estimated_cost),
        ctx.scaler.hours.apply(poi.duration_hours),
        ctx.scaler.distance_km.apply(distance_km),
        ctx.encoders.city_id(&poi.city) as f32,
        ctx.encoders.budget_id(ctx.budget.as_label()) as f32,
        ctx.encoders.cost_tier_id(poi.cost_tier.as_label()) as f32,
        ctx.encoders.category_id(&poi.category) as f32,
        poi.popularity as f32,
    ]
}

fn learned_scores(
    candidates: &[&Poi],
    backend: &dyn ScoringBackend,
    ctx: &ScorerContext<'_>,
) -> anyhow::Result<ScoreTable> {
    let features: Vec<FeatureVector> = candidates
        .iter()
        .map(|poi| feature_vector(poi, ctx))
        .collect();

    let raw = backend.predict(&features)?;
    anyhow::ensure!(
        raw.len() == candidates.len(),
        "backend returned {} scores for {} candidates",
        raw.len(),
        candidates.len()
    );

    let mut table = ScoreTable::with_capacity(candidates.len());
    for (poi, model_score) in candidates.iter().zip(raw) {
        let boost = proximity_boost(poi, ctx.reference);
        let model_score = f64::from(model_score);
        table.insert(
            poi.id.clone(),
            PoiScore {
                model_score,
                proximity_boost: boost,
                final_score: MODEL_WEIGHT * model_score + MODEL_PROXIMITY_WEIGHT * boost,
            },
        );
    }

    Ok(table)
}

fn heuristic_scores(candidates: &[&Poi], ctx: &ScorerContext<'_>) -> ScoreTable {
    let mut table = ScoreTable::with_capacity(candidates.len());
    for poi in candidates {
        let boost = proximity_boost(poi, ctx.reference);
        table.insert(
            poi.id.clone(),
            PoiScore {
                model_score: 0.0,
                proximity_boost: boost,
                final_score: POPULARITY_WEIGHT * poi.popularity
                    + HEURISTIC_PROXIMITY_WEIGHT * boost,
            },
        );
    }
    table
}

fn proximity_boost(poi: &Poi, reference: Option<&Poi>) -> f64 {
    1.0 / (1.0 + distance_to_reference(poi, reference))
}

fn distance_to_reference(poi: &Poi, reference: Option<&Poi>) -> f64 {
    reference.map_or(0.0, |r| {
        haversine_km(r.latitude, r.longitude, poi.latitude, poi.longitude)
    })
}
