use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use wayfarer_core::{FeatureVector, ScoringBackend, FEATURE_COUNT};

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringWeights {
    pub weights: Vec<f32>,
    pub bias: f32,
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.weights.len() == FEATURE_COUNT,
            "expected {} weights, got {}",
            FEATURE_COUNT,
            self.weights.len()
        );
        Ok(())
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        // Hand-tuned stand-in: cheap, close, and popular score high.
        Self {
            weights: vec![-0.35, -0.10, -0.25, 0.00, 0.05, -0.10, 0.02, 0.85],
            bias: 0.10,
        }
    }
}

/// Logistic regression over the encoded candidate features.
#[derive(Debug, Clone)]
pub struct LinearScoringBackend {
    weights: ScoringWeights,
}

impl LinearScoringBackend {
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading model weights at {}", path.display()))?;
        let weights: ScoringWeights =
            serde_json::from_str(&raw).context("invalid model weights json")?;
        Self::new(weights)
    }

    fn score_one(&self, features: &FeatureVector) -> f32 {
        let dot: f32 = features
            .iter()
            .zip(&self.weights.weights)
            .map(|(feature, weight)| feature * weight)
            .sum();
        sigmoid(dot + self.weights.bias)
    }
}

impl ScoringBackend for LinearScoringBackend {
    fn model_name(&self) -> &'static str {
        "linear-scorer-v1"
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f32>> {
        Ok(features.iter().map(|row| self.score_one(row)).collect())
    }
}

pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_weight_count() {
        let weights = ScoringWeights {
            weights: vec![1.0, 2.0],
            bias: 0.0,
        };
        assert!(LinearScoringBackend::new(weights).is_err());
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let backend = LinearScoringBackend::new(ScoringWeights::default()).expect("backend");
        let rows = vec![[0.0; 8], [5.0; 8], [-5.0; 8]];
        let scores = backend.predict(&rows).expect("predict");
        assert_eq!(scores.len(), 3);
        for score in scores {
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn popularity_raises_the_score() {
        let backend = LinearScoringBackend::new(ScoringWeights::default()).expect("backend");
        let mut popular = [0.0_f32; 8];
        popular[7] = 1.0;
        let dull = [0.0_f32; 8];
        let scores = backend.predict(&[popular, dull]).expect("predict");
        assert!(scores[0] > scores[1]);
    }
}
