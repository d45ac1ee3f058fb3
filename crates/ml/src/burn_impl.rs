use anyhow::Result;
use burn::tensor::TensorData;
use wayfarer_core::{FeatureVector, ScoringBackend, FEATURE_COUNT};

use crate::linear::{sigmoid, ScoringWeights};

/// Burn-backed variant of the linear scorer. Same weights format as the
/// plain implementation; the batch is staged through Burn tensor data.
#[derive(Debug, Clone)]
pub struct BurnScoringBackend {
    weights: ScoringWeights,
}

impl BurnScoringBackend {
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }
}

impl ScoringBackend for BurnScoringBackend {
    fn model_name(&self) -> &'static str {
        "burn-linear-scorer-v1"
    }

    fn predict(&self, features: &[FeatureVector]) -> Result<Vec<f32>> {
        let flat: Vec<f32> = features.iter().flatten().copied().collect();
        let batch = TensorData::new(flat, [features.len(), FEATURE_COUNT]);
        let rows = batch.as_slice::<f32>().map_err(|err| {
            anyhow::anyhow!("burn tensor data was not f32-backed: {err:?}")
        })?;

        let scores = rows
            .chunks_exact(FEATURE_COUNT)
            .map(|row| {
                let dot: f32 = row
                    .iter()
                    .zip(&self.weights.weights)
                    .map(|(feature, weight)| feature * weight)
                    .sum();
                sigmoid(dot + self.weights.bias)
            })
            .collect();

        Ok(scores)
    }
}
