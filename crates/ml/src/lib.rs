mod linear;

#[cfg(feature = "burn-ml")]
mod burn_impl;

use std::env;
use std::path::Path;
use std::sync::Arc;

use wayfarer_core::ScoringBackend;

pub use linear::{LinearScoringBackend, ScoringWeights};

#[cfg(feature = "burn-ml")]
pub use burn_impl::BurnScoringBackend;

const WEIGHTS_ENV: &str = "WAYFARER_MODEL_WEIGHTS";
const DEFAULT_WEIGHTS_PATH: &str = "assets/model_weights.json";

/// Scoring backend selection, made once at startup. `backend` stays
/// `None` when no weights are available; the planner then scores
/// heuristically, which is a supported mode rather than an error.
#[derive(Clone)]
pub struct MlStack {
    pub backend: Option<Arc<dyn ScoringBackend>>,
    pub burn_enabled: bool,
}

impl MlStack {
    pub fn load_default() -> Self {
        let weights_path =
            env::var(WEIGHTS_ENV).unwrap_or_else(|_| DEFAULT_WEIGHTS_PATH.to_string());

        #[cfg(feature = "burn-ml")]
        {
            let weights = if Path::new(&weights_path).exists() {
                load_weights(&weights_path).unwrap_or_default()
            } else {
                ScoringWeights::default()
            };
            let backend = burn_impl::BurnScoringBackend::new(weights)
                .ok()
                .map(|backend| Arc::new(backend) as Arc<dyn ScoringBackend>);
            return Self {
                backend,
                burn_enabled: true,
            };
        }

        #[cfg(not(feature = "burn-ml"))]
        {
            let backend = if Path::new(&weights_path).exists() {
                LinearScoringBackend::from_json(&weights_path)
                    .ok()
                    .map(|backend| Arc::new(backend) as Arc<dyn ScoringBackend>)
            } else {
                None
            };
            Self {
                backend,
                burn_enabled: false,
            }
        }
    }

    /// Stack without a backend, for callers that want heuristic-only
    /// scoring regardless of the environment.
    pub fn heuristic_only() -> Self {
        Self {
            backend: None,
            burn_enabled: false,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.backend
            .as_ref()
            .map_or("none", |backend| backend.model_name())
    }
}

#[cfg(feature = "burn-ml")]
fn load_weights(path: &str) -> Option<ScoringWeights> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}
