pub mod assemble;
pub mod error;
pub mod filter;
pub mod geo;
pub mod models;
pub mod packer;
pub mod planner;
pub mod scope;
pub mod scorer;

pub use error::PlanError;
pub use geo::haversine_km;
pub use models::*;
pub use planner::{plan_itinerary, PlanContext, PlanOutcome};
pub use scorer::{
    CategoricalEncoders, FeatureScaler, FeatureVector, ScoreTable, Scorer, ScoringBackend,
    FEATURE_COUNT,
};
