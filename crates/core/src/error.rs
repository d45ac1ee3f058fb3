use thiserror::Error;

/// Conditions that stop a plan before packing. The planner converts
/// these into a normal result with the message as summary; nothing here
/// crosses the library boundary as an `Err`.
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    #[error("Please enter a valid location.")]
    EmptyLocation,

    #[error("Location not recognized — try a city or region name.")]
    UnknownLocation { location: String },
}
