use crate::models::{BudgetTier, Poi, MAX_SINGLE_POI_HOURS};

/// Drop candidates whose cost tier the budget does not admit, or whose
/// duration falls outside `(0, MAX_SINGLE_POI_HOURS]`. Callers fall back
/// to the unfiltered pool when this empties it.
pub fn filter_candidates<'a>(candidates: &[&'a Poi], budget: BudgetTier) -> Vec<&'a Poi> {
    candidates
        .iter()
        .copied()
        .filter(|poi| budget.admits(poi.cost_tier))
        .filter(|poi| poi.duration_hours > 0.0 && poi.duration_hours <= MAX_SINGLE_POI_HOURS)
        .collect()
}
