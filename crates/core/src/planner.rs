use crate::assemble::{assemble, empty_result};
use crate::error::PlanError;
use crate::filter::filter_candidates;
use crate::models::{BudgetTier, ItineraryResult, TripPlanRequest};
use crate::packer::pack_daily;
use crate::scope::{find_reference_poi, normalize_location, select_scope};
use crate::scorer::{
    score_and_rank, CategoricalEncoders, FeatureScaler, Scorer, ScorerContext, ScoringBackend,
};

/// Shared, read-only inputs for a plan call. Built once at startup and
/// reused across calls; everything mutable is created inside
/// [`plan_itinerary`].
pub struct PlanContext<'a> {
    pub pois: &'a [crate::models::Poi],
    pub encoders: &'a CategoricalEncoders,
    pub scaler: &'a FeatureScaler,
    pub backend: Option<&'a dyn ScoringBackend>,
}

pub struct PlanOutcome {
    pub result: ItineraryResult,
    /// Name of the scorer that produced the ranking.
    pub scorer: &'static str,
    /// Present when a configured backend failed mid-call.
    pub backend_error: Option<String>,
    pub candidates_considered: usize,
    pub dropped_pois: usize,
}

/// Plan a multi-day itinerary. Always returns a result object; rejected
/// or unmatched requests come back with empty day plans and an
/// explanatory summary rather than an error.
pub fn plan_itinerary(ctx: &PlanContext<'_>, request: &TripPlanRequest) -> PlanOutcome {
    let days = if request.days <= 0 { 1 } else { request.days as u32 };
    let budget_label = if request.budget.trim().is_empty() {
        BudgetTier::Moderate.as_label().to_string()
    } else {
        request.budget.clone()
    };
    let budget = BudgetTier::resolve(&budget_label);

    match try_plan(ctx, request, days, &budget_label, budget) {
        Ok(outcome) => outcome,
        Err(err) => PlanOutcome {
            result: empty_result(request.location.trim(), days, &budget_label, err.to_string()),
            scorer: "none",
            backend_error: None,
            candidates_considered: 0,
            dropped_pois: 0,
        },
    }
}

fn try_plan(
    ctx: &PlanContext<'_>,
    request: &TripPlanRequest,
    days: u32,
    budget_label: &str,
    budget: BudgetTier,
) -> Result<PlanOutcome, PlanError> {
    let location = request.location.trim();
    if location.is_empty() {
        return Err(PlanError::EmptyLocation);
    }

    let candidates = select_scope(ctx.pois, location, days);
    if candidates.is_empty() {
        return Err(PlanError::UnknownLocation {
            location: location.to_string(),
        });
    }
    let candidates_considered = candidates.len();

    // An over-restrictive budget falls back to the unfiltered scope
    // rather than producing an empty itinerary.
    let filtered = filter_candidates(&candidates, budget);
    let candidates = if filtered.is_empty() { candidates } else { filtered };

    let needle = normalize_location(location);
    let reference = find_reference_poi(ctx.pois, &needle);

    let scorer = match ctx.backend {
        Some(backend) => Scorer::Learned { backend },
        None => Scorer::Heuristic,
    };
    let scorer_ctx = ScorerContext {
        encoders: ctx.encoders,
        scaler: ctx.scaler,
        reference,
        budget,
    };
    let ranking = score_and_rank(candidates, &scorer, &scorer_ctx);

    let packed = pack_daily(&ranking.ordered, days, budget);
    let result = assemble(location, days, budget_label, &packed.day_plans);

    Ok(PlanOutcome {
        result,
        scorer: ranking.scorer,
        backend_error: ranking.backend_error,
        candidates_considered,
        dropped_pois: packed.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostTier, Poi, PoiExtras};

    fn poi(id: &str, city: &str, tier: CostTier, cost: f64, popularity: f64) -> Poi {
        Poi {
            id: id.to_string(),
            name: id.to_string(),
            category: "Monument".to_string(),
            city: city.to_string(),
            region: "Testland".to_string(),
            latitude: 20.0,
            longitude: 70.0,
            estimated_cost: cost,
            duration_hours: 2.0,
            popularity,
            cost_tier: tier,
            extras: PoiExtras::default(),
        }
    }

    fn context<'a>(
        pois: &'a [Poi],
        encoders: &'a CategoricalEncoders,
        scaler: &'a FeatureScaler,
    ) -> PlanContext<'a> {
        PlanContext {
            pois,
            encoders,
            scaler,
            backend: None,
        }
    }

    fn request(location: &str, days: i32, budget: &str) -> TripPlanRequest {
        TripPlanRequest {
            location: location.to_string(),
            days,
            budget: budget.to_string(),
        }
    }

    #[test]
    fn blank_location_is_rejected_with_a_summary() {
        let pois = vec![poi("a", "Delhi", CostTier::Budget, 100.0, 0.5)];
        let encoders = CategoricalEncoders::default();
        let scaler = FeatureScaler::default();

        let outcome = plan_itinerary(&context(&pois, &encoders, &scaler), &request("   ", 3, "moderate"));
        assert!(outcome.result.day_plans.is_empty());
        assert!(outcome.result.summary.contains("valid location"));
    }

    #[test]
    fn unknown_location_is_reported_not_thrown() {
        let pois = vec![poi("a", "Delhi", CostTier::Budget, 100.0, 0.5)];
        let encoders = CategoricalEncoders::default();
        let scaler = FeatureScaler::default();

        let outcome = plan_itinerary(
            &context(&pois, &encoders, &scaler),
            &request("Nowhereland", 2, "low"),
        );
        assert!(outcome.result.day_plans.is_empty());
        assert!(outcome.result.summary.contains("not recognized"));
    }

    #[test]
    fn nonpositive_days_coerce_to_one() {
        let pois = vec![
            poi("a", "Delhi", CostTier::Budget, 100.0, 0.9),
            poi("b", "Delhi", CostTier::Budget, 100.0, 0.8),
        ];
        let encoders = CategoricalEncoders::default();
        let scaler = FeatureScaler::default();

        let outcome = plan_itinerary(&context(&pois, &encoders, &scaler), &request("Delhi", -3, "low"));
        assert_eq!(outcome.result.metadata.days, 1);
        assert_eq!(outcome.result.day_plans.len(), 1);
    }

    #[test]
    fn empty_filter_result_relaxes_to_full_scope() {
        // Only luxury-tier POIs in town: a low budget keeps them anyway,
        // and these are cheap enough to still fit the daily spend cap.
        let pois = vec![
            poi("a", "Delhi", CostTier::Luxury, 400.0, 0.9),
            poi("b", "Delhi", CostTier::Luxury, 350.0, 0.8),
        ];
        let encoders = CategoricalEncoders::default();
        let scaler = FeatureScaler::default();

        let outcome = plan_itinerary(&context(&pois, &encoders, &scaler), &request("Delhi", 1, "low"));
        assert!(!outcome.result.is_empty());
    }

    #[test]
    fn blank_budget_defaults_to_moderate() {
        let pois = vec![
            poi("a", "Delhi", CostTier::Budget, 100.0, 0.9),
            poi("b", "Delhi", CostTier::Budget, 100.0, 0.8),
        ];
        let encoders = CategoricalEncoders::default();
        let scaler = FeatureScaler::default();

        let outcome = plan_itinerary(&context(&pois, &encoders, &scaler), &request("Delhi", 1, "  "));
        assert_eq!(outcome.result.metadata.budget, "MODERATE");
        assert!(outcome.result.summary.contains("MODERATE"));
    }
}
