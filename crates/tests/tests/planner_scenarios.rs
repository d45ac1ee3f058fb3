use wayfarer_catalog::PoiCatalog;
use wayfarer_core::{
    plan_itinerary, BudgetTier, CategoricalEncoders, CostTier, FeatureScaler, ItineraryResult,
    PlanContext, Poi, PoiExtras, TripPlanRequest, MAX_HOURS_PER_DAY,
};

fn poi(id: &str, city: &str, cost: f64, hours: f64, popularity: f64, tier: CostTier) -> Poi {
    Poi {
        id: id.to_string(),
        name: id.to_string(),
        category: "Monument".to_string(),
        city: city.to_string(),
        region: "Testland".to_string(),
        latitude: 20.0,
        longitude: 70.0,
        estimated_cost: cost,
        duration_hours: hours,
        popularity,
        cost_tier: tier,
        extras: PoiExtras::default(),
    }
}

fn plan(pois: &[Poi], location: &str, days: i32, budget: &str) -> ItineraryResult {
    let encoders = CategoricalEncoders::default();
    let scaler = FeatureScaler::default();
    let ctx = PlanContext {
        pois,
        encoders: &encoders,
        scaler: &scaler,
        backend: None,
    };
    plan_itinerary(
        &ctx,
        &TripPlanRequest {
            location: location.to_string(),
            days,
            budget: budget.to_string(),
        },
    )
    .result
}

fn seed_plan(location: &str, days: i32, budget: &str) -> ItineraryResult {
    let catalog = PoiCatalog::seed();
    plan(catalog.pois(), location, days, budget)
}

#[test]
fn day_plans_cover_every_index() {
    for days in [1, 2, 5, 30, 365] {
        let result = seed_plan("Jaipur", days, "moderate");
        assert_eq!(result.day_plans.len(), days as usize);
        let keys: Vec<u32> = result.day_plans.keys().copied().collect();
        let expected: Vec<u32> = (1..=days as u32).collect();
        assert_eq!(keys, expected);
    }
}

#[test]
fn daily_caps_hold_for_every_day() {
    for (location, budget, tier) in [
        ("Jaipur", "low", BudgetTier::Low),
        ("Delhi", "moderate", BudgetTier::Moderate),
        ("Mumbai", "high", BudgetTier::High),
    ] {
        let result = seed_plan(location, 3, budget);
        for (day, day_pois) in &result.day_plans {
            let hours: f64 = day_pois.iter().map(|p| p.duration_hours).sum();
            let cost: f64 = day_pois.iter().map(|p| p.estimated_cost).sum();
            assert!(
                hours <= MAX_HOURS_PER_DAY + 1e-6,
                "{location} day {day} hours {hours}"
            );
            assert!(
                cost <= tier.daily_cap() + 1e-6,
                "{location} day {day} cost {cost}"
            );
        }
    }
}

#[test]
fn no_placed_poi_exceeds_six_hours() {
    for location in ["Jaipur", "Delhi", "Mumbai", "Goa"] {
        let result = seed_plan(location, 3, "high");
        for day_pois in result.day_plans.values() {
            for poi in day_pois {
                assert!(poi.duration_hours <= 6.0, "{}", poi.id);
            }
        }
    }
}

#[test]
fn identical_inputs_produce_identical_plans() {
    let first = seed_plan("Jaipur", 3, "moderate");
    let second = seed_plan("Jaipur", 3, "moderate");

    assert_eq!(first.summary, second.summary);
    assert_eq!(first.totals, second.totals);
    for (day, day_pois) in &first.day_plans {
        let other: Vec<&str> = second.day_plans[day].iter().map(|p| p.id.as_str()).collect();
        let ours: Vec<&str> = day_pois.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ours, other, "day {day} differs");
    }
}

#[test]
fn more_days_never_place_fewer_pois() {
    let pois: Vec<Poi> = (0..12)
        .map(|i| {
            poi(
                &format!("p{i}"),
                "Evenfield",
                10.0,
                1.0,
                0.9 - 0.05 * i as f64,
                CostTier::Budget,
            )
        })
        .collect();

    let mut previous = 0usize;
    for days in 1..=5 {
        let placed = plan(&pois, "Evenfield", days, "moderate").total_pois();
        assert!(
            placed >= previous,
            "days {days}: placed {placed} < {previous}"
        );
        previous = placed;
    }
}

#[test]
fn scenario_jaipur_three_days_moderate() {
    let result = seed_plan("Jaipur", 3, "moderate");

    assert_eq!(result.day_plans.len(), 3);
    assert!(result.total_pois() >= 6, "placed {}", result.total_pois());
    assert!(result.totals.cost > 0.0);
    assert!(result.totals.hours > 0.0);
    assert!(result.summary.contains("Jaipur"));
    assert!(result.summary.contains("moderate"));
    assert_eq!(result.metadata.source_cities, vec!["Jaipur"]);
}

#[test]
fn scenario_blank_location() {
    let result = seed_plan("", 3, "moderate");
    assert!(result.day_plans.is_empty());
    assert!(result.summary.contains("valid location"));
}

#[test]
fn scenario_unrecognized_location() {
    let result = seed_plan("Nowhereland", 2, "low");
    assert!(result.day_plans.is_empty());
    assert!(result.summary.contains("not recognized"));
}

#[test]
fn scenario_budget_tiers_are_cost_monotonic() {
    let low = seed_plan("Delhi", 2, "low");
    let high = seed_plan("Delhi", 2, "high");

    assert!(low.totals.cost > 0.0);
    assert!(
        low.totals.cost <= high.totals.cost,
        "low {} > high {}",
        low.totals.cost,
        high.totals.cost
    );
}

#[test]
fn restrictive_budget_relaxes_instead_of_failing() {
    // Every POI in town is luxury-tier; a low budget still gets a plan
    // from the unfiltered pool.
    let pois = vec![
        poi("a", "Glitzville", 300.0, 2.0, 0.9, CostTier::Luxury),
        poi("b", "Glitzville", 250.0, 2.0, 0.8, CostTier::Luxury),
    ];
    let result = plan(&pois, "Glitzville", 1, "low");
    assert!(!result.is_empty());
}

#[test]
fn overflowing_pool_drops_what_no_day_admits() {
    // Six hours per day, one day, eight one-hour POIs: exactly six fit.
    let pois: Vec<Poi> = (0..8)
        .map(|i| poi(&format!("p{i}"), "Shortstop", 0.0, 1.0, 0.5, CostTier::Free))
        .collect();

    let result = plan(&pois, "Shortstop", 1, "moderate");
    assert_eq!(result.total_pois(), 6);
    assert!((result.totals.hours - 6.0).abs() < 1e-6);
}

#[test]
fn budget_label_is_echoed_in_metadata() {
    let result = seed_plan("Jaipur", 2, "Fairly HIGH overall");
    assert_eq!(result.metadata.budget, "Fairly HIGH overall");
    assert!(result.summary.contains("Fairly HIGH overall"));
}
