use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;

use crate::models::{ItineraryMetadata, ItineraryResult, Poi, Totals};

/// Turn packed day bins into an owned result: clone the placed POIs,
/// sum totals, collect the distinct source cities, render the summary.
pub fn assemble(
    location: &str,
    days: u32,
    budget_label: &str,
    packed: &BTreeMap<u32, Vec<&Poi>>,
) -> ItineraryResult {
    let mut day_plans: BTreeMap<u32, Vec<Poi>> = BTreeMap::new();
    let mut totals = Totals::default();
    let mut cities: BTreeSet<String> = BTreeSet::new();
    let mut placed = 0usize;

    for (day, day_pois) in packed {
        let mut owned = Vec::with_capacity(day_pois.len());
        for poi in day_pois {
            totals.cost += poi.estimated_cost;
            totals.hours += poi.duration_hours;
            cities.insert(poi.city.clone());
            placed += 1;
            owned.push((*poi).clone());
        }
        day_plans.insert(*day, owned);
    }

    let summary = format!(
        "{}-day {} itinerary for {} — {} POIs, est ₹{:.0} total.",
        days, budget_label, location, placed, totals.cost
    );

    ItineraryResult {
        metadata: ItineraryMetadata {
            location: location.to_string(),
            days,
            budget: budget_label.to_string(),
            generated_at: Utc::now(),
            source_cities: cities.into_iter().collect(),
        },
        day_plans,
        totals,
        summary,
    }
}

/// Result shell for rejected requests: empty day plans, explanatory
/// summary, zeroed totals.
pub fn empty_result(location: &str, days: u32, budget_label: &str, summary: String) -> ItineraryResult {
    ItineraryResult {
        metadata: ItineraryMetadata {
            location: location.to_string(),
            days,
            budget: budget_label.to_string(),
            generated_at: Utc::now(),
            source_cities: Vec::new(),
        },
        day_plans: BTreeMap::new(),
        totals: Totals::default(),
        summary,
    }
}
