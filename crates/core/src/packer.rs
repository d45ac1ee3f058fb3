use std::collections::BTreeMap;

use crate::models::{BudgetTier, Poi, MAX_HOURS_PER_DAY, MIN_POIS_PER_DAY};

pub struct PackedDays<'a> {
    pub day_plans: BTreeMap<u32, Vec<&'a Poi>>,
    /// Leftovers no day could admit. Dropped from the result by design.
    pub dropped: usize,
}

/// Greedy multi-bin packing of the ranked pool into `days` bins, each
/// capped at `MAX_HOURS_PER_DAY` hours and the budget tier's daily spend.
/// Every index `1..=days` appears in the output, empty bins included.
pub fn pack_daily<'a>(ranked: &[&'a Poi], days: u32, budget: BudgetTier) -> PackedDays<'a> {
    let days = days.max(1);
    let daily_cap = budget.daily_cap();
    let mut pool: Vec<&Poi> = ranked.to_vec();
    let target_per_day = MIN_POIS_PER_DAY.max(pool.len() / days as usize);

    let mut day_plans: BTreeMap<u32, Vec<&Poi>> = BTreeMap::new();

    for day in 1..=days {
        let mut day_pois: Vec<&Poi> = Vec::new();
        let mut remaining_time = MAX_HOURS_PER_DAY;
        let mut remaining_budget = daily_cap;

        pool.retain(|&poi| {
            if day_pois.len() >= target_per_day || remaining_time <= 0.0 {
                return true;
            }
            if accepts(poi, remaining_time, remaining_budget) {
                remaining_time -= poi.duration_hours;
                remaining_budget -= poi.estimated_cost;
                day_pois.push(poi);
                false
            } else {
                true
            }
        });

        // Top-up: a day below the minimum keeps accepting anything that
        // still fits, ignoring the per-day target.
        if day_pois.len() < MIN_POIS_PER_DAY && !pool.is_empty() {
            pool.retain(|&poi| {
                if remaining_time <= 0.0 {
                    return true;
                }
                if accepts(poi, remaining_time, remaining_budget) {
                    remaining_time -= poi.duration_hours;
                    remaining_budget -= poi.estimated_cost;
                    day_pois.push(poi);
                    false
                } else {
                    true
                }
            });
        }

        day_plans.insert(day, day_pois);
    }

    let dropped = redistribute_leftovers(pool, &mut day_plans, daily_cap);

    PackedDays { day_plans, dropped }
}

fn accepts(poi: &Poi, remaining_time: f64, remaining_budget: f64) -> bool {
    poi.duration_hours > 0.0
        && poi.estimated_cost >= 0.0
        && poi.duration_hours <= remaining_time
        && poi.estimated_cost <= remaining_budget
}

/// Offer each leftover to the least-loaded day whose residual capacity,
/// recomputed from current contents, still admits it. Earliest day wins
/// ties; a POI no day admits is dropped.
fn redistribute_leftovers<'a>(
    leftovers: Vec<&'a Poi>,
    day_plans: &mut BTreeMap<u32, Vec<&'a Poi>>,
    daily_cap: f64,
) -> usize {
    let mut dropped = 0;

    for poi in leftovers {
        let mut best_day: Option<u32> = None;
        let mut best_count = usize::MAX;

        for (day, day_pois) in day_plans.iter() {
            let used_time: f64 = day_pois.iter().map(|p| p.duration_hours).sum();
            let used_cost: f64 = day_pois.iter().map(|p| p.estimated_cost).sum();

            if used_time + poi.duration_hours <= MAX_HOURS_PER_DAY
                && used_cost + poi.estimated_cost <= daily_cap
                && day_pois.len() < best_count
            {
                best_count = day_pois.len();
                best_day = Some(*day);
            }
        }

        match best_day.and_then(|day| day_plans.get_mut(&day)) {
            Some(day_pois) => day_pois.push(poi),
            None => dropped += 1,
        }
    }

    dropped
}
