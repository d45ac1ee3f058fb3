use std::collections::HashSet;

use crate::geo::haversine_km;
use crate::models::{Poi, MIN_POIS_PER_DAY};

const EXPANSION_RADII_KM: [f64; 4] = [10.0, 25.0, 50.0, 100.0];

pub fn normalize_location(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Expand a destination string into a candidate pool, widening the search
/// stage by stage until at least `MIN_POIS_PER_DAY * days` POIs have
/// accumulated. Candidates keep catalog order within each stage; an empty
/// return means the location matched nothing at any stage.
pub fn select_scope<'a>(pois: &'a [Poi], location: &str, days: u32) -> Vec<&'a Poi> {
    let needle = normalize_location(location);
    if needle.is_empty() {
        return Vec::new();
    }

    let wanted = MIN_POIS_PER_DAY * days as usize;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut candidates: Vec<&Poi> = Vec::new();

    for poi in pois {
        if poi.city.to_lowercase() == needle && seen.insert(poi.id.as_str()) {
            candidates.push(poi);
        }
    }

    if candidates.len() < wanted {
        for poi in pois {
            if poi.region.to_lowercase() == needle && seen.insert(poi.id.as_str()) {
                candidates.push(poi);
            }
        }
    }

    if candidates.len() < wanted {
        if let Some(reference) = find_reference_poi(pois, &needle) {
            for radius in EXPANSION_RADII_KM {
                for poi in pois {
                    if seen.contains(poi.id.as_str()) {
                        continue;
                    }
                    let distance = haversine_km(
                        reference.latitude,
                        reference.longitude,
                        poi.latitude,
                        poi.longitude,
                    );
                    if distance <= radius {
                        seen.insert(poi.id.as_str());
                        candidates.push(poi);
                    }
                }
                if candidates.len() >= wanted {
                    break;
                }
            }
        }
    }

    if candidates.len() < wanted {
        for poi in pois {
            if seen.contains(poi.id.as_str()) {
                continue;
            }
            if poi.city.to_lowercase().contains(&needle)
                || poi.region.to_lowercase().contains(&needle)
            {
                seen.insert(poi.id.as_str());
                candidates.push(poi);
            }
        }
    }

    candidates
}

/// Anchor POI for distance computations: exact city, then exact region,
/// then substring. `needle` must already be normalized.
pub fn find_reference_poi<'a>(pois: &'a [Poi], needle: &str) -> Option<&'a Poi> {
    if needle.is_empty() {
        return None;
    }

    pois.iter()
        .find(|poi| poi.city.to_lowercase() == needle)
        .or_else(|| pois.iter().find(|poi| poi.region.to_lowercase() == needle))
        .or_else(|| {
            pois.iter().find(|poi| {
                poi.city.to_lowercase().contains(needle)
                    || poi.region.to_lowercase().contains(needle)
            })
        })
}
