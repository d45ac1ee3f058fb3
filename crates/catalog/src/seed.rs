use wayfarer_core::{CostTier, Poi, PoiExtras};

use crate::thumbnails::thumbnail_slug;

#[allow(clippy::too_many_arguments)]
fn poi(
    id: &str,
    name: &str,
    category: &str,
    city: &str,
    region: &str,
    latitude: f64,
    longitude: f64,
    estimated_cost: f64,
    duration_hours: f64,
    popularity: f64,
    cost_tier: CostTier,
) -> Poi {
    Poi {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        city: city.to_string(),
        region: region.to_string(),
        latitude,
        longitude,
        estimated_cost,
        duration_hours,
        popularity,
        cost_tier,
        extras: PoiExtras {
            thumbnail: Some(thumbnail_slug(category).to_string()),
            ..PoiExtras::default()
        },
    }
}

/// Landmark catalog used when no `pois.csv` is shipped. Enough coverage
/// per city to plan a few days without an asset bundle.
pub fn seed_pois() -> Vec<Poi> {
    use CostTier::{Budget, Free, Luxury, Moderate};

    vec![
        // Jaipur
        poi("jaipur-hawa-mahal", "Hawa Mahal", "Palace", "Jaipur", "Rajasthan", 26.9239, 75.8267, 200.0, 1.5, 0.92, Budget),
        poi("jaipur-amber-fort", "Amber Fort", "Fort", "Jaipur", "Rajasthan", 26.9855, 75.8513, 500.0, 3.0, 0.95, Budget),
        poi("jaipur-city-palace", "City Palace", "Palace", "Jaipur", "Rajasthan", 26.9258, 75.8237, 400.0, 2.0, 0.88, Budget),
        poi("jaipur-jantar-mantar", "Jantar Mantar", "Monument", "Jaipur", "Rajasthan", 26.9247, 75.8246, 200.0, 1.5, 0.85, Budget),
        poi("jaipur-albert-hall", "Albert Hall Museum", "Museum", "Jaipur", "Rajasthan", 26.9118, 75.8195, 150.0, 2.0, 0.80, Budget),
        poi("jaipur-jal-mahal", "Jal Mahal Viewpoint", "Lake", "Jaipur", "Rajasthan", 26.9535, 75.8461, 0.0, 1.0, 0.75, Free),
        poi("jaipur-rambagh-dinner", "Rambagh Palace Dinner", "Restaurant", "Jaipur", "Rajasthan", 26.8989, 75.8090, 4000.0, 2.5, 0.70, Luxury),
        // Delhi
        poi("delhi-india-gate", "India Gate", "Monument", "Delhi", "Delhi", 28.6129, 77.2295, 0.0, 1.0, 0.60, Free),
        poi("delhi-lodhi-gardens", "Lodhi Gardens", "Park", "Delhi", "Delhi", 28.5931, 77.2197, 0.0, 1.5, 0.50, Free),
        poi("delhi-qutub-minar", "Qutub Minar", "Monument", "Delhi", "Delhi", 28.5245, 77.1855, 350.0, 2.0, 0.80, Budget),
        poi("delhi-red-fort", "Red Fort", "Fort", "Delhi", "Delhi", 28.6562, 77.2410, 250.0, 2.0, 0.70, Budget),
        poi("delhi-oberoi-rooftop", "Oberoi Rooftop Dining", "Restaurant", "Delhi", "Delhi", 28.6040, 77.2410, 2500.0, 2.0, 0.95, Luxury),
        poi("delhi-imperial-high-tea", "Imperial Heritage High Tea", "Restaurant", "Delhi", "Delhi", 28.6246, 77.2180, 2000.0, 2.0, 0.90, Luxury),
        // Mumbai
        poi("mumbai-gateway", "Gateway of India", "Monument", "Mumbai", "Maharashtra", 18.9220, 72.8347, 0.0, 1.0, 0.90, Free),
        poi("mumbai-marine-drive", "Marine Drive", "Promenade", "Mumbai", "Maharashtra", 18.9430, 72.8236, 0.0, 1.5, 0.85, Free),
        poi("mumbai-csmvs-museum", "Chhatrapati Shivaji Museum", "Museum", "Mumbai", "Maharashtra", 18.9269, 72.8326, 300.0, 2.5, 0.80, Budget),
        poi("mumbai-elephanta", "Elephanta Caves", "Cave", "Mumbai", "Maharashtra", 18.9634, 72.9315, 600.0, 4.0, 0.75, Budget),
        // Agra
        poi("agra-taj-mahal", "Taj Mahal", "Monument", "Agra", "Uttar Pradesh", 27.1751, 78.0421, 1100.0, 3.0, 0.98, Moderate),
        poi("agra-fort", "Agra Fort", "Fort", "Agra", "Uttar Pradesh", 27.1795, 78.0211, 650.0, 2.5, 0.90, Budget),
        // Goa
        poi("goa-baga-beach", "Baga Beach", "Beach", "Goa", "Goa", 15.5524, 73.7517, 0.0, 3.0, 0.85, Free),
        poi("goa-fort-aguada", "Fort Aguada", "Fort", "Goa", "Goa", 15.4920, 73.7735, 100.0, 1.5, 0.70, Budget),
        // Bangalore
        poi("bangalore-lalbagh", "Lalbagh Botanical Garden", "Park", "Bangalore", "Karnataka", 12.9507, 77.5848, 50.0, 2.0, 0.75, Budget),
        poi("bangalore-cubbon-park", "Cubbon Park", "Park", "Bangalore", "Karnataka", 12.9763, 77.5929, 0.0, 1.5, 0.65, Free),
        poi("bangalore-palace", "Bangalore Palace", "Palace", "Bangalore", "Karnataka", 12.9987, 77.5920, 460.0, 2.0, 0.70, Budget),
    ]
}
