const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinate pairs.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert!(haversine_km(28.6139, 77.2090, 28.6139, 77.2090).abs() < 1e-9);
    }

    #[test]
    fn delhi_to_agra_is_roughly_180_km() {
        let km = haversine_km(28.6139, 77.2090, 27.1767, 78.0081);
        assert!((150.0..210.0).contains(&km), "got {km}");
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = haversine_km(19.0760, 72.8777, 15.4909, 73.8278);
        let ba = haversine_km(15.4909, 73.8278, 19.0760, 72.8777);
        assert!((ab - ba).abs() < 1e-9);
    }
}
