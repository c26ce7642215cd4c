use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in kilometers between two points.
///
/// Inputs are not range checked; callers validate coordinates at the
/// boundary.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Coordinates::new(45.0123, 10.2585);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let parma = Coordinates::new(44.8015, 10.3279);
        let milano = Coordinates::new(45.4642, 9.19);
        let d1 = haversine_km(parma, milano);
        let d2 = haversine_km(milano, parma);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_longitude_at_45_north() {
        let home = Coordinates::new(45.0, 10.0);
        let other = Coordinates::new(45.0, 11.0);
        let d = haversine_km(home, other);
        assert!((d - 78.63).abs() < 0.05, "got {d}");
    }

    #[test]
    fn test_antipodal_points() {
        let d = haversine_km(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }
}
