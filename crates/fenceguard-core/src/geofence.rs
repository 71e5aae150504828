use fenceguard_adb::Coordinate;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A fixed circular geofence: a center coordinate and a radius in meters.
#[derive(Debug, Clone)]
pub struct Geofence {
    center: Coordinate,
    radius_m: f64,
}

impl Geofence {
    #[must_use]
    pub fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    /// Haversine great-circle distance from the fence center, in meters.
    #[must_use]
    pub fn distance_m(&self, point: Coordinate) -> f64 {
        let lat1 = self.center.lat.to_radians();
        let lat2 = point.lat.to_radians();
        let dlat = lat2 - lat1;
        let dlon = point.lon.to_radians() - self.center.lon.to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push `a` just past [0, 1]; the inverse trig step needs the clamp.
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }

    /// True iff `point` lies on or inside the fence circle.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        self.distance_m(point) <= self.radius_m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Coordinate = Coordinate {
        lat: 13.032_247,
        lon: 77.562_837,
    };

    fn fence(radius_m: f64) -> Geofence {
        Geofence::new(CENTER, radius_m)
    }

    #[test]
    fn test_center_is_always_inside() {
        assert!(fence(0.0).contains(CENTER));
        assert!(fence(500_000.0).contains(CENTER));
    }

    #[test]
    fn test_antipode_is_outside_any_sub_hemispheric_fence() {
        let antipode = Coordinate {
            lat: -CENTER.lat,
            lon: CENTER.lon - 180.0,
        };
        // Half the Earth's circumference is roughly 20_015 km.
        assert!(!fence(500_000.0).contains(antipode));
        assert!(!fence(20_000_000.0).contains(antipode));
        assert!((fence(0.0).distance_m(antipode) - 20_015_087.0).abs() < 100.0);
    }

    #[test]
    fn test_distance_to_nearby_point() {
        let point = Coordinate {
            lat: 13.04,
            lon: 77.60,
        };
        assert!((fence(0.0).distance_m(point) - 4_117.2).abs() < 2.0);
        assert!(fence(500_000.0).contains(point));
    }

    #[test]
    fn test_distance_across_the_city() {
        let point = Coordinate {
            lat: 12.9716,
            lon: 77.5946,
        };
        assert!((fence(0.0).distance_m(point) - 7_571.0).abs() < 2.0);
    }

    #[test]
    fn test_distance_one_degree_of_latitude() {
        let point = Coordinate {
            lat: CENTER.lat + 1.0,
            lon: CENTER.lon,
        };
        assert!((fence(0.0).distance_m(point) - 111_194.9).abs() < 2.0);
    }

    #[test]
    fn test_point_just_outside_radius() {
        let point = Coordinate {
            lat: 13.04,
            lon: 77.60,
        };
        // ~4.1 km away; a 4 km fence excludes it, a 5 km fence does not.
        assert!(!fence(4_000.0).contains(point));
        assert!(fence(5_000.0).contains(point));
    }
}
