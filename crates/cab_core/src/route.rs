//! Straight-line route between pickup and destination. No pathfinding;
//! the polyline is just the two endpoints.

use crate::geocode::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePlan {
    pub pickup: GeoPoint,
    pub destination: GeoPoint,
}

impl RoutePlan {
    pub fn new(pickup: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            pickup,
            destination,
        }
    }

    pub fn polyline(&self) -> [GeoPoint; 2] {
        [self.pickup, self.destination]
    }

    /// The point `fraction` of the way from pickup to destination. The
    /// same scalar is applied to both axes, so the result stays on the
    /// segment.
    pub fn point_at(&self, fraction: f64) -> GeoPoint {
        GeoPoint::new(
            self.pickup.lat + (self.destination.lat - self.pickup.lat) * fraction,
            self.pickup.lng + (self.destination.lng - self.pickup.lng) * fraction,
        )
    }

    pub fn center(&self) -> GeoPoint {
        self.point_at(0.5)
    }

    /// Great-circle length of the segment.
    pub fn distance_km(&self) -> f64 {
        haversine_km(self.pickup, self.destination)
    }
}

pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
