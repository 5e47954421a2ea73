//! Randomly placed shop-offer markers along the route.
//!
//! Placement takes an injectable RNG so callers can seed it and get a
//! reproducible scatter.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geocode::GeoPoint;
use crate::route::RoutePlan;

/// Shops that may advertise along the route.
pub const SHOP_NAMES: [&str; 3] = ["KFC", "McDonald's", "Trends"];

/// How many offers a map shows.
pub const DEFAULT_OFFER_COUNT: usize = 3;

const MIN_FRACTION: f64 = 0.2;
const MAX_FRACTION: f64 = 0.8;
const MIN_DISCOUNT: u8 = 10;
const MAX_DISCOUNT: u8 = 50;

/// A point-of-interest annotation on the route map. Generated fresh each
/// build, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferMarker {
    pub position: GeoPoint,
    pub shop: &'static str,
    pub discount_percent: u8,
}

impl OfferMarker {
    /// Offer text shown in the marker popup.
    pub fn offer_line(&self) -> String {
        format!(
            "Today's Offer at {}: {}% off on selected items",
            self.shop, self.discount_percent
        )
    }
}

/// Scatter `count` offers on the pickup-destination segment. One fraction
/// in `[0.2, 0.8)` is drawn per marker and applied to both axes, keeping
/// every marker on the route line.
pub fn scatter_offers<R: Rng + ?Sized>(
    route: &RoutePlan,
    count: usize,
    rng: &mut R,
) -> Vec<OfferMarker> {
    (0..count)
        .map(|_| {
            let fraction = rng.gen_range(MIN_FRACTION..MAX_FRACTION);
            let shop = *SHOP_NAMES
                .choose(&mut *rng)
                .expect("SHOP_NAMES is non-empty");
            OfferMarker {
                position: route.point_at(fraction),
                shop,
                discount_percent: rng.gen_range(MIN_DISCOUNT..=MAX_DISCOUNT),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn route() -> RoutePlan {
        RoutePlan::new(
            GeoPoint::new(13.0374, 80.1575),
            GeoPoint::new(13.0465, 80.0977),
        )
    }

    /// Recover the fraction along each axis; both must agree for the
    /// marker to sit on the segment.
    fn axis_fractions(route: &RoutePlan, point: GeoPoint) -> (f64, f64) {
        let lat_span = route.destination.lat - route.pickup.lat;
        let lng_span = route.destination.lng - route.pickup.lng;
        (
            (point.lat - route.pickup.lat) / lat_span,
            (point.lng - route.pickup.lng) / lng_span,
        )
    }

    #[test]
    fn returns_exactly_count_markers() {
        let route = route();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(scatter_offers(&route, DEFAULT_OFFER_COUNT, &mut rng).len(), 3);
        assert_eq!(scatter_offers(&route, 7, &mut rng).len(), 7);
        assert!(scatter_offers(&route, 0, &mut rng).is_empty());
    }

    #[test]
    fn markers_lie_on_the_segment() {
        let route = route();
        let mut rng = StdRng::seed_from_u64(7);
        for marker in scatter_offers(&route, 50, &mut rng) {
            let (lat_frac, lng_frac) = axis_fractions(&route, marker.position);
            assert!(
                (lat_frac - lng_frac).abs() < 1e-9,
                "marker off the route line: {lat_frac} vs {lng_frac}"
            );
            assert!(
                lat_frac > 0.19 && lat_frac < 0.81,
                "fraction {lat_frac} outside the scatter window"
            );
        }
    }

    #[test]
    fn labels_and_discounts_come_from_the_fixed_ranges() {
        let route = route();
        let mut rng = StdRng::seed_from_u64(99);
        for marker in scatter_offers(&route, 50, &mut rng) {
            assert!(SHOP_NAMES.contains(&marker.shop));
            assert!((10..=50).contains(&marker.discount_percent));
            assert!(marker.offer_line().contains(marker.shop));
            assert!(marker
                .offer_line()
                .contains(&format!("{}% off", marker.discount_percent)));
        }
    }

    #[test]
    fn seeded_scatter_is_reproducible() {
        let route = route();
        let mut first = StdRng::seed_from_u64(123);
        let mut second = StdRng::seed_from_u64(123);
        assert_eq!(
            scatter_offers(&route, DEFAULT_OFFER_COUNT, &mut first),
            scatter_offers(&route, DEFAULT_OFFER_COUNT, &mut second)
        );
    }
}
