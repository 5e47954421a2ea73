//! Background worker that geocodes the two addresses and assembles the
//! map scene, reporting back over a channel.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;

use cab_core::geocode::{GeocodeError, Geocoder, NominatimClient};
use cab_core::map_document::{render_map_document, MapDocument};
use cab_core::offers::{scatter_offers, OfferMarker, DEFAULT_OFFER_COUNT};
use cab_core::route::RoutePlan;

/// Everything the map tab needs to draw and export one build.
#[derive(Debug, Clone)]
pub struct MapScene {
    pub route: RoutePlan,
    pub offers: Vec<OfferMarker>,
    pub document: MapDocument,
}

/// Spawn one build. The caller polls the receiver; exactly one message
/// is ever sent.
pub(crate) fn spawn_map_build(
    endpoint: String,
    pickup_address: String,
    destination_address: String,
    offer_seed: Option<u64>,
) -> Receiver<Result<MapScene, GeocodeError>> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let result = build_scene(&endpoint, &pickup_address, &destination_address, offer_seed);
        // The receiver may be gone if the app closed; nothing to do then.
        let _ = sender.send(result);
    });
    receiver
}

fn build_scene(
    endpoint: &str,
    pickup_address: &str,
    destination_address: &str,
    offer_seed: Option<u64>,
) -> Result<MapScene, GeocodeError> {
    let client = NominatimClient::new(endpoint);
    let pickup = client.geocode(pickup_address)?;
    let destination = client.geocode(destination_address)?;
    let route = RoutePlan::new(pickup, destination);

    let mut rng = match offer_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let offers = scatter_offers(&route, DEFAULT_OFFER_COUNT, &mut rng);
    let document = render_map_document(&route, &offers);
    tracing::info!(
        distance_km = route.distance_km(),
        offers = offers.len(),
        "map scene built"
    );
    Ok(MapScene {
        route,
        offers,
        document,
    })
}
