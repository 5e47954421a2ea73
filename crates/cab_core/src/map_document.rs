//! Self-contained Leaflet map document: route markers, the polyline, and
//! the offer markers with their popups, rendered once with no live
//! updates.
//!
//! Every user-visible string is embedded into the page's JavaScript via
//! JSON encoding, so shop names like "McDonald's" cannot break the
//! script.

use std::fs;
use std::io;
use std::path::Path;

use crate::offers::OfferMarker;
use crate::route::RoutePlan;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const MAP_ZOOM: u32 = 17;
const OFFER_FOOTNOTE: &str = "Visit us for amazing deals!";

/// A rendered HTML page, ready to write to disk and open in a browser.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    html: String,
}

impl MapDocument {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, &self.html)
    }
}

/// Render the route and offers into a standalone Leaflet page centered
/// on the pickup point.
pub fn render_map_document(route: &RoutePlan, offers: &[OfferMarker]) -> MapDocument {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Route Map</title>\n");
    html.push_str(&format!("<link rel=\"stylesheet\" href=\"{LEAFLET_CSS}\">\n"));
    html.push_str(&format!("<script src=\"{LEAFLET_JS}\"></script>\n"));
    html.push_str("<style>html, body, #map { height: 100%; margin: 0; }</style>\n");
    html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

    html.push_str(&format!(
        "var map = L.map(\"map\").setView([{}, {}], {MAP_ZOOM});\n",
        route.pickup.lat, route.pickup.lng
    ));
    html.push_str("L.control.scale().addTo(map);\n");
    html.push_str(&format!(
        "L.tileLayer({}, {{ maxZoom: 19, attribution: \"&copy; OpenStreetMap contributors\" }}).addTo(map);\n",
        js_string(TILE_URL)
    ));

    html.push_str(&circle_marker(
        route.pickup,
        "green",
        "Pickup",
        Some("Pickup"),
    ));
    html.push_str(&circle_marker(
        route.destination,
        "red",
        "Destination",
        Some("Destination"),
    ));

    html.push_str(&format!(
        "L.polyline([[{}, {}], [{}, {}]], {{ color: \"blue\", weight: 2.5 }}).addTo(map);\n",
        route.pickup.lat, route.pickup.lng, route.destination.lat, route.destination.lng
    ));

    for offer in offers {
        let popup = format!(
            "<b>{}</b><br>{}<br><i>{}</i>",
            offer.shop,
            offer.offer_line(),
            OFFER_FOOTNOTE
        );
        html.push_str(&circle_marker(
            offer.position,
            "orange",
            &popup,
            Some(offer.shop),
        ));
    }

    html.push_str("</script>\n</body>\n</html>\n");
    MapDocument { html }
}

fn circle_marker(
    position: crate::geocode::GeoPoint,
    color: &str,
    popup: &str,
    tooltip: Option<&str>,
) -> String {
    let mut marker = format!(
        "L.circleMarker([{}, {}], {{ color: {}, radius: 8 }}).addTo(map).bindPopup({})",
        position.lat,
        position.lng,
        js_string(color),
        js_string(popup)
    );
    if let Some(tooltip) = tooltip {
        marker.push_str(&format!(".bindTooltip({})", js_string(tooltip)));
    }
    marker.push_str(";\n");
    marker
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).expect("strings always encode to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::GeoPoint;
    use crate::offers::scatter_offers;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn route() -> RoutePlan {
        RoutePlan::new(
            GeoPoint::new(13.0374, 80.1575),
            GeoPoint::new(13.0465, 80.0977),
        )
    }

    #[test]
    fn document_is_a_standalone_page() {
        let document = render_map_document(&route(), &[]);
        let html = document.html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(LEAFLET_JS));
        assert!(html.contains(&format!("], {MAP_ZOOM});")));
        assert!(html.contains("\"Pickup\""));
        assert!(html.contains("\"Destination\""));
        assert!(html.contains("weight: 2.5"));
    }

    #[test]
    fn one_marker_per_offer() {
        let route = route();
        let mut rng = StdRng::seed_from_u64(1);
        let offers = scatter_offers(&route, 3, &mut rng);
        let document = render_map_document(&route, &offers);
        let markers = document.html().matches("circleMarker").count();
        // Pickup + destination + three offers.
        assert_eq!(markers, 5);
        for offer in &offers {
            assert!(document.html().contains(&offer.offer_line()));
        }
    }

    #[test]
    fn apostrophes_in_shop_names_are_json_escaped() {
        let route = route();
        let offer = OfferMarker {
            position: route.center(),
            shop: "McDonald's",
            discount_percent: 25,
        };
        let document = render_map_document(&route, &[offer]);
        // JSON encoding keeps the apostrophe inside a double-quoted literal.
        assert!(document.html().contains("\"McDonald's\""));
        assert!(document.html().contains(OFFER_FOOTNOTE));
    }

    #[test]
    fn write_to_persists_the_html() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("cab_map.html");
        let document = render_map_document(&route(), &[]);
        document.write_to(&path).expect("write should succeed");
        let reloaded = std::fs::read_to_string(&path).expect("file should read back");
        assert_eq!(reloaded, document.html());
    }
}
