use reqwest::{blocking::Client, Url};
use std::time::Duration;

use super::error::GeocodeError;
use super::parser::parse_search_response;
use super::response::SearchResult;
use super::{GeoPoint, Geocoder};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = "cab-booking-demo/0.1";

/// The public OpenStreetMap Nominatim instance.
pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// Thin HTTP client for Nominatim `/search` lookups.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: String,
}

impl NominatimClient {
    /// Create a client for the given endpoint
    /// (e.g. `https://nominatim.openstreetmap.org`).
    pub fn new(endpoint: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build geocoding client");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        let mut url = Url::parse(&format!("{}/search", self.endpoint))
            .map_err(|err| GeocodeError::Api(format!("failed to build geocoding URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");

        let response = self.client.get(url).send().map_err(GeocodeError::Http)?;
        if !response.status().is_success() {
            return Err(GeocodeError::Api(format!("status {}", response.status())));
        }

        let results: Vec<SearchResult> = response.json().map_err(GeocodeError::Json)?;
        parse_search_response(address, results)
    }
}
