//! Free-text address lookup against a Nominatim-compatible endpoint.
//!
//! This module wraps a blocking HTTP client and exposes the resolved
//! coordinate pair without leaking details of the HTTP response. An
//! address the service does not know is a distinct error from a
//! transport failure, so callers can tell "try a different address"
//! apart from "service unreachable".

mod client;
mod error;
mod parser;
mod response;

pub use client::{NominatimClient, DEFAULT_ENDPOINT};
pub use error::GeocodeError;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Seam for address lookup so the UI and tests can substitute a stub.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError>;
}
