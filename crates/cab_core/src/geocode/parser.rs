use super::error::GeocodeError;
use super::response::SearchResult;
use super::GeoPoint;

pub(super) fn parse_search_response(
    address: &str,
    results: Vec<SearchResult>,
) -> Result<GeoPoint, GeocodeError> {
    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound {
            address: address.to_string(),
        })?;

    let lat = parse_coordinate("latitude", &first.lat)?;
    let lng = parse_coordinate("longitude", &first.lon)?;
    if let Some(name) = first.display_name.as_deref() {
        tracing::debug!(address, resolved = name, "address resolved");
    }
    Ok(GeoPoint::new(lat, lng))
}

fn parse_coordinate(axis: &str, raw: &str) -> Result<f64, GeocodeError> {
    raw.parse::<f64>()
        .map_err(|err| GeocodeError::Api(format!("malformed {axis} {raw:?}: {err}")))
}
