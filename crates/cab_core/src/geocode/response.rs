/// One entry of a Nominatim `/search` response. Coordinates arrive as
/// strings on the wire.
#[derive(serde::Deserialize)]
pub(super) struct SearchResult {
    pub(super) lat: String,
    pub(super) lon: String,
    #[serde(default)]
    pub(super) display_name: Option<String>,
}
