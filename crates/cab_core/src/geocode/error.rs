use std::fmt;

/// Errors encountered while resolving an address.
#[derive(Debug)]
pub enum GeocodeError {
    /// Transport-level failure reaching the geocoding service.
    Http(reqwest::Error),
    /// The service answered but the body could not be decoded.
    Json(reqwest::Error),
    /// The service rejected the request or returned a malformed record.
    Api(String),
    /// The service answered but knows no such address.
    NotFound { address: String },
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::Http(err) => write!(f, "geocoding service unreachable: {err}"),
            GeocodeError::Json(err) => write!(f, "geocoding response could not be decoded: {err}"),
            GeocodeError::Api(msg) => write!(f, "geocoding request rejected: {msg}"),
            GeocodeError::NotFound { address } => {
                write!(f, "could not find coordinates for address: {address}")
            }
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Http(err) | GeocodeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err)
    }
}
