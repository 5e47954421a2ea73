//! The ride confirmation artifact: a QR encoding of the confirmed
//! driver's name, ETA, and fare.
//!
//! The payload is a pure function of those three fields, so the encoded
//! image is byte-identical for identical inputs.

use std::fmt;
use std::path::Path;

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::directory::DriverRecord;

/// Errors raised while producing or exporting the artifact.
#[derive(Debug)]
pub enum ArtifactError {
    Encode(qrcode::types::QrError),
    Image(image::ImageError),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::Encode(err) => write!(f, "failed to encode QR payload: {err}"),
            ArtifactError::Image(err) => write!(f, "failed to write QR image: {err}"),
        }
    }
}

impl std::error::Error for ArtifactError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArtifactError::Encode(err) => Some(err),
            ArtifactError::Image(err) => Some(err),
        }
    }
}

impl From<qrcode::types::QrError> for ArtifactError {
    fn from(err: qrcode::types::QrError) -> Self {
        ArtifactError::Encode(err)
    }
}

/// The payload string encoded into the QR image.
pub fn confirmation_payload(driver: &DriverRecord) -> String {
    format!(
        "Ride Confirmation Driver: {} ETA: {} mins Fare: ${}",
        driver.name, driver.eta_minutes, driver.base_fare
    )
}

/// Encoded proof of confirmation, write-once per confirmed ride.
#[derive(Debug, Clone)]
pub struct ConfirmationArtifact {
    payload: String,
    image: GrayImage,
}

impl ConfirmationArtifact {
    /// Encode the artifact for a confirmed driver. Encoding failure is
    /// fatal to the confirmation action and propagates to the caller.
    pub fn for_driver(driver: &DriverRecord) -> Result<Self, ArtifactError> {
        let payload = confirmation_payload(driver);
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
        let image = code.render::<Luma<u8>>().build();
        Ok(Self { payload, image })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw grayscale pixels, row-major, one byte per pixel.
    pub fn luma_pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Write the artifact as a PNG, overwriting any previous one.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(ArtifactError::Image)
    }
}
