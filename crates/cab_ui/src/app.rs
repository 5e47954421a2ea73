//! Application state and command handlers for the cab-booking UI.
//!
//! The handlers are plain methods invoked by the tab render functions;
//! they hold no toolkit callbacks of their own. The ride flow state lives
//! in [`cab_core::session::RideSession`]; the map build runs on a worker
//! thread so a slow geocoding call never stalls the interface.

pub mod map_job;
pub mod settings;

use std::sync::mpsc::{Receiver, TryRecvError};

use cab_core::directory::DriverDirectory;
use cab_core::geocode::GeocodeError;
use cab_core::session::{PaymentMode, RidePhase, RideSession, SessionError};

use crate::app::map_job::{spawn_map_build, MapScene};
use crate::app::settings::{load_settings, settings_file_path, save_settings, AppSettings};

/// Which tab is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Ride,
    Map,
}

/// Inline banner standing in for modal message boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    fn new(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
        }
    }
}

pub struct CabApp {
    pub settings: AppSettings,
    pub tab: Tab,

    // Ride tab
    pub pickup_entry: String,
    pub session: RideSession,
    pub pending_choice: usize,
    pub scan_prompt_open: bool,
    pub payment_choice: PaymentMode,
    pub notice: Option<Notice>,
    pub qr_texture: Option<eframe::egui::TextureHandle>,

    // Map tab
    pub pickup_address: String,
    pub destination_address: String,
    pub map_scene: Option<MapScene>,
    pub map_error: Option<String>,
    pub map_job: Option<Receiver<Result<MapScene, GeocodeError>>>,
    pub saved_document_path: Option<String>,
}

impl CabApp {
    pub fn new() -> Self {
        let settings = match settings_file_path().and_then(|path| load_settings(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(%err, "settings unreadable, falling back to defaults");
                AppSettings::default()
            }
        };
        let pickup_address = settings.pickup_address.clone();
        let destination_address = settings.destination_address.clone();
        Self {
            settings,
            tab: Tab::Ride,
            pickup_entry: String::new(),
            session: RideSession::new(),
            pending_choice: 0,
            scan_prompt_open: false,
            payment_choice: PaymentMode::Cash,
            notice: None,
            qr_texture: None,
            pickup_address,
            destination_address,
            map_scene: None,
            map_error: None,
            map_job: None,
            saved_document_path: None,
        }
    }

    /// Reload the roster from disk and install the matches for the typed
    /// pickup location. The roster is re-read on every press; nothing is
    /// cached between searches.
    pub fn search_drivers(&mut self) {
        self.notice = None;
        self.qr_texture = None;
        self.scan_prompt_open = false;
        self.pending_choice = 0;
        match DriverDirectory::load_csv(&self.settings.roster_path) {
            Ok(directory) => {
                let matches: Vec<_> = directory
                    .matching_location(&self.pickup_entry)
                    .into_iter()
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    self.notice = Some(Notice::new(
                        "No Drivers",
                        format!(
                            "No available drivers for pickup location: {}",
                            self.pickup_entry
                        ),
                    ));
                }
                self.session.set_matches(matches);
            }
            Err(err) => {
                tracing::error!(%err, path = %self.settings.roster_path, "roster load failed");
                self.session.set_matches(Vec::new());
                self.notice = Some(Notice::new("Roster Error", err.to_string()));
            }
        }
    }

    /// Apply the combo-box choice to the session. Surfaces the
    /// "no selection" notice instead of leaving Idle when nothing valid
    /// is picked.
    pub fn confirm_ride_requested(&mut self) {
        self.notice = None;
        if let Err(err) = self.session.select(self.pending_choice) {
            self.notice = Some(match err {
                SessionError::NoSelection => Notice::new(
                    "No Selection",
                    "Please select a driver before confirming the ride.",
                ),
                other => Notice::new("Booking", other.to_string()),
            });
        }
    }

    /// Answer the confirmation question shown with the driver details.
    pub fn confirm_ride(&mut self, accept: bool) {
        self.notice = None;
        match self.session.confirm(accept) {
            Ok(Some(_)) => {
                // Texture is built lazily by the ride tab on next frame.
                self.qr_texture = None;
                self.scan_prompt_open = false;
            }
            Ok(None) => {
                self.notice = Some(Notice::new("Ride Cancelled", "Ride not confirmed."));
            }
            Err(err) => {
                tracing::error!(%err, "ride confirmation failed");
                self.notice = Some(Notice::new("Booking", err.to_string()));
            }
        }
    }

    /// Answer the scan prompt opened by the Scanned button.
    pub fn acknowledge_scan(&mut self, scanned: bool) {
        self.notice = None;
        self.scan_prompt_open = false;
        match self.session.acknowledge_scan(scanned) {
            Ok(RidePhase::Cancelled) => {
                self.notice = Some(Notice::new("Scan Cancelled", "Payment step cancelled."));
            }
            Ok(_) => {}
            Err(err) => {
                self.notice = Some(Notice::new("Booking", err.to_string()));
            }
        }
    }

    pub fn acknowledge_payment(&mut self) {
        self.notice = None;
        match self.session.acknowledge_payment(self.payment_choice) {
            Ok(()) => {
                self.notice = Some(Notice::new(
                    "Payment Mode",
                    format!("Selected Payment Mode: {}", self.payment_choice),
                ));
            }
            Err(err) => {
                self.notice = Some(Notice::new("Booking", err.to_string()));
            }
        }
    }

    /// Kick off a map build on a worker thread. One job in flight per
    /// press; further presses are ignored until the response arrives.
    pub fn request_map_build(&mut self) {
        if self.map_job.is_some() {
            return;
        }
        self.map_error = None;
        self.saved_document_path = None;
        self.persist_settings();
        self.map_job = Some(spawn_map_build(
            self.settings.geocoder_endpoint.clone(),
            self.pickup_address.clone(),
            self.destination_address.clone(),
            self.settings.offer_seed,
        ));
    }

    /// Collect the worker's single response, if it has arrived.
    pub fn poll_map_job(&mut self) {
        let Some(receiver) = &self.map_job else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(scene)) => {
                self.map_scene = Some(scene);
                self.map_job = None;
            }
            Ok(Err(err)) => {
                tracing::warn!(%err, "map build failed");
                self.map_error = Some(map_error_message(&err));
                self.map_job = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.map_error = Some("map worker exited unexpectedly".to_string());
                self.map_job = None;
            }
        }
    }

    /// Write the rendered HTML document next to the app.
    pub fn save_map_document(&mut self) {
        let Some(scene) = &self.map_scene else {
            return;
        };
        match scene.document.write_to(&self.settings.map_output_path) {
            Ok(()) => {
                self.saved_document_path = Some(self.settings.map_output_path.clone());
            }
            Err(err) => {
                self.map_error = Some(format!("failed to save map document: {err}"));
            }
        }
    }

    fn persist_settings(&mut self) {
        self.settings.pickup_address = self.pickup_address.clone();
        self.settings.destination_address = self.destination_address.clone();
        let result =
            settings_file_path().and_then(|path| save_settings(&path, &self.settings));
        if let Err(err) = result {
            tracing::warn!(%err, "failed to persist settings");
        }
    }
}

impl Default for CabApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Map tab error line. "Not found" asks for a different address;
/// transport failures point at the service instead.
fn map_error_message(err: &GeocodeError) -> String {
    match err {
        GeocodeError::NotFound { address } => {
            format!("Address not found: {address}. Try a different address.")
        }
        GeocodeError::Http(_) => err.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_address() {
        let message = map_error_message(&GeocodeError::NotFound {
            address: "Nowhereville".to_string(),
        });
        assert!(message.contains("Nowhereville"));
        assert!(message.contains("different address"));
    }

    #[test]
    fn api_errors_pass_through_display() {
        let message = map_error_message(&GeocodeError::Api("status 503".to_string()));
        assert!(message.contains("503"));
    }
}
