//! The per-user booking flow, from driver selection through payment
//! acknowledgment.
//!
//! The session owns the last match snapshot and walks a small phase
//! machine: Idle -> Selected -> Confirmed -> Completed, with Cancelled
//! reachable from any decline. The scan step is only offered while the
//! session is Confirmed, which in turn requires a confirmation artifact
//! to exist.

use std::fmt;

use crate::confirmation::{ArtifactError, ConfirmationArtifact};
use crate::directory::DriverRecord;

/// Where the booking flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RidePhase {
    #[default]
    Idle,
    Selected,
    Confirmed,
    Completed,
    Cancelled,
}

impl RidePhase {
    pub fn label(self) -> &'static str {
        match self {
            RidePhase::Idle => "Idle",
            RidePhase::Selected => "Selected",
            RidePhase::Confirmed => "Confirmed",
            RidePhase::Completed => "Completed",
            RidePhase::Cancelled => "Cancelled",
        }
    }
}

/// Payment is acknowledgment only: no amount, no receipt, no persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 3] = [PaymentMode::Cash, PaymentMode::Card, PaymentMode::Upi];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors surfaced by session operations.
#[derive(Debug)]
pub enum SessionError {
    /// No driver selected, or the selection index is out of bounds.
    NoSelection,
    /// The operation is not valid in the current phase.
    InvalidPhase {
        operation: &'static str,
        phase: RidePhase,
    },
    /// Encoding the confirmation artifact failed; the confirmation aborts.
    Artifact(ArtifactError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoSelection => {
                write!(f, "please select a driver before confirming the ride")
            }
            SessionError::InvalidPhase { operation, phase } => {
                write!(f, "cannot {} while the ride is {}", operation, phase.label())
            }
            SessionError::Artifact(err) => write!(f, "confirmation failed: {err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Artifact(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArtifactError> for SessionError {
    fn from(err: ArtifactError) -> Self {
        SessionError::Artifact(err)
    }
}

/// The booking flow state. One per window; replaced wholesale on each
/// new search.
#[derive(Debug, Default)]
pub struct RideSession {
    matches: Vec<DriverRecord>,
    phase: RidePhase,
    selected: Option<usize>,
    artifact: Option<ConfirmationArtifact>,
    payment: Option<PaymentMode>,
}

impl RideSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RidePhase {
        self.phase
    }

    pub fn matches(&self) -> &[DriverRecord] {
        &self.matches
    }

    /// Install a fresh match snapshot. Any previous selection, artifact,
    /// and payment choice are discarded and the phase resets to Idle.
    pub fn set_matches(&mut self, matches: Vec<DriverRecord>) {
        self.matches = matches;
        self.phase = RidePhase::Idle;
        self.selected = None;
        self.artifact = None;
        self.payment = None;
    }

    /// Pick a driver from the current match snapshot. An out-of-bounds
    /// index (including any index on an empty snapshot) leaves the phase
    /// untouched.
    pub fn select(&mut self, index: usize) -> Result<&DriverRecord, SessionError> {
        if !matches!(self.phase, RidePhase::Idle | RidePhase::Selected) {
            return Err(SessionError::InvalidPhase {
                operation: "select a driver",
                phase: self.phase,
            });
        }
        if index >= self.matches.len() {
            return Err(SessionError::NoSelection);
        }
        self.selected = Some(index);
        self.phase = RidePhase::Selected;
        Ok(&self.matches[index])
    }

    pub fn selected_driver(&self) -> Option<&DriverRecord> {
        self.selected.and_then(|index| self.matches.get(index))
    }

    /// Resolve the confirmation question. Declining cancels the ride with
    /// no retry. Accepting produces the QR artifact and unlocks the scan
    /// step immediately; an encoding failure aborts the confirmation and
    /// leaves the session Selected.
    pub fn confirm(&mut self, accept: bool) -> Result<Option<&ConfirmationArtifact>, SessionError> {
        if self.phase != RidePhase::Selected {
            return Err(SessionError::InvalidPhase {
                operation: "confirm the ride",
                phase: self.phase,
            });
        }
        if !accept {
            self.phase = RidePhase::Cancelled;
            return Ok(None);
        }
        let driver = self
            .selected
            .and_then(|index| self.matches.get(index))
            .ok_or(SessionError::NoSelection)?;
        let artifact = ConfirmationArtifact::for_driver(driver)?;
        tracing::info!(driver = %driver.name, "ride confirmed");
        self.artifact = Some(artifact);
        self.phase = RidePhase::Confirmed;
        Ok(self.artifact.as_ref())
    }

    /// True exactly while the session is Confirmed.
    pub fn scan_enabled(&self) -> bool {
        self.phase == RidePhase::Confirmed
    }

    pub fn artifact(&self) -> Option<&ConfirmationArtifact> {
        self.artifact.as_ref()
    }

    /// Answer the scan prompt. Anything but an affirmative cancels the
    /// payment step.
    pub fn acknowledge_scan(&mut self, scanned: bool) -> Result<RidePhase, SessionError> {
        if self.phase != RidePhase::Confirmed {
            return Err(SessionError::InvalidPhase {
                operation: "acknowledge the scan",
                phase: self.phase,
            });
        }
        self.phase = if scanned {
            RidePhase::Completed
        } else {
            RidePhase::Cancelled
        };
        Ok(self.phase)
    }

    /// Record the payment mode. Acknowledgment only; the session stays
    /// Completed.
    pub fn acknowledge_payment(&mut self, mode: PaymentMode) -> Result<(), SessionError> {
        if self.phase != RidePhase::Completed {
            return Err(SessionError::InvalidPhase {
                operation: "choose a payment mode",
                phase: self.phase,
            });
        }
        self.payment = Some(mode);
        Ok(())
    }

    pub fn payment(&self) -> Option<PaymentMode> {
        self.payment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(id: &str, name: &str, location: &str) -> DriverRecord {
        DriverRecord {
            id: id.to_string(),
            name: name.to_string(),
            rating: 4.8,
            eta_minutes: 5,
            base_fare: 10.0,
            contact_number: "555-0100".to_string(),
            location: location.to_string(),
        }
    }

    fn session_with_matches() -> RideSession {
        let mut session = RideSession::new();
        session.set_matches(vec![
            driver("1", "Alice", "Downtown"),
            driver("2", "Bob", "Downtown"),
        ]);
        session
    }

    #[test]
    fn starts_idle_with_no_selection() {
        let session = RideSession::new();
        assert_eq!(session.phase(), RidePhase::Idle);
        assert!(session.selected_driver().is_none());
        assert!(!session.scan_enabled());
    }

    #[test]
    fn out_of_bounds_selection_stays_idle() {
        let mut session = session_with_matches();
        assert!(matches!(session.select(5), Err(SessionError::NoSelection)));
        assert_eq!(session.phase(), RidePhase::Idle);

        let mut empty = RideSession::new();
        assert!(matches!(empty.select(0), Err(SessionError::NoSelection)));
        assert_eq!(empty.phase(), RidePhase::Idle);
    }

    #[test]
    fn selection_can_be_changed_before_confirming() {
        let mut session = session_with_matches();
        session.select(0).expect("first selection");
        session.select(1).expect("reselection");
        assert_eq!(session.selected_driver().map(|d| d.name.as_str()), Some("Bob"));
        assert_eq!(session.phase(), RidePhase::Selected);
    }

    #[test]
    fn confirm_requires_a_selection_first() {
        let mut session = session_with_matches();
        assert!(matches!(
            session.confirm(true),
            Err(SessionError::InvalidPhase { .. })
        ));
        assert_eq!(session.phase(), RidePhase::Idle);
    }

    #[test]
    fn declining_cancels_without_artifact() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        let artifact = session.confirm(false).expect("decline is not an error");
        assert!(artifact.is_none());
        assert_eq!(session.phase(), RidePhase::Cancelled);
        assert!(session.artifact().is_none());
    }

    #[test]
    fn accepting_produces_artifact_and_unlocks_scan() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        assert!(!session.scan_enabled());
        let artifact = session.confirm(true).expect("confirmation should succeed");
        assert!(artifact.is_some());
        assert_eq!(session.phase(), RidePhase::Confirmed);
        assert!(session.scan_enabled());
    }

    #[test]
    fn scan_is_unreachable_before_confirmation() {
        let mut session = session_with_matches();
        assert!(matches!(
            session.acknowledge_scan(true),
            Err(SessionError::InvalidPhase { .. })
        ));
        session.select(0).expect("selection");
        assert!(matches!(
            session.acknowledge_scan(true),
            Err(SessionError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn affirmed_scan_completes_the_ride() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        session.confirm(true).expect("confirmation");
        let phase = session.acknowledge_scan(true).expect("scan answer");
        assert_eq!(phase, RidePhase::Completed);
        assert!(!session.scan_enabled());
    }

    #[test]
    fn denied_scan_cancels_the_payment_step() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        session.confirm(true).expect("confirmation");
        let phase = session.acknowledge_scan(false).expect("scan answer");
        assert_eq!(phase, RidePhase::Cancelled);
        assert!(matches!(
            session.acknowledge_payment(PaymentMode::Cash),
            Err(SessionError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn payment_only_after_completion() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        session.confirm(true).expect("confirmation");
        assert!(matches!(
            session.acknowledge_payment(PaymentMode::Card),
            Err(SessionError::InvalidPhase { .. })
        ));
        session.acknowledge_scan(true).expect("scan answer");
        session
            .acknowledge_payment(PaymentMode::Upi)
            .expect("payment acknowledgment");
        assert_eq!(session.payment(), Some(PaymentMode::Upi));
    }

    #[test]
    fn new_search_discards_the_previous_flow() {
        let mut session = session_with_matches();
        session.select(0).expect("selection");
        session.confirm(true).expect("confirmation");
        session.set_matches(vec![driver("3", "Cara", "Uptown")]);
        assert_eq!(session.phase(), RidePhase::Idle);
        assert!(session.selected_driver().is_none());
        assert!(session.artifact().is_none());
        assert!(session.payment().is_none());
    }
}
