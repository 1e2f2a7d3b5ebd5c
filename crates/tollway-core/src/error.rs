use crate::{DrivingState, TollEvent};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TollError {
    // Transition errors
    /// A manual event arrived in a state where it does not apply.
    #[error("{message}")]
    Rejected {
        state: DrivingState,
        event: TollEvent,
        message: &'static str,
    },

    /// A proximity event arrived in a state with no defined interpretation.
    ///
    /// The two trigger sources disagree about where the vehicle is.
    #[error("Unexpected {event} while {state}")]
    Unreconciled {
        state: DrivingState,
        event: TollEvent,
    },

    // Payment errors
    #[error("Payment prompt already answered")]
    PaymentAlreadyResolved,

    #[error("No payment prompt is open")]
    NoPendingPayment,

    // Rendering errors
    #[error("QR encoding failed: {0}")]
    Encoding(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TollError {
    /// Create a rejection for `event` in `state`, shown as `message`.
    pub fn rejected(state: DrivingState, event: TollEvent, message: &'static str) -> Self {
        Self::Rejected {
            state,
            event,
            message,
        }
    }

    /// Create an unreconciled-trigger diagnostic.
    pub fn unreconciled(state: DrivingState, event: TollEvent) -> Self {
        Self::Unreconciled { state, event }
    }

    /// Whether this error is a state-machine outcome rather than a failure.
    ///
    /// Rejections and diagnostics leave the lane fully usable.
    pub fn is_transition_outcome(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Unreconciled { .. })
    }

    /// Whether this error signals the trigger sources have fallen out of sync.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Self::Unreconciled { .. })
    }
}

pub type Result<T> = std::result::Result<T, TollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_message() {
        let error = TollError::rejected(
            DrivingState::OnTollway,
            TollEvent::EnterRequested,
            crate::constants::ENTER_REJECTED,
        );
        assert_eq!(error.to_string(), "You need to be off the tollway to enter!");
        assert!(error.is_transition_outcome());
        assert!(!error.is_diagnostic());
    }

    #[test]
    fn test_unreconciled_is_diagnostic() {
        let error = TollError::unreconciled(DrivingState::OnEntrance, TollEvent::RegionEntered);
        assert_eq!(error.to_string(), "Unexpected RegionEntered while OnEntrance");
        assert!(error.is_diagnostic());
    }

    #[test]
    fn test_payment_errors_are_not_transition_outcomes() {
        assert!(!TollError::NoPendingPayment.is_transition_outcome());
        assert!(!TollError::PaymentAlreadyResolved.is_diagnostic());
    }
}
