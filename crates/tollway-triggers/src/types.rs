//! Types shared by the trigger source traits.

use serde::{Deserialize, Serialize};
use tollway_core::constants::{DEFAULT_REGION_ID, DEFAULT_REGION_UUID};
use tollway_core::{PaymentAnswer, TollEvent};
use uuid::Uuid;

use crate::{Result, TriggerError};

/// A physical button on the lane's control panel.
///
/// The entrance/use/exit buttons are the manual trigger source. The two
/// dialog buttons answer the payment prompt and never reach the state
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonPress {
    Entrance,
    Use,
    Exit,
    DialogYes,
    DialogNo,
}

impl ButtonPress {
    /// The state machine event for this press, if it is a lane button.
    ///
    /// # Examples
    ///
    /// ```
    /// use tollway_core::TollEvent;
    /// use tollway_triggers::ButtonPress;
    ///
    /// assert_eq!(ButtonPress::Use.event(), Some(TollEvent::UseRequested));
    /// assert_eq!(ButtonPress::DialogYes.event(), None);
    /// ```
    pub fn event(&self) -> Option<TollEvent> {
        match self {
            Self::Entrance => Some(TollEvent::EnterRequested),
            Self::Use => Some(TollEvent::UseRequested),
            Self::Exit => Some(TollEvent::ExitRequested),
            Self::DialogYes | Self::DialogNo => None,
        }
    }

    /// The payment answer for this press, if it is a dialog button.
    pub fn answer(&self) -> Option<PaymentAnswer> {
        match self {
            Self::DialogYes => Some(PaymentAnswer::Accept),
            Self::DialogNo => Some(PaymentAnswer::Decline),
            _ => None,
        }
    }
}

/// Boundary crossing reported by the proximity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionTransition {
    Entered,
    Exited,
}

impl RegionTransition {
    pub fn event(&self) -> TollEvent {
        match self {
            Self::Entered => TollEvent::RegionEntered,
            Self::Exited => TollEvent::RegionExited,
        }
    }
}

/// The beacon region watched by the proximity service.
///
/// `major` and `minor` of `None` match any beacon broadcasting the
/// proximity UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredRegion {
    /// Region identifier passed to the proximity service.
    pub identifier: String,

    /// Beacon proximity UUID.
    pub proximity_uuid: Uuid,

    /// Beacon major number filter.
    pub major: Option<u16>,

    /// Beacon minor number filter.
    pub minor: Option<u16>,
}

impl MonitoredRegion {
    /// Create a region matching every beacon with the given UUID.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::InvalidRegion` if the identifier is empty or
    /// the UUID does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use tollway_triggers::MonitoredRegion;
    ///
    /// let region = MonitoredRegion::new("GATE-1", "b9407f30-f5f8-466e-aff9-25556b57fe6d").unwrap();
    /// assert_eq!(region.identifier, "GATE-1");
    /// assert!(region.major.is_none());
    ///
    /// assert!(MonitoredRegion::new("GATE-1", "not-a-uuid").is_err());
    /// ```
    pub fn new(identifier: impl Into<String>, proximity_uuid: &str) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(TriggerError::invalid_region("identifier must not be empty"));
        }

        let proximity_uuid = Uuid::parse_str(proximity_uuid)
            .map_err(|e| TriggerError::invalid_region(format!("bad proximity UUID: {e}")))?;

        Ok(Self {
            identifier,
            proximity_uuid,
            major: None,
            minor: None,
        })
    }

    /// Restrict the region to one beacon major number.
    pub fn with_major(mut self, major: u16) -> Self {
        self.major = Some(major);
        self
    }

    /// Restrict the region to one beacon minor number.
    pub fn with_minor(mut self, minor: u16) -> Self {
        self.minor = Some(minor);
        self
    }
}

impl Default for MonitoredRegion {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_REGION_ID.to_string(),
            proximity_uuid: Uuid::parse_str(DEFAULT_REGION_UUID).unwrap_or_default(),
            major: None,
            minor: None,
        }
    }
}

/// Generic source information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Source name (e.g., "Mock Beacon").
    pub name: String,

    /// Model identifier.
    pub model: String,
}

impl SourceInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}
