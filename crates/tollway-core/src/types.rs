use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a vehicle currently is relative to the tollway.
///
/// Exactly one instance is authoritative at any time; it is owned by the
/// lane state machine and only changes through validated transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrivingState {
    /// Not on the tollway. Initial state.
    #[default]
    OffTollway,

    /// On the entrance ramp, pass not yet issued.
    OnEntrance,

    /// Driving through the tollway with a toll pass.
    OnTollway,
}

impl DrivingState {
    /// All states, in table order.
    pub const ALL: [DrivingState; 3] = [
        DrivingState::OffTollway,
        DrivingState::OnEntrance,
        DrivingState::OnTollway,
    ];
}

impl fmt::Display for DrivingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            DrivingState::OffTollway => "OffTollway",
            DrivingState::OnEntrance => "OnEntrance",
            DrivingState::OnTollway => "OnTollway",
        };
        write!(f, "{}", state_str)
    }
}

/// Which producer an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// Direct user intent (entrance/use/exit buttons).
    Manual,

    /// The beacon proximity service.
    Proximity,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Proximity => write!(f, "proximity"),
        }
    }
}

/// An input to the lane state machine.
///
/// Events carry no payload: the system monitors exactly one beacon region,
/// so region events need no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TollEvent {
    /// Entrance button pressed.
    EnterRequested,

    /// Use button pressed.
    UseRequested,

    /// Exit button pressed.
    ExitRequested,

    /// The beacon reported entering the monitored region.
    RegionEntered,

    /// The beacon reported leaving the monitored region.
    RegionExited,
}

impl TollEvent {
    /// All events, in table order.
    pub const ALL: [TollEvent; 5] = [
        TollEvent::EnterRequested,
        TollEvent::UseRequested,
        TollEvent::ExitRequested,
        TollEvent::RegionEntered,
        TollEvent::RegionExited,
    ];

    /// The trigger source that produces this event.
    pub fn source(&self) -> TriggerSource {
        match self {
            Self::EnterRequested | Self::UseRequested | Self::ExitRequested => {
                TriggerSource::Manual
            }
            Self::RegionEntered | Self::RegionExited => TriggerSource::Proximity,
        }
    }

    /// Check if this event comes from the manual trigger source.
    pub fn is_manual(&self) -> bool {
        self.source() == TriggerSource::Manual
    }
}

impl fmt::Display for TollEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event_str = match self {
            Self::EnterRequested => "EnterRequested",
            Self::UseRequested => "UseRequested",
            Self::ExitRequested => "ExitRequested",
            Self::RegionEntered => "RegionEntered",
            Self::RegionExited => "RegionExited",
        };
        write!(f, "{}", event_str)
    }
}

/// The driver's answer to the payment confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentAnswer {
    /// "Yes": pay with the wallet.
    Accept,

    /// "No": pay at the counter instead.
    Decline,
}

impl fmt::Display for PaymentAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accept => write!(f, "Yes"),
            Self::Decline => write!(f, "No"),
        }
    }
}
