//! Mock trigger sources for testing and development.
//!
//! These stand in for the lane UI and the beacon radio stack and can be
//! driven programmatically through their handles.

pub mod beacon;
pub mod button_panel;

pub use beacon::{MockBeacon, MockBeaconHandle};
pub use button_panel::{MockButtonPanel, MockButtonPanelHandle};
