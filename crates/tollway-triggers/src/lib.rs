//! Trigger sources for the tollway lane.
//!
//! Two independent producers feed the lane:
//!
//! - the **button panel** ([`traits::ButtonPanel`]): entrance/use/exit
//!   presses mapped 1:1 to `EnterRequested`/`UseRequested`/`ExitRequested`,
//!   plus the Yes/No answers to the payment dialog;
//! - the **proximity service** ([`traits::ProximityService`]): a beacon
//!   radio reporting entry into and exit from one monitored region.
//!
//! The [`TriggerManager`] runs each source in its own task and serializes
//! their output into one channel, so the consumer sees a single ordered
//! stream of [`TriggerEvent`]s.
//!
//! # Examples
//!
//! ```
//! use tollway_core::TollEvent;
//! use tollway_triggers::devices::AnyButtonPanel;
//! use tollway_triggers::manager::{TriggerConfig, TriggerEvent, TriggerManager};
//! use tollway_triggers::mock::MockButtonPanel;
//! use tollway_triggers::ButtonPress;
//!
//! #[tokio::main]
//! async fn main() -> tollway_triggers::Result<()> {
//!     let mut manager = TriggerManager::new(TriggerConfig {
//!         proximity_enabled: false,
//!         ..TriggerConfig::default()
//!     });
//!
//!     let (panel, buttons) = MockButtonPanel::new();
//!     manager.register_button_panel(AnyButtonPanel::Mock(panel));
//!     let mut handle = manager.start();
//!
//!     buttons.press(ButtonPress::Entrance).await?;
//!     match handle.recv().await {
//!         Some(TriggerEvent::Trigger { event, .. }) => assert_eq!(event, TollEvent::EnterRequested),
//!         other => panic!("unexpected: {other:?}"),
//!     }
//!
//!     handle.shutdown().await
//! }
//! ```

pub mod devices;
pub mod error;
pub mod manager;
pub mod mock;
pub mod traits;
pub mod types;

pub use error::{Result, TriggerError};
pub use manager::{
    MonitoringConfig, TriggerConfig, TriggerEvent, TriggerHandle, TriggerManager, TriggerStats,
};
pub use traits::{ButtonPanel, ProximityService};
pub use types::{ButtonPress, MonitoredRegion, RegionTransition, SourceInfo};
