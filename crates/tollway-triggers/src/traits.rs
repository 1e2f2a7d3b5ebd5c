//! Trigger source traits.
//!
//! Both traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT). They are NOT object-safe; the manager dispatches through the
//! enum wrappers in [`crate::devices`] instead of `Box<dyn Trait>`.

use std::time::Duration;

use crate::{ButtonPress, MonitoredRegion, RegionTransition, Result, SourceInfo};

/// The lane's button panel: the manual trigger source.
///
/// # Examples
///
/// ```no_run
/// use tollway_triggers::traits::ButtonPanel;
/// use tollway_triggers::Result;
///
/// async fn wait_for_entrance<P: ButtonPanel>(panel: &mut P) -> Result<()> {
///     loop {
///         if panel.read_press().await? == tollway_triggers::ButtonPress::Entrance {
///             return Ok(());
///         }
///     }
/// }
/// ```
pub trait ButtonPanel: Send + Sync {
    /// Wait for the next button press.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::Disconnected` if the panel goes away.
    async fn read_press(&mut self) -> Result<ButtonPress>;

    /// Get panel information.
    async fn get_info(&self) -> Result<SourceInfo>;
}

/// A beacon proximity service: the automatic trigger source.
///
/// Lifecycle: check the radio, `connect()` (returning `Ok` is the
/// readiness signal), `start_monitoring()` for exactly one region, then
/// read transitions until `disconnect()`.
pub trait ProximityService: Send + Sync {
    /// Whether the host has a short-range radio at all.
    fn has_radio(&self) -> bool;

    /// Whether the radio is switched on.
    fn is_radio_enabled(&self) -> bool;

    /// Connect to the host radio service and wait until it is ready.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::RadioUnavailable` or `TriggerError::RadioDisabled`
    /// when the radio cannot be used.
    async fn connect(&mut self) -> Result<()>;

    /// Set the background scan period.
    async fn set_scan_period(&mut self, period: Duration) -> Result<()>;

    /// Start monitoring `region`, replacing any region monitored before.
    ///
    /// # Errors
    ///
    /// Returns `TriggerError::NotReady` if called before `connect()`.
    async fn start_monitoring(&mut self, region: &MonitoredRegion) -> Result<()>;

    /// Wait for the next boundary crossing of the monitored region.
    async fn next_transition(&mut self) -> Result<RegionTransition>;

    /// Stop monitoring and release the radio service.
    async fn disconnect(&mut self) -> Result<()>;

    /// Get service information.
    async fn get_info(&self) -> Result<SourceInfo>;
}
