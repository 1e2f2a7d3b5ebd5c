//! Mock beacon proximity service.
//!
//! Simulates the host radio service: radio presence and power state,
//! connection, region monitoring and boundary crossings injected through a
//! [`MockBeaconHandle`].

use std::time::Duration;

use crate::{
    MonitoredRegion, RegionTransition, Result, SourceInfo, TriggerError, traits::ProximityService,
};
use tokio::sync::mpsc;

/// Mock beacon proximity service.
///
/// # Examples
///
/// ```
/// use tollway_triggers::mock::MockBeacon;
/// use tollway_triggers::traits::ProximityService;
/// use tollway_triggers::{MonitoredRegion, RegionTransition};
///
/// #[tokio::main]
/// async fn main() -> tollway_triggers::Result<()> {
///     let (mut beacon, handle) = MockBeacon::new();
///
///     beacon.connect().await?;
///     beacon.start_monitoring(&MonitoredRegion::default()).await?;
///
///     handle.enter_region().await?;
///     assert_eq!(beacon.next_transition().await?, RegionTransition::Entered);
///
///     beacon.disconnect().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockBeacon {
    transition_rx: mpsc::Receiver<RegionTransition>,
    name: String,
    has_radio: bool,
    radio_enabled: bool,
    connected: bool,
    scan_period: Option<Duration>,
    region: Option<MonitoredRegion>,
}

impl MockBeacon {
    /// Create a mock service with a working, enabled radio.
    pub fn new() -> (Self, MockBeaconHandle) {
        Self::with_radio("Mock Beacon".to_string(), true, true)
    }

    /// Create a mock service with explicit radio presence and power state.
    pub fn with_radio(name: String, has_radio: bool, radio_enabled: bool) -> (Self, MockBeaconHandle) {
        let (transition_tx, transition_rx) = mpsc::channel(32);

        let beacon = Self {
            transition_rx,
            name: name.clone(),
            has_radio,
            radio_enabled,
            connected: false,
            scan_period: None,
            region: None,
        };

        let handle = MockBeaconHandle {
            transition_tx,
            name,
        };

        (beacon, handle)
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Region currently being monitored, if any.
    pub fn monitored_region(&self) -> Option<&MonitoredRegion> {
        self.region.as_ref()
    }

    pub fn scan_period(&self) -> Option<Duration> {
        self.scan_period
    }
}

impl ProximityService for MockBeacon {
    fn has_radio(&self) -> bool {
        self.has_radio
    }

    fn is_radio_enabled(&self) -> bool {
        self.radio_enabled
    }

    async fn connect(&mut self) -> Result<()> {
        if !self.has_radio {
            return Err(TriggerError::RadioUnavailable);
        }
        if !self.radio_enabled {
            return Err(TriggerError::RadioDisabled);
        }
        self.connected = true;
        Ok(())
    }

    async fn set_scan_period(&mut self, period: Duration) -> Result<()> {
        self.scan_period = Some(period);
        Ok(())
    }

    async fn start_monitoring(&mut self, region: &MonitoredRegion) -> Result<()> {
        if !self.connected {
            return Err(TriggerError::not_ready("connect() has not completed"));
        }
        self.region = Some(region.clone());
        Ok(())
    }

    async fn next_transition(&mut self) -> Result<RegionTransition> {
        if self.region.is_none() {
            return Err(TriggerError::not_ready("no region is being monitored"));
        }

        self.transition_rx
            .recv()
            .await
            .ok_or_else(|| TriggerError::disconnected(format!("{} closed", self.name)))
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.region = None;
        self.connected = false;
        Ok(())
    }

    async fn get_info(&self) -> Result<SourceInfo> {
        Ok(SourceInfo::new(self.name.clone(), "Mock Beacon v1.0"))
    }
}

/// Handle for simulating boundary crossings on a [`MockBeacon`].
#[derive(Debug, Clone)]
pub struct MockBeaconHandle {
    transition_tx: mpsc::Sender<RegionTransition>,
    name: String,
}

impl MockBeaconHandle {
    /// Report a boundary crossing.
    ///
    /// # Errors
    ///
    /// Returns an error if the service has been dropped.
    pub async fn cross(&self, transition: RegionTransition) -> Result<()> {
        self.transition_tx
            .send(transition)
            .await
            .map_err(|_| TriggerError::disconnected(format!("{} closed", self.name)))
    }

    pub async fn enter_region(&self) -> Result<()> {
        self.cross(RegionTransition::Entered).await
    }

    pub async fn exit_region(&self) -> Result<()> {
        self.cross(RegionTransition::Exited).await
    }
}
