//! Enum wrappers for trigger source dispatch.
//!
//! Native `async fn` in traits is not object-safe, so the manager holds
//! these enums instead of `Box<dyn ButtonPanel>` / `Box<dyn ProximityService>`.
//! A real radio binding would be added as another variant.

use std::time::Duration;

use crate::mock::{MockBeacon, MockButtonPanel};
use crate::traits::{ButtonPanel, ProximityService};
use crate::{ButtonPress, MonitoredRegion, RegionTransition, Result, SourceInfo};

/// Enum wrapper for button panel dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyButtonPanel {
    /// Mock panel for development and testing.
    Mock(MockButtonPanel),
}

impl ButtonPanel for AnyButtonPanel {
    async fn read_press(&mut self) -> Result<ButtonPress> {
        match self {
            Self::Mock(panel) => panel.read_press().await,
        }
    }

    async fn get_info(&self) -> Result<SourceInfo> {
        match self {
            Self::Mock(panel) => panel.get_info().await,
        }
    }
}

/// Enum wrapper for proximity service dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyProximityService {
    /// Mock beacon for development and testing.
    Mock(MockBeacon),
}

impl ProximityService for AnyProximityService {
    fn has_radio(&self) -> bool {
        match self {
            Self::Mock(service) => service.has_radio(),
        }
    }

    fn is_radio_enabled(&self) -> bool {
        match self {
            Self::Mock(service) => service.is_radio_enabled(),
        }
    }

    async fn connect(&mut self) -> Result<()> {
        match self {
            Self::Mock(service) => service.connect().await,
        }
    }

    async fn set_scan_period(&mut self, period: Duration) -> Result<()> {
        match self {
            Self::Mock(service) => service.set_scan_period(period).await,
        }
    }

    async fn start_monitoring(&mut self, region: &MonitoredRegion) -> Result<()> {
        match self {
            Self::Mock(service) => service.start_monitoring(region).await,
        }
    }

    async fn next_transition(&mut self) -> Result<RegionTransition> {
        match self {
            Self::Mock(service) => service.next_transition().await,
        }
    }

    async fn disconnect(&mut self) -> Result<()> {
        match self {
            Self::Mock(service) => service.disconnect().await,
        }
    }

    async fn get_info(&self) -> Result<SourceInfo> {
        match self {
            Self::Mock(service) => service.get_info().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_any_button_panel_dispatch() {
        let (panel, handle) = MockButtonPanel::new();
        let mut panel = AnyButtonPanel::Mock(panel);

        handle.press(ButtonPress::Exit).await.unwrap();
        assert_eq!(panel.read_press().await.unwrap(), ButtonPress::Exit);
        assert_eq!(panel.get_info().await.unwrap().name, "Mock Button Panel");
    }

    #[tokio::test]
    async fn test_any_proximity_service_dispatch() {
        let (beacon, handle) = MockBeacon::new();
        let mut service = AnyProximityService::Mock(beacon);

        assert!(service.has_radio());
        assert!(service.is_radio_enabled());

        service.connect().await.unwrap();
        service
            .start_monitoring(&MonitoredRegion::default())
            .await
            .unwrap();

        handle.exit_region().await.unwrap();
        assert_eq!(
            service.next_transition().await.unwrap(),
            RegionTransition::Exited
        );
        service.disconnect().await.unwrap();
    }
}
