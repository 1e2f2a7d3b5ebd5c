//! Shared helpers for lane integration tests.

#![allow(dead_code)]

use std::time::Duration;

use tollway_core::LaneConfig;
use tollway_lane::{LaneController, MockQrEncoder, VirtualScreen};
use tollway_triggers::{TriggerEvent, TriggerHandle};

pub type TestLane = LaneController<VirtualScreen, MockQrEncoder>;

/// A lane on a blank screen with the default configuration.
pub fn lane() -> TestLane {
    lane_with(LaneConfig::default())
}

pub fn lane_with(config: LaneConfig) -> TestLane {
    LaneController::new(config, VirtualScreen::default(), MockQrEncoder::new())
}

/// Wait for the next trigger event, failing the test after one second.
pub async fn next_event(handle: &mut TriggerHandle) -> TriggerEvent {
    tokio::time::timeout(Duration::from_secs(1), handle.recv())
        .await
        .expect("timed out waiting for trigger event")
        .expect("trigger channel closed")
}
