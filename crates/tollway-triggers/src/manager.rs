//! Trigger source manager.
//!
//! Runs each enabled trigger source in its own task and funnels everything
//! they produce into one ordered channel. The consumer of that channel is
//! the lane's single apply point: manual and proximity events never reach
//! the state machine concurrently.
//!
//! ```text
//! ┌──────────────┐       ┌─────────────────┐
//! │ Button panel │──────►│                 │
//! │ task         │       │  Event Channel  │
//! └──────────────┘       │  (mpsc)         │──────► Lane controller
//!                        │                 │
//! ┌──────────────┐       │                 │
//! │ Proximity    │──────►│                 │
//! │ task         │       └─────────────────┘
//! └──────────────┘
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use tollway_triggers::manager::{TriggerManager, TriggerConfig};
//! use tollway_triggers::devices::{AnyButtonPanel, AnyProximityService};
//! use tollway_triggers::mock::{MockBeacon, MockButtonPanel};
//!
//! #[tokio::main]
//! async fn main() -> tollway_triggers::Result<()> {
//!     let mut manager = TriggerManager::new(TriggerConfig::default());
//!
//!     let (panel, _buttons) = MockButtonPanel::new();
//!     manager.register_button_panel(AnyButtonPanel::Mock(panel));
//!
//!     let (beacon, _radio) = MockBeacon::new();
//!     manager.register_proximity(AnyProximityService::Mock(beacon));
//!
//!     let mut handle = manager.start();
//!     while let Some(event) = handle.recv().await {
//!         println!("{event:?}");
//!     }
//!
//!     handle.shutdown().await
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tollway_core::constants::DEFAULT_SCAN_PERIOD_MS;
use tollway_core::{PaymentAnswer, TollEvent, TriggerSource};
use tracing::{debug, info, warn};

use crate::devices::{AnyButtonPanel, AnyProximityService};
use crate::traits::{ButtonPanel, ProximityService};
use crate::{MonitoredRegion, Result, TriggerError};

/// How long `shutdown()` waits for sources to stop before aborting them.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Unified event from any trigger source.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TriggerEvent {
    /// A state machine event from the button panel or the beacon.
    Trigger {
        event: TollEvent,
        source: TriggerSource,
        received_at: DateTime<Utc>,
    },

    /// The driver answered the payment dialog.
    PaymentAnswered {
        answer: PaymentAnswer,
        received_at: DateTime<Utc>,
    },

    /// The proximity service is connected and watching `region_id`.
    MonitoringStarted { region_id: String },

    /// A source failed. Its task terminates after sending this.
    SourceError {
        source: TriggerSource,
        error: String,
    },
}

impl TriggerEvent {
    fn trigger(event: TollEvent) -> Self {
        Self::Trigger {
            event,
            source: event.source(),
            received_at: Utc::now(),
        }
    }

    fn payment(answer: PaymentAnswer) -> Self {
        Self::PaymentAnswered {
            answer,
            received_at: Utc::now(),
        }
    }
}

/// Proximity monitoring parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringConfig {
    /// The single region to watch.
    pub region: MonitoredRegion,

    /// Background scan period.
    pub scan_period: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            region: MonitoredRegion::default(),
            scan_period: Duration::from_millis(DEFAULT_SCAN_PERIOD_MS),
        }
    }
}

/// Controls which sources the manager starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Start the button panel task.
    pub manual_enabled: bool,

    /// Start the proximity task.
    pub proximity_enabled: bool,

    /// Capacity of the shared event channel.
    pub channel_capacity: usize,

    /// Proximity monitoring parameters.
    pub monitoring: MonitoringConfig,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            manual_enabled: true,
            proximity_enabled: true,
            channel_capacity: 100,
            monitoring: MonitoringConfig::default(),
        }
    }
}

/// Statistics about registered sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerStats {
    pub button_panel_registered: bool,
    pub proximity_registered: bool,
}

/// Handle for receiving events from running trigger sources.
pub struct TriggerHandle {
    event_rx: mpsc::Receiver<TriggerEvent>,
    shutdown_tx: watch::Sender<bool>,
    tasks: JoinSet<Result<()>>,
}

impl TriggerHandle {
    /// Receive the next event from any source.
    ///
    /// Returns `None` once every source task has terminated.
    pub async fn recv(&mut self) -> Option<TriggerEvent> {
        self.event_rx.recv().await
    }

    /// Stop all sources.
    ///
    /// Signals the sources to stop (the proximity task disconnects from
    /// the radio service), waits briefly, then aborts whatever is left.
    /// Task failures are logged, never returned.
    pub async fn shutdown(mut self) -> Result<()> {
        let _ = self.shutdown_tx.send(true);

        let mut error_count = 0;
        let mut panic_count = 0;

        let drained = tokio::time::timeout(SHUTDOWN_GRACE, async {
            while let Some(result) = self.tasks.join_next().await {
                match Self::classify_task_result(result) {
                    TaskTermination::Error => error_count += 1,
                    TaskTermination::Panic => panic_count += 1,
                    TaskTermination::Success | TaskTermination::Cancelled => {}
                }
            }
        })
        .await;

        if drained.is_err() {
            debug!("Aborting {} trigger task(s) after grace period", self.tasks.len());
            self.tasks.abort_all();
            while self.tasks.join_next().await.is_some() {}
        }

        if error_count + panic_count > 0 {
            warn!(
                "Trigger sources stopped with {} error(s) and {} panic(s)",
                error_count, panic_count
            );
        } else {
            debug!("Trigger sources stopped cleanly");
        }

        Ok(())
    }

    fn classify_task_result(
        result: std::result::Result<Result<()>, tokio::task::JoinError>,
    ) -> TaskTermination {
        match result {
            Ok(Ok(())) => TaskTermination::Success,
            Ok(Err(_)) => TaskTermination::Error,
            Err(e) if e.is_cancelled() => TaskTermination::Cancelled,
            Err(_) => TaskTermination::Panic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskTermination {
    Success,
    Error,
    Cancelled,
    Panic,
}

/// Owns the trigger sources until `start()` moves them into tasks.
pub struct TriggerManager {
    button_panel: Option<AnyButtonPanel>,
    proximity: Option<AnyProximityService>,
    config: TriggerConfig,
}

impl TriggerManager {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            button_panel: None,
            proximity: None,
            config,
        }
    }

    /// Register the button panel (manual trigger source).
    pub fn register_button_panel(&mut self, panel: AnyButtonPanel) {
        self.button_panel = Some(panel);
    }

    /// Register the proximity service. Only one region is ever monitored.
    pub fn register_proximity(&mut self, service: AnyProximityService) {
        self.proximity = Some(service);
    }

    /// Check if a source is enabled in the configuration.
    pub fn is_source_enabled(&self, source: TriggerSource) -> bool {
        match source {
            TriggerSource::Manual => self.config.manual_enabled,
            TriggerSource::Proximity => self.config.proximity_enabled,
        }
    }

    pub fn get_stats(&self) -> TriggerStats {
        TriggerStats {
            button_panel_registered: self.button_panel.is_some(),
            proximity_registered: self.proximity.is_some(),
        }
    }

    /// Spawn a task per enabled, registered source and return the event handle.
    pub fn start(mut self) -> TriggerHandle {
        let (event_tx, event_rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut tasks = JoinSet::new();

        if self.config.manual_enabled
            && let Some(panel) = self.button_panel.take()
        {
            tasks.spawn(Self::manual_task(panel, event_tx.clone(), shutdown_rx.clone()));
        }

        if self.config.proximity_enabled
            && let Some(service) = self.proximity.take()
        {
            tasks.spawn(Self::proximity_task(
                service,
                self.config.monitoring.clone(),
                event_tx.clone(),
                shutdown_rx.clone(),
            ));
        }

        info!("Started {} trigger source(s)", tasks.len());

        TriggerHandle {
            event_rx,
            shutdown_tx,
            tasks,
        }
    }

    /// Forward an event, applying backpressure once if the channel is full.
    ///
    /// Returns `false` when the consumer is gone.
    async fn forward(tx: &mpsc::Sender<TriggerEvent>, event: TriggerEvent) -> bool {
        match tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tokio::time::sleep(Duration::from_millis(100)).await;
                tx.send(event).await.is_ok()
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    async fn manual_task(
        mut panel: AnyButtonPanel,
        tx: mpsc::Sender<TriggerEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        loop {
            let press = tokio::select! {
                _ = shutdown.changed() => break,
                press = panel.read_press() => press,
            };

            match press {
                Ok(press) => {
                    let event = match (press.event(), press.answer()) {
                        (Some(event), _) => TriggerEvent::trigger(event),
                        (None, Some(answer)) => TriggerEvent::payment(answer),
                        (None, None) => continue,
                    };
                    if !Self::forward(&tx, event).await {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx
                        .send(TriggerEvent::SourceError {
                            source: TriggerSource::Manual,
                            error: e.to_string(),
                        })
                        .await;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn proximity_task(
        mut service: AnyProximityService,
        monitoring: MonitoringConfig,
        tx: mpsc::Sender<TriggerEvent>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        if let Err(e) = Self::start_monitoring(&mut service, &monitoring).await {
            warn!("Proximity source unavailable: {}", e);
            let _ = tx
                .send(TriggerEvent::SourceError {
                    source: TriggerSource::Proximity,
                    error: e.to_string(),
                })
                .await;
            return Err(e);
        }

        info!(
            "Monitoring region {} ({})",
            monitoring.region.identifier, monitoring.region.proximity_uuid
        );
        let started = TriggerEvent::MonitoringStarted {
            region_id: monitoring.region.identifier.clone(),
        };

        let mut outcome = Ok(());
        if Self::forward(&tx, started).await {
            loop {
                let transition = tokio::select! {
                    _ = shutdown.changed() => break,
                    transition = service.next_transition() => transition,
                };

                match transition {
                    Ok(transition) => {
                        debug!("Region boundary crossed: {:?}", transition);
                        if !Self::forward(&tx, TriggerEvent::trigger(transition.event())).await {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = tx
                            .send(TriggerEvent::SourceError {
                                source: TriggerSource::Proximity,
                                error: e.to_string(),
                            })
                            .await;
                        outcome = Err(e);
                        break;
                    }
                }
            }
        }

        if let Err(e) = service.disconnect().await {
            warn!("Error disconnecting proximity service: {}", e);
        }
        outcome
    }

    async fn start_monitoring(
        service: &mut AnyProximityService,
        monitoring: &MonitoringConfig,
    ) -> Result<()> {
        if !service.has_radio() {
            return Err(TriggerError::RadioUnavailable);
        }
        if !service.is_radio_enabled() {
            return Err(TriggerError::RadioDisabled);
        }

        service.set_scan_period(monitoring.scan_period).await?;
        service.connect().await?;
        service.start_monitoring(&monitoring.region).await
    }
}
