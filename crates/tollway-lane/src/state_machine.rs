//! Toll lane state machine.
//!
//! Owns the single authoritative [`DrivingState`] and reconciles the two
//! trigger sources against it. Every event goes through
//! [`TollStateMachine::apply`], which either returns the accepted
//! [`Transition`] together with its effect, or an error describing why the
//! event was refused. Nothing else mutates the state.
//!
//! # States
//!
//! - `OffTollway`: initial; no pass.
//! - `OnEntrance`: on the ramp; wallet balance shown.
//! - `OnTollway`: toll pass issued and shown.
//!
//! # Transition table
//!
//! | State      | Event          | Result                          |
//! |------------|----------------|---------------------------------|
//! | OffTollway | EnterRequested | → OnEntrance                    |
//! | OnEntrance | UseRequested   | → OnTollway                     |
//! | OnTollway  | ExitRequested  | → OffTollway                    |
//! | OffTollway | RegionEntered  | → OnEntrance                    |
//! | OnTollway  | RegionEntered  | → OffTollway                    |
//! | OnEntrance | RegionEntered  | unreconciled, state held        |
//! | OnEntrance | RegionExited   | → OnTollway                     |
//! | OffTollway | RegionExited   | farewell, state held            |
//! | OnTollway  | RegionExited   | unreconciled, state held        |
//!
//! Any other manual event is rejected with that event's message.
//!
//! The beacon marks a single physical gate used in both directions, so a
//! region event means "entering" when off the tollway and "leaving" when on
//! it. Mid-ramp it has no meaning and must not move the state.
//!
//! # Examples
//!
//! ```
//! use tollway_core::{DrivingState, LaneConfig, TollEvent};
//! use tollway_lane::TollStateMachine;
//!
//! let mut machine = TollStateMachine::new(LaneConfig::default());
//! assert_eq!(machine.current_state(), DrivingState::OffTollway);
//!
//! machine.apply(TollEvent::EnterRequested).unwrap();
//! machine.apply(TollEvent::UseRequested).unwrap();
//! assert_eq!(machine.current_state(), DrivingState::OnTollway);
//! assert!(machine.active_pass().is_some());
//!
//! // Entering again while on the tollway is refused
//! let refused = machine.apply(TollEvent::EnterRequested).unwrap_err();
//! assert_eq!(refused.to_string(), "You need to be off the tollway to enter!");
//! ```

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tollway_core::constants::{ENTER_REJECTED, EXIT_REJECTED, USE_REJECTED};
use tollway_core::{DrivingState, LaneConfig, Result, TollError, TollEvent};

use crate::effects::{PaymentPrompt, TollPass, TransientMessage, TransitionEffect};

/// Maximum number of state changes kept in history.
const MAX_HISTORY_SIZE: usize = 100;

/// Outcome of looking up `(state, event)` in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Accepted; move to the given state.
    Move(DrivingState),

    /// Accepted without a state change; clear the display.
    Farewell,

    /// Manual event in the wrong state, with the text shown to the driver.
    Reject(&'static str),

    /// Proximity event with no interpretation in this state.
    Unreconciled,
}

/// Look up `event` in the transition table for `state`.
///
/// Pure and total: every `(state, event)` pair has exactly one resolution.
///
/// # Examples
///
/// ```
/// use tollway_core::{DrivingState, TollEvent};
/// use tollway_lane::state_machine::{resolve, Resolution};
///
/// assert_eq!(
///     resolve(DrivingState::OnTollway, TollEvent::RegionEntered),
///     Resolution::Move(DrivingState::OffTollway)
/// );
/// assert_eq!(
///     resolve(DrivingState::OnEntrance, TollEvent::RegionEntered),
///     Resolution::Unreconciled
/// );
/// ```
pub fn resolve(state: DrivingState, event: TollEvent) -> Resolution {
    use tollway_core::DrivingState::*;
    use tollway_core::TollEvent::*;

    match (state, event) {
        (OffTollway, EnterRequested) => Resolution::Move(OnEntrance),
        (OnEntrance, UseRequested) => Resolution::Move(OnTollway),
        (OnTollway, ExitRequested) => Resolution::Move(OffTollway),
        (_, EnterRequested) => Resolution::Reject(ENTER_REJECTED),
        (_, UseRequested) => Resolution::Reject(USE_REJECTED),
        (_, ExitRequested) => Resolution::Reject(EXIT_REJECTED),

        (OffTollway, RegionEntered) => Resolution::Move(OnEntrance),
        (OnTollway, RegionEntered) => Resolution::Move(OffTollway),
        (OnEntrance, RegionEntered) => Resolution::Unreconciled,

        (OnEntrance, RegionExited) => Resolution::Move(OnTollway),
        (OffTollway, RegionExited) => Resolution::Farewell,
        (OnTollway, RegionExited) => Resolution::Unreconciled,
    }
}

/// An accepted event and the effect it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// State before the event.
    pub from: DrivingState,

    /// State after the event. Equal to `from` for a farewell.
    pub to: DrivingState,

    /// The event that was applied.
    pub event: TollEvent,

    /// What the renderer must display.
    pub effect: TransitionEffect,

    /// When the event was applied.
    pub applied_at: DateTime<Utc>,
}

impl Transition {
    fn new(from: DrivingState, to: DrivingState, event: TollEvent, effect: TransitionEffect) -> Self {
        Self {
            from,
            to,
            event,
            effect,
            applied_at: Utc::now(),
        }
    }

    /// Whether the driving state actually changed.
    pub fn is_state_change(&self) -> bool {
        self.from != self.to
    }
}

/// The toll lane state machine.
///
/// Not thread-safe: a single consumer applies events one at a
/// time (see [`LaneController`](crate::LaneController)).
#[derive(Debug)]
pub struct TollStateMachine {
    current_state: DrivingState,

    /// Pass issued on entering `OnTollway`, discarded on leaving.
    active_pass: Option<TollPass>,

    /// State changes, oldest first, bounded by `MAX_HISTORY_SIZE`.
    history: VecDeque<Transition>,

    config: LaneConfig,
}

impl TollStateMachine {
    /// Create a machine in `OffTollway`.
    pub fn new(config: LaneConfig) -> Self {
        Self {
            current_state: DrivingState::OffTollway,
            active_pass: None,
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
            config,
        }
    }

    pub fn builder() -> TollStateMachineBuilder {
        TollStateMachineBuilder::default()
    }

    pub fn current_state(&self) -> DrivingState {
        self.current_state
    }

    /// The toll pass, present only while `OnTollway`.
    pub fn active_pass(&self) -> Option<&TollPass> {
        self.active_pass.as_ref()
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    /// State changes, ordered from oldest to newest.
    ///
    /// Farewells are not recorded since they do not change state.
    pub fn history(&self) -> &VecDeque<Transition> {
        &self.history
    }

    /// Get the last `count` state changes, oldest first.
    pub fn last_transitions(&self, count: usize) -> Vec<Transition> {
        self.history
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }

    /// Apply one event.
    ///
    /// This is the only way the driving state changes. On success the state
    /// has already been updated and the returned transition carries the
    /// effect to render.
    ///
    /// # Errors
    ///
    /// - `TollError::Rejected` for a manual event in the wrong state
    /// - `TollError::Unreconciled` for a region event while `OnEntrance`
    ///   (`RegionEntered`) or `OnTollway` (`RegionExited`)
    ///
    /// In both cases the state is left untouched.
    pub fn apply(&mut self, event: TollEvent) -> Result<Transition> {
        let from = self.current_state;

        match resolve(from, event) {
            Resolution::Reject(message) => Err(TollError::rejected(from, event, message)),
            Resolution::Unreconciled => Err(TollError::unreconciled(from, event)),
            Resolution::Farewell => {
                let effect = TransitionEffect::Farewell {
                    message: TransientMessage::farewell(&self.config),
                };
                Ok(Transition::new(from, from, event, effect))
            }
            Resolution::Move(to) => {
                let effect = self.enter(to);
                let transition = Transition::new(from, to, event, effect);
                self.add_to_history(transition.clone());
                Ok(transition)
            }
        }
    }

    /// Force the machine back to `OffTollway`, discarding any pass.
    ///
    /// For host restarts; produces no effect and no history entry.
    pub fn reset(&mut self) {
        self.current_state = DrivingState::OffTollway;
        self.active_pass = None;
    }

    /// Switch to `to` and build the effect for arriving there.
    fn enter(&mut self, to: DrivingState) -> TransitionEffect {
        self.current_state = to;

        match to {
            DrivingState::OnEntrance => {
                self.active_pass = None;
                TransitionEffect::EnterTollway {
                    balance_text: self.config.balance_text.clone(),
                }
            }
            DrivingState::OnTollway => {
                let pass = TollPass::from_config(&self.config);
                self.active_pass = Some(pass.clone());
                TransitionEffect::DriveTollway {
                    pass,
                    scan_text: self.config.scan_text.clone(),
                }
            }
            DrivingState::OffTollway => {
                // Only reachable from OnTollway, which always holds a pass
                let pass = self
                    .active_pass
                    .take()
                    .unwrap_or_else(|| TollPass::from_config(&self.config));
                TransitionEffect::ExitTollway {
                    pass,
                    prompt: PaymentPrompt::from_config(&self.config),
                }
            }
        }
    }

    fn add_to_history(&mut self, transition: Transition) {
        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for TollStateMachine {
    fn default() -> Self {
        Self::new(LaneConfig::default())
    }
}

/// Builder for restoring a machine into a specific state.
///
/// # Examples
///
/// ```
/// use tollway_core::DrivingState;
/// use tollway_lane::TollStateMachine;
///
/// let machine = TollStateMachine::builder()
///     .with_initial_state(DrivingState::OnTollway)
///     .build();
///
/// assert_eq!(machine.current_state(), DrivingState::OnTollway);
/// assert!(machine.active_pass().is_some());
/// ```
#[derive(Debug, Default)]
pub struct TollStateMachineBuilder {
    initial_state: DrivingState,
    history: VecDeque<Transition>,
    config: LaneConfig,
}

impl TollStateMachineBuilder {
    pub fn with_initial_state(mut self, state: DrivingState) -> Self {
        self.initial_state = state;
        self
    }

    /// Pre-populate history. Entries beyond the size limit are dropped, oldest first.
    pub fn with_history(mut self, history: VecDeque<Transition>) -> Self {
        self.history = history;
        self
    }

    pub fn with_config(mut self, config: LaneConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(mut self) -> TollStateMachine {
        while self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }

        let active_pass = (self.initial_state == DrivingState::OnTollway)
            .then(|| TollPass::from_config(&self.config));

        TollStateMachine {
            current_state: self.initial_state,
            active_pass,
            history: self.history,
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tollway_core::DrivingState::*;
    use tollway_core::TollEvent::*;

    fn machine_in(state: DrivingState) -> TollStateMachine {
        TollStateMachine::builder().with_initial_state(state).build()
    }

    #[test]
    fn test_new_machine_starts_off_tollway() {
        let machine = TollStateMachine::default();
        assert_eq!(machine.current_state(), OffTollway);
        assert!(machine.active_pass().is_none());
        assert!(machine.history().is_empty());
    }

    #[rstest]
    #[case(OffTollway, EnterRequested, OnEntrance)]
    #[case(OnEntrance, UseRequested, OnTollway)]
    #[case(OnTollway, ExitRequested, OffTollway)]
    #[case(OffTollway, RegionEntered, OnEntrance)]
    #[case(OnTollway, RegionEntered, OffTollway)]
    #[case(OnEntrance, RegionExited, OnTollway)]
    fn test_accepted_transitions(
        #[case] from: DrivingState,
        #[case] event: TollEvent,
        #[case] to: DrivingState,
    ) {
        let mut machine = machine_in(from);
        let transition = machine.apply(event).unwrap();

        assert_eq!(transition.from, from);
        assert_eq!(transition.to, to);
        assert_eq!(transition.event, event);
        assert!(transition.is_state_change());
        assert_eq!(machine.current_state(), to);
    }

    #[rstest]
    #[case(OnEntrance, EnterRequested, "You need to be off the tollway to enter!")]
    #[case(OnTollway, EnterRequested, "You need to be off the tollway to enter!")]
    #[case(
        OffTollway,
        UseRequested,
        "You need to use the entrance to drive through the tollway!"
    )]
    #[case(
        OnTollway,
        UseRequested,
        "You need to use the entrance to drive through the tollway!"
    )]
    #[case(OffTollway, ExitRequested, "You need to be using the tollway to exit")]
    #[case(OnEntrance, ExitRequested, "You need to be using the tollway to exit")]
    fn test_rejected_manual_events(
        #[case] state: DrivingState,
        #[case] event: TollEvent,
        #[case] message: &str,
    ) {
        let mut machine = machine_in(state);
        let error = machine.apply(event).unwrap_err();

        assert!(matches!(error, TollError::Rejected { .. }));
        assert!(!error.is_diagnostic());
        assert_eq!(error.to_string(), message);
        assert_eq!(machine.current_state(), state);
        assert!(machine.history().is_empty());
    }

    #[rstest]
    #[case(OnEntrance, RegionEntered)]
    #[case(OnTollway, RegionExited)]
    fn test_unreconciled_region_events(#[case] state: DrivingState, #[case] event: TollEvent) {
        let mut machine = machine_in(state);
        let error = machine.apply(event).unwrap_err();

        assert!(error.is_diagnostic());
        assert!(!matches!(error, TollError::Rejected { .. }));
        assert_eq!(machine.current_state(), state);
    }

    #[test]
    fn test_region_exit_off_tollway_is_farewell() {
        let mut machine = TollStateMachine::default();
        let transition = machine.apply(RegionExited).unwrap();

        assert_eq!(transition.from, OffTollway);
        assert_eq!(transition.to, OffTollway);
        assert!(!transition.is_state_change());
        assert!(matches!(transition.effect, TransitionEffect::Farewell { .. }));
        assert_eq!(machine.current_state(), OffTollway);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_region_events_are_never_rejected() {
        for state in DrivingState::ALL {
            for event in [RegionEntered, RegionExited] {
                assert!(!matches!(resolve(state, event), Resolution::Reject(_)));
            }
        }
    }

    #[rstest]
    #[case(OnTollway, EnterRequested, ENTER_REJECTED)]
    #[case(OffTollway, UseRequested, USE_REJECTED)]
    #[case(OnEntrance, ExitRequested, EXIT_REJECTED)]
    fn test_resolve_carries_rejection_text(
        #[case] state: DrivingState,
        #[case] event: TollEvent,
        #[case] message: &'static str,
    ) {
        assert_eq!(resolve(state, event), Resolution::Reject(message));
    }

    #[test]
    fn test_manual_round_trip() {
        let mut machine = TollStateMachine::default();

        let enter = machine.apply(EnterRequested).unwrap();
        let drive = machine.apply(UseRequested).unwrap();
        let exit = machine.apply(ExitRequested).unwrap();

        assert_eq!(machine.current_state(), OffTollway);
        assert_eq!(machine.history().len(), 3);

        assert!(matches!(enter.effect, TransitionEffect::EnterTollway { .. }));
        assert!(matches!(drive.effect, TransitionEffect::DriveTollway { .. }));
        assert!(matches!(exit.effect, TransitionEffect::ExitTollway { .. }));
    }

    #[test]
    fn test_enter_effect_carries_balance() {
        let mut machine = TollStateMachine::default();
        let transition = machine.apply(EnterRequested).unwrap();

        assert_eq!(
            transition.effect,
            TransitionEffect::EnterTollway {
                balance_text: "You have Php 345.00 left on your wallet.".to_string()
            }
        );
    }

    #[test]
    fn test_pass_lives_only_while_on_tollway() {
        let mut machine = TollStateMachine::default();

        machine.apply(EnterRequested).unwrap();
        assert!(machine.active_pass().is_none());

        let drive = machine.apply(UseRequested).unwrap();
        let issued = machine.active_pass().cloned().unwrap();
        assert_eq!(drive.effect.pass(), Some(&issued));
        assert_eq!(issued.payload, "http://www.codewisp.com/");

        let exit = machine.apply(ExitRequested).unwrap();
        assert!(machine.active_pass().is_none());
        assert_eq!(exit.effect.pass(), Some(&issued));
    }

    #[test]
    fn test_beacon_round_trip() {
        let mut machine = TollStateMachine::default();

        machine.apply(RegionEntered).unwrap();
        machine.apply(RegionExited).unwrap();
        assert_eq!(machine.current_state(), OnTollway);

        let exit = machine.apply(RegionEntered).unwrap();
        assert!(exit.effect.opens_payment());
        assert_eq!(machine.current_state(), OffTollway);
    }

    #[test]
    fn test_mixed_sources_round_trip() {
        let mut machine = TollStateMachine::default();

        machine.apply(RegionEntered).unwrap();
        machine.apply(UseRequested).unwrap();
        machine.apply(ExitRequested).unwrap();

        assert_eq!(machine.current_state(), OffTollway);
        assert_eq!(machine.history().len(), 3);
    }

    #[test]
    fn test_repeated_rejection_is_idempotent() {
        let mut machine = TollStateMachine::default();
        for _ in 0..10 {
            assert!(machine.apply(ExitRequested).is_err());
        }
        assert_eq!(machine.current_state(), OffTollway);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn test_last_transitions_returns_most_recent() {
        let mut machine = TollStateMachine::default();
        machine.apply(EnterRequested).unwrap();
        machine.apply(UseRequested).unwrap();
        machine.apply(ExitRequested).unwrap();

        let last_two = machine.last_transitions(2);
        assert_eq!(last_two.len(), 2);
        assert_eq!(last_two[0].from, OnEntrance);
        assert_eq!(last_two[1].from, OnTollway);
    }

    #[test]
    fn test_history_size_limit() {
        let mut machine = TollStateMachine::default();
        for _ in 0..50 {
            machine.apply(EnterRequested).unwrap();
            machine.apply(UseRequested).unwrap();
            machine.apply(ExitRequested).unwrap();
        }

        assert_eq!(machine.history().len(), MAX_HISTORY_SIZE);
        assert_eq!(machine.history().back().unwrap().to, OffTollway);
    }

    #[test]
    fn test_reset_discards_pass() {
        let mut machine = machine_in(OnTollway);
        assert!(machine.active_pass().is_some());

        machine.reset();
        assert_eq!(machine.current_state(), OffTollway);
        assert!(machine.active_pass().is_none());
    }

    #[test]
    fn test_builder_uses_config() {
        let config = LaneConfig {
            toll_url: "https://toll.example/lane/4".to_string(),
            ..LaneConfig::default()
        };
        let machine = TollStateMachine::builder()
            .with_config(config)
            .with_initial_state(OnTollway)
            .build();

        assert_eq!(
            machine.active_pass().unwrap().payload,
            "https://toll.example/lane/4"
        );
    }

    #[test]
    fn test_builder_trims_history() {
        let mut machine = TollStateMachine::default();
        for _ in 0..40 {
            machine.apply(EnterRequested).unwrap();
            machine.apply(UseRequested).unwrap();
            machine.apply(ExitRequested).unwrap();
        }
        let mut history = machine.history().clone();
        history.extend(machine.history().iter().take(20).cloned());

        let restored = TollStateMachine::builder().with_history(history).build();
        assert_eq!(restored.history().len(), MAX_HISTORY_SIZE);
    }
}
