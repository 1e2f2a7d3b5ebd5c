//! Scenario tests for the lane controller.
//!
//! Each test drives a full lane (state machine, payment flow, screen) through
//! a sequence a driver could actually produce.

mod common;

use tollway_core::DrivingState::*;
use tollway_core::TollEvent::*;
use tollway_core::{LaneConfig, PaymentAnswer, TollError, TollEvent};
use tollway_lane::{LaneOutcome, MessageKind, TransitionEffect};

#[test]
fn test_manual_round_trip_with_payment() {
    let mut lane = common::lane();

    lane.apply_event(EnterRequested);
    assert_eq!(lane.current_state(), OnEntrance);
    assert_eq!(
        lane.renderer().balance_text(),
        Some("You have Php 345.00 left on your wallet.")
    );

    lane.apply_event(UseRequested);
    assert_eq!(lane.current_state(), OnTollway);
    assert!(lane.renderer().pass().is_some());

    lane.apply_event(ExitRequested);
    assert_eq!(lane.current_state(), OffTollway);
    assert!(lane.renderer().payment_prompt().is_some());

    let outcome = lane.answer_payment(PaymentAnswer::Accept).unwrap();
    assert_eq!(outcome.display_text, "Thank you for using the tollway!");
    assert_eq!(lane.machine().history().len(), 3);
}

#[test]
fn test_use_before_enter_is_rejected() {
    let mut lane = common::lane();

    let outcome = lane.apply_event(UseRequested);
    match outcome {
        LaneOutcome::Refused(TollError::Rejected { state, event, .. }) => {
            assert_eq!(state, OffTollway);
            assert_eq!(event, UseRequested);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    assert_eq!(lane.current_state(), OffTollway);
    assert!(lane.renderer().pass().is_none());
    assert_eq!(
        lane.renderer().transient_message().unwrap().text,
        "You need to use the entrance to drive through the tollway!"
    );
}

#[test]
fn test_beacon_entry_from_off_tollway() {
    let mut lane = common::lane();

    let outcome = lane.apply_event(RegionEntered);
    match outcome {
        LaneOutcome::Applied(transition) => {
            assert_eq!(transition.to, OnEntrance);
            assert!(matches!(
                transition.effect,
                TransitionEffect::EnterTollway { .. }
            ));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_beacon_entry_on_ramp_is_diagnostic() {
    let mut lane = common::lane();
    lane.apply_event(EnterRequested);

    let outcome = lane.apply_event(RegionEntered);
    assert!(matches!(
        outcome,
        LaneOutcome::Refused(TollError::Unreconciled { .. })
    ));
    assert_eq!(lane.current_state(), OnEntrance);

    let message = lane.renderer().transient_message().unwrap();
    assert_eq!(message.kind, MessageKind::Diagnostic);
    assert_eq!(message.text, "Whut");
}

#[test]
fn test_beacon_exit_on_tollway_is_diagnostic() {
    let mut lane = common::lane();
    lane.apply_event(EnterRequested);
    lane.apply_event(UseRequested);

    lane.apply_event(RegionExited);
    assert_eq!(lane.current_state(), OnTollway);
    assert!(lane.renderer().pass().is_some());
    assert_eq!(
        lane.renderer().transient_message().unwrap().kind,
        MessageKind::Diagnostic
    );
}

#[test]
fn test_beacon_round_trip_opens_payment() {
    let mut lane = common::lane();

    lane.apply_event(RegionEntered);
    lane.apply_event(RegionExited);
    assert_eq!(lane.current_state(), OnTollway);

    lane.apply_event(RegionEntered);
    assert_eq!(lane.current_state(), OffTollway);
    assert!(lane.payment().unwrap().is_pending());

    let outcome = lane.answer_payment(PaymentAnswer::Decline).unwrap();
    assert_eq!(outcome.display_text, "Please proceed to the counter to pay.");
    assert_eq!(lane.current_state(), OffTollway);
}

#[test]
fn test_farewell_after_exit() {
    let mut lane = common::lane();
    for event in [RegionEntered, RegionExited, RegionEntered] {
        lane.apply_event(event);
    }
    lane.answer_payment(PaymentAnswer::Accept).unwrap();

    let outcome = lane.apply_event(RegionExited);
    match outcome {
        LaneOutcome::Applied(transition) => assert!(!transition.is_state_change()),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let screen = lane.renderer();
    assert!(screen.pass().is_none());
    assert!(screen.balance_text().is_none());
    assert_eq!(screen.transient_message().unwrap().text, "Bye!");
    assert_eq!(lane.current_state(), OffTollway);
}

#[test]
fn test_new_exit_replaces_unanswered_prompt() {
    let mut lane = common::lane();
    for event in [EnterRequested, UseRequested, ExitRequested] {
        lane.apply_event(event);
    }
    // Drive through again without answering the first prompt
    for event in [EnterRequested, UseRequested, ExitRequested] {
        lane.apply_event(event);
    }

    assert!(lane.payment().unwrap().is_pending());
    lane.answer_payment(PaymentAnswer::Accept).unwrap();
    assert!(matches!(
        lane.answer_payment(PaymentAnswer::Accept),
        Err(TollError::PaymentAlreadyResolved)
    ));
}

#[test]
fn test_rejections_leave_history_untouched() {
    let mut lane = common::lane();
    for event in [UseRequested, ExitRequested, RegionExited] {
        lane.apply_event(event);
    }

    assert_eq!(lane.current_state(), OffTollway);
    assert!(lane.machine().history().is_empty());
}

#[test]
fn test_custom_configuration_flows_to_screen() {
    let config = LaneConfig::from_toml_str(
        r#"
        toll_url = "https://toll.example/lane/7"
        fee = "Php 60.00"

        [qr]
        width = 256
        height = 256
        margin = 4
        "#,
    )
    .unwrap();
    let mut lane = common::lane_with(config);

    for event in [TollEvent::EnterRequested, UseRequested, ExitRequested] {
        lane.apply_event(event);
    }

    let pass = lane.renderer().pass().unwrap();
    assert_eq!(pass.payload, "https://toll.example/lane/7");
    assert_eq!((pass.width, pass.height, pass.margin), (256, 256, 4));
    assert_eq!(
        lane.renderer().payment_prompt().unwrap().message,
        "Thank you for using the tollway. Pay Php 60.00 with your wallet?"
    );
}
