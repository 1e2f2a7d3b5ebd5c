//! Toll lane logic.
//!
//! This crate contains the lane state machine, the effects it produces,
//! the payment confirmation flow, and the controller that applies trigger
//! events and drives a [`Renderer`].

pub mod controller;
pub mod effects;
pub mod payment;
pub mod renderer;
pub mod screen;
pub mod state_machine;

pub use controller::{LaneController, LaneOutcome};
pub use effects::{
    MessageKind, PaymentPrompt, RenderInstruction, TollPass, TransientMessage, TransitionEffect,
};
pub use payment::{PaymentFlow, PaymentOutcome};
pub use renderer::{MockQrEncoder, PassImage, QrEncoder, Renderer};
pub use screen::{Alignment, VirtualScreen, align_text, truncate_text};
pub use state_machine::{Resolution, TollStateMachine, TollStateMachineBuilder, Transition};
