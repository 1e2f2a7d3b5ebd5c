//! Lane controller.
//!
//! The single consumer of trigger events. For each [`TriggerEvent`] it
//! applies the event to the [`TollStateMachine`], renders the resulting
//! effect, and routes payment answers to the open [`PaymentFlow`].
//!
//! Because one controller owns the machine and processes events one at a
//! time, manual and proximity triggers can never interleave mid-transition.

use tollway_core::{DrivingState, LaneConfig, PaymentAnswer, Result, TollError, TollEvent};
use tollway_triggers::{TriggerEvent, TriggerHandle};
use tracing::{debug, error, info, warn};

use crate::effects::{RenderInstruction, TollPass, TransientMessage};
use crate::payment::{PaymentFlow, PaymentOutcome};
use crate::renderer::{PassImage, QrEncoder, Renderer};
use crate::state_machine::{TollStateMachine, Transition};

/// What happened to one trigger event.
#[derive(Debug)]
pub enum LaneOutcome {
    /// The event was accepted and its effect rendered.
    Applied(Transition),

    /// The event was rejected or could not be reconciled; state unchanged.
    Refused(TollError),

    /// The driver answered the payment dialog.
    PaymentResolved(PaymentOutcome),

    /// A status event with no effect on the lane state.
    Notice,
}

impl LaneOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Drives a [`TollStateMachine`] from trigger events and renders its effects.
///
/// # Examples
///
/// ```
/// use tollway_core::{DrivingState, LaneConfig, TollEvent};
/// use tollway_lane::{LaneController, MockQrEncoder, VirtualScreen};
///
/// let mut lane = LaneController::new(
///     LaneConfig::default(),
///     VirtualScreen::default(),
///     MockQrEncoder::new(),
/// );
///
/// lane.apply_event(TollEvent::EnterRequested);
/// lane.apply_event(TollEvent::UseRequested);
///
/// assert_eq!(lane.current_state(), DrivingState::OnTollway);
/// assert!(lane.renderer().pass().is_some());
/// ```
pub struct LaneController<R: Renderer, E: QrEncoder> {
    machine: TollStateMachine,
    payment: Option<PaymentFlow>,
    renderer: R,
    encoder: E,

    /// Last encoded pass, reused while the payload and size are unchanged.
    encoded: Option<(TollPass, PassImage)>,
}

impl<R: Renderer, E: QrEncoder> LaneController<R, E> {
    pub fn new(config: LaneConfig, renderer: R, encoder: E) -> Self {
        Self::with_machine(TollStateMachine::new(config), renderer, encoder)
    }

    /// Drive an existing machine, e.g. one restored with the builder.
    pub fn with_machine(machine: TollStateMachine, renderer: R, encoder: E) -> Self {
        Self {
            machine,
            payment: None,
            renderer,
            encoder,
            encoded: None,
        }
    }

    pub fn current_state(&self) -> DrivingState {
        self.machine.current_state()
    }

    pub fn machine(&self) -> &TollStateMachine {
        &self.machine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// The payment flow opened by the most recent exit, answered or not.
    pub fn payment(&self) -> Option<&PaymentFlow> {
        self.payment.as_ref()
    }

    fn config(&self) -> &LaneConfig {
        self.machine.config()
    }

    /// Handle one event from the trigger manager.
    pub fn handle(&mut self, event: TriggerEvent) -> LaneOutcome {
        match event {
            TriggerEvent::Trigger { event, source, .. } => {
                debug!(%event, %source, "Trigger received");
                self.apply_event(event)
            }
            TriggerEvent::PaymentAnswered { answer, .. } => match self.answer_payment(answer) {
                Ok(outcome) => LaneOutcome::PaymentResolved(outcome),
                Err(e) => {
                    debug!(%answer, error = %e, "Payment answer ignored");
                    LaneOutcome::Refused(e)
                }
            },
            TriggerEvent::MonitoringStarted { region_id } => {
                info!(region = %region_id, "Beacon monitoring started");
                LaneOutcome::Notice
            }
            TriggerEvent::SourceError { source, error } => {
                warn!(%source, %error, "Trigger source stopped");
                let notice = TransientMessage::notice(error, self.config());
                self.renderer.show_transient_message(&notice);
                LaneOutcome::Notice
            }
            other => {
                debug!(?other, "Ignoring trigger event");
                LaneOutcome::Notice
            }
        }
    }

    /// Apply one state machine event and render the outcome.
    pub fn apply_event(&mut self, event: TollEvent) -> LaneOutcome {
        match self.machine.apply(event) {
            Ok(transition) => {
                info!(
                    from = %transition.from,
                    to = %transition.to,
                    %event,
                    "Transition applied"
                );
                self.render(&transition);
                LaneOutcome::Applied(transition)
            }
            Err(e) if e.is_diagnostic() => {
                warn!(state = %self.current_state(), %event, "Unreconciled trigger");
                let message = TransientMessage::diagnostic(self.config());
                self.renderer.show_transient_message(&message);
                LaneOutcome::Refused(e)
            }
            Err(e) => {
                debug!(state = %self.current_state(), %event, reason = %e, "Event rejected");
                let message = TransientMessage::rejection(e.to_string(), self.config());
                self.renderer.show_transient_message(&message);
                LaneOutcome::Refused(e)
            }
        }
    }

    /// Record the driver's answer to the open payment dialog.
    ///
    /// On success the dialog is dismissed and the outcome text replaces the
    /// balance line.
    ///
    /// # Errors
    ///
    /// - `TollError::NoPendingPayment` if no exit has opened a prompt
    /// - `TollError::PaymentAlreadyResolved` if the prompt was answered
    pub fn answer_payment(&mut self, answer: PaymentAnswer) -> Result<PaymentOutcome> {
        let flow = self.payment.as_mut().ok_or(TollError::NoPendingPayment)?;
        let outcome = flow.answer(answer)?;

        info!(%answer, "Payment answered");
        self.renderer.dismiss_payment_prompt();
        self.renderer.show_balance_text(&outcome.display_text);
        Ok(outcome)
    }

    /// Consume trigger events until every source has stopped.
    pub async fn run(&mut self, triggers: &mut TriggerHandle) {
        while let Some(event) = triggers.recv().await {
            self.handle(event);
        }
        info!("Trigger stream closed");
    }

    fn render(&mut self, transition: &Transition) {
        for instruction in transition.effect.instructions() {
            match instruction {
                RenderInstruction::ShowPass(pass) => self.show_pass(&pass),
                RenderInstruction::HidePass => self.renderer.hide_pass(),
                RenderInstruction::ShowBalanceText(text) => self.renderer.show_balance_text(&text),
                RenderInstruction::HideBalanceText => self.renderer.hide_balance_text(),
                RenderInstruction::PromptPayment(prompt) => {
                    if self.payment.as_ref().is_some_and(PaymentFlow::is_pending) {
                        debug!("Replacing unanswered payment prompt");
                    }
                    self.renderer.prompt_payment(&prompt);
                    self.payment = Some(PaymentFlow::with_prompt(prompt, self.config()));
                }
                RenderInstruction::ShowTransientMessage(message) => {
                    self.renderer.show_transient_message(&message)
                }
            }
        }
    }

    /// Encode and show a pass.
    ///
    /// The transition is already committed, so an encoding failure only
    /// costs the image: it is logged and reported on screen.
    fn show_pass(&mut self, pass: &TollPass) {
        match self.encode(pass) {
            Ok(image) => self.renderer.show_pass(&image),
            Err(e) => {
                error!(payload = %pass.payload, error = %e, "Failed to encode toll pass");
                let notice = TransientMessage::notice(e.to_string(), self.config());
                self.renderer.show_transient_message(&notice);
            }
        }
    }

    fn encode(&mut self, pass: &TollPass) -> Result<PassImage> {
        if let Some((cached, image)) = &self.encoded
            && cached == pass
        {
            return Ok(image.clone());
        }

        let image = self.encoder.encode(
            &pass.payload,
            pass.size.width,
            pass.size.height,
            pass.size.margin,
        )?;
        self.encoded = Some((pass.clone(), image.clone()));
        Ok(image)
    }
}
