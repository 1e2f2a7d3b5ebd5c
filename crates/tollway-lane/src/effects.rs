//! Effect descriptors produced by accepted transitions.
//!
//! The state machine never touches the display. It returns a
//! [`TransitionEffect`] describing what must become visible, and the
//! controller turns that into [`RenderInstruction`]s for the renderer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tollway_core::{LaneConfig, QrSize};

/// The QR toll pass shown while on the tollway.
///
/// Derived from configuration, never persisted. Exists only while the
/// machine is `OnTollway`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TollPass {
    /// Payload to encode.
    pub payload: String,

    /// Rendered size and margin.
    pub size: QrSize,
}

impl TollPass {
    pub fn from_config(config: &LaneConfig) -> Self {
        Self {
            payload: config.toll_url.clone(),
            size: config.qr,
        }
    }
}

/// The payment confirmation dialog contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPrompt {
    pub title: String,
    pub message: String,
    pub fee: String,
}

impl PaymentPrompt {
    pub fn from_config(config: &LaneConfig) -> Self {
        Self {
            title: config.payment_title.clone(),
            message: config.payment_message(),
            fee: config.fee.clone(),
        }
    }
}

/// How prominently a transient message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A rejected manual action.
    Rejection,

    /// Trigger sources disagree about the vehicle's position.
    Diagnostic,

    /// Leaving the beacon region while already off the tollway.
    Farewell,

    /// Status from a trigger source (radio missing, disabled, ...).
    Notice,
}

/// A short-lived message overlaid on the lane display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientMessage {
    pub text: String,
    pub kind: MessageKind,
    pub duration: Duration,
}

impl TransientMessage {
    /// Short message for a rejected action.
    pub fn rejection(text: impl Into<String>, config: &LaneConfig) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Rejection,
            duration: config.short_message_duration(),
        }
    }

    /// Long message for an unreconciled trigger.
    pub fn diagnostic(config: &LaneConfig) -> Self {
        Self {
            text: config.diagnostic_text.clone(),
            kind: MessageKind::Diagnostic,
            duration: config.long_message_duration(),
        }
    }

    /// Long message for the region-exit farewell.
    pub fn farewell(config: &LaneConfig) -> Self {
        Self {
            text: config.farewell_text.clone(),
            kind: MessageKind::Farewell,
            duration: config.long_message_duration(),
        }
    }

    /// Long message about a trigger source's status.
    pub fn notice(text: impl Into<String>, config: &LaneConfig) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Notice,
            duration: config.long_message_duration(),
        }
    }
}

/// What the renderer must display after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionEffect {
    /// Arrived at the entrance: hide any pass, show the wallet balance.
    EnterTollway { balance_text: String },

    /// Driving the tollway: show the new pass and the scan instruction.
    DriveTollway { pass: TollPass, scan_text: String },

    /// Normal exit: show the pass one last time and ask for payment.
    ExitTollway { pass: TollPass, prompt: PaymentPrompt },

    /// Left the beacon region while off the tollway: clear the display.
    Farewell { message: TransientMessage },
}

impl TransitionEffect {
    /// Expand the effect into renderer instructions, in display order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tollway_lane::effects::{RenderInstruction, TransitionEffect};
    ///
    /// let effect = TransitionEffect::EnterTollway {
    ///     balance_text: "You have Php 345.00 left on your wallet.".to_string(),
    /// };
    ///
    /// assert_eq!(
    ///     effect.instructions(),
    ///     vec![
    ///         RenderInstruction::HidePass,
    ///         RenderInstruction::ShowBalanceText("You have Php 345.00 left on your wallet.".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn instructions(&self) -> Vec<RenderInstruction> {
        match self {
            Self::EnterTollway { balance_text } => vec![
                RenderInstruction::HidePass,
                RenderInstruction::ShowBalanceText(balance_text.clone()),
            ],
            Self::DriveTollway { pass, scan_text } => vec![
                RenderInstruction::ShowPass(pass.clone()),
                RenderInstruction::ShowBalanceText(scan_text.clone()),
            ],
            Self::ExitTollway { pass, prompt } => vec![
                RenderInstruction::ShowPass(pass.clone()),
                RenderInstruction::PromptPayment(prompt.clone()),
            ],
            Self::Farewell { message } => vec![
                RenderInstruction::ShowTransientMessage(message.clone()),
                RenderInstruction::HidePass,
                RenderInstruction::HideBalanceText,
            ],
        }
    }

    /// The pass this effect displays, if any.
    pub fn pass(&self) -> Option<&TollPass> {
        match self {
            Self::DriveTollway { pass, .. } | Self::ExitTollway { pass, .. } => Some(pass),
            Self::EnterTollway { .. } | Self::Farewell { .. } => None,
        }
    }

    /// Whether this effect opens the payment confirmation flow.
    pub fn opens_payment(&self) -> bool {
        matches!(self, Self::ExitTollway { .. })
    }
}

/// One imperative display instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderInstruction {
    ShowPass(TollPass),
    HidePass,
    ShowBalanceText(String),
    HideBalanceText,
    PromptPayment(PaymentPrompt),
    ShowTransientMessage(TransientMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toll_pass_from_default_config() {
        let pass = TollPass::from_config(&LaneConfig::default());
        assert_eq!(pass.payload, "http://www.codewisp.com/");
        assert_eq!(pass.size.width, 400);
        assert_eq!(pass.size.height, 400);
        assert_eq!(pass.size.margin, 0);
    }

    #[test]
    fn test_payment_prompt_from_default_config() {
        let prompt = PaymentPrompt::from_config(&LaneConfig::default());
        assert_eq!(prompt.title, "Pay with your wallet?");
        assert_eq!(
            prompt.message,
            "Thank you for using the tollway. Pay Php 118.00 with your wallet?"
        );
        assert_eq!(prompt.fee, "Php 118.00");
    }

    #[test]
    fn test_drive_instructions_show_pass_then_text() {
        let config = LaneConfig::default();
        let effect = TransitionEffect::DriveTollway {
            pass: TollPass::from_config(&config),
            scan_text: config.scan_text.clone(),
        };

        let instructions = effect.instructions();
        assert_eq!(instructions.len(), 2);
        assert!(matches!(instructions[0], RenderInstruction::ShowPass(_)));
        assert_eq!(
            instructions[1],
            RenderInstruction::ShowBalanceText("Scan this QR code when you exit.".to_string())
        );
        assert!(effect.pass().is_some());
        assert!(!effect.opens_payment());
    }

    #[test]
    fn test_exit_instructions_prompt_payment() {
        let config = LaneConfig::default();
        let effect = TransitionEffect::ExitTollway {
            pass: TollPass::from_config(&config),
            prompt: PaymentPrompt::from_config(&config),
        };

        let instructions = effect.instructions();
        assert!(matches!(instructions[0], RenderInstruction::ShowPass(_)));
        assert!(matches!(instructions[1], RenderInstruction::PromptPayment(_)));
        assert!(effect.opens_payment());
    }

    #[test]
    fn test_farewell_hides_everything() {
        let config = LaneConfig::default();
        let effect = TransitionEffect::Farewell {
            message: TransientMessage::farewell(&config),
        };

        let instructions = effect.instructions();
        assert_eq!(
            instructions[0],
            RenderInstruction::ShowTransientMessage(TransientMessage {
                text: "Bye!".to_string(),
                kind: MessageKind::Farewell,
                duration: Duration::from_millis(3500),
            })
        );
        assert_eq!(instructions[1], RenderInstruction::HidePass);
        assert_eq!(instructions[2], RenderInstruction::HideBalanceText);
        assert!(effect.pass().is_none());
    }

    #[test]
    fn test_rejection_message_is_short() {
        let config = LaneConfig::default();
        let message = TransientMessage::rejection("nope", &config);
        assert_eq!(message.kind, MessageKind::Rejection);
        assert_eq!(message.duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_effect_serialization_is_tagged() {
        let effect = TransitionEffect::EnterTollway {
            balance_text: "x".to_string(),
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["kind"], "enter_tollway");
        assert_eq!(json["balance_text"], "x");
    }
}
