//! Payment confirmation flow.
//!
//! Opened once per normal exit from the tollway. The driver answers Yes
//! (pay with the wallet) or No (pay at the counter); either answer is
//! final. The flow never touches the driving state, which is already
//! `OffTollway` by the time the prompt is shown.

use serde::{Deserialize, Serialize};
use tollway_core::{LaneConfig, PaymentAnswer, Result, TollError};

use crate::effects::PaymentPrompt;

/// Result of an answered payment prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub answer: PaymentAnswer,

    /// Text to show in place of the balance.
    pub display_text: String,
}

/// One open payment prompt.
///
/// # Examples
///
/// ```
/// use tollway_core::{LaneConfig, PaymentAnswer};
/// use tollway_lane::PaymentFlow;
///
/// let mut flow = PaymentFlow::open(&LaneConfig::default());
/// assert!(flow.is_pending());
///
/// let outcome = flow.answer(PaymentAnswer::Decline).unwrap();
/// assert_eq!(outcome.display_text, "Please proceed to the counter to pay.");
///
/// // Answers are final
/// assert!(flow.answer(PaymentAnswer::Accept).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PaymentFlow {
    prompt: PaymentPrompt,
    paid_text: String,
    pay_at_counter_text: String,
    outcome: Option<PaymentOutcome>,
}

impl PaymentFlow {
    /// Open a prompt using the configured texts and fee.
    pub fn open(config: &LaneConfig) -> Self {
        Self::with_prompt(PaymentPrompt::from_config(config), config)
    }

    /// Open a flow for an already-built prompt.
    pub fn with_prompt(prompt: PaymentPrompt, config: &LaneConfig) -> Self {
        Self {
            prompt,
            paid_text: config.paid_text.clone(),
            pay_at_counter_text: config.pay_at_counter_text.clone(),
            outcome: None,
        }
    }

    pub fn prompt(&self) -> &PaymentPrompt {
        &self.prompt
    }

    /// Whether the driver has yet to answer.
    pub fn is_pending(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn outcome(&self) -> Option<&PaymentOutcome> {
        self.outcome.as_ref()
    }

    /// Record the driver's answer.
    ///
    /// # Errors
    ///
    /// Returns `TollError::PaymentAlreadyResolved` if the prompt was already
    /// answered; the first answer stands.
    pub fn answer(&mut self, answer: PaymentAnswer) -> Result<PaymentOutcome> {
        if self.outcome.is_some() {
            return Err(TollError::PaymentAlreadyResolved);
        }

        let display_text = match answer {
            PaymentAnswer::Accept => self.paid_text.clone(),
            PaymentAnswer::Decline => self.pay_at_counter_text.clone(),
        };
        let outcome = PaymentOutcome {
            answer,
            display_text,
        };

        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }
}
