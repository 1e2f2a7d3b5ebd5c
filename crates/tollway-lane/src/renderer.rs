//! Contracts with the display layer.
//!
//! The lane hands finished decisions to a [`Renderer`] and delegates QR
//! pixel generation to a [`QrEncoder`]. Both run after the state machine
//! has already committed the transition.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tollway_core::{Result, TollError};

use crate::effects::{PaymentPrompt, TransientMessage};

/// An encoded toll pass image.
///
/// Opaque to the lane: only the renderer interprets `pixels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassImage {
    /// Payload the image encodes.
    pub payload: String,
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub pixels: Vec<u8>,
}

/// Turns a payload string into a QR image.
pub trait QrEncoder {
    /// Encode `payload` at the requested size.
    ///
    /// # Errors
    ///
    /// Returns `TollError::Encoding` if the payload cannot be encoded.
    fn encode(&self, payload: &str, width: u32, height: u32, margin: u32) -> Result<PassImage>;
}

/// Imperative display instructions.
///
/// Every method is fire-and-forget. `prompt_payment` only shows the
/// dialog; the answer comes back later through the button panel.
pub trait Renderer {
    fn show_pass(&mut self, image: &PassImage);

    fn hide_pass(&mut self);

    fn show_balance_text(&mut self, text: &str);

    fn hide_balance_text(&mut self);

    fn prompt_payment(&mut self, prompt: &PaymentPrompt);

    /// Close the payment dialog after it has been answered.
    fn dismiss_payment_prompt(&mut self) {}

    /// Show a rejection, diagnostic, farewell or notice.
    fn show_transient_message(&mut self, message: &TransientMessage);
}

/// Placeholder encoder for tests and the demo binary.
///
/// Produces an image whose pixel buffer is the payload bytes, so two
/// payloads never render the same. Counts how often it was called.
#[derive(Debug, Default)]
pub struct MockQrEncoder {
    calls: AtomicUsize,
    fail: bool,
}

impl MockQrEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// An encoder whose every call fails.
    pub fn failing() -> Self {
        Self {
            calls: Default::default(),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl QrEncoder for MockQrEncoder {
    fn encode(&self, payload: &str, width: u32, height: u32, margin: u32) -> Result<PassImage> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.fail {
            return Err(TollError::Encoding(format!("cannot encode {payload:?}")));
        }
        if payload.is_empty() {
            return Err(TollError::Encoding("empty payload".to_string()));
        }

        Ok(PassImage {
            payload: payload.to_string(),
            width,
            height,
            margin,
            pixels: payload.as_bytes().to_vec(),
        })
    }
}
