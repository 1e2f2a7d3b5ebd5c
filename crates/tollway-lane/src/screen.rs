//! Virtual lane screen.
//!
//! An in-memory [`Renderer`] that tracks what a driver would currently see:
//! the toll pass, the balance line, the payment dialog and the latest
//! transient message. Transient messages expire after their duration and are
//! cleared by [`VirtualScreen::update`], the same way a toast disappears.
//!
//! # Examples
//!
//! ```
//! use tollway_lane::{Renderer, VirtualScreen};
//!
//! let mut screen = VirtualScreen::new(40);
//! screen.show_balance_text("You have Php 345.00 left on your wallet.");
//!
//! assert_eq!(
//!     screen.balance_text(),
//!     Some("You have Php 345.00 left on your wallet.")
//! );
//! assert!(screen.pass().is_none());
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use crate::effects::{PaymentPrompt, TransientMessage};
use crate::renderer::{PassImage, Renderer};

/// Default width of [`VirtualScreen::render_lines`] output.
const DEFAULT_COLUMNS: usize = 60;

/// Maximum number of transient messages kept in the log.
const MAX_MESSAGE_LOG: usize = 100;

/// Text alignment within a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// In-memory lane display.
#[derive(Debug, Clone)]
pub struct VirtualScreen {
    columns: usize,
    pass: Option<PassImage>,
    balance_text: Option<String>,
    payment_prompt: Option<PaymentPrompt>,

    /// Latest transient message with its expiration time.
    transient: Option<(TransientMessage, Instant)>,

    /// Recent transient messages, oldest first, bounded by `MAX_MESSAGE_LOG`.
    message_log: VecDeque<TransientMessage>,
}

impl VirtualScreen {
    /// Create a blank screen rendering `columns` characters per line.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            pass: None,
            balance_text: None,
            payment_prompt: None,
            transient: None,
            message_log: VecDeque::with_capacity(MAX_MESSAGE_LOG),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The visible toll pass, if any.
    pub fn pass(&self) -> Option<&PassImage> {
        self.pass.as_ref()
    }

    pub fn balance_text(&self) -> Option<&str> {
        self.balance_text.as_deref()
    }

    /// The open payment dialog, if any.
    pub fn payment_prompt(&self) -> Option<&PaymentPrompt> {
        self.payment_prompt.as_ref()
    }

    /// The current transient message, unless it has expired.
    pub fn transient_message(&self) -> Option<&TransientMessage> {
        self.transient
            .as_ref()
            .filter(|(_, expiration)| Instant::now() < *expiration)
            .map(|(message, _)| message)
    }

    /// Recently shown transient messages, including expired ones.
    pub fn message_log(&self) -> &VecDeque<TransientMessage> {
        &self.message_log
    }

    /// Clear an expired transient message.
    ///
    /// Returns `true` if a message was cleared.
    pub fn update(&mut self) -> bool {
        if let Some((_, expiration)) = self.transient
            && Instant::now() >= expiration
        {
            self.transient = None;
            return true;
        }
        false
    }

    /// Whether nothing at all is displayed.
    pub fn is_blank(&self) -> bool {
        self.pass.is_none()
            && self.balance_text.is_none()
            && self.payment_prompt.is_none()
            && self.transient_message().is_none()
    }

    /// Render the screen as fixed-width text lines.
    ///
    /// ```
    /// use tollway_lane::{Renderer, VirtualScreen};
    ///
    /// let mut screen = VirtualScreen::new(20);
    /// screen.show_balance_text("Scan at exit");
    ///
    /// assert_eq!(screen.render_lines(), vec!["    Scan at exit    ".to_string()]);
    /// ```
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(pass) = &self.pass {
            let label = format!("[QR {}x{}] {}", pass.width, pass.height, pass.payload);
            lines.push(align_text(&label, self.columns, Alignment::Center));
        }
        if let Some(text) = &self.balance_text {
            lines.push(align_text(text, self.columns, Alignment::Center));
        }
        if let Some(prompt) = &self.payment_prompt {
            lines.push(align_text(&prompt.title, self.columns, Alignment::Left));
            lines.push(align_text(&prompt.message, self.columns, Alignment::Left));
            lines.push(align_text("[No]  [Yes]", self.columns, Alignment::Left));
        }
        if let Some(message) = self.transient_message() {
            let toast = format!("({})", message.text);
            lines.push(align_text(&toast, self.columns, Alignment::Center));
        }

        lines
    }
}

impl Default for VirtualScreen {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl Renderer for VirtualScreen {
    fn show_pass(&mut self, image: &PassImage) {
        self.pass = Some(image.clone());
    }

    fn hide_pass(&mut self) {
        self.pass = None;
    }

    fn show_balance_text(&mut self, text: &str) {
        self.balance_text = Some(text.to_string());
    }

    fn hide_balance_text(&mut self) {
        self.balance_text = None;
    }

    fn prompt_payment(&mut self, prompt: &PaymentPrompt) {
        self.payment_prompt = Some(prompt.clone());
    }

    fn dismiss_payment_prompt(&mut self) {
        self.payment_prompt = None;
    }

    fn show_transient_message(&mut self, message: &TransientMessage) {
        let expiration = Instant::now() + message.duration;
        self.transient = Some((message.clone(), expiration));
        self.message_log.push_back(message.clone());
        if self.message_log.len() > MAX_MESSAGE_LOG {
            self.message_log.pop_front();
        }
    }
}

/// Truncate text to at most `max_chars` characters.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Align text within a fixed width, padding with spaces.
///
/// Text longer than `width` is truncated.
///
/// ```
/// use tollway_lane::screen::{align_text, Alignment};
///
/// assert_eq!(align_text("Bye!", 8, Alignment::Left), "Bye!    ");
/// assert_eq!(align_text("Bye!", 8, Alignment::Center), "  Bye!  ");
/// ```
pub fn align_text(text: &str, width: usize, alignment: Alignment) -> String {
    let char_count = text.chars().count();
    if char_count >= width {
        return truncate_text(text, width);
    }

    let padding = width - char_count;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}
