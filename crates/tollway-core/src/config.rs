//! Lane configuration.
//!
//! Every field has a default matching the stock deployment, so an empty
//! TOML file (or no file at all) yields a working lane.
//!
//! # Examples
//!
//! ```
//! use tollway_core::LaneConfig;
//!
//! let config = LaneConfig::from_toml_str(r#"
//!     fee = "Php 95.00"
//!
//!     [qr]
//!     width = 300
//!     height = 300
//! "#).unwrap();
//!
//! assert_eq!(config.fee, "Php 95.00");
//! assert_eq!(config.qr.width, 300);
//! assert_eq!(config.toll_url, "http://www.codewisp.com/");
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::{Result, TollError};

/// Rendered size of the toll pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSize {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for QrSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_QR_DIMENSION,
            height: DEFAULT_QR_DIMENSION,
            margin: DEFAULT_QR_MARGIN,
        }
    }
}

/// Display strings and pass parameters for one lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneConfig {
    /// Payload encoded into the toll pass.
    pub toll_url: String,

    /// Toll pass dimensions.
    pub qr: QrSize,

    /// Wallet balance text shown at the entrance.
    pub balance_text: String,

    /// Instruction shown alongside the toll pass.
    pub scan_text: String,

    /// Fee quoted in the payment prompt.
    pub fee: String,

    /// Payment dialog title.
    pub payment_title: String,

    /// Text shown after accepting payment.
    pub paid_text: String,

    /// Text shown after declining payment.
    pub pay_at_counter_text: String,

    /// Transient message for the region-exit farewell.
    pub farewell_text: String,

    /// Transient message for unreconciled triggers.
    pub diagnostic_text: String,

    /// Duration of short transient messages, in milliseconds.
    pub short_message_ms: u64,

    /// Duration of long transient messages, in milliseconds.
    pub long_message_ms: u64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            toll_url: DEFAULT_TOLL_URL.to_string(),
            qr: QrSize::default(),
            balance_text: DEFAULT_BALANCE_TEXT.to_string(),
            scan_text: DEFAULT_SCAN_TEXT.to_string(),
            fee: DEFAULT_FEE.to_string(),
            payment_title: DEFAULT_PAYMENT_TITLE.to_string(),
            paid_text: DEFAULT_PAID_TEXT.to_string(),
            pay_at_counter_text: DEFAULT_PAY_AT_COUNTER_TEXT.to_string(),
            farewell_text: DEFAULT_FAREWELL_TEXT.to_string(),
            diagnostic_text: DEFAULT_DIAGNOSTIC_TEXT.to_string(),
            short_message_ms: SHORT_MESSAGE_MS,
            long_message_ms: LONG_MESSAGE_MS,
        }
    }
}

impl LaneConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `TollError::Config` if the text is not valid TOML or a
    /// value fails validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| TollError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `TollError::Io` if the file cannot be read, or
    /// `TollError::Config` if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the values the lane relies on.
    ///
    /// The toll pass must have a payload and be a non-empty square.
    pub fn validate(&self) -> Result<()> {
        if self.toll_url.trim().is_empty() {
            return Err(TollError::Config("toll_url must not be empty".to_string()));
        }
        if self.qr.width == 0 || self.qr.height == 0 {
            return Err(TollError::Config(format!(
                "qr size must be non-zero, got {}x{}",
                self.qr.width, self.qr.height
            )));
        }
        if self.qr.width != self.qr.height {
            return Err(TollError::Config(format!(
                "qr size must be square, got {}x{}",
                self.qr.width, self.qr.height
            )));
        }
        Ok(())
    }

    /// Body of the payment confirmation dialog.
    pub fn payment_message(&self) -> String {
        format!(
            "Thank you for using the tollway. Pay {} with your wallet?",
            self.fee
        )
    }

    pub fn short_message_duration(&self) -> Duration {
        Duration::from_millis(self.short_message_ms)
    }

    pub fn long_message_duration(&self) -> Duration {
        Duration::from_millis(self.long_message_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_stock_lane() {
        let config = LaneConfig::default();
        assert_eq!(config.toll_url, "http://www.codewisp.com/");
        assert_eq!(config.qr, QrSize { width: 400, height: 400, margin: 0 });
        assert_eq!(config.balance_text, "You have Php 345.00 left on your wallet.");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_payment_message() {
        let config = LaneConfig::default();
        assert_eq!(
            config.payment_message(),
            "Thank you for using the tollway. Pay Php 118.00 with your wallet?"
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LaneConfig::from_toml_str("").unwrap();
        assert_eq!(config, LaneConfig::default());
    }

    #[test]
    fn test_partial_qr_table_keeps_defaults() {
        let config = LaneConfig::from_toml_str("[qr]\nmargin = 4\n").unwrap();
        assert_eq!(config.qr.width, 400);
        assert_eq!(config.qr.margin, 4);
    }

    #[test]
    fn test_rejects_non_square_pass() {
        let result = LaneConfig::from_toml_str("[qr]\nwidth = 400\nheight = 200\n");
        assert!(matches!(result, Err(TollError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_url() {
        let result = LaneConfig::from_toml_str("toll_url = \"  \"\n");
        assert!(matches!(result, Err(TollError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = LaneConfig::from_toml_str("fee = ");
        assert!(matches!(result, Err(TollError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "balance_text = \"You have Php 10.00 left on your wallet.\"").unwrap();

        let config = LaneConfig::load(file.path()).unwrap();
        assert_eq!(config.balance_text, "You have Php 10.00 left on your wallet.");
    }

    #[test]
    fn test_load_missing_file() {
        let result = LaneConfig::load("/nonexistent/tollway.toml");
        assert!(matches!(result, Err(TollError::Io(_))));
    }
}
