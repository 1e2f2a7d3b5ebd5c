//! Fixed strings and dimensions used by the lane.
//!
//! These are the defaults baked into [`LaneConfig`](crate::LaneConfig); a
//! deployment can override any of the display strings through a TOML file,
//! but the rejection messages are tied to the transition table and are not
//! configurable.

// ============================================================================
// Toll pass
// ============================================================================

/// Payload encoded in the toll pass QR code.
pub const DEFAULT_TOLL_URL: &str = "http://www.codewisp.com/";

/// Width and height of the rendered toll pass, in pixels.
pub const DEFAULT_QR_DIMENSION: u32 = 400;

/// Quiet-zone margin around the toll pass.
pub const DEFAULT_QR_MARGIN: u32 = 0;

// ============================================================================
// Balance text
// ============================================================================

/// Wallet balance shown when the vehicle reaches the entrance.
pub const DEFAULT_BALANCE_TEXT: &str = "You have Php 345.00 left on your wallet.";

/// Instruction shown next to the toll pass while on the tollway.
pub const DEFAULT_SCAN_TEXT: &str = "Scan this QR code when you exit.";

// ============================================================================
// Payment confirmation
// ============================================================================

/// Fee charged for a full pass through the tollway.
pub const DEFAULT_FEE: &str = "Php 118.00";

/// Title of the payment confirmation dialog.
pub const DEFAULT_PAYMENT_TITLE: &str = "Pay with your wallet?";

/// Shown after the driver accepts the wallet payment.
pub const DEFAULT_PAID_TEXT: &str = "Thank you for using the tollway!";

/// Shown after the driver declines the wallet payment.
pub const DEFAULT_PAY_AT_COUNTER_TEXT: &str = "Please proceed to the counter to pay.";

// ============================================================================
// Transient messages
// ============================================================================

/// Shown when the beacon region is left while already off the tollway.
pub const DEFAULT_FAREWELL_TEXT: &str = "Bye!";

/// Shown when a proximity event has no interpretation in the current state.
pub const DEFAULT_DIAGNOSTIC_TEXT: &str = "Whut";

/// Duration of a short transient message (rejections), in milliseconds.
pub const SHORT_MESSAGE_MS: u64 = 2000;

/// Duration of a long transient message (farewell, diagnostics), in milliseconds.
pub const LONG_MESSAGE_MS: u64 = 3500;

// ============================================================================
// Rejection messages
// ============================================================================

/// Rejection for `EnterRequested` outside `OffTollway`.
pub const ENTER_REJECTED: &str = "You need to be off the tollway to enter!";

/// Rejection for `UseRequested` outside `OnEntrance`.
pub const USE_REJECTED: &str = "You need to use the entrance to drive through the tollway!";

/// Rejection for `ExitRequested` outside `OnTollway`.
pub const EXIT_REJECTED: &str = "You need to be using the tollway to exit";

// ============================================================================
// Monitored region
// ============================================================================

/// Identifier of the single monitored beacon region.
pub const DEFAULT_REGION_ID: &str = "DEMOREGION";

/// Proximity UUID broadcast by the gate beacon.
pub const DEFAULT_REGION_UUID: &str = "b9407f30-f5f8-466e-aff9-25556b57fe6d";

/// Background scan period of the proximity service, in milliseconds.
pub const DEFAULT_SCAN_PERIOD_MS: u64 = 2000;
