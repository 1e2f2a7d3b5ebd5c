//! Mock button panel for testing and development.
//!
//! Presses are injected through a [`MockButtonPanelHandle`], the same way a
//! UI layer would forward taps.

use crate::{ButtonPress, Result, SourceInfo, TriggerError, traits::ButtonPanel};
use tokio::sync::mpsc;

/// Mock button panel.
///
/// # Examples
///
/// ```
/// use tollway_triggers::mock::MockButtonPanel;
/// use tollway_triggers::traits::ButtonPanel;
/// use tollway_triggers::ButtonPress;
///
/// #[tokio::main]
/// async fn main() -> tollway_triggers::Result<()> {
///     let (mut panel, handle) = MockButtonPanel::new();
///
///     handle.press(ButtonPress::Entrance).await?;
///     assert_eq!(panel.read_press().await?, ButtonPress::Entrance);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockButtonPanel {
    press_rx: mpsc::Receiver<ButtonPress>,
    name: String,
}

impl MockButtonPanel {
    /// Create a new mock panel with the default name.
    pub fn new() -> (Self, MockButtonPanelHandle) {
        Self::with_name("Mock Button Panel".to_string())
    }

    /// Create a new mock panel with a custom name.
    pub fn with_name(name: String) -> (Self, MockButtonPanelHandle) {
        let (press_tx, press_rx) = mpsc::channel(32);

        let panel = Self {
            press_rx,
            name: name.clone(),
        };

        let handle = MockButtonPanelHandle { press_tx, name };

        (panel, handle)
    }
}

impl ButtonPanel for MockButtonPanel {
    async fn read_press(&mut self) -> Result<ButtonPress> {
        self.press_rx
            .recv()
            .await
            .ok_or_else(|| TriggerError::disconnected(format!("{} closed", self.name)))
    }

    async fn get_info(&self) -> Result<SourceInfo> {
        Ok(SourceInfo::new(self.name.clone(), "Mock Button Panel v1.0"))
    }
}

/// Handle for pressing buttons on a [`MockButtonPanel`]. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MockButtonPanelHandle {
    press_tx: mpsc::Sender<ButtonPress>,
    name: String,
}

impl MockButtonPanelHandle {
    /// Press a button.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel has been dropped.
    pub async fn press(&self, button: ButtonPress) -> Result<()> {
        self.press_tx
            .send(button)
            .await
            .map_err(|_| TriggerError::disconnected(format!("{} closed", self.name)))
    }

    /// Press a sequence of buttons in order.
    pub async fn press_all(&self, buttons: &[ButtonPress]) -> Result<()> {
        for &button in buttons {
            self.press(button).await?;
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_presses_arrive_in_order() {
        let (mut panel, handle) = MockButtonPanel::new();

        handle
            .press_all(&[ButtonPress::Entrance, ButtonPress::Use, ButtonPress::Exit])
            .await
            .unwrap();

        assert_eq!(panel.read_press().await.unwrap(), ButtonPress::Entrance);
        assert_eq!(panel.read_press().await.unwrap(), ButtonPress::Use);
        assert_eq!(panel.read_press().await.unwrap(), ButtonPress::Exit);
    }

    #[tokio::test]
    async fn test_read_after_handle_dropped() {
        let (mut panel, handle) = MockButtonPanel::new();
        drop(handle);

        let result = panel.read_press().await;
        assert!(matches!(result, Err(TriggerError::Disconnected { .. })));
    }

    #[tokio::test]
    async fn test_press_after_panel_dropped() {
        let (panel, handle) = MockButtonPanel::with_name("Lane 3".to_string());
        drop(panel);

        let result = handle.press(ButtonPress::Use).await;
        assert!(result.is_err());
        assert_eq!(handle.name(), "Lane 3");
    }

    #[tokio::test]
    async fn test_get_info() {
        let (panel, _handle) = MockButtonPanel::new();
        let info = panel.get_info().await.unwrap();
        assert_eq!(info.name, "Mock Button Panel");
    }
}
