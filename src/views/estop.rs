use std::time::Duration;
use tracing::error;

use crate::api::MachineApi;
use crate::panel::{ButtonColor, EstopPanel};
use crate::types::StateCommand;

const IDLE_LABEL: &str = "E-stop";
const PENDING_LABEL: &str = "...";
const CONFIRMED_LABEL: &str = "E-stopped";
/// How long the green confirmation state stays up before reverting.
const CONFIRM_WINDOW: Duration = Duration::from_millis(500);

/// One-shot emergency-stop control.
///
/// Activation walks Idle -> Pending -> Confirmed -> Idle on success, or
/// Pending -> Idle on failure, where the operator also gets exactly one
/// blocking alert carrying the server's reason. The confirmation window
/// is a fixed single-shot timer.
pub struct EstopControl {
    pub panel: EstopPanel,
    confirm_window: Duration,
}

impl EstopControl {
    pub fn new() -> Self {
        Self {
            panel: EstopPanel::new(),
            confirm_window: CONFIRM_WINDOW,
        }
    }

    pub async fn trigger<C: MachineApi>(&mut self, client: &C) {
        self.panel.label = PENDING_LABEL.to_string();

        match client.put_state(&StateCommand::estop()).await {
            Ok(()) => {
                self.panel.label = CONFIRMED_LABEL.to_string();
                self.panel.color = ButtonColor::Green;
                tokio::time::sleep(self.confirm_window).await;
                self.revert();
            }
            Err(e) => {
                self.revert();
                error!("estop request failed: {}", e);
                self.panel.alerts.push(format!("ERROR - Estop FAILED\n{}", e));
            }
        }
    }

    fn revert(&mut self) {
        self.panel.label = IDLE_LABEL.to_string();
        self.panel.color = ButtonColor::Red;
    }
}

impl Default for EstopControl {
    fn default() -> Self {
        Self::new()
    }
}
