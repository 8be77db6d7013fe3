use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::error;

use crate::api::{cache_busted_image_url, MachineApi};
use crate::panel::{ButtonColor, StatusPanel};
use crate::types::{StateCommand, CURRENT_RECORD};

const ACTIVE_COLOR: ButtonColor = ButtonColor::Red;
const STOPPED_COLOR: ButtonColor = ButtonColor::Green;
const STOPPED_LABEL: &str = "Start";
const REFRESH_PERIOD: Duration = Duration::from_millis(1000);

/// Mirrors the machine's processing flag and keeps the live image fresh
/// while the flag is set.
///
/// The cached flag always equals the last value fetched from or
/// successfully written to the server; transitions only run when a new
/// value differs from the cache. The refresh timer is owned here: start
/// is idempotent (any previous timer is cancelled first) and the stopped
/// transition cancels it and clears the handle.
pub struct ProcessingToggle {
    processing: bool,
    refresh: Option<JoinHandle<()>>,
    refresh_period: Duration,
    panel: Arc<Mutex<StatusPanel>>,
}

impl ProcessingToggle {
    pub fn new() -> Self {
        Self::with_period(REFRESH_PERIOD)
    }

    pub fn with_period(refresh_period: Duration) -> Self {
        Self {
            processing: false,
            refresh: None,
            refresh_period,
            panel: Arc::new(Mutex::new(StatusPanel::new())),
        }
    }

    pub fn processing(&self) -> bool {
        self.processing
    }

    pub fn panel(&self) -> Arc<Mutex<StatusPanel>> {
        self.panel.clone()
    }

    pub fn snapshot(&self) -> StatusPanel {
        self.panel.lock().unwrap().clone()
    }

    /// Re-fetches the machine state and reconciles the cached flag.
    ///
    /// On fetch failure the flag is forced to false, the stopped
    /// transition runs, and the operator gets an alert.
    pub async fn sync<C: MachineApi>(&mut self, client: &C) {
        match client.machine_state().await {
            Ok(state) => {
                self.apply(state.processing);
            }
            Err(e) => {
                self.apply(false);
                error!("could not get machine state: {}", e);
                self.panel
                    .lock()
                    .unwrap()
                    .alerts
                    .push(format!("ERROR - Could not get machine state.\n{}", e));
            }
        }
    }

    /// Adopts a locally-known new flag value, as after a successful
    /// write. Returns whether a transition ran; repeated identical
    /// values are no-ops.
    pub fn apply(&mut self, new_state: bool) -> bool {
        if self.processing == new_state {
            return false;
        }
        self.processing = new_state;
        if new_state {
            self.started();
        } else {
            self.stopped();
        }
        true
    }

    /// Writes the inverse of the cached flag to the server. Success
    /// adopts the new value; failure logs and re-syncs from the server.
    pub async fn toggle<C: MachineApi>(&mut self, client: &C) {
        let new_state = !self.processing;
        match client.put_state(&StateCommand::processing(new_state)).await {
            Ok(()) => {
                self.apply(new_state);
            }
            Err(e) => {
                error!("could not change processing state: {}", e);
                self.sync(client).await;
            }
        }
    }

    fn started(&mut self) {
        {
            let mut panel = self.panel.lock().unwrap();
            panel.button_color = ACTIVE_COLOR;
            panel.image_visible = true;
        }
        self.start_refresh();
    }

    fn stopped(&mut self) {
        {
            let mut panel = self.panel.lock().unwrap();
            panel.button_label = STOPPED_LABEL.to_string();
            panel.button_color = STOPPED_COLOR;
            panel.image_visible = false;
        }
        self.stop_refresh();
    }

    fn start_refresh(&mut self) {
        // always cancel the previous timer so a re-start cannot leave
        // two of them rewriting the image URL
        self.stop_refresh();
        let panel = self.panel.clone();
        let period = self.refresh_period;
        self.refresh = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick completes immediately; the page's timer
            // fired only after a full period
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let stamp = Utc::now().timestamp_millis();
                panel.lock().unwrap().live_image_url =
                    Some(cache_busted_image_url(CURRENT_RECORD, stamp));
            }
        }));
    }

    fn stop_refresh(&mut self) {
        if let Some(refresh) = self.refresh.take() {
            refresh.abort();
        }
    }
}

impl Default for ProcessingToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProcessingToggle {
    fn drop(&mut self) {
        self.stop_refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MachineState;
    use crate::views::testing::FakeApi;

    #[tokio::test]
    async fn test_apply_is_idempotent() {
        let mut view = ProcessingToggle::new();

        assert!(view.apply(true));
        assert!(!view.apply(true));
        assert!(view.processing());

        let panel = view.snapshot();
        assert_eq!(panel.button_color, ButtonColor::Red);
        assert!(panel.image_visible);

        assert!(view.apply(false));
        assert!(!view.apply(false));
        let panel = view.snapshot();
        assert_eq!(panel.button_label, "Start");
        assert_eq!(panel.button_color, ButtonColor::Green);
        assert!(!panel.image_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_rewrites_stop_with_timer() {
        let mut view = ProcessingToggle::with_period(Duration::from_millis(50));
        view.apply(true);

        tokio::time::sleep(Duration::from_millis(120)).await;
        let url_while_running = view.snapshot().live_image_url;
        assert!(url_while_running.is_some());
        assert!(url_while_running
            .as_deref()
            .unwrap()
            .starts_with("api/records/CURRENT/image?time="));

        view.apply(false);
        assert!(view.refresh.is_none());
        let url_at_stop = view.snapshot().live_image_url;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(view.snapshot().live_image_url, url_at_stop);
    }

    #[tokio::test]
    async fn test_sync_failure_forces_stopped_state_and_alerts() {
        let client = FakeApi::default();
        let mut view = ProcessingToggle::new();
        view.apply(true);

        view.sync(&client).await;

        assert!(!view.processing());
        assert!(view.refresh.is_none());
        let panel = view.snapshot();
        assert_eq!(panel.button_label, "Start");
        assert_eq!(panel.alerts.len(), 1);
        assert!(panel.alerts[0].starts_with("ERROR - Could not get machine state."));
    }

    #[tokio::test]
    async fn test_sync_adopts_server_state() {
        let client = FakeApi {
            state: Some(MachineState {
                processing: true,
                estopped: false,
            }),
            ..Default::default()
        };
        let mut view = ProcessingToggle::new();
        view.sync(&client).await;

        assert!(view.processing());
        assert_eq!(view.snapshot().button_color, ButtonColor::Red);
    }

    #[tokio::test]
    async fn test_toggle_writes_inverse_and_adopts_it() {
        let client = FakeApi {
            accept_puts: true,
            ..Default::default()
        };
        let mut view = ProcessingToggle::new();
        view.toggle(&client).await;

        assert!(view.processing());
        let puts = client.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].processing, Some(true));
        assert_eq!(puts[0].estopped, None);
    }

    #[tokio::test]
    async fn test_toggle_failure_resyncs_from_server() {
        let client = FakeApi {
            accept_puts: false,
            state: Some(MachineState {
                processing: false,
                estopped: false,
            }),
            ..Default::default()
        };
        let mut view = ProcessingToggle::new();
        view.toggle(&client).await;

        // write failed; the cache was reconciled by a fresh fetch
        assert!(!view.processing());
        assert_eq!(*client.state_fetches.lock().unwrap(), 1);
        assert!(view.snapshot().alerts.is_empty());
    }
}
