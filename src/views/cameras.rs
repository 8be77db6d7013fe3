use tracing::warn;

use crate::api::MachineApi;
use crate::panel::{LinkRow, ListPanel};

/// Loads the camera roster and binds one live-feed link per camera.
///
/// An empty roster or a failed fetch leaves the panel in its default
/// "not found" state; the failure is logged and not retried.
pub async fn load<C: MachineApi>(client: &C, panel: &mut ListPanel) {
    match client.cameras().await {
        Ok(cameras) if !cameras.is_empty() => {
            for camera in &cameras {
                panel.rows.push(LinkRow {
                    label: camera.name.clone(),
                    href: format!("livefeed.html?cameraID={}", camera.camera_id),
                });
            }
            panel.table_visible = true;
            panel.placeholder_visible = false;
        }
        Ok(_) => {}
        Err(e) => warn!("failed to fetch camera list: {}", e),
    }
}
