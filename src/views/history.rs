use tracing::warn;

use crate::api::MachineApi;
use crate::panel::{LinkRow, ListPanel};

/// Loads the completed-record index and binds one detail link per record.
///
/// Same contract as the camera roster: empty results and failures leave
/// the "not found" default standing.
pub async fn load<C: MachineApi>(client: &C, panel: &mut ListPanel) {
    match client.records().await {
        Ok(records) if !records.is_empty() => {
            for record in &records {
                panel.rows.push(LinkRow {
                    label: record.name.clone(),
                    href: format!("record.html?recordID={}", record.record_id),
                });
            }
            panel.table_visible = true;
            panel.placeholder_visible = false;
        }
        Ok(_) => {}
        Err(e) => warn!("failed to fetch record list: {}", e),
    }
}
