use chrono::{NaiveDateTime, Timelike};
use tracing::warn;
use url::Url;

use crate::api::MachineApi;
use crate::panel::SummaryPanel;

/// Pulls the record ID out of a page-style query string. The first
/// `recordID=` pair wins; anything else is ignored.
pub fn record_id_from_query(query: &str) -> Option<&str> {
    query
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("recordID="))
}

/// Resolves a console argument to a record ID. Accepts a bare ID, a
/// `record.html?recordID=...` page path, or a full record-page URL.
pub fn resolve_record_id(arg: &str) -> Option<String> {
    if let Ok(page_url) = Url::parse(arg) {
        return page_url
            .query()
            .and_then(record_id_from_query)
            .map(str::to_string);
    }
    if let Some(query) = arg.splitn(2, '?').nth(1) {
        return record_id_from_query(query).map(str::to_string);
    }
    if arg.is_empty() {
        None
    } else {
        Some(arg.to_string())
    }
}

/// Formats a timestamp the way the record page did: weekday date plus
/// 12-hour time with zero-padded minutes and an AM/PM suffix.
pub fn date_format(timestamp: &NaiveDateTime) -> String {
    let (is_pm, hour) = timestamp.hour12();
    format!(
        "{}, {}:{:02} {}",
        timestamp.format("%a %b %d %Y"),
        hour,
        timestamp.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// Binds one record's image and metadata to the summary panel.
///
/// The image element is bound before the metadata fetch, matching the
/// page's load order. On failure the image is hidden again and the
/// "not found" placeholder stands.
pub async fn load<C: MachineApi>(client: &C, record_id: &str, panel: &mut SummaryPanel) {
    panel.image_url = Some(format!("api/records/{}/image", record_id));
    panel.image_visible = true;

    match client.record_summary(record_id).await {
        Ok(summary) => {
            let name = summary.name.clone().unwrap_or_else(|| record_id.to_string());
            panel.heading = Some(name);
            panel
                .fields
                .push(("Start Time".to_string(), date_format(&summary.start_time)));
            panel
                .fields
                .push(("End Time".to_string(), date_format(&summary.end_time)));
            panel
                .fields
                .push(("Latitude".to_string(), summary.latitude.to_string()));
            panel
                .fields
                .push(("Longitude".to_string(), summary.longitude.to_string()));
            panel.info_visible = true;
            panel.placeholder_visible = false;
        }
        Err(e) => {
            warn!("error getting summary for record {}: {}", record_id, e);
            panel.image_visible = false;
            panel.placeholder_visible = true;
        }
    }
}
