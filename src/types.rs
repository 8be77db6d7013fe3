use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Record ID the server uses for the record currently being written.
/// Its image endpoint serves the live camera view while processing runs.
pub const CURRENT_RECORD: &str = "CURRENT";

/// Camera roster entry from `GET /api/cameras`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    #[serde(rename = "cameraID")]
    pub camera_id: String,
    pub name: String,
}

/// Record index entry from `GET /api/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    #[serde(rename = "recordID")]
    pub record_id: String,
    pub name: String,
}

/// Record metadata from `GET /api/records/{id}`.
///
/// Timestamps arrive as zone-less ISO-8601 strings. `name` is optional
/// on the wire; older servers never sent it and treat names and record
/// IDs as synonymous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
}

/// Machine state from `GET /api/machineState`.
///
/// `estopped` is absent from some server generations' GET responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineState {
    pub processing: bool,
    #[serde(default)]
    pub estopped: bool,
}

/// Body for `PUT /api/machineState`. The server expects exactly one of
/// the two fields per request, so unset fields are not serialized.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StateCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estopped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<bool>,
}

impl StateCommand {
    pub fn estop() -> Self {
        Self {
            estopped: Some(true),
            ..Default::default()
        }
    }

    pub fn processing(on: bool) -> Self {
        Self {
            processing: Some(on),
            ..Default::default()
        }
    }
}
