//! View controllers, one per console page:
//! - cameras: camera roster with live-feed links
//! - history: completed record list with detail links
//! - record: one record's summary and image
//! - estop: emergency-stop control
//! - processing: processing toggle and live-image refresh

pub mod cameras;
pub mod estop;
pub mod history;
pub mod processing;
pub mod record;

#[cfg(test)]
pub(crate) mod testing {
    use bytes::Bytes;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    use crate::api::{ApiError, MachineApi};
    use crate::types::{Camera, MachineState, RecordEntry, RecordSummary, StateCommand};

    fn server_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "machine fault".to_string(),
        }
    }

    /// Scripted stand-in for the live API. A `None` field makes the
    /// corresponding call fail with a server error.
    #[derive(Default)]
    pub struct FakeApi {
        pub cameras: Option<Vec<Camera>>,
        pub records: Option<Vec<RecordEntry>>,
        pub summary: Option<RecordSummary>,
        pub state: Option<MachineState>,
        pub accept_puts: bool,
        pub puts: Mutex<Vec<StateCommand>>,
        pub state_fetches: Mutex<u32>,
    }

    impl MachineApi for FakeApi {
        async fn cameras(&self) -> Result<Vec<Camera>, ApiError> {
            self.cameras.clone().ok_or_else(server_error)
        }

        async fn records(&self) -> Result<Vec<RecordEntry>, ApiError> {
            self.records.clone().ok_or_else(server_error)
        }

        async fn record_summary(&self, _record_id: &str) -> Result<RecordSummary, ApiError> {
            self.summary.clone().ok_or_else(server_error)
        }

        async fn record_image(&self, _record_id: &str) -> Result<Bytes, ApiError> {
            Ok(Bytes::from_static(b"\xff\xd8\xff"))
        }

        async fn machine_state(&self) -> Result<MachineState, ApiError> {
            *self.state_fetches.lock().unwrap() += 1;
            self.state.clone().ok_or_else(server_error)
        }

        async fn put_state(&self, command: &StateCommand) -> Result<(), ApiError> {
            self.puts.lock().unwrap().push(command.clone());
            if self.accept_puts {
                Ok(())
            } else {
                Err(server_error())
            }
        }
    }
}
