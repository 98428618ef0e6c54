//! List response envelope

use serde::Deserialize;

use super::Record;
use crate::error::ApiError;

/// Status value the service uses for a successful list.
pub const STATUS_OK: &str = "ok";

/// Body of `GET /role`: `{ "status": "ok", "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<Vec<Record>>,
}

impl Envelope {
    /// Unwraps the records, rejecting non-`ok` statuses and missing data.
    pub fn into_records(self) -> Result<Vec<Record>, ApiError> {
        if self.status != STATUS_OK {
            return Err(ApiError::Status(self.status));
        }
        self.data
            .ok_or_else(|| ApiError::parse("envelope has status ok but no data"))
    }
}
