//! Create/update payloads

use serde::Serialize;

use super::Record;
use super::RecordId;
use crate::error::ValidationError;

/// Editable fields of a record, without an id.
///
/// The server assigns ids on create; a draft never carries one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub content: String,
    pub content_alt: String,
}

impl RecordDraft {
    /// Creates a draft from its fields.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        content_alt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_alt: content_alt.into(),
        }
    }

    /// Presence check for `name` and `content`.
    ///
    /// Not applied unless enabled with `Config::with_require_fields`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }
        Ok(())
    }

    /// Builds the wire body for this draft.
    pub(crate) fn payload<'a>(&'a self, id: Option<RecordId>, user: &'a str) -> RolePayload<'a> {
        RolePayload {
            id,
            name: &self.name,
            content: &self.content,
            user,
        }
    }
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            content: record.content.clone(),
            content_alt: record.content_alt.clone(),
        }
    }
}

/// JSON body for `POST /role` and `PUT /role`.
///
/// Only `id` (updates), `name`, `content` and `user` go over the wire.
#[derive(Debug, Serialize)]
pub(crate) struct RolePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: &'a str,
    pub content: &'a str,
    pub user: &'a str,
}
