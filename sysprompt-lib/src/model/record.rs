//! Role record

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Server-assigned record identifier.
pub type RecordId = i64;

/// A role / system-prompt record as served by the role collection.
///
/// The service spells its fields `roleId`, `roleName`, `roleContent` and
/// `roleContentEng`; the plain spellings are accepted as aliases. `null`
/// text fields read as empty strings.
///
/// # Example
///
/// ```
/// use sysprompt_lib::model::Record;
///
/// let json = r#"{"roleId": 7, "roleName": "tutor", "roleContent": "你好", "roleContentEng": null}"#;
/// let record: Record = serde_json::from_str(json).unwrap();
/// assert_eq!(record.id, 7);
/// assert_eq!(record.content_alt, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, stable for the record's lifetime.
    #[serde(rename = "roleId", alias = "id")]
    pub id: RecordId,

    /// Short display label.
    #[serde(rename = "roleName", alias = "name", default, deserialize_with = "nullable_string")]
    pub name: String,

    /// Primary prompt body.
    #[serde(rename = "roleContent", alias = "content", default, deserialize_with = "nullable_string")]
    pub content: String,

    /// Translated (English) prompt body.
    #[serde(
        rename = "roleContentEng",
        alias = "contentAlt",
        default,
        deserialize_with = "nullable_string"
    )]
    pub content_alt: String,
}

impl Record {
    /// Creates a record with the given id and fields.
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        content: impl Into<String>,
        content_alt: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
            content_alt: content_alt.into(),
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
