//! Draft validation errors

/// A draft failed the presence check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty or whitespace only.
    #[error("Field '{field}' must not be empty")]
    Empty {
        /// The offending field.
        field: &'static str,
    },
}
