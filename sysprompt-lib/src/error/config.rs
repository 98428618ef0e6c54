//! Configuration errors

/// Errors raised while loading [`Config`](crate::Config).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required key was not set.
    #[error("Missing configuration key: {0}")]
    Missing(&'static str),

    /// A key was set to a value that could not be used.
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// The key.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}
