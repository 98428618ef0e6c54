//! Error types

mod api;
mod config;
mod validation;

pub use api::*;
pub use config::*;
pub use validation::*;

/// Top-level error for every fallible operation in the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote role service failed or answered with something unusable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A draft failed the optional presence check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The task was superseded by a newer one or torn down.
    #[error("Operation cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if the operation was cancelled rather than failed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code if the remote answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status_code(),
            _ => None,
        }
    }
}
