//! Data model

mod draft;
mod envelope;
mod record;

pub use draft::*;
pub use envelope::*;
pub use record::*;
