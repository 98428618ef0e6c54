//! System prompt role management engine
//!
//! Client-side table engine (fuzzy filter, sort, pagination, selection)
//! over a REST role collection, with mutate-then-refetch writes, a single
//! transient notice slot and a confirmation gate for deletes.

pub mod api;
pub mod confirm;
pub mod editor;
pub mod error;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod store;
pub mod table;

mod client;
mod config;
mod page;

pub use client::*;
pub use config::*;
pub use page::Pending;
pub use page::RolePage;
