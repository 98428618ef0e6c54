//! Client-side table engine: filter, sort, paginate, select.
//!
//! Everything here except [`Debouncer`] is pure: the same records and
//! [`ViewState`] always render the same [`TableView`].

mod column;
mod debounce;
mod filter;
mod page;
mod selection;
mod sort;
mod truncate;
mod view;

pub use column::*;
pub use debounce::*;
pub use filter::*;
pub use page::*;
pub use selection::*;
pub use sort::*;
pub use truncate::*;
pub use view::*;
