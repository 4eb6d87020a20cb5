#![forbid(unsafe_code)]
//! Catalog selection: tag matching, display ordering, shuffle.

mod order;
mod select;
mod shuffle;
mod tags;

pub use order::{display_order, order_projects};
pub use select::{select_projects, Selection};
pub use shuffle::shuffle_projects;
pub use tags::TagQuery;

pub const CRATE_NAME: &str = "folio-query";
