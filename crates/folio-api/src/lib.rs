#![forbid(unsafe_code)]
//! Wire-level surface of the catalog API: query parameter parsing and the
//! error envelope. No I/O lives here.

mod errors;
pub mod params;

pub use errors::{ApiError, ApiErrorCode};
pub use params::{parse_list_projects_params, ListProjectsParams, TAGS_SEPARATOR};

pub const CRATE_NAME: &str = "folio-api";
