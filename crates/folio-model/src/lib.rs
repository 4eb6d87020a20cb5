#![forbid(unsafe_code)]
//! Folio domain model SSOT.

mod collection;
mod project;

pub use collection::{
    builtin_collections, CollectionDef, CollectionId, CollectionSet, COLLECTION_ID_MAX_LEN,
};
pub use project::{
    ParseError, Project, ProjectId, ProjectSource, Year, ID_MAX_LEN, TITLE_MAX_LEN,
};

pub const CRATE_NAME: &str = "folio-model";
