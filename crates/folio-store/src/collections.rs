use crate::StoreError;
use folio_model::{builtin_collections, CollectionSet};
use std::path::Path;
use tracing::info;

/// Loads the collection set from an optional config file. With no path the
/// builtin set applies. A configured path that is missing or invalid is a
/// startup error, not a silent fallback.
pub fn load_collections(path: Option<&Path>) -> Result<CollectionSet, StoreError> {
    let Some(path) = path else {
        return Ok(builtin_collections());
    };
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let set: CollectionSet =
        serde_json::from_str(&raw).map_err(|e| StoreError::config(path, e.to_string()))?;
    set.validate()
        .map_err(|e| StoreError::config(path, e.to_string()))?;
    info!(
        path = %path.display(),
        collections = set.collections.len(),
        "loaded collection config"
    );
    Ok(set)
}
