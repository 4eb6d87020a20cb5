use crate::project::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub const COLLECTION_ID_MAX_LEN: usize = 64;

/// Name of a server-defined tag grouping, e.g. `featured-work`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct CollectionId(String);

// Deserialization goes through `parse` so ids from a config file carry the
// same normalization as lookups; a padded or overlong id fails at load time
// instead of becoming listed-but-unreachable.
impl<'de> Deserialize<'de> for CollectionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl CollectionId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("collection_id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("collection_id"));
        }
        if input.len() > COLLECTION_ID_MAX_LEN {
            return Err(ParseError::TooLong("collection_id", COLLECTION_ID_MAX_LEN));
        }
        Ok(Self(input.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CollectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionDef {
    pub id: CollectionId,
    pub display_name: String,
    /// Tags this collection selects. Empty means "match everything".
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionSet {
    pub collections: Vec<CollectionDef>,
}

impl CollectionSet {
    pub fn validate(&self) -> Result<(), ParseError> {
        let mut seen = BTreeSet::new();
        for def in &self.collections {
            if !seen.insert(def.id.as_str()) {
                return Err(ParseError::InvalidFormat("duplicate collection id"));
            }
            if def.display_name.trim().is_empty() {
                return Err(ParseError::Empty("display_name"));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, raw: &str) -> Option<&CollectionDef> {
        let wanted = raw.trim().to_ascii_lowercase();
        self.collections.iter().find(|c| c.id.as_str() == wanted)
    }
}

fn def(id: &str, display_name: &str, tags: &[&str]) -> CollectionDef {
    CollectionDef {
        id: CollectionId(id.to_ascii_lowercase()),
        display_name: display_name.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

/// The fixed grouping shipped when no collections file is configured.
#[must_use]
pub fn builtin_collections() -> CollectionSet {
    CollectionSet {
        collections: vec![
            def("featured-work", "Featured Work", &["featured"]),
            def("la-phil", "LA Phil", &["la phil", "orchestra"]),
            def(
                "engineering-discography",
                "Engineering Discography",
                &["music", "engineering"],
            ),
            def("art-projects", "Art Projects", &["art"]),
            def("early-work", "Early Work", &["early"]),
            def("everything", "Everything", &[]),
        ],
    }
}
