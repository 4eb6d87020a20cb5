use folio_model::Project;
use serde::{Deserialize, Serialize};

/// A normalized set of requested tags. Matching is case-insensitive on both
/// sides; an empty query matches every project (the `everything` rule).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagQuery {
    tags: Vec<String>,
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl TagQuery {
    #[must_use]
    pub fn new<S: AsRef<str>>(requested: &[S]) -> Self {
        let mut tags: Vec<String> = requested
            .iter()
            .map(|t| normalize(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        Self { tags }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        project
            .tags
            .iter()
            .any(|tag| self.tags.iter().any(|wanted| *wanted == normalize(tag)))
    }
}
