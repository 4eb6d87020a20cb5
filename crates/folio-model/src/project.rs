// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

pub const ID_MAX_LEN: usize = 128;
pub const TITLE_MAX_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    Empty(&'static str),
    Trimmed(&'static str),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty(name) => write!(f, "{name} must not be empty"),
            Self::Trimmed(name) => {
                write!(f, "{name} must not contain leading/trailing whitespace")
            }
            Self::TooLong(name, max) => write!(f, "{name} exceeds max length {max}"),
            Self::InvalidFormat(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Identifier derived from the project's filename, never from the file body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ProjectId(String);

impl ProjectId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("project_id"));
        }
        if input.trim() != input {
            return Err(ParseError::Trimmed("project_id"));
        }
        if input.len() > ID_MAX_LEN {
            return Err(ParseError::TooLong("project_id", ID_MAX_LEN));
        }
        if input.contains('/') || input.contains('\\') {
            return Err(ParseError::InvalidFormat(
                "project_id must not contain path separators",
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four-digit year kept as a string on the wire, compared numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct Year(String);

impl Year {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty("year"));
        }
        if input.len() != 4 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat("year must be four ASCII digits"));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value for ordering. The parse contract guarantees four digits,
    /// so the range always fits in u16.
    #[must_use]
    pub fn as_number(&self) -> u16 {
        self.0.parse::<u16>().unwrap_or(0)
    }
}

/// On-disk shape of a project file. `id` is intentionally absent: it is
/// derived from the filename by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct ProjectSource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Option<BTreeSet<String>>,
    #[serde(default, rename = "defaultOrder")]
    pub default_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub year: Year,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(
        rename = "defaultOrder",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_order: Option<i64>,
}

impl Project {
    /// Validates a raw source against the required-field invariant:
    /// title + description + year + at least one of image/video.
    pub fn from_source(id: ProjectId, source: ProjectSource) -> Result<Self, ParseError> {
        let title = match source.title {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err(ParseError::Empty("title")),
        };
        if title.len() > TITLE_MAX_LEN {
            return Err(ParseError::TooLong("title", TITLE_MAX_LEN));
        }
        let description = match source.description {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Err(ParseError::Empty("description")),
        };
        let year = match source.year {
            Some(v) => Year::parse(&v)?,
            None => return Err(ParseError::Empty("year")),
        };
        if source.image.is_none() && source.video.is_none() {
            return Err(ParseError::InvalidFormat(
                "project must define image or video",
            ));
        }
        Ok(Self {
            id,
            title,
            description,
            year,
            image: source.image,
            video: source.video,
            url: source.url,
            tags: source.tags.unwrap_or_default(),
            default_order: source.default_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(title: &str, year: &str) -> ProjectSource {
        ProjectSource {
            title: Some(title.to_string()),
            description: Some("a thing".to_string()),
            year: Some(year.to_string()),
            image: Some("/images/a.jpg".to_string()),
            ..ProjectSource::default()
        }
    }

    #[test]
    fn project_id_rejects_path_separators_and_whitespace() {
        assert!(ProjectId::parse("sound-garden").is_ok());
        assert!(ProjectId::parse("").is_err());
        assert!(ProjectId::parse(" padded ").is_err());
        assert!(ProjectId::parse("a/b").is_err());
        assert!(ProjectId::parse(&"x".repeat(ID_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn year_requires_four_digits() {
        assert_eq!(Year::parse("2024").expect("valid year").as_number(), 2024);
        assert!(Year::parse("202").is_err());
        assert!(Year::parse("20245").is_err());
        assert!(Year::parse("2o24").is_err());
        assert!(Year::parse("").is_err());
    }

    #[test]
    fn from_source_enforces_required_fields() {
        let id = ProjectId::parse("p").expect("id");
        let ok = Project::from_source(id.clone(), source("Beat Mapper", "2022"));
        assert!(ok.is_ok());

        let missing_title = ProjectSource {
            title: None,
            ..source("x", "2022")
        };
        assert_eq!(
            Project::from_source(id.clone(), missing_title),
            Err(ParseError::Empty("title"))
        );

        let blank_description = ProjectSource {
            description: Some("   ".to_string()),
            ..source("x", "2022")
        };
        assert_eq!(
            Project::from_source(id.clone(), blank_description),
            Err(ParseError::Empty("description"))
        );

        let no_media = ProjectSource {
            image: None,
            video: None,
            ..source("x", "2022")
        };
        assert!(Project::from_source(id.clone(), no_media).is_err());

        let video_only = ProjectSource {
            image: None,
            video: Some("https://example.com/v".to_string()),
            ..source("x", "2022")
        };
        assert!(Project::from_source(id, video_only).is_ok());
    }

    #[test]
    fn wire_names_round_trip_default_order() {
        let id = ProjectId::parse("p").expect("id");
        let mut src = source("Splice Mic", "2025");
        src.default_order = Some(3);
        let project = Project::from_source(id, src).expect("valid project");
        let value = serde_json::to_value(&project).expect("serialize");
        assert_eq!(value["defaultOrder"], 3);
        assert_eq!(value["year"], "2025");
        assert!(value.get("video").is_none());
    }
}
