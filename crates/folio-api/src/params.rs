use crate::errors::ApiError;
use std::collections::BTreeMap;

/// Tag values arrive joined by `+` in a single `tags` parameter.
pub const TAGS_SEPARATOR: char = '+';

pub const MAX_TAGS: usize = 16;
pub const MAX_TAG_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListProjectsParams {
    pub tags: Option<Vec<String>>,
    pub collection: Option<String>,
    pub shuffle: bool,
    pub pretty: bool,
}

fn parse_flag(query: &BTreeMap<String, String>, name: &str) -> bool {
    query
        .get(name)
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Parses the listing query. Unknown parameters are ignored; `collection`
/// precedence over `tags` is resolved by the caller, which owns the
/// collection registry.
pub fn parse_list_projects_params(
    query: &BTreeMap<String, String>,
) -> Result<ListProjectsParams, ApiError> {
    let tags = match query.get("tags") {
        Some(raw) => {
            // Values are joined by '+'. Form decoding turns a literal '+'
            // into a space before it reaches us, so both separate.
            let parsed: Vec<String> = raw
                .split(|c: char| c == TAGS_SEPARATOR || c.is_whitespace())
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string)
                .collect();
            if parsed.len() > MAX_TAGS {
                return Err(ApiError::invalid_param("tags", raw));
            }
            if parsed.iter().any(|t| t.len() > MAX_TAG_LEN) {
                return Err(ApiError::invalid_param("tags", raw));
            }
            Some(parsed)
        }
        None => None,
    };

    let collection = match query.get("collection") {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ApiError::invalid_param("collection", raw));
            }
            Some(trimmed.to_string())
        }
        None => None,
    };

    Ok(ListProjectsParams {
        tags,
        collection,
        shuffle: parse_flag(query, "shuffle"),
        pretty: parse_flag(query, "pretty"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn tags_split_on_plus_and_drop_blanks() {
        let params = parse_list_projects_params(&query(&[("tags", "music+Art+ +film")]))
            .expect("params");
        assert_eq!(
            params.tags.expect("tags"),
            vec!["music".to_string(), "Art".to_string(), "film".to_string()]
        );
    }

    #[test]
    fn tags_split_on_decoded_spaces_too() {
        let params =
            parse_list_projects_params(&query(&[("tags", "music art")])).expect("params");
        assert_eq!(
            params.tags.expect("tags"),
            vec!["music".to_string(), "art".to_string()]
        );
    }

    #[test]
    fn absent_parameters_mean_unfiltered() {
        let params = parse_list_projects_params(&query(&[])).expect("params");
        assert_eq!(params, ListProjectsParams::default());
    }

    #[test]
    fn collection_and_tags_both_survive_parsing() {
        let params = parse_list_projects_params(&query(&[
            ("tags", "music"),
            ("collection", "featured-work"),
        ]))
        .expect("params");
        assert_eq!(params.collection.as_deref(), Some("featured-work"));
        assert!(params.tags.is_some());
    }

    #[test]
    fn flags_accept_one_and_true() {
        for value in ["1", "true", "TRUE"] {
            let params =
                parse_list_projects_params(&query(&[("shuffle", value), ("pretty", value)]))
                    .expect("params");
            assert!(params.shuffle);
            assert!(params.pretty);
        }
        let params = parse_list_projects_params(&query(&[("shuffle", "0")])).expect("params");
        assert!(!params.shuffle);
    }

    #[test]
    fn oversized_tag_lists_are_rejected() {
        let too_many = (0..MAX_TAGS + 1)
            .map(|i| format!("t{i}"))
            .collect::<Vec<_>>()
            .join("+");
        assert!(parse_list_projects_params(&query(&[("tags", &too_many)])).is_err());

        let huge = "x".repeat(MAX_TAG_LEN + 1);
        assert!(parse_list_projects_params(&query(&[("tags", &huge)])).is_err());

        assert!(parse_list_projects_params(&query(&[("collection", "  ")])).is_err());
    }
}
