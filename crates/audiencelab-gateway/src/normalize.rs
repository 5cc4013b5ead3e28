//! Response normalization: citation cleanup and structured-JSON extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use audiencelab_core::Source;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::GatewayError;
use crate::types::WebChunk;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid json fence regex"));

/// Keeps citations that have both a title and a URI, deduplicated by URI.
///
/// The first occurrence of each URI wins and relative order is preserved.
#[must_use]
pub fn normalize_sources(chunks: &[WebChunk]) -> Vec<Source> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| {
            let title = chunk.title.as_deref().filter(|t| !t.is_empty())?;
            let uri = chunk.uri.as_deref().filter(|u| !u.is_empty())?;
            Some(Source {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}

/// Returns the body of the first ```` ```json ```` fence, or the trimmed text
/// when there is none.
#[must_use]
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    JSON_FENCE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map_or(trimmed, |body| body.as_str())
}

/// Parses a model reply as a JSON array of `T`.
///
/// # Errors
///
/// Returns [`GatewayError::Parse`] for malformed JSON or a shape mismatch.
/// There is no partial result.
pub fn parse_structured<T: DeserializeOwned>(
    context: &'static str,
    text: &str,
) -> Result<Vec<T>, GatewayError> {
    serde_json::from_str(strip_json_fence(text))
        .map_err(|source| GatewayError::Parse { context, source })
}

#[cfg(test)]
mod tests {
    use audiencelab_core::ChartDataItem;

    use super::*;

    fn chunk(title: Option<&str>, uri: Option<&str>) -> WebChunk {
        WebChunk {
            title: title.map(str::to_string),
            uri: uri.map(str::to_string),
        }
    }

    #[test]
    fn dedupes_by_uri_first_occurrence_wins() {
        let sources = normalize_sources(&[
            chunk(Some("t1"), Some("u1")),
            chunk(Some("t2"), Some("u1")),
            chunk(Some("t3"), Some("u2")),
        ]);
        assert_eq!(
            sources,
            vec![
                Source {
                    title: "t1".to_string(),
                    uri: "u1".to_string()
                },
                Source {
                    title: "t3".to_string(),
                    uri: "u2".to_string()
                },
            ]
        );
    }

    #[test]
    fn drops_citations_missing_title_or_uri() {
        let sources = normalize_sources(&[
            chunk(None, Some("u1")),
            chunk(Some("t2"), None),
            chunk(Some(""), Some("u3")),
            chunk(Some("t4"), Some("u4")),
        ]);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].uri, "u4");
    }

    #[test]
    fn dropped_citation_does_not_shadow_later_uri() {
        let sources = normalize_sources(&[chunk(None, Some("u1")), chunk(Some("t1"), Some("u1"))]);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].title, "t1");
    }

    #[test]
    fn fenced_and_bare_json_parse_identically() {
        let fenced = "```json\n[{\"label\":\"A\",\"value\":\"1\"}]\n```";
        let bare = "[{\"label\":\"A\",\"value\":\"1\"}]";
        let from_fenced: Vec<ChartDataItem> = parse_structured("chart data", fenced).unwrap();
        let from_bare: Vec<ChartDataItem> = parse_structured("chart data", bare).unwrap();
        assert_eq!(from_fenced, from_bare);
        assert_eq!(from_bare[0].label, "A");
    }

    #[test]
    fn fence_with_surrounding_prose_is_extracted() {
        let text = "Here is the data:\n```json\n[]\n```\nHope this helps.";
        assert_eq!(strip_json_fence(text), "[]");
    }

    #[test]
    fn unfenced_text_is_trimmed() {
        assert_eq!(strip_json_fence("  \n[1, 2]\n "), "[1, 2]");
    }

    #[test]
    fn numeric_chart_values_are_kept_as_text() {
        let items: Vec<ChartDataItem> = parse_structured(
            "chart data",
            r#"[{"label":"Instagram","value":85},{"label":"YouTube","value":"70%"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].value, "85");
        assert_eq!(items[1].value, "70%");
    }

    #[test]
    fn trailing_comma_is_a_parse_error() {
        let result: Result<Vec<ChartDataItem>, _> =
            parse_structured("chart data", "[{\"label\":\"A\",\"value\":\"1\"},]");
        assert!(matches!(
            result,
            Err(GatewayError::Parse {
                context: "chart data",
                ..
            })
        ));
    }

    #[test]
    fn wrong_shape_is_a_parse_error() {
        let result: Result<Vec<ChartDataItem>, _> =
            parse_structured("chart data", "[{\"name\":\"A\"}]");
        assert!(matches!(result, Err(GatewayError::Parse { .. })));
    }

    #[test]
    fn empty_reply_is_a_parse_error() {
        let result: Result<Vec<ChartDataItem>, _> = parse_structured("chart data", "");
        assert!(result.is_err());
    }
}
