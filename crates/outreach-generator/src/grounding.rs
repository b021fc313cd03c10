//! Recover source citations from grounding metadata
//!
//! The metadata shape is not fixed: field names are camelCase on the REST API
//! and snake_case in some SDK dumps, URLs live under `uri` or `url`, and whole
//! sections come and go between versions. Instead of a schema, a few
//! independent probes each look for one known shape and return whatever they
//! find. A textual scan runs only when no probe found anything.

use outreach_domain::Resource;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// URL-shaped substrings in the serialized metadata
static URL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]()]+"#).ok());

/// Trailing characters stripped from textual matches
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// A structured probe: one known metadata shape
type Probe = fn(&Value) -> Vec<Resource>;

const STRUCTURED_PROBES: &[(&str, Probe)] = &[
    ("grounding_chunks", probe_grounding_chunks as Probe),
    ("search_query_results", probe_query_results as Probe),
];

/// Extract a deduplicated, discovery-ordered list of sources
///
/// Never fails: absent or unrecognizable metadata yields an empty list.
///
/// # Examples
///
/// ```
/// use outreach_generator::extract_resources;
/// use serde_json::json;
///
/// let metadata = json!({
///     "groundingChunks": [
///         {"web": {"uri": "https://a.example", "title": "A"}},
///         {"web": {"uri": "https://a.example", "title": "A again"}}
///     ]
/// });
/// let resources = extract_resources(Some(&metadata));
/// assert_eq!(resources.len(), 1);
/// assert_eq!(resources[0].title, "A");
///
/// assert!(extract_resources(None).is_empty());
/// ```
pub fn extract_resources(metadata: Option<&Value>) -> Vec<Resource> {
    let metadata = match metadata {
        Some(m) if !m.is_null() => m,
        _ => return Vec::new(),
    };

    let mut candidates = Vec::new();
    for (name, probe) in STRUCTURED_PROBES {
        let found = probe(metadata);
        debug!("Grounding probe '{}' found {} candidates", name, found.len());
        candidates.extend(found);
    }

    if candidates.is_empty() {
        candidates = scan_for_urls(metadata);
        debug!("Textual URL scan found {} candidates", candidates.len());
    }

    dedup_by_url(candidates)
}

/// `groundingChunks[].web.{uri|url, title}`
fn probe_grounding_chunks(metadata: &Value) -> Vec<Resource> {
    let Some(chunks) = field(metadata, &["groundingChunks", "grounding_chunks"])
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    chunks
        .iter()
        .filter_map(|chunk| chunk.get("web"))
        .filter_map(|web| {
            let url = string_field(web, &["uri", "url"])?;
            Some(Resource::new(url, string_field(web, &["title"]).map(str::to_string)))
        })
        .collect()
}

/// `webSearchQueries[].results[].{url|uri, title|name}`
fn probe_query_results(metadata: &Value) -> Vec<Resource> {
    let Some(queries) = field(metadata, &["webSearchQueries", "web_search_queries"])
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    queries
        .iter()
        .filter_map(|query| query.get("results").and_then(Value::as_array))
        .flatten()
        .filter_map(|result| {
            let url = string_field(result, &["url", "uri"])?;
            let title = string_field(result, &["title", "name"]).map(str::to_string);
            Some(Resource::new(url, title))
        })
        .collect()
}

/// Last resort: URL-shaped substrings anywhere in the serialized metadata
fn scan_for_urls(metadata: &Value) -> Vec<Resource> {
    let Some(pattern) = URL_PATTERN.as_ref() else {
        return Vec::new();
    };
    let Ok(serialized) = serde_json::to_string(metadata) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    pattern
        .find_iter(&serialized)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|url| !url.is_empty() && seen.insert(url.to_string()))
        .map(|url| Resource::new(url, None))
        .collect()
}

/// First occurrence of each URL wins, order preserved
fn dedup_by_url(candidates: Vec<Resource>) -> Vec<Resource> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|r| !r.url.is_empty() && seen.insert(r.url.clone()))
        .collect()
}

/// First present field among alternative names
fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| value.get(*name))
}

/// First non-empty string field among alternative names, taken as-is
fn string_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|name| value.get(*name).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_absent() {
        assert!(extract_resources(None).is_empty());
        assert!(extract_resources(Some(&Value::Null)).is_empty());
        assert!(extract_resources(Some(&json!({}))).is_empty());
    }

    #[test]
    fn test_fields_kept_verbatim() {
        let metadata = json!({
            "groundingChunks": [
                {"web": {"uri": " https://a.example ", "title": " A "}},
                {"web": {"uri": "https://a.example"}}
            ]
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].url, " https://a.example ");
        assert_eq!(resources[0].title, " A ");
        assert_eq!(resources[1].url, "https://a.example");
    }

    #[test]
    fn test_chunks_with_uri_and_url() {
        let metadata = json!({
            "groundingChunks": [
                {"web": {"uri": "https://a.example", "title": "A"}},
                {"web": {"url": "https://b.example"}},
                {"retrievedContext": {"uri": "https://ignored.example"}},
                {"web": {"title": "no url"}}
            ]
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(
            resources,
            vec![
                Resource::new("https://a.example", Some("A".to_string())),
                Resource::new("https://b.example", None),
            ]
        );
        assert_eq!(resources[1].title, "https://b.example");
    }

    #[test]
    fn test_snake_case_keys() {
        let metadata = json!({
            "grounding_chunks": [{"web": {"uri": "https://snake.example", "title": "Snake"}}]
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].title, "Snake");
    }

    #[test]
    fn test_duplicate_urls_keep_first_title() {
        let metadata = json!({
            "groundingChunks": [
                {"web": {"uri": "https://dup.example", "title": "First"}},
                {"web": {"uri": "https://dup.example", "title": "Second"}}
            ]
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].title, "First");
    }

    #[test]
    fn test_query_results_appended_after_chunks() {
        let metadata = json!({
            "groundingChunks": [{"web": {"uri": "https://chunk.example"}}],
            "webSearchQueries": [
                "plain query string",
                {"results": [
                    {"url": "https://result.example", "name": "Result"},
                    {"uri": "https://chunk.example", "title": "Dup"}
                ]}
            ]
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].url, "https://chunk.example");
        assert_eq!(resources[0].title, "https://chunk.example");
        assert_eq!(resources[1].url, "https://result.example");
        assert_eq!(resources[1].title, "Result");
    }

    #[test]
    fn test_textual_fallback() {
        let metadata = json!({
            "searchEntryPoint": {
                "renderedContent": "<a href=\"https://x.example/page\">x</a> see https://y.example/path. and (https://z.example)"
            },
            "webSearchQueries": ["jane doe acme"]
        });
        let urls: Vec<String> = extract_resources(Some(&metadata))
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert_eq!(
            urls,
            vec!["https://x.example/page", "https://y.example/path", "https://z.example"]
        );
    }

    #[test]
    fn test_textual_fallback_not_merged_with_structured() {
        let metadata = json!({
            "groundingChunks": [{"web": {"uri": "https://chunk.example"}}],
            "note": "also mentions https://text.example"
        });
        let resources = extract_resources(Some(&metadata));
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].url, "https://chunk.example");
    }

    #[test]
    fn test_unexpected_shapes() {
        for metadata in [
            json!("https://string.example"),
            json!(42),
            json!([1, 2, {"web": "https://arr.example"}]),
            json!({"groundingChunks": "not an array"}),
            json!({"groundingChunks": [null, 3, {"web": null}, {"web": {"uri": 7}}]}),
        ] {
            let resources = extract_resources(Some(&metadata));
            assert!(resources.iter().all(|r| r.url.starts_with("http")));
        }
    }
}
