//! Research source citations

use serde::{Deserialize, Serialize};

/// A web source the search-grounded generation drew upon
///
/// Identity is the URL; the title falls back to the URL when the metadata
/// carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Source URL (deduplication key)
    pub url: String,

    /// Display title
    pub title: String,
}

impl Resource {
    /// Create a resource, defaulting the title to the URL when absent or blank
    pub fn new(url: impl Into<String>, title: Option<String>) -> Self {
        let url = url.into();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| url.clone());
        Self { url, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_defaults_to_url() {
        let r = Resource::new("https://example.com", None);
        assert_eq!(r.title, "https://example.com");

        let r = Resource::new("https://example.com", Some(String::new()));
        assert_eq!(r.title, "https://example.com");
    }

    #[test]
    fn test_explicit_title_kept() {
        let r = Resource::new("https://example.com", Some("Example".to_string()));
        assert_eq!(r.title, "Example");
    }
}
