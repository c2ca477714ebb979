//! The topic catalog.
//!
//! An ordered, read-only list of tutorial topics loaded once at startup,
//! either from the built-in asset or from a user-supplied JSON file. The
//! catalog is the external collaborator of the viewer: beyond duplicate-id
//! handling it performs no validation of topic content.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Built-in topic catalog, shipped with the binary.
const BUILTIN_TOPICS: &str = include_str!("../../assets/topics.json");

/// One tutorial topic. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique, stable id used as the routing key.
    pub id: String,
    /// Title shown in the sidebar and the content header.
    pub title: String,
    /// Raw markdown-like source text, segmented on demand.
    pub content: String,
}

/// An ordered collection of topics with id-based lookup.
///
/// Construction guarantees the catalog is non-empty and ids are unique:
/// later records sharing an id with an earlier one are dropped with a
/// warning rather than silently shadowed, so lookup by id is unambiguous.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
}

impl Catalog {
    /// Build a catalog from a topic list.
    ///
    /// Fails on an empty list. Duplicate ids keep the first occurrence; the
    /// shadowed record is dropped and logged.
    pub fn from_topics(topics: Vec<Topic>) -> Result<Self> {
        if topics.is_empty() {
            bail!("catalog contains no topics");
        }

        let mut seen = Vec::with_capacity(topics.len());
        let mut unique = Vec::with_capacity(topics.len());
        for topic in topics {
            if seen.contains(&topic.id) {
                tracing::warn!(id = %topic.id, title = %topic.title, "dropping topic with duplicate id");
                continue;
            }
            seen.push(topic.id.clone());
            unique.push(topic);
        }

        Ok(Self { topics: unique })
    }

    /// Parse a catalog from a JSON array of topics.
    pub fn from_json(json: &str) -> Result<Self> {
        let topics: Vec<Topic> = serde_json::from_str(json).context("malformed topic catalog")?;
        Self::from_topics(topics)
    }

    /// Load a catalog from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("loading catalog {}", path.display()))
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_TOPICS).context("built-in catalog")
    }

    /// All topics in catalog order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// The first topic, the fallback for unknown ids.
    pub fn first(&self) -> &Topic {
        &self.topics[0]
    }

    /// Look up a topic by id, falling back to the first topic.
    ///
    /// An unknown id is a `LookupFailure` in the viewer's taxonomy: it is
    /// resolved silently and never surfaced to the user.
    pub fn resolve(&self, id: &str) -> &Topic {
        self.topics.iter().find(|t| t.id == id).unwrap_or_else(|| self.first())
    }

    /// True if a topic with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.topics.iter().any(|t| t.id == id)
    }

    /// Position of a topic id in catalog order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.id == id)
    }

    /// Number of topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Always false: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn topic(id: &str, title: &str) -> Topic {
        Topic {
            id: id.to_string(),
            title: title.to_string(),
            content: format!("About {title}."),
        }
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.first().id, "install");
        assert!(catalog.contains("explain-analyze"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(Catalog::from_topics(Vec::new()).is_err());
        assert!(Catalog::from_json("[]").is_err());
    }

    #[test]
    fn test_resolve_known_id() {
        let catalog =
            Catalog::from_topics(vec![topic("a", "A"), topic("b", "B")]).unwrap();
        assert_eq!(catalog.resolve("b").title, "B");
    }

    #[test]
    fn test_resolve_unknown_id_falls_back_to_first() {
        let catalog =
            Catalog::from_topics(vec![topic("a", "A"), topic("b", "B")]).unwrap();
        assert_eq!(catalog.resolve("missing").id, "a");
    }

    #[test]
    fn test_duplicate_id_keeps_first_occurrence() {
        let catalog = Catalog::from_topics(vec![
            topic("explain-analyze", "First"),
            topic("other", "Other"),
            topic("explain-analyze", "Second"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.resolve("explain-analyze").title, "First");
    }

    #[test]
    fn test_order_preserved() {
        let catalog = Catalog::from_topics(vec![
            topic("c", "C"),
            topic("a", "A"),
            topic("b", "B"),
        ])
        .unwrap();
        let ids: Vec<&str> = catalog.topics().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(catalog.position("b"), Some(2));
        assert_eq!(catalog.position("missing"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "one", "title": "One", "content": "```sql\nSELECT 1;\n```"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().title, "One");
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(Catalog::load("/nonexistent/topics.json").is_err());
    }

    #[test]
    fn test_load_malformed_json_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Catalog::load(file.path()).is_err());
    }
}
