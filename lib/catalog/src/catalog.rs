//! Node catalog trait and the in-memory catalog.
//!
//! The catalog is the source of truth for descriptors. Lookups match the
//! unique `name` first and fall back to the human-readable display name.

use crate::descriptor::NodeDescriptor;
use crate::error::CatalogError;
use async_trait::async_trait;
use nodefit_core::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Read-only access to node descriptors.
///
/// Implementations may be backed by a remote registry; lookups never
/// mutate catalog state.
#[async_trait]
pub trait NodeCatalog: Send + Sync {
    /// Resolves an identifier to a descriptor.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when neither a name nor a display
    /// name matches, or another variant when the backend fails.
    async fn resolve(&self, identifier: &str) -> std::result::Result<NodeDescriptor, CatalogError>;

    /// Returns every descriptor in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    async fn list(&self) -> std::result::Result<Vec<NodeDescriptor>, CatalogError>;
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    nodes: Vec<NodeDescriptor>,
    by_name: HashMap<String, usize>,
    by_display_name: HashMap<String, usize>,
}

impl InMemoryCatalog {
    /// Creates a catalog from descriptors.
    ///
    /// When two descriptors share a name or display name, the first wins.
    #[must_use]
    pub fn new(nodes: Vec<NodeDescriptor>) -> Self {
        let mut by_name = HashMap::with_capacity(nodes.len());
        let mut by_display_name = HashMap::new();

        for (index, node) in nodes.iter().enumerate() {
            by_name.entry(node.name.clone()).or_insert(index);
            if let Some(display_name) = &node.display_name {
                by_display_name
                    .entry(display_name.clone())
                    .or_insert(index);
            }
        }

        Self {
            nodes,
            by_name,
            by_display_name,
        }
    }

    /// Parses a catalog from a JSON array of descriptors.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidData` if the document is not an array of
    /// descriptors.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let nodes: Vec<NodeDescriptor> =
            serde_json::from_str(json).map_err(|e| CatalogError::InvalidData {
                reason: e.to_string(),
            })?;
        Ok(Self::new(nodes))
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read, or
    /// `CatalogError::InvalidData` if it does not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let catalog = Self::from_json(&json)?;
        debug!(path = %path.display(), nodes = catalog.len(), "loaded node catalog");
        Ok(catalog)
    }

    /// Returns the descriptor matching an identifier, if any.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&NodeDescriptor> {
        self.by_name
            .get(identifier)
            .or_else(|| self.by_display_name.get(identifier))
            .map(|&index| &self.nodes[index])
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the catalog holds no descriptors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[async_trait]
impl NodeCatalog for InMemoryCatalog {
    async fn resolve(&self, identifier: &str) -> std::result::Result<NodeDescriptor, CatalogError> {
        self.get(identifier)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    async fn list(&self) -> std::result::Result<Vec<NodeDescriptor>, CatalogError> {
        Ok(self.nodes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            NodeDescriptor::new("webhook", "trigger").with_display_name("Webhook"),
            NodeDescriptor::new("httpRequest", "processing").with_display_name("HTTP Request"),
            NodeDescriptor::new("httpRequestV2", "processing").with_display_name("HTTP Request"),
        ])
    }

    #[tokio::test]
    async fn resolves_by_name() {
        let catalog = sample_catalog();
        let node = catalog.resolve("httpRequest").await.expect("should resolve");
        assert_eq!(node.category, "processing");
    }

    #[tokio::test]
    async fn falls_back_to_display_name() {
        let catalog = sample_catalog();
        let node = catalog.resolve("HTTP Request").await.expect("should resolve");
        assert_eq!(node.name, "httpRequest");
    }

    #[tokio::test]
    async fn name_match_is_exact() {
        let catalog = sample_catalog();
        let err = catalog.resolve("HTTPREQUEST").await.expect_err("should miss");
        assert_eq!(
            err,
            CatalogError::NotFound {
                identifier: "HTTPREQUEST".to_string()
            }
        );
    }

    #[tokio::test]
    async fn list_returns_all_nodes() {
        let catalog = sample_catalog();
        assert_eq!(catalog.list().await.expect("list").len(), 3);
    }

    #[test]
    fn from_json_rejects_non_array() {
        let err = InMemoryCatalog::from_json(r#"{"name": "x"}"#).expect_err("should fail");
        assert!(err.to_string().contains("invalid catalog data"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"name": "slack", "category": "communication", "inputs": ["main"]}}]"#
        )
        .expect("write");

        let catalog = InMemoryCatalog::from_json_file(file.path()).expect("load");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("slack").expect("present").inputs.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = InMemoryCatalog::from_json_file(dir.path().join("absent.json"))
            .expect_err("should fail");
        assert!(err.to_string().contains("absent.json"));
    }
}
