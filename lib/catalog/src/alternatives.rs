//! Substitute node suggestions.

use crate::catalog::NodeCatalog;
use crate::descriptor::NodeDescriptor;
use crate::error::CollaboratorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A node that could replace a target node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    /// Name of the substitute node.
    pub node: String,
    /// Why it was suggested.
    pub reason: String,
    /// What it offers over the requested target.
    pub benefit: String,
}

/// Finds substitutes for a node.
#[async_trait]
pub trait AlternativeFinder: Send + Sync {
    /// Suggests nodes that could stand in for `target`.
    ///
    /// `required_features` are capability tags the substitute should carry.
    ///
    /// # Errors
    ///
    /// Returns an error if the finder cannot produce an answer.
    async fn find_alternatives(
        &self,
        target: &NodeDescriptor,
        required_features: &[String],
    ) -> Result<Vec<Alternative>, CollaboratorError>;
}

/// Suggests catalog nodes from the same category as the target.
///
/// Candidates are ranked by how many required features they cover, then by
/// name.
#[derive(Clone)]
pub struct CatalogAlternativeFinder {
    catalog: Arc<dyn NodeCatalog>,
}

impl CatalogAlternativeFinder {
    /// Creates a finder over the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<dyn NodeCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl AlternativeFinder for CatalogAlternativeFinder {
    async fn find_alternatives(
        &self,
        target: &NodeDescriptor,
        required_features: &[String],
    ) -> Result<Vec<Alternative>, CollaboratorError> {
        let nodes = self
            .catalog
            .list()
            .await
            .map_err(|e| CollaboratorError::Unavailable {
                reason: e.to_string(),
            })?;

        let mut ranked: Vec<(Vec<&String>, NodeDescriptor)> = nodes
            .into_iter()
            .filter(|node| node.name != target.name)
            .filter(|node| node.category.eq_ignore_ascii_case(&target.category))
            .map(|node| {
                let capabilities = node.capabilities();
                let covered = required_features
                    .iter()
                    .filter(|feature| capabilities.contains(feature.as_str()))
                    .collect();
                (covered, node)
            })
            .collect();

        ranked.sort_by(|(a_covered, a), (b_covered, b)| {
            b_covered
                .len()
                .cmp(&a_covered.len())
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(ranked
            .into_iter()
            .map(|(covered, node)| {
                let benefit = if covered.is_empty() {
                    format!("Drop-in substitute for {}", target.label())
                } else {
                    let features: Vec<&str> = covered.iter().map(|f| f.as_str()).collect();
                    format!("Supports {}", features.join(", "))
                };
                Alternative {
                    reason: format!(
                        "Same '{}' category as {}",
                        target.category,
                        target.label()
                    ),
                    benefit,
                    node: node.name,
                }
            })
            .collect())
    }
}
