//! Node reference resolution.
//!
//! Inline descriptors pass through unchanged; names go to the catalog.
//! A source that fails to resolve aborts the analysis, while targets that
//! fail are skipped and reported.

use crate::error::AnalysisError;
use nodefit_catalog::{CatalogError, NodeCatalog, NodeDescriptor, NodeRef};
use tracing::warn;

/// Resolves one node reference.
///
/// # Errors
///
/// Returns the catalog's error for names it cannot resolve.
pub async fn resolve(
    catalog: &dyn NodeCatalog,
    node: &NodeRef,
) -> Result<NodeDescriptor, CatalogError> {
    match node {
        NodeRef::Inline(descriptor) => Ok(descriptor.as_ref().clone()),
        NodeRef::Name(identifier) => catalog.resolve(identifier).await,
    }
}

/// Resolves the source node.
///
/// # Errors
///
/// Returns `SourceNotResolved` if the catalog cannot resolve it.
pub async fn resolve_source(
    catalog: &dyn NodeCatalog,
    node: &NodeRef,
) -> Result<NodeDescriptor, AnalysisError> {
    resolve(catalog, node)
        .await
        .map_err(|e| AnalysisError::SourceNotResolved {
            identifier: node.label().to_string(),
            reason: e.to_string(),
        })
}

/// Resolved targets plus the identifiers that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTargets {
    /// Descriptors, in request order.
    pub nodes: Vec<NodeDescriptor>,
    /// Identifiers that were skipped.
    pub skipped: Vec<String>,
}

/// Resolves every target, skipping the ones the catalog cannot resolve.
pub async fn resolve_targets(catalog: &dyn NodeCatalog, nodes: &[NodeRef]) -> ResolvedTargets {
    let mut resolved = ResolvedTargets::default();
    for node in nodes {
        match resolve(catalog, node).await {
            Ok(descriptor) => resolved.nodes.push(descriptor),
            Err(e) => {
                warn!(target_node = %node.label(), error = %e, "skipping unresolved target node");
                resolved.skipped.push(node.label().to_string());
            }
        }
    }
    resolved
}
