//! Command-line front end for nodefit.
//!
//! Loads a node catalog and optional scoring rules, runs one compatibility
//! request read from a JSON file, and renders the report as JSON.

pub mod config;
pub mod error;

pub use crate::config::{CliConfig, load_rules};
pub use crate::error::CliError;

use nodefit_catalog::{CatalogAlternativeFinder, InMemoryCatalog, NodeCatalog};
use nodefit_compat::{CompatibilityEngine, CompatibilityRequest, ScoringRules};
use nodefit_core::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Loads settings from the environment and analyzes the request file.
///
/// # Errors
///
/// Returns a `CliError` describing the first step that failed.
pub async fn run(request_path: &Path) -> Result<String, CliError> {
    let settings = CliConfig::load().map_err(|e| CliError::Config {
        reason: e.to_string(),
    })?;
    analyze_file(&settings, request_path).await
}

/// Analyzes the request file with the given settings and returns the
/// pretty-printed JSON report.
///
/// # Errors
///
/// Returns a `CliError` describing the first step that failed.
pub async fn analyze_file(settings: &CliConfig, request_path: &Path) -> Result<String, CliError> {
    let catalog = InMemoryCatalog::from_json_file(&settings.catalog_path).map_err(|e| {
        CliError::Catalog {
            reason: e.to_string(),
        }
    })?;
    info!(
        path = %settings.catalog_path.display(),
        nodes = catalog.len(),
        "loaded node catalog"
    );
    let catalog: Arc<dyn NodeCatalog> = Arc::new(catalog);

    let rules = match &settings.rules_path {
        Some(path) => load_rules(path)?,
        None => ScoringRules::default(),
    };

    let request = read_request(request_path).await?;

    let engine = CompatibilityEngine::new(catalog.clone())
        .with_alternative_finder(Arc::new(CatalogAlternativeFinder::new(catalog)))
        .with_rules(rules);
    let report = engine
        .analyze(&request)
        .await
        .map_err(|e| CliError::Analysis {
            reason: e.to_string(),
        })?;

    let rendered = serde_json::to_string_pretty(&report).map_err(|e| CliError::Output {
        reason: e.to_string(),
    })?;
    Ok(rendered)
}

async fn read_request(path: &Path) -> std::result::Result<CompatibilityRequest, CliError> {
    let request_error = |reason: String| CliError::Request {
        path: path.display().to_string(),
        reason,
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| request_error(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| request_error(e.to_string()))
}
