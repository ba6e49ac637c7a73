//! Error types for the catalog crate.
//!
//! - `CatalogError`: Descriptor lookup and catalog loading failures
//! - `CollaboratorError`: Failures of the advisory collaborators (mapping
//!   advisor, alternative finder), which callers treat as missing information

use std::fmt;

/// Errors from catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No descriptor matches the identifier by name or display name.
    NotFound { identifier: String },
    /// The catalog backend could not be reached.
    Unavailable { reason: String },
    /// Catalog data could not be parsed.
    InvalidData { reason: String },
    /// A catalog file could not be read.
    Io { path: String, reason: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { identifier } => {
                write!(f, "node not found in catalog: {identifier}")
            }
            Self::Unavailable { reason } => {
                write!(f, "catalog unavailable: {reason}")
            }
            Self::InvalidData { reason } => {
                write!(f, "invalid catalog data: {reason}")
            }
            Self::Io { path, reason } => {
                write!(f, "failed to read catalog file '{path}': {reason}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Errors from advisory collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator is not reachable or not configured.
    Unavailable { reason: String },
    /// The collaborator was reached but the call failed.
    Failed { reason: String },
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { reason } => write!(f, "collaborator unavailable: {reason}"),
            Self::Failed { reason } => write!(f, "collaborator call failed: {reason}"),
        }
    }
}

impl std::error::Error for CollaboratorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::NotFound {
            identifier: "httpRequest".to_string(),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("httpRequest"));
    }

    #[test]
    fn io_error_names_path() {
        let err = CatalogError::Io {
            path: "/tmp/nodes.json".to_string(),
            reason: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("/tmp/nodes.json"));
    }

    #[test]
    fn collaborator_error_display() {
        let err = CollaboratorError::Failed {
            reason: "timeout".to_string(),
        };
        assert!(err.to_string().contains("timeout"));
    }
}
