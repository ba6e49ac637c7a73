//! Error types for the compatibility crate.
//!
//! Only conditions that make a whole request meaningless are errors here.
//! Unresolved targets and failing collaborators degrade single pairs and
//! are reported inside the result instead.

use std::fmt;

/// Errors that abort a compatibility analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The request names no source node.
    MissingSource,
    /// The request names no target nodes.
    NoTargets,
    /// The source node could not be resolved.
    SourceNotResolved { identifier: String, reason: String },
    /// Scoring rules failed to parse or validate.
    InvalidRules { reason: String },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => write!(f, "a source node is required"),
            Self::NoTargets => write!(f, "at least one target node is required"),
            Self::SourceNotResolved { identifier, reason } => {
                write!(f, "source node '{identifier}' could not be resolved: {reason}")
            }
            Self::InvalidRules { reason } => write!(f, "invalid scoring rules: {reason}"),
        }
    }
}

impl std::error::Error for AnalysisError {}
