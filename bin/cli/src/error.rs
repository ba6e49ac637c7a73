//! Error types for the command-line front end.

use std::fmt;

/// Errors that end a CLI run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Settings could not be loaded.
    Config { reason: String },
    /// The node catalog could not be loaded.
    Catalog { reason: String },
    /// The scoring rules file could not be loaded.
    Rules { path: String, reason: String },
    /// The request file could not be read or parsed.
    Request { path: String, reason: String },
    /// The analysis itself failed.
    Analysis { reason: String },
    /// The report could not be serialized.
    Output { reason: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { reason } => write!(f, "failed to load configuration: {reason}"),
            Self::Catalog { reason } => write!(f, "failed to load node catalog: {reason}"),
            Self::Rules { path, reason } => {
                write!(f, "failed to load scoring rules '{path}': {reason}")
            }
            Self::Request { path, reason } => {
                write!(f, "failed to read request '{path}': {reason}")
            }
            Self::Analysis { reason } => write!(f, "analysis failed: {reason}"),
            Self::Output { reason } => write!(f, "failed to write report: {reason}"),
        }
    }
}

impl std::error::Error for CliError {}
