//! Core types and utilities shared by the nodefit crates.
//!
//! This crate provides the error-handling foundation and the strongly-typed
//! identifiers used by the catalog and the compatibility engine.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{AnalysisId, ParseIdError};
