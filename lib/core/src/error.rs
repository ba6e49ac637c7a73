//! Error handling foundation for nodefit.
//!
//! This module provides only the `Result` type alias using rootcause.
//! Each crate defines its own error enums in its own `error` module and
//! wraps them in a [`Report`] as they cross a public boundary.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
