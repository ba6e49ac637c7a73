//! Node descriptors and the external collaborators of the compatibility engine.
//!
//! This crate provides:
//!
//! - **Descriptors**: The canonical, read-only shape of a workflow node
//!   (ports, category, capability flags, declared properties)
//! - **Node references**: A name or an inline descriptor, resolved once
//! - **Catalog**: Lookup of descriptors by name or display name
//! - **Mapping advisor**: Field mapping suggestions between two nodes
//! - **Alternative finder**: Substitute node suggestions

pub mod advisor;
pub mod alternatives;
pub mod catalog;
pub mod descriptor;
pub mod error;

pub use advisor::{MappingAdvisor, MappingContext, MappingSuggestion, PropertyMappingAdvisor};
pub use alternatives::{Alternative, AlternativeFinder, CatalogAlternativeFinder};
pub use catalog::{InMemoryCatalog, NodeCatalog};
pub use descriptor::{NodeDescriptor, NodeRef, Port, PortType, PropertyDescriptor};
pub use error::{CatalogError, CollaboratorError};
