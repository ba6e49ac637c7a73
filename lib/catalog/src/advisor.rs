//! Field mapping advice.
//!
//! A mapping advisor looks at a target node in the context of the node that
//! feeds it and suggests which upstream fields should populate which target
//! fields. An empty suggestion list means no mapping step is needed.

use crate::descriptor::NodeDescriptor;
use crate::error::CollaboratorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A suggested link from a source field to a target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    /// Field or expression on the upstream item.
    pub source_field: String,
    /// Property on the target node.
    pub target_field: String,
    /// How the value must be reshaped on the way, if at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<String>,
}

impl MappingSuggestion {
    /// Creates a direct suggestion with no transformation.
    #[must_use]
    pub fn direct(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field: source_field.into(),
            target_field: target_field.into(),
            transformation: None,
        }
    }

    /// Adds a transformation note.
    #[must_use]
    pub fn with_transformation(mut self, transformation: impl Into<String>) -> Self {
        self.transformation = Some(transformation.into());
        self
    }
}

/// What the advisor knows about the upstream side of the connection.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    /// The node producing data for the target.
    pub source: &'a NodeDescriptor,
    /// The stated purpose of the workflow, if any.
    pub purpose: Option<&'a str>,
}

impl<'a> MappingContext<'a> {
    /// Creates a context for the given source node.
    #[must_use]
    pub fn new(source: &'a NodeDescriptor) -> Self {
        Self {
            source,
            purpose: None,
        }
    }

    /// Adds the workflow purpose.
    #[must_use]
    pub fn with_purpose(mut self, purpose: Option<&'a str>) -> Self {
        self.purpose = purpose;
        self
    }
}

/// Suggests field mappings for a target node.
#[async_trait]
pub trait MappingAdvisor: Send + Sync {
    /// Suggests mappings into `target` given the upstream `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if the advisor cannot produce an answer.
    async fn suggest_field_mappings(
        &self,
        target: &NodeDescriptor,
        context: &MappingContext<'_>,
    ) -> Result<Vec<MappingSuggestion>, CollaboratorError>;
}

/// Suggests mappings from declared node properties.
///
/// Every target property that needs a value and has no same-named source
/// property gets one suggestion. The source side is the first source
/// property whose name overlaps the target name, or a `$json` path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyMappingAdvisor;

impl PropertyMappingAdvisor {
    fn suggest(target: &NodeDescriptor, source: &NodeDescriptor) -> Vec<MappingSuggestion> {
        target
            .properties
            .iter()
            .filter(|property| property.needs_value())
            .filter(|property| source.property(&property.name).is_none())
            .map(|property| {
                let wanted = property.name.to_lowercase();
                let similar = source.properties.iter().find(|candidate| {
                    let name = candidate.name.to_lowercase();
                    !name.is_empty() && (name.contains(&wanted) || wanted.contains(&name))
                });

                match similar {
                    Some(candidate) => MappingSuggestion::direct(&candidate.name, &property.name),
                    None => MappingSuggestion::direct(
                        format!("$json.{}", property.name),
                        &property.name,
                    )
                    .with_transformation(format!(
                        "supply '{}' from {} output",
                        property.name,
                        source.label()
                    )),
                }
            })
            .collect()
    }
}

#[async_trait]
impl MappingAdvisor for PropertyMappingAdvisor {
    async fn suggest_field_mappings(
        &self,
        target: &NodeDescriptor,
        context: &MappingContext<'_>,
    ) -> Result<Vec<MappingSuggestion>, CollaboratorError> {
        Ok(Self::suggest(target, context.source))
    }
}
