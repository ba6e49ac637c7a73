//! Data-flow compatibility between two nodes.
//!
//! A source feeds a target when any of its output ports connects to any of
//! the target's input ports. On top of that the checker asks the mapping
//! advisor whether fields must be mapped, flags targets that reinterpret
//! data, and records structural issues.

use crate::rules::ScoringRules;
use nodefit_catalog::{MappingAdvisor, MappingContext, MappingSuggestion, NodeDescriptor};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

/// A structural problem spotted while checking a pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowIssue {
    /// Source and target both start workflows.
    BothTriggers,
    /// The source declares no output ports.
    NoSourceOutput,
    /// The mapping advisor failed, so mapping needs are unknown.
    MappingAdviceUnavailable { reason: String },
}

impl fmt::Display for FlowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BothTriggers => write!(f, "both nodes are triggers"),
            Self::NoSourceOutput => write!(f, "source produces no output"),
            Self::MappingAdviceUnavailable { reason } => {
                write!(f, "mapping advice unavailable ({reason}); field mapping was not checked")
            }
        }
    }
}

impl Serialize for FlowIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether the mapping advisor answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingAdvice {
    /// The advisor answered; `mapping_required` is reliable.
    Available,
    /// The advisor failed; `mapping_required` defaults to false.
    Unavailable,
}

/// The data-flow view of one source/target pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlowAssessment {
    /// Some output type connects to some input type.
    pub compatible: bool,
    /// The advisor suggested at least one field mapping.
    pub mapping_required: bool,
    /// The target reinterprets data and likely needs a reshaping step.
    pub transformation_needed: bool,
    /// Data formats assumed to pass between the nodes.
    pub supported_formats: Vec<String>,
    /// Structural problems.
    pub potential_issues: Vec<FlowIssue>,
    /// Field mapping suggestions from the advisor.
    pub mapping_suggestions: Vec<MappingSuggestion>,
    /// Whether mapping advice was available.
    pub mapping_advice: MappingAdvice,
}

impl DataFlowAssessment {
    /// Returns true if the given issue was recorded.
    #[must_use]
    pub fn has_issue(&self, issue: &FlowIssue) -> bool {
        self.potential_issues.contains(issue)
    }
}

/// Returns true if any source output connects to any target input.
#[must_use]
pub fn ports_connect(source: &NodeDescriptor, target: &NodeDescriptor) -> bool {
    source.outputs.iter().any(|output| {
        target
            .inputs
            .iter()
            .any(|input| output.port_type.connects_to(&input.port_type))
    })
}

/// Checks how data would flow from `source` into `target`.
///
/// A failing advisor never fails the check: mapping is then assumed not
/// required and the failure is recorded as an issue.
pub async fn check_data_flow(
    source: &NodeDescriptor,
    target: &NodeDescriptor,
    advisor: &dyn MappingAdvisor,
    purpose: Option<&str>,
    rules: &ScoringRules,
) -> DataFlowAssessment {
    let compatible = ports_connect(source, target);

    let mut potential_issues = Vec::new();
    if source.capabilities().contains("trigger") && target.capabilities().contains("trigger") {
        potential_issues.push(FlowIssue::BothTriggers);
    }
    if source.outputs.is_empty() {
        potential_issues.push(FlowIssue::NoSourceOutput);
    }

    let context = MappingContext::new(source).with_purpose(purpose);
    let (mapping_suggestions, mapping_advice) =
        match advisor.suggest_field_mappings(target, &context).await {
            Ok(suggestions) => (suggestions, MappingAdvice::Available),
            Err(e) => {
                warn!(
                    source_node = %source.name,
                    target_node = %target.name,
                    error = %e,
                    "mapping advisor failed, assuming no mapping required"
                );
                potential_issues.push(FlowIssue::MappingAdviceUnavailable {
                    reason: e.to_string(),
                });
                (Vec::new(), MappingAdvice::Unavailable)
            }
        };

    DataFlowAssessment {
        compatible,
        mapping_required: !mapping_suggestions.is_empty(),
        transformation_needed: rules.is_transformation_sensitive(&target.category),
        supported_formats: rules.supported_formats.clone(),
        potential_issues,
        mapping_suggestions,
        mapping_advice,
    }
}
