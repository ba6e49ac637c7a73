//! Compatibility report types.

use crate::aggregate::{OverallAssessment, SuggestedWorkflow};
use crate::analysis::PairAnalysis;
use crate::flow::DataFlowAssessment;
use crate::remediation::RemediationPlan;
use crate::score::CompatibilityScore;
use nodefit_catalog::{Alternative, NodeDescriptor, Port};
use nodefit_core::AnalysisId;
use serde::Serialize;

/// The source node as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSummary {
    /// Node name.
    pub name: String,
    /// Integration type.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Output ports.
    pub outputs: Vec<Port>,
    /// Capability tags, sorted.
    pub capabilities: Vec<String>,
}

impl From<&NodeDescriptor> for SourceSummary {
    fn from(node: &NodeDescriptor) -> Self {
        Self {
            name: node.name.clone(),
            node_type: node.type_name().to_string(),
            outputs: node.outputs.clone(),
            capabilities: node.capabilities().into_iter().collect(),
        }
    }
}

/// A target node as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSummary {
    /// Node name.
    pub name: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Integration type.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Primary classification.
    pub category: String,
}

impl From<&NodeDescriptor> for TargetSummary {
    fn from(node: &NodeDescriptor) -> Self {
        Self {
            name: node.name.clone(),
            display_name: node.display_name.clone(),
            node_type: node.type_name().to_string(),
            category: node.category.clone(),
        }
    }
}

/// Everything known about one source/target pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    /// The target node.
    pub target: TargetSummary,
    /// Data-flow findings.
    pub data_flow: DataFlowAssessment,
    /// Score and level.
    pub compatibility: CompatibilityScore,
    /// Narrative analysis.
    pub analysis: PairAnalysis,
    /// Remediation plan, for weak pairs when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solutions: Option<RemediationPlan>,
    /// Substitute targets, for poor pairs when requested and available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Alternative>>,
}

impl PairResult {
    /// Returns the pair score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.compatibility.score
    }
}

/// The answer to a compatibility request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    /// Identifies this analysis in logs.
    pub analysis_id: AnalysisId,
    /// The resolved source node.
    pub source_node: SourceSummary,
    /// One result per resolved target, in request order.
    pub compatibility_results: Vec<PairResult>,
    /// Roll-up over all pairs.
    pub overall_assessment: OverallAssessment,
    /// Candidate workflow, at comprehensive depth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_workflow: Option<SuggestedWorkflow>,
    /// Target identifiers that could not be resolved.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_targets: Vec<String>,
}

impl CompatibilityReport {
    /// Returns the result for a target name, if it was analyzed.
    #[must_use]
    pub fn result_for(&self, target_name: &str) -> Option<&PairResult> {
        self.compatibility_results
            .iter()
            .find(|r| r.target.name == target_name)
    }
}
