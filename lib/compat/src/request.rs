//! Compatibility analysis requests.

use crate::error::AnalysisError;
use nodefit_catalog::NodeRef;
use serde::{Deserialize, Serialize};

/// How much work an analysis performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisDepth {
    /// Pair results and the overall assessment.
    Basic,
    /// Same output as basic; the default depth.
    #[default]
    Detailed,
    /// Adds a synthesized workflow sequence.
    Comprehensive,
}

/// What the caller is trying to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowContext {
    /// The goal of the workflow.
    #[serde(default)]
    pub purpose: Option<String>,
    /// Free-form description of how data moves.
    #[serde(default)]
    pub data_flow: Option<String>,
    /// Constraints the workflow must respect.
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// One compatibility analysis invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityRequest {
    /// The node whose outputs feed the targets.
    pub source_node: NodeRef,
    /// Candidate downstream nodes, in caller order.
    #[serde(default)]
    pub target_nodes: Vec<NodeRef>,
    /// Optional workflow context.
    #[serde(default)]
    pub workflow_context: Option<WorkflowContext>,
    /// Analysis depth.
    #[serde(default)]
    pub analysis_depth: AnalysisDepth,
    /// Whether to look up substitutes for poor pairs.
    #[serde(default = "default_true")]
    pub include_alternatives: bool,
    /// Whether to plan remediation for weak pairs.
    #[serde(default = "default_true")]
    pub include_solutions: bool,
}

fn default_true() -> bool {
    true
}

impl CompatibilityRequest {
    /// Creates a request with default options.
    #[must_use]
    pub fn new(source_node: impl Into<NodeRef>, target_nodes: Vec<NodeRef>) -> Self {
        Self {
            source_node: source_node.into(),
            target_nodes,
            workflow_context: None,
            analysis_depth: AnalysisDepth::default(),
            include_alternatives: true,
            include_solutions: true,
        }
    }

    /// Sets the workflow context.
    #[must_use]
    pub fn with_context(mut self, context: WorkflowContext) -> Self {
        self.workflow_context = Some(context);
        self
    }

    /// Sets the analysis depth.
    #[must_use]
    pub fn with_depth(mut self, depth: AnalysisDepth) -> Self {
        self.analysis_depth = depth;
        self
    }

    /// Enables or disables alternative suggestions.
    #[must_use]
    pub fn with_alternatives(mut self, include: bool) -> Self {
        self.include_alternatives = include;
        self
    }

    /// Enables or disables remediation plans.
    #[must_use]
    pub fn with_solutions(mut self, include: bool) -> Self {
        self.include_solutions = include;
        self
    }

    /// Returns the stated workflow purpose, if any.
    #[must_use]
    pub fn purpose(&self) -> Option<&str> {
        self.workflow_context
            .as_ref()
            .and_then(|c| c.purpose.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Checks the request-level invariants.
    ///
    /// # Errors
    ///
    /// Returns `MissingSource` for a blank source name and `NoTargets` for an
    /// empty target list.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let NodeRef::Name(name) = &self.source_node {
            if name.trim().is_empty() {
                return Err(AnalysisError::MissingSource);
            }
        }
        if self.target_nodes.is_empty() {
            return Err(AnalysisError::NoTargets);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_fields_are_missing() {
        let request: CompatibilityRequest =
            serde_json::from_str(r#"{"sourceNode": "webhook", "targetNodes": ["httpRequest"]}"#)
                .expect("deserialize");

        assert_eq!(request.analysis_depth, AnalysisDepth::Detailed);
        assert!(request.include_alternatives);
        assert!(request.include_solutions);
        assert!(request.workflow_context.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn missing_targets_fail_validation() {
        let request: CompatibilityRequest =
            serde_json::from_str(r#"{"sourceNode": "webhook"}"#).expect("deserialize");
        assert_eq!(request.validate(), Err(AnalysisError::NoTargets));
    }

    #[test]
    fn blank_source_fails_validation() {
        let request = CompatibilityRequest::new("  ", vec![NodeRef::from("slack")]);
        assert_eq!(request.validate(), Err(AnalysisError::MissingSource));
    }

    #[test]
    fn depth_parses_lowercase() {
        let request: CompatibilityRequest = serde_json::from_str(
            r#"{"sourceNode": "a", "targetNodes": ["b"], "analysisDepth": "comprehensive"}"#,
        )
        .expect("deserialize");
        assert_eq!(request.analysis_depth, AnalysisDepth::Comprehensive);
    }

    #[test]
    fn blank_purpose_is_ignored() {
        let request = CompatibilityRequest::new("a", vec![NodeRef::from("b")]).with_context(
            WorkflowContext {
                purpose: Some("   ".to_string()),
                ..WorkflowContext::default()
            },
        );
        assert_eq!(request.purpose(), None);
    }
}
