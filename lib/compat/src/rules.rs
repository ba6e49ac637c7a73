//! Tunable scoring rules.
//!
//! Weights, the category adjacency table, the workflow idiom table and the
//! other lookup tables used by the engine. Defaults reproduce the built-in
//! heuristics; every field can be overridden from a configuration document,
//! and any field left out keeps its default. Unknown keys are rejected so a
//! misspelled table never silently falls back to the defaults. Multi-word
//! keys also accept their all-lowercase spelling for formats whose loaders
//! fold key case.

use crate::error::AnalysisError;
use nodefit_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weights of the additive score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoringWeights {
    /// Added when some output port connects to some input port.
    #[serde(alias = "dataflow")]
    pub data_flow: f64,
    /// Added when ports do not connect but a transformation step could bridge them.
    #[serde(alias = "partialtransformation")]
    pub partial_transformation: f64,
    /// Multiplied by the category compatibility (0 or 1).
    pub category: f64,
    /// Multiplied by the Jaccard overlap of capability tags.
    #[serde(alias = "capabilityoverlap")]
    pub capability_overlap: f64,
    /// Subtracted when a field mapping step is needed.
    #[serde(alias = "mappingpenalty")]
    pub mapping_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            data_flow: 0.4,
            partial_transformation: 0.2,
            category: 0.2,
            capability_overlap: 0.2,
            mapping_penalty: 0.1,
        }
    }
}

/// An ordered pair of complementary categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryPair {
    /// Category of the upstream node.
    pub source: String,
    /// Category of the downstream node.
    pub target: String,
}

impl CategoryPair {
    fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    fn matches(&self, source: &str, target: &str) -> bool {
        self.source.eq_ignore_ascii_case(source.trim())
            && self.target.eq_ignore_ascii_case(target.trim())
    }
}

/// A well-known pairing of nodes, matched by substrings of their names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowIdiom {
    /// Substring of the upstream node name.
    pub source: String,
    /// Substring of the downstream node name.
    pub target: String,
    /// Score added when the idiom matches.
    #[serde(default = "default_idiom_bonus")]
    pub bonus: f64,
}

fn default_idiom_bonus() -> f64 {
    0.2
}

impl WorkflowIdiom {
    fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            bonus: default_idiom_bonus(),
        }
    }

    /// Returns a `source→target` label for explanations.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}→{}", self.source, self.target)
    }

    fn matches(&self, source_name: &str, target_name: &str) -> bool {
        source_name.contains(&self.source.to_lowercase())
            && target_name.contains(&self.target.to_lowercase())
    }
}

/// A general-purpose node that can sit between two incompatible nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntermediateNode {
    /// Node name.
    pub node: String,
    /// What it does in between.
    pub purpose: String,
}

impl IntermediateNode {
    fn new(node: &str, purpose: &str) -> Self {
        Self {
            node: node.to_string(),
            purpose: purpose.to_string(),
        }
    }
}

/// Maps node names to a step purpose in a suggested workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PurposeRule {
    /// Name substrings, any of which selects this rule.
    pub contains: Vec<String>,
    /// The purpose to report.
    pub purpose: String,
}

impl PurposeRule {
    fn new(contains: &[&str], purpose: &str) -> Self {
        Self {
            contains: contains.iter().map(|s| (*s).to_string()).collect(),
            purpose: purpose.to_string(),
        }
    }
}

/// Every tunable the engine consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoringRules {
    /// Score weights.
    pub weights: ScoringWeights,
    /// Category pairs that complement each other, in flow direction.
    #[serde(alias = "categoryadjacency")]
    pub category_adjacency: Vec<CategoryPair>,
    /// Known node pairings with a bonus.
    #[serde(alias = "workflowidioms")]
    pub workflow_idioms: Vec<WorkflowIdiom>,
    /// Target categories that reinterpret data rather than pass it on.
    #[serde(alias = "transformationsensitivecategories")]
    pub transformation_sensitive_categories: BTreeSet<String>,
    /// Data formats assumed to flow between any two nodes.
    #[serde(alias = "supportedformats")]
    pub supported_formats: Vec<String>,
    /// Nodes suggested between incompatible pairs.
    #[serde(alias = "intermediatenodes")]
    pub intermediate_nodes: Vec<IntermediateNode>,
    /// Purpose rules for suggested workflow steps, first match wins.
    #[serde(alias = "purposerules")]
    pub purpose_rules: Vec<PurposeRule>,
    /// Purpose used when no rule matches.
    #[serde(alias = "defaultpurpose")]
    pub default_purpose: String,
}

impl Default for ScoringRules {
    fn default() -> Self {
        let adjacency = [
            ("trigger", "processing"),
            ("trigger", "communication"),
            ("trigger", "data"),
            ("trigger", "transform"),
            ("trigger", "ai"),
            ("processing", "communication"),
            ("processing", "data"),
            ("processing", "ai"),
            ("transform", "communication"),
            ("transform", "data"),
            ("transform", "ai"),
            ("data", "processing"),
            ("data", "transform"),
            ("data", "communication"),
            ("data", "ai"),
            ("ai", "communication"),
            ("ai", "data"),
            ("ai", "processing"),
        ];
        let idioms = [
            ("webhook", "function"),
            ("webhook", "code"),
            ("webhook", "http"),
            ("webhook", "respond"),
            ("schedule", "email"),
            ("schedule", "http"),
            ("cron", "email"),
            ("cron", "http"),
            ("http", "set"),
            ("form", "email"),
            ("manual", "http"),
        ];

        Self {
            weights: ScoringWeights::default(),
            category_adjacency: adjacency
                .iter()
                .map(|(s, t)| CategoryPair::new(s, t))
                .collect(),
            workflow_idioms: idioms
                .iter()
                .map(|(s, t)| WorkflowIdiom::new(s, t))
                .collect(),
            transformation_sensitive_categories: ["ai", "ai/ml", "langchain", "machine-learning"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            supported_formats: ["json", "text", "binary"]
                .iter()
                .map(|f| (*f).to_string())
                .collect(),
            intermediate_nodes: vec![
                IntermediateNode::new("set", "Reshape fields into the structure the target expects"),
                IntermediateNode::new("code", "Convert data with custom logic"),
                IntermediateNode::new("merge", "Combine data from several branches"),
                IntermediateNode::new("filter", "Drop items the target cannot handle"),
            ],
            purpose_rules: vec![
                PurposeRule::new(&["http"], "HTTP request/API call"),
                PurposeRule::new(&["email", "gmail", "mail"], "Send email"),
                PurposeRule::new(
                    &["slack", "discord", "telegram", "teams", "mattermost"],
                    "Team messaging",
                ),
                PurposeRule::new(&["code", "function"], "Custom data processing"),
                PurposeRule::new(&["set", "transform"], "Data mapping/transformation"),
                PurposeRule::new(&["switch", "filter"], "Conditional routing"),
                PurposeRule::new(
                    &["sheet", "postgres", "mysql", "mongo", "airtable", "database"],
                    "Data storage",
                ),
                PurposeRule::new(&["openai", "llm", "agent", "chat"], "AI processing"),
            ],
            default_purpose: "Data processing".to_string(),
        }
    }
}

impl ScoringRules {
    /// Parses rules from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRules` if the document does not parse or fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let rules: Self = serde_json::from_str(json).map_err(|e| AnalysisError::InvalidRules {
            reason: e.to_string(),
        })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Checks that every weight and bonus is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRules` naming the first offending value.
    pub fn validate(&self) -> std::result::Result<(), AnalysisError> {
        let weights = [
            ("dataFlow", self.weights.data_flow),
            ("partialTransformation", self.weights.partial_transformation),
            ("category", self.weights.category),
            ("capabilityOverlap", self.weights.capability_overlap),
            ("mappingPenalty", self.weights.mapping_penalty),
        ];
        let idioms = self
            .workflow_idioms
            .iter()
            .map(|idiom| (idiom.source.as_str(), idiom.bonus));

        for (name, value) in weights.into_iter().chain(idioms) {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidRules {
                    reason: format!("'{name}' must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Returns 1.0 when the ordered category pair is complementary, else 0.0.
    #[must_use]
    pub fn category_compatibility(&self, source: &str, target: &str) -> f64 {
        if self
            .category_adjacency
            .iter()
            .any(|pair| pair.matches(source, target))
        {
            1.0
        } else {
            0.0
        }
    }

    /// Returns the best idiom matching the node names, if any.
    ///
    /// Names are compared case-insensitively. When several idioms match, the
    /// one with the largest bonus wins; ties go to the earlier entry.
    #[must_use]
    pub fn matching_idiom(&self, source_name: &str, target_name: &str) -> Option<&WorkflowIdiom> {
        let source_name = source_name.to_lowercase();
        let target_name = target_name.to_lowercase();

        self.workflow_idioms
            .iter()
            .filter(|idiom| idiom.matches(&source_name, &target_name))
            .fold(None, |best: Option<&WorkflowIdiom>, idiom| match best {
                Some(current) if current.bonus >= idiom.bonus => Some(current),
                _ => Some(idiom),
            })
    }

    /// Returns true if the category reinterprets data semantically.
    #[must_use]
    pub fn is_transformation_sensitive(&self, category: &str) -> bool {
        let category = category.trim();
        self.transformation_sensitive_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    /// Returns the step purpose for a node name.
    #[must_use]
    pub fn purpose_for(&self, node_name: &str) -> &str {
        let name = node_name.to_lowercase();
        self.purpose_rules
            .iter()
            .find(|rule| {
                rule.contains
                    .iter()
                    .any(|needle| name.contains(&needle.to_lowercase()))
            })
            .map_or(self.default_purpose.as_str(), |rule| rule.purpose.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.data_flow, 0.4);
        assert_eq!(weights.mapping_penalty, 0.1);
    }

    #[test]
    fn category_adjacency_is_directional() {
        let rules = ScoringRules::default();
        assert_eq!(rules.category_compatibility("Trigger", "processing"), 1.0);
        assert_eq!(rules.category_compatibility("processing", "trigger"), 0.0);
    }

    #[test]
    fn idiom_matches_name_substrings() {
        let rules = ScoringRules::default();
        let idiom = rules
            .matching_idiom("webhook", "httpRequest")
            .expect("should match");
        assert_eq!(idiom.label(), "webhook→http");
        assert!(rules.matching_idiom("httpRequest", "webhook").is_none());
    }

    #[test]
    fn largest_idiom_bonus_wins() {
        let mut rules = ScoringRules::default();
        rules.workflow_idioms.push(WorkflowIdiom {
            source: "web".to_string(),
            target: "http".to_string(),
            bonus: 0.3,
        });
        let idiom = rules
            .matching_idiom("webhook", "httpRequest")
            .expect("should match");
        assert_eq!(idiom.bonus, 0.3);
    }

    #[test]
    fn purpose_rules_fall_back_to_default() {
        let rules = ScoringRules::default();
        assert_eq!(rules.purpose_for("httpRequest"), "HTTP request/API call");
        assert_eq!(rules.purpose_for("Slack"), "Team messaging");
        assert_eq!(rules.purpose_for("wait"), "Data processing");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules = ScoringRules::from_json(
            r#"{"weights": {"dataFlow": 0.5}, "workflowIdioms": [{"source": "rss", "target": "slack"}]}"#,
        )
        .expect("parse");

        assert_eq!(rules.weights.data_flow, 0.5);
        assert_eq!(rules.weights.category, 0.2);
        assert_eq!(rules.workflow_idioms.len(), 1);
        assert_eq!(rules.workflow_idioms[0].bonus, 0.2);
        assert!(!rules.category_adjacency.is_empty());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = ScoringRules::from_json(r#"{"weights": {"mappingPenalty": -0.1}}"#)
            .expect_err("should fail");
        assert!(err.to_string().contains("mappingPenalty"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ScoringRules::from_json(r#"{"workflowIdiom": [{"source": "rss", "target": "slack"}]}"#)
            .expect_err("should fail");
        assert!(err.to_string().contains("workflowIdiom"));

        let err = ScoringRules::from_json(r#"{"weights": {"dataFlw": 0.5}}"#).expect_err("should fail");
        assert!(err.to_string().contains("dataFlw"));
    }

    #[test]
    fn lowercase_keys_are_accepted() {
        let rules = ScoringRules::from_json(
            r#"{"weights": {"dataflow": 0.3}, "categoryadjacency": [{"source": "a", "target": "b"}]}"#,
        )
        .expect("parse");

        assert_eq!(rules.weights.data_flow, 0.3);
        assert_eq!(rules.category_adjacency, vec![CategoryPair::new("a", "b")]);
    }

    #[test]
    fn transformation_sensitive_lookup_ignores_case() {
        let rules = ScoringRules::default();
        assert!(rules.is_transformation_sensitive("AI"));
        assert!(!rules.is_transformation_sensitive("communication"));
    }
}
