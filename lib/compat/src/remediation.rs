//! Remediation plans for weak pairs.
//!
//! Plans are advisory only: they are assembled from the scoring rules and
//! the data-flow assessment without consulting the catalog.

use crate::flow::DataFlowAssessment;
use crate::rules::{IntermediateNode, ScoringRules};
use nodefit_catalog::{MappingSuggestion, NodeDescriptor};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue, json};
use std::collections::BTreeSet;

/// Pairs scoring below this get a remediation plan.
pub const REMEDIATION_THRESHOLD: f64 = 0.8;

/// Suggested configuration for both ends of a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationHints {
    /// Fragment for the source node.
    pub source: JsonValue,
    /// Fragment for the target node.
    pub target: JsonValue,
    /// One template line per suggested field mapping.
    pub mapping: Vec<String>,
}

/// Ways to make a weak pair work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationPlan {
    /// Nodes to place between source and target.
    pub intermediate_nodes: Vec<IntermediateNode>,
    /// Data transformations to apply.
    pub transformations: Vec<String>,
    /// Configuration fragments.
    pub configuration: ConfigurationHints,
}

/// Returns true if a pair with this score should get a plan.
#[must_use]
pub fn needs_remediation(score: f64) -> bool {
    score < REMEDIATION_THRESHOLD
}

/// Plans remediation for a pair.
#[must_use]
pub fn plan_remediation(
    source: &NodeDescriptor,
    target: &NodeDescriptor,
    flow: &DataFlowAssessment,
    rules: &ScoringRules,
) -> RemediationPlan {
    let intermediate_nodes = if flow.compatible {
        Vec::new()
    } else {
        rules.intermediate_nodes.clone()
    };

    let mut transformations = Vec::new();
    if flow.transformation_needed {
        transformations.push(format!(
            "Normalize {} output into plain text or structured fields before {} interprets it",
            source.label(),
            target.label()
        ));
        let typed_inputs: BTreeSet<&str> = target
            .inputs
            .iter()
            .filter(|port| !port.port_type.is_main())
            .map(|port| port.port_type.as_str())
            .collect();
        for port_type in typed_inputs {
            transformations.push(format!(
                "Convert data to the '{port_type}' input type of {}",
                target.label()
            ));
        }
    }

    RemediationPlan {
        intermediate_nodes,
        transformations,
        configuration: ConfigurationHints {
            source: source_fragment(source),
            target: target_fragment(target, &flow.mapping_suggestions),
            mapping: flow.mapping_suggestions.iter().map(mapping_line).collect(),
        },
    }
}

fn source_fragment(source: &NodeDescriptor) -> JsonValue {
    let mut settings = Map::new();
    if source.outputs.is_empty() {
        settings.insert("alwaysOutputData".to_string(), json!(true));
    }
    json!({ "node": source.name, "settings": settings })
}

fn target_fragment(target: &NodeDescriptor, suggestions: &[MappingSuggestion]) -> JsonValue {
    let parameters: Map<String, JsonValue> = suggestions
        .iter()
        .map(|s| {
            (
                s.target_field.clone(),
                json!(format!("={{{{ {} }}}}", expression(&s.source_field))),
            )
        })
        .collect();
    json!({ "node": target.name, "parameters": parameters })
}

fn expression(source_field: &str) -> String {
    if source_field.starts_with('$') {
        source_field.to_string()
    } else {
        format!("$json.{source_field}")
    }
}

fn mapping_line(suggestion: &MappingSuggestion) -> String {
    let line = format!(
        "{}: {{{{ {} }}}}",
        suggestion.target_field,
        expression(&suggestion.source_field)
    );
    match &suggestion.transformation {
        Some(note) => format!("{line} // {note}"),
        None => line,
    }
}
