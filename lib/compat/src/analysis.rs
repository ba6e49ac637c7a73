//! Narrative analysis of a scored pair.
//!
//! Every line comes from a fixed rule: positive score terms become
//! strengths, negative findings become challenges, and each finding maps to
//! one recommendation. New advice means a new rule here.

use crate::flow::{DataFlowAssessment, FlowIssue};
use crate::score::{CompatibilityLevel, CompatibilityScore};
use nodefit_catalog::NodeDescriptor;
use serde::Serialize;

/// Strengths, challenges and recommendations for one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PairAnalysis {
    /// What works in favour of the pair.
    pub strengths: Vec<String>,
    /// What works against it.
    pub challenges: Vec<String>,
    /// What to do about it.
    pub recommendations: Vec<String>,
}

/// Derives the narrative for a scored pair.
#[must_use]
pub fn analyze_pair(
    source: &NodeDescriptor,
    target: &NodeDescriptor,
    flow: &DataFlowAssessment,
    score: &CompatibilityScore,
    purpose: Option<&str>,
) -> PairAnalysis {
    let src = source.label();
    let tgt = target.label();
    let breakdown = &score.breakdown;
    let mut analysis = PairAnalysis::default();

    if flow.compatible {
        analysis
            .strengths
            .push(format!("{src} output ports connect directly to {tgt} inputs"));
    }
    if breakdown.category > 0.0 {
        analysis.strengths.push(format!(
            "Complementary categories: {} feeds {}",
            source.category, target.category
        ));
    }
    if let Some(idiom) = &breakdown.idiom {
        analysis
            .strengths
            .push(format!("Matches a common workflow pattern ({idiom})"));
    }

    if flow.mapping_required {
        analysis.challenges.push(format!(
            "{} field(s) of {tgt} must be mapped from {src} output",
            flow.mapping_suggestions.len()
        ));
        analysis.recommendations.push(format!(
            "Insert a data-mapping step (e.g. a Set node) between {src} and {tgt}"
        ));
    }
    if flow.transformation_needed {
        analysis
            .challenges
            .push(format!("{tgt} interprets its input and may need reshaped data"));
        analysis.recommendations.push(format!(
            "Add a transformation step so {tgt} receives data in the form it expects"
        ));
    }
    if !flow.compatible {
        analysis.recommendations.push(format!(
            "Insert an intermediate processing node to adapt {src} output for {tgt}"
        ));
    }
    for issue in &flow.potential_issues {
        let capitalized = capitalize(&issue.to_string());
        analysis.challenges.push(capitalized);
        analysis.recommendations.push(match issue {
            FlowIssue::BothTriggers => format!(
                "Keep a single trigger: start a separate workflow for {tgt} or use an action node instead"
            ),
            FlowIssue::NoSourceOutput => {
                format!("Place {tgt} after a node that emits data instead of {src}")
            }
            FlowIssue::MappingAdviceUnavailable { .. } => {
                format!("Verify field mappings into {tgt} manually")
            }
        });
    }

    if analysis.recommendations.is_empty() && score.level >= CompatibilityLevel::Good {
        analysis
            .recommendations
            .push(format!("Connect {src} directly to {tgt}"));
    }
    if let Some(purpose) = purpose {
        analysis.recommendations.push(format!(
            "For \"{purpose}\", confirm that {tgt} produces the result this purpose needs"
        ));
    }

    analysis
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::MappingAdvice;
    use crate::rules::ScoringRules;
    use crate::score::score;
    use nodefit_catalog::{MappingSuggestion, Port};

    fn flow() -> DataFlowAssessment {
        DataFlowAssessment {
            compatible: true,
            mapping_required: false,
            transformation_needed: false,
            supported_formats: Vec::new(),
            potential_issues: Vec::new(),
            mapping_suggestions: Vec::new(),
            mapping_advice: MappingAdvice::Available,
        }
    }

    fn webhook() -> NodeDescriptor {
        NodeDescriptor::new("webhook", "trigger")
            .with_display_name("Webhook")
            .with_outputs(vec![Port::main()])
            .trigger()
    }

    fn http() -> NodeDescriptor {
        NodeDescriptor::new("httpRequest", "processing")
            .with_display_name("HTTP Request")
            .with_inputs(vec![Port::main()])
    }

    #[test]
    fn strong_pair_lists_each_positive_factor() {
        let f = flow();
        let s = score(&webhook(), &http(), &f, &ScoringRules::default());
        let analysis = analyze_pair(&webhook(), &http(), &f, &s, None);

        assert_eq!(analysis.strengths.len(), 3);
        assert!(analysis.strengths[2].contains("webhook→http"));
        assert!(analysis.challenges.is_empty());
        assert_eq!(
            analysis.recommendations,
            vec!["Connect Webhook directly to HTTP Request".to_string()]
        );
    }

    #[test]
    fn each_negative_finding_has_challenge_and_advice() {
        let mut f = flow();
        f.compatible = false;
        f.mapping_required = true;
        f.transformation_needed = true;
        f.mapping_suggestions = vec![MappingSuggestion::direct("body", "url")];
        f.potential_issues = vec![FlowIssue::BothTriggers, FlowIssue::NoSourceOutput];

        let s = score(&webhook(), &http(), &f, &ScoringRules::default());
        let analysis = analyze_pair(&webhook(), &http(), &f, &s, None);

        assert_eq!(analysis.challenges.len(), 4);
        assert_eq!(analysis.challenges[2], "Both nodes are triggers");
        assert_eq!(analysis.recommendations.len(), 5);
        assert!(
            analysis
                .recommendations
                .iter()
                .any(|r| r.starts_with("Insert a data-mapping step"))
        );
        assert!(
            analysis
                .recommendations
                .iter()
                .any(|r| r.starts_with("Insert an intermediate processing node"))
        );
    }

    #[test]
    fn purpose_adds_one_contextual_recommendation() {
        let f = flow();
        let s = score(&webhook(), &http(), &f, &ScoringRules::default());
        let analysis = analyze_pair(&webhook(), &http(), &f, &s, Some("sync CRM contacts"));

        let last = analysis.recommendations.last().expect("recommendation");
        assert!(last.contains("sync CRM contacts"));
        assert_eq!(analysis.recommendations.len(), 2);
    }
}
