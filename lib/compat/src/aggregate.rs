//! Roll-up of pair results.
//!
//! Produces the overall assessment for every request and, at comprehensive
//! depth, a suggested workflow seeded by the source node.

use crate::report::PairResult;
use crate::rules::ScoringRules;
use nodefit_catalog::NodeDescriptor;
use serde::Serialize;

/// Minimum score for a best match.
pub const BEST_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum number of best matches.
pub const MAX_BEST_MATCHES: usize = 3;

/// Minimum score for a step in the suggested workflow.
pub const WORKFLOW_STEP_THRESHOLD: f64 = 0.5;

/// How likely the targets are to form a working workflow with the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowViability {
    /// Average score below 0.4.
    Low,
    /// Average score of at least 0.4.
    Medium,
    /// Average score of at least 0.7.
    High,
}

impl WorkflowViability {
    /// Buckets an average score.
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average >= 0.7 {
            Self::High
        } else if average >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Roll-up over all pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallAssessment {
    /// Up to three target names scoring at least 0.7, best first.
    pub best_matches: Vec<String>,
    /// Mean pair score, 0 when there are no pairs.
    pub average_compatibility: f64,
    /// Bucket of the average.
    pub workflow_viability: WorkflowViability,
    /// Narrative advice.
    pub recommendations: Vec<String>,
}

/// One step of a suggested workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    /// Node name.
    pub node: String,
    /// What the step does.
    pub purpose: String,
    /// Names of nodes this step feeds.
    pub connections: Vec<String>,
}

/// A candidate workflow built from the best pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestedWorkflow {
    /// Steps in order, source first.
    pub sequence: Vec<WorkflowStep>,
    /// How the sequence was chosen.
    pub reasoning: String,
}

/// Orders pairs by descending score, keeping input order on ties.
fn ranked(pairs: &[PairResult]) -> Vec<&PairResult> {
    let mut ranked: Vec<&PairResult> = pairs.iter().collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked
}

/// Computes the overall assessment.
#[must_use]
pub fn assess(
    source: &NodeDescriptor,
    pairs: &[PairResult],
    skipped_targets: &[String],
) -> OverallAssessment {
    let average_compatibility = if pairs.is_empty() {
        0.0
    } else {
        let mean = pairs.iter().map(PairResult::score).sum::<f64>() / pairs.len() as f64;
        (mean * 10_000.0).round() / 10_000.0
    };

    let best_matches: Vec<String> = ranked(pairs)
        .into_iter()
        .filter(|pair| pair.score() >= BEST_MATCH_THRESHOLD)
        .take(MAX_BEST_MATCHES)
        .map(|pair| pair.target.name.clone())
        .collect();

    let workflow_viability = WorkflowViability::from_average(average_compatibility);
    let mut recommendations = Vec::new();

    match best_matches.as_slice() {
        [] if pairs.is_empty() => {}
        [] => recommendations.push(format!(
            "No target composes well with {}; review the suggested solutions and alternatives",
            source.label()
        )),
        [best, ..] => recommendations.push(format!(
            "Start with {best}, the strongest match for {}",
            source.label()
        )),
    }
    match workflow_viability {
        WorkflowViability::High => recommendations
            .push("The targets compose well and can be connected with little extra work".to_string()),
        WorkflowViability::Medium => recommendations.push(
            "The workflow is feasible but some pairs need mapping or intermediate nodes".to_string(),
        ),
        WorkflowViability::Low => recommendations.push(
            "The workflow needs significant restructuring; consider different target nodes"
                .to_string(),
        ),
    }
    if !skipped_targets.is_empty() {
        recommendations.push(format!(
            "{} target node(s) could not be found and were skipped: {}",
            skipped_targets.len(),
            skipped_targets.join(", ")
        ));
    }

    OverallAssessment {
        best_matches,
        average_compatibility,
        workflow_viability,
        recommendations,
    }
}

/// Builds a suggested workflow from the source and the strongest pairs.
#[must_use]
pub fn synthesize_workflow(
    source: &NodeDescriptor,
    pairs: &[PairResult],
    rules: &ScoringRules,
) -> SuggestedWorkflow {
    let ranked = ranked(pairs);

    let mut sequence = vec![WorkflowStep {
        node: source.name.clone(),
        purpose: "data source/trigger".to_string(),
        connections: ranked
            .iter()
            .take(2)
            .map(|pair| pair.target.name.clone())
            .collect(),
    }];

    let steps: Vec<WorkflowStep> = ranked
        .iter()
        .filter(|pair| pair.score() >= WORKFLOW_STEP_THRESHOLD)
        .map(|pair| WorkflowStep {
            node: pair.target.name.clone(),
            purpose: rules.purpose_for(&pair.target.name).to_string(),
            connections: Vec::new(),
        })
        .collect();
    let included = steps.len();
    sequence.extend(steps);

    SuggestedWorkflow {
        sequence,
        reasoning: format!(
            "Starts at {} and adds the {included} target(s) scoring at least {WORKFLOW_STEP_THRESHOLD:.1}, strongest first",
            source.label()
        ),
    }
}
