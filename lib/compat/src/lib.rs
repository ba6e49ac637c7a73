//! Node compatibility analysis for nodefit.
//!
//! Given a source node and candidate target nodes, this crate estimates how
//! well each pair composes in a workflow and explains the estimate:
//!
//! - **Resolution**: Names or inline descriptors become descriptors, once
//! - **Data flow**: Port type matching, mapping advice, transformation hints
//! - **Scoring**: An additive, explainable score in `[0, 1]` with a level
//! - **Analysis**: Rule-based strengths, challenges and recommendations
//! - **Remediation**: Intermediate nodes, transformations, config fragments
//! - **Alternatives**: Substitute targets for poor pairs
//! - **Aggregation**: Best matches, viability and a suggested workflow
//!
//! Scoring weights and lookup tables live in [`ScoringRules`] so they can be
//! tuned or extended from a configuration file.

pub mod aggregate;
pub mod alternatives;
pub mod analysis;
pub mod engine;
pub mod error;
pub mod flow;
pub mod remediation;
pub mod report;
pub mod request;
pub mod resolver;
pub mod rules;
pub mod score;

pub use aggregate::{OverallAssessment, SuggestedWorkflow, WorkflowStep, WorkflowViability};
pub use analysis::PairAnalysis;
pub use engine::CompatibilityEngine;
pub use error::AnalysisError;
pub use flow::{DataFlowAssessment, FlowIssue, MappingAdvice};
pub use remediation::{ConfigurationHints, RemediationPlan};
pub use report::{CompatibilityReport, PairResult, SourceSummary, TargetSummary};
pub use request::{AnalysisDepth, CompatibilityRequest, WorkflowContext};
pub use rules::{
    CategoryPair, IntermediateNode, PurposeRule, ScoringRules, ScoringWeights, WorkflowIdiom,
};
pub use score::{CompatibilityLevel, CompatibilityScore, ScoreBreakdown};
