//! The compatibility engine.
//!
//! Runs one request end to end:
//! 1. Validate the request
//! 2. Resolve the source (fatal on failure) and the targets (skip on failure)
//! 3. For each target, concurrently: check data flow, score, analyze, and
//!    optionally plan remediation and look up alternatives
//! 4. Aggregate, and at comprehensive depth synthesize a workflow
//!
//! The engine holds no per-request state, so one instance can serve any
//! number of concurrent requests.

use crate::aggregate;
use crate::alternatives;
use crate::analysis;
use crate::error::AnalysisError;
use crate::flow;
use crate::remediation;
use crate::report::{CompatibilityReport, PairResult, SourceSummary, TargetSummary};
use crate::request::{AnalysisDepth, CompatibilityRequest};
use crate::resolver;
use crate::rules::ScoringRules;
use crate::score;
use futures::future::join_all;
use nodefit_catalog::{
    AlternativeFinder, MappingAdvisor, NodeCatalog, NodeDescriptor, PropertyMappingAdvisor,
};
use nodefit_core::{AnalysisId, Result};
use std::sync::Arc;
use tracing::{Span, debug, field, info, instrument};

/// Scores source/target node pairs against a catalog.
#[derive(Clone)]
pub struct CompatibilityEngine {
    catalog: Arc<dyn NodeCatalog>,
    advisor: Arc<dyn MappingAdvisor>,
    finder: Option<Arc<dyn AlternativeFinder>>,
    rules: ScoringRules,
}

impl CompatibilityEngine {
    /// Creates an engine over a catalog.
    ///
    /// Uses the property-based mapping advisor, default rules and no
    /// alternative finder.
    #[must_use]
    pub fn new(catalog: Arc<dyn NodeCatalog>) -> Self {
        Self {
            catalog,
            advisor: Arc::new(PropertyMappingAdvisor),
            finder: None,
            rules: ScoringRules::default(),
        }
    }

    /// Replaces the mapping advisor.
    #[must_use]
    pub fn with_advisor(mut self, advisor: Arc<dyn MappingAdvisor>) -> Self {
        self.advisor = advisor;
        self
    }

    /// Sets the alternative finder.
    #[must_use]
    pub fn with_alternative_finder(mut self, finder: Arc<dyn AlternativeFinder>) -> Self {
        self.finder = Some(finder);
        self
    }

    /// Replaces the scoring rules.
    #[must_use]
    pub fn with_rules(mut self, rules: ScoringRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the scoring rules in use.
    #[must_use]
    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Analyzes a request.
    ///
    /// # Errors
    ///
    /// Fails only when the request has no source or no targets, or the
    /// source cannot be resolved. Everything else degrades single pairs.
    #[instrument(
        skip_all,
        fields(
            analysis_id = field::Empty,
            source_node = %request.source_node.label(),
            targets = request.target_nodes.len(),
        )
    )]
    pub async fn analyze(
        &self,
        request: &CompatibilityRequest,
    ) -> Result<CompatibilityReport, AnalysisError> {
        let analysis_id = AnalysisId::new();
        Span::current().record("analysis_id", field::display(analysis_id));

        request.validate()?;
        let source = resolver::resolve_source(self.catalog.as_ref(), &request.source_node).await?;
        let targets = resolver::resolve_targets(self.catalog.as_ref(), &request.target_nodes).await;

        let results: Vec<PairResult> = join_all(
            targets
                .nodes
                .iter()
                .map(|target| self.analyze_pair(&source, target, request)),
        )
        .await;

        let overall_assessment = aggregate::assess(&source, &results, &targets.skipped);
        let suggested_workflow = (request.analysis_depth == AnalysisDepth::Comprehensive)
            .then(|| aggregate::synthesize_workflow(&source, &results, &self.rules));

        info!(
            pairs = results.len(),
            skipped = targets.skipped.len(),
            average = overall_assessment.average_compatibility,
            "compatibility analysis complete"
        );

        Ok(CompatibilityReport {
            analysis_id,
            source_node: SourceSummary::from(&source),
            compatibility_results: results,
            overall_assessment,
            suggested_workflow,
            skipped_targets: targets.skipped,
        })
    }

    async fn analyze_pair(
        &self,
        source: &NodeDescriptor,
        target: &NodeDescriptor,
        request: &CompatibilityRequest,
    ) -> PairResult {
        let purpose = request.purpose();
        let data_flow =
            flow::check_data_flow(source, target, self.advisor.as_ref(), purpose, &self.rules).await;
        let compatibility = score::score(source, target, &data_flow, &self.rules);
        let analysis = analysis::analyze_pair(source, target, &data_flow, &compatibility, purpose);

        let solutions = (request.include_solutions
            && remediation::needs_remediation(compatibility.score))
        .then(|| remediation::plan_remediation(source, target, &data_flow, &self.rules));

        let alternatives = if request.include_alternatives
            && alternatives::needs_alternatives(compatibility.score)
        {
            alternatives::suggest_alternatives(self.finder.as_deref(), source, target).await
        } else {
            None
        };

        debug!(
            target_node = %target.name,
            score = compatibility.score,
            level = compatibility.level.as_str(),
            "scored pair"
        );

        PairResult {
            target: TargetSummary::from(target),
            data_flow,
            compatibility,
            analysis,
            solutions,
            alternatives,
        }
    }
}
