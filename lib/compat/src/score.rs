//! Compatibility scoring.
//!
//! The score is additive: each term is computed on its own and kept in a
//! [`ScoreBreakdown`] so callers can explain the final number. The total is
//! clamped to `[0, 1]` and rounded to four decimals, which keeps level
//! thresholds exact.

use crate::flow::DataFlowAssessment;
use crate::rules::ScoringRules;
use nodefit_catalog::NodeDescriptor;
use serde::Serialize;
use std::collections::BTreeSet;

/// Discrete compatibility bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityLevel {
    /// Below 0.3.
    Incompatible,
    /// At least 0.3.
    Poor,
    /// At least 0.5.
    Fair,
    /// At least 0.7.
    Good,
    /// At least 0.9.
    Excellent,
}

impl CompatibilityLevel {
    /// Buckets a score.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Excellent
        } else if score >= 0.7 {
            Self::Good
        } else if score >= 0.5 {
            Self::Fair
        } else if score >= 0.3 {
            Self::Poor
        } else {
            Self::Incompatible
        }
    }

    /// Returns the level name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Incompatible => "incompatible",
        }
    }
}

/// The weighted contribution of each scoring term.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Credit for connecting ports.
    pub data_flow: f64,
    /// Credit for pairs a transformation step could bridge.
    pub partial_credit: f64,
    /// Credit for complementary categories.
    pub category: f64,
    /// Jaccard similarity of the capability tags, before weighting.
    pub capability_similarity: f64,
    /// Credit for shared capabilities.
    pub capability_overlap: f64,
    /// Penalty for a required mapping step, as a non-positive number.
    pub mapping_penalty: f64,
    /// Credit for a known workflow idiom.
    pub idiom_bonus: f64,
    /// The matched idiom, as `source→target`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idiom: Option<String>,
}

impl ScoreBreakdown {
    /// Sums the terms, clamps to `[0, 1]` and rounds to four decimals.
    ///
    /// A NaN sum, from NaN weights, counts as 0.
    #[must_use]
    pub fn total(&self) -> f64 {
        let raw = self.data_flow
            + self.partial_credit
            + self.category
            + self.capability_overlap
            + self.mapping_penalty
            + self.idiom_bonus;
        if raw.is_nan() {
            return 0.0;
        }
        (raw.clamp(0.0, 1.0) * 10_000.0).round() / 10_000.0
    }
}

/// A normalized compatibility score with its level and breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityScore {
    /// Score in `[0, 1]`.
    pub score: f64,
    /// Bucket of `score`.
    pub level: CompatibilityLevel,
    /// Contributing terms.
    pub breakdown: ScoreBreakdown,
}

impl CompatibilityScore {
    /// Builds a score from its breakdown.
    #[must_use]
    pub fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        let score = breakdown.total();
        Self {
            score,
            level: CompatibilityLevel::from_score(score),
            breakdown,
        }
    }
}

/// Jaccard similarity of two tag sets; 0 when both are empty.
#[must_use]
pub fn capability_overlap(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Scores how well `source` feeds `target`.
///
/// Deterministic and side-effect free. Direction matters: swapping source
/// and target generally changes the result.
#[must_use]
pub fn score(
    source: &NodeDescriptor,
    target: &NodeDescriptor,
    flow: &DataFlowAssessment,
    rules: &ScoringRules,
) -> CompatibilityScore {
    let weights = &rules.weights;
    let idiom = rules.matching_idiom(&source.name, &target.name);
    let similarity = capability_overlap(&source.capabilities(), &target.capabilities());

    let breakdown = ScoreBreakdown {
        data_flow: if flow.compatible { weights.data_flow } else { 0.0 },
        partial_credit: if !flow.compatible && flow.transformation_needed {
            weights.partial_transformation
        } else {
            0.0
        },
        category: weights.category * rules.category_compatibility(&source.category, &target.category),
        capability_similarity: similarity,
        capability_overlap: weights.capability_overlap * similarity,
        mapping_penalty: if flow.mapping_required {
            -weights.mapping_penalty
        } else {
            0.0
        },
        idiom_bonus: idiom.map_or(0.0, |i| i.bonus),
        idiom: idiom.map(|i| i.label()),
    };

    CompatibilityScore::from_breakdown(breakdown)
}
