//! Alternative target suggestions for poor pairs.

use nodefit_catalog::{Alternative, AlternativeFinder, NodeDescriptor};
use tracing::{debug, warn};

/// Pairs scoring below this get alternative suggestions.
pub const ALTERNATIVES_THRESHOLD: f64 = 0.7;

/// Maximum alternatives reported per pair.
pub const MAX_ALTERNATIVES: usize = 3;

/// Returns true if a pair with this score should get alternatives.
#[must_use]
pub fn needs_alternatives(score: f64) -> bool {
    score < ALTERNATIVES_THRESHOLD
}

/// Asks the finder for substitutes for `target`.
///
/// The source's capabilities are passed as required features. The source
/// itself is never offered as a substitute. Returns `None` when there is no
/// finder, the finder fails, or it finds nothing.
pub async fn suggest_alternatives(
    finder: Option<&dyn AlternativeFinder>,
    source: &NodeDescriptor,
    target: &NodeDescriptor,
) -> Option<Vec<Alternative>> {
    let finder = finder?;
    let required_features: Vec<String> = source.capabilities().into_iter().collect();

    match finder.find_alternatives(target, &required_features).await {
        Ok(mut alternatives) => {
            alternatives.retain(|alternative| alternative.node != source.name);
            if alternatives.is_empty() {
                debug!(target_node = %target.name, "no alternatives found");
                return None;
            }
            alternatives.truncate(MAX_ALTERNATIVES);
            Some(alternatives)
        }
        Err(e) => {
            warn!(target_node = %target.name, error = %e, "alternative finder failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nodefit_catalog::CollaboratorError;
    use std::sync::Mutex;

    struct FixedFinder {
        count: usize,
        seen_features: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AlternativeFinder for FixedFinder {
        async fn find_alternatives(
            &self,
            _target: &NodeDescriptor,
            required_features: &[String],
        ) -> Result<Vec<Alternative>, CollaboratorError> {
            *self.seen_features.lock().unwrap() = required_features.to_vec();
            Ok((0..self.count)
                .map(|i| Alternative {
                    node: format!("alt{i}"),
                    reason: "similar".to_string(),
                    benefit: "better".to_string(),
                })
                .collect())
        }
    }

    struct FailingFinder;

    #[async_trait]
    impl AlternativeFinder for FailingFinder {
        async fn find_alternatives(
            &self,
            _target: &NodeDescriptor,
            _required_features: &[String],
        ) -> Result<Vec<Alternative>, CollaboratorError> {
            Err(CollaboratorError::Failed {
                reason: "boom".to_string(),
            })
        }
    }

    fn nodes() -> (NodeDescriptor, NodeDescriptor) {
        (
            NodeDescriptor::new("webhook", "trigger").trigger().webhook(),
            NodeDescriptor::new("slack", "communication"),
        )
    }

    #[test]
    fn threshold() {
        assert!(needs_alternatives(0.69));
        assert!(!needs_alternatives(0.7));
    }

    #[tokio::test]
    async fn caps_at_three_and_passes_source_capabilities() {
        let (source, target) = nodes();
        let finder = FixedFinder {
            count: 5,
            seen_features: Mutex::new(Vec::new()),
        };

        let alternatives = suggest_alternatives(Some(&finder), &source, &target)
            .await
            .expect("alternatives");
        assert_eq!(alternatives.len(), 3);
        assert_eq!(
            *finder.seen_features.lock().unwrap(),
            vec!["trigger".to_string(), "webhook".to_string()]
        );
    }

    #[tokio::test]
    async fn source_is_never_its_own_substitute() {
        let (_, target) = nodes();
        let source = NodeDescriptor::new("alt1", "trigger").trigger();
        let finder = FixedFinder {
            count: 5,
            seen_features: Mutex::new(Vec::new()),
        };

        let alternatives = suggest_alternatives(Some(&finder), &source, &target)
            .await
            .expect("alternatives");
        let names: Vec<_> = alternatives.iter().map(|a| a.node.as_str()).collect();
        assert_eq!(names, vec!["alt0", "alt2", "alt3"]);
    }

    #[tokio::test]
    async fn only_the_source_as_candidate_yields_none() {
        let (_, target) = nodes();
        let source = NodeDescriptor::new("alt0", "trigger").trigger();
        let finder = FixedFinder {
            count: 1,
            seen_features: Mutex::new(Vec::new()),
        };

        assert!(suggest_alternatives(Some(&finder), &source, &target).await.is_none());
    }

    #[tokio::test]
    async fn empty_or_failing_finder_yields_none() {
        let (source, target) = nodes();
        let empty = FixedFinder {
            count: 0,
            seen_features: Mutex::new(Vec::new()),
        };

        assert!(suggest_alternatives(Some(&empty), &source, &target).await.is_none());
        assert!(suggest_alternatives(Some(&FailingFinder), &source, &target).await.is_none());
        assert!(suggest_alternatives(None, &source, &target).await.is_none());
    }
}
