use crate::settings::AnalyzerSettings;

use super::lattice::LatticeNode;

/// Trait for scoring lattice paths during Viterbi search.
pub(crate) trait CostFunction: Send + Sync {
    fn word_cost(&self, node: &LatticeNode) -> i64;
}

/// Dictionary cost plus a flat per-segment penalty.
///
/// The lexicon carries no connection matrix, so path cost is the sum of
/// word costs; the penalty makes shorter segmentations win ties.
pub(crate) struct DefaultCostFunction {
    segment_penalty: i64,
}

impl DefaultCostFunction {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            segment_penalty: settings.segment_penalty,
        }
    }
}

impl CostFunction for DefaultCostFunction {
    fn word_cost(&self, node: &LatticeNode) -> i64 {
        node.cost as i64 + self.segment_penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::testutil::test_settings;

    #[test]
    fn test_word_cost_adds_penalty() {
        let cost_fn = DefaultCostFunction::new(&test_settings());
        let node = LatticeNode {
            start: 0,
            end: 2,
            surface: "今日".to_string(),
            reading: Some("キョウ".to_string()),
            cost: 3000,
            unknown: false,
        };
        assert_eq!(
            cost_fn.word_cost(&node),
            3000 + test_settings().segment_penalty
        );
    }
}
