// src/analysis/large_tuple.rs
//! Large tuple check: tuples should not have too many unlabelled members.

use super::tuples::{scan_tuples, TupleObservation};
use crate::config::{LabelExemption, LargeTupleConfig, SeverityThreshold};
use crate::syntax::SyntaxNode;
use crate::types::{Severity, Violation};

pub const RULE_ID: &str = "large_tuple";

pub struct LargeTupleRule {
    thresholds: Vec<SeverityThreshold>,
    exemption: LabelExemption,
    reason: String,
}

impl LargeTupleRule {
    #[must_use]
    pub fn new(config: &LargeTupleConfig) -> Self {
        Self::with_thresholds(config.thresholds(), config.label_exemption)
    }

    #[must_use]
    pub fn with_thresholds(thresholds: Vec<SeverityThreshold>, exemption: LabelExemption) -> Self {
        let reason = format!(
            "Tuples should have at most {} members or have all members labelled",
            reason_limit(&thresholds)
        );
        Self {
            thresholds,
            exemption,
            reason,
        }
    }

    /// Scans one file's tree and returns its violations in source order.
    #[must_use]
    pub fn validate(&self, root: &SyntaxNode) -> Vec<Violation> {
        self.evaluate(scan_tuples(root))
    }

    #[must_use]
    pub fn evaluate(&self, mut observations: Vec<TupleObservation>) -> Vec<Violation> {
        // Stable: equal positions keep discovery order.
        observations.sort_by_key(|o| o.position);
        observations
            .iter()
            .filter_map(|o| self.judge(o))
            .collect()
    }

    fn judge(&self, observation: &TupleObservation) -> Option<Violation> {
        let tier = self
            .thresholds
            .iter()
            .find(|t| self.triggers(observation, t.limit))?;
        Some(Violation {
            position: observation.position,
            severity: tier.severity,
            message: self.reason.clone(),
            rule: RULE_ID,
        })
    }

    fn triggers(&self, observation: &TupleObservation, limit: usize) -> bool {
        let exceeds = observation.member_count > limit;
        let labeled = observation.is_fully_labeled();
        match self.exemption {
            LabelExemption::AllTiers => exceeds && !labeled,
            LabelExemption::ExactLimit => exceeds && !(labeled && observation.member_count == limit),
        }
    }
}

// The message always quotes the warning limit, whichever tier fired.
fn reason_limit(thresholds: &[SeverityThreshold]) -> usize {
    thresholds
        .iter()
        .find(|t| t.severity == Severity::Warning)
        .or_else(|| thresholds.iter().min_by_key(|t| t.limit))
        .map_or(0, |t| t.limit)
}

#[cfg(test)]
#[path = "large_tuple_test.rs"]
mod tests;
