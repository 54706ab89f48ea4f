//! Consensus engine — combines the two roles' weighted scores into a final
//! decision once both are present.
//!
//! Dimension weights and the role combination are validated once, at engine
//! construction. Evaluation itself is pure arithmetic and cannot fail.

use crate::error::ValidationError;
use crate::score::{AnalyticsScore, DomainScore};
use credence_types::{AnalyticsWeights, DomainWeights, EngineParams, Timestamp};
use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// The outcome the engine assigns to a pair of reviewer scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    RequiresRemediation,
    Rejected,
    /// The roles diverge beyond the agreement gap; a human must decide.
    /// Not an error — a valid terminal-for-automation outcome.
    ConsensusRequired,
}

/// Immutable result of one consensus evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// The domain reviewer's weighted scalar score (0–100).
    pub domain_score: f64,
    /// The analytics reviewer's weighted scalar score (0–100).
    pub analytics_score: f64,
    /// Role-weighted combination of the two scalars.
    pub combined: f64,
    /// |domain − analytics|.
    pub agreement_gap: f64,
    pub consensus_reached: bool,
    pub decision: Decision,
    pub reasoning: String,
    pub evaluated_at: Timestamp,
}

/// Combines two weighted reviewer scores under the configured thresholds.
#[derive(Debug)]
pub struct ConsensusEngine {
    domain_weight: f64,
    analytics_weight: f64,
    approval_threshold: f64,
    remediation_threshold: f64,
    agreement_gap_threshold: f64,
    domain_weights: DomainWeights,
    analytics_weights: AnalyticsWeights,
}

impl ConsensusEngine {
    /// Build an engine, validating every weight table once.
    pub fn new(params: &EngineParams) -> Result<Self, ValidationError> {
        let domain_sum = params.domain_dimension_weights.sum();
        if (domain_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidWeights {
                scope: "domain dimension",
                sum: domain_sum,
            });
        }
        let analytics_sum = params.analytics_dimension_weights.sum();
        if (analytics_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidWeights {
                scope: "analytics dimension",
                sum: analytics_sum,
            });
        }
        let role_sum = params.domain_weight + params.analytics_weight;
        if (role_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidWeights {
                scope: "role combination",
                sum: role_sum,
            });
        }

        Ok(Self {
            domain_weight: params.domain_weight,
            analytics_weight: params.analytics_weight,
            approval_threshold: params.approval_threshold,
            remediation_threshold: params.remediation_threshold,
            agreement_gap_threshold: params.agreement_gap_threshold,
            domain_weights: params.domain_dimension_weights,
            analytics_weights: params.analytics_dimension_weights,
        })
    }

    /// Evaluate a complete pair of reviewer scores.
    pub fn evaluate(
        &self,
        domain: &DomainScore,
        analytics: &AnalyticsScore,
        now: Timestamp,
    ) -> ConsensusResult {
        let domain_score = domain.weighted_total(&self.domain_weights);
        let analytics_score = analytics.weighted_total(&self.analytics_weights);
        let combined = domain_score * self.domain_weight + analytics_score * self.analytics_weight;
        let agreement_gap = (domain_score - analytics_score).abs();
        let consensus_reached = agreement_gap <= self.agreement_gap_threshold;

        let decision = if !consensus_reached {
            Decision::ConsensusRequired
        } else if combined >= self.approval_threshold {
            Decision::Approved
        } else if combined >= self.remediation_threshold {
            Decision::RequiresRemediation
        } else {
            Decision::Rejected
        };

        let reasoning = self.reasoning(decision, domain_score, analytics_score, combined, agreement_gap);

        ConsensusResult {
            domain_score,
            analytics_score,
            combined,
            agreement_gap,
            consensus_reached,
            decision,
            reasoning,
            evaluated_at: now,
        }
    }

    fn reasoning(
        &self,
        decision: Decision,
        domain: f64,
        analytics: f64,
        combined: f64,
        gap: f64,
    ) -> String {
        match decision {
            Decision::ConsensusRequired => format!(
                "domain {domain:.1} and analytics {analytics:.1} diverge by {gap:.1} points \
                 (limit {:.0}); escalating for a manual decision",
                self.agreement_gap_threshold
            ),
            Decision::Approved => format!(
                "combined score {combined:.1} meets the approval threshold {:.0} \
                 with a {gap:.1}-point agreement gap",
                self.approval_threshold
            ),
            Decision::RequiresRemediation => format!(
                "combined score {combined:.1} falls between the remediation threshold {:.0} \
                 and the approval threshold {:.0}",
                self.remediation_threshold, self.approval_threshold
            ),
            Decision::Rejected => format!(
                "combined score {combined:.1} is below the remediation threshold {:.0}",
                self.remediation_threshold
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ConsensusEngine {
        ConsensusEngine::new(&EngineParams::reference_defaults()).unwrap()
    }

    fn domain(value: f64) -> DomainScore {
        DomainScore {
            academic_rigor: value,
            program_fit: value,
            character_evidence: value,
            recommendation_strength: value,
            interview_performance: value,
            approved: value >= 60.0,
            concerns: Vec::new(),
        }
    }

    fn analytics(value: f64) -> AnalyticsScore {
        AnalyticsScore {
            data_integrity: value,
            originality: value,
            record_consistency: value,
            statistical_profile: value,
            documentation_quality: value,
            history_depth: value,
            approved: value >= 60.0,
            concerns: Vec::new(),
        }
    }

    fn evaluate(d: f64, a: f64) -> ConsensusResult {
        engine().evaluate(&domain(d), &analytics(a), Timestamp::new(42))
    }

    #[test]
    fn agreeing_high_scores_approve() {
        let result = evaluate(90.0, 85.0);
        assert_eq!(result.domain_score, 90.0);
        assert_eq!(result.analytics_score, 85.0);
        assert_eq!(result.combined, 88.0); // 90·0.6 + 85·0.4
        assert_eq!(result.agreement_gap, 5.0);
        assert!(result.consensus_reached);
        assert_eq!(result.decision, Decision::Approved);
        assert_eq!(result.evaluated_at, Timestamp::new(42));
    }

    #[test]
    fn agreeing_low_scores_reject() {
        let result = evaluate(55.0, 58.0);
        assert!((result.combined - 56.2).abs() < 1e-9);
        assert_eq!(result.agreement_gap, 3.0);
        assert_eq!(result.decision, Decision::Rejected);
    }

    #[test]
    fn middle_band_requires_remediation() {
        let result = evaluate(70.0, 65.0);
        assert_eq!(result.combined, 68.0);
        assert_eq!(result.decision, Decision::RequiresRemediation);
    }

    #[test]
    fn approval_threshold_is_inclusive() {
        let result = evaluate(80.0, 80.0);
        assert_eq!(result.combined, 80.0);
        assert_eq!(result.decision, Decision::Approved);
    }

    #[test]
    fn remediation_threshold_is_inclusive() {
        let result = evaluate(60.0, 60.0);
        assert_eq!(result.combined, 60.0);
        assert_eq!(result.decision, Decision::RequiresRemediation);

        let just_below = evaluate(59.0, 59.0);
        assert_eq!(just_below.decision, Decision::Rejected);
    }

    #[test]
    fn gap_of_exactly_twenty_still_counts_as_consensus() {
        let result = evaluate(90.0, 70.0);
        assert_eq!(result.agreement_gap, 20.0);
        assert!(result.consensus_reached);
        assert_eq!(result.combined, 82.0);
        assert_eq!(result.decision, Decision::Approved);
    }

    #[test]
    fn gap_just_over_twenty_escalates() {
        let result = evaluate(90.0, 69.98);
        assert!(result.agreement_gap > 20.0);
        assert!(!result.consensus_reached);
        assert_eq!(result.decision, Decision::ConsensusRequired);
    }

    #[test]
    fn divergent_scores_escalate_regardless_of_combined() {
        // Each side individually looks passable; the gap is what matters.
        let result = evaluate(95.0, 50.0);
        assert_eq!(result.agreement_gap, 45.0);
        assert!(!result.consensus_reached);
        assert_eq!(result.decision, Decision::ConsensusRequired);
        assert!(result.combined > 60.0);
    }

    #[test]
    fn reasoning_names_the_deciding_numbers() {
        let approved = evaluate(90.0, 85.0);
        assert!(approved.reasoning.contains("88.0"));

        let escalated = evaluate(95.0, 50.0);
        assert!(escalated.reasoning.contains("45.0"));
    }

    #[test]
    fn bad_dimension_weights_fail_at_construction() {
        let mut params = EngineParams::reference_defaults();
        params.domain_dimension_weights.academic_rigor = 0.5;
        let err = ConsensusEngine::new(&params).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidWeights {
                scope: "domain dimension",
                ..
            }
        ));

        let mut params = EngineParams::reference_defaults();
        params.analytics_dimension_weights.history_depth = 0.0;
        assert!(ConsensusEngine::new(&params).is_err());
    }

    #[test]
    fn bad_role_weights_fail_at_construction() {
        let mut params = EngineParams::reference_defaults();
        params.domain_weight = 0.7;
        let err = ConsensusEngine::new(&params).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidWeights {
                scope: "role combination",
                ..
            }
        ));
    }
}
