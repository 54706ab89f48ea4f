//! Engine parameters — every tunable threshold and weight in one struct.
//!
//! The reference configuration lives in [`EngineParams::reference_defaults`].
//! Dimension weight tables must sum to 1.0 per role; that invariant is
//! checked once, when the consensus engine is constructed, not per call.

use serde::{Deserialize, Serialize};

/// All tunable parameters of the validation engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    // ── Risk aggregation ─────────────────────────────────────────────────
    /// Total risk score at or above which a submission is rejected outright.
    pub risk_high_threshold: u32,

    /// Total risk score at or above which risk is classified medium.
    pub risk_medium_threshold: u32,

    /// Maximum score contribution of the duplicate-submission rule.
    pub duplicate_submission_cap: u32,

    /// Maximum score contribution of the suspicious-timing rule.
    pub suspicious_timing_cap: u32,

    /// Maximum score contribution of the data-inconsistency rule.
    pub data_inconsistency_cap: u32,

    /// Maximum score contribution of the reference-authenticity rule.
    pub reference_authenticity_cap: u32,

    /// Maximum score contribution of the originality rule.
    pub originality_cap: u32,

    /// Maximum score contribution of the identity-verification rule.
    pub identity_verification_cap: u32,

    /// Window (seconds) under which a batch of portfolio uploads counts as
    /// suspiciously rapid.
    pub rapid_submission_window_secs: u64,

    // ── Consensus ────────────────────────────────────────────────────────
    /// Weight of the domain reviewer's scalar score in the combined score.
    pub domain_weight: f64,

    /// Weight of the analytics reviewer's scalar score in the combined score.
    pub analytics_weight: f64,

    /// Combined score at or above which the decision is approval.
    pub approval_threshold: f64,

    /// Combined score at or above which (below approval) the decision is
    /// remediation rather than rejection.
    pub remediation_threshold: f64,

    /// Maximum |domain − analytics| gap for the two roles to count as agreeing.
    pub agreement_gap_threshold: f64,

    /// Per-dimension weights applied to the domain reviewer's sub-scores.
    pub domain_dimension_weights: DomainWeights,

    /// Per-dimension weights applied to the analytics reviewer's sub-scores.
    pub analytics_dimension_weights: AnalyticsWeights,
}

/// Dimension weights for the domain-expert reviewer's score bundle.
///
/// Must sum to 1.0; validated when the consensus engine is built.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DomainWeights {
    pub academic_rigor: f64,
    pub program_fit: f64,
    pub character_evidence: f64,
    pub recommendation_strength: f64,
    pub interview_performance: f64,
}

impl DomainWeights {
    pub fn sum(&self) -> f64 {
        self.academic_rigor
            + self.program_fit
            + self.character_evidence
            + self.recommendation_strength
            + self.interview_performance
    }
}

/// Dimension weights for the analytics/integrity reviewer's score bundle.
///
/// Must sum to 1.0; validated when the consensus engine is built.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct AnalyticsWeights {
    pub data_integrity: f64,
    pub originality: f64,
    pub record_consistency: f64,
    pub statistical_profile: f64,
    pub documentation_quality: f64,
    pub history_depth: f64,
}

impl AnalyticsWeights {
    pub fn sum(&self) -> f64 {
        self.data_integrity
            + self.originality
            + self.record_consistency
            + self.statistical_profile
            + self.documentation_quality
            + self.history_depth
    }
}

impl EngineParams {
    /// The reference configuration for the live engine.
    ///
    /// The dimension weights are dyadic fractions: weighted sums of integral
    /// sub-scores stay exact in floating point, so the 80 / 60 / 20-point
    /// decision boundaries compare exactly.
    pub fn reference_defaults() -> Self {
        Self {
            risk_high_threshold: 80,
            risk_medium_threshold: 50,

            duplicate_submission_cap: 25,
            suspicious_timing_cap: 20,
            data_inconsistency_cap: 30,
            reference_authenticity_cap: 35,
            originality_cap: 40,
            identity_verification_cap: 45,

            rapid_submission_window_secs: 300, // 5 minutes

            domain_weight: 0.6,
            analytics_weight: 0.4,
            approval_threshold: 80.0,
            remediation_threshold: 60.0,
            agreement_gap_threshold: 20.0,

            domain_dimension_weights: DomainWeights {
                academic_rigor: 0.25,
                program_fit: 0.25,
                character_evidence: 0.25,
                recommendation_strength: 0.125,
                interview_performance: 0.125,
            },
            analytics_dimension_weights: AnalyticsWeights {
                data_integrity: 0.25,
                originality: 0.25,
                record_consistency: 0.125,
                statistical_profile: 0.125,
                documentation_quality: 0.125,
                history_depth: 0.125,
            },
        }
    }

    /// Upper bound on the total risk score: the sum of all rule caps.
    pub fn max_total_risk_score(&self) -> u32 {
        self.duplicate_submission_cap
            + self.suspicious_timing_cap
            + self.data_inconsistency_cap
            + self.reference_authenticity_cap
            + self.originality_cap
            + self.identity_verification_cap
    }
}

/// Default is the reference configuration.
impl Default for EngineParams {
    fn default() -> Self {
        Self::reference_defaults()
    }
}
