//! Per-role reviewer score bundles.
//!
//! Each role submits a closed struct of named sub-scores (0–100 each), an
//! approval flag, and free-text concerns. Scores are immutable once the
//! orchestrator accepts them; a second submission for the same role is
//! rejected, never overwritten.

use crate::error::ValidationError;
use credence_types::{AnalyticsWeights, DomainWeights};
use serde::{Deserialize, Serialize};

/// The domain-expert reviewer's score bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    pub academic_rigor: f64,
    pub program_fit: f64,
    pub character_evidence: f64,
    pub recommendation_strength: f64,
    pub interview_performance: f64,
    pub approved: bool,
    pub concerns: Vec<String>,
}

impl DomainScore {
    /// Check every sub-score is within 0–100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("academic_rigor", self.academic_rigor)?;
        check_range("program_fit", self.program_fit)?;
        check_range("character_evidence", self.character_evidence)?;
        check_range("recommendation_strength", self.recommendation_strength)?;
        check_range("interview_performance", self.interview_performance)?;
        Ok(())
    }

    /// Collapse the bundle to a single 0–100 scalar under the given weights.
    pub fn weighted_total(&self, weights: &DomainWeights) -> f64 {
        self.academic_rigor * weights.academic_rigor
            + self.program_fit * weights.program_fit
            + self.character_evidence * weights.character_evidence
            + self.recommendation_strength * weights.recommendation_strength
            + self.interview_performance * weights.interview_performance
    }
}

/// The analytics/integrity reviewer's score bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsScore {
    pub data_integrity: f64,
    pub originality: f64,
    pub record_consistency: f64,
    pub statistical_profile: f64,
    pub documentation_quality: f64,
    pub history_depth: f64,
    pub approved: bool,
    pub concerns: Vec<String>,
}

impl AnalyticsScore {
    /// Check every sub-score is within 0–100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("data_integrity", self.data_integrity)?;
        check_range("originality", self.originality)?;
        check_range("record_consistency", self.record_consistency)?;
        check_range("statistical_profile", self.statistical_profile)?;
        check_range("documentation_quality", self.documentation_quality)?;
        check_range("history_depth", self.history_depth)?;
        Ok(())
    }

    /// Collapse the bundle to a single 0–100 scalar under the given weights.
    pub fn weighted_total(&self, weights: &AnalyticsWeights) -> f64 {
        self.data_integrity * weights.data_integrity
            + self.originality * weights.originality
            + self.record_consistency * weights.record_consistency
            + self.statistical_profile * weights.statistical_profile
            + self.documentation_quality * weights.documentation_quality
            + self.history_depth * weights.history_depth
    }
}

fn check_range(dimension: &'static str, value: f64) -> Result<(), ValidationError> {
    if !(0.0..=100.0).contains(&value) || value.is_nan() {
        return Err(ValidationError::ScoreOutOfRange { dimension, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_types::EngineParams;

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

    #[test]
    fn uniform_bundle_collapses_to_its_value() {
        let params = EngineParams::reference_defaults();
        assert_eq!(
            domain(90.0).weighted_total(&params.domain_dimension_weights),
            90.0
        );
        assert_eq!(
            analytics(85.0).weighted_total(&params.analytics_dimension_weights),
            85.0
        );
    }

    #[test]
    fn mixed_bundle_weights_each_dimension() {
        let params = EngineParams::reference_defaults();
        let score = DomainScore {
            academic_rigor: 100.0,
            program_fit: 80.0,
            character_evidence: 60.0,
            recommendation_strength: 40.0,
            interview_performance: 40.0,
            approved: true,
            concerns: Vec::new(),
        };
        // 25 + 20 + 15 + 5 + 5
        assert_eq!(
            score.weighted_total(&params.domain_dimension_weights),
            70.0
        );
    }

    #[test]
    fn out_of_range_sub_score_is_rejected() {
        let mut score = domain(50.0);
        score.program_fit = 101.0;
        let err = score.validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ScoreOutOfRange {
                dimension: "program_fit",
                ..
            }
        ));

        let mut score = analytics(50.0);
        score.history_depth = -1.0;
        assert!(score.validate().is_err());
    }

    #[test]
    fn nan_sub_score_is_rejected() {
        let mut score = domain(50.0);
        score.academic_rigor = f64::NAN;
        assert!(score.validate().is_err());
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(domain(0.0).validate().is_ok());
        assert!(domain(100.0).validate().is_ok());
    }
}
