//! Risk signals and aggregation.
//!
//! Independent, side-effect-free rules each inspect a request and optionally
//! emit a [`RiskFactor`]. The aggregator sums the factors into a total score
//! and a discrete risk level. A rule that fails is logged and contributes
//! nothing — fail-open, so one broken rule can never block the pipeline.

use crate::request::ValidationRequest;
use credence_types::EngineParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single fraud-risk signal emitted by one rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Name of the rule that produced this factor.
    pub rule: String,
    pub severity: RiskSeverity,
    /// Score contribution, already clamped to the rule's cap.
    pub score: u32,
    /// Human-readable evidence for audit trails.
    pub evidence: Vec<String>,
}

/// Severity of an individual factor relative to its rule's cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
}

impl RiskSeverity {
    /// Classify a contribution against its cap: ≥80% high, ≥40% medium.
    pub fn for_contribution(score: u32, cap: u32) -> Self {
        if cap == 0 {
            return RiskSeverity::Low;
        }
        let ratio = score as f64 / cap as f64;
        if ratio >= 0.8 {
            RiskSeverity::High
        } else if ratio >= 0.4 {
            RiskSeverity::Medium
        } else {
            RiskSeverity::Low
        }
    }
}

/// Overall risk level of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn classify(total: u32, high_threshold: u32, medium_threshold: u32) -> Self {
        if total >= high_threshold {
            RiskLevel::High
        } else if total >= medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// The combined result of running every registered rule against one request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub factors: Vec<RiskFactor>,
    pub total_score: u32,
    pub level: RiskLevel,
}

/// Error type for rule evaluation failures.
///
/// Never surfaces to the caller — the aggregator logs it and moves on.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RuleError(pub String);

/// A pluggable fraud-risk rule.
///
/// Rules are intentionally independent and order-insensitive; adding or
/// removing one never touches the aggregator.
pub trait RiskRule: Send + Sync {
    /// Stable rule name, used in factors and logs.
    fn name(&self) -> &'static str;

    /// Maximum score this rule may contribute.
    fn max_score(&self) -> u32;

    /// Inspect a request and optionally emit a factor.
    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError>;
}

/// Runs all registered rules and folds their signals into one assessment.
pub struct RiskAggregator {
    rules: Vec<Box<dyn RiskRule>>,
    high_threshold: u32,
    medium_threshold: u32,
}

impl RiskAggregator {
    /// An aggregator with no rules; register them individually.
    pub fn new(params: &EngineParams) -> Self {
        Self {
            rules: Vec::new(),
            high_threshold: params.risk_high_threshold,
            medium_threshold: params.risk_medium_threshold,
        }
    }

    /// An aggregator carrying the standard six-rule screening set.
    pub fn standard(params: &EngineParams) -> Self {
        use crate::rules::*;
        let mut agg = Self::new(params);
        agg.register(Box::new(DuplicateSubmissionRule::new(params)));
        agg.register(Box::new(SuspiciousTimingRule::new(params)));
        agg.register(Box::new(DataInconsistencyRule::new(params)));
        agg.register(Box::new(ReferenceAuthenticityRule::new(params)));
        agg.register(Box::new(OriginalityRule::new(params)));
        agg.register(Box::new(IdentityVerificationRule::new(params)));
        agg
    }

    pub fn register(&mut self, rule: Box<dyn RiskRule>) {
        self.rules.push(rule);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule against the request.
    ///
    /// Factor scores are clamped to each rule's cap before summing, so a
    /// misbehaving rule cannot dominate the total.
    pub fn assess(&self, request: &ValidationRequest) -> RiskAssessment {
        let mut factors = Vec::new();
        for rule in &self.rules {
            match rule.evaluate(request) {
                Ok(Some(mut factor)) => {
                    factor.score = factor.score.min(rule.max_score());
                    factors.push(factor);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        rule = rule.name(),
                        error = %e,
                        "risk rule failed; continuing without its signal"
                    );
                }
            }
        }
        let total_score: u32 = factors.iter().map(|f| f.score).sum();
        RiskAssessment {
            factors,
            total_score,
            level: RiskLevel::classify(total_score, self.high_threshold, self.medium_threshold),
        }
    }
}
