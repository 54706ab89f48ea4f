//! The reference fraud-rule set.
//!
//! Six independent rules, each with a capped maximum contribution:
//! duplicate-submission 25, suspicious-timing 20, data-inconsistency 30,
//! reference-authenticity 35, originality 40, identity-verification 45.
//! All of them are pure functions of the request.

use crate::request::ValidationRequest;
use crate::risk::{RiskFactor, RiskRule, RiskSeverity, RuleError};
use credence_types::EngineParams;
use std::collections::HashSet;

fn factor(rule: &'static str, score: u32, cap: u32, evidence: Vec<String>) -> RiskFactor {
    RiskFactor {
        rule: rule.into(),
        severity: RiskSeverity::for_contribution(score, cap),
        score,
        evidence,
    }
}

/// Flags portfolio items that share a content digest.
///
/// Each duplicated item contributes 10 points, capped.
pub struct DuplicateSubmissionRule {
    cap: u32,
}

impl DuplicateSubmissionRule {
    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.duplicate_submission_cap,
        }
    }
}

impl RiskRule for DuplicateSubmissionRule {
    fn name(&self) -> &'static str {
        "duplicate_submission"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        let mut seen = HashSet::new();
        let mut duplicated = Vec::new();
        for item in &request.portfolio {
            if !seen.insert(item.content_hash.as_str()) {
                duplicated.push(format!(
                    "portfolio item '{}' repeats digest {}",
                    item.title, item.content_hash
                ));
            }
        }
        if duplicated.is_empty() {
            return Ok(None);
        }
        let score = (duplicated.len() as u32 * 10).min(self.cap);
        Ok(Some(factor(self.name(), score, self.cap, duplicated)))
    }
}

/// Flags future-dated portfolio items and implausibly rapid upload batches.
pub struct SuspiciousTimingRule {
    cap: u32,
    window_secs: u64,
}

impl SuspiciousTimingRule {
    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.suspicious_timing_cap,
            window_secs: params.rapid_submission_window_secs,
        }
    }
}

impl RiskRule for SuspiciousTimingRule {
    fn name(&self) -> &'static str {
        "suspicious_timing"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        let future_dated: Vec<String> = request
            .portfolio
            .iter()
            .filter(|item| item.submitted_at > request.submitted_at)
            .map(|item| {
                format!(
                    "portfolio item '{}' is dated after the submission itself",
                    item.title
                )
            })
            .collect();
        if !future_dated.is_empty() {
            return Ok(Some(factor(self.name(), self.cap, self.cap, future_dated)));
        }

        // Three or more items landing inside one short window reads like a
        // scripted bulk upload rather than accumulated work.
        if request.portfolio.len() >= 3 {
            let earliest = request
                .portfolio
                .iter()
                .map(|i| i.submitted_at)
                .min()
                .ok_or_else(|| RuleError("empty portfolio after length check".into()))?;
            let latest = request
                .portfolio
                .iter()
                .map(|i| i.submitted_at)
                .max()
                .ok_or_else(|| RuleError("empty portfolio after length check".into()))?;
            if earliest.elapsed_since(latest) <= self.window_secs {
                let evidence = vec![format!(
                    "{} portfolio items uploaded within {}s",
                    request.portfolio.len(),
                    earliest.elapsed_since(latest)
                )];
                return Ok(Some(factor(self.name(), self.cap / 2, self.cap, evidence)));
            }
        }
        Ok(None)
    }
}

/// Cross-field plausibility checks; each finding adds 10 points, capped.
pub struct DataInconsistencyRule {
    cap: u32,
}

impl DataInconsistencyRule {
    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.data_inconsistency_cap,
        }
    }
}

impl RiskRule for DataInconsistencyRule {
    fn name(&self) -> &'static str {
        "data_inconsistency"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        let mut findings = Vec::new();
        let academic = &request.academic;

        if !(0.0..=4.0).contains(&academic.gpa) || academic.gpa.is_nan() {
            findings.push(format!("gpa {} is outside the 0.0–4.0 scale", academic.gpa));
        }
        // Calendar precision does not matter here; a year-level bound is enough.
        let submission_year = 1970 + (request.submitted_at.as_secs() / 31_557_600) as u32;
        if academic.graduation_year > submission_year {
            findings.push(format!(
                "graduation year {} is in the future",
                academic.graduation_year
            ));
        }
        if academic.credits_completed == 0 && academic.gpa > 0.0 {
            findings.push("gpa reported with zero completed credits".into());
        }
        if request.profile.years_experience > 60 {
            findings.push(format!(
                "{} years of claimed experience is implausible",
                request.profile.years_experience
            ));
        }

        if findings.is_empty() {
            return Ok(None);
        }
        let score = (findings.len() as u32 * 10).min(self.cap);
        Ok(Some(factor(self.name(), score, self.cap, findings)))
    }
}

/// Scores the fraction of references that cannot be authenticated.
///
/// A reference with no contact channel counts as unverifiable. With no
/// references at all there is nothing to authenticate and the rule stays
/// silent — judging a thin application is the domain reviewer's job.
pub struct ReferenceAuthenticityRule {
    cap: u32,
}

impl ReferenceAuthenticityRule {
    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.reference_authenticity_cap,
        }
    }
}

impl RiskRule for ReferenceAuthenticityRule {
    fn name(&self) -> &'static str {
        "reference_authenticity"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        let references = &request.academic.references;
        if references.is_empty() {
            return Ok(None);
        }
        let unverifiable: Vec<String> = references
            .iter()
            .filter(|r| !r.verified || r.contact.is_none())
            .map(|r| format!("reference '{}' could not be authenticated", r.name))
            .collect();
        if unverifiable.is_empty() {
            return Ok(None);
        }
        let fraction = unverifiable.len() as f64 / references.len() as f64;
        let score = (self.cap as f64 * fraction).round() as u32;
        Ok(Some(factor(self.name(), score, self.cap, unverifiable)))
    }
}

/// Flags portfolio work the upstream similarity scan marked as unoriginal.
///
/// Scored from the least original item: originality below 0.5 scales
/// linearly up to the cap.
pub struct OriginalityRule {
    cap: u32,
}

impl OriginalityRule {
    /// Originality below this is considered derivative.
    pub const ORIGINALITY_FLOOR: f64 = 0.5;

    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.originality_cap,
        }
    }
}

impl RiskRule for OriginalityRule {
    fn name(&self) -> &'static str {
        "originality"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        let worst = request
            .portfolio
            .iter()
            .filter_map(|item| item.originality_score.map(|s| (item, s)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        let Some((item, originality)) = worst else {
            return Ok(None);
        };
        if originality.is_nan() {
            return Err(RuleError(format!(
                "originality scan produced NaN for '{}'",
                item.title
            )));
        }
        if originality >= Self::ORIGINALITY_FLOOR {
            return Ok(None);
        }
        let deficit = (Self::ORIGINALITY_FLOOR - originality) / Self::ORIGINALITY_FLOOR;
        let score = (self.cap as f64 * deficit).round() as u32;
        let evidence = vec![format!(
            "portfolio item '{}' scored {:.2} on the originality scan",
            item.title, originality
        )];
        Ok(Some(factor(self.name(), score, self.cap, evidence)))
    }
}

/// Checks the candidate's identity document.
///
/// Missing document: full cap. Present but unconfirmed: half.
pub struct IdentityVerificationRule {
    cap: u32,
}

impl IdentityVerificationRule {
    pub fn new(params: &EngineParams) -> Self {
        Self {
            cap: params.identity_verification_cap,
        }
    }
}

impl RiskRule for IdentityVerificationRule {
    fn name(&self) -> &'static str {
        "identity_verification"
    }

    fn max_score(&self) -> u32 {
        self.cap
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Option<RiskFactor>, RuleError> {
        match &request.profile.identity_document {
            None => Ok(Some(factor(
                self.name(),
                self.cap,
                self.cap,
                vec!["no identity document on file".into()],
            ))),
            Some(doc) if !doc.verified => Ok(Some(factor(
                self.name(),
                self.cap / 2,
                self.cap,
                vec![format!("identity document '{}' is unconfirmed", doc.kind)],
            ))),
            Some(_) => Ok(None),
        }
    }
}
