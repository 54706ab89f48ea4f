//! Validation record — the mutable aggregate for one submission's journey.

use crate::consensus::{ConsensusResult, Decision};
use crate::request::ValidationRequest;
use crate::risk::RiskAssessment;
use crate::score::{AnalyticsScore, DomainScore};
use credence_types::{
    ApplicationId, CandidateId, InstitutionId, ProgramId, ReviewerId, Timestamp, ValidationId,
};
use serde::{Deserialize, Serialize};

/// Where one validation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// Created; risk check not passed (or assignment failed).
    Pending,
    /// Risk check passed, reviewers assigned, no score submitted yet.
    InProgress,
    /// The analytics score arrived first; the domain score is outstanding.
    DomainReviewPending,
    /// The domain score arrived first; the analytics score is outstanding.
    AnalyticsReviewPending,
    /// The roles disagreed; waiting on external escalation.
    ConsensusRequired,
    Approved,
    Rejected,
    RequiresRemediation,
}

impl ValidationStatus {
    /// Fully terminal: `completed_at` is stamped exactly for these.
    ///
    /// `ConsensusRequired` is terminal-for-automation but not terminal —
    /// escalation resolution still moves it.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ValidationStatus::Approved
                | ValidationStatus::Rejected
                | ValidationStatus::RequiresRemediation
        )
    }

    /// The status a consensus decision lands the record in.
    pub fn from_decision(decision: Decision) -> Self {
        match decision {
            Decision::Approved => ValidationStatus::Approved,
            Decision::Rejected => ValidationStatus::Rejected,
            Decision::RequiresRemediation => ValidationStatus::RequiresRemediation,
            Decision::ConsensusRequired => ValidationStatus::ConsensusRequired,
        }
    }
}

/// A terminal decision injected by the external escalation process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalDecision {
    Approved,
    Rejected,
    RequiresRemediation,
}

impl FinalDecision {
    pub fn to_status(self) -> ValidationStatus {
        match self {
            FinalDecision::Approved => ValidationStatus::Approved,
            FinalDecision::Rejected => ValidationStatus::Rejected,
            FinalDecision::RequiresRemediation => ValidationStatus::RequiresRemediation,
        }
    }
}

/// How a `ConsensusRequired` record was ultimately settled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    /// Who resolved it (an operator or committee identifier).
    pub resolved_by: String,
    pub decision: FinalDecision,
    pub notes: String,
    pub resolved_at: Timestamp,
}

/// The domain reviewer's accepted submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainReview {
    pub reviewer: ReviewerId,
    pub score: DomainScore,
    pub submitted_at: Timestamp,
}

/// The analytics reviewer's accepted submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReview {
    pub reviewer: ReviewerId,
    pub score: AnalyticsScore,
    pub submitted_at: Timestamp,
}

/// The per-submission aggregate tracked by validation ID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    pub id: ValidationId,
    pub candidate: CandidateId,
    pub application: ApplicationId,
    pub program: ProgramId,
    pub institution: InstitutionId,
    pub status: ValidationStatus,
    /// Result of the fraud screening run at initiation.
    pub risk: Option<RiskAssessment>,
    pub assigned_domain_reviewer: Option<ReviewerId>,
    pub assigned_analytics_reviewer: Option<ReviewerId>,
    pub domain_review: Option<DomainReview>,
    pub analytics_review: Option<AnalyticsReview>,
    /// Present iff both reviews are present and consensus has run.
    pub consensus_result: Option<ConsensusResult>,
    /// Present only when an escalated record was settled externally.
    pub conflict_resolution: Option<ConflictResolution>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Present iff `status.is_terminal()`.
    pub completed_at: Option<Timestamp>,
}

impl ValidationRecord {
    pub fn new(id: ValidationId, request: &ValidationRequest, now: Timestamp) -> Self {
        Self {
            id,
            candidate: request.candidate.clone(),
            application: request.application.clone(),
            program: request.program.clone(),
            institution: request.academic.institution.clone(),
            status: ValidationStatus::Pending,
            risk: None,
            assigned_domain_reviewer: None,
            assigned_analytics_reviewer: None,
            domain_review: None,
            analytics_review: None,
            consensus_result: None,
            conflict_resolution: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Move to a terminal status and stamp `completed_at`.
    pub fn complete(&mut self, status: ValidationStatus, now: Timestamp) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.updated_at = now;
        self.completed_at = Some(now);
    }

    /// Move to a non-terminal status.
    pub fn transition(&mut self, status: ValidationStatus, now: Timestamp) {
        debug_assert!(!status.is_terminal());
        self.status = status;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{AcademicRecord, ProfileRecord, UrgencyLevel};

    fn request() -> ValidationRequest {
        ValidationRequest {
            candidate: CandidateId::new("cand-1"),
            program: ProgramId::new("prog-1"),
            application: ApplicationId::new("app-1"),
            academic: AcademicRecord {
                institution: InstitutionId::new("inst-1"),
                field_of_study: "physics".into(),
                gpa: 3.5,
                credits_completed: 100,
                graduation_year: 2020,
                references: Vec::new(),
            },
            profile: ProfileRecord {
                statement: String::new(),
                years_experience: 2,
                identity_document: None,
            },
            portfolio: Vec::new(),
            urgency: UrgencyLevel::Standard,
            submitted_at: Timestamp::new(1_700_000_000),
        }
    }

    #[test]
    fn new_record_starts_pending_and_empty() {
        let record = ValidationRecord::new(ValidationId::generate(), &request(), Timestamp::new(5));
        assert_eq!(record.status, ValidationStatus::Pending);
        assert!(record.domain_review.is_none());
        assert!(record.analytics_review.is_none());
        assert!(record.consensus_result.is_none());
        assert!(record.completed_at.is_none());
        assert_eq!(record.created_at, record.updated_at);
        assert_eq!(record.institution.as_str(), "inst-1");
    }

    #[test]
    fn complete_stamps_completed_at() {
        let mut record =
            ValidationRecord::new(ValidationId::generate(), &request(), Timestamp::new(5));
        record.complete(ValidationStatus::Rejected, Timestamp::new(9));
        assert_eq!(record.status, ValidationStatus::Rejected);
        assert_eq!(record.completed_at, Some(Timestamp::new(9)));
        assert_eq!(record.updated_at, Timestamp::new(9));
    }

    #[test]
    fn only_final_statuses_are_terminal() {
        assert!(ValidationStatus::Approved.is_terminal());
        assert!(ValidationStatus::Rejected.is_terminal());
        assert!(ValidationStatus::RequiresRemediation.is_terminal());
        assert!(!ValidationStatus::ConsensusRequired.is_terminal());
        assert!(!ValidationStatus::Pending.is_terminal());
        assert!(!ValidationStatus::InProgress.is_terminal());
        assert!(!ValidationStatus::DomainReviewPending.is_terminal());
        assert!(!ValidationStatus::AnalyticsReviewPending.is_terminal());
    }

    #[test]
    fn decision_maps_onto_status() {
        assert_eq!(
            ValidationStatus::from_decision(Decision::ConsensusRequired),
            ValidationStatus::ConsensusRequired
        );
        assert_eq!(
            ValidationStatus::from_decision(Decision::Approved),
            ValidationStatus::Approved
        );
        assert_eq!(
            FinalDecision::RequiresRemediation.to_status(),
            ValidationStatus::RequiresRemediation
        );
    }
}
