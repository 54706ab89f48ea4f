//! Credence validation — dual-reviewer certification validation engine.
//!
//! A submission enters through [`ValidationOrchestrator::initiate`], is
//! screened by the fraud rule set, and — unless rejected outright — gets one
//! reviewer per role assigned. Each role submits a multi-dimension score;
//! when both are in, the consensus engine combines them into a decision or
//! escalates when the roles disagree too widely. Every step is recorded on
//! the [`ValidationRecord`] and surfaced as a [`ValidationEvent`].
//!
//! The engine is a library: it owns no threads, no sockets, and no global
//! state. Persistence and delivery are the embedding service's job, fed by
//! [`ValidationOrchestrator::snapshot`] and
//! [`ValidationOrchestrator::drain_events`].

pub mod assignment;
pub mod consensus;
pub mod directory;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod record;
pub mod request;
pub mod risk;
pub mod rules;
pub mod score;

pub use assignment::{
    assign, AssignedReviewers, FirstAvailable, RoundRobin, SelectionStrategy, SpecializationMatch,
};
pub use consensus::{ConsensusEngine, ConsensusResult, Decision};
pub use directory::{InMemoryReviewerDirectory, Reviewer, ReviewerDirectory, ReviewerRole};
pub use error::ValidationError;
pub use events::ValidationEvent;
pub use orchestrator::{OrchestratorSnapshot, ValidationOrchestrator};
pub use record::{
    AnalyticsReview, ConflictResolution, DomainReview, FinalDecision, ValidationRecord,
    ValidationStatus,
};
pub use request::{
    AcademicRecord, IdentityDocument, PortfolioItem, ProfileRecord, Reference, UrgencyLevel,
    ValidationRequest,
};
pub use risk::{
    RiskAggregator, RiskAssessment, RiskFactor, RiskLevel, RiskRule, RiskSeverity, RuleError,
};
pub use rules::{
    DataInconsistencyRule, DuplicateSubmissionRule, IdentityVerificationRule, OriginalityRule,
    ReferenceAuthenticityRule, SuspiciousTimingRule,
};
pub use score::{AnalyticsScore, DomainScore};
