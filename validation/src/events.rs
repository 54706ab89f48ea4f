//! Lifecycle events emitted by the orchestrator.
//!
//! Events are typed per kind and buffered in the orchestrator; the
//! embedding service drains them and forwards to its UI/analytics sink.
//! Delivery is fire-and-forget — the engine never awaits acknowledgement.

use crate::consensus::ConsensusResult;
use crate::directory::ReviewerRole;
use crate::record::FinalDecision;
use crate::risk::RiskLevel;
use credence_types::{CandidateId, ReviewerId, ValidationId};

#[derive(Clone, Debug)]
pub enum ValidationEvent {
    /// A record was created and risk-screened.
    Created {
        validation: ValidationId,
        candidate: CandidateId,
        risk_level: RiskLevel,
    },
    /// Rejected outright on the high-risk path; no reviewers were assigned.
    Rejected {
        validation: ValidationId,
        reason: String,
        total_risk_score: u32,
    },
    /// Both reviewer roles have been assigned.
    ReviewersAssigned {
        validation: ValidationId,
        domain: ReviewerId,
        analytics: ReviewerId,
    },
    /// One role's score arrived; the other is still outstanding.
    PartialSubmission {
        validation: ValidationId,
        role: ReviewerRole,
    },
    /// Both scores arrived and the consensus engine ran.
    ConsensusProcessed {
        validation: ValidationId,
        result: ConsensusResult,
    },
    /// An escalated record was settled by an external actor.
    EscalationResolved {
        validation: ValidationId,
        decision: FinalDecision,
    },
}
