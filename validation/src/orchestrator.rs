//! Validation orchestrator — connects risk screening, reviewer assignment,
//! score collection, and consensus into a single end-to-end workflow.
//!
//! One orchestrator instance owns its record map, its reviewer directory,
//! and its rule set; there is no process-wide state. Mutations take
//! `&mut self`, which is what serializes the two-reviewers-one-record race:
//! both submissions cannot observe "other score absent" at once.

use crate::assignment::{assign, SelectionStrategy};
use crate::consensus::ConsensusEngine;
use crate::directory::{Reviewer, ReviewerDirectory, ReviewerRole};
use crate::error::ValidationError;
use crate::events::ValidationEvent;
use crate::record::{
    AnalyticsReview, ConflictResolution, DomainReview, FinalDecision, ValidationRecord,
    ValidationStatus,
};
use crate::request::ValidationRequest;
use crate::risk::{RiskAggregator, RiskLevel, RiskRule};
use crate::score::{AnalyticsScore, DomainScore};
use credence_types::{CandidateId, EngineParams, ReviewerId, Timestamp, ValidationId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The public face of the engine.
pub struct ValidationOrchestrator {
    consensus: ConsensusEngine,
    risk: RiskAggregator,
    directory: Box<dyn ReviewerDirectory>,
    strategy: Box<dyn SelectionStrategy>,
    records: HashMap<ValidationId, ValidationRecord>,
    /// Pending events for the embedding service to drain.
    pending_events: Vec<ValidationEvent>,
}

impl ValidationOrchestrator {
    /// Build an orchestrator with the standard rule set.
    ///
    /// Weight tables are validated here, once — a bad configuration never
    /// reaches the request path.
    pub fn new(
        params: &EngineParams,
        directory: Box<dyn ReviewerDirectory>,
        strategy: Box<dyn SelectionStrategy>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            consensus: ConsensusEngine::new(params)?,
            risk: RiskAggregator::standard(params),
            directory,
            strategy,
            records: HashMap::new(),
            pending_events: Vec::new(),
        })
    }

    /// Add a fraud rule beyond the standard set.
    pub fn register_risk_rule(&mut self, rule: Box<dyn RiskRule>) {
        self.risk.register(rule);
    }

    /// Idempotent upsert of a reviewer into the owned directory.
    pub fn register_reviewer(&mut self, reviewer: Reviewer) {
        self.directory.register(reviewer);
    }

    /// Mark a reviewer inactive; pending assignments are unaffected but new
    /// submissions from them will fail.
    pub fn deactivate_reviewer(&mut self, id: &ReviewerId) -> Result<(), ValidationError> {
        let mut reviewer = self
            .directory
            .get(id)
            .ok_or_else(|| ValidationError::ReviewerNotFound(id.to_string()))?;
        reviewer.is_active = false;
        self.directory.register(reviewer);
        Ok(())
    }

    /// Look up a reviewer in the owned directory.
    pub fn reviewer(&self, id: &ReviewerId) -> Option<Reviewer> {
        self.directory.get(id)
    }

    /// Create a record for the request and run it through risk screening.
    ///
    /// High risk rejects immediately — `completed_at` stamped, rejection
    /// event emitted, no reviewers assigned. Otherwise reviewers are
    /// assigned and the record moves to `InProgress`. If assignment fails
    /// the record is kept in `Pending` and the error is returned.
    pub fn initiate(
        &mut self,
        request: ValidationRequest,
    ) -> Result<&ValidationRecord, ValidationError> {
        let now = Timestamp::now();
        let id = ValidationId::generate();
        let mut record = ValidationRecord::new(id.clone(), &request, now);

        let assessment = self.risk.assess(&request);
        self.pending_events.push(ValidationEvent::Created {
            validation: id.clone(),
            candidate: record.candidate.clone(),
            risk_level: assessment.level,
        });

        if assessment.level == RiskLevel::High {
            let total = assessment.total_score;
            let reason = format!("fraud screening scored {total} (high risk)");
            tracing::debug!(validation = %id, score = total, "rejected at risk screening");
            record.risk = Some(assessment);
            record.complete(ValidationStatus::Rejected, now);
            self.pending_events.push(ValidationEvent::Rejected {
                validation: id.clone(),
                reason,
                total_risk_score: total,
            });
            return Ok(&*self.records.entry(id).or_insert(record));
        }

        record.risk = Some(assessment);
        match assign(self.directory.as_ref(), self.strategy.as_mut(), &request) {
            Ok(pair) => {
                record.assigned_domain_reviewer = Some(pair.domain.id.clone());
                record.assigned_analytics_reviewer = Some(pair.analytics.id.clone());
                record.transition(ValidationStatus::InProgress, now);
                self.pending_events.push(ValidationEvent::ReviewersAssigned {
                    validation: id.clone(),
                    domain: pair.domain.id,
                    analytics: pair.analytics.id,
                });
                Ok(&*self.records.entry(id).or_insert(record))
            }
            Err(e) => {
                // Keep the record so the stall is visible; it cannot progress.
                self.records.insert(id, record);
                Err(e)
            }
        }
    }

    /// Submit the domain reviewer's score.
    ///
    /// Returns the consensus event when this was the second of the two
    /// scores; `None` when the analytics score is still outstanding.
    pub fn submit_domain_score(
        &mut self,
        validation: &ValidationId,
        reviewer: &ReviewerId,
        score: DomainScore,
    ) -> Result<Option<ValidationEvent>, ValidationError> {
        score.validate()?;
        self.check_reviewer(reviewer, ReviewerRole::Domain)?;
        let now = Timestamp::now();
        let record = self
            .records
            .get_mut(validation)
            .ok_or_else(|| ValidationError::ValidationNotFound(validation.to_string()))?;

        if record.domain_review.is_some() {
            return Err(ValidationError::AlreadySubmitted(ReviewerRole::Domain));
        }
        match record.status {
            ValidationStatus::InProgress | ValidationStatus::DomainReviewPending => {}
            status => {
                return Err(ValidationError::NotAcceptingScores {
                    validation: validation.to_string(),
                    status,
                })
            }
        }

        match &record.analytics_review {
            Some(analytics) => {
                let result = self.consensus.evaluate(&score, &analytics.score, now);
                record.domain_review = Some(DomainReview {
                    reviewer: reviewer.clone(),
                    score,
                    submitted_at: now,
                });
                let event = settle_consensus(record, result, now);
                self.pending_events.push(event.clone());
                Ok(Some(event))
            }
            None => {
                record.domain_review = Some(DomainReview {
                    reviewer: reviewer.clone(),
                    score,
                    submitted_at: now,
                });
                record.transition(ValidationStatus::AnalyticsReviewPending, now);
                self.pending_events.push(ValidationEvent::PartialSubmission {
                    validation: validation.clone(),
                    role: ReviewerRole::Domain,
                });
                Ok(None)
            }
        }
    }

    /// Submit the analytics reviewer's score; symmetric to the domain path.
    pub fn submit_analytics_score(
        &mut self,
        validation: &ValidationId,
        reviewer: &ReviewerId,
        score: AnalyticsScore,
    ) -> Result<Option<ValidationEvent>, ValidationError> {
        score.validate()?;
        self.check_reviewer(reviewer, ReviewerRole::Analytics)?;
        let now = Timestamp::now();
        let record = self
            .records
            .get_mut(validation)
            .ok_or_else(|| ValidationError::ValidationNotFound(validation.to_string()))?;

        if record.analytics_review.is_some() {
            return Err(ValidationError::AlreadySubmitted(ReviewerRole::Analytics));
        }
        match record.status {
            ValidationStatus::InProgress | ValidationStatus::AnalyticsReviewPending => {}
            status => {
                return Err(ValidationError::NotAcceptingScores {
                    validation: validation.to_string(),
                    status,
                })
            }
        }

        match &record.domain_review {
            Some(domain) => {
                let result = self.consensus.evaluate(&domain.score, &score, now);
                record.analytics_review = Some(AnalyticsReview {
                    reviewer: reviewer.clone(),
                    score,
                    submitted_at: now,
                });
                let event = settle_consensus(record, result, now);
                self.pending_events.push(event.clone());
                Ok(Some(event))
            }
            None => {
                record.analytics_review = Some(AnalyticsReview {
                    reviewer: reviewer.clone(),
                    score,
                    submitted_at: now,
                });
                record.transition(ValidationStatus::DomainReviewPending, now);
                self.pending_events.push(ValidationEvent::PartialSubmission {
                    validation: validation.clone(),
                    role: ReviewerRole::Analytics,
                });
                Ok(None)
            }
        }
    }

    /// Settle a `ConsensusRequired` record with an externally-made decision.
    pub fn resolve_escalation(
        &mut self,
        validation: &ValidationId,
        resolved_by: impl Into<String>,
        decision: FinalDecision,
        notes: impl Into<String>,
    ) -> Result<ValidationEvent, ValidationError> {
        let now = Timestamp::now();
        let record = self
            .records
            .get_mut(validation)
            .ok_or_else(|| ValidationError::ValidationNotFound(validation.to_string()))?;

        if record.status != ValidationStatus::ConsensusRequired {
            return Err(ValidationError::NotAwaitingEscalation(validation.to_string()));
        }

        record.conflict_resolution = Some(ConflictResolution {
            resolved_by: resolved_by.into(),
            decision,
            notes: notes.into(),
            resolved_at: now,
        });
        record.complete(decision.to_status(), now);

        let event = ValidationEvent::EscalationResolved {
            validation: validation.clone(),
            decision,
        };
        self.pending_events.push(event.clone());
        Ok(event)
    }

    /// Get one validation record.
    pub fn get(&self, validation: &ValidationId) -> Option<&ValidationRecord> {
        self.records.get(validation)
    }

    /// All records for one candidate, oldest first.
    pub fn list_by_candidate(&self, candidate: &CandidateId) -> Vec<&ValidationRecord> {
        let mut records: Vec<&ValidationRecord> = self
            .records
            .values()
            .filter(|r| &r.candidate == candidate)
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        records
    }

    /// Drain pending events for the embedding service to forward.
    pub fn drain_events(&mut self) -> Vec<ValidationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Serialize in-flight validation state for persistence.
    ///
    /// The reviewer directory and rule set are configuration, not state;
    /// `restore` takes them fresh.
    pub fn snapshot(&self) -> OrchestratorSnapshot {
        OrchestratorSnapshot {
            records: self.records.clone(),
        }
    }

    /// Restore in-flight state from a persisted snapshot.
    pub fn restore(
        snapshot: OrchestratorSnapshot,
        params: &EngineParams,
        directory: Box<dyn ReviewerDirectory>,
        strategy: Box<dyn SelectionStrategy>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            consensus: ConsensusEngine::new(params)?,
            risk: RiskAggregator::standard(params),
            directory,
            strategy,
            records: snapshot.records,
            pending_events: Vec::new(),
        })
    }

    /// Snapshot encoded with bincode.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, ValidationError> {
        bincode::serialize(&self.snapshot()).map_err(|e| ValidationError::Snapshot(e.to_string()))
    }

    /// Restore from a bincode-encoded snapshot.
    pub fn restore_bytes(
        bytes: &[u8],
        params: &EngineParams,
        directory: Box<dyn ReviewerDirectory>,
        strategy: Box<dyn SelectionStrategy>,
    ) -> Result<Self, ValidationError> {
        let snapshot: OrchestratorSnapshot =
            bincode::deserialize(bytes).map_err(|e| ValidationError::Snapshot(e.to_string()))?;
        Self::restore(snapshot, params, directory, strategy)
    }

    fn check_reviewer(
        &self,
        id: &ReviewerId,
        expected: ReviewerRole,
    ) -> Result<(), ValidationError> {
        let reviewer = self
            .directory
            .get(id)
            .ok_or_else(|| ValidationError::ReviewerNotFound(id.to_string()))?;
        if !reviewer.is_active {
            return Err(ValidationError::ReviewerInactive(id.to_string()));
        }
        if reviewer.role != expected {
            return Err(ValidationError::RoleMismatch {
                reviewer: id.to_string(),
                expected,
                actual: reviewer.role,
            });
        }
        Ok(())
    }
}

/// Apply a consensus result to the record and build its event.
fn settle_consensus(
    record: &mut ValidationRecord,
    result: crate::consensus::ConsensusResult,
    now: Timestamp,
) -> ValidationEvent {
    let status = ValidationStatus::from_decision(result.decision);
    if status.is_terminal() {
        record.complete(status, now);
    } else {
        record.transition(status, now);
    }
    record.consensus_result = Some(result.clone());
    ValidationEvent::ConsensusProcessed {
        validation: record.id.clone(),
        result,
    }
}

/// Serializable snapshot of orchestrator state for persistence across restarts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrchestratorSnapshot {
    pub records: HashMap<ValidationId, ValidationRecord>,
}
