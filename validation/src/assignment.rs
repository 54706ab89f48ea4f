//! Reviewer assignment — one reviewer per role, chosen by a pluggable strategy.
//!
//! The selection policy is deliberately injectable: the orchestrator never
//! hard-codes "first match". Shipped strategies cover the common cases;
//! anything fancier implements [`SelectionStrategy`] outside this crate.

use crate::directory::{Reviewer, ReviewerDirectory, ReviewerRole};
use crate::error::ValidationError;
use crate::request::ValidationRequest;

/// The pair of reviewers chosen for one validation.
#[derive(Clone, Debug)]
pub struct AssignedReviewers {
    pub domain: Reviewer,
    pub analytics: Reviewer,
}

/// Picks one reviewer from a non-empty pool of active candidates.
pub trait SelectionStrategy: Send {
    fn choose(&mut self, candidates: &[Reviewer], request: &ValidationRequest)
        -> Option<Reviewer>;
}

/// Takes the first candidate in directory order.
pub struct FirstAvailable;

impl SelectionStrategy for FirstAvailable {
    fn choose(&mut self, candidates: &[Reviewer], _: &ValidationRequest) -> Option<Reviewer> {
        candidates.first().cloned()
    }
}

/// Cycles through each role's pool so load spreads across reviewers.
#[derive(Default)]
pub struct RoundRobin {
    cursors: std::collections::HashMap<ReviewerRole, usize>,
}

impl RoundRobin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionStrategy for RoundRobin {
    fn choose(&mut self, candidates: &[Reviewer], _: &ValidationRequest) -> Option<Reviewer> {
        let first = candidates.first()?;
        let cursor = self.cursors.entry(first.role).or_insert(0);
        let picked = candidates[*cursor % candidates.len()].clone();
        *cursor = cursor.wrapping_add(1);
        Some(picked)
    }
}

/// Prefers a reviewer whose specialization tags cover the request's field of
/// study; falls back to the first candidate otherwise.
pub struct SpecializationMatch;

impl SelectionStrategy for SpecializationMatch {
    fn choose(&mut self, candidates: &[Reviewer], request: &ValidationRequest) -> Option<Reviewer> {
        let field = &request.academic.field_of_study;
        candidates
            .iter()
            .find(|r| r.specializations.iter().any(|s| s == field))
            .or_else(|| candidates.first())
            .cloned()
    }
}

/// Select one active reviewer of each role for the request.
///
/// Fails per role: a shortage of domain reviewers is reported distinctly
/// from a shortage of analytics reviewers.
pub fn assign(
    directory: &dyn ReviewerDirectory,
    strategy: &mut dyn SelectionStrategy,
    request: &ValidationRequest,
) -> Result<AssignedReviewers, ValidationError> {
    let domain_pool = directory.list_active(ReviewerRole::Domain);
    let domain = strategy
        .choose(&domain_pool, request)
        .ok_or(ValidationError::NoAvailableReviewer(ReviewerRole::Domain))?;

    let analytics_pool = directory.list_active(ReviewerRole::Analytics);
    let analytics = strategy
        .choose(&analytics_pool, request)
        .ok_or(ValidationError::NoAvailableReviewer(ReviewerRole::Analytics))?;

    Ok(AssignedReviewers { domain, analytics })
}
