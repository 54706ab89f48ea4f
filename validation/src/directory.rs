//! Reviewer directory — the engine's read-mostly view of who can review.
//!
//! The directory is injected into the orchestrator rather than living in a
//! process-wide registry; one orchestrator instance owns one directory.

use credence_types::ReviewerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The two independent reviewer roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewerRole {
    /// Subject-matter and character evidence.
    Domain,
    /// Quantitative and integrity evidence.
    Analytics,
}

impl fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewerRole::Domain => write!(f, "domain"),
            ReviewerRole::Analytics => write!(f, "analytics"),
        }
    }
}

/// A directory entry for one reviewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reviewer {
    pub id: ReviewerId,
    pub name: String,
    pub role: ReviewerRole,
    /// Specialization tags matched against a request's field of study.
    pub specializations: Vec<String>,
    pub is_active: bool,
}

/// Lookup interface consumed by assignment and score submission.
pub trait ReviewerDirectory: Send + Sync {
    /// All active reviewers holding the given role.
    fn list_active(&self, role: ReviewerRole) -> Vec<Reviewer>;

    /// Look up one reviewer by ID, active or not.
    fn get(&self, id: &ReviewerId) -> Option<Reviewer>;

    /// Idempotent upsert by ID.
    fn register(&mut self, reviewer: Reviewer);
}

/// The in-process directory implementation.
#[derive(Default)]
pub struct InMemoryReviewerDirectory {
    reviewers: HashMap<ReviewerId, Reviewer>,
}

impl InMemoryReviewerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

impl ReviewerDirectory for InMemoryReviewerDirectory {
    fn list_active(&self, role: ReviewerRole) -> Vec<Reviewer> {
        let mut active: Vec<Reviewer> = self
            .reviewers
            .values()
            .filter(|r| r.is_active && r.role == role)
            .cloned()
            .collect();
        // Deterministic order regardless of map iteration.
        active.sort_by(|a, b| a.id.cmp(&b.id));
        active
    }

    fn get(&self, id: &ReviewerId) -> Option<Reviewer> {
        self.reviewers.get(id).cloned()
    }

    fn register(&mut self, reviewer: Reviewer) {
        self.reviewers.insert(reviewer.id.clone(), reviewer);
    }
}
