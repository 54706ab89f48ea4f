use crate::directory::ReviewerRole;
use crate::record::ValidationStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("no validation record for {0}")]
    ValidationNotFound(String),

    #[error("reviewer {0} is not registered")]
    ReviewerNotFound(String),

    #[error("reviewer {0} has been deactivated")]
    ReviewerInactive(String),

    #[error("reviewer {reviewer} holds the {actual} role, expected {expected}")]
    RoleMismatch {
        reviewer: String,
        expected: ReviewerRole,
        actual: ReviewerRole,
    },

    #[error("a {0} score has already been submitted for this validation")]
    AlreadySubmitted(ReviewerRole),

    #[error("no active {0} reviewer available for assignment")]
    NoAvailableReviewer(ReviewerRole),

    #[error("{scope} weights sum to {sum}, expected 1.0")]
    InvalidWeights { scope: &'static str, sum: f64 },

    #[error("sub-score {dimension} = {value} is outside the 0–100 range")]
    ScoreOutOfRange { dimension: &'static str, value: f64 },

    #[error("validation {validation} is in state {status:?}, not accepting scores")]
    NotAcceptingScores {
        validation: String,
        status: ValidationStatus,
    },

    #[error("validation {0} is not awaiting escalation")]
    NotAwaitingEscalation(String),

    #[error("snapshot serialization failed: {0}")]
    Snapshot(String),
}
