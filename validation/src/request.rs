//! The immutable validation request — everything the engine knows about a
//! candidate's submission. Created by the caller, never mutated.

use credence_types::{ApplicationId, CandidateId, InstitutionId, ProgramId, Timestamp};
use serde::{Deserialize, Serialize};

/// A candidate's submission, as handed to the orchestrator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub candidate: CandidateId,
    pub program: ProgramId,
    pub application: ApplicationId,
    pub academic: AcademicRecord,
    pub profile: ProfileRecord,
    pub portfolio: Vec<PortfolioItem>,
    pub urgency: UrgencyLevel,
    /// When the surrounding service accepted the submission.
    pub submitted_at: Timestamp,
}

/// Structured academic evidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcademicRecord {
    pub institution: InstitutionId,
    pub field_of_study: String,
    /// Grade point average on the 0.0–4.0 scale.
    pub gpa: f64,
    pub credits_completed: u32,
    pub graduation_year: u32,
    pub references: Vec<Reference>,
}

/// A reference attached to the academic record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    /// Contact channel, if one was provided at all.
    pub contact: Option<String>,
    /// Whether the surrounding service confirmed the reference responded.
    pub verified: bool,
}

/// Qualitative and character evidence about the candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub statement: String,
    pub years_experience: u32,
    pub identity_document: Option<IdentityDocument>,
}

/// An identity document on file for the candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub kind: String,
    pub verified: bool,
}

/// One item of submitted work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    /// Content digest computed upstream; identical digests mean identical work.
    pub content_hash: String,
    pub submitted_at: Timestamp,
    /// Originality in [0.0, 1.0] from the upstream similarity scan, when one ran.
    pub originality_score: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Standard,
    Expedited,
    Critical,
}
