//! Fundamental types for the Credence validation engine.
//!
//! This crate defines the core types shared across the workspace:
//! opaque identifiers, timestamps, and the engine parameter set.

pub mod ids;
pub mod params;
pub mod time;

pub use ids::{
    ApplicationId, CandidateId, InstitutionId, ProgramId, ReviewerId, ValidationId,
};
pub use params::{AnalyticsWeights, DomainWeights, EngineParams};
pub use time::Timestamp;
