//! Opaque identifier newtypes.
//!
//! All identifiers are plain strings from the engine's point of view —
//! candidates, reviewers, programs, and applications are owned by the
//! surrounding service. Only `ValidationId` is minted here, at record
//! creation, and is never reused.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one validation record, generated at creation.
///
/// Formatted as `vld_` followed by 32 hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValidationId(String);

impl ValidationId {
    /// The standard prefix for all validation identifiers.
    pub const PREFIX: &'static str = "vld_";

    /// Mint a fresh identifier from 16 random bytes.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(format!("{}{}", Self::PREFIX, hex::encode(bytes)))
    }

    /// Wrap a raw identifier string (e.g. read back from a snapshot).
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! opaque_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

opaque_id!(
    /// Identifier of the candidate whose submission is being validated.
    CandidateId
);
opaque_id!(
    /// Identifier of the certification program applied to.
    ProgramId
);
opaque_id!(
    /// Identifier of the underlying application in the surrounding service.
    ApplicationId
);
opaque_id!(
    /// Identifier of a reviewer in the reviewer directory.
    ReviewerId
);
opaque_id!(
    /// Identifier of the institution the academic record originates from.
    InstitutionId
);
