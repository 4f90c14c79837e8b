//! Provenance graph construction.
//!
//! Turns a parsed document into committed statements: one artifact per
//! component, one computation per dependency edge, one declaration per
//! claim. The walk is synchronous and ordered, so a document registers
//! identically on every run.

mod builder;

pub use builder::*;

/// What a graph walk committed, and what it skipped.
#[derive(Debug, Clone, Default)]
pub struct GraphOutcome {
    /// Artifact statements committed
    pub artifacts_registered: usize,
    /// Assessor identities registered (none of them activated)
    pub identities_registered: usize,
    /// Computation statements committed
    pub computations_finalized: usize,
    /// Declaration statements committed
    pub declarations_finalized: usize,
    /// Claims skipped because their target did not resolve
    pub skipped_claims: Vec<SkippedClaim>,
}

impl GraphOutcome {
    /// Total statements committed across all phases
    #[must_use]
    pub const fn statements_committed(&self) -> usize {
        self.artifacts_registered + self.computations_finalized + self.declarations_finalized
    }

    /// True when every claim in the document was committed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_claims.is_empty()
    }
}

/// A claim that could not be attached to any component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedClaim {
    /// Claim identifier, for reporting
    pub claim: String,
    /// The target ref that failed to resolve
    pub target: String,
    /// Why the claim was skipped
    pub reason: String,
}
