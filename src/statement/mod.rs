//! Provenance statements: builders with a two-state lifecycle and the
//! committed records a store persists.
//!
//! A statement starts open, accumulates content, and is sealed by
//! finalization. Sealing commits the record to a [`crate::store`] backend
//! and fixes the statement's [`crate::store::StableId`]; later edits fail
//! and later finalizations return the same id.

mod computation;
mod declaration;
mod extra;
mod record;

pub use computation::*;
pub use declaration::*;
pub use extra::*;
pub use record::*;

use crate::store::StableId;

/// Lifecycle state of a statement builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seal {
    /// Editable; not yet committed
    Open,
    /// Committed under the given stable id; no further edits
    Finalized(StableId),
}

impl Seal {
    /// True while the statement accepts edits
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}
