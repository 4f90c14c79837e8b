//! Statement persistence and signing identities.
//!
//! A [`StatementStore`] accepts finalized statement records, assigns each a
//! [`StableId`], and can export everything committed so far as a JSON
//! manifest. Commits are attributed to the active identity of a
//! [`SignerContext`]; committing without one is an error.

mod identity;
mod memory;

pub use identity::*;
pub use memory::*;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::statement::StatementRecord;

/// Identifier a store assigns to a committed statement.
///
/// Stable ids live in the store's own identifier space; they are not
/// content ids and the two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StableId(String);

impl StableId {
    /// Wrap an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend that persists committed statements.
pub trait StatementStore {
    /// Persist a record under the active signing identity and mint its
    /// stable id.
    fn commit(&mut self, record: &StatementRecord, signer: &SignerContext) -> Result<StableId>;

    /// Drop every committed statement.
    fn purge(&mut self) -> Result<()>;

    /// Write a manifest of everything committed so far.
    fn export_manifest(&self, path: &Path) -> Result<()>;

    /// Number of committed statements.
    fn committed(&self) -> usize;
}

/// Manifest written by [`StatementStore::export_manifest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// When the manifest was generated
    pub generated_at: DateTime<Utc>,
    /// Number of statements in the manifest
    pub statement_count: usize,
    /// Committed statements in commit order
    pub statements: Vec<ManifestEntry>,
}

/// One committed statement as it appears in a manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Stable id minted at commit time
    pub id: StableId,
    /// Name of the identity the statement was recorded under
    pub signer: String,
    /// When the store accepted the statement
    pub recorded_at: DateTime<Utc>,
    /// The statement itself
    pub statement: StatementRecord,
}
