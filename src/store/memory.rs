//! In-memory statement store, the default backend.

use std::path::Path;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{ProvenanceError, Result, StoreErrorKind};
use crate::statement::StatementRecord;
use crate::store::{Manifest, ManifestEntry, SignerContext, StableId, StatementStore};

/// Keeps committed statements in commit order until purged.
///
/// Stable ids are derived from the commit sequence number and the record
/// content, so re-registering the same document yields the same ids.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<ManifestEntry>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed statements
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been committed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Committed entries in commit order
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    fn mint_id(&self, record_bytes: &[u8]) -> StableId {
        let mut hasher = Sha256::new();
        hasher.update((self.entries.len() as u64).to_be_bytes());
        hasher.update(record_bytes);
        StableId::new(format!("stmt:sha256:{}", hex::encode(hasher.finalize())))
    }
}

impl StatementStore for MemoryStore {
    fn commit(&mut self, record: &StatementRecord, signer: &SignerContext) -> Result<StableId> {
        let identity = signer
            .active()
            .ok_or_else(|| ProvenanceError::store("commit", StoreErrorKind::NoActiveIdentity))?;
        let bytes = serde_json::to_vec(record).map_err(|e| {
            ProvenanceError::store("commit", StoreErrorKind::Serialization(e.to_string()))
        })?;
        let id = self.mint_id(&bytes);
        debug!(
            kind = record.kind_name(),
            id = %id,
            signer = %identity.name,
            "committed statement"
        );
        self.entries.push(ManifestEntry {
            id: id.clone(),
            signer: identity.name.clone(),
            recorded_at: Utc::now(),
            statement: record.clone(),
        });
        Ok(id)
    }

    fn purge(&mut self) -> Result<()> {
        let dropped = self.entries.len();
        self.entries.clear();
        info!(dropped, "purged statement store");
        Ok(())
    }

    fn export_manifest(&self, path: &Path) -> Result<()> {
        let manifest = Manifest {
            generated_at: Utc::now(),
            statement_count: self.entries.len(),
            statements: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&manifest).map_err(|e| {
            ProvenanceError::store("export manifest", StoreErrorKind::Manifest(e.to_string()))
        })?;
        std::fs::write(path, json).map_err(|e| ProvenanceError::io(path, e))?;
        info!(
            path = %path.display(),
            statements = self.entries.len(),
            "wrote statement manifest"
        );
        Ok(())
    }

    fn committed(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{ComputationRecord, DeclarationRecord};
    use crate::store::SignerIdentity;

    fn sample_record(name: &str) -> StatementRecord {
        StatementRecord::Computation(ComputationRecord {
            name: name.to_string(),
            description: format!("The building of {name}"),
            inputs: Vec::new(),
            outputs: vec!["No Content ID".to_string()],
        })
    }

    fn active_signer() -> SignerContext {
        let mut signer = SignerContext::new();
        signer.activate(SignerIdentity::new("Build system"));
        signer
    }

    #[test]
    fn test_commit_without_active_identity_fails() {
        let mut store = MemoryStore::new();
        let signer = SignerContext::new();
        let err = store.commit(&sample_record("app"), &signer).unwrap_err();
        assert!(matches!(
            err,
            ProvenanceError::Store {
                source: StoreErrorKind::NoActiveIdentity,
                ..
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_ids_are_deterministic_per_sequence_and_content() {
        let signer = active_signer();

        let mut first = MemoryStore::new();
        let a1 = first.commit(&sample_record("app"), &signer).unwrap();
        let b1 = first.commit(&sample_record("lib"), &signer).unwrap();

        let mut second = MemoryStore::new();
        let a2 = second.commit(&sample_record("app"), &signer).unwrap();
        let b2 = second.commit(&sample_record("lib"), &signer).unwrap();

        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert_ne!(a1, b1);
    }

    #[test]
    fn test_same_record_at_different_positions_gets_different_ids() {
        let signer = active_signer();
        let mut store = MemoryStore::new();
        let first = store.commit(&sample_record("app"), &signer).unwrap();
        let second = store.commit(&sample_record("app"), &signer).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_purge_empties_the_store() {
        let signer = active_signer();
        let mut store = MemoryStore::new();
        store.commit(&sample_record("app"), &signer).unwrap();
        store.purge().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.committed(), 0);
    }

    #[test]
    fn test_entries_keep_commit_order_and_signer() {
        let signer = active_signer();
        let mut store = MemoryStore::new();
        store.commit(&sample_record("app"), &signer).unwrap();
        store
            .commit(
                &StatementRecord::Declaration(DeclarationRecord {
                    subject_line: Some("clean".to_string()),
                    statement: None,
                    submitted_at: None,
                    submitted_by: None,
                    attachments: Vec::new(),
                    controls: Vec::new(),
                    extra: indexmap::IndexMap::new(),
                }),
                &signer,
            )
            .unwrap();

        let kinds: Vec<&str> = store
            .entries()
            .iter()
            .map(|e| e.statement.kind_name())
            .collect();
        assert_eq!(kinds, vec!["computation", "declaration"]);
        assert_eq!(store.entries()[0].signer, "Build system");
    }
}
