//! Builder for declaration statements.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ProvenanceError, Result};
use crate::statement::{DeclarationRecord, ExtraValue, Seal, StatementRecord};
use crate::store::{SignerContext, StableId, StatementStore};

/// A declaration statement under construction.
///
/// Same lifecycle as [`crate::statement::Computation`]: open for edits
/// until finalized, sealed afterwards, idempotent on repeated finalization.
#[derive(Debug, Clone)]
pub struct Declaration {
    subject_line: Option<String>,
    statement: Option<String>,
    submitted_at: Option<DateTime<Utc>>,
    submitted_by: Option<String>,
    attachments: Vec<String>,
    controls: Vec<String>,
    extra: IndexMap<String, ExtraValue>,
    seal: Seal,
}

impl Declaration {
    /// Start an open declaration.
    ///
    /// Both fields come straight from a source claim and may be absent
    /// there, so both are optional here.
    #[must_use]
    pub fn new(subject_line: Option<String>, statement: Option<String>) -> Self {
        Self {
            subject_line,
            statement,
            submitted_at: None,
            submitted_by: None,
            attachments: Vec::new(),
            controls: Vec::new(),
            extra: IndexMap::new(),
            seal: Seal::Open,
        }
    }

    /// Set the submission timestamp
    pub fn submitted_at(&mut self, at: DateTime<Utc>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.submitted_at = Some(at);
        Ok(self)
    }

    /// Set the submitter
    pub fn submitted_by(&mut self, by: impl Into<String>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.submitted_by = Some(by.into());
        Ok(self)
    }

    /// Append an attachment payload. Order is preserved.
    pub fn add_attachment(&mut self, payload: impl Into<String>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.attachments.push(payload.into());
        Ok(self)
    }

    /// Append a control reference.
    pub fn add_control(&mut self, control: impl Into<String>) -> Result<&mut Self> {
        self.ensure_open()?;
        self.controls.push(control.into());
        Ok(self)
    }

    /// Attach a keyed extra value. A repeated key overwrites the earlier
    /// value but keeps its position.
    pub fn add_extra(&mut self, key: impl Into<String>, value: ExtraValue) -> Result<&mut Self> {
        self.ensure_open()?;
        self.extra.insert(key.into(), value);
        Ok(self)
    }

    /// Commit the declaration and seal it.
    pub fn finalize(
        &mut self,
        store: &mut dyn StatementStore,
        signer: &SignerContext,
    ) -> Result<StableId> {
        if let Seal::Finalized(id) = &self.seal {
            return Ok(id.clone());
        }
        let record = StatementRecord::Declaration(self.to_record());
        let id = store.commit(&record, signer)?;
        debug!(subject = self.describe(), id = %id, "finalized declaration statement");
        self.seal = Seal::Finalized(id.clone());
        Ok(id)
    }

    /// The stable id assigned at finalization.
    pub fn stable_id(&self) -> Result<&StableId> {
        match &self.seal {
            Seal::Finalized(id) => Ok(id),
            Seal::Open => Err(ProvenanceError::not_finalized(self.describe())),
        }
    }

    /// True once the declaration has been committed
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self.seal, Seal::Finalized(_))
    }

    fn describe(&self) -> &str {
        self.subject_line.as_deref().unwrap_or("<no subject>")
    }

    fn ensure_open(&self) -> Result<()> {
        match self.seal {
            Seal::Open => Ok(()),
            Seal::Finalized(_) => Err(ProvenanceError::already_finalized(self.describe())),
        }
    }

    fn to_record(&self) -> DeclarationRecord {
        DeclarationRecord {
            subject_line: self.subject_line.clone(),
            statement: self.statement.clone(),
            submitted_at: self.submitted_at,
            submitted_by: self.submitted_by.clone(),
            attachments: self.attachments.clone(),
            controls: self.controls.clone(),
            extra: self.extra.clone(),
        }
    }
}
