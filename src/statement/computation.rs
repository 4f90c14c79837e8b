//! Builder for computation statements.

use tracing::debug;

use crate::cid::ContentRef;
use crate::error::{ProvenanceError, Result};
use crate::statement::{ComputationRecord, Seal, StatementRecord};
use crate::store::{SignerContext, StableId, StatementStore};

/// A computation statement under construction.
///
/// Inputs and outputs accumulate while the statement is open. Finalizing
/// commits the statement to a store and seals it; a sealed statement
/// rejects further edits and returns the same stable id on repeated
/// finalization.
#[derive(Debug, Clone)]
pub struct Computation {
    name: String,
    description: String,
    inputs: Vec<ContentRef>,
    outputs: Vec<ContentRef>,
    seal: Seal,
}

impl Computation {
    /// Start an open computation statement.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            seal: Seal::Open,
        }
    }

    /// Append an input artifact. Order is preserved.
    pub fn add_input(&mut self, input: ContentRef) -> Result<&mut Self> {
        self.ensure_open()?;
        self.inputs.push(input);
        Ok(self)
    }

    /// Append an output artifact. Order is preserved.
    pub fn add_output(&mut self, output: ContentRef) -> Result<&mut Self> {
        self.ensure_open()?;
        self.outputs.push(output);
        Ok(self)
    }

    /// Commit the statement and seal it.
    ///
    /// Finalizing an already sealed statement is a no-op that returns the
    /// existing stable id.
    pub fn finalize(
        &mut self,
        store: &mut dyn StatementStore,
        signer: &SignerContext,
    ) -> Result<StableId> {
        if let Seal::Finalized(id) = &self.seal {
            return Ok(id.clone());
        }
        let record = StatementRecord::Computation(self.to_record());
        let id = store.commit(&record, signer)?;
        debug!(name = %self.name, id = %id, "finalized computation statement");
        self.seal = Seal::Finalized(id.clone());
        Ok(id)
    }

    /// The stable id assigned at finalization.
    pub fn stable_id(&self) -> Result<&StableId> {
        match &self.seal {
            Seal::Finalized(id) => Ok(id),
            Seal::Open => Err(ProvenanceError::not_finalized(&self.name)),
        }
    }

    /// True once the statement has been committed
    #[must_use]
    pub const fn is_finalized(&self) -> bool {
        matches!(self.seal, Seal::Finalized(_))
    }

    /// Statement name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inputs accumulated so far
    #[must_use]
    pub fn inputs(&self) -> &[ContentRef] {
        &self.inputs
    }

    /// Outputs accumulated so far
    #[must_use]
    pub fn outputs(&self) -> &[ContentRef] {
        &self.outputs
    }

    fn ensure_open(&self) -> Result<()> {
        match self.seal {
            Seal::Open => Ok(()),
            Seal::Finalized(_) => Err(ProvenanceError::already_finalized(&self.name)),
        }
    }

    fn to_record(&self) -> ComputationRecord {
        ComputationRecord {
            name: self.name.clone(),
            description: self.description.clone(),
            inputs: self.inputs.iter().map(ContentRef::label).collect(),
            outputs: self.outputs.iter().map(ContentRef::label).collect(),
        }
    }
}
