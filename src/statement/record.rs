//! Serialized forms of committed statements.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::statement::ExtraValue;

/// A committed provenance statement, as a store persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatementRecord {
    Artifact(ArtifactRecord),
    Computation(ComputationRecord),
    Declaration(DeclarationRecord),
}

impl StatementRecord {
    /// Lowercase kind name for log lines
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Artifact(_) => "artifact",
            Self::Computation(_) => "computation",
            Self::Declaration(_) => "declaration",
        }
    }
}

/// An artifact registered under a content address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    /// Content address label; unresolved artifacts carry the sentinel text
    pub content_id: String,
    /// Artifact classification (the component type)
    pub artifact_type: String,
    /// Descriptive metadata carried over from the component
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, ExtraValue>,
}

/// A computation linking input artifacts to output artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationRecord {
    /// Computation name
    pub name: String,
    /// What the computation did
    pub description: String,
    /// Input content address labels, in declared order
    #[serde(rename = "inputCid", default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
    /// Output content address labels
    #[serde(rename = "outputCid", default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<String>,
}

/// A claim submitted about a target artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRecord {
    /// What is being declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_line: Option<String>,
    /// Supporting reasoning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
    /// When the declaration was submitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Who submitted it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    /// Decoded evidence payloads backing the declaration
    #[serde(rename = "attachmentCid", default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
    /// Requirements the declaration addresses
    #[serde(rename = "controlCid", default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<String>,
    /// Free-form keyed extras
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, ExtraValue>,
}
