//! Core document model shared by the parser, registry, and graph builder.
//!
//! A [`SbomDocument`] is the in-memory form of one CycloneDX JSON document:
//! the component inventory, the declared dependency edges, and the
//! declarations block (assessors plus attestations). Field order from the
//! source document is preserved everywhere a `Vec` appears.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cid::ContentRef;
use crate::model::attestation::{Assessor, Attestation};
use crate::model::metadata::{ComponentType, DocumentMetadata, Hash, Organization};
use crate::store::StableId;

/// A parsed SBOM document with its attestation content.
#[derive(Debug, Clone, Default)]
pub struct SbomDocument {
    /// Document-level metadata
    pub metadata: DocumentMetadata,
    /// Components in document order
    pub components: Vec<Component>,
    /// Dependency edges in document order
    pub dependencies: Vec<DependencyDeclaration>,
    /// Assessors from the declarations block
    pub assessors: Vec<Assessor>,
    /// Attestations from the declarations block
    pub attestations: Vec<Attestation>,
}

impl SbomDocument {
    /// Total number of claims across all attestations.
    #[must_use]
    pub fn claim_count(&self) -> usize {
        self.attestations.iter().map(|a| a.claims.len()).sum()
    }

    /// True when the document carries no declarations content at all.
    #[must_use]
    pub fn has_declarations(&self) -> bool {
        !self.assessors.is_empty() || !self.attestations.is_empty()
    }
}

/// A software component from the SBOM inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Unique reference within the document; falls back to the component
    /// name when the document omits `bom-ref`
    pub bom_ref: String,
    /// Component name
    pub name: String,
    /// Version string
    pub version: Option<String>,
    /// Component type
    pub component_type: ComponentType,
    /// Free-text description
    pub description: Option<String>,
    /// Supplier organization
    pub supplier: Option<Organization>,
    /// License identifiers, names, or expressions in document order
    pub licenses: Vec<String>,
    /// Package URL
    pub purl: Option<String>,
    /// Security-relevant carryover from the document
    pub security: SecurityInfo,
    /// Integrity record attached during graph construction
    #[serde(skip)]
    pub integrity: Option<IntegrityRecord>,
}

impl Component {
    /// Create a component with the minimum required fields.
    #[must_use]
    pub fn new(bom_ref: String, name: String, component_type: ComponentType) -> Self {
        Self {
            bom_ref,
            name,
            version: None,
            component_type,
            description: None,
            supplier: None,
            licenses: Vec::new(),
            purl: None,
            security: SecurityInfo::default(),
            integrity: None,
        }
    }

    /// Set the version
    #[must_use]
    pub fn with_version(mut self, version: String) -> Self {
        self.version = Some(version);
        self
    }

    /// Set the package URL
    #[must_use]
    pub fn with_purl(mut self, purl: String) -> Self {
        self.purl = Some(purl);
        self
    }

    /// Set the supplier
    #[must_use]
    pub fn with_supplier(mut self, supplier: Organization) -> Self {
        self.supplier = Some(supplier);
        self
    }

    /// Add a hash to the security info
    #[must_use]
    pub fn with_hash(mut self, hash: Hash) -> Self {
        self.security.hashes.push(hash);
        self
    }

    /// First license entry, if any.
    #[must_use]
    pub fn primary_license(&self) -> Option<&str> {
        self.licenses.first().map(String::as_str)
    }
}

/// Hashes, signatures, and evidence carried verbatim from the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityInfo {
    /// Cryptographic hashes in document order
    pub hashes: Vec<Hash>,
    /// Enveloped signature block, untouched
    pub signature: Option<serde_json::Value>,
    /// Component evidence block, untouched
    pub evidence: Option<serde_json::Value>,
}

/// One dependency edge: a subject and the refs it depends on, in
/// declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDeclaration {
    /// The component this edge describes; documents may omit it
    pub subject: Option<String>,
    /// Direct dependencies, order preserved
    pub depends_on: Vec<String>,
}

impl DependencyDeclaration {
    /// Create a dependency edge
    #[must_use]
    pub const fn new(subject: Option<String>, depends_on: Vec<String>) -> Self {
        Self { subject, depends_on }
    }
}

/// Provenance bookkeeping attached to a component once its artifact
/// statement has been committed.
#[derive(Debug, Clone)]
pub struct IntegrityRecord {
    /// Stable id of the committed artifact statement
    pub artifact_id: StableId,
    /// The content address the artifact statement was registered under
    pub content: ContentRef,
    /// Stable ids of declarations attached to this component
    pub declarations: Vec<StableId>,
}

impl IntegrityRecord {
    /// Create a record for a freshly committed artifact statement.
    #[must_use]
    pub const fn new(artifact_id: StableId, content: ContentRef) -> Self {
        Self {
            artifact_id,
            content,
            declarations: Vec::new(),
        }
    }

    /// Attach a finalized declaration to this component.
    pub fn add_declaration(&mut self, id: StableId) {
        self.declarations.push(id);
    }
}
