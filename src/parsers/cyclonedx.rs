//! CycloneDX attestation SBOM parser.
//!
//! Reads CycloneDX 1.6 JSON documents carrying a `declarations` block and
//! produces the typed [`SbomDocument`] model. The requirement/claim nesting
//! under `attestations[].map[]` is flattened here: each claim comes out
//! stamped with the requirement it was mapped under.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::error::{ParseErrorKind, ProvenanceError, Result};
use crate::model::{
    Assessor, AssessorIdentity, Attestation, Claim, Component, ComponentType,
    DependencyDeclaration, DocumentMetadata, Evidence, EvidenceItem, Hash, HashAlgorithm,
    Organization, SbomDocument,
};

/// Parser for CycloneDX JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct CycloneDxParser;

impl CycloneDxParser {
    /// Create a new parser
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse a document from JSON text.
    ///
    /// Only unreadable JSON is fatal. Missing fields anywhere below the
    /// top level degrade to empty collections or `None`.
    pub fn parse_str(&self, content: &str) -> Result<SbomDocument> {
        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            ProvenanceError::parse("document", ParseErrorKind::InvalidJson(e.to_string()))
        })?;
        if !value.is_object() {
            return Err(ProvenanceError::parse(
                "document",
                ParseErrorKind::NotAnObject,
            ));
        }
        let cdx: CdxBom = serde_json::from_value(value).map_err(|e| {
            ProvenanceError::parse("document", ParseErrorKind::InvalidJson(e.to_string()))
        })?;
        Ok(Self::convert(cdx))
    }

    /// Convert the raw document to the typed model
    fn convert(cdx: CdxBom) -> SbomDocument {
        let metadata = Self::convert_metadata(&cdx);

        let components = cdx
            .components
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_component)
            .collect();

        let dependencies = cdx
            .dependencies
            .unwrap_or_default()
            .into_iter()
            .map(|dep| DependencyDeclaration::new(dep.ref_field, dep.depends_on.unwrap_or_default()))
            .collect();

        let (assessors, attestations) = match cdx.declarations {
            Some(declarations) => Self::convert_declarations(declarations),
            None => (Vec::new(), Vec::new()),
        };

        SbomDocument {
            metadata,
            components,
            dependencies,
            assessors,
            attestations,
        }
    }

    fn convert_metadata(cdx: &CdxBom) -> DocumentMetadata {
        let timestamp = cdx
            .metadata
            .as_ref()
            .and_then(|m| m.timestamp.as_deref())
            .and_then(|raw| match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => Some(dt.with_timezone(&Utc)),
                Err(e) => {
                    warn!(timestamp = raw, error = %e, "ignoring unparseable document timestamp");
                    None
                }
            });

        DocumentMetadata {
            spec_version: cdx.spec_version.clone(),
            serial_number: cdx.serial_number.clone(),
            timestamp,
        }
    }

    fn convert_component(cdx: CdxComponent) -> Component {
        let name = cdx.name.unwrap_or_default();
        let bom_ref = cdx.bom_ref.unwrap_or_else(|| name.clone());
        let component_type = cdx
            .component_type
            .as_deref()
            .map(ComponentType::parse)
            .unwrap_or_default();

        let mut component = Component::new(bom_ref, name, component_type);
        component.version = cdx.version;
        component.description = cdx.description;
        component.purl = cdx.purl;

        if let Some(supplier) = cdx.supplier {
            component.supplier = supplier.name.map(Organization::new);
        }

        // Licenses keep document order; id wins over name within one entry
        for choice in cdx.licenses.unwrap_or_default() {
            if let Some(license) = choice.license {
                if let Some(expr) = license.id.or(license.name) {
                    component.licenses.push(expr);
                }
            }
            if let Some(expr) = choice.expression {
                component.licenses.push(expr);
            }
        }

        // Hash entries missing either field are dropped
        for hash in cdx.hashes.unwrap_or_default() {
            if let (Some(alg), Some(content)) = (hash.alg, hash.content) {
                component
                    .security
                    .hashes
                    .push(Hash::new(HashAlgorithm::parse(&alg), content));
            }
        }

        component.security.signature = cdx.signature;
        component.security.evidence = cdx.evidence;
        component
    }

    fn convert_declarations(cdx: CdxDeclarations) -> (Vec<Assessor>, Vec<Attestation>) {
        let assessors = cdx
            .assessors
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_assessor)
            .collect();
        let attestations = cdx
            .attestations
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_attestation)
            .collect();
        (assessors, attestations)
    }

    fn convert_assessor(cdx: CdxAssessor) -> Assessor {
        // An organization identity takes precedence over an individual one
        let identity = if cdx.organization_name.is_some() || cdx.organization_email.is_some() {
            Some(AssessorIdentity::Organization {
                name: cdx.organization_name,
                email: cdx.organization_email,
            })
        } else {
            cdx.individual.map(|person| AssessorIdentity::Individual {
                name: person.name,
                email: person.email,
            })
        };

        Assessor {
            bom_ref: cdx.bom_ref,
            third_party: cdx.third_party.unwrap_or(false),
            identity,
        }
    }

    fn convert_attestation(cdx: CdxAttestation) -> Attestation {
        let mut claims = Vec::new();
        for mapping in cdx.map.unwrap_or_default() {
            let requirement = mapping.requirement;
            for claim in mapping.claims.unwrap_or_default() {
                claims.push(Self::convert_claim(claim, requirement.clone()));
            }
        }

        Attestation {
            summary: cdx.summary,
            assessor: cdx.assessor,
            claims,
        }
    }

    fn convert_claim(cdx: CdxClaim, requirement: Option<String>) -> Claim {
        let evidence = cdx
            .evidence
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_evidence)
            .collect();

        Claim {
            bom_ref: cdx.bom_ref,
            target: cdx.target,
            predicate: cdx.predicate,
            reasoning: cdx.reasoning,
            mitigation_strategies: cdx.mitigation_strategies.unwrap_or_default(),
            signature: cdx.signature,
            requirement,
            evidence,
        }
    }

    fn convert_evidence(cdx: CdxEvidence) -> Evidence {
        Evidence {
            name: cdx.name,
            description: cdx.description,
            items: cdx
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|item| EvidenceItem::new(item.name, item.media_type, item.encoding, item.data))
                .collect(),
        }
    }
}

// CycloneDX JSON structures for deserialization

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct CdxBom {
    bom_format: Option<String>,
    spec_version: Option<String>,
    serial_number: Option<String>,
    version: Option<u32>,
    metadata: Option<CdxMetadata>,
    components: Option<Vec<CdxComponent>>,
    dependencies: Option<Vec<CdxDependency>>,
    declarations: Option<CdxDeclarations>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxMetadata {
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxComponent {
    #[serde(rename = "type")]
    component_type: Option<String>,
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    supplier: Option<CdxSupplier>,
    licenses: Option<Vec<CdxLicenseChoice>>,
    purl: Option<String>,
    hashes: Option<Vec<CdxHash>>,
    signature: Option<serde_json::Value>,
    evidence: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CdxSupplier {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxLicenseChoice {
    license: Option<CdxLicense>,
    expression: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxLicense {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CdxHash {
    alg: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDependency {
    #[serde(rename = "ref")]
    ref_field: Option<String>,
    depends_on: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxDeclarations {
    assessors: Option<Vec<CdxAssessor>>,
    attestations: Option<Vec<CdxAttestation>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxAssessor {
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    third_party: Option<bool>,
    organization_name: Option<String>,
    organization_email: Option<String>,
    individual: Option<CdxIndividual>,
}

#[derive(Debug, Deserialize)]
struct CdxIndividual {
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxAttestation {
    summary: Option<String>,
    assessor: Option<String>,
    map: Option<Vec<CdxClaimMapping>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxClaimMapping {
    requirement: Option<String>,
    claims: Option<Vec<CdxClaim>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxClaim {
    #[serde(alias = "bom-ref")]
    bom_ref: Option<String>,
    target: Option<String>,
    predicate: Option<String>,
    mitigation_strategies: Option<Vec<String>>,
    reasoning: Option<String>,
    signature: Option<serde_json::Value>,
    evidence: Option<Vec<CdxEvidence>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxEvidence {
    name: Option<String>,
    description: Option<String>,
    data: Option<Vec<CdxEvidenceData>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CdxEvidenceData {
    name: Option<String>,
    media_type: Option<String>,
    encoding: Option<String>,
    data: Option<String>,
}
