//! SBOM document parsing.
//!
//! One format is supported: CycloneDX JSON with the 1.6 `declarations`
//! extension. Parsing is tolerant by construction: only unreadable JSON
//! fails, anything else missing from a document degrades to `None` or an
//! empty collection.

mod cyclonedx;

pub use cyclonedx::CycloneDxParser;

use std::path::Path;

use crate::error::{ParseErrorKind, ProvenanceError, Result};
use crate::model::SbomDocument;

/// Parse a document from string content.
pub fn parse_document(content: &str) -> Result<SbomDocument> {
    CycloneDxParser::new().parse_str(content)
}

/// Parse a document from raw bytes, checking UTF-8 first.
pub fn parse_document_bytes(bytes: &[u8]) -> Result<SbomDocument> {
    let content = std::str::from_utf8(bytes).map_err(|e| {
        ProvenanceError::parse(
            "document",
            ParseErrorKind::InvalidJson(format!("not UTF-8: {e}")),
        )
    })?;
    parse_document(content)
}

/// Read and parse a document from a file.
pub fn parse_document_file(path: &Path) -> Result<SbomDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| ProvenanceError::io(path, e))?;
    parse_document(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessorIdentity, ComponentType, HashAlgorithm};

    #[test]
    fn test_invalid_json_is_fatal() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(
            err,
            ProvenanceError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = parse_document("[1, 2, 3]").unwrap_err();
        assert!(matches!(
            err,
            ProvenanceError::Parse {
                source: ParseErrorKind::NotAnObject,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_object_parses_to_empty_document() {
        let doc = parse_document("{}").unwrap();
        assert!(doc.components.is_empty());
        assert!(doc.dependencies.is_empty());
        assert!(!doc.has_declarations());
        assert!(doc.metadata.timestamp.is_none());
    }

    #[test]
    fn test_component_fields_and_bom_ref_fallback() {
        let content = r#"{
            "specVersion": "1.6",
            "metadata": {"timestamp": "2024-03-01T12:00:00Z"},
            "components": [
                {
                    "type": "application",
                    "bom-ref": "app-1",
                    "name": "app",
                    "version": "2.0.0",
                    "supplier": {"name": "Acme"},
                    "licenses": [
                        {"license": {"id": "MIT"}},
                        {"expression": "Apache-2.0 OR GPL-2.0"}
                    ],
                    "purl": "pkg:generic/app@2.0.0",
                    "hashes": [
                        {"alg": "SHA-1", "content": "aa"},
                        {"alg": "SHA-256"},
                        {"alg": "SHA-256", "content": "bb"}
                    ]
                },
                {"name": "no-ref-lib"}
            ]
        }"#;
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.metadata.spec_version.as_deref(), Some("1.6"));
        assert!(doc.metadata.timestamp.is_some());
        assert_eq!(doc.components.len(), 2);

        let app = &doc.components[0];
        assert_eq!(app.bom_ref, "app-1");
        assert_eq!(app.component_type, ComponentType::Application);
        assert_eq!(app.supplier.as_ref().map(|s| s.name.as_str()), Some("Acme"));
        assert_eq!(app.licenses, vec!["MIT", "Apache-2.0 OR GPL-2.0"]);
        // the SHA-256 entry without content was dropped
        assert_eq!(app.security.hashes.len(), 2);
        assert_eq!(app.security.hashes[1].algorithm, HashAlgorithm::Sha256);

        let lib = &doc.components[1];
        assert_eq!(lib.bom_ref, "no-ref-lib");
        assert_eq!(lib.component_type, ComponentType::Library);
    }

    #[test]
    fn test_unparseable_timestamp_becomes_none() {
        let doc =
            parse_document(r#"{"metadata": {"timestamp": "yesterday afternoon"}}"#).unwrap();
        assert!(doc.metadata.timestamp.is_none());
    }

    #[test]
    fn test_dependency_order_is_preserved() {
        let content = r#"{
            "dependencies": [
                {"ref": "a", "dependsOn": ["b", "c"]},
                {"dependsOn": ["a"]},
                {"ref": "d"}
            ]
        }"#;
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.dependencies.len(), 3);
        assert_eq!(doc.dependencies[0].subject.as_deref(), Some("a"));
        assert_eq!(doc.dependencies[0].depends_on, vec!["b", "c"]);
        assert!(doc.dependencies[1].subject.is_none());
        assert!(doc.dependencies[2].depends_on.is_empty());
    }

    #[test]
    fn test_claims_are_flattened_with_their_requirement() {
        let content = r#"{
            "declarations": {
                "attestations": [
                    {
                        "summary": "security audit",
                        "assessor": "assessor-1",
                        "map": [
                            {
                                "requirement": "req-1",
                                "claims": [
                                    {"bom-ref": "claim-1", "target": "app"},
                                    {"bom-ref": "claim-2", "target": "lib"}
                                ]
                            },
                            {
                                "requirement": "req-2",
                                "claims": [
                                    {"bom-ref": "claim-3", "target": "app"}
                                ]
                            }
                        ]
                    }
                ]
            }
        }"#;
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.attestations.len(), 1);
        let claims = &doc.attestations[0].claims;
        assert_eq!(claims.len(), 3);
        assert_eq!(claims[0].requirement.as_deref(), Some("req-1"));
        assert_eq!(claims[1].requirement.as_deref(), Some("req-1"));
        assert_eq!(claims[2].requirement.as_deref(), Some("req-2"));
        assert_eq!(claims[2].target.as_deref(), Some("app"));
    }

    #[test]
    fn test_assessor_organization_wins_over_individual() {
        let content = r#"{
            "declarations": {
                "assessors": [
                    {
                        "bom-ref": "assessor-1",
                        "thirdParty": true,
                        "organizationName": "Acme Security",
                        "individual": {"name": "Jane Doe"}
                    },
                    {
                        "bom-ref": "assessor-2",
                        "individual": {"name": "Rex Reviewer", "email": "rex@example.com"}
                    },
                    {"bom-ref": "assessor-3"}
                ]
            }
        }"#;
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.assessors.len(), 3);

        assert!(doc.assessors[0].third_party);
        assert!(matches!(
            doc.assessors[0].identity,
            Some(AssessorIdentity::Organization { .. })
        ));
        assert_eq!(doc.assessors[0].display_name(), Some("Acme Security"));

        assert!(!doc.assessors[1].third_party);
        assert_eq!(doc.assessors[1].display_name(), Some("Rex Reviewer"));

        assert!(doc.assessors[2].identity.is_none());
    }

    #[test]
    fn test_evidence_items_decode_at_parse_time() {
        let content = r#"{
            "declarations": {
                "attestations": [
                    {
                        "map": [
                            {
                                "requirement": "req-1",
                                "claims": [
                                    {
                                        "target": "app",
                                        "evidence": [
                                            {
                                                "name": "audit log",
                                                "data": [
                                                    {
                                                        "name": "summary",
                                                        "mediaType": "text/plain",
                                                        "encoding": "base64",
                                                        "data": "YWxsIGNsZWFy"
                                                    },
                                                    {
                                                        "name": "raw",
                                                        "data": "not encoded"
                                                    }
                                                ]
                                            }
                                        ]
                                    }
                                ]
                            }
                        ]
                    }
                ]
            }
        }"#;
        let doc = parse_document(content).unwrap();
        let claim = &doc.attestations[0].claims[0];
        assert_eq!(claim.decoded_payloads(), vec!["all clear"]);
        assert!(claim.evidence[0].items[1].payload.is_none());
    }

    #[test]
    fn test_parse_bytes_rejects_non_utf8() {
        let err = parse_document_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ProvenanceError::Parse { .. }));
    }
}
