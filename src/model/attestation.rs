//! Attestation model: assessors, claims, and their evidence.
//!
//! These types mirror the CycloneDX `declarations` block after the
//! requirement/claim nesting has been flattened: every [`Claim`] carries the
//! requirement it was mapped under. Evidence payloads are decoded eagerly at
//! construction time so a decode failure is visible on the item without
//! aborting anything.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// A party that makes claims about components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessor {
    /// Unique reference within the document
    pub bom_ref: Option<String>,
    /// Whether the assessor is independent of the supplier
    pub third_party: bool,
    /// Who the assessor is; `None` when the document names nobody
    pub identity: Option<AssessorIdentity>,
}

impl Assessor {
    /// Human-readable name for the assessor, if the document provides one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.identity.as_ref().and_then(AssessorIdentity::name)
    }
}

/// Exactly one identity per assessor. When a document carries both an
/// organization and an individual, the organization wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessorIdentity {
    Organization {
        name: Option<String>,
        email: Option<String>,
    },
    Individual {
        name: Option<String>,
        email: Option<String>,
    },
}

impl AssessorIdentity {
    /// The identity's name field, whichever variant holds it.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Organization { name, .. } | Self::Individual { name, .. } => name.as_deref(),
        }
    }

    /// The identity's email field, whichever variant holds it.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Organization { email, .. } | Self::Individual { email, .. } => email.as_deref(),
        }
    }
}

/// A set of claims submitted by one assessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attestation {
    /// Free-text summary of the attestation
    pub summary: Option<String>,
    /// Reference to the submitting assessor
    pub assessor: Option<String>,
    /// Flattened claims, each stamped with its requirement
    pub claims: Vec<Claim>,
}

/// One claim about one target component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique reference within the document
    pub bom_ref: Option<String>,
    /// The bom-ref of the component this claim is about
    pub target: Option<String>,
    /// What is being claimed
    pub predicate: Option<String>,
    /// Why the claim holds
    pub reasoning: Option<String>,
    /// Mitigation strategy references
    pub mitigation_strategies: Vec<String>,
    /// Enveloped signature block, untouched
    pub signature: Option<serde_json::Value>,
    /// The requirement this claim was mapped under
    pub requirement: Option<String>,
    /// Supporting evidence in document order
    pub evidence: Vec<Evidence>,
}

impl Claim {
    /// Successfully decoded evidence payloads, in document order.
    ///
    /// Items that failed to decode, or that carried no decodable data,
    /// are not included.
    #[must_use]
    pub fn decoded_payloads(&self) -> Vec<&str> {
        self.evidence
            .iter()
            .flat_map(|e| e.items.iter())
            .filter_map(EvidenceItem::decoded)
            .collect()
    }

    /// A short identifier for log lines: the claim's own ref, or its
    /// target as a fallback.
    #[must_use]
    pub fn describe(&self) -> &str {
        self.bom_ref
            .as_deref()
            .or(self.target.as_deref())
            .unwrap_or("<unnamed claim>")
    }
}

/// Evidence supporting a claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Evidence name
    pub name: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    /// Data items in document order
    pub items: Vec<EvidenceItem>,
}

/// One piece of evidence data, with its decode outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Item name
    pub name: Option<String>,
    /// MIME type of the payload
    pub media_type: Option<String>,
    /// Payload encoding as declared by the document
    pub encoding: Option<String>,
    /// Raw payload as carried in the document
    pub data: Option<String>,
    /// Decode outcome; `None` when the item carried nothing decodable
    pub payload: Option<DecodeOutcome>,
}

impl EvidenceItem {
    /// Build an item and decode its payload if the encoding allows it.
    ///
    /// Only base64-encoded data is decoded. A failed decode is captured on
    /// the item rather than reported as an error.
    #[must_use]
    pub fn new(
        name: Option<String>,
        media_type: Option<String>,
        encoding: Option<String>,
        data: Option<String>,
    ) -> Self {
        let payload = match (encoding.as_deref(), data.as_deref()) {
            (Some("base64"), Some(raw)) => Some(decode_base64_payload(raw)),
            _ => None,
        };
        Self {
            name,
            media_type,
            encoding,
            data,
            payload,
        }
    }

    /// The decoded payload text, when decoding succeeded.
    #[must_use]
    pub fn decoded(&self) -> Option<&str> {
        match &self.payload {
            Some(DecodeOutcome::Decoded(text)) => Some(text),
            _ => None,
        }
    }
}

/// Result of attempting to decode an evidence payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodeOutcome {
    /// UTF-8 text recovered from the payload
    Decoded(String),
    /// Human-readable description of what went wrong
    Failed(String),
}

fn decode_base64_payload(raw: &str) -> DecodeOutcome {
    let bytes = match BASE64_STANDARD.decode(raw) {
        Ok(bytes) => bytes,
        Err(e) => return DecodeOutcome::Failed(format!("Failed to decode: {e}")),
    };
    match String::from_utf8(bytes) {
        Ok(text) => DecodeOutcome::Decoded(text),
        Err(e) => DecodeOutcome::Failed(format!("Failed to decode: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_payload_decodes_to_text() {
        let item = EvidenceItem::new(
            Some("report".to_string()),
            Some("text/plain".to_string()),
            Some("base64".to_string()),
            Some("aGVsbG8gd29ybGQ=".to_string()),
        );
        assert_eq!(item.decoded(), Some("hello world"));
    }

    #[test]
    fn test_invalid_base64_is_captured_not_fatal() {
        let item = EvidenceItem::new(
            None,
            None,
            Some("base64".to_string()),
            Some("!!!not base64!!!".to_string()),
        );
        assert!(item.decoded().is_none());
        match item.payload {
            Some(DecodeOutcome::Failed(msg)) => {
                assert!(msg.starts_with("Failed to decode:"), "got: {msg}");
            }
            other => panic!("expected a captured failure, got {other:?}"),
        }
    }

    #[test]
    fn test_non_utf8_payload_is_captured() {
        // 0xff 0xfe is valid base64 input but invalid UTF-8 output
        let encoded = BASE64_STANDARD.encode([0xffu8, 0xfe]);
        let item = EvidenceItem::new(None, None, Some("base64".to_string()), Some(encoded));
        assert!(matches!(item.payload, Some(DecodeOutcome::Failed(_))));
    }

    #[test]
    fn test_other_encodings_are_left_alone() {
        let item = EvidenceItem::new(
            None,
            None,
            Some("hex".to_string()),
            Some("deadbeef".to_string()),
        );
        assert!(item.payload.is_none());

        let no_data = EvidenceItem::new(None, None, Some("base64".to_string()), None);
        assert!(no_data.payload.is_none());
    }

    #[test]
    fn test_decoded_payloads_skip_failures() {
        let claim = Claim {
            bom_ref: None,
            target: Some("app".to_string()),
            predicate: None,
            reasoning: None,
            mitigation_strategies: Vec::new(),
            signature: None,
            requirement: None,
            evidence: vec![Evidence {
                name: None,
                description: None,
                items: vec![
                    EvidenceItem::new(
                        None,
                        None,
                        Some("base64".to_string()),
                        Some("Zmlyc3Q=".to_string()),
                    ),
                    EvidenceItem::new(
                        None,
                        None,
                        Some("base64".to_string()),
                        Some("%%%".to_string()),
                    ),
                    EvidenceItem::new(
                        None,
                        None,
                        Some("base64".to_string()),
                        Some("c2Vjb25k".to_string()),
                    ),
                ],
            }],
        };
        assert_eq!(claim.decoded_payloads(), vec!["first", "second"]);
    }

    #[test]
    fn test_identity_accessors_cover_both_variants() {
        let org = AssessorIdentity::Organization {
            name: Some("Acme".to_string()),
            email: Some("sec@acme.example".to_string()),
        };
        assert_eq!(org.name(), Some("Acme"));
        assert_eq!(org.email(), Some("sec@acme.example"));

        let person = AssessorIdentity::Individual {
            name: Some("Jane Doe".to_string()),
            email: None,
        };
        assert_eq!(person.name(), Some("Jane Doe"));
        assert!(person.email().is_none());
    }
}
