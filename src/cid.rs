//! Content identifiers for SBOM artifacts.
//!
//! This module derives stable, self-describing content identifiers (CIDs)
//! from cryptographic digests. The binary layout follows the CIDv1
//! composition: a version byte, a codec byte for raw binary content, and a
//! multihash (hash function code, digest length, digest bytes). The textual
//! form is the base58btc encoding of those bytes behind a `z` multibase
//! marker.
//!
//! Identifiers are derived, never parsed back: equal digests always produce
//! equal identifiers, and the mapping is injective for distinct digests.

use crate::model::HashAlgorithm;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// CIDv1 version byte.
const CID_VERSION: u8 = 0x01;
/// Multicodec code for raw binary content.
const RAW_CODEC: u8 = 0x55;
/// Multihash code for SHA-256.
const SHA2_256_CODE: u8 = 0x12;
/// SHA-256 digest length in bytes.
const SHA2_256_LEN: usize = 32;
/// Multibase marker for base58btc.
const BASE58_BTC_MARKER: char = 'z';

/// Placeholder emitted in statement records when a component has no
/// derivable content identifier.
pub const UNRESOLVED_LABEL: &str = "No Content ID";

/// Errors that can occur during content identifier derivation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidError {
    #[error("Unsupported hash algorithm for content identifiers: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    #[error("Invalid digest length: expected {expected} bytes, got {actual}")]
    InvalidDigest { expected: usize, actual: usize },

    #[error("Invalid hex digest: {0}")]
    InvalidHex(String),
}

/// A content identifier in textual form.
///
/// Wraps the `z`-prefixed base58btc string. Comparable, hashable, and usable
/// as a map key; construction always goes through digest validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Derive a content identifier from a digest produced by `algorithm`.
    ///
    /// Only SHA-256 digests are supported; other algorithms return
    /// [`CidError::UnsupportedAlgorithm`] so callers can fall back to an
    /// unresolved reference instead of aborting.
    pub fn from_digest(algorithm: &HashAlgorithm, digest: &[u8]) -> Result<Self, CidError> {
        match algorithm {
            HashAlgorithm::Sha256 => Self::from_sha256_digest(digest),
            other => Err(CidError::UnsupportedAlgorithm {
                algorithm: other.to_string(),
            }),
        }
    }

    /// Derive a content identifier from a raw 32-byte SHA-256 digest.
    pub fn from_sha256_digest(digest: &[u8]) -> Result<Self, CidError> {
        if digest.len() != SHA2_256_LEN {
            return Err(CidError::InvalidDigest {
                expected: SHA2_256_LEN,
                actual: digest.len(),
            });
        }

        let mut bytes = Vec::with_capacity(4 + SHA2_256_LEN);
        bytes.push(CID_VERSION);
        bytes.push(RAW_CODEC);
        bytes.push(SHA2_256_CODE);
        bytes.push(SHA2_256_LEN as u8);
        bytes.extend_from_slice(digest);

        let encoded = bs58::encode(&bytes).into_string();
        Ok(Self(format!("{BASE58_BTC_MARKER}{encoded}")))
    }

    /// Derive a content identifier from a hex-encoded SHA-256 digest,
    /// the form hash values take in SBOM documents.
    pub fn from_sha256_hex(hex_digest: &str) -> Result<Self, CidError> {
        let digest = hex::decode(hex_digest.trim()).map_err(|e| CidError::InvalidHex(e.to_string()))?;
        Self::from_sha256_digest(&digest)
    }

    /// Hash arbitrary content and derive its identifier in one step.
    #[must_use]
    pub fn of_bytes(content: &[u8]) -> Self {
        let digest = Sha256::digest(content);
        // A SHA-256 digest is always 32 bytes
        Self::from_sha256_digest(&digest).unwrap_or_else(|_| unreachable!())
    }

    /// Get the textual identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of resolving a component reference to a content identifier.
///
/// Unresolvable references are represented explicitly rather than failing:
/// downstream statements substitute [`UNRESOLVED_LABEL`] and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentRef {
    /// A derived content identifier
    Resolved(ContentId),
    /// No identifier could be derived for the referenced component
    Unresolved,
}

impl ContentRef {
    /// Get the content identifier if resolved
    #[must_use]
    pub fn content_id(&self) -> Option<&ContentId> {
        match self {
            Self::Resolved(cid) => Some(cid),
            Self::Unresolved => None,
        }
    }

    /// Check whether this reference resolved to an identifier
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The string recorded in emitted statements: the identifier itself,
    /// or the placeholder for unresolved references.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Resolved(cid) => cid.as_str().to_string(),
            Self::Unresolved => UNRESOLVED_LABEL.to_string(),
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(cid) => write!(f, "{cid}"),
            Self::Unresolved => write!(f, "{UNRESOLVED_LABEL}"),
        }
    }
}

impl Serialize for ContentRef {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

impl<'de> Deserialize<'de> for ContentRef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == UNRESOLVED_LABEL {
            Ok(Self::Unresolved)
        } else {
            Ok(Self::Resolved(ContentId(s)))
        }
    }
}

impl From<ContentId> for ContentRef {
    fn from(cid: ContentId) -> Self {
        Self::Resolved(cid)
    }
}

impl From<Option<ContentId>> for ContentRef {
    fn from(cid: Option<ContentId>) -> Self {
        cid.map_or(Self::Unresolved, Self::Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_digest_golden_value() {
        let digest = [0u8; 32];
        let cid = ContentId::from_sha256_digest(&digest).unwrap();
        assert_eq!(
            cid.as_str(),
            "zb2rhWeHCAMEN31RpTCQGoVQP3dVGDya5yPUTsPKXakAbAsGj"
        );
    }

    #[test]
    fn test_empty_content_golden_value() {
        // SHA-256 of the empty byte string
        let cid = ContentId::of_bytes(b"");
        assert_eq!(
            cid.as_str(),
            "zb2rhmy65F3REf8SZp7De11gxtECBGgUKaLdiDj7MCGCHxbDW"
        );
    }

    #[test]
    fn test_hello_world_golden_value() {
        let cid = ContentId::of_bytes(b"hello world");
        assert_eq!(
            cid.as_str(),
            "zb2rhj7crUKTQYRGCRATFaQ6YFLTde2YzdqbbhAASkL9uRDXn"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let digest = [0xabu8; 32];
        let a = ContentId::from_sha256_digest(&digest).unwrap();
        let b = ContentId::from_sha256_digest(&digest).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_digests_produce_distinct_ids() {
        let a = ContentId::from_sha256_digest(&[0u8; 32]).unwrap();
        let b = ContentId::from_sha256_digest(&[1u8; 32]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_multibase_marker() {
        let cid = ContentId::of_bytes(b"anything");
        assert!(cid.as_str().starts_with('z'));
    }

    #[test]
    fn test_unsupported_algorithm() {
        let digest = [0u8; 32];
        let err = ContentId::from_digest(&HashAlgorithm::Sha1, &digest).unwrap_err();
        assert!(matches!(err, CidError::UnsupportedAlgorithm { .. }));
        assert!(err.to_string().contains("SHA-1"));
    }

    #[test]
    fn test_wrong_digest_length() {
        let err = ContentId::from_sha256_digest(&[0u8; 20]).unwrap_err();
        assert_eq!(
            err,
            CidError::InvalidDigest {
                expected: 32,
                actual: 20
            }
        );
    }

    #[test]
    fn test_from_hex_matches_raw_digest() {
        let digest = [0x11u8; 32];
        let from_raw = ContentId::from_sha256_digest(&digest).unwrap();
        let from_hex = ContentId::from_sha256_hex(&hex::encode(digest)).unwrap();
        assert_eq!(from_raw, from_hex);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(
            ContentId::from_sha256_hex("not hex at all").unwrap_err(),
            CidError::InvalidHex(_)
        ));
    }

    #[test]
    fn test_unresolved_label() {
        let unresolved = ContentRef::Unresolved;
        assert_eq!(unresolved.label(), "No Content ID");
        assert!(!unresolved.is_resolved());
        assert!(unresolved.content_id().is_none());
    }

    #[test]
    fn test_resolved_label_is_the_id() {
        let cid = ContentId::of_bytes(b"payload");
        let resolved = ContentRef::Resolved(cid.clone());
        assert_eq!(resolved.label(), cid.as_str());
        assert!(resolved.is_resolved());
    }

    #[test]
    fn test_content_ref_serializes_as_string() {
        let json = serde_json::to_string(&ContentRef::Unresolved).unwrap();
        assert_eq!(json, "\"No Content ID\"");

        let cid = ContentId::of_bytes(b"x");
        let json = serde_json::to_string(&ContentRef::Resolved(cid.clone())).unwrap();
        assert_eq!(json, format!("\"{}\"", cid.as_str()));
    }
}
