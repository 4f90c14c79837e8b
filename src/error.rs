//! Unified error types for sbom-provenance.
//!
//! One top-level error with kind enums per area. Document parsing is the
//! only globally fatal failure; per-entity problems (underivable identifiers,
//! undecodable evidence, unknown claim targets) degrade or isolate instead
//! of aborting the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sbom-provenance operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProvenanceError {
    /// Errors during document parsing
    #[error("Failed to parse document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors during provenance graph construction
    #[error("Graph construction failed: {context}")]
    Graph {
        context: String,
        #[source]
        source: GraphErrorKind,
    },

    /// Statement lifecycle misuse
    #[error("Statement error: {context}")]
    Statement {
        context: String,
        #[source]
        source: StatementErrorKind,
    },

    /// Errors during document retrieval
    #[error("Document retrieval failed: {context}")]
    Retrieval {
        context: String,
        #[source]
        source: RetrievalErrorKind,
    },

    /// Errors from the statement store
    #[error("Store operation failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Document is not a JSON object")]
    NotAnObject,
}

/// Specific graph construction error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphErrorKind {
    #[error("Claim target '{target}' does not reference any known component")]
    UnknownTarget { target: String },
}

/// Statement state machine error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StatementErrorKind {
    #[error("Statement '{name}' is already finalized and cannot be modified")]
    AlreadyFinalized { name: String },

    #[error("Statement '{name}' has not been finalized yet")]
    NotFinalized { name: String },
}

/// Document retrieval error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RetrievalErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Unsupported document source: {0}")]
    UnsupportedSource(String),
}

/// Statement store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("No active signing identity")]
    NoActiveIdentity,

    #[error("Statement serialization failed: {0}")]
    Serialization(String),

    #[error("Manifest export failed: {0}")]
    Manifest(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for sbom-provenance operations
pub type Result<T> = std::result::Result<T, ProvenanceError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ProvenanceError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a graph error with context
    pub fn graph(context: impl Into<String>, source: GraphErrorKind) -> Self {
        Self::Graph {
            context: context.into(),
            source,
        }
    }

    /// Create an unknown-target error for a claim
    pub fn unknown_target(claim: impl Into<String>, target: impl Into<String>) -> Self {
        Self::graph(
            format!("claim {}", claim.into()),
            GraphErrorKind::UnknownTarget {
                target: target.into(),
            },
        )
    }

    /// Create an already-finalized statement error
    pub fn already_finalized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Statement {
            context: name.clone(),
            source: StatementErrorKind::AlreadyFinalized { name },
        }
    }

    /// Create a not-finalized statement error
    pub fn not_finalized(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Statement {
            context: name.clone(),
            source: StatementErrorKind::NotFinalized { name },
        }
    }

    /// Create a retrieval error with context
    pub fn retrieval(context: impl Into<String>, source: RetrievalErrorKind) -> Self {
        Self::Retrieval {
            context: context.into(),
            source,
        }
    }

    /// Create a store error with context
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// True for claim-scoped failures that skip one claim but let its
    /// siblings proceed.
    #[must_use]
    pub const fn is_claim_scoped(&self) -> bool {
        matches!(
            self,
            Self::Graph {
                source: GraphErrorKind::UnknownTarget { .. },
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ProvenanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ProvenanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ProvenanceError::parse(
            "at input.json",
            ParseErrorKind::InvalidJson("expected value at line 1".to_string()),
        );
        let display = err.to_string();
        assert!(display.contains("parse"), "unexpected message: {display}");
        assert!(display.contains("input.json"), "unexpected message: {display}");
    }

    #[test]
    fn test_unknown_target_display() {
        let err = ProvenanceError::unknown_target("claim-1", "ghost-ref");
        assert!(err.to_string().contains("claim-1"));
        assert!(err.is_claim_scoped());

        match err {
            ProvenanceError::Graph { source, .. } => {
                assert!(source.to_string().contains("ghost-ref"));
            }
            other => panic!("Expected Graph error, got {other:?}"),
        }
    }

    #[test]
    fn test_statement_errors_are_not_claim_scoped() {
        assert!(!ProvenanceError::already_finalized("build step").is_claim_scoped());
        assert!(!ProvenanceError::not_finalized("build step").is_claim_scoped());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ProvenanceError::io("/path/to/bom.json", io_err);
        assert!(err.to_string().contains("/path/to/bom.json"));
    }

    #[test]
    fn test_serde_json_conversion() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{nope");
        let err: ProvenanceError = bad.unwrap_err().into();
        assert!(matches!(
            err,
            ProvenanceError::Parse {
                source: ParseErrorKind::InvalidJson(_),
                ..
            }
        ));
    }

    #[test]
    fn test_no_active_identity_display() {
        let err = ProvenanceError::store("commit", StoreErrorKind::NoActiveIdentity);
        let chain = format!(
            "{}: {}",
            err,
            std::error::Error::source(&err).map(ToString::to_string).unwrap_or_default()
        );
        assert!(chain.contains("No active signing identity"));
    }
}
