//! **Content-addressed provenance registration for Software Bills of Materials.**
//!
//! `sbom-provenance` parses `CycloneDX` documents and turns their contents into
//! an append-only trail of signed provenance statements: one artifact statement
//! per component, one computation statement per dependency edge, and one
//! declaration statement per attestation claim. Every artifact is anchored by a
//! content identifier derived from its SHA-256 hash, so two documents that
//! describe the same bytes always register the same artifact.
//!
//! ## Core Concepts & Modules
//!
//! - **[`cid`]**: The content identifier codec. A [`ContentId`] wraps the
//!   CIDv1 encoding of a SHA-256 digest; a [`ContentRef`] is either a resolved
//!   identifier or the shared "No Content ID" sentinel for components without
//!   strong hashes.
//! - **[`model`]**: The parsed document model ([`SbomDocument`]) and the
//!   [`ComponentRegistry`] that indexes components by their `bom-ref`.
//! - **[`statement`]**: Finalizable statement builders. A [`Computation`] or
//!   [`Declaration`] accepts edits while open, then commits exactly once and
//!   refuses edits afterwards.
//! - **[`store`]**: The [`StatementStore`] trait plus the in-memory
//!   implementation that mints deterministic statement identifiers.
//! - **[`graph`]**: [`build_graph`] walks a document and commits statements in
//!   a fixed order, skipping only claims whose target matches no component.
//! - **[`pipeline`]**: End-to-end orchestration used by the CLI.
//!
//! ## Getting Started: Registering a Document
//!
//! ```no_run
//! use sbom_provenance::config::{InputConfig, RegisterConfig};
//! use sbom_provenance::pipeline::run_register;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RegisterConfig {
//!         input: InputConfig::from_path("bom.cdx.json"),
//!         ..RegisterConfig::default()
//!     };
//!
//!     let run = run_register(&config)?;
//!     println!(
//!         "{} statements committed, {} claims skipped",
//!         run.graph.statements_committed(),
//!         run.graph.skipped_claims.len()
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Working With Content Identifiers
//!
//! ```
//! use sbom_provenance::ContentId;
//!
//! let id = ContentId::of_bytes(b"hello world");
//! assert!(id.to_string().starts_with('z'));
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): Enables fetching documents over HTTP via `reqwest`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Module names reappear in type names (ContentId in cid, StatementRecord in statement)
    clippy::module_name_repetitions
)]

pub mod cid;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod parsers;
pub mod pipeline;
pub mod retrieval;
pub mod statement;
pub mod store;

// Re-export main types for convenience
pub use cid::{CidError, ContentId, ContentRef, UNRESOLVED_LABEL};
pub use error::{ProvenanceError, Result};
pub use graph::{build_graph, GraphOutcome, SkippedClaim};
pub use model::{Component, ComponentRegistry, SbomDocument};
pub use parsers::{parse_document, parse_document_bytes, parse_document_file};
pub use statement::{Computation, Declaration, Seal, StatementRecord};
pub use store::{
    MemoryStore, SignerContext, SignerIdentity, StableId, StatementStore,
};
