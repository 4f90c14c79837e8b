//! Domain model for SBOM documents and their attestation content.
//!
//! These structures are the format-agnostic form the parser produces and the
//! graph builder consumes: the component inventory with its hashes, the
//! dependency edges, and the flattened declarations block. A
//! [`ComponentRegistry`] indexes components by bom-ref and answers content-id
//! lookups without ever failing.

mod attestation;
mod document;
mod metadata;
mod registry;

pub use attestation::*;
pub use document::*;
pub use metadata::*;
pub use registry::*;
