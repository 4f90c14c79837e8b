//! Document acquisition and parsing pipeline.
//!
//! Resolves an input location to a [`DocumentSource`], fetches the bytes and
//! parses them into an [`SbomDocument`] with context for error messages.

use crate::config::InputConfig;
use crate::error::ProvenanceError;
use crate::model::SbomDocument;
use crate::retrieval::{DocumentSource, FileSource};
use anyhow::{Context, Result};

/// A parsed document together with where it came from
pub struct ParsedDocument {
    /// The parsed document
    pub document: SbomDocument,
    /// Human-readable origin (path or URL), preserved for error messages
    pub origin: String,
}

impl ParsedDocument {
    /// Create a new `ParsedDocument`
    #[must_use]
    pub const fn new(document: SbomDocument, origin: String) -> Self {
        Self { document, origin }
    }

    /// Get a reference to the document
    #[must_use]
    pub const fn document(&self) -> &SbomDocument {
        &self.document
    }

    /// Consume and return the inner document
    #[must_use]
    pub fn into_document(self) -> SbomDocument {
        self.document
    }
}

/// Resolve an input configuration to a document source and its origin label.
///
/// Exactly one of `path` or `url` must be set; anything else is a
/// configuration error.
pub fn source_for_input(
    input: &InputConfig,
) -> crate::error::Result<(Box<dyn DocumentSource>, String)> {
    match (&input.path, &input.url) {
        (Some(path), None) => Ok((Box::new(FileSource::new()), path.display().to_string())),
        (None, Some(url)) => remote_source(url),
        (Some(_), Some(_)) => Err(ProvenanceError::config(
            "both a path and a URL were given; pick one",
        )),
        (None, None) => Err(ProvenanceError::config(
            "no document path or URL was given",
        )),
    }
}

#[cfg(feature = "remote")]
fn remote_source(url: &str) -> crate::error::Result<(Box<dyn DocumentSource>, String)> {
    let source = crate::retrieval::HttpSource::new(&crate::retrieval::HttpSourceConfig::default())?;
    Ok((Box::new(source), url.to_string()))
}

#[cfg(not(feature = "remote"))]
fn remote_source(url: &str) -> crate::error::Result<(Box<dyn DocumentSource>, String)> {
    Err(ProvenanceError::retrieval(
        "resolve source",
        crate::error::RetrievalErrorKind::UnsupportedSource(format!(
            "{url}: remote fetch requires the 'remote' feature"
        )),
    ))
}

/// Fetch and parse a document with context for error messages
pub fn acquire_document(input: &InputConfig, quiet: bool) -> Result<ParsedDocument> {
    let (source, origin) = source_for_input(input)?;

    if !quiet {
        tracing::info!("Fetching document: {}", origin);
    }

    let bytes = source
        .fetch(&origin)
        .with_context(|| format!("Failed to fetch document from {origin}"))?;
    let document = crate::parsers::parse_document_bytes(&bytes)
        .with_context(|| format!("Failed to parse document from {origin}"))?;

    if !quiet {
        tracing::info!(
            "Parsed {} components, {} claims",
            document.components.len(),
            document.claim_count()
        );
    }

    Ok(ParsedDocument::new(document, origin))
}
