//! End-to-end register pipeline.
//!
//! Ties acquisition, indexing, graph construction and manifest export
//! together so CLI handlers stay thin.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::RegisterConfig;
use crate::graph::{build_graph, GraphOutcome};
use crate::model::ComponentRegistry;
use crate::pipeline::acquire_document;
use crate::store::{MemoryStore, SignerContext, SignerIdentity, StatementStore};

/// Everything a register run produced, for reporting.
#[derive(Debug)]
pub struct RegisterRun {
    /// Where the document came from
    pub origin: String,
    /// Graph construction outcome
    pub graph: GraphOutcome,
    /// Indexed components, with integrity records attached
    pub registry: ComponentRegistry,
    /// The store holding committed statements (empty if purged)
    pub store: MemoryStore,
    /// Where the manifest was written, if requested
    pub manifest_path: Option<PathBuf>,
    /// Whether the store was purged at the end of the run
    pub purged: bool,
}

/// Run the full register pipeline described by `config`.
pub fn run_register(config: &RegisterConfig) -> Result<RegisterRun> {
    let quiet = config.output.quiet;
    let mut parsed = acquire_document(&config.input, quiet)?;

    // The registry takes ownership of the components; the graph builder
    // reads everything else through the document.
    let components = std::mem::take(&mut parsed.document.components);
    let mut registry = ComponentRegistry::index(components);
    registry.log_collision_summary();

    let mut store = MemoryStore::new();
    let mut signer = SignerContext::new();
    let mut identity = SignerIdentity::new(&config.signer.name);
    if let Some(description) = &config.signer.description {
        identity = identity.with_description(description.clone());
    }
    signer.activate(identity);

    let graph = build_graph(&parsed.document, &mut registry, &mut store, &mut signer)
        .context("Failed to build the provenance graph")?;

    if let Some(path) = &config.output.manifest {
        store
            .export_manifest(path)
            .with_context(|| format!("Failed to export manifest to {}", path.display()))?;
    }

    let purged = if config.behavior.purge {
        store
            .purge()
            .context("Failed to purge the statement store")?;
        true
    } else {
        false
    };

    Ok(RegisterRun {
        origin: parsed.origin,
        graph,
        registry,
        store,
        manifest_path: config.output.manifest.clone(),
        purged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::config::InputConfig;

    fn write_document(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_run_register_minimal_document() {
        let file = write_document(r#"{"bomFormat": "CycloneDX", "components": []}"#);
        let config = RegisterConfig {
            input: InputConfig::from_path(file.path()),
            ..RegisterConfig::default()
        };
        let run = run_register(&config).unwrap();
        assert!(run.graph.is_complete());
        assert_eq!(run.graph.artifacts_registered, 0);
        assert!(!run.purged);
        assert!(run.manifest_path.is_none());
    }

    #[test]
    fn test_run_register_commits_artifacts() {
        let file = write_document(
            r#"{
                "bomFormat": "CycloneDX",
                "components": [
                    {"bom-ref": "pkg-a", "name": "alpha", "type": "library"},
                    {"bom-ref": "pkg-b", "name": "beta", "type": "library"}
                ]
            }"#,
        );
        let config = RegisterConfig {
            input: InputConfig::from_path(file.path()),
            ..RegisterConfig::default()
        };
        let run = run_register(&config).unwrap();
        assert_eq!(run.graph.artifacts_registered, 2);
        assert_eq!(run.store.len(), 2);
        assert_eq!(run.registry.len(), 2);
    }

    #[test]
    fn test_run_register_purge_empties_store() {
        let file = write_document(
            r#"{
                "bomFormat": "CycloneDX",
                "components": [{"bom-ref": "pkg-a", "name": "alpha", "type": "library"}]
            }"#,
        );
        let mut config = RegisterConfig {
            input: InputConfig::from_path(file.path()),
            ..RegisterConfig::default()
        };
        config.behavior.purge = true;
        let run = run_register(&config).unwrap();
        assert!(run.purged);
        assert!(run.store.is_empty());
        assert_eq!(run.graph.artifacts_registered, 1);
    }

    #[test]
    fn test_run_register_missing_file_reports_origin() {
        let config = RegisterConfig {
            input: InputConfig::from_path("/no/such/document.json"),
            ..RegisterConfig::default()
        };
        let err = run_register(&config).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/document.json"));
    }
}
