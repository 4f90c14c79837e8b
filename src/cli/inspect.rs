//! Inspect command handler.
//!
//! Implements the `inspect` subcommand: parse a document and print what a
//! register run would pick up, without committing anything.

use crate::config::InspectConfig;
use crate::model::{Component, SbomDocument};
use crate::pipeline::{acquire_document, exit_codes};
use anyhow::Result;

/// Run the inspect command, returning the desired exit code.
#[allow(clippy::needless_pass_by_value)]
pub fn run_inspect(config: InspectConfig) -> Result<i32> {
    let parsed = acquire_document(&config.input, config.quiet)?;
    let document = parsed.document();

    println!("Document: {}", parsed.origin);
    if let Some(spec_version) = &document.metadata.spec_version {
        println!("  Spec version:  {spec_version}");
    }
    if let Some(serial_number) = &document.metadata.serial_number {
        println!("  Serial number: {serial_number}");
    }
    if let Some(timestamp) = &document.metadata.timestamp {
        println!("  Timestamp:     {}", timestamp.to_rfc3339());
    }

    println!();
    println!("Components ({}):", document.components.len());
    for component in &document.components {
        println!("  {}", describe_component(component));
    }

    if !document.dependencies.is_empty() {
        println!();
        println!("Dependencies ({}):", document.dependencies.len());
        for dependency in &document.dependencies {
            println!(
                "  {} -> {}",
                dependency.subject.as_deref().unwrap_or("<unknown>"),
                if dependency.depends_on.is_empty() {
                    "(none)".to_string()
                } else {
                    dependency.depends_on.join(", ")
                }
            );
        }
    }

    if document.has_declarations() {
        print_declarations(document);
    }

    Ok(exit_codes::SUCCESS)
}

fn describe_component(component: &Component) -> String {
    let version = component.version.as_deref().unwrap_or("?");
    let mut line = format!(
        "{} {} [{}]",
        component.name, version, component.component_type
    );
    if let Some(hash) = component.security.hashes.first() {
        line.push_str(&format!(" {}={}", hash.algorithm, hash.value));
    }
    line
}

fn print_declarations(document: &SbomDocument) {
    println!();
    println!("Assessors ({}):", document.assessors.len());
    for assessor in &document.assessors {
        let name = assessor
            .display_name()
            .or(assessor.bom_ref.as_deref())
            .unwrap_or("<anonymous>");
        if assessor.third_party {
            println!("  {name} (third party)");
        } else {
            println!("  {name}");
        }
    }

    println!();
    println!("Claims ({}):", document.claim_count());
    for attestation in &document.attestations {
        for claim in &attestation.claims {
            let target = claim.target.as_deref().unwrap_or("<no target>");
            let evidence_items: usize = claim.evidence.iter().map(|e| e.items.len()).sum();
            let decoded = claim.decoded_payloads().len();
            println!(
                "  {} -> {} ({} evidence item(s), {} decoded)",
                claim.describe(),
                target,
                evidence_items,
                decoded
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentType, Hash, HashAlgorithm};

    #[test]
    fn test_describe_component_without_version() {
        let component = Component::new(
            "pkg-a".to_string(),
            "alpha".to_string(),
            ComponentType::Library,
        );
        assert_eq!(describe_component(&component), "alpha ? [library]");
    }

    #[test]
    fn test_describe_component_with_hash() {
        let component = Component::new(
            "pkg-a".to_string(),
            "alpha".to_string(),
            ComponentType::Library,
        )
        .with_version("1.0.0".to_string())
        .with_hash(Hash::new(HashAlgorithm::Sha256, "ab".repeat(32)));
        let line = describe_component(&component);
        assert!(line.starts_with("alpha 1.0.0 [library] SHA-256="));
    }
}
