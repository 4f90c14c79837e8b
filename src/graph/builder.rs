//! The phased walk that commits a document's provenance statements.

use std::error::Error as _;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::cid::ContentRef;
use crate::error::{ProvenanceError, Result};
use crate::graph::{GraphOutcome, SkippedClaim};
use crate::model::{Assessor, Claim, Component, ComponentRegistry, IntegrityRecord, SbomDocument};
use crate::statement::{ArtifactRecord, Computation, Declaration, ExtraValue, StatementRecord};
use crate::store::{SignerContext, SignerIdentity, StatementStore};

/// Walk a parsed document and commit its provenance statements.
///
/// Phases run in a fixed order: artifacts, assessor identities,
/// computations, declarations. A claim whose target is not in the registry
/// is skipped and reported in the outcome; any other error aborts the
/// walk.
pub fn build_graph(
    document: &SbomDocument,
    registry: &mut ComponentRegistry,
    store: &mut dyn StatementStore,
    signer: &mut SignerContext,
) -> Result<GraphOutcome> {
    let artifacts_registered = register_artifacts(registry, store, signer)?;
    let identities_registered = register_assessors(&document.assessors, signer);
    let computations_finalized = build_computations(document, registry, store, signer)?;
    let (declarations_finalized, skipped_claims) =
        build_declarations(document, registry, store, signer)?;

    let outcome = GraphOutcome {
        artifacts_registered,
        identities_registered,
        computations_finalized,
        declarations_finalized,
        skipped_claims,
    };
    info!(
        artifacts = outcome.artifacts_registered,
        computations = outcome.computations_finalized,
        declarations = outcome.declarations_finalized,
        skipped = outcome.skipped_claims.len(),
        "provenance graph committed"
    );
    Ok(outcome)
}

/// Commit one artifact statement per indexed component and attach the
/// resulting integrity record.
fn register_artifacts(
    registry: &mut ComponentRegistry,
    store: &mut dyn StatementStore,
    signer: &SignerContext,
) -> Result<usize> {
    let refs: Vec<String> = registry.refs().map(str::to_string).collect();
    let mut registered = 0;
    for bom_ref in refs {
        let content = registry.resolve(&bom_ref);
        let record = match registry.get(&bom_ref) {
            Some(component) => artifact_record(component, &content),
            None => continue,
        };
        let id = store.commit(&StatementRecord::Artifact(record), signer)?;
        debug!(bom_ref = %bom_ref, id = %id, "registered artifact");
        registry.attach_integrity(&bom_ref, IntegrityRecord::new(id, content));
        registered += 1;
    }
    Ok(registered)
}

fn artifact_record(component: &Component, content: &ContentRef) -> ArtifactRecord {
    let mut metadata = IndexMap::new();
    metadata.insert("name".to_string(), ExtraValue::text(component.name.clone()));
    if let Some(version) = &component.version {
        metadata.insert("version".to_string(), ExtraValue::text(version.clone()));
    }
    if let Some(description) = &component.description {
        metadata.insert(
            "description".to_string(),
            ExtraValue::text(description.clone()),
        );
    }
    if let Some(supplier) = &component.supplier {
        metadata.insert(
            "supplier".to_string(),
            ExtraValue::text(supplier.name.clone()),
        );
    }
    if let Some(license) = component.primary_license() {
        metadata.insert("licenses".to_string(), ExtraValue::text(license));
    }
    if let Some(purl) = &component.purl {
        metadata.insert("purl".to_string(), ExtraValue::text(purl.clone()));
    }
    metadata.insert(
        "bom_ref".to_string(),
        ExtraValue::text(component.bom_ref.clone()),
    );

    ArtifactRecord {
        content_id: content.label(),
        artifact_type: component.component_type.to_string(),
        metadata,
    }
}

/// Record each assessor as a known, inactive identity.
fn register_assessors(assessors: &[Assessor], signer: &mut SignerContext) -> usize {
    let mut registered = 0;
    for assessor in assessors {
        let Some(name) = assessor.display_name().or(assessor.bom_ref.as_deref()) else {
            debug!("skipping assessor with neither a name nor a ref");
            continue;
        };
        let mut identity = SignerIdentity::new(name);
        if assessor.third_party {
            identity = identity.with_description("Third-party assessor");
        }
        signer.register(identity);
        registered += 1;
    }
    registered
}

/// Commit one computation statement per dependency edge.
fn build_computations(
    document: &SbomDocument,
    registry: &ComponentRegistry,
    store: &mut dyn StatementStore,
    signer: &SignerContext,
) -> Result<usize> {
    let mut finalized = 0;
    for edge in &document.dependencies {
        let subject = edge.subject.as_deref();
        let output = subject.map_or(ContentRef::Unresolved, |r| registry.resolve(r));
        let subject_name = subject
            .and_then(|r| registry.name_of(r))
            .unwrap_or("Unknown");

        let mut computation = Computation::new(
            format!("{subject_name} build"),
            format!("The building of {subject_name}"),
        );
        computation.add_output(output)?;
        for dependency in &edge.depends_on {
            computation.add_input(registry.resolve(dependency))?;
        }
        let id = computation.finalize(store, signer)?;
        debug!(
            subject = subject.unwrap_or("<none>"),
            id = %id,
            inputs = edge.depends_on.len(),
            "committed computation"
        );
        finalized += 1;
    }
    Ok(finalized)
}

/// Commit one declaration per claim, attaching each to its target.
///
/// Claims whose target is unknown are collected rather than propagated,
/// so every remaining claim still gets its chance.
fn build_declarations(
    document: &SbomDocument,
    registry: &mut ComponentRegistry,
    store: &mut dyn StatementStore,
    signer: &SignerContext,
) -> Result<(usize, Vec<SkippedClaim>)> {
    let mut finalized = 0;
    let mut skipped = Vec::new();

    for attestation in &document.attestations {
        for claim in &attestation.claims {
            let assessor = attestation.assessor.as_deref();
            match commit_claim(document, registry, store, signer, assessor, claim) {
                Ok(()) => finalized += 1,
                Err(e) if e.is_claim_scoped() => {
                    warn!(claim = claim.describe(), error = %e, "skipping claim");
                    // report the underlying kind, not the outer wrapper
                    let reason = e.source().map_or_else(|| e.to_string(), ToString::to_string);
                    skipped.push(SkippedClaim {
                        claim: claim.describe().to_string(),
                        target: claim.target.clone().unwrap_or_default(),
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
    Ok((finalized, skipped))
}

fn commit_claim(
    document: &SbomDocument,
    registry: &mut ComponentRegistry,
    store: &mut dyn StatementStore,
    signer: &SignerContext,
    assessor: Option<&str>,
    claim: &Claim,
) -> Result<()> {
    let target = claim.target.as_deref().unwrap_or_default();
    if registry.get(target).is_none() {
        return Err(ProvenanceError::unknown_target(claim.describe(), target));
    }

    let mut declaration = Declaration::new(claim.predicate.clone(), claim.reasoning.clone());
    if let Some(at) = document.metadata.timestamp {
        declaration.submitted_at(at)?;
    }
    if let Some(assessor) = assessor {
        declaration.submitted_by(format!("assessor:{assessor}"))?;
    }
    for payload in claim.decoded_payloads() {
        declaration.add_attachment(payload)?;
    }
    if let Some(requirement) = &claim.requirement {
        declaration.add_control(requirement.clone())?;
    }

    declaration.add_extra("target", ExtraValue::text(target))?;
    if let Some(bom_ref) = &claim.bom_ref {
        declaration.add_extra("bom_ref", ExtraValue::text(bom_ref.clone()))?;
    }
    if !claim.mitigation_strategies.is_empty() {
        declaration.add_extra(
            "mitigation_strategies",
            ExtraValue::List(claim.mitigation_strategies.clone()),
        )?;
    }
    if let Some(signature) = claim.signature.as_ref().and_then(ExtraValue::from_json) {
        declaration.add_extra("signature", signature)?;
    }

    let id = declaration.finalize(store, signer)?;
    registry.attach_declaration(target, id);
    Ok(())
}
