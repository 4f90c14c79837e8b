//! Signing identities under which statements are recorded.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Signature algorithm tag for an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SigningAlgorithm {
    #[default]
    Ed25519,
}

impl std::fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519 => write!(f, "Ed25519"),
        }
    }
}

/// An identity that can be recorded against committed statements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerIdentity {
    /// Display name
    pub name: String,
    /// What this identity is for
    pub description: Option<String>,
    /// Signature algorithm the identity is keyed with
    pub algorithm: SigningAlgorithm,
}

impl SignerIdentity {
    /// Create an Ed25519 identity with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            algorithm: SigningAlgorithm::Ed25519,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The set of known signing identities, with at most one active.
///
/// Commits are attributed to the active identity. Identities can also be
/// registered without activation, which records who took part in a run
/// without letting them sign anything.
#[derive(Debug, Clone, Default)]
pub struct SignerContext {
    identities: Vec<SignerIdentity>,
    active: Option<usize>,
}

impl SignerContext {
    /// Create an empty context with no active identity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity without activating it.
    pub fn register(&mut self, identity: SignerIdentity) {
        debug!(name = %identity.name, algorithm = %identity.algorithm, "registered identity");
        self.identities.push(identity);
    }

    /// Register an identity and make it the active one, replacing any
    /// previously active identity.
    pub fn activate(&mut self, identity: SignerIdentity) {
        info!(name = %identity.name, algorithm = %identity.algorithm, "activated signing identity");
        self.identities.push(identity);
        self.active = Some(self.identities.len() - 1);
    }

    /// Clear the active identity, keeping it registered.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// The identity commits are currently attributed to
    #[must_use]
    pub fn active(&self) -> Option<&SignerIdentity> {
        self.active.and_then(|index| self.identities.get(index))
    }

    /// All registered identities, in registration order
    #[must_use]
    pub fn identities(&self) -> &[SignerIdentity] {
        &self.identities
    }

    /// Number of registered identities
    #[must_use]
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// True when nothing has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
