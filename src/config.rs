//! Typed configuration for pipeline runs.

use std::path::PathBuf;

/// Where the input document comes from. Exactly one of `path` or `url`
/// must be set.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Local file path
    pub path: Option<PathBuf>,
    /// Remote URL (requires the `remote` feature)
    pub url: Option<String>,
}

impl InputConfig {
    /// Input from a local file
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            url: None,
        }
    }

    /// Input from a remote URL
    #[must_use]
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            path: None,
            url: Some(url.into()),
        }
    }
}

/// The identity statements are recorded under.
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// Identity name
    pub name: String,
    /// What the identity is for
    pub description: Option<String>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            name: "Build system".to_string(),
            description: Some(
                "The build system identifier used to register integrity statements".to_string(),
            ),
        }
    }
}

/// Output options for a register run.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Write a JSON manifest here after registration
    pub manifest: Option<PathBuf>,
    /// Suppress progress logging
    pub quiet: bool,
}

/// Behavior toggles for a register run.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    /// Treat skipped claims as a failure
    pub strict: bool,
    /// Purge the store at the end of the run, after any manifest export
    pub purge: bool,
}

/// Full configuration for the register pipeline.
#[derive(Debug, Clone, Default)]
pub struct RegisterConfig {
    /// Input document location
    pub input: InputConfig,
    /// Signing identity
    pub signer: SignerConfig,
    /// Output options
    pub output: OutputConfig,
    /// Behavior toggles
    pub behavior: BehaviorConfig,
}

/// Configuration for document inspection.
#[derive(Debug, Clone, Default)]
pub struct InspectConfig {
    /// Input document location
    pub input: InputConfig,
    /// Suppress progress logging
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_signer_matches_bootstrap_identity() {
        let config = SignerConfig::default();
        assert_eq!(config.name, "Build system");
        assert!(config.description.is_some());
    }

    #[test]
    fn test_input_constructors() {
        let from_path = InputConfig::from_path("bom.json");
        assert!(from_path.path.is_some());
        assert!(from_path.url.is_none());

        let from_url = InputConfig::from_url("https://example.com/bom.json");
        assert!(from_url.path.is_none());
        assert_eq!(
            from_url.url.as_deref(),
            Some("https://example.com/bom.json")
        );
    }
}
