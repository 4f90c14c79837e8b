//! Document acquisition from local and remote sources.

use std::path::Path;

use crate::error::{ProvenanceError, Result};

/// A place documents can be fetched from.
pub trait DocumentSource {
    /// Fetch the raw bytes of the document at `location`.
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    /// Create a filesystem source
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        std::fs::read(Path::new(location)).map_err(|e| ProvenanceError::io(location, e))
    }
}

#[cfg(feature = "remote")]
pub use self::http::{HttpSource, HttpSourceConfig};

#[cfg(feature = "remote")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use tracing::debug;

    use super::DocumentSource;
    use crate::error::{ProvenanceError, Result, RetrievalErrorKind};

    /// HTTP source configuration.
    #[derive(Debug, Clone)]
    pub struct HttpSourceConfig {
        /// Request timeout
        pub timeout: Duration,
    }

    impl Default for HttpSourceConfig {
        fn default() -> Self {
            Self {
                timeout: Duration::from_secs(30),
            }
        }
    }

    /// Fetches documents over HTTP. One request per fetch, no retries.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        client: Client,
    }

    /// Helper to convert reqwest errors to retrieval errors
    fn network_error(context: &str, err: &reqwest::Error) -> ProvenanceError {
        ProvenanceError::retrieval(context, RetrievalErrorKind::Network(err.to_string()))
    }

    impl HttpSource {
        /// Create an HTTP source with the given configuration.
        pub fn new(config: &HttpSourceConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(config.timeout)
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()
                .map_err(|e| network_error("Failed to create HTTP client", &e))?;
            Ok(Self { client })
        }
    }

    impl DocumentSource for HttpSource {
        fn fetch(&self, location: &str) -> Result<Vec<u8>> {
            debug!(url = location, "fetching document");
            let response = self
                .client
                .get(location)
                .send()
                .map_err(|e| network_error("Document request failed", &e))?;
            let status = response.status();
            if !status.is_success() {
                return Err(ProvenanceError::retrieval(
                    "fetch document",
                    RetrievalErrorKind::Status {
                        status: status.as_u16(),
                        url: location.to_string(),
                    },
                ));
            }
            let bytes = response
                .bytes()
                .map_err(|e| network_error("Failed to read response body", &e))?;
            Ok(bytes.to_vec())
        }
    }
}
