//! npm registry client.
//!
//! Fetches `{base_url}/{name}/latest` and reads the `version` field.

use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

use super::{LookupError, RegistryClient};
use crate::error::{AuditError, Result};

/// Public npm registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Looks up latest versions over HTTP.
pub struct NpmRegistryClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl NpmRegistryClient {
    /// Create a client for the public registry with a 10-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_REGISTRY_URL, Duration::from_secs(10))
    }

    /// Create a client for a custom registry with a per-request timeout.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| AuditError::ConfigValidationError {
                message: format!("registry_url '{}' is not a valid base URL", base_url),
            })?;

        let client = Client::builder()
            .user_agent(concat!("envaudit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| AuditError::Other(e.into()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL queried for a package.
    ///
    /// The name is a single percent-encoded path segment, so the scope
    /// separator of `@scope/pkg` becomes `%2F`.
    pub fn latest_url(&self, name: &str) -> std::result::Result<Url, LookupError> {
        let invalid = || LookupError::InvalidName {
            name: name.to_string(),
        };
        // Dot segments would be dropped from the path.
        if name.trim().is_empty() || name == "." || name == ".." {
            return Err(invalid());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push(name)
            .push("latest");
        Ok(url)
    }
}

fn request_error(name: &str, err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout {
            name: name.to_string(),
        }
    } else {
        LookupError::Transport {
            name: name.to_string(),
            message: err.to_string(),
        }
    }
}

impl RegistryClient for NpmRegistryClient {
    fn resolve_latest_version(&self, name: &str) -> std::result::Result<String, LookupError> {
        let url = self.latest_url(name)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| request_error(name, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| request_error(name, e))?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| LookupError::Malformed {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        json["version"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| LookupError::Malformed {
                name: name.to_string(),
                message: "no version field in response".to_string(),
            })
    }
}
