//! Package registry lookups.
//!
//! A [`RegistryClient`] resolves the latest published version of a
//! dependency. Each call is a single attempt with one outcome; failures are
//! returned as [`LookupError`] values and never abort an audit.
//!
//! # Modules
//!
//! - [`npm`] - Client for the npm registry HTTP API

pub mod npm;

pub use npm::{NpmRegistryClient, DEFAULT_REGISTRY_URL};

use thiserror::Error;

/// Why a latest-version lookup failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The dependency name cannot be looked up.
    #[error("invalid package name '{name}'")]
    InvalidName { name: String },

    /// Connection refused, DNS failure, or a broken response stream.
    #[error("connection error for {name}: {message}")]
    Transport { name: String, message: String },

    /// The lookup did not finish within the configured timeout.
    #[error("lookup for {name} timed out")]
    Timeout { name: String },

    /// The registry answered with a non-success status.
    #[error("registry returned HTTP {status} for {name}")]
    Status { name: String, status: u16 },

    /// The response was not JSON or had no version string.
    #[error("malformed registry response for {name}: {message}")]
    Malformed { name: String, message: String },
}

impl LookupError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Resolves the latest published version of a dependency.
pub trait RegistryClient: Send + Sync {
    /// Look up the latest version of `name`, exactly as the registry reports it.
    fn resolve_latest_version(&self, name: &str) -> Result<String, LookupError>;
}
