//! Dependency freshness rules.
//!
//! Every dependency gets its own registry lookup. Lookups run on a bounded
//! thread pool and are joined before the report is built, so the report is
//! always in input order no matter which lookup finishes first. A failed
//! lookup only affects its own finding.

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::finding::{DomainReport, Finding};
use crate::policy::Priority;
use crate::registry::{LookupError, RegistryClient};
use crate::snapshot::InstalledDependency;

/// Concurrency and retry settings for registry lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Maximum lookups in flight at once.
    pub max_concurrent: usize,
    /// Extra attempts after a transient failure.
    pub retries: u32,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 8,
            retries: 0,
        }
    }
}

/// Evaluate every dependency against its latest published version.
pub fn evaluate_dependencies(
    deps: &IndexMap<String, InstalledDependency>,
    client: &dyn RegistryClient,
    options: &LookupOptions,
) -> DomainReport {
    let entries: Vec<(&String, &InstalledDependency)> = deps.iter().collect();
    let evaluate = |(name, dep): &(&String, &InstalledDependency)| {
        ((*name).clone(), evaluate_one(name, dep, client, options.retries))
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.max_concurrent.max(1))
        .thread_name(|i| format!("envaudit-lookup-{}", i))
        .build();

    let findings: Vec<(String, Finding)> = match pool {
        Ok(pool) => pool.install(|| entries.par_iter().map(evaluate).collect()),
        Err(e) => {
            warn!("Could not start lookup pool, checking sequentially: {}", e);
            entries.iter().map(evaluate).collect()
        }
    };

    findings.into_iter().collect()
}

fn evaluate_one(
    name: &str,
    dep: &InstalledDependency,
    client: &dyn RegistryClient,
    retries: u32,
) -> Finding {
    let Some(installed) = dep.installed_version.as_deref().filter(|v| !v.is_empty()) else {
        return Finding::error(
            format!("Installed version of {} is unknown.", name),
            Priority::Medium,
            format!("Reinstall {} by running 'npm install {}'.", name, name),
        );
    };

    match resolve_with_retries(client, name, retries) {
        Ok(latest) if latest == installed => {
            debug!("{} is current ({})", name, installed);
            Finding::ok(format!("{} is up to date: {}.", name, installed))
        }
        Ok(latest) => {
            debug!("{} {} -> {}", name, installed, latest);
            Finding::update_available(
                format!(
                    "{} is outdated: installed = {}, latest = {}.",
                    name, installed, latest
                ),
                Priority::Medium,
                format!("Update {} by running 'npm install {}@{}'.", name, name, latest),
            )
        }
        Err(e) => {
            warn!("Lookup failed for {}: {}", name, e);
            Finding::error(
                format!("Could not fetch the latest version: {}", e),
                Priority::Medium,
                format!(
                    "Check your internet connection or that {} exists on the registry.",
                    name
                ),
            )
        }
    }
}

fn resolve_with_retries(
    client: &dyn RegistryClient,
    name: &str,
    retries: u32,
) -> Result<String, LookupError> {
    let mut attempt = 0;
    loop {
        match client.resolve_latest_version(name) {
            Err(e) if e.is_transient() && attempt < retries => {
                attempt += 1;
                debug!("Retrying {} (attempt {}): {}", name, attempt + 1, e);
            }
            result => return result,
        }
    }
}
