//! Snapshot collection.
//!
//! The collector is the only part of envaudit that reads the live process
//! environment. It records environment variables, platform facts, and the
//! project's installed npm dependencies into a [`Snapshot`].

use anyhow::{Context, Result as AnyResult};
use chrono::Utc;
use indexmap::IndexMap;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

use super::{InstalledDependency, Snapshot, SystemInfo};
use crate::error::{AuditError, Result};

/// Collect a snapshot of the current process and the project at `project_root`.
///
/// Dependency listing problems (npm missing, unparseable output) are logged
/// and yield an empty dependency set; they never fail the collection.
pub fn collect_snapshot(project_root: &Path) -> Snapshot {
    let dependencies = match list_npm_dependencies(project_root) {
        Ok(deps) => deps,
        Err(e) => {
            warn!("Could not list npm dependencies: {:#}", e);
            IndexMap::new()
        }
    };

    Snapshot {
        env_variables: collect_env_variables(std::env::vars_os()),
        system_info: collect_system_info(),
        dependencies,
    }
}

/// Convert environment entries to strings.
///
/// Names and values that are not valid UTF-8 are kept with replacement
/// characters so the variable still counts as present.
pub fn collect_env_variables<I>(vars: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .map(|(name, value)| {
            let key = name.to_string_lossy().into_owned();
            if name.to_str().is_none() || value.to_str().is_none() {
                warn!("Environment variable {} is not valid UTF-8", key);
            }
            (key, value.to_string_lossy().into_owned())
        })
        .collect()
}

/// Record platform facts using the naming the policy expects.
pub fn collect_system_info() -> SystemInfo {
    let mut info = SystemInfo::new(
        platform_name(std::env::consts::OS),
        arch_name(std::env::consts::ARCH),
    );

    if let Some(host) = read_hostname() {
        info.extra.insert("hostname".to_string(), host.into());
    }
    if let Ok(meminfo) = fs::read_to_string("/proc/meminfo") {
        if let Some((total, free)) = parse_meminfo(&meminfo) {
            info.extra.insert("totalMem".to_string(), total.into());
            info.extra.insert("freeMem".to_string(), free.into());
        }
    }
    if let Some(uptime) = fs::read_to_string("/proc/uptime")
        .ok()
        .and_then(|content| parse_uptime(&content))
    {
        info.extra.insert("uptime".to_string(), uptime.into());
    }
    info.extra.insert(
        "collectedAt".to_string(),
        Utc::now().to_rfc3339().into(),
    );

    info
}

/// Kernel hostname, falling back to the shell variables.
fn read_hostname() -> Option<String> {
    fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .or_else(|| hostname_from_env(|name| std::env::var(name).ok()))
}

fn hostname_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME"]
        .into_iter()
        .filter_map(lookup)
        .find(|h| !h.is_empty())
}

/// Total and available memory in bytes from `/proc/meminfo`.
pub fn parse_meminfo(content: &str) -> Option<(u64, u64)> {
    let field = |key: &str| {
        content.lines().find_map(|line| {
            let rest = line.strip_prefix(key)?.strip_prefix(':')?;
            let kib: u64 = rest.split_whitespace().next()?.parse().ok()?;
            Some(kib * 1024)
        })
    };

    let total = field("MemTotal")?;
    let free = field("MemAvailable").or_else(|| field("MemFree"))?;
    Some((total, free))
}

/// Whole seconds since boot from `/proc/uptime`.
pub fn parse_uptime(content: &str) -> Option<u64> {
    let seconds: f64 = content.split_whitespace().next()?.parse().ok()?;
    Some(seconds as u64)
}

/// Map a Rust OS name to the Node.js `process.platform` naming.
pub fn platform_name(os: &str) -> String {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
    .to_string()
}

/// Map a Rust architecture name to the Node.js `process.arch` naming.
pub fn arch_name(arch: &str) -> String {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        "powerpc64" => "ppc64",
        other => other,
    }
    .to_string()
}

/// Run `npm list --depth=0 --json` in the project and parse its output.
fn list_npm_dependencies(project_root: &Path) -> AnyResult<IndexMap<String, InstalledDependency>> {
    let output = Command::new("npm")
        .args(["list", "--depth=0", "--json"])
        .current_dir(project_root)
        .output()
        .context("failed to run npm")?;

    // npm exits non-zero for extraneous or missing packages but still
    // prints the full listing.
    if !output.status.success() {
        debug!("npm list exited with {}", output.status);
    }

    parse_npm_list(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the JSON printed by `npm list --json`.
pub fn parse_npm_list(stdout: &str) -> AnyResult<IndexMap<String, InstalledDependency>> {
    #[derive(serde::Deserialize)]
    struct NpmList {
        #[serde(default)]
        dependencies: IndexMap<String, InstalledDependency>,
    }

    let list: NpmList = serde_json::from_str(stdout).context("npm list output is not JSON")?;
    Ok(list.dependencies)
}

/// Write a snapshot as pretty-printed JSON.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let content =
        serde_json::to_string_pretty(snapshot).map_err(|e| AuditError::CollectorFailed {
            message: e.to_string(),
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!("Wrote snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::load_snapshot;
    use tempfile::TempDir;

    #[test]
    fn maps_platform_names() {
        assert_eq!(platform_name("linux"), "linux");
        assert_eq!(platform_name("macos"), "darwin");
        assert_eq!(platform_name("windows"), "win32");
        assert_eq!(platform_name("freebsd"), "freebsd");
    }

    #[test]
    fn maps_arch_names() {
        assert_eq!(arch_name("x86_64"), "x64");
        assert_eq!(arch_name("aarch64"), "arm64");
        assert_eq!(arch_name("x86"), "ia32");
        assert_eq!(arch_name("riscv64"), "riscv64");
    }

    #[test]
    fn system_info_records_collection_time() {
        let info = collect_system_info();
        assert!(!info.platform.is_empty());
        assert!(!info.cpu_arch.is_empty());
        assert!(info.fact("collectedAt").is_some());
    }

    #[test]
    fn env_variables_keep_order_and_values() {
        let vars = vec![
            (OsString::from("NODE_ENV"), OsString::from("production")),
            (OsString::from("APP_KEY"), OsString::from("expected_value")),
        ];
        let env = collect_env_variables(vars);
        assert_eq!(env.keys().collect::<Vec<_>>(), ["NODE_ENV", "APP_KEY"]);
        assert_eq!(env["APP_KEY"], "expected_value");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_env_entries_are_converted_lossily() {
        use std::os::unix::ffi::OsStringExt;

        let vars = vec![
            (OsString::from("BAD_VALUE"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(b"BAD\xffNAME".to_vec()), OsString::from("x")),
            (OsString::from("GOOD"), OsString::from("ok")),
        ];
        let env = collect_env_variables(vars);

        assert_eq!(env.len(), 3);
        assert_eq!(env["BAD_VALUE"], "\u{FFFD}\u{FFFD}");
        assert_eq!(env["BAD\u{FFFD}NAME"], "x");
        assert_eq!(env["GOOD"], "ok");
    }

    #[test]
    fn hostname_falls_back_to_computername() {
        let host = hostname_from_env(|name| match name {
            "HOSTNAME" => Some(String::new()),
            "COMPUTERNAME" => Some("BUILD-01".to_string()),
            _ => None,
        });
        assert_eq!(host.as_deref(), Some("BUILD-01"));
        assert!(hostname_from_env(|_| None).is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_system_info_records_host_facts() {
        let info = collect_system_info();
        assert!(info.fact("hostname").is_some());
        assert!(info.extra["totalMem"].as_u64().unwrap() > 0);
        assert!(info.extra.contains_key("uptime"));
    }

    #[test]
    fn parses_meminfo() {
        let content = "MemTotal:       16318480 kB\nMemFree:         1024000 kB\nMemAvailable:    8159240 kB\n";
        assert_eq!(
            parse_meminfo(content),
            Some((16318480 * 1024, 8159240 * 1024))
        );
    }

    #[test]
    fn meminfo_without_available_uses_free() {
        let content = "MemTotal: 2048 kB\nMemFree: 512 kB\n";
        assert_eq!(parse_meminfo(content), Some((2048 * 1024, 512 * 1024)));
        assert_eq!(parse_meminfo("garbage"), None);
    }

    #[test]
    fn parses_uptime_seconds() {
        assert_eq!(parse_uptime("35012.64 137845.12\n"), Some(35012));
        assert_eq!(parse_uptime(""), None);
    }

    #[test]
    fn parses_npm_list_output() {
        let stdout = r#"{
            "name": "my-app",
            "version": "1.0.0",
            "dependencies": {
                "express": { "version": "4.18.2", "resolved": "https://registry.npmjs.org/express" },
                "left-pad": { "required": "^1.3.0", "missing": true }
            }
        }"#;

        let deps = parse_npm_list(stdout).unwrap();
        let names: Vec<&str> = deps.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["express", "left-pad"]);
        assert_eq!(deps["express"].installed_version.as_deref(), Some("4.18.2"));
        assert!(deps["left-pad"].installed_version.is_none());
    }

    #[test]
    fn npm_list_without_dependencies_is_empty() {
        let deps = parse_npm_list(r#"{ "name": "empty" }"#).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn npm_list_garbage_is_error() {
        assert!(parse_npm_list("npm ERR! code ENOENT").is_err());
    }

    #[test]
    fn written_snapshot_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("extracted_data.json");

        let mut snapshot = Snapshot {
            system_info: SystemInfo::new("linux", "x64"),
            ..Default::default()
        };
        snapshot
            .env_variables
            .insert("NODE_ENV".to_string(), "production".to_string());
        snapshot
            .dependencies
            .insert("lodash".to_string(), InstalledDependency::new("4.17.21"));

        write_snapshot(&path, &snapshot).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }
}
