//! Version stamping module
//!
//! Discovers the dashboard's application version and writes it into the
//! build output directory, so deployed bundles can report what they run.
//! The stamp marks an existing build; a missing output directory is the
//! caller's warning, not an error this module papers over.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;

/// File name written into the output directory
pub const VERSION_FILE: &str = "VERSION";

/// Package manifest consulted when no version is configured
const PACKAGE_MANIFEST: &str = "package.json";

/// Resolve the application version
///
/// Precedence: explicit `[build].app_version`, then the `version` field of
/// `package.json` in the working directory, then this crate's own version.
pub fn app_version(build: &BuildConfig) -> String {
    resolve_version(build, Path::new(PACKAGE_MANIFEST))
}

fn resolve_version(build: &BuildConfig, package_manifest: &Path) -> String {
    if let Some(version) = &build.app_version {
        return version.clone();
    }
    match package_version(package_manifest) {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Read the `version` field from a package.json-style manifest
fn package_version(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
    value.get("version")?.as_str().map(ToString::to_string)
}

/// Write `<output_dir>/VERSION` containing the bare version string
pub fn write_version_file(output_dir: &Path, version: &str) -> io::Result<PathBuf> {
    let target = output_dir.join(VERSION_FILE);
    fs::write(&target, version)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use tempfile::TempDir;

    #[test]
    fn test_configured_version_wins() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("package.json");
        fs::write(&package, r#"{"version": "25.05.2"}"#).unwrap();

        let build = BuildConfig {
            app_version: Some("override".to_string()),
            ..BuildConfig::default()
        };
        assert_eq!(resolve_version(&build, &package), "override");
    }

    #[test]
    fn test_package_version_used_when_unconfigured() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("package.json");
        fs::write(&package, r#"{"name": "homer", "version": "25.05.2"}"#).unwrap();

        let build = BuildConfig::default();
        assert_eq!(resolve_version(&build, &package), "25.05.2");
    }

    #[test]
    fn test_crate_version_fallback() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("package.json");

        let build = BuildConfig::default();
        assert_eq!(resolve_version(&build, &missing), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_malformed_package_manifest_falls_back() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("package.json");
        fs::write(&package, "not json at all").unwrap();

        let build = BuildConfig::default();
        assert_eq!(resolve_version(&build, &package), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_write_version_file_bare_contents() {
        let dir = TempDir::new().unwrap();

        let written = write_version_file(dir.path(), "25.05.2").unwrap();

        assert_eq!(written, dir.path().join("VERSION"));
        // Bare version string, no trailing newline
        assert_eq!(fs::read_to_string(&written).unwrap(), "25.05.2");
    }

    #[test]
    fn test_write_version_file_missing_dir_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("dist");

        assert!(write_version_file(&missing, "1.0.0").is_err());
    }
}
