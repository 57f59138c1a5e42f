//! TOML parsing, serialization, validation, and discovery for toolchain
//! profiles.
//!
//! Profiles are stored as `.toolchain.toml` files in the `toolchains/`
//! directory of a project. The build-configuration step writes one per
//! toolchain it has probed; this module loads, validates, serializes, and
//! discovers those files.

use std::path::{Path, PathBuf};

use crate::error::{Result, ToolchainError};
use crate::identity::Family;
use crate::profile::Toolchain;
use crate::sanitize::Sanitizer;

/// A validation issue found in a toolchain profile.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a toolchain profile from a `.toolchain.toml` file.
pub fn load_toolchain_toml(path: &Path) -> Result<Toolchain> {
    if !path.exists() {
        return Err(ToolchainError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_toolchain_toml(&content)
}

/// Parse a toolchain profile from a TOML string.
pub fn parse_toolchain_toml(toml_str: &str) -> Result<Toolchain> {
    let toolchain: Toolchain = toml::from_str(toml_str)?;
    Ok(toolchain)
}

/// Serialize a toolchain profile to pretty TOML.
pub fn toolchain_to_toml(toolchain: &Toolchain) -> Result<String> {
    let toml_str = toml::to_string_pretty(toolchain)?;
    Ok(toml_str)
}

/// Validate a toolchain profile for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_toolchain(toolchain: &Toolchain) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Profile name is non-empty
    if toolchain.name.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "profile name is empty".into(),
        });
    }

    // 2. Minor version fits in 16 bits (version encoding is monotonic
    //    only below that bound)
    if let Some(version) = toolchain.id.version {
        if version.minor >= 1 << 16 {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "minor version {} does not fit in 16 bits; version comparisons would misorder",
                    version.minor
                ),
            });
        }
    }

    // 3. Unrecognized toolchains carry no version
    if toolchain.id.family == Family::Other && toolchain.id.version.is_some() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: "family 'other' is never version-registered; the version field is ignored"
                .into(),
        });
    }

    // 4. Markers are non-empty strings
    for marker in &toolchain.markers {
        if marker.is_empty() {
            issues.push(ValidationIssue {
                severity: "error",
                message: "empty marker string".into(),
            });
        }
    }

    // 5. Sanitizer-looking markers use a recognized spelling
    let known: Vec<&str> = Sanitizer::ALL.iter().map(|k| k.marker_name()).collect();
    for marker in &toolchain.markers {
        if marker.starts_with("__SANITIZE") && !known.contains(&marker.as_str()) {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!(
                    "marker '{marker}' looks like a sanitizer marker but matches no recognized \
                     spelling; it will not trigger detection"
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a template `.toolchain.toml` for a new profile.
///
/// Seeds from the clang preset with the given custom name.
pub fn generate_template(name: &str) -> Result<String> {
    let mut toolchain = Toolchain::clang(14, 0);
    toolchain.name = name.into();
    toolchain_to_toml(&toolchain)
}

/// Discover all `.toolchain.toml` files in a project's `toolchains/`
/// directory.
///
/// Returns a list of (profile_name, file_path) pairs.
pub fn discover_toolchains(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let toolchains_dir = project_dir.join("toolchains");
    if !toolchains_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut profiles = Vec::new();
    let entries = std::fs::read_dir(&toolchains_dir)?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with(".toolchain.toml") {
                let name = file_name
                    .strip_suffix(".toolchain.toml")
                    .unwrap()
                    .to_string();
                profiles.push((name, path));
            }
        }
    }
    profiles.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(profiles)
}
