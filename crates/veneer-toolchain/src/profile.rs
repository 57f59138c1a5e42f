//! The toolchain profile: the one immutable configuration object.
//!
//! A [`Toolchain`] is assembled once from build-configuration inputs
//! (identity markers, probe facilities, predefined markers, availability
//! flags) and then passed by reference to every consumer. Nothing in it is
//! mutated after construction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::identity::{Family, ToolchainId};
use crate::probes::ProbeSet;

/// A complete description of the active toolchain, as supplied by the
/// build-configuration step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Toolchain {
    /// Profile name (e.g., "clang-14", "gcc-12", "msvc-19.29").
    pub name: String,
    /// Markers the toolchain predefines (sanitizer markers, vendor
    /// markers). Checked verbatim.
    #[serde(default)]
    pub markers: BTreeSet<String>,
    /// Build-wide weak-symbol support, supplied externally.
    #[serde(default)]
    pub weak_symbols: bool,
    /// Availability of the shadow-warning diagnostic group, supplied
    /// externally.
    #[serde(default)]
    pub shadow_warning_group: bool,
    /// Family and version identity.
    pub id: ToolchainId,
    /// Native feature-query facilities.
    #[serde(default)]
    pub probes: ProbeSet,
}

impl Toolchain {
    /// Is the active toolchain of family `family`, at `major.minor` or
    /// newer? See [`ToolchainId::is_at_least`].
    pub fn is_at_least(&self, family: Family, major: u32, minor: u32) -> bool {
        self.id.is_at_least(family, major, minor)
    }

    /// Is the named marker predefined by the toolchain?
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }

    /// The Microsoft ABI version: the encoded toolchain version under the
    /// `MicrosoftAbi` family, absent everywhere else.
    pub fn microsoft_abi_version(&self) -> Option<u64> {
        match (self.id.family, self.id.version) {
            (Family::MicrosoftAbi, Some(v)) => Some(v.encode()),
            _ => None,
        }
    }

    /// Profile for gcc at the given version.
    pub fn gcc(major: u32, minor: u32) -> Self {
        Self {
            name: format!("gcc-{major}.{minor}"),
            markers: BTreeSet::new(),
            weak_symbols: true,
            shadow_warning_group: true,
            id: ToolchainId::new(Family::GnuCompatible, major, minor),
            probes: ProbeSet {
                builtins: Some(string_set(&["__builtin_expect", "__builtin_unreachable"])),
                features: None,
                warnings: None,
                attributes: Some(string_set(&[
                    "weak",
                    "__no_address_safety_analysis__",
                    "__noinline__",
                ])),
            },
        }
    }

    /// Profile for clang at the given version.
    pub fn clang(major: u32, minor: u32) -> Self {
        Self {
            name: format!("clang-{major}.{minor}"),
            markers: BTreeSet::new(),
            weak_symbols: true,
            shadow_warning_group: false,
            id: ToolchainId::new(Family::ClangLike, major, minor),
            probes: ProbeSet {
                builtins: Some(string_set(&[
                    "__builtin_expect",
                    "__builtin_unreachable",
                    "__builtin_assume",
                ])),
                features: Some(BTreeSet::new()),
                warnings: Some(string_set(&["-Wshadow", "-Wunused-lambda-capture"])),
                attributes: Some(string_set(&["weak", "__no_sanitize__", "__noinline__"])),
            },
        }
    }

    /// Profile for MSVC at the given version.
    pub fn msvc(major: u32, minor: u32) -> Self {
        Self {
            name: format!("msvc-{major}.{minor}"),
            markers: BTreeSet::new(),
            weak_symbols: false,
            shadow_warning_group: false,
            id: ToolchainId::new(Family::MicrosoftAbi, major, minor),
            probes: ProbeSet::none(),
        }
    }

    /// Profile for an unrecognized toolchain: no version, no facilities,
    /// no availability flags.
    pub fn unknown() -> Self {
        Self {
            name: "unknown".into(),
            markers: BTreeSet::new(),
            weak_symbols: false,
            shadow_warning_group: false,
            id: ToolchainId::unversioned(Family::Other),
            probes: ProbeSet::none(),
        }
    }

    /// Derive a copy of this profile with the named feature reported by
    /// the feature facility (creating the facility if the toolchain
    /// lacks one).
    pub fn with_feature(mut self, name: &str) -> Self {
        self.probes
            .features
            .get_or_insert_with(BTreeSet::new)
            .insert(name.to_string());
        self
    }

    /// Derive a copy of this profile with the named predefined marker.
    pub fn with_marker(mut self, name: &str) -> Self {
        self.markers.insert(name.to_string());
        self
    }
}

fn string_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}
