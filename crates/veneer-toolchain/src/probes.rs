//! Feature probe layer.
//!
//! Wraps the toolchain-native feature-query facilities (`__has_builtin`,
//! `__has_feature`, `__has_warning`, `__has_attribute`). Each facility is
//! modeled as `Option<BTreeSet<String>>`:
//!
//! - `None` — the toolchain does not expose the facility at all; every
//!   query against it degrades to `false` rather than failing the build.
//! - `Some(set)` — the facility exists and answers `true` exactly for the
//!   names in the set.
//!
//! Probes assume toolchain monotonicity (a name answered `true` at version
//! V stays `true` for newer versions of the same family); the layer relies
//! on that property, it does not enforce it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The feature-query facilities exposed by the active toolchain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProbeSet {
    /// Names answered by the builtin-existence facility.
    #[serde(default)]
    pub builtins: Option<BTreeSet<String>>,
    /// Names answered by the language/runtime-feature facility.
    #[serde(default)]
    pub features: Option<BTreeSet<String>>,
    /// Names answered by the diagnostic-existence facility.
    #[serde(default)]
    pub warnings: Option<BTreeSet<String>>,
    /// Names answered by the attribute-existence facility.
    #[serde(default)]
    pub attributes: Option<BTreeSet<String>>,
}

impl ProbeSet {
    /// A toolchain exposing no query facilities at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Does the toolchain know the named builtin?
    pub fn has_builtin(&self, name: &str) -> bool {
        Self::probe(&self.builtins, name)
    }

    /// Does the toolchain report the named language/runtime feature?
    pub fn has_feature(&self, name: &str) -> bool {
        Self::probe(&self.features, name)
    }

    /// Does the toolchain know the named diagnostic?
    pub fn has_warning(&self, name: &str) -> bool {
        Self::probe(&self.warnings, name)
    }

    /// Does the toolchain know the named attribute?
    pub fn has_attribute(&self, name: &str) -> bool {
        Self::probe(&self.attributes, name)
    }

    fn probe(facility: &Option<BTreeSet<String>>, name: &str) -> bool {
        facility.as_ref().map_or(false, |set| set.contains(name))
    }
}
