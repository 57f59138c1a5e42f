//! Toolchain identity and version predicates.
//!
//! A toolchain is identified by its family (the class of compilers sharing
//! directive syntax) and an optional version. Version comparisons go through
//! a single encoded integer so that "at least major.minor" checks are one
//! comparison, the same scheme the compilers themselves use for their
//! prerequisite macros.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A class of compiler implementations sharing directive syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    /// GNU-compatible compilers that are not Clang (gcc and friends).
    GnuCompatible,
    /// Clang and Clang-derived compilers.
    ClangLike,
    /// Compilers implementing the Microsoft ABI (MSVC and compatibles).
    MicrosoftAbi,
    /// Anything unrecognized. Carries no version and supports no directives.
    Other,
}

impl Family {
    /// All recognized families, in a fixed order.
    pub const ALL: [Family; 4] = [
        Family::GnuCompatible,
        Family::ClangLike,
        Family::MicrosoftAbi,
        Family::Other,
    ];
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::GnuCompatible => "gnu-compatible",
            Family::ClangLike => "clang-like",
            Family::MicrosoftAbi => "microsoft-abi",
            Family::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// A toolchain version as (major, minor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainVersion {
    /// Major version component.
    pub major: u32,
    /// Minor version component. Must fit in 16 bits for [`encode`] to be
    /// monotonic; the profile validator enforces this.
    ///
    /// [`encode`]: ToolchainVersion::encode
    pub minor: u32,
}

impl ToolchainVersion {
    /// Construct a version.
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Collapse (major, minor) into one comparable integer:
    /// `(major << 16) + minor`.
    pub fn encode(&self) -> u64 {
        ((self.major as u64) << 16) + self.minor as u64
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The identity of the active toolchain: family plus optional version.
///
/// `version: None` means the toolchain exposes no version information at
/// all. The predicate engine treats that as *unregistered*: every version
/// query answers `false`, rather than comparing against a fabricated 0.0
/// and answering `true` for trivial queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainId {
    /// The toolchain family. Exactly one family per toolchain.
    pub family: Family,
    /// The toolchain version, if the toolchain exposes one.
    pub version: Option<ToolchainVersion>,
}

impl ToolchainId {
    /// Identity with a known version.
    pub fn new(family: Family, major: u32, minor: u32) -> Self {
        Self {
            family,
            version: Some(ToolchainVersion::new(major, minor)),
        }
    }

    /// Identity for a toolchain that exposes no version information.
    pub fn unversioned(family: Family) -> Self {
        Self {
            family,
            version: None,
        }
    }

    /// Is the active toolchain of family `family`, at version
    /// `major.minor` or newer?
    ///
    /// Answers `false` for any family other than the active one, for the
    /// `Other` family unconditionally, and for toolchains with no
    /// registered version. Total: no input fails.
    pub fn is_at_least(&self, family: Family, major: u32, minor: u32) -> bool {
        if family != self.family || self.family == Family::Other {
            return false;
        }
        match self.version {
            Some(current) => current.encode() >= ToolchainVersion::new(major, minor).encode(),
            None => false,
        }
    }
}

impl fmt::Display for ToolchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(v) => write!(f, "{} {v}", self.family),
            None => write!(f, "{} (unversioned)", self.family),
        }
    }
}
