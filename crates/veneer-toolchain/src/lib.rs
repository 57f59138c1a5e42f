//! Toolchain identity, feature probes, and sanitizer detection for the
//! Veneer portability layer.
//!
//! Everything in this crate is resolved once, from build-configuration
//! inputs, before any directive is synthesized:
//! - **Identity:** which toolchain family is active, and at what version
//! - **Probes:** which native feature-query facilities exist, and what
//!   they answer
//! - **Sanitizers:** which instrumentation modes are active in this build
//!
//! The [`Toolchain`] profile bundles all of the above into one immutable
//! value that the directive-synthesis crate consumes by reference.

pub mod error;
pub mod identity;
pub mod parse;
pub mod probes;
pub mod profile;
pub mod sanitize;

pub use error::{Result, ToolchainError};
pub use identity::{Family, ToolchainId, ToolchainVersion};
pub use parse::{
    discover_toolchains, generate_template, load_toolchain_toml, parse_toolchain_toml,
    toolchain_to_toml, validate_toolchain, ValidationIssue,
};
pub use probes::ProbeSet;
pub use profile::Toolchain;
pub use sanitize::Sanitizer;
