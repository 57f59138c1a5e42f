//! Error types for toolchain profile operations.

use std::path::PathBuf;

/// Errors that can occur while loading or validating toolchain profiles.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing profile files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Profile file not found.
    #[error("toolchain profile not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Validation error in a profile definition.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for toolchain operations.
pub type Result<T> = std::result::Result<T, ToolchainError>;
