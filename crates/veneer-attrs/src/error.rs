//! Errors from annotation name parsing.

use thiserror::Error;

/// Errors that can occur when naming annotations (the resolution paths
/// themselves are total and never fail).
#[derive(Debug, Error)]
pub enum AttrError {
    #[error("unknown attribute: '{name}'. Use 'veneer list' to see available attributes")]
    UnknownAttribute { name: String },

    #[error("unknown composite: '{name}'. Use 'veneer list' to see available composites")]
    UnknownComposite { name: String },
}
