//! Directive synthesis for the Veneer portability layer.
//!
//! Maps semantic annotations ("export this symbol", "force-inline this
//! function", "suppress address instrumentation here") to the concrete
//! directive text of the active toolchain family, or to nothing when the
//! family has no equivalent. Every resolution path ends in an explicit
//! empty fallback: a missing capability becomes inert, never a build
//! failure.
//!
//! Layers, bottom up:
//! - [`fragment`] — the opaque directive text being assembled
//! - [`dialect`] — one directive table per toolchain family
//! - [`synthesis`] — semantic annotations and their resolution
//! - [`composite`] — ordered bundles of annotations with per-family
//!   override and exclusion rules
//! - [`diagnostics`] — push/pop/disable/enable over the compiler's
//!   diagnostic engine

pub mod composite;
pub mod dialect;
pub mod diagnostics;
pub mod error;
pub mod fragment;
pub mod synthesis;

pub use composite::{build, Bundle, Composite, ExclusionRule};
pub use dialect::{dialect_for, Dialect, DiagnosticOp};
pub use diagnostics::DiagnosticStack;
pub use error::AttrError;
pub use fragment::Fragment;
pub use synthesis::{resolve, Attribute};
