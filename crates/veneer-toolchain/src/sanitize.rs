//! Sanitizer detection.
//!
//! No single toolchain exposes a uniform sanitizer-detection API: some
//! report instrumentation through the feature facility, some through a
//! predefined marker, some through both. Detection therefore ORs both
//! signals per instrumentation kind; absence of both simply means "not
//! active", never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::profile::Toolchain;

/// An instrumentation kind the build may have enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sanitizer {
    Address,
    Thread,
    Memory,
    Dataflow,
    UndefinedBehavior,
}

impl Sanitizer {
    /// All instrumentation kinds, in a fixed order.
    pub const ALL: [Sanitizer; 5] = [
        Sanitizer::Address,
        Sanitizer::Thread,
        Sanitizer::Memory,
        Sanitizer::Dataflow,
        Sanitizer::UndefinedBehavior,
    ];

    /// The name the feature facility answers for this kind.
    pub fn feature_name(&self) -> &'static str {
        match self {
            Sanitizer::Address => "address_sanitizer",
            Sanitizer::Thread => "thread_sanitizer",
            Sanitizer::Memory => "memory_sanitizer",
            Sanitizer::Dataflow => "dataflow_sanitizer",
            Sanitizer::UndefinedBehavior => "undefined_behavior_sanitizer",
        }
    }

    /// The marker some toolchains predefine for this kind.
    ///
    /// The undefined-behavior spelling really is `__SANITIZER_UNDEFINED__`
    /// in the deployed toolchain matrix, not `__SANITIZE_UNDEFINED__`.
    pub fn marker_name(&self) -> &'static str {
        match self {
            Sanitizer::Address => "__SANITIZE_ADDRESS__",
            Sanitizer::Thread => "__SANITIZE_THREAD__",
            Sanitizer::Memory => "__SANITIZE_MEMORY__",
            Sanitizer::Dataflow => "__SANITIZE_DATAFLOW__",
            Sanitizer::UndefinedBehavior => "__SANITIZER_UNDEFINED__",
        }
    }
}

impl fmt::Display for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sanitizer::Address => "address",
            Sanitizer::Thread => "thread",
            Sanitizer::Memory => "memory",
            Sanitizer::Dataflow => "dataflow",
            Sanitizer::UndefinedBehavior => "undefined-behavior",
        };
        write!(f, "{name}")
    }
}

impl Toolchain {
    /// Is the given instrumentation kind active in this build?
    ///
    /// True when either the feature facility reports it or the toolchain
    /// predefines the kind's marker. Address instrumentation additionally
    /// counts the hardware-assisted variant.
    pub fn sanitizer_active(&self, kind: Sanitizer) -> bool {
        let by_feature = self.probes.has_feature(kind.feature_name())
            || (kind == Sanitizer::Address && self.probes.has_feature("hwaddress_sanitizer"));
        by_feature || self.has_marker(kind.marker_name())
    }

    /// Is any instrumentation kind active in this build?
    pub fn any_sanitizer_active(&self) -> bool {
        Sanitizer::ALL.iter().any(|&k| self.sanitizer_active(k))
    }
}
