//! Semantic annotations and their resolution.
//!
//! An [`Attribute`] names a capability request; [`resolve`] maps it to the
//! directive text of the active toolchain family. Resolution is a pure
//! function of (toolchain profile, annotation): resolving the same
//! annotation twice against the same profile yields byte-identical
//! fragments, and every unresolvable request ends in the empty fragment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use veneer_toolchain::{Sanitizer, Toolchain};

use crate::dialect::dialect_for;
use crate::error::AttrError;
use crate::fragment::Fragment;

/// A semantic annotation: a capability requested of the toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attribute {
    /// Give the symbol public (default) visibility.
    Export,
    /// Force call sites to inline the function.
    AlwaysInline,
    /// Forbid inlining the function.
    NoInline,
    /// Give the symbol hidden visibility.
    HiddenVisibility,
    /// Mark the symbol weak. Gated on the build-wide weak-symbol
    /// availability flag; resolves to nothing when the flag is absent,
    /// regardless of family.
    WeakSymbol,
    /// Mark the symbol weak if the toolchain's attribute facility reports
    /// support, independent of the build-wide flag.
    WeakSymbolIfSupported,
    /// Keep the symbol resolvable by name (for inline assembly that
    /// refers to it textually). Only meaningful on toolchains that
    /// predefine the `roar` marker.
    NameResolvable,
    /// Suppress the given instrumentation kind for the function. Resolves
    /// to nothing unless that instrumentation is active in this build.
    SuppressSanitizer(Sanitizer),
    /// Pass arguments through to `__declspec` on the Microsoft ABI;
    /// nothing elsewhere.
    MsvcDeclspec(String),
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Export => write!(f, "export"),
            Attribute::AlwaysInline => write!(f, "always-inline"),
            Attribute::NoInline => write!(f, "no-inline"),
            Attribute::HiddenVisibility => write!(f, "hidden-visibility"),
            Attribute::WeakSymbol => write!(f, "weak-symbol"),
            Attribute::WeakSymbolIfSupported => write!(f, "weak-symbol-if-supported"),
            Attribute::NameResolvable => write!(f, "name-resolvable"),
            Attribute::SuppressSanitizer(kind) => write!(f, "suppress-{kind}"),
            Attribute::MsvcDeclspec(args) => write!(f, "msvc-declspec({args})"),
        }
    }
}

impl FromStr for Attribute {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let attribute = match s {
            "export" => Attribute::Export,
            "always-inline" => Attribute::AlwaysInline,
            "no-inline" => Attribute::NoInline,
            "hidden-visibility" => Attribute::HiddenVisibility,
            "weak-symbol" => Attribute::WeakSymbol,
            "weak-symbol-if-supported" => Attribute::WeakSymbolIfSupported,
            "name-resolvable" => Attribute::NameResolvable,
            "suppress-address" => Attribute::SuppressSanitizer(Sanitizer::Address),
            "suppress-thread" => Attribute::SuppressSanitizer(Sanitizer::Thread),
            "suppress-memory" => Attribute::SuppressSanitizer(Sanitizer::Memory),
            "suppress-dataflow" => Attribute::SuppressSanitizer(Sanitizer::Dataflow),
            "suppress-undefined-behavior" => {
                Attribute::SuppressSanitizer(Sanitizer::UndefinedBehavior)
            }
            _ => {
                return Err(AttrError::UnknownAttribute {
                    name: s.to_string(),
                })
            }
        };
        Ok(attribute)
    }
}

impl Attribute {
    /// The annotations nameable on a command line, in a fixed order.
    pub fn nameable() -> Vec<Attribute> {
        let mut names = vec![
            Attribute::Export,
            Attribute::AlwaysInline,
            Attribute::NoInline,
            Attribute::HiddenVisibility,
            Attribute::WeakSymbol,
            Attribute::WeakSymbolIfSupported,
            Attribute::NameResolvable,
        ];
        names.extend(Sanitizer::ALL.map(Attribute::SuppressSanitizer));
        names
    }
}

/// Resolve a semantic annotation to the directive fragment of the active
/// toolchain family.
///
/// Availability gates that hold regardless of family are applied first;
/// what remains dispatches to the family dialect. Total: every input
/// resolves, the worst case being the empty fragment.
pub fn resolve(toolchain: &Toolchain, attribute: &Attribute) -> Fragment {
    match attribute {
        Attribute::WeakSymbol if !toolchain.weak_symbols => return Fragment::empty(),
        Attribute::WeakSymbolIfSupported if !toolchain.probes.has_attribute("weak") => {
            return Fragment::empty()
        }
        Attribute::NameResolvable if !toolchain.has_marker("roar") => return Fragment::empty(),
        Attribute::SuppressSanitizer(kind) if !toolchain.sanitizer_active(*kind) => {
            return Fragment::empty()
        }
        _ => {}
    }
    dialect_for(toolchain.id.family).attribute(toolchain, attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_per_family() {
        assert_eq!(
            resolve(&Toolchain::gcc(12, 2), &Attribute::Export).to_string(),
            "__attribute__((__visibility__(\"default\")))"
        );
        assert_eq!(
            resolve(&Toolchain::clang(14, 0), &Attribute::Export).to_string(),
            "__attribute__((__visibility__(\"default\")))"
        );
        assert!(resolve(&Toolchain::msvc(19, 29), &Attribute::Export).is_empty());
        assert!(resolve(&Toolchain::unknown(), &Attribute::Export).is_empty());
    }

    #[test]
    fn always_inline_per_family() {
        assert_eq!(
            resolve(&Toolchain::gcc(12, 2), &Attribute::AlwaysInline).to_string(),
            "inline __attribute__((__always_inline__))"
        );
        assert_eq!(
            resolve(&Toolchain::msvc(19, 29), &Attribute::AlwaysInline).to_string(),
            "__forceinline"
        );
        // Unknown toolchains still get the portable inline specifier.
        assert_eq!(
            resolve(&Toolchain::unknown(), &Attribute::AlwaysInline).to_string(),
            "inline"
        );
    }

    #[test]
    fn no_inline_per_family() {
        assert_eq!(
            resolve(&Toolchain::gcc(12, 2), &Attribute::NoInline).to_string(),
            "__attribute__((__noinline__))"
        );
        assert_eq!(
            resolve(&Toolchain::msvc(19, 29), &Attribute::NoInline).to_string(),
            "__declspec(noinline)"
        );
        assert!(resolve(&Toolchain::unknown(), &Attribute::NoInline).is_empty());
    }

    #[test]
    fn hidden_visibility_per_family() {
        assert_eq!(
            resolve(&Toolchain::clang(14, 0), &Attribute::HiddenVisibility).to_string(),
            "__attribute__((__visibility__(\"hidden\")))"
        );
        assert!(resolve(&Toolchain::msvc(19, 29), &Attribute::HiddenVisibility).is_empty());
    }

    #[test]
    fn weak_symbol_gated_on_build_flag() {
        let mut gcc = Toolchain::gcc(12, 2);
        assert_eq!(
            resolve(&gcc, &Attribute::WeakSymbol).to_string(),
            "__attribute__((__weak__))"
        );
        gcc.weak_symbols = false;
        assert!(resolve(&gcc, &Attribute::WeakSymbol).is_empty());

        // The flag gates every family the same way.
        let mut clang = Toolchain::clang(14, 0);
        clang.weak_symbols = false;
        assert!(resolve(&clang, &Attribute::WeakSymbol).is_empty());
    }

    #[test]
    fn weak_symbol_if_supported_gated_on_probe() {
        let gcc = Toolchain::gcc(12, 2);
        assert_eq!(
            resolve(&gcc, &Attribute::WeakSymbolIfSupported).to_string(),
            "__attribute__((__weak__))"
        );
        // MSVC exposes no attribute facility, so the probe answers false.
        assert!(resolve(&Toolchain::msvc(19, 29), &Attribute::WeakSymbolIfSupported).is_empty());
    }

    #[test]
    fn name_resolvable_gated_on_marker() {
        let tc = Toolchain::clang(14, 0);
        assert!(resolve(&tc, &Attribute::NameResolvable).is_empty());
        let tc = tc.with_marker("roar");
        assert_eq!(
            resolve(&tc, &Attribute::NameResolvable).to_string(),
            "__attribute__((roar_resolvable_by_name))"
        );
    }

    #[test]
    fn msvc_declspec_passthrough() {
        let attr = Attribute::MsvcDeclspec("dllexport".into());
        assert_eq!(
            resolve(&Toolchain::msvc(19, 29), &attr).to_string(),
            "__declspec(dllexport)"
        );
        assert!(resolve(&Toolchain::gcc(12, 2), &attr).is_empty());
        assert!(resolve(&Toolchain::unknown(), &attr).is_empty());
    }

    #[test]
    fn suppression_inactive_sanitizer_is_empty_everywhere() {
        let attr = Attribute::SuppressSanitizer(Sanitizer::Address);
        assert!(resolve(&Toolchain::gcc(12, 2), &attr).is_empty());
        assert!(resolve(&Toolchain::clang(14, 0), &attr).is_empty());
        assert!(resolve(&Toolchain::msvc(19, 29), &attr).is_empty());
        assert!(resolve(&Toolchain::unknown(), &attr).is_empty());
    }

    #[test]
    fn suppression_active_address_gcc() {
        let tc = Toolchain::gcc(12, 2).with_marker("__SANITIZE_ADDRESS__");
        assert_eq!(
            resolve(&tc, &Attribute::SuppressSanitizer(Sanitizer::Address)).to_string(),
            "__attribute__((__no_address_safety_analysis__, __noinline__))"
        );
    }

    #[test]
    fn suppression_active_address_msvc() {
        let tc = Toolchain::msvc(19, 29).with_marker("__SANITIZE_ADDRESS__");
        assert_eq!(
            resolve(&tc, &Attribute::SuppressSanitizer(Sanitizer::Address)).to_string(),
            "__declspec(no_sanitize_address)"
        );
    }

    #[test]
    fn suppression_thread_memory_dataflow() {
        let tc = Toolchain::clang(14, 0)
            .with_feature("thread_sanitizer")
            .with_feature("memory_sanitizer")
            .with_feature("dataflow_sanitizer");
        assert_eq!(
            resolve(&tc, &Attribute::SuppressSanitizer(Sanitizer::Thread)).to_string(),
            "__attribute__((no_sanitize_thread, noinline))"
        );
        assert_eq!(
            resolve(&tc, &Attribute::SuppressSanitizer(Sanitizer::Memory)).to_string(),
            "__attribute__((no_sanitize_memory, noinline))"
        );
        assert_eq!(
            resolve(&tc, &Attribute::SuppressSanitizer(Sanitizer::Dataflow)).to_string(),
            "__attribute__((no_sanitize_dataflow, noinline))"
        );
        // No Microsoft ABI equivalent for these kinds.
        let msvc = Toolchain::msvc(19, 29).with_marker("__SANITIZE_THREAD__");
        assert!(resolve(&msvc, &Attribute::SuppressSanitizer(Sanitizer::Thread)).is_empty());
    }

    #[test]
    fn suppression_undefined_behavior() {
        let tc = Toolchain::gcc(12, 2).with_marker("__SANITIZER_UNDEFINED__");
        assert_eq!(
            resolve(
                &tc,
                &Attribute::SuppressSanitizer(Sanitizer::UndefinedBehavior)
            )
            .to_string(),
            "__attribute__((no_sanitize(\"undefined\")))"
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let tc = Toolchain::clang(14, 0).with_feature("address_sanitizer");
        for attribute in Attribute::nameable() {
            let first = resolve(&tc, &attribute);
            let second = resolve(&tc, &attribute);
            assert_eq!(first, second, "{attribute} resolved differently");
        }
    }

    #[test]
    fn names_round_trip() {
        for attribute in Attribute::nameable() {
            let parsed: Attribute = attribute.to_string().parse().unwrap();
            assert_eq!(parsed, attribute);
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "always-outline".parse::<Attribute>().unwrap_err();
        assert!(err.to_string().contains("always-outline"));
    }
}
