//! Per-family directive dialects.
//!
//! Each toolchain family implements the same resolution interface over its
//! own directive tables. Families never share tables: resolution is a
//! single dispatch on the active family, and every entry falls back to the
//! empty fragment independently, never across families.
//!
//! The dialects assume the family-independent availability gates
//! (weak-symbol flag, sanitizer activity, vendor markers) have already
//! been applied by [`crate::synthesis::resolve`].

use veneer_toolchain::{Family, Sanitizer, Toolchain};

use crate::fragment::Fragment;
use crate::synthesis::Attribute;

/// A diagnostic-engine operation, before family dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticOp<'a> {
    /// Save the current diagnostic state.
    Push,
    /// Restore the previously saved diagnostic state.
    Pop,
    /// Silence the named diagnostic.
    Disable(&'a str),
    /// Restore the named diagnostic to warning severity.
    Enable(&'a str),
    /// Promote the named diagnostic to an error.
    PromoteToError(&'a str),
    /// Silence a numbered Microsoft ABI diagnostic.
    MsvcDisable(u32),
}

/// The capability-resolution interface one toolchain family implements.
pub trait Dialect {
    /// The family's directive for a semantic annotation, or the empty
    /// fragment.
    fn attribute(&self, toolchain: &Toolchain, attribute: &Attribute) -> Fragment;

    /// The family's syntax for a diagnostic operation, or the empty
    /// fragment.
    fn diagnostic(&self, op: &DiagnosticOp<'_>) -> Fragment;
}

/// Select the dialect for a family.
pub fn dialect_for(family: Family) -> &'static dyn Dialect {
    match family {
        Family::GnuCompatible => &GnuDialect,
        Family::ClangLike => &ClangDialect,
        Family::MicrosoftAbi => &MsvcDialect,
        Family::Other => &NullDialect,
    }
}

/// GNU-compatible compilers that are not Clang.
pub struct GnuDialect;

/// Clang and Clang-derived compilers.
pub struct ClangDialect;

/// Compilers implementing the Microsoft ABI.
pub struct MsvcDialect;

/// Unrecognized toolchains: everything resolves to the portable minimum.
pub struct NullDialect;

impl Dialect for GnuDialect {
    fn attribute(&self, _toolchain: &Toolchain, attribute: &Attribute) -> Fragment {
        match attribute {
            Attribute::Export => Fragment::part("__attribute__((__visibility__(\"default\")))"),
            Attribute::AlwaysInline => Fragment::part("inline __attribute__((__always_inline__))"),
            Attribute::NoInline => Fragment::part("__attribute__((__noinline__))"),
            Attribute::HiddenVisibility => {
                Fragment::part("__attribute__((__visibility__(\"hidden\")))")
            }
            Attribute::WeakSymbol | Attribute::WeakSymbolIfSupported => {
                Fragment::part("__attribute__((__weak__))")
            }
            Attribute::NameResolvable => Fragment::part("__attribute__((roar_resolvable_by_name))"),
            Attribute::MsvcDeclspec(_) => Fragment::empty(),
            Attribute::SuppressSanitizer(kind) => match kind {
                Sanitizer::Address => {
                    Fragment::part("__attribute__((__no_address_safety_analysis__, __noinline__))")
                }
                Sanitizer::Thread => Fragment::part("__attribute__((no_sanitize_thread, noinline))"),
                Sanitizer::Memory => Fragment::part("__attribute__((no_sanitize_memory, noinline))"),
                Sanitizer::Dataflow => {
                    Fragment::part("__attribute__((no_sanitize_dataflow, noinline))")
                }
                Sanitizer::UndefinedBehavior => {
                    Fragment::part("__attribute__((no_sanitize(\"undefined\")))")
                }
            },
        }
    }

    fn diagnostic(&self, op: &DiagnosticOp<'_>) -> Fragment {
        gnu_style_diagnostic(op)
    }
}

impl Dialect for ClangDialect {
    fn attribute(&self, toolchain: &Toolchain, attribute: &Attribute) -> Fragment {
        match attribute {
            Attribute::Export => Fragment::part("__attribute__((__visibility__(\"default\")))"),
            Attribute::AlwaysInline => Fragment::part("inline __attribute__((__always_inline__))"),
            Attribute::NoInline => Fragment::part("__attribute__((__noinline__))"),
            Attribute::HiddenVisibility => {
                Fragment::part("__attribute__((__visibility__(\"hidden\")))")
            }
            Attribute::WeakSymbol | Attribute::WeakSymbolIfSupported => {
                Fragment::part("__attribute__((__weak__))")
            }
            Attribute::NameResolvable => Fragment::part("__attribute__((roar_resolvable_by_name))"),
            Attribute::MsvcDeclspec(_) => Fragment::empty(),
            Attribute::SuppressSanitizer(kind) => match kind {
                // Address suppression interacts badly with inlining, so
                // every form also forbids it. The attribute facility
                // decides which form this toolchain version accepts,
                // newest form first.
                Sanitizer::Address => {
                    let probes = &toolchain.probes;
                    if probes.has_attribute("__no_sanitize__") {
                        let mut fragment = Fragment::part(
                            "__attribute__((__no_sanitize__(\"address\"), __noinline__))",
                        );
                        fragment.push(
                            "__attribute__((__no_sanitize__(\"hwaddress\"), __noinline__))",
                        );
                        fragment
                    } else if probes.has_attribute("__no_address_safety_analysis__") {
                        Fragment::part(
                            "__attribute__((__no_address_safety_analysis__, __noinline__))",
                        )
                    } else if probes.has_attribute("__no_sanitize_address__") {
                        Fragment::part("__attribute__((__no_sanitize_address__, __noinline__))")
                    } else {
                        Fragment::empty()
                    }
                }
                Sanitizer::Thread => Fragment::part("__attribute__((no_sanitize_thread, noinline))"),
                Sanitizer::Memory => Fragment::part("__attribute__((no_sanitize_memory, noinline))"),
                Sanitizer::Dataflow => {
                    Fragment::part("__attribute__((no_sanitize_dataflow, noinline))")
                }
                Sanitizer::UndefinedBehavior => {
                    Fragment::part("__attribute__((no_sanitize(\"undefined\")))")
                }
            },
        }
    }

    fn diagnostic(&self, op: &DiagnosticOp<'_>) -> Fragment {
        gnu_style_diagnostic(op)
    }
}

impl Dialect for MsvcDialect {
    fn attribute(&self, _toolchain: &Toolchain, attribute: &Attribute) -> Fragment {
        match attribute {
            Attribute::Export => Fragment::empty(),
            Attribute::AlwaysInline => Fragment::part("__forceinline"),
            Attribute::NoInline => Fragment::part("__declspec(noinline)"),
            Attribute::HiddenVisibility => Fragment::empty(),
            // The build-wide flag never holds for the Microsoft ABI.
            Attribute::WeakSymbol => Fragment::empty(),
            Attribute::WeakSymbolIfSupported => Fragment::part("__attribute__((__weak__))"),
            Attribute::NameResolvable => Fragment::part("__attribute__((roar_resolvable_by_name))"),
            Attribute::MsvcDeclspec(args) => Fragment::part(format!("__declspec({args})")),
            Attribute::SuppressSanitizer(kind) => match kind {
                Sanitizer::Address => Fragment::part("__declspec(no_sanitize_address)"),
                _ => Fragment::empty(),
            },
        }
    }

    fn diagnostic(&self, op: &DiagnosticOp<'_>) -> Fragment {
        match op {
            DiagnosticOp::Push => Fragment::part("__pragma(warning(push))"),
            DiagnosticOp::Pop => Fragment::part("__pragma(warning(pop))"),
            DiagnosticOp::MsvcDisable(number) => {
                Fragment::part(format!("__pragma(warning(disable : {number}))"))
            }
            DiagnosticOp::Disable(_)
            | DiagnosticOp::Enable(_)
            | DiagnosticOp::PromoteToError(_) => Fragment::empty(),
        }
    }
}

impl Dialect for NullDialect {
    fn attribute(&self, _toolchain: &Toolchain, attribute: &Attribute) -> Fragment {
        match attribute {
            // The one spelling every toolchain accepts.
            Attribute::AlwaysInline => Fragment::part("inline"),
            Attribute::WeakSymbolIfSupported => Fragment::part("__attribute__((__weak__))"),
            Attribute::NameResolvable => Fragment::part("__attribute__((roar_resolvable_by_name))"),
            _ => Fragment::empty(),
        }
    }

    fn diagnostic(&self, _op: &DiagnosticOp<'_>) -> Fragment {
        Fragment::empty()
    }
}

/// The pragma table shared in shape (not in dispatch) by the GNU-style
/// diagnostic engines. The diagnostic name is stringified exactly once.
fn gnu_style_diagnostic(op: &DiagnosticOp<'_>) -> Fragment {
    match op {
        DiagnosticOp::Push => Fragment::part("_Pragma(\"GCC diagnostic push\")"),
        DiagnosticOp::Pop => Fragment::part("_Pragma(\"GCC diagnostic pop\")"),
        DiagnosticOp::Disable(name) => {
            Fragment::part(format!(r#"_Pragma("GCC diagnostic ignored \"{name}\"")"#))
        }
        DiagnosticOp::Enable(name) => {
            Fragment::part(format!(r#"_Pragma("GCC diagnostic warning \"{name}\"")"#))
        }
        DiagnosticOp::PromoteToError(name) => {
            Fragment::part(format!(r#"_Pragma("GCC diagnostic error \"{name}\"")"#))
        }
        DiagnosticOp::MsvcDisable(_) => Fragment::empty(),
    }
}
