//! Composite annotations.
//!
//! A [`Bundle`] is an ordered list of semantic annotations plus
//! toolchain-specific override rules, materialized into one fragment.
//! Member order is concatenation order. Overrides come in two forms:
//! exclusion rules that drop a member under a matching family, and whole-
//! family overrides that replace the bundle outright. A bundle may also
//! carry an availability gate; an unavailable bundle resolves to nothing
//! in full, never to a subset of its members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use veneer_toolchain::{Family, Sanitizer, Toolchain};

use crate::error::AttrError;
use crate::fragment::Fragment;
use crate::synthesis::{resolve, Attribute};

/// Drops one member annotation when the active family matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// The family the rule applies to.
    pub family: Family,
    /// A family the rule explicitly does not apply to, for rules written
    /// against compatibility classes rather than single families.
    pub excluding: Option<Family>,
    /// The member annotation to drop.
    pub drop: Attribute,
}

impl ExclusionRule {
    fn applies_to(&self, family: Family) -> bool {
        family == self.family && Some(family) != self.excluding
    }
}

/// An ordered bundle of annotations with override rules.
#[derive(Debug, Clone)]
pub struct Bundle {
    name: String,
    members: Vec<Attribute>,
    exclusions: Vec<ExclusionRule>,
    overrides: Vec<(Family, Fragment)>,
    gate: Option<bool>,
}

impl Bundle {
    /// Start an empty bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            exclusions: Vec::new(),
            overrides: Vec::new(),
            gate: None,
        }
    }

    /// Append a member annotation. Declaration order is concatenation
    /// order.
    pub fn member(mut self, attribute: Attribute) -> Self {
        self.members.push(attribute);
        self
    }

    /// Add an exclusion rule, applied before concatenation.
    pub fn exclude(mut self, rule: ExclusionRule) -> Self {
        self.exclusions.push(rule);
        self
    }

    /// Replace the whole bundle with a fixed fragment under one family.
    pub fn override_family(mut self, family: Family, fragment: Fragment) -> Self {
        self.overrides.push((family, fragment));
        self
    }

    /// Gate the bundle on an externally supplied availability flag. When
    /// the flag is false the bundle resolves to nothing at all.
    pub fn gated(mut self, available: bool) -> Self {
        self.gate = Some(available);
        self
    }

    /// The bundle's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materialize the bundle against a toolchain.
    pub fn resolve(&self, toolchain: &Toolchain) -> Fragment {
        if self.gate == Some(false) {
            return Fragment::empty();
        }
        let family = toolchain.id.family;
        if let Some((_, fragment)) = self.overrides.iter().find(|(f, _)| *f == family) {
            return fragment.clone();
        }
        Fragment::concat(
            self.members
                .iter()
                .filter(|member| {
                    !self
                        .exclusions
                        .iter()
                        .any(|rule| rule.applies_to(family) && rule.drop == **member)
                })
                .map(|member| resolve(toolchain, member)),
        )
    }
}

/// The predefined composite annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Composite {
    /// Erase the function from build artifacts: force-inline every call
    /// site and hide the symbol.
    Erase,
    /// Hide the symbol without forcing inlining.
    EraseNoInline,
    /// Erase, except that GNU-compatible non-Clang compilers drop the
    /// visibility member: applying hidden visibility to a function
    /// already restricted by anonymous scoping trips a spurious
    /// attribute diagnostic there.
    EraseHackGnuOnly,
    /// Erase, except under the Microsoft ABI, where force-inlining a
    /// function containing structured exception handling is unsafe; the
    /// whole bundle collapses to the plain inline specifier there.
    EraseTryCatchSafe,
    /// Suppress every instrumentation kind that has a function-level
    /// suppression form, in a fixed order.
    SuppressAllSanitizers,
}

impl Composite {
    /// All predefined composites, in a fixed order.
    pub const ALL: [Composite; 5] = [
        Composite::Erase,
        Composite::EraseNoInline,
        Composite::EraseHackGnuOnly,
        Composite::EraseTryCatchSafe,
        Composite::SuppressAllSanitizers,
    ];

    /// The bundle definition behind this composite.
    pub fn bundle(&self) -> Bundle {
        match self {
            Composite::Erase => Bundle::new("erase")
                .member(Attribute::AlwaysInline)
                .member(Attribute::HiddenVisibility),
            Composite::EraseNoInline => Bundle::new("erase-no-inline")
                .member(Attribute::NoInline)
                .member(Attribute::HiddenVisibility),
            Composite::EraseHackGnuOnly => Bundle::new("erase-hack-gnu-only")
                .member(Attribute::AlwaysInline)
                .member(Attribute::HiddenVisibility)
                .exclude(ExclusionRule {
                    family: Family::GnuCompatible,
                    excluding: Some(Family::ClangLike),
                    drop: Attribute::HiddenVisibility,
                }),
            Composite::EraseTryCatchSafe => Bundle::new("erase-trycatch-safe")
                .member(Attribute::AlwaysInline)
                .member(Attribute::HiddenVisibility)
                .override_family(Family::MicrosoftAbi, Fragment::part("inline")),
            Composite::SuppressAllSanitizers => Bundle::new("suppress-all-sanitizers")
                .member(Attribute::SuppressSanitizer(Sanitizer::Address))
                .member(Attribute::SuppressSanitizer(Sanitizer::Thread))
                .member(Attribute::SuppressSanitizer(Sanitizer::Memory))
                .member(Attribute::SuppressSanitizer(Sanitizer::UndefinedBehavior)),
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bundle().name())
    }
}

impl FromStr for Composite {
    type Err = AttrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Composite::ALL
            .into_iter()
            .find(|c| c.bundle().name() == s)
            .ok_or_else(|| AttrError::UnknownComposite {
                name: s.to_string(),
            })
    }
}

/// Materialize a predefined composite against a toolchain.
pub fn build(toolchain: &Toolchain, composite: Composite) -> Fragment {
    composite.bundle().resolve(toolchain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erase_is_inline_plus_hidden() {
        let tc = Toolchain::clang(14, 0);
        let fragment = build(&tc, Composite::Erase);
        assert_eq!(
            fragment.to_string(),
            "inline __attribute__((__always_inline__)) \
             __attribute__((__visibility__(\"hidden\")))"
        );
    }

    #[test]
    fn erase_on_msvc_skips_hidden() {
        // MSVC has no hidden-visibility directive; only the inline member
        // survives resolution.
        let fragment = build(&Toolchain::msvc(19, 29), Composite::Erase);
        assert_eq!(fragment.to_string(), "__forceinline");
    }

    #[test]
    fn erase_no_inline() {
        let tc = Toolchain::gcc(12, 2);
        let fragment = build(&tc, Composite::EraseNoInline);
        assert_eq!(
            fragment.to_string(),
            "__attribute__((__noinline__)) __attribute__((__visibility__(\"hidden\")))"
        );
    }

    #[test]
    fn erase_hack_drops_visibility_on_gnu_only() {
        let gcc = Toolchain::gcc(12, 2);
        assert_eq!(
            build(&gcc, Composite::EraseHackGnuOnly).to_string(),
            "inline __attribute__((__always_inline__))"
        );

        // Every other family gets the full erase bundle.
        for tc in [
            Toolchain::clang(14, 0),
            Toolchain::msvc(19, 29),
            Toolchain::unknown(),
        ] {
            assert_eq!(
                build(&tc, Composite::EraseHackGnuOnly),
                build(&tc, Composite::Erase),
                "{} diverged from erase",
                tc.name
            );
        }
    }

    #[test]
    fn erase_trycatch_collapses_on_msvc() {
        // Regardless of any other flag on the profile.
        let tc = Toolchain::msvc(19, 29)
            .with_marker("__SANITIZE_ADDRESS__")
            .with_feature("address_sanitizer");
        assert_eq!(build(&tc, Composite::EraseTryCatchSafe).to_string(), "inline");

        for tc in [
            Toolchain::gcc(12, 2),
            Toolchain::clang(14, 0),
            Toolchain::unknown(),
        ] {
            assert_eq!(
                build(&tc, Composite::EraseTryCatchSafe),
                build(&tc, Composite::Erase),
                "{} diverged from erase",
                tc.name
            );
        }
    }

    #[test]
    fn suppress_all_orders_members_by_declaration() {
        let tc = Toolchain::clang(14, 0)
            .with_feature("address_sanitizer")
            .with_feature("thread_sanitizer")
            .with_feature("memory_sanitizer")
            .with_feature("undefined_behavior_sanitizer");
        let fragment = build(&tc, Composite::SuppressAllSanitizers);
        let text = fragment.to_string();
        let address = text.find("__no_sanitize__(\"address\")").unwrap();
        let thread = text.find("no_sanitize_thread").unwrap();
        let memory = text.find("no_sanitize_memory").unwrap();
        let undefined = text.find("no_sanitize(\"undefined\")").unwrap();
        assert!(address < thread && thread < memory && memory < undefined);
    }

    #[test]
    fn suppress_all_with_nothing_active_is_empty() {
        let fragment = build(&Toolchain::clang(14, 0), Composite::SuppressAllSanitizers);
        assert!(fragment.is_empty());
    }

    #[test]
    fn gated_bundle_is_all_or_nothing() {
        let tc = Toolchain::clang(14, 0);
        let bundle = Bundle::new("gated-erase")
            .member(Attribute::AlwaysInline)
            .member(Attribute::HiddenVisibility)
            .gated(false);
        // Not a prefix, not a subset: nothing.
        assert!(bundle.resolve(&tc).is_empty());

        let bundle = Bundle::new("gated-erase")
            .member(Attribute::AlwaysInline)
            .member(Attribute::HiddenVisibility)
            .gated(true);
        assert_eq!(bundle.resolve(&tc), build(&tc, Composite::Erase));
    }

    #[test]
    fn exclusion_respects_excluding_family() {
        let rule = ExclusionRule {
            family: Family::GnuCompatible,
            excluding: Some(Family::ClangLike),
            drop: Attribute::HiddenVisibility,
        };
        assert!(rule.applies_to(Family::GnuCompatible));
        assert!(!rule.applies_to(Family::ClangLike));
        assert!(!rule.applies_to(Family::MicrosoftAbi));
    }

    #[test]
    fn build_is_idempotent() {
        let tc = Toolchain::gcc(12, 2).with_marker("__SANITIZE_ADDRESS__");
        for composite in Composite::ALL {
            assert_eq!(
                build(&tc, composite),
                build(&tc, composite),
                "{composite} resolved differently"
            );
        }
    }

    #[test]
    fn composite_names_round_trip() {
        for composite in Composite::ALL {
            let parsed: Composite = composite.to_string().parse().unwrap();
            assert_eq!(parsed, composite);
        }
        assert!("erase-everything".parse::<Composite>().is_err());
    }
}
