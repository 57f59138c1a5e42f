//! Built-in toolchain profiles and profile resolution for the CLI.

use std::path::Path;

use anyhow::{bail, Context, Result};
use veneer_toolchain::{load_toolchain_toml, Toolchain};

/// The built-in profiles, as (name, description) pairs.
pub fn builtin_toolchains() -> Vec<(&'static str, &'static str)> {
    vec![
        ("gcc", "GNU-compatible, 12.2, weak symbols and shadow group"),
        ("clang", "Clang-like, 14.0, full probe facilities"),
        ("msvc", "Microsoft ABI, 19.29, no probe facilities"),
        ("unknown", "Unrecognized toolchain, no capabilities"),
    ]
}

/// Resolve a built-in profile name to its profile.
pub fn builtin(name: &str) -> Option<Toolchain> {
    match name {
        "gcc" => Some(Toolchain::gcc(12, 2)),
        "clang" => Some(Toolchain::clang(14, 0)),
        "msvc" => Some(Toolchain::msvc(19, 29)),
        "unknown" => Some(Toolchain::unknown()),
        _ => None,
    }
}

/// Resolve a profile argument: a built-in name, or a path to a
/// `.toolchain.toml` file.
pub fn resolve_toolchain(arg: &str) -> Result<Toolchain> {
    if let Some(toolchain) = builtin(arg) {
        return Ok(toolchain);
    }
    let path = Path::new(arg);
    if path.extension().map_or(false, |ext| ext == "toml") {
        return load_toolchain_toml(path)
            .with_context(|| format!("loading toolchain profile '{arg}'"));
    }
    bail!("unknown toolchain: '{arg}'. Use 'veneer list' or pass a .toolchain.toml path.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use veneer_toolchain::{generate_template, Family};

    #[test]
    fn builtins_resolve() {
        for (name, _) in builtin_toolchains() {
            assert!(resolve_toolchain(name).is_ok(), "builtin '{name}' missing");
        }
    }

    #[test]
    fn builtin_families() {
        assert_eq!(builtin("gcc").unwrap().id.family, Family::GnuCompatible);
        assert_eq!(builtin("clang").unwrap().id.family, Family::ClangLike);
        assert_eq!(builtin("msvc").unwrap().id.family, Family::MicrosoftAbi);
        assert_eq!(builtin("unknown").unwrap().id.family, Family::Other);
    }

    #[test]
    fn unknown_name_fails() {
        assert!(resolve_toolchain("icc").is_err());
    }

    #[test]
    fn file_path_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cross.toolchain.toml");
        std::fs::write(&path, generate_template("cross").unwrap()).unwrap();
        let tc = resolve_toolchain(path.to_str().unwrap()).unwrap();
        assert_eq!(tc.name, "cross");
    }
}
