//! `veneer describe` — toolchain profile details.

use anyhow::{bail, Result};
use veneer_toolchain::{toolchain_to_toml, Sanitizer, Toolchain};

use crate::profiles::resolve_toolchain;

/// Describe a toolchain profile in the requested format.
pub fn run(toolchain_arg: &str, format: Option<&str>) -> Result<()> {
    let toolchain = resolve_toolchain(toolchain_arg)?;

    match format {
        None | Some("human") => describe_human(&toolchain),
        Some("toml") => {
            print!("{}", toolchain_to_toml(&toolchain)?);
            Ok(())
        }
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(&toolchain)?);
            Ok(())
        }
        Some(other) => bail!("unknown format: '{other}' (expected human, toml, or json)"),
    }
}

fn describe_human(toolchain: &Toolchain) -> Result<()> {
    println!("=== Toolchain: {} ===", toolchain.name);
    println!("Identity: {}", toolchain.id);
    if let Some(abi) = toolchain.microsoft_abi_version() {
        println!("Microsoft ABI version: {abi}");
    }
    println!();

    println!("--- Probe Facilities ---");
    print_facility("builtins", &toolchain.probes.builtins);
    print_facility("features", &toolchain.probes.features);
    print_facility("warnings", &toolchain.probes.warnings);
    print_facility("attributes", &toolchain.probes.attributes);
    println!();

    println!("--- Markers ---");
    if toolchain.markers.is_empty() {
        println!("  (none)");
    } else {
        for marker in &toolchain.markers {
            println!("  {marker}");
        }
    }
    println!();

    println!("--- Availability Flags ---");
    println!("  weak symbols:         {}", toolchain.weak_symbols);
    println!("  shadow warning group: {}", toolchain.shadow_warning_group);
    println!();

    println!("--- Sanitizers ---");
    for kind in Sanitizer::ALL {
        println!(
            "  {kind:<20} {}",
            if toolchain.sanitizer_active(kind) {
                "active"
            } else {
                "inactive"
            }
        );
    }
    println!(
        "  {:<20} {}",
        "any",
        if toolchain.any_sanitizer_active() {
            "active"
        } else {
            "inactive"
        }
    );
    Ok(())
}

fn print_facility(name: &str, facility: &Option<std::collections::BTreeSet<String>>) {
    match facility {
        None => println!("  {name:<12} absent"),
        Some(set) => println!("  {name:<12} present ({} names)", set.len()),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn describe_builtin_runs() {
        super::run("clang", None).unwrap();
        super::run("msvc", Some("toml")).unwrap();
        super::run("gcc", Some("json")).unwrap();
    }

    #[test]
    fn describe_rejects_bad_format() {
        assert!(super::run("clang", Some("yaml")).is_err());
    }

    #[test]
    fn describe_rejects_unknown_toolchain() {
        assert!(super::run("tcc", None).is_err());
    }
}
