//! `veneer doctor` — capability report.

use anyhow::Result;
use veneer_attrs::{build, Composite};
use veneer_toolchain::{Sanitizer, Toolchain};

use crate::profiles::{builtin, builtin_toolchains, resolve_toolchain};

/// Print capability reports: one profile, or all built-ins.
pub fn run(toolchain_arg: Option<&str>) -> Result<()> {
    println!("=== Veneer Doctor ===");
    println!();
    println!("Veneer version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    match toolchain_arg {
        Some(arg) => report(&resolve_toolchain(arg)?),
        None => {
            for (name, _) in builtin_toolchains() {
                // Names come straight from the builtin table.
                report(&builtin(name).unwrap());
                println!();
            }
        }
    }
    Ok(())
}

fn report(toolchain: &Toolchain) {
    println!("--- {} ---", toolchain.name);
    println!("  identity:             {}", toolchain.id);
    println!(
        "  weak symbols:         {}",
        available(toolchain.weak_symbols)
    );
    println!(
        "  shadow warning group: {}",
        available(toolchain.shadow_warning_group)
    );
    for kind in Sanitizer::ALL {
        println!(
            "  {:<21} {}",
            format!("{kind} sanitizer:"),
            if toolchain.sanitizer_active(kind) {
                "active"
            } else {
                "inactive"
            }
        );
    }
    println!(
        "  any sanitizer:        {}",
        if toolchain.any_sanitizer_active() {
            "active"
        } else {
            "inactive"
        }
    );
    let erase = build(toolchain, Composite::Erase);
    println!(
        "  erase expands to:     {}",
        if erase.is_empty() {
            "(nothing)".to_string()
        } else {
            erase.to_string()
        }
    );
}

fn available(flag: bool) -> &'static str {
    if flag {
        "available"
    } else {
        "not available"
    }
}
