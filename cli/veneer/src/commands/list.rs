//! `veneer list` — built-in profiles, attributes, and composites.

use anyhow::Result;
use veneer_attrs::{Attribute, Composite};

use crate::profiles::builtin_toolchains;

/// List everything the other commands accept by name.
pub fn run() -> Result<()> {
    println!("Built-in toolchain profiles:");
    println!();
    for (name, description) in builtin_toolchains() {
        println!("  {name:<12} {description}");
    }
    println!();

    println!("Attributes:");
    println!();
    for attribute in Attribute::nameable() {
        println!("  {attribute}");
    }
    println!();

    println!("Composites:");
    println!();
    for composite in Composite::ALL {
        println!("  {composite}");
    }
    println!();
    println!("Use 'veneer resolve <attribute> --toolchain <name>' to see directives.");
    Ok(())
}
