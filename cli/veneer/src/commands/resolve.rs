//! `veneer resolve` — attribute to directive fragment.

use anyhow::Result;
use veneer_attrs::{resolve, Attribute};

use crate::profiles::resolve_toolchain;

/// Print the directive fragment an attribute resolves to.
pub fn run(attribute_arg: &str, toolchain_arg: &str) -> Result<()> {
    let attribute: Attribute = attribute_arg.parse()?;
    let toolchain = resolve_toolchain(toolchain_arg)?;

    let fragment = resolve(&toolchain, &attribute);
    if fragment.is_empty() {
        println!("(empty — no directive on {})", toolchain.id);
    } else {
        println!("{fragment}");
    }
    Ok(())
}
