//! `veneer expand` — composite annotation to directive fragment.

use anyhow::Result;
use veneer_attrs::{build, Composite};

use crate::profiles::resolve_toolchain;

/// Print the directive fragment a composite expands to.
pub fn run(composite_arg: &str, toolchain_arg: &str) -> Result<()> {
    let composite: Composite = composite_arg.parse()?;
    let toolchain = resolve_toolchain(toolchain_arg)?;

    let fragment = build(&toolchain, composite);
    if fragment.is_empty() {
        println!("(empty — no directive on {})", toolchain.id);
    } else {
        println!("{fragment}");
    }
    Ok(())
}
