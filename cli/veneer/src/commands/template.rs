//! `veneer template` — `.toolchain.toml` scaffolding.

use std::path::Path;

use anyhow::{Context, Result};
use veneer_toolchain::generate_template;

/// Generate a toolchain profile template, to a file or stdout.
pub fn run(name: &str, out: Option<&Path>) -> Result<()> {
    let template = generate_template(name)?;
    match out {
        Some(path) => {
            std::fs::write(path, &template)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{template}"),
    }
    Ok(())
}
