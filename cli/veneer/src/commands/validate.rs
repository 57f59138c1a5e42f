//! `veneer validate` — profile file validation.

use std::path::Path;

use anyhow::{bail, Result};
use veneer_toolchain::{load_toolchain_toml, validate_toolchain};

/// Load and validate a `.toolchain.toml` file, printing any issues.
pub fn run(path: &Path) -> Result<()> {
    let toolchain = load_toolchain_toml(path)?;
    match validate_toolchain(&toolchain) {
        Ok(()) => {
            println!("{}: OK", path.display());
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                println!("{}: {}: {}", path.display(), issue.severity, issue.message);
            }
            let errors = issues.iter().filter(|i| i.severity == "error").count();
            if errors > 0 {
                bail!("{errors} error(s) in {}", path.display());
            }
            Ok(())
        }
    }
}
