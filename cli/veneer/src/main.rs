//! Veneer CLI — inspect toolchain profiles and the directives they
//! resolve to.

mod commands;
mod profiles;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "veneer", version, about = "Toolchain capability and directive inspection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in toolchain profiles, attributes, and composites
    List,
    /// Show a toolchain profile in detail
    Describe {
        /// Profile name or path to a .toolchain.toml file
        toolchain: String,
        /// Output format (default: human-readable, "toml" or "json")
        #[arg(long)]
        format: Option<String>,
    },
    /// Resolve a semantic attribute to its directive fragment
    Resolve {
        /// Attribute name (e.g., always-inline, suppress-address)
        attribute: String,
        /// Profile name or path to a .toolchain.toml file
        #[arg(long)]
        toolchain: String,
    },
    /// Expand a composite annotation to its directive fragment
    Expand {
        /// Composite name (e.g., erase, erase-trycatch-safe)
        composite: String,
        /// Profile name or path to a .toolchain.toml file
        #[arg(long)]
        toolchain: String,
    },
    /// Generate a .toolchain.toml template
    Template {
        /// Profile name
        name: String,
        /// Output file (default: stdout)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Report the capability flags of a toolchain profile
    Doctor {
        /// Profile name or path to a .toolchain.toml file (default: all
        /// built-in profiles)
        #[arg(long)]
        toolchain: Option<String>,
    },
    /// Validate a toolchain profile file
    Validate {
        /// Path to a .toolchain.toml file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List => commands::list::run(),
        Commands::Describe { toolchain, format } => {
            commands::describe::run(&toolchain, format.as_deref())
        }
        Commands::Resolve {
            attribute,
            toolchain,
        } => commands::resolve::run(&attribute, &toolchain),
        Commands::Expand {
            composite,
            toolchain,
        } => commands::expand::run(&composite, &toolchain),
        Commands::Template { name, out } => commands::template::run(&name, out.as_deref()),
        Commands::Doctor { toolchain } => commands::doctor::run(toolchain.as_deref()),
        Commands::Validate { path } => commands::validate::run(&path),
    }
}
