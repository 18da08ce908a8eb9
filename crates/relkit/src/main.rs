//! relkit CLI - build and release support utilities.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "relkit")]
#[command(about = "Build and release support utilities")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Propagate a new version across resource and assembly metadata files
    SetVersion {
        /// New version in major.minor.patch form
        version: String,

        /// Path to the target manifest
        #[arg(short, long, default_value = "version-targets.toml")]
        manifest: PathBuf,
    },

    /// Generate the HTML documentation site
    Docs {
        /// Directory containing the markdown pages
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory (recreated on every run)
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Path to the shared page template
        #[arg(long, default_value = "template.html")]
        template: PathBuf,

        /// Stylesheet copied into the output
        #[arg(long, default_value = "style.css")]
        stylesheet: PathBuf,

        /// License file copied into the output
        #[arg(long, default_value = "../LICENSE.txt")]
        license: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::SetVersion { version, manifest } => {
            commands::set_version::run(&version, &manifest)?;
        }
        Commands::Docs {
            source,
            output,
            template,
            stylesheet,
            license,
        } => {
            commands::docs::run(source, output, template, stylesheet, license)?;
        }
    }

    Ok(())
}
