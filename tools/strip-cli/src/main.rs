//! shader-strip - build-time shader variant stripping tool
//!
//! # Commands
//!
//! - `shader-strip strip` - Filter a compiled-variant dump through the
//!   configured policy chain
//! - `shader-strip merge` - Consolidate whitelist collections into one
//!   document
//! - `shader-strip inspect` - Print a summary of whitelist collections
//!
//! # Usage
//!
//! In a project directory with strip.toml:
//! ```bash
//! # Strip a variant dump produced by the shader compiler
//! shader-strip strip --variants build/variants.json
//!
//! # Merge recorded collections into a single whitelist
//! shader-strip merge -o merged.shadervariants Recordings/
//!
//! # See what a collection contains
//! shader-strip inspect Recordings/gameplay.shadervariants
//! ```
//!
//! # Manifest (strip.toml)
//!
//! ```toml
//! [session]
//! enabled = true
//! deep_logs = false
//! log_dir = "Logs/stripping"
//!
//! [whitelist]
//! collections = ["Recordings"]
//! allow_vr_variants = true
//! strip_hidden = false
//! ignore_shaders = [{ pattern = "Custom/Terrain", mode = "prefix" }]
//! ignore_pass_types = [8]
//!
//! [path]
//! blacklist = [{ pattern = "Assets/Legacy", mode = "prefix" }]
//!
//! [platform]
//! platforms = ["gles3"]
//! whitelist = false
//! ```

mod documents;
mod dump;
mod inspect;
mod manifest;
mod merge;
mod strip;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// shader-strip - build-time shader variant stripping tool
#[derive(Parser)]
#[command(name = "shader-strip")]
#[command(about = "Strip unused shader variants from build output")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a compiled-variant dump through the configured policies
    Strip(strip::StripArgs),

    /// Consolidate whitelist collections into one document
    Merge(merge::MergeArgs),

    /// Print a summary of whitelist collections
    Inspect(inspect::InspectArgs),
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Strip(args) => strip::execute(args),
        Commands::Merge(args) => merge::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
    }
}
