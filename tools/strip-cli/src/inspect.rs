//! Inspect command - print a summary of whitelist collections

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use strip_svc::{ShaderId, Whitelist, builtin_shader_name, parse_collection};

use crate::documents::collect_documents;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// Input documents: files, or directories searched recursively
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let documents = collect_documents(&args.inputs)?;
    if documents.is_empty() {
        anyhow::bail!("No whitelist documents found under the given inputs");
    }

    for path in &documents {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read whitelist: {}", path.display()))?;
        let whitelist = parse_collection(&text, &[])
            .with_context(|| format!("Failed to parse whitelist: {}", path.display()))?;
        println!(
            "{}: {} shaders, {} variants",
            path.display(),
            whitelist.catalog.shader_count(),
            whitelist.catalog.variant_count()
        );
        print_whitelist(&whitelist);
    }
    Ok(())
}

fn print_whitelist(whitelist: &Whitelist) {
    let mut ids: Vec<&ShaderId> = whitelist.catalog.iter().map(|(id, _)| id).collect();
    ids.sort();

    for id in ids {
        println!("  Shader: {}", display_name(id));
        let entry = whitelist.catalog.get(id).expect("id taken from catalog");
        let mut passes: Vec<_> = entry.passes().collect();
        passes.sort_by_key(|(pass, _)| *pass);
        for (pass, variants) in passes {
            println!("    Pass: {pass}");
            for (i, keywords) in variants.iter().enumerate() {
                println!("      Variant [{i}]: {keywords}");
            }
        }
    }

    let mut unconstrained: Vec<ShaderId> = whitelist.no_keywords.iter().collect();
    unconstrained.sort();
    for id in &unconstrained {
        println!("  Shader: {} <whitelisted, no keyword constraint>", display_name(id));
    }
}

fn display_name(id: &ShaderId) -> String {
    match id {
        ShaderId::Builtin(file_id) => match builtin_shader_name(*file_id) {
            Some(name) => format!("{id} ({name})"),
            None => id.to_string(),
        },
        ShaderId::Asset(_) => id.to_string(),
    }
}
