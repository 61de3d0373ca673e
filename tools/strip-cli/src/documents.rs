//! Whitelist document discovery and parsing

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;
use strip_svc::{Whitelist, parse_collection};
use walkdir::WalkDir;

/// File extension of whitelist documents.
pub const COLLECTION_EXT: &str = "shadervariants";

/// Expand files and directories into the list of whitelist documents.
///
/// Directories are searched recursively for `.shadervariants` files. The
/// result is sorted so runs are deterministic regardless of filesystem
/// order.
pub fn collect_documents(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input) {
                let entry = entry
                    .with_context(|| format!("Failed to scan directory: {}", input.display()))?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some(COLLECTION_EXT) {
                    documents.push(path.to_path_buf());
                }
            }
        } else if input.exists() {
            documents.push(input.clone());
        } else {
            anyhow::bail!("Whitelist input not found: {}", input.display());
        }
    }
    documents.sort();
    documents.dedup();
    Ok(documents)
}

/// Parse documents in parallel and union them into one whitelist.
///
/// Any single unparsable document fails the whole call; a broken
/// whitelist must abort the run rather than quietly shrink the catalog.
pub fn parse_documents(paths: &[PathBuf], excludes: &[String]) -> Result<Whitelist> {
    let parsed: Result<Vec<Whitelist>> = paths
        .par_iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read whitelist: {}", path.display()))?;
            parse_collection(&text, excludes)
                .with_context(|| format!("Failed to parse whitelist: {}", path.display()))
        })
        .collect();

    let mut whitelist = Whitelist::default();
    for parsed in parsed? {
        whitelist.merge(parsed);
    }
    debug!(
        "parsed {} documents into {} shaders / {} variants",
        paths.len(),
        whitelist.catalog.shader_count(),
        whitelist.catalog.variant_count()
    );
    Ok(whitelist)
}
