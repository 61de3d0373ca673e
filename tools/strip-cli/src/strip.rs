//! Strip command - filter a compiled-variant dump through the policy chain

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use strip_engine::{
    PathBlacklistPolicy, PlatformPolicy, SessionOptions, SessionReport, StripPolicy, StripSession,
    VariantWhitelistPolicy,
};

use crate::documents::{collect_documents, parse_documents};
use crate::dump::{DumpResolver, VariantDump};
use crate::manifest::StripManifest;

/// Arguments for the strip command
#[derive(Args)]
pub struct StripArgs {
    /// Path to strip.toml manifest file
    #[arg(short, long, default_value = "strip.toml")]
    pub manifest: PathBuf,

    /// Compiled-variant dump from the shader compiler (JSON)
    #[arg(short, long)]
    pub variants: PathBuf,

    /// Filtered dump output path (defaults to <variants>.stripped.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the strip command
pub fn execute(args: StripArgs) -> Result<()> {
    let manifest = StripManifest::load(&args.manifest)?;
    manifest.validate()?;

    let mut dump = VariantDump::load(&args.variants)?;
    println!(
        "Loaded {} shaders, {} variants from {}",
        dump.shaders.len(),
        dump.variant_count(),
        args.variants.display()
    );

    let policies = build_policies(&manifest, &dump)?;

    let mut session = StripSession::new(
        policies,
        SessionOptions {
            enabled: manifest.session.enabled,
            deep_logs: manifest.session.deep_logs,
        },
    );
    for shader in &mut dump.shaders {
        for pass in &mut shader.passes {
            session.process(&shader.shader, &pass.pass, &mut pass.variants);
        }
    }
    let report = session.finish();

    let output = args
        .output
        .unwrap_or_else(|| args.variants.with_extension("stripped.json"));
    dump.save(&output)?;

    if let Some(log_dir) = &manifest.session.log_dir {
        write_logs(log_dir, &report)?;
        println!("Logs written to {}", log_dir.display());
    }

    println!();
    println!("{}", report.summary());
    println!("Filtered dump: {}", output.display());
    Ok(())
}

/// Assemble the policy chain in manifest order: path blacklist first
/// (cheapest), then platform filter, then the whitelist matcher.
fn build_policies(manifest: &StripManifest, dump: &VariantDump) -> Result<Vec<Box<dyn StripPolicy>>> {
    let mut policies: Vec<Box<dyn StripPolicy>> = Vec::new();

    if !manifest.path.blacklist.is_empty() {
        policies.push(Box::new(PathBlacklistPolicy::new(
            manifest.path.blacklist.clone(),
        )));
    }

    if !manifest.platform.platforms.is_empty() {
        policies.push(Box::new(PlatformPolicy::new(
            manifest.platform.platforms.clone(),
            manifest.platform.whitelist,
        )));
    }

    if !manifest.whitelist.collections.is_empty() {
        let documents = collect_documents(&manifest.whitelist.collections)?;
        if documents.is_empty() {
            anyhow::bail!("No whitelist documents found under the configured collection paths");
        }
        let options = manifest.whitelist_options();
        let whitelist = parse_documents(&documents, &options.excludes())?;
        println!(
            "Whitelist: {} documents, {} shaders, {} variants",
            documents.len(),
            whitelist.catalog.shader_count(),
            whitelist.catalog.variant_count()
        );
        let mut policy = VariantWhitelistPolicy::new(whitelist, options);
        policy.prune_unresolved(&DumpResolver::new(dump));
        policies.push(Box::new(policy));
    }

    Ok(policies)
}

/// Write the report and its log buffers as files.
fn write_logs(dir: &Path, report: &SessionReport) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let header = format!(
        "shader-strip report ({})\n{}\n",
        chrono::Utc::now().to_rfc3339(),
        report.summary()
    );
    write_log(dir, "report.log", &header)?;
    write_log(dir, "shaders-kept.log", &report.kept_log.join("\n"))?;
    write_log(dir, "shaders-stripped.log", &report.stripped_log.join("\n"))?;

    // Ledgers only exist under deep logs.
    let ledgers: [(&str, &[String]); 6] = [
        ("keywords.log", &report.all_keywords),
        ("keywords-kept.log", &report.kept_keywords),
        ("keywords-stripped.log", &report.stripped_keywords),
        ("platforms.log", &report.all_platforms),
        ("platforms-kept.log", &report.kept_platforms),
        ("platforms-stripped.log", &report.stripped_platforms),
    ];
    for (name, lines) in ledgers {
        if !lines.is_empty() {
            write_log(dir, name, &lines.join("\n"))?;
        }
    }
    Ok(())
}

fn write_log(dir: &Path, name: &str, content: &str) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write log: {}", path.display()))
}
