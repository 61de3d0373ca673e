//! Strip.toml manifest parsing
//!
//! Shared manifest structure used by the strip command. Each policy
//! section is active when it has configuration in it; a manifest that
//! activates nothing is rejected by `validate`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use strip_engine::{NameMatch, WhitelistOptions};

/// Strip.toml manifest structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StripManifest {
    pub session: SessionSection,
    pub whitelist: WhitelistSection,
    pub path: PathSection,
    pub platform: PlatformSection,
}

/// Session-wide switches
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Master switch; a disabled session strips nothing.
    pub enabled: bool,

    /// Record per-variant detail lines and keyword ledgers.
    pub deep_logs: bool,

    /// Directory for log files; nothing is written when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            enabled: true,
            deep_logs: false,
            log_dir: None,
        }
    }
}

/// Variant-whitelist policy configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WhitelistSection {
    /// Whitelist documents: files, or directories searched for
    /// .shadervariants files.
    pub collections: Vec<PathBuf>,

    /// Keep VR versions of recorded variants even when the stereo
    /// keywords were not recorded.
    pub allow_vr_variants: bool,

    /// Keep GPU-instanced versions of recorded variants even when the
    /// instancing keyword was not recorded.
    pub allow_instanced_variants: bool,

    /// Also strip Hidden/ shaders absent from the collections.
    pub strip_hidden: bool,

    /// Shaders matching these names are never stripped.
    pub ignore_shaders: Vec<NameMatch>,

    /// These pass types are never stripped.
    pub ignore_pass_types: Vec<u32>,
}

/// Path-blacklist policy configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathSection {
    /// Shaders whose asset path matches any pattern lose all variants.
    pub blacklist: Vec<NameMatch>,
}

/// Platform-filter policy configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlatformSection {
    /// Compiler platform tags to filter on.
    pub platforms: Vec<String>,

    /// Treat the platform list as a whitelist instead of a blacklist.
    pub whitelist: bool,
}

impl StripManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse strip.toml")
    }

    /// Sanity-check the configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.whitelist.collections.is_empty()
            && self.path.blacklist.is_empty()
            && self.platform.platforms.is_empty()
        {
            anyhow::bail!(
                "strip.toml activates no stripping policy \
                 (no whitelist collections, no path blacklist, no platform list)"
            );
        }
        Ok(())
    }

    /// Whitelist policy options from the manifest fields.
    pub fn whitelist_options(&self) -> WhitelistOptions {
        WhitelistOptions {
            allow_vr_variants: self.whitelist.allow_vr_variants,
            allow_instanced_variants: self.whitelist.allow_instanced_variants,
            strip_hidden: self.whitelist.strip_hidden,
            ignore_shaders: self.whitelist.ignore_shaders.clone(),
            ignore_pass_types: self.whitelist.ignore_pass_types.clone(),
        }
    }
}
