//! Compiled-variant dump exchanged with the compiler front end
//!
//! The shader compiler emits one JSON document per build listing every
//! shader, its passes, and the compiled variants per pass. The strip
//! command filters that document in place and writes it back out, which
//! is the stand-in for a build pipeline mutating the live variant lists.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strip_engine::{CompiledVariant, PassInfo, ShaderInfo, ShaderResolver};
use strip_svc::ShaderId;

/// Everything the compiler front end emits for one build.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VariantDump {
    pub shaders: Vec<DumpShader>,
}

/// One shader with its compiled passes.
#[derive(Debug, Serialize, Deserialize)]
pub struct DumpShader {
    #[serde(flatten)]
    pub shader: ShaderInfo,
    #[serde(default)]
    pub passes: Vec<DumpPass>,
}

/// One pass with its compiled variants.
#[derive(Debug, Serialize, Deserialize)]
pub struct DumpPass {
    #[serde(flatten)]
    pub pass: PassInfo,
    #[serde(default)]
    pub variants: Vec<CompiledVariant>,
}

impl VariantDump {
    /// Load a dump from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read variant dump: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse a dump from string
    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse variant dump")
    }

    /// Write the (filtered) dump back out.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize dump")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write variant dump: {}", path.display()))
    }

    /// Total variants across all shaders and passes.
    pub fn variant_count(&self) -> usize {
        self.shaders
            .iter()
            .flat_map(|s| s.passes.iter())
            .map(|p| p.variants.len())
            .sum()
    }
}

/// Asset resolver backed by the dump's own shader table.
pub struct DumpResolver {
    paths: HashMap<String, String>,
}

impl DumpResolver {
    pub fn new(dump: &VariantDump) -> Self {
        let paths = dump
            .shaders
            .iter()
            .filter_map(|s| {
                let guid = s.shader.guid.clone()?;
                let path = s.shader.path.clone().filter(|p| !p.is_empty())?;
                Some((guid, path))
            })
            .collect();
        Self { paths }
    }
}

impl ShaderResolver for DumpResolver {
    fn asset_path(&self, id: &ShaderId) -> Option<String> {
        match id {
            ShaderId::Asset(guid) => self.paths.get(guid).cloned(),
            ShaderId::Builtin(_) => None,
        }
    }
}
