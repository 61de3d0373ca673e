//! Front-end facing data types
//!
//! These mirror what the compiler front end knows about each shader, pass
//! and compiled variant. They derive serde so a build pipeline can hand
//! them over as a JSON dump without an adapter layer.

use serde::{Deserialize, Serialize};
use strip_svc::{BUILTIN_GUID, ShaderId};

/// A shader program as presented by the compiler front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderInfo {
    pub name: String,
    /// Project-relative asset path; absent or empty for engine built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Asset GUID; the reserved all-zero namespace marks built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    /// Local file id within the asset (or the built-in shader id).
    #[serde(default)]
    pub file_id: i64,
}

impl ShaderInfo {
    /// Identity used for catalog lookups; `None` when the front end
    /// supplied no usable GUID.
    pub fn id(&self) -> Option<ShaderId> {
        match self.guid.as_deref() {
            Some(guid) if guid == BUILTIN_GUID => Some(ShaderId::Builtin(self.file_id)),
            Some(guid) if !guid.is_empty() => Some(ShaderId::Asset(guid.to_string())),
            _ => None,
        }
    }

    /// A shader without an asset path is an engine built-in.
    pub fn is_builtin(&self) -> bool {
        self.path.as_deref().is_none_or(str::is_empty)
    }

    /// Hidden shaders are flagged by name prefix.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with("Hidden/")
    }
}

/// One render pass being compiled for a shader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassInfo {
    pub pass_type: u32,
    #[serde(default)]
    pub pass_name: String,
}

/// One compiled variant: the unit the stripper keeps or discards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledVariant {
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Compiler platform tag, e.g. `d3d11`, `vulkan`, `metal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Graphics tier the variant was compiled for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<u8>,
}

/// How a [`NameMatch`] pattern is compared against a candidate string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Contains,
    Exact,
    Prefix,
    Suffix,
}

/// String pattern with an explicit match mode, used by ignore lists and
/// the path blacklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameMatch {
    pub pattern: String,
    #[serde(default)]
    pub mode: MatchMode,
}

impl NameMatch {
    pub fn new(pattern: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            pattern: pattern.into(),
            mode,
        }
    }

    pub fn contains(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Contains)
    }

    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self::new(pattern, MatchMode::Prefix)
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self.mode {
            MatchMode::Contains => candidate.contains(&self.pattern),
            MatchMode::Exact => candidate == self.pattern,
            MatchMode::Prefix => candidate.starts_with(&self.pattern),
            MatchMode::Suffix => candidate.ends_with(&self.pattern),
        }
    }
}

/// Asset lookup collaborator: maps shader identities to project paths.
pub trait ShaderResolver {
    /// Project asset path for the shader; `None` when the identity does
    /// not resolve to a known asset.
    fn asset_path(&self, id: &ShaderId) -> Option<String>;
}
