//! Variant collection whitelist policy
//!
//! Strips every shader variant not recorded in the parsed collection.
//! Built-in engine shaders are never stripped by this policy; use the
//! path or platform policies to thin those out.

use log::{debug, info, warn};
use strip_svc::{KeywordSet, PassType, ShaderId, Whitelist};

use crate::policy::StripPolicy;
use crate::shader::{CompiledVariant, NameMatch, PassInfo, ShaderInfo, ShaderResolver};

/// Keywords of the stereo/VR rendering paths.
pub const STEREO_KEYWORDS: &[&str] = &[
    "UNITY_SINGLE_PASS_STEREO",
    "STEREO_INSTANCING_ON",
    "STEREO_MULTIVIEW_ON",
];

/// Keywords enabling GPU-instanced variants.
pub const INSTANCING_KEYWORDS: &[&str] = &["INSTANCING_ON"];

/// Options for [`VariantWhitelistPolicy`].
#[derive(Debug, Clone, Default)]
pub struct WhitelistOptions {
    /// Match stereo/VR variants against the collection even when the
    /// stereo keywords were not recorded in it.
    pub allow_vr_variants: bool,
    /// Same for GPU-instanced variants.
    pub allow_instanced_variants: bool,
    /// Also strip `Hidden/` shaders absent from the collection. Careful:
    /// hidden shaders referenced from resource bundles can get stripped.
    pub strip_hidden: bool,
    /// Shaders whose name matches any of these are never stripped.
    pub ignore_shaders: Vec<NameMatch>,
    /// Pass types that are never stripped.
    pub ignore_pass_types: Vec<u32>,
}

impl WhitelistOptions {
    /// Exclusion list implied by the allow-flags. The same list must be
    /// applied when parsing the collection, so the catalog side and the
    /// incoming side of every comparison agree.
    pub fn excludes(&self) -> Vec<String> {
        let mut excludes = Vec::new();
        if self.allow_vr_variants {
            excludes.extend(STEREO_KEYWORDS.iter().map(|s| (*s).to_string()));
        }
        if self.allow_instanced_variants {
            excludes.extend(INSTANCING_KEYWORDS.iter().map(|s| (*s).to_string()));
        }
        excludes
    }
}

/// Keeps only the variants recorded in a whitelist collection.
///
/// The decision function is pure and stateless over the catalog, which is
/// immutable for the lifetime of the policy.
#[derive(Debug)]
pub struct VariantWhitelistPolicy {
    whitelist: Whitelist,
    excludes: Vec<String>,
    options: WhitelistOptions,
}

impl VariantWhitelistPolicy {
    pub fn new(whitelist: Whitelist, options: WhitelistOptions) -> Self {
        let excludes = options.excludes();
        if whitelist.catalog.is_empty() && whitelist.no_keywords.is_empty() {
            info!("empty variant collection: keeping everything");
        }
        Self {
            whitelist,
            excludes,
            options,
        }
    }

    /// Drop whitelist entries whose shader no longer resolves to an
    /// asset. Built-in entries are always kept.
    pub fn prune_unresolved(&mut self, resolver: &dyn ShaderResolver) {
        self.whitelist.catalog.retain(|id, _| match id {
            ShaderId::Builtin(_) => true,
            ShaderId::Asset(_) => {
                let resolved = resolver.asset_path(id).is_some();
                if !resolved {
                    warn!("whitelisted shader {id} does not resolve to an asset, dropping");
                }
                resolved
            }
        });
    }

    /// Keep (`true`) or discard (`false`) one incoming variant.
    pub fn should_keep(&self, shader: &ShaderInfo, pass: &PassInfo, keywords: &[String]) -> bool {
        // An absent or empty collection must never strip the whole build.
        if self.whitelist.catalog.is_empty() {
            return true;
        }
        // This policy never touches engine built-ins.
        if shader.is_builtin() {
            return true;
        }
        if self
            .options
            .ignore_shaders
            .iter()
            .any(|m| m.matches(&shader.name))
        {
            return true;
        }
        if self.options.ignore_pass_types.contains(&pass.pass_type) {
            return true;
        }

        let id = shader.id();
        if let Some(id) = &id {
            if self.whitelist.no_keywords.contains(id) {
                return true;
            }
        }

        let entry = id.as_ref().and_then(|id| self.whitelist.catalog.get(id));
        let Some(entry) = entry else {
            // Unknown shader: stripped, unless it is hidden and hidden
            // stripping is disabled.
            return shader.is_hidden() && !self.options.strip_hidden;
        };
        let Some(candidates) = entry.variants_for(PassType(pass.pass_type)) else {
            // Known shader, but nothing recorded for this pass.
            return false;
        };

        let incoming = self.normalize(keywords);
        // Cardinality first (cheap reject), then member equality on the
        // normalized forms.
        candidates
            .iter()
            .any(|c| c.len() == incoming.len() && *c == incoming)
    }

    /// Incoming keyword set with the active exclusions dropped.
    fn normalize(&self, keywords: &[String]) -> KeywordSet {
        KeywordSet::from_tokens(
            keywords
                .iter()
                .filter(|k| !self.excludes.iter().any(|e| e == *k))
                .map(String::as_str),
        )
    }
}

impl StripPolicy for VariantWhitelistPolicy {
    fn name(&self) -> &'static str {
        "variant-whitelist"
    }

    fn evaluate(&self, shader: &ShaderInfo, pass: &PassInfo, variants: &mut Vec<CompiledVariant>) {
        let before = variants.len();
        // Reverse order so removal by index cannot skip entries.
        for i in (0..variants.len()).rev() {
            if !self.should_keep(shader, pass, &variants[i].keywords) {
                variants.remove(i);
            }
        }
        let removed = before - variants.len();
        if removed > 0 {
            debug!(
                "variant-whitelist: stripped {removed}/{before} variants of {} [{}]",
                shader.name, pass.pass_name
            );
        }
    }
}
