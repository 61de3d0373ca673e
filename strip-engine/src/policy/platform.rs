//! Compiler-platform filter policy

use log::debug;

use crate::policy::StripPolicy;
use crate::shader::{CompiledVariant, PassInfo, ShaderInfo};

/// Filters individual variants by their compiler platform tag.
///
/// In blacklist mode (the default) variants whose tag is in the list are
/// stripped; in whitelist mode everything else is. Untagged variants
/// count as "not in the list".
#[derive(Debug, Default)]
pub struct PlatformPolicy {
    platforms: Vec<String>,
    whitelist: bool,
}

impl PlatformPolicy {
    pub fn new(platforms: Vec<String>, whitelist: bool) -> Self {
        Self {
            platforms,
            whitelist,
        }
    }
}

impl StripPolicy for PlatformPolicy {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn evaluate(&self, shader: &ShaderInfo, pass: &PassInfo, variants: &mut Vec<CompiledVariant>) {
        let before = variants.len();
        // Reverse order so removal by index cannot skip entries.
        for i in (0..variants.len()).rev() {
            let listed = variants[i]
                .platform
                .as_deref()
                .is_some_and(|p| self.platforms.iter().any(|q| q == p));
            let strip = if self.whitelist { !listed } else { listed };
            if strip {
                variants.remove(i);
            }
        }
        let removed = before - variants.len();
        if removed > 0 {
            debug!(
                "platform: stripped {removed}/{before} variants of {} [{}]",
                shader.name, pass.pass_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(platform: Option<&str>) -> CompiledVariant {
        CompiledVariant {
            keywords: vec![],
            platform: platform.map(str::to_string),
            tier: None,
        }
    }

    fn shader() -> ShaderInfo {
        ShaderInfo {
            name: "Custom/Test".to_string(),
            path: Some("Assets/Test.shader".to_string()),
            guid: None,
            file_id: 0,
        }
    }

    fn pass() -> PassInfo {
        PassInfo {
            pass_type: 0,
            pass_name: String::new(),
        }
    }

    #[test]
    fn test_blacklist_mode_strips_listed_platforms() {
        let policy = PlatformPolicy::new(vec!["gles3".to_string()], false);
        let mut list = vec![
            variant(Some("d3d11")),
            variant(Some("gles3")),
            variant(Some("vulkan")),
            variant(Some("gles3")),
        ];
        policy.evaluate(&shader(), &pass(), &mut list);
        let tags: Vec<_> = list.iter().map(|v| v.platform.as_deref()).collect();
        assert_eq!(tags, vec![Some("d3d11"), Some("vulkan")]);
    }

    #[test]
    fn test_whitelist_mode_keeps_only_listed_platforms() {
        let policy = PlatformPolicy::new(vec!["vulkan".to_string()], true);
        let mut list = vec![
            variant(Some("d3d11")),
            variant(Some("vulkan")),
            variant(None),
        ];
        policy.evaluate(&shader(), &pass(), &mut list);
        let tags: Vec<_> = list.iter().map(|v| v.platform.as_deref()).collect();
        assert_eq!(tags, vec![Some("vulkan")]);
    }

    #[test]
    fn test_untagged_variant_survives_blacklist() {
        let policy = PlatformPolicy::new(vec!["gles3".to_string()], false);
        let mut list = vec![variant(None)];
        policy.evaluate(&shader(), &pass(), &mut list);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_adjacent_removals_do_not_skip_entries() {
        // Two strip targets in a row exercise the reverse-index scan;
        // forward removal would skip the second one.
        let policy = PlatformPolicy::new(vec!["gles3".to_string()], false);
        let mut list = vec![
            variant(Some("gles3")),
            variant(Some("gles3")),
            variant(Some("d3d11")),
        ];
        policy.evaluate(&shader(), &pass(), &mut list);
        let tags: Vec<_> = list.iter().map(|v| v.platform.as_deref()).collect();
        assert_eq!(tags, vec![Some("d3d11")]);
    }
}
