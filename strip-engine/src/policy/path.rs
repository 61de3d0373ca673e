//! Asset-path blacklist policy

use log::debug;

use crate::policy::StripPolicy;
use crate::shader::{CompiledVariant, NameMatch, PassInfo, ShaderInfo};

/// Strips every variant of shaders whose asset path matches a blacklist
/// pattern. Built-in shaders carry no path and are never stripped; a path
/// that matches no pattern is kept.
#[derive(Debug, Default)]
pub struct PathBlacklistPolicy {
    blacklist: Vec<NameMatch>,
}

impl PathBlacklistPolicy {
    pub fn new(blacklist: Vec<NameMatch>) -> Self {
        Self { blacklist }
    }

    fn is_blacklisted(&self, shader: &ShaderInfo) -> bool {
        let Some(path) = shader.path.as_deref().filter(|p| !p.is_empty()) else {
            return false;
        };
        self.blacklist.iter().any(|m| m.matches(path))
    }
}

impl StripPolicy for PathBlacklistPolicy {
    fn name(&self) -> &'static str {
        "path-blacklist"
    }

    fn evaluate(&self, shader: &ShaderInfo, pass: &PassInfo, variants: &mut Vec<CompiledVariant>) {
        if !variants.is_empty() && self.is_blacklisted(shader) {
            debug!(
                "path-blacklist: stripping {} variants of {} [{}]",
                variants.len(),
                shader.name,
                pass.pass_name
            );
            variants.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(n: usize) -> Vec<CompiledVariant> {
        (0..n)
            .map(|_| CompiledVariant {
                keywords: vec![],
                platform: None,
                tier: None,
            })
            .collect()
    }

    fn pass() -> PassInfo {
        PassInfo {
            pass_type: 0,
            pass_name: "FORWARD".to_string(),
        }
    }

    fn shader(path: Option<&str>) -> ShaderInfo {
        ShaderInfo {
            name: "Custom/Test".to_string(),
            path: path.map(str::to_string),
            guid: None,
            file_id: 0,
        }
    }

    #[test]
    fn test_blacklisted_path_is_stripped() {
        let policy = PathBlacklistPolicy::new(vec![NameMatch::contains("Legacy")]);
        let mut list = variants(3);
        policy.evaluate(&shader(Some("Assets/Legacy/Old.shader")), &pass(), &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_unmatched_path_is_kept() {
        let policy = PathBlacklistPolicy::new(vec![NameMatch::contains("Legacy")]);
        let mut list = variants(3);
        policy.evaluate(&shader(Some("Assets/Current/New.shader")), &pass(), &mut list);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_builtin_shader_is_never_stripped() {
        let policy = PathBlacklistPolicy::new(vec![NameMatch::contains("")]);
        let mut list = variants(2);
        policy.evaluate(&shader(None), &pass(), &mut list);
        assert_eq!(list.len(), 2);
        policy.evaluate(&shader(Some("")), &pass(), &mut list);
        assert_eq!(list.len(), 2);
    }
}
