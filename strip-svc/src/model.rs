//! Data model for parsed shader-variant whitelists

use core::fmt;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

// =============================================================================
// Identity types
// =============================================================================

/// Stable identity of a shader program.
///
/// Built-in engine shaders live in a reserved all-zero GUID namespace and
/// are identified by their file id alone; project shaders are identified
/// by asset GUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderId {
    /// Engine built-in shader (file id inside the reserved namespace).
    Builtin(i64),
    /// Project shader asset, identified by its 32-hex-digit GUID.
    Asset(String),
}

impl ShaderId {
    pub fn is_builtin(&self) -> bool {
        matches!(self, ShaderId::Builtin(_))
    }
}

impl fmt::Display for ShaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderId::Builtin(id) => write!(f, "builtin:{id}"),
            ShaderId::Asset(guid) => write!(f, "{guid}"),
        }
    }
}

/// Render pass category tag.
///
/// The wire format records the pass as a small integer; the named
/// constants cover the categories that appear in practice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassType(pub u32);

impl PassType {
    pub const NORMAL: PassType = PassType(0);
    pub const VERTEX: PassType = PassType(1);
    pub const VERTEX_LM: PassType = PassType(2);
    pub const FORWARD_BASE: PassType = PassType(4);
    pub const FORWARD_ADD: PassType = PassType(5);
    pub const SHADOW_CASTER: PassType = PassType(8);
    pub const DEFERRED: PassType = PassType(10);
    pub const META: PassType = PassType(11);
    pub const MOTION_VECTORS: PassType = PassType(12);
    pub const SCRIPTABLE_RENDER_PIPELINE: PassType = PassType(13);

    /// Human-readable pass category name for log output.
    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Normal",
            1 => "Vertex",
            2 => "VertexLM",
            4 => "ForwardBase",
            5 => "ForwardAdd",
            8 => "ShadowCaster",
            10 => "Deferred",
            11 => "Meta",
            12 => "MotionVectors",
            13 => "ScriptableRenderPipeline",
            14 => "ScriptableRenderPipelineDefaultUnlit",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for PassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:02}){}", self.0, self.name())
    }
}

// =============================================================================
// Keyword sets
// =============================================================================

/// A normalized set of shader keywords.
///
/// Tokens are stored sorted and deduplicated, so two sets built from the
/// same keywords in any insertion order compare equal with plain `==`,
/// and a cardinality mismatch fails the comparison immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeywordSet {
    tokens: SmallVec<[Box<str>; 4]>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from tokens in any order; duplicates collapse.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens: SmallVec<[Box<str>; 4]> = tokens
            .into_iter()
            .map(|t| Box::from(t.as_ref()))
            .collect();
        tokens.sort();
        tokens.dedup();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.tokens
            .binary_search_by(|t| t.as_ref().cmp(keyword))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| &**t)
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return write!(f, "<no keywords>");
        }
        for (i, t) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One shader's whitelisted variants, grouped by pass type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderVariants {
    /// File id recorded for this shader, kept so documents round-trip.
    pub file_id: i64,
    passes: HashMap<PassType, Vec<KeywordSet>>,
}

impl ShaderVariants {
    /// Insert a keyword set under a pass; duplicates (set equality) are
    /// skipped. Returns whether the set was actually inserted.
    fn insert(&mut self, pass: PassType, keywords: KeywordSet) -> bool {
        let variants = self.passes.entry(pass).or_default();
        if variants.contains(&keywords) {
            return false;
        }
        variants.push(keywords);
        true
    }

    /// Whitelisted keyword sets for a pass, in insertion order.
    pub fn variants_for(&self, pass: PassType) -> Option<&[KeywordSet]> {
        self.passes.get(&pass).map(Vec::as_slice)
    }

    pub fn passes(&self) -> impl Iterator<Item = (PassType, &[KeywordSet])> {
        self.passes.iter().map(|(p, v)| (*p, v.as_slice()))
    }

    pub fn variant_count(&self) -> usize {
        self.passes.values().map(Vec::len).sum()
    }
}

/// Whitelisted variants indexed by shader identity, then pass type.
///
/// Invariant: no two keyword sets under the same (shader, pass) are
/// set-equal; [`VariantCatalog::insert`] enforces this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantCatalog {
    shaders: HashMap<ShaderId, ShaderVariants>,
}

impl VariantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one variant record. Returns false when an equal record was
    /// already present under the same (shader, pass).
    pub fn insert(
        &mut self,
        id: ShaderId,
        file_id: i64,
        pass: PassType,
        keywords: KeywordSet,
    ) -> bool {
        let entry = self.shaders.entry(id).or_default();
        entry.file_id = file_id;
        entry.insert(pass, keywords)
    }

    pub fn get(&self, id: &ShaderId) -> Option<&ShaderVariants> {
        self.shaders.get(id)
    }

    pub fn contains(&self, id: &ShaderId) -> bool {
        self.shaders.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn variant_count(&self) -> usize {
        self.shaders.values().map(ShaderVariants::variant_count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShaderId, &ShaderVariants)> {
        self.shaders.iter()
    }

    /// Keep only the shaders the predicate accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(&ShaderId, &ShaderVariants) -> bool) {
        self.shaders.retain(|id, entry| keep(id, entry));
    }

    /// Union with another catalog; records equal under variant equality
    /// are not duplicated.
    pub fn merge(&mut self, other: VariantCatalog) {
        for (id, entry) in other.shaders {
            for (pass, variants) in entry.passes {
                for keywords in variants {
                    self.insert(id.clone(), entry.file_id, pass, keywords);
                }
            }
        }
    }
}

// =============================================================================
// No-keyword shaders
// =============================================================================

/// Shaders whitelisted with no keyword constraint.
///
/// A shader lands here when its document group declares an empty variant
/// list, or when the first variant entry of its group carries no keywords.
/// Built-in and custom identities are tracked in disjoint buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoKeywordShaderSet {
    builtin: HashSet<i64>,
    custom: HashSet<String>,
}

impl NoKeywordShaderSet {
    pub fn insert(&mut self, id: &ShaderId) {
        match id {
            ShaderId::Builtin(file_id) => {
                self.builtin.insert(*file_id);
            }
            ShaderId::Asset(guid) => {
                self.custom.insert(guid.clone());
            }
        }
    }

    pub fn contains(&self, id: &ShaderId) -> bool {
        match id {
            ShaderId::Builtin(file_id) => self.builtin.contains(file_id),
            ShaderId::Asset(guid) => self.custom.contains(guid),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty() && self.custom.is_empty()
    }

    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = ShaderId> + '_ {
        self.builtin
            .iter()
            .map(|id| ShaderId::Builtin(*id))
            .chain(self.custom.iter().map(|g| ShaderId::Asset(g.clone())))
    }

    pub fn merge(&mut self, other: NoKeywordShaderSet) {
        self.builtin.extend(other.builtin);
        self.custom.extend(other.custom);
    }
}

// =============================================================================
// Whitelist
// =============================================================================

/// Everything extracted from one or more whitelist documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    pub catalog: VariantCatalog,
    pub no_keywords: NoKeywordShaderSet,
}

impl Whitelist {
    /// Union with another whitelist.
    pub fn merge(&mut self, other: Whitelist) {
        self.catalog.merge(other.catalog);
        self.no_keywords.merge(other.no_keywords);
    }
}
