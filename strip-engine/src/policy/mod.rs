//! Stripping policies
//!
//! Each policy examines one (shader, pass, variant-list) unit and removes
//! the variants it rejects, in place. Policies are composed into an
//! explicit ordered chain by the session driver: earlier policies see the
//! full list, later ones only what survived.
//!
//! Removal discipline: a policy that removes by index must scan the list
//! in reverse, so removal never invalidates a not-yet-visited index.

mod path;
mod platform;
mod whitelist;

pub use path::PathBlacklistPolicy;
pub use platform::PlatformPolicy;
pub use whitelist::{
    INSTANCING_KEYWORDS, STEREO_KEYWORDS, VariantWhitelistPolicy, WhitelistOptions,
};

use crate::shader::{CompiledVariant, PassInfo, ShaderInfo};

/// A single stripping strategy.
pub trait StripPolicy {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Remove rejected variants from `variants` in place.
    fn evaluate(&self, shader: &ShaderInfo, pass: &PassInfo, variants: &mut Vec<CompiledVariant>);
}
