//! Strip-SVC: shader variant collection (whitelist) parser and writer
//!
//! This crate reads the serialized shader-variant-collection documents a
//! build pipeline uses as a whitelist, and turns them into an in-memory
//! catalog indexed by shader identity and pass type. It also writes
//! consolidated documents back out, which is what the merge tool builds on.
//!
//! The document format is a fixed, predictable record shape: indented
//! `key: value` lines, with long keyword lists hard-wrapped across physical
//! lines. This is deliberately *not* a general YAML parser - it only
//! understands the record shapes a variant collection contains, and it does
//! not validate the surrounding document schema.
//!
//! # Usage
//!
//! ```ignore
//! use strip_svc::parse_collection;
//!
//! let text = std::fs::read_to_string("whitelist.shadervariants").unwrap();
//! let whitelist = parse_collection(&text, &[]).unwrap();
//!
//! println!("Shaders: {}", whitelist.catalog.shader_count());
//! println!("Variants: {}", whitelist.catalog.variant_count());
//! ```

mod error;
pub mod lines;
mod model;
mod parse;
mod write;

pub use error::SvcError;
pub use model::{
    KeywordSet, NoKeywordShaderSet, PassType, ShaderId, ShaderVariants, VariantCatalog, Whitelist,
};
pub use parse::parse_collection;
pub use write::write_collection;

// =============================================================================
// Constants
// =============================================================================

/// GUID namespace reserved for engine built-in shaders.
pub const BUILTIN_GUID: &str = "0000000000000000f000000000000000";

/// Local file id of the shader object inside a shader asset file.
pub const SHADER_FILE_ID: i64 = 4_800_000;

/// Name of a built-in shader by its file id inside the reserved namespace.
///
/// Only the two built-ins that actually show up in recorded variant
/// collections are mapped; anything else is an unresolved reference.
pub fn builtin_shader_name(file_id: i64) -> Option<&'static str> {
    match file_id {
        46 => Some("Standard"),
        45 => Some("Standard (Specular setup)"),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
