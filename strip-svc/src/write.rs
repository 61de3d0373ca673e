//! Consolidated whitelist document writer
//!
//! Emits the same record shapes the parser consumes, so a written document
//! parses back to an equal catalog. Used by the merge tool to produce one
//! consolidated collection from many.

use core::fmt::Write as _;

use crate::model::{PassType, ShaderId, Whitelist};
use crate::{BUILTIN_GUID, SHADER_FILE_ID};

/// Serialize a whitelist into document form.
///
/// Output is deterministic: built-in shaders first (by file id), then
/// custom shaders by GUID, passes by numeric code. Keyword sets keep
/// their catalog insertion order within a pass.
pub fn write_collection(name: &str, whitelist: &Whitelist) -> String {
    let mut out = String::new();
    out.push_str("%YAML 1.1\n");
    out.push_str("%TAG !u! tag:unity3d.com,2011:\n");
    out.push_str("--- !u!200 &1\n");
    out.push_str("ShaderVariantCollection:\n");
    out.push_str("  m_ObjectHideFlags: 0\n");
    let _ = writeln!(out, "  m_Name: {name}");
    out.push_str("  m_Shaders:\n");

    let mut ids: Vec<&ShaderId> = whitelist.catalog.iter().map(|(id, _)| id).collect();
    ids.sort();

    for id in ids {
        let entry = whitelist.catalog.get(id).expect("id taken from catalog");
        write_group_header(&mut out, id, entry.file_id);
        out.push_str("    second:\n");
        out.push_str("      variants:\n");

        let mut passes: Vec<(PassType, _)> = entry.passes().collect();
        passes.sort_by_key(|(pass, _)| *pass);
        for (pass, variants) in passes {
            for keywords in variants {
                out.push_str("      - keywords:");
                for token in keywords.iter() {
                    out.push(' ');
                    out.push_str(token);
                }
                out.push('\n');
                let _ = writeln!(out, "        passType: {}", pass.0);
            }
        }
    }

    // Shaders whitelisted with no keyword constraint and no recorded
    // variants are written as empty-list groups.
    let mut unconstrained: Vec<ShaderId> = whitelist
        .no_keywords
        .iter()
        .filter(|id| !whitelist.catalog.contains(id))
        .collect();
    unconstrained.sort();
    for id in &unconstrained {
        let file_id = match id {
            ShaderId::Builtin(file_id) => *file_id,
            ShaderId::Asset(_) => SHADER_FILE_ID,
        };
        write_group_header(&mut out, id, file_id);
        out.push_str("    second:\n");
        out.push_str("      variants: []\n");
    }

    out
}

fn write_group_header(out: &mut String, id: &ShaderId, file_id: i64) {
    let (guid, asset_type) = match id {
        ShaderId::Builtin(_) => (BUILTIN_GUID, 0),
        ShaderId::Asset(guid) => (guid.as_str(), 3),
    };
    let _ = writeln!(
        out,
        "  - first: {{fileID: {file_id}, guid: {guid}, type: {asset_type}}}"
    );
}
