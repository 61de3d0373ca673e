//! Parser tests against realistic document fixtures

use crate::error::SvcError;
use crate::model::{KeywordSet, PassType, ShaderId};
use crate::parse::parse_collection;

const GUID_A: &str = "aabbccddeeff00112233445566778899";
const GUID_B: &str = "99887766554433221100ffeeddccbbaa";

fn doc(shaders: &str) -> String {
    format!(
        "%YAML 1.1\n\
         %TAG !u! tag:unity3d.com,2011:\n\
         --- !u!200 &1\n\
         ShaderVariantCollection:\n\
         \x20 m_ObjectHideFlags: 0\n\
         \x20 m_Name: Whitelist\n\
         \x20 m_Shaders:\n\
         {shaders}"
    )
}

#[test]
fn test_parse_builtin_and_custom_groups() {
    let text = doc(&format!(
        "  - first: {{fileID: 46, guid: 0000000000000000f000000000000000, type: 0}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: DIRECTIONAL LIGHTPROBE_SH\n\
         \x20       passType: 4\n\
         \x20     - keywords: DIRECTIONAL SHADOWS_SCREEN\n\
         \x20       passType: 4\n\
         \x20 - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: AAA BBB\n\
         \x20       passType: 0\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    assert_eq!(whitelist.catalog.shader_count(), 2);
    assert_eq!(whitelist.catalog.variant_count(), 3);
    assert!(whitelist.no_keywords.is_empty());

    let builtin = whitelist.catalog.get(&ShaderId::Builtin(46)).unwrap();
    let forward = builtin.variants_for(PassType::FORWARD_BASE).unwrap();
    assert_eq!(forward.len(), 2);
    assert_eq!(
        forward[0],
        KeywordSet::from_tokens(["DIRECTIONAL", "LIGHTPROBE_SH"])
    );

    let custom = whitelist
        .catalog
        .get(&ShaderId::Asset(GUID_A.into()))
        .unwrap();
    assert_eq!(custom.file_id, 4_800_000);
    let normal = custom.variants_for(PassType::NORMAL).unwrap();
    assert_eq!(normal[0], KeywordSet::from_tokens(["BBB", "AAA"]));
}

#[test]
fn test_parse_empty_variant_list_whitelists_shader() {
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants: []\n\
         \x20 - first: {{fileID: 46, guid: 0000000000000000f000000000000000, type: 0}}\n\
         \x20   second:\n\
         \x20     variants: []\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    assert_eq!(whitelist.catalog.variant_count(), 0);
    assert_eq!(whitelist.no_keywords.len(), 2);
    assert!(whitelist.no_keywords.contains(&ShaderId::Asset(GUID_A.into())));
    assert!(whitelist.no_keywords.contains(&ShaderId::Builtin(46)));
}

#[test]
fn test_parse_wrapped_keyword_line() {
    // The serializer hard-wraps long keyword lists at deeper indent
    // without repeating the key.
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: AAA BBB\n\
         \x20         CCC DDD\n\
         \x20       passType: 8\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    let entry = whitelist
        .catalog
        .get(&ShaderId::Asset(GUID_A.into()))
        .unwrap();
    let variants = entry.variants_for(PassType::SHADOW_CASTER).unwrap();
    assert_eq!(
        variants[0],
        KeywordSet::from_tokens(["AAA", "BBB", "CCC", "DDD"])
    );
}

#[test]
fn test_parse_missing_keywords_key_is_fatal() {
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - passType: 4\n"
    ));

    let err = parse_collection(&text, &[]);
    assert!(matches!(err, Err(SvcError::MissingKey { .. })));
}

#[test]
fn test_parse_dedups_equal_variants() {
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: AAA BBB\n\
         \x20       passType: 4\n\
         \x20     - keywords: BBB AAA\n\
         \x20       passType: 4\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    assert_eq!(whitelist.catalog.variant_count(), 1);
}

#[test]
fn test_parse_skips_unknown_builtin_reference() {
    let text = doc(&format!(
        "  - first: {{fileID: 47, guid: 0000000000000000f000000000000000, type: 0}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: AAA\n\
         \x20       passType: 0\n\
         \x20 - first: {{fileID: 4800000, guid: {GUID_B}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: BBB\n\
         \x20       passType: 0\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    // The unknown built-in group is dropped; parsing continues after it.
    assert_eq!(whitelist.catalog.shader_count(), 1);
    assert!(whitelist.catalog.contains(&ShaderId::Asset(GUID_B.into())));
}

#[test]
fn test_parse_applies_exclusions() {
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords: AAA STEREO_INSTANCING_ON BBB\n\
         \x20       passType: 4\n"
    ));

    let excludes = vec!["STEREO_INSTANCING_ON".to_string()];
    let whitelist = parse_collection(&text, &excludes).unwrap();
    let entry = whitelist
        .catalog
        .get(&ShaderId::Asset(GUID_A.into()))
        .unwrap();
    let variants = entry.variants_for(PassType::FORWARD_BASE).unwrap();
    assert_eq!(variants[0], KeywordSet::from_tokens(["AAA", "BBB"]));
}

#[test]
fn test_parse_first_entry_without_keywords_marks_no_keyword_shader() {
    let text = doc(&format!(
        "  - first: {{fileID: 4800000, guid: {GUID_A}, type: 3}}\n\
         \x20   second:\n\
         \x20     variants:\n\
         \x20     - keywords:\n\
         \x20       passType: 0\n\
         \x20     - keywords: AAA\n\
         \x20       passType: 4\n"
    ));

    let whitelist = parse_collection(&text, &[]).unwrap();
    let id = ShaderId::Asset(GUID_A.into());
    assert!(whitelist.no_keywords.contains(&id));
    // The keywordless entry is still a real (empty-set) variant record.
    let entry = whitelist.catalog.get(&id).unwrap();
    assert_eq!(entry.variant_count(), 2);
    assert!(entry.variants_for(PassType::NORMAL).unwrap()[0].is_empty());
}

#[test]
fn test_parse_document_without_shader_list() {
    let whitelist = parse_collection("just some text\nnothing: here\n", &[]).unwrap();
    assert!(whitelist.catalog.is_empty());
    assert!(whitelist.no_keywords.is_empty());
}
