//! Whitelist document parser
//!
//! Rebuilds (shader, pass, keyword-set) records from a serialized variant
//! collection. The document is scanned as logical lines: a `first:` marker
//! opens a (shader, variant-list) group, the group's `variants:` field sits
//! a fixed two logical lines below it, and the variant entries start one
//! line after that, all at a single indent depth.

use log::{debug, warn};

use crate::error::SvcError;
use crate::lines::{has_key, indent_of, is_new_entry, list_values, merge_wrapped, scalar_value};
use crate::model::{KeywordSet, PassType, ShaderId, Whitelist};
use crate::{BUILTIN_GUID, builtin_shader_name};

/// Top-level key introducing the shader-variant list.
const SHADERS_KEY: &str = "m_Shaders";

/// Logical lines from a group's `first:` marker to its `variants:` field.
const VARIANTS_OFFSET: usize = 2;

/// Logical lines from a group's `first:` marker to its first variant entry.
const ENTRIES_OFFSET: usize = 3;

/// Parse one whitelist document.
///
/// Keywords listed in `excludes` are dropped from every parsed variant, so
/// the catalog side of later comparisons agrees with the incoming side.
///
/// # Errors
///
/// Returns [`SvcError::MissingKey`] when a variant entry line lacks its
/// `keywords` key - the one structurally-guaranteed field. Everything else
/// (unknown built-in references, unreadable pass codes) degrades to a
/// warning and the affected group or field is skipped.
pub fn parse_collection(text: &str, excludes: &[String]) -> Result<Whitelist, SvcError> {
    let physical: Vec<&str> = text.lines().collect();
    let lines = merge_wrapped(&physical);

    let mut whitelist = Whitelist::default();

    // Everything before the shader list is serializer preamble.
    let Some(start) = lines.iter().position(|l| has_key(l, SHADERS_KEY)) else {
        return Ok(whitelist);
    };

    let mut i = start + 1;
    while i < lines.len() {
        if !has_key(&lines[i], "first") {
            i += 1;
            continue;
        }

        // "- first: {fileID: <int>, guid: <hex32>, type: N}" opens a group.
        let line = &lines[i];
        let guid = scalar_value(line, "guid")
            .unwrap_or("")
            .trim_end_matches('}');
        let file_id: i64 = scalar_value(line, "fileID")
            .unwrap_or("")
            .trim_end_matches('}')
            .parse()
            .unwrap_or(0);

        let id = if guid == BUILTIN_GUID {
            match builtin_shader_name(file_id) {
                Some(name) => {
                    debug!("built-in shader group: {name} (fileID {file_id})");
                    ShaderId::Builtin(file_id)
                }
                None => {
                    warn!("unknown built-in shader fileID {file_id}, skipping group");
                    i += 1;
                    continue;
                }
            }
        } else if guid.is_empty() {
            warn!("shader group without a guid, skipping: {line}");
            i += 1;
            continue;
        } else {
            ShaderId::Asset(guid.to_string())
        };

        // An empty variant list whitelists the shader outright.
        let empty_list = lines
            .get(i + VARIANTS_OFFSET)
            .and_then(|l| scalar_value(l, "variants"))
            == Some("[]");
        if empty_list {
            whitelist.no_keywords.insert(&id);
            i += ENTRIES_OFFSET;
            continue;
        }

        let Some(first_entry) = lines.get(i + ENTRIES_OFFSET) else {
            break;
        };
        let entry_indent = indent_of(first_entry);

        // Accumulate entries until the indent level closes the group.
        let mut pending: Option<(KeywordSet, Option<PassType>)> = None;
        let mut first_in_group = true;
        let mut j = i + ENTRIES_OFFSET;
        while j < lines.len() {
            let entry = &lines[j];
            if indent_of(entry) < entry_indent {
                break;
            }
            if is_new_entry(entry) {
                if let Some((keywords, pass)) = pending.take() {
                    whitelist
                        .catalog
                        .insert(id.clone(), file_id, pass.unwrap_or_default(), keywords);
                }
                let tokens = list_values(entry, "keywords", excludes)?;
                if first_in_group && tokens.is_empty() {
                    whitelist.no_keywords.insert(&id);
                }
                first_in_group = false;
                pending = Some((KeywordSet::from_tokens(tokens), None));
            } else if let Some(value) = scalar_value(entry, "passType") {
                match value.parse::<u32>() {
                    Ok(code) => {
                        if let Some(p) = pending.as_mut() {
                            p.1 = Some(PassType(code));
                        }
                    }
                    Err(_) => warn!("unreadable passType `{value}`, leaving pass unset"),
                }
            }
            j += 1;
        }
        if let Some((keywords, pass)) = pending.take() {
            whitelist
                .catalog
                .insert(id.clone(), file_id, pass.unwrap_or_default(), keywords);
        }
        i = j;
    }

    Ok(whitelist)
}

#[cfg(test)]
mod tests;
