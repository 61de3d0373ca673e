//! Line-level primitives for the whitelist document format
//!
//! Documents arrive as physical text lines. The serializer hard-wraps long
//! keyword lists across lines without repeating the key, so the first job
//! is to stitch physical lines back into logical ones; after that every
//! logical line is a `key: value` or `key:` record that the extraction
//! helpers below pick apart. Nothing above this module ever inspects raw
//! text.

use crate::error::SvcError;

/// Count of leading indent characters before the first significant one.
///
/// Spaces and list-marker dashes both count as indent. Returns 0 when the
/// line consists of nothing but indent characters.
pub fn indent_of(line: &str) -> usize {
    for (i, c) in line.char_indices() {
        if c != ' ' && c != '-' {
            return i;
        }
    }
    0
}

/// True when a list-marker dash appears before any non-indent character.
pub fn is_new_entry(line: &str) -> bool {
    for c in line.chars() {
        if c == '-' {
            return true;
        }
        if c != ' ' {
            return false;
        }
    }
    false
}

/// Collapse hard-wrapped physical lines into logical lines.
///
/// A line is a continuation when it is indented deeper than the previous
/// logical line and carries no key marker of its own (no trailing `:` and
/// no `: ` anywhere). Its trimmed content is appended, space-separated, to
/// the previous logical line.
pub fn merge_wrapped(lines: &[&str]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    for &line in lines {
        if let Some(prev) = merged.last_mut() {
            let continuation = indent_of(line) > indent_of(prev)
                && !line.ends_with(':')
                && !line.contains(": ");
            if continuation {
                prev.push(' ');
                prev.push_str(line.trim());
                continue;
            }
        }
        merged.push(line.to_string());
    }
    merged
}

/// Byte index of the value following the first `"<key>: "` marker.
pub fn value_index(line: &str, key: &str) -> Option<usize> {
    line.find(&format!("{key}:")).map(|i| i + key.len() + 2)
}

/// True when the line carries the given key marker.
pub fn has_key(line: &str, key: &str) -> bool {
    value_index(line, key).is_some()
}

/// Scalar value for a key: characters after the marker up to the first
/// space or comma. `None` when the key is absent - callers treat that as
/// "no data".
pub fn scalar_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = value_index(line, key)?;
    let rest = line.get(start..).unwrap_or("");
    let end = rest.find([' ', ',']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// List value for a key: space-delimited tokens after the marker, ending
/// at the first comma. Tokens present in `exclude` are dropped silently.
///
/// Unlike [`scalar_value`], a missing key here means the record is
/// structurally broken and the call fails hard.
pub fn list_values(line: &str, key: &str, exclude: &[String]) -> Result<Vec<String>, SvcError> {
    let start = value_index(line, key).ok_or_else(|| SvcError::MissingKey {
        key: key.to_string(),
        line: line.to_string(),
    })?;
    let rest = line.get(start..).unwrap_or("");
    let list = rest.split(',').next().unwrap_or("");
    Ok(list
        .split(' ')
        .filter(|t| !t.is_empty())
        .filter(|t| !exclude.iter().any(|e| e == t))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("keywords: A"), 0);
        assert_eq!(indent_of("  - first: x"), 4);
        assert_eq!(indent_of("      - keywords: A B"), 8);
        assert_eq!(indent_of("        passType: 4"), 8);
        // A line of nothing but indent characters has no indent
        assert_eq!(indent_of("    "), 0);
        assert_eq!(indent_of(""), 0);
    }

    #[test]
    fn test_is_new_entry() {
        assert!(is_new_entry("  - first: x"));
        assert!(is_new_entry("- keywords: A"));
        assert!(!is_new_entry("    passType: 4"));
        assert!(!is_new_entry("variants:"));
        assert!(!is_new_entry("    "));
        assert!(!is_new_entry(""));
    }

    #[test]
    fn test_merge_wrapped_continuation() {
        let physical = vec![
            "      - keywords: AAA BBB CCC",
            "          DDD EEE",
            "        passType: 4",
        ];
        let logical = merge_wrapped(&physical);
        assert_eq!(logical.len(), 2);
        assert_eq!(logical[0], "      - keywords: AAA BBB CCC DDD EEE");
        assert_eq!(logical[1], "        passType: 4");
    }

    #[test]
    fn test_merge_wrapped_keeps_key_lines() {
        let physical = vec!["  m_Shaders:", "  - first: {fileID: 46}", "    second:"];
        let logical = merge_wrapped(&physical);
        assert_eq!(logical.len(), 3);
    }

    #[test]
    fn test_scalar_value() {
        let line = "  - first: {fileID: 4800000, guid: aabbccdd, type: 3}";
        assert_eq!(scalar_value(line, "fileID"), Some("4800000"));
        assert_eq!(scalar_value(line, "guid"), Some("aabbccdd"));
        assert_eq!(scalar_value(line, "missing"), None);
    }

    #[test]
    fn test_scalar_value_empty_after_key() {
        assert_eq!(scalar_value("      variants:", "variants"), Some(""));
        assert_eq!(scalar_value("      variants: []", "variants"), Some("[]"));
    }

    #[test]
    fn test_list_values_basic() {
        let line = "      - keywords: AAA BBB CCC";
        let tokens = list_values(line, "keywords", &[]).unwrap();
        assert_eq!(tokens, vec!["AAA", "BBB", "CCC"]);
    }

    #[test]
    fn test_list_values_stops_at_comma() {
        let line = "      - keywords: AAA BBB, trailing junk";
        let tokens = list_values(line, "keywords", &[]).unwrap();
        assert_eq!(tokens, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_list_values_exclusion() {
        let line = "      - keywords: AAA STEREO_INSTANCING_ON BBB";
        let exclude = vec!["STEREO_INSTANCING_ON".to_string()];
        let tokens = list_values(line, "keywords", &exclude).unwrap();
        assert_eq!(tokens, vec!["AAA", "BBB"]);
    }

    #[test]
    fn test_list_values_empty() {
        let tokens = list_values("      - keywords: ", "keywords", &[]).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_list_values_missing_key_is_fatal() {
        let err = list_values("      - passType: 4", "keywords", &[]);
        assert!(matches!(err, Err(SvcError::MissingKey { .. })));
    }
}
