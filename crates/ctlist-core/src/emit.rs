//! Rust source rendering of the ordered log records.
//!
//! The output is a self-contained module:
//!
//! ```text
//! //! generated header
//! #![forbid(...)]
//! pub static LOGS: [&sct::Log; N] = [
//!     /* provenance JSON */
//!     &sct::Log { description: .., url: .., operated_by: .., key: b"..", id: [..], max_merge_delay: .., },
//!     ...
//! ];
//! ```
//!
//! Rendering makes no decisions: records are written in the order given.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::registry::LogRecord;

/// Default element type of the generated table.
pub const DEFAULT_LOG_TYPE: &str = "sct::Log";

const HEADER: &str = "//!
//! This library is automatically generated from Google's list of known CT
//! logs.  Don't edit it.
//!
//! The generation is done deterministically so you can verify it
//! yourself by inspecting and re-running the generation process.
//!

#![forbid(unsafe_code,
          unstable_features)]
#![deny(trivial_casts,
        trivial_numeric_casts,
        unused_import_braces,
        unused_extern_crates,
        unused_qualifications)]
";

const FOOTER: &str = "];\n";

/// Emitter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Rust path of the struct each table element points to.
    pub log_type: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            log_type: DEFAULT_LOG_TYPE.to_string(),
        }
    }
}

/// Render `records` in the given order.
pub fn render(records: &[LogRecord], options: &EmitOptions) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(
        out,
        "pub static LOGS: [&{}; {}] = [",
        options.log_type,
        records.len()
    );
    for record in records {
        render_record(&mut out, record, &options.log_type);
    }
    out.push_str(FOOTER);
    out
}

fn render_record(out: &mut String, record: &LogRecord, log_type: &str) {
    let _ = write!(
        out,
        "    {comment}
    &{log_type} {{
        description: \"{description}\",
        url: \"{url}\",
        operated_by: \"{operator}\",
        key: b\"{key}\",
        id: [ {id} ],
        max_merge_delay: {mmd},
    }},

",
        comment = provenance_comment(&record.provenance),
        description = record.description.escape_default(),
        url = record.url.escape_default(),
        operator = record.operator_names.escape_default(),
        key = escape_bytes(&record.raw_key),
        id = id_list(record.key_id.as_bytes()),
        mmd = record.max_merge_delay,
    );
}

/// Pretty-printed JSON inside a block comment, one ` * ` line per JSON line.
///
/// `*` and `/` only occur inside JSON strings, so comment delimiters (which
/// nest in Rust) are broken up with the equivalent `\u002a` escape.
fn provenance_comment(provenance: &serde_json::Value) -> String {
    let sorted = sort_keys(provenance);
    let json = serde_json::to_string_pretty(&sorted)
        .unwrap_or_else(|_| sorted.to_string())
        .replace("*/", "\\u002a/")
        .replace("/*", "/\\u002a");
    let body = json.lines().collect::<Vec<_>>().join("\n     * ");
    format!("/*\n     * {body}\n     */")
}

/// Rebuild `value` with object keys in byte order at every level.
fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_keys(v)))
                    .collect(),
            )
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for b in bytes {
        let _ = write!(out, "\\x{b:02x}");
    }
    out
}

fn id_list(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_id::KeyId;
    use serde_json::json;

    fn record() -> LogRecord {
        let raw_key = vec![0x04, 0xab, 0x00];
        LogRecord {
            description: "Google 'Argon2020' log".to_string(),
            url: "ct.googleapis.com/logs/argon2020/".to_string(),
            max_merge_delay: 86400,
            operator_names: "Google".to_string(),
            key_id: KeyId::of(&raw_key),
            raw_key,
            provenance: json!({
                "url": "ct.googleapis.com/logs/argon2020/",
                "description": "Google 'Argon2020' log",
                "operated_by": [0],
            }),
        }
    }

    #[test]
    fn test_empty_table() {
        let out = render(&[], &EmitOptions::default());
        assert!(out.starts_with("//!\n//! This library is automatically generated"));
        assert!(out.contains("pub static LOGS: [&sct::Log; 0] = [\n];\n"));
    }

    #[test]
    fn test_record_fields() {
        let r = record();
        let out = render(std::slice::from_ref(&r), &EmitOptions::default());

        assert!(out.contains("pub static LOGS: [&sct::Log; 1] = ["));
        assert!(out.contains("        description: \"Google \\'Argon2020\\' log\",\n"));
        assert!(out.contains("        url: \"ct.googleapis.com/logs/argon2020/\",\n"));
        assert!(out.contains("        operated_by: \"Google\",\n"));
        assert!(out.contains("        key: b\"\\x04\\xab\\x00\",\n"));
        assert!(out.contains("        max_merge_delay: 86400,\n"));

        let id = r
            .key_id
            .as_bytes()
            .iter()
            .map(|b| format!("0x{b:02x}"))
            .collect::<Vec<_>>()
            .join(", ");
        assert!(out.contains(&format!("        id: [ {id} ],\n")));
        assert!(out.ends_with("    },\n\n];\n"));
    }

    #[test]
    fn test_provenance_comment_sorted_and_indented() {
        let out = render(&[record()], &EmitOptions::default());
        let expected = "    /*
     * {
     *   \"description\": \"Google 'Argon2020' log\",
     *   \"operated_by\": [
     *     0
     *   ],
     *   \"url\": \"ct.googleapis.com/logs/argon2020/\"
     * }
     */
    &sct::Log {";
        assert!(out.contains(expected), "{out}");
    }

    #[test]
    fn test_comment_cannot_be_closed_by_content() {
        let mut r = record();
        r.provenance = json!({ "description": "evil */ fn main() {} /*" });
        let out = render(&[r], &EmitOptions::default());
        assert!(out.contains("evil \\u002a/ fn main() {} /\\u002a"));
        assert_eq!(out.matches("*/").count(), 1);
        assert_eq!(out.matches("/*").count(), 1);
    }

    #[test]
    fn test_custom_log_type() {
        let options = EmitOptions {
            log_type: "crate::Log".to_string(),
        };
        let out = render(&[record()], &options);
        assert!(out.contains("pub static LOGS: [&crate::Log; 1] = ["));
        assert!(out.contains("    &crate::Log {\n"));
    }

    #[test]
    fn test_deterministic() {
        let records = vec![record(), record()];
        assert_eq!(
            render(&records, &EmitOptions::default()),
            render(&records, &EmitOptions::default())
        );
    }
}
