// 📂 CSV Parsing Collaborator
// Thin wrapper over the `csv` crate: first row keys every record below it.
// Malformed input surfaces as a distinct MergeError::Parse - records are
// never silently thrown away.

use crate::error::MergeError;
use crate::table::Row;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One parsed input file: its header row plus its data rows, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedFile {
    /// Display name of the source (file name or upload name), kept for
    /// error messages and logging.
    pub name: String,

    /// Ordered column names from the header row. Empty input contributes
    /// zero names.
    pub headers: Vec<String>,

    /// Data rows keyed by header name, in the order the file declared them.
    pub rows: Vec<Row>,
}

/// Parse raw CSV text, treating the first row as the header row.
///
/// The reader is strict about field counts: a record that is wider or
/// narrower than the header row cannot be keyed against it and is reported
/// as [`MergeError::Parse`] rather than padded or truncated. Quoting follows
/// standard CSV rules (handled entirely by the codec).
pub fn parse_csv_text(name: &str, text: &str) -> Result<ParsedFile, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| MergeError::parse(name, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| MergeError::parse(name, e))?;

        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            row.set(header, value);
        }
        rows.push(row);
    }

    Ok(ParsedFile {
        name: name.to_string(),
        headers,
        rows,
    })
}

/// Parse a CSV file from disk. I/O failures are reported separately from
/// parse failures so callers can word their messages accordingly.
pub fn parse_csv_file(path: &Path) -> Result<ParsedFile, MergeError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown.csv")
        .to_string();

    let text = fs::read_to_string(path).map_err(|e| MergeError::read(&name, e))?;

    parse_csv_text(&name, &text)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_file() {
        let parsed = parse_csv_text("file1.csv", "a,b\n1,2\n,\n").unwrap();

        assert_eq!(parsed.name, "file1.csv");
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].get("a"), Some("1"));
        assert_eq!(parsed.rows[0].get("b"), Some("2"));
        // The all-empty row parses fine; filtering is the merge step's job
        assert_eq!(parsed.rows[1].get("a"), Some(""));
        assert_eq!(parsed.rows[1].get("b"), Some(""));
    }

    #[test]
    fn test_parse_empty_input_contributes_nothing() {
        let parsed = parse_csv_text("empty.csv", "").unwrap();
        assert!(parsed.headers.is_empty());
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_parse_quoted_fields() {
        let text = "name,note\n\"Smith, Jane\",\"said \"\"hi\"\"\"\n";
        let parsed = parse_csv_text("quoted.csv", text).unwrap();

        assert_eq!(parsed.rows[0].get("name"), Some("Smith, Jane"));
        assert_eq!(parsed.rows[0].get("note"), Some("said \"hi\""));
    }

    #[test]
    fn test_parse_ragged_record_is_a_parse_failure() {
        // Three fields under a two-column header: the extra cell has no
        // column to belong to, so the whole file is rejected.
        let err = parse_csv_text("ragged.csv", "a,b\n1,2,3\n").unwrap_err();
        assert!(err.is_parse_failure());
        assert!(err.to_string().contains("ragged.csv"));
    }

    #[test]
    fn test_parse_missing_file_is_a_read_failure() {
        let err = parse_csv_file(Path::new("does_not_exist.csv")).unwrap_err();
        assert!(!err.is_parse_failure());
        assert!(matches!(err, MergeError::Read { .. }));
    }
}
