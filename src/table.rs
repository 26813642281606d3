// 📋 Table Model - Rows and the reconciled header set
// Rows arrive with whatever keys their source file declared; only after
// normalization is every row guaranteed to carry the full header set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// HEADER SET
// ============================================================================

/// Ordered, deduplicated union of column names across all input files.
///
/// Insertion order = first time each name was observed, in file-submission
/// order then intra-file field order. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderSet {
    names: Vec<String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        HeaderSet { names: Vec::new() }
    }

    /// Insert a column name, keeping first-seen order.
    ///
    /// Returns `true` if the name was new, `false` if it was already present
    /// (duplicates collapse silently - a later file re-declaring a column is
    /// the expected case, not an error).
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for name in iter {
            let name = name.into();
            set.insert(&name);
        }
        set
    }
}

// ============================================================================
// ROW
// ============================================================================

/// One record of cell values keyed by column name.
///
/// Keys are not guaranteed identical across rows from different source files
/// until normalization pads every row against the final [`HeaderSet`].
/// Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Row {
            cells: HashMap::new(),
        }
    }

    /// Set a cell value. A repeated key overwrites the earlier value, so
    /// within one record the last column under a duplicated name wins.
    pub fn set(&mut self, name: &str, value: &str) {
        self.cells.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells.get(name).map(String::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// A row is blank when every cell value trims to the empty string.
    /// A row with zero cells counts as blank.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }

    /// Back-fill empty-string values for every header name this row is
    /// missing. Existing keys and values are never touched, so padding an
    /// already-padded row is a no-op.
    pub fn pad(&mut self, headers: &HeaderSet) {
        for name in headers.iter() {
            self.cells.entry(name.to_string()).or_default();
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            let (name, value) = (name.into(), value.into());
            row.set(&name, &value);
        }
        row
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_set_keeps_first_seen_order() {
        let mut headers = HeaderSet::new();
        assert!(headers.insert("x"));
        assert!(headers.insert("y"));
        assert!(!headers.insert("y")); // duplicate collapses
        assert!(headers.insert("z"));

        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_header_set_from_iterator() {
        let headers: HeaderSet = ["a", "b", "a", "c"].into_iter().collect();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_header_set_serializes_as_array() {
        let headers: HeaderSet = ["a", "b"].into_iter().collect();
        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }

    #[test]
    fn test_row_blank_detection() {
        let blank: Row = [("a", ""), ("b", "   ")].into_iter().collect();
        assert!(blank.is_blank());

        let kept: Row = [("a", ""), ("b", "3")].into_iter().collect();
        assert!(!kept.is_blank());

        // Zero cells means nothing to key on
        assert!(Row::new().is_blank());
    }

    #[test]
    fn test_row_pad_fills_missing_only() {
        let headers: HeaderSet = ["a", "b", "c"].into_iter().collect();
        let mut row: Row = [("a", "1"), ("b", "2")].into_iter().collect();

        row.pad(&headers);

        assert_eq!(row.get("a"), Some("1")); // untouched
        assert_eq!(row.get("b"), Some("2"));
        assert_eq!(row.get("c"), Some("")); // back-filled
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_row_pad_is_idempotent() {
        let headers: HeaderSet = ["a", "b"].into_iter().collect();
        let mut row: Row = [("a", "1")].into_iter().collect();

        row.pad(&headers);
        let once = row.clone();
        row.pad(&headers);

        assert_eq!(row, once);
    }

    #[test]
    fn test_row_serializes_as_object() {
        let row: Row = [("a", "1")].into_iter().collect();
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
    }
}
