// 🔀 Merge Engine - Reconcile headers, filter blank rows, pad missing columns
//
// Two-phase contract:
//   1. reconcile - union of column names across files, first-seen order
//   2. normalize - drop all-blank rows, then back-fill every retained row
//      with empty strings for columns its source file never declared
//
// Both phases run sequentially over the parsed inputs in file-submission
// order, so the merged table is deterministic no matter how the files were
// read or uploaded.

use crate::error::MergeError;
use crate::export::export_csv;
use crate::parser::{parse_csv_file, parse_csv_text, ParsedFile};
use crate::table::{HeaderSet, Row};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// MERGE REPORT
// ============================================================================

/// Outcome of one merge invocation: the normalized table plus statistics.
///
/// Rebuilt from scratch on every merge; nothing is persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    /// Union of column names across all inputs, first-seen order.
    pub headers: HeaderSet,

    /// Filtered, padded rows. Every row's key set equals `headers`.
    pub rows: Vec<Row>,

    pub files_merged: usize,
    pub rows_kept: usize,
    pub blank_rows_dropped: usize,
    pub merged_at: DateTime<Utc>,
}

impl MergeReport {
    /// True when the merge produced no rows (e.g. zero files selected).
    /// Callers should not offer a download for an empty report.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the merged table to CSV text: one header line in
    /// reconciled order, then one line per row.
    pub fn to_csv(&self) -> Result<String, MergeError> {
        export_csv(&self.headers, &self.rows)
    }

    pub fn summary(&self) -> String {
        format!(
            "Merged {} files: {} columns, {} rows kept, {} blank rows dropped",
            self.files_merged,
            self.headers.len(),
            self.rows_kept,
            self.blank_rows_dropped
        )
    }
}

// ============================================================================
// MERGE ENGINE
// ============================================================================

/// Pure, stateless merge core. One instance can be reused across
/// invocations; it holds no accumulators between calls.
///
/// Example:
/// ```
/// use csv_merger::{parse_csv_text, MergeEngine};
///
/// let a = parse_csv_text("a.csv", "x,y\n1,2\n").unwrap();
/// let b = parse_csv_text("b.csv", "y,z\n3,4\n").unwrap();
///
/// let report = MergeEngine::new().merge(&[a, b]);
/// assert_eq!(report.headers.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
/// assert_eq!(report.rows.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        MergeEngine
    }

    /// Union of the per-file header lists, first-occurrence order preserved,
    /// duplicates collapsed. Empty input yields an empty set. Pure
    /// accumulation - no error conditions.
    pub fn reconcile(&self, header_lists: &[Vec<String>]) -> HeaderSet {
        let mut headers = HeaderSet::new();
        for list in header_lists {
            for name in list {
                headers.insert(name);
            }
        }
        headers
    }

    /// Filter-then-pad over every file's rows, concatenated in
    /// file-submission order:
    ///
    /// - Step 1: drop rows whose every cell trims to the empty string.
    /// - Step 2: back-fill retained rows with `""` for any header name
    ///   absent from that row. Present keys are never overwritten, so
    ///   re-running on already-padded rows changes nothing.
    pub fn normalize(&self, rows_per_file: &[Vec<Row>], headers: &HeaderSet) -> Vec<Row> {
        let mut table = Vec::new();

        for rows in rows_per_file {
            for row in rows {
                if row.is_blank() {
                    continue;
                }
                let mut row = row.clone();
                row.pad(headers);
                table.push(row);
            }
        }

        table
    }

    /// Run both phases over already-parsed files and build the report.
    /// Parsing happens before this call, so by the time `merge` runs every
    /// input has either succeeded or the whole operation was abandoned.
    pub fn merge(&self, files: &[ParsedFile]) -> MergeReport {
        let header_lists: Vec<Vec<String>> =
            files.iter().map(|f| f.headers.clone()).collect();
        let headers = self.reconcile(&header_lists);

        let rows_per_file: Vec<Vec<Row>> = files.iter().map(|f| f.rows.clone()).collect();
        let rows = self.normalize(&rows_per_file, &headers);

        let total_rows: usize = files.iter().map(|f| f.rows.len()).sum();

        MergeReport {
            headers,
            files_merged: files.len(),
            rows_kept: rows.len(),
            blank_rows_dropped: total_rows - rows.len(),
            rows,
            merged_at: Utc::now(),
        }
    }
}

// ============================================================================
// PIPELINE ENTRY POINTS
// ============================================================================

/// Parse every file on disk, then merge. Aborts on the first file that
/// fails to read or parse - no partial table is produced.
pub fn merge_files<P: AsRef<Path>>(paths: &[P]) -> Result<MergeReport, MergeError> {
    let mut parsed = Vec::with_capacity(paths.len());
    for path in paths {
        parsed.push(parse_csv_file(path.as_ref())?);
    }
    Ok(MergeEngine::new().merge(&parsed))
}

/// Merge in-memory file contents, given as `(name, raw CSV text)` pairs in
/// submission order. Same all-or-nothing parse policy as [`merge_files`].
pub fn merge_contents(files: &[(String, String)]) -> Result<MergeReport, MergeError> {
    let mut parsed = Vec::with_capacity(files.len());
    for (name, text) in files {
        parsed.push(parse_csv_text(name, text)?);
    }
    Ok(MergeEngine::new().merge(&parsed))
}

// ============================================================================
// TESTS
// ============================================================================
