// 💾 Export - Serialize the merged table back to CSV text
// Delegates all quoting/escaping to the `csv` crate; this module only fixes
// the shape: one header line in reconciled order, then one line per row.

use crate::error::MergeError;
use crate::table::{HeaderSet, Row};

/// File name offered to the user for the merged download.
pub const MERGED_FILE_NAME: &str = "merged_file.csv";

/// MIME type for the merged download.
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// Serialize headers + rows to CSV text.
///
/// Field order within each line follows the reconciled header order; a row
/// missing a header name (possible only on unnormalized input) serializes
/// that field as the empty string. Fields containing commas, quotes or
/// newlines are quoted by the codec, with embedded quotes doubled.
///
/// An empty header set (zero files selected) exports the empty string; a
/// non-empty header set with zero rows exports the header line only.
pub fn export_csv(headers: &HeaderSet, rows: &[Row]) -> Result<String, MergeError> {
    if headers.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(headers.iter())
        .map_err(|e| MergeError::Export(e.to_string()))?;

    for row in rows {
        let record: Vec<&str> = headers
            .iter()
            .map(|name| row.get(name).unwrap_or(""))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| MergeError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MergeError::Export(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| MergeError::Export(e.to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
