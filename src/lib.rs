// CSV Merger - Core Library
// Merges heterogeneous CSV files into one table: union of headers in
// first-seen order, blank rows dropped, missing columns padded with "".
// Exposes all modules for use in the CLI, the web server, and tests.

pub mod error;
pub mod export;
pub mod merge;
pub mod parser;
pub mod table;

// Re-export commonly used types
pub use error::MergeError;
pub use export::{export_csv, CSV_MIME_TYPE, MERGED_FILE_NAME};
pub use merge::{merge_contents, merge_files, MergeEngine, MergeReport};
pub use parser::{parse_csv_file, parse_csv_text, ParsedFile};
pub use table::{HeaderSet, Row};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
