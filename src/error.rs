// Error taxonomy for the merge pipeline.
// A parse failure aborts the whole merge: no partial table is ever produced.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    /// An input file could not be read from disk.
    #[error("could not read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be parsed as CSV (e.g. a record whose field
    /// count does not match the header row, so its cells cannot be keyed).
    #[error("could not parse {file} as CSV: {source}")]
    Parse {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// The merged table could not be serialized back to CSV text.
    #[error("could not serialize merged output: {0}")]
    Export(String),
}

impl MergeError {
    pub fn read(file: &str, source: std::io::Error) -> Self {
        MergeError::Read {
            file: file.to_string(),
            source,
        }
    }

    pub fn parse(file: &str, source: csv::Error) -> Self {
        MergeError::Parse {
            file: file.to_string(),
            source,
        }
    }

    /// True when the failure came from CSV parsing (as opposed to I/O or
    /// export). Callers use this to word the message shown to the user.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, MergeError::Parse { .. })
    }
}
