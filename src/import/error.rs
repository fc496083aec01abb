use thiserror::Error;

use crate::storage::StorageError;

/// Terminal errors of the import pipeline
///
/// Unlike the recoverable [`IoError`](crate::io::IoError) items the record
/// source skips over, any of these stops the whole run: a numeric field that
/// fails strict parsing or a store write failure may indicate a corrupted
/// file or a store outage. Each variant carries the offending line number so
/// the operator can find the record.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("line {line}: {field} {value:?} is not a base-10 integer")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: missing column {column}")]
    MissingColumn { line: u64, column: usize },

    #[error("line {line}: {source}")]
    Store {
        line: u64,
        #[source]
        source: StorageError,
    },
}

impl ImportError {
    /// Line number of the record that caused this error
    pub fn line(&self) -> u64 {
        match self {
            ImportError::InvalidNumber { line, .. }
            | ImportError::MissingColumn { line, .. }
            | ImportError::Store { line, .. } => *line,
        }
    }
}
