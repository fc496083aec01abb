use std::io;
use thiserror::Error;

use crate::import::ImportError;
use crate::io::IoError;
use crate::storage::StorageError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TSV IO error: {0}")]
    CsvIo(#[from] IoError),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}
