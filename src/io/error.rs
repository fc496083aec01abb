use std::io;
use thiserror::Error;

/// IO-level errors for TSV reading
///
/// These are the *recoverable* errors of the import pipeline: a malformed
/// input line is logged and skipped by the record source without failing
/// the run.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv_async::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let wrapped = IoError::from(io_err);

        match wrapped {
            IoError::Io(_) => {}
            _ => panic!("Expected Io error variant"),
        }
    }
}
