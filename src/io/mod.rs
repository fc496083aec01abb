pub mod error;
pub mod tsv_reader;

// Re-export commonly used types
pub use error::IoError;
pub use tsv_reader::{RawLine, TsvLineStream};
