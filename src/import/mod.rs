pub mod error;
pub mod pipeline;
pub mod record;
pub mod resolver;

// Re-export commonly used types
pub use error::ImportError;
pub use pipeline::{ImportPipeline, ImportSummary};
pub use record::ParsedRow;
pub use resolver::{ReferenceKind, ReferenceResolver};
