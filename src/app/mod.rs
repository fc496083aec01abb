pub mod cli;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use cli::CliApp;
pub use config::CliConfig;
pub use error::AppError;
