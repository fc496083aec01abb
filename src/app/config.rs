use std::env;
use std::path::PathBuf;

use crate::import::pipeline::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};

const DEFAULT_CATALOG_FILE: &str = "data/products.tsv";

/// CLI configuration sourced from the environment
///
/// - `CATALOG_FILE_PATH`: path of the tab-separated catalog file
/// - `IMPORT_WORKERS`: worker-pool size
/// - `IMPORT_QUEUE_CAPACITY`: bounded-queue capacity between source and pool
///
/// Unset or unparsable values fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub catalog_file: PathBuf,
    pub workers: usize,
    pub queue_capacity: usize,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self {
            catalog_file: PathBuf::from(string_or(
                env::var("CATALOG_FILE_PATH").ok(),
                DEFAULT_CATALOG_FILE,
            )),
            workers: usize_or(env::var("IMPORT_WORKERS").ok(), DEFAULT_WORKERS),
            queue_capacity: usize_or(
                env::var("IMPORT_QUEUE_CAPACITY").ok(),
                DEFAULT_QUEUE_CAPACITY,
            ),
        }
    }
}

fn string_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default.to_string(),
    }
}

fn usize_or(value: Option<String>, default: usize) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}
