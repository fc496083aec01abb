use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    CliApp::new("catalog").run(run_import).await;
}

/// Parse and validate command-line arguments
///
/// Usage: catalog load [--workers N]
fn parse_args(args: Vec<String>, config: &mut CliConfig) -> Result<(), AppError> {
    let mut args = args.into_iter().skip(1);

    match args.next().as_deref() {
        Some("load") | Some("l") => {}
        _ => {
            return Err(AppError::InvalidArguments(
                "Usage: catalog load [--workers N]".to_string(),
            ));
        }
    }

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--workers" => {
                let value = args.next().ok_or_else(|| {
                    AppError::InvalidArguments("--workers requires a value".to_string())
                })?;
                config.workers = value.parse().map_err(|_| {
                    AppError::InvalidArguments(format!("invalid worker count {value:?}"))
                })?;
            }
            other => {
                return Err(AppError::InvalidArguments(format!(
                    "unknown argument {other:?}"
                )));
            }
        }
    }

    Ok(())
}

/// Main application logic - bulk-loads the catalog file into the store
async fn run_import(shutdown: CancellationToken) -> Result<(), AppError> {
    let mut config = CliConfig::from_env();
    parse_args(std::env::args().collect(), &mut config)?;

    let lines = TsvLineStream::from_file(&config.catalog_file).await?;
    let store = Arc::new(InMemoryCatalog::new());

    info!(
        file = %config.catalog_file.display(),
        workers = config.workers,
        queue_capacity = config.queue_capacity,
        "starting catalog import"
    );

    let summary = ImportPipeline::new(store.clone())
        .with_workers(config.workers)
        .with_queue_capacity(config.queue_capacity)
        .with_cancellation(shutdown)
        .run(lines)
        .await?;

    info!(
        imported = summary.imported,
        skipped = summary.skipped,
        brands = store.brand_count(),
        categories = store.category_count(),
        "catalog import finished"
    );

    Ok(())
}
