use std::pin::pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::ImportError;
use super::record::ParsedRow;
use super::resolver::{ReferenceKind, ReferenceResolver};
use crate::domain::Product;
use crate::io::{IoError, RawLine};
use crate::storage::CatalogStore;

/// Default worker-pool size
pub const DEFAULT_WORKERS: usize = 16;

/// Default bounded-queue capacity between the record source and the workers
///
/// A separate tunable from the worker count: the queue bounds memory while
/// the pool bounds store concurrency.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2000;

/// Counters reported by a completed import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Products persisted to the store
    pub imported: u64,
    /// Malformed input lines logged and skipped by the record source
    pub skipped: u64,
}

/// Single-producer/multi-worker bulk loader for the catalog file
///
/// One producer task drains the line stream into a bounded queue (blocking on
/// backpressure when the workers fall behind); a fixed pool of workers pulls
/// lines, resolves brand and category references, and persists products.
/// Malformed lines are skipped at the source; a numeric-parse or store
/// failure is terminal and cancels the whole run, first error wins.
pub struct ImportPipeline<S> {
    resolver: Arc<ReferenceResolver<S>>,
    workers: usize,
    queue_capacity: usize,
    cancel: CancellationToken,
}

impl<S: CatalogStore + 'static> ImportPipeline<S> {
    /// Create a pipeline with default worker count and queue capacity
    pub fn new(store: Arc<S>) -> Self {
        Self {
            resolver: Arc::new(ReferenceResolver::new(store)),
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the worker-pool size (clamped to at least one worker)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the bounded-queue capacity between source and workers
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    /// Use an externally owned cancellation token
    ///
    /// Cancelling it stops the record source, drains the workers to their
    /// stopped state and unblocks the run without an error.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that cancels this pipeline
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the import to completion, cancellation, or first terminal error
    pub async fn run<St>(self, lines: St) -> Result<ImportSummary, ImportError>
    where
        St: Stream<Item = Result<RawLine, IoError>> + Send + 'static,
    {
        let ImportPipeline {
            resolver,
            workers,
            queue_capacity,
            cancel,
        } = self;

        let (line_tx, line_rx) = mpsc::channel::<RawLine>(queue_capacity);
        let line_rx = Arc::new(Mutex::new(line_rx));
        // Capacity equal to the pool size: each worker reports at most one
        // terminal error, so a send can never block a stopping worker.
        let (err_tx, mut err_rx) = mpsc::channel::<ImportError>(workers);

        let producer = tokio::spawn(source_task(lines, line_tx, cancel.clone()));

        let mut worker_handles = Vec::with_capacity(workers);
        for id in 0..workers {
            worker_handles.push(tokio::spawn(worker_task(
                id,
                resolver.clone(),
                line_rx.clone(),
                err_tx.clone(),
                cancel.clone(),
            )));
        }
        drop(err_tx);

        // The error channel closes once every worker has stopped, which is
        // what terminates this receive loop even on a run with zero lines.
        let mut first_error: Option<ImportError> = None;
        while let Some(err) = err_rx.recv().await {
            if first_error.is_none() {
                cancel.cancel();
                first_error = Some(err);
            }
        }

        let skipped = producer.await.unwrap_or(0);
        let mut imported = 0;
        for handle in worker_handles {
            imported += handle.await.unwrap_or(0);
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(ImportSummary { imported, skipped }),
        }
    }
}

/// Record source: drain the line stream into the bounded queue
///
/// Malformed lines are logged and skipped; dropping the queue sender on exit
/// signals completion to the workers. Returns the skipped-line count.
async fn source_task<St>(lines: St, queue: mpsc::Sender<RawLine>, cancel: CancellationToken) -> u64
where
    St: Stream<Item = Result<RawLine, IoError>> + Send,
{
    let mut skipped = 0u64;
    let mut lines = pin!(lines);

    loop {
        let item = tokio::select! {
            _ = cancel.cancelled() => break,
            item = lines.next() => item,
        };

        match item {
            None => break,
            Some(Ok(line)) => {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    sent = queue.send(line) => {
                        // A closed queue means every worker is gone already.
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
            Some(Err(err)) => {
                warn!(%err, "skipping malformed line");
                skipped += 1;
            }
        }
    }

    skipped
}

/// One pool worker: receive, parse, resolve, persist
///
/// Stops on queue-closed-and-drained or on cancellation. Its first terminal
/// error goes to the error channel and ends the worker; siblings are stopped
/// by the pipeline's cancellation. Returns the lines it imported.
async fn worker_task<S: CatalogStore>(
    id: usize,
    resolver: Arc<ReferenceResolver<S>>,
    queue: Arc<Mutex<mpsc::Receiver<RawLine>>>,
    errors: mpsc::Sender<ImportError>,
    cancel: CancellationToken,
) -> u64 {
    let mut imported = 0u64;

    loop {
        let line = {
            let mut queue = queue.lock().await;
            tokio::select! {
                _ = cancel.cancelled() => None,
                line = queue.recv() => line,
            }
        };

        let Some(line) = line else { break };

        match handle_line(resolver.as_ref(), line).await {
            Ok(()) => imported += 1,
            Err(err) => {
                let _ = errors.send(err).await;
                break;
            }
        }
    }

    debug!(worker = id, imported, "worker stopped");
    imported
}

/// Process one line: strict parse, resolve references, persist the product
///
/// Reference resolution strictly precedes the product insert so the row's
/// foreign keys always point at existing rows.
async fn handle_line<S: CatalogStore>(
    resolver: &ReferenceResolver<S>,
    line: RawLine,
) -> Result<(), ImportError> {
    let row = ParsedRow::from_line(&line)?;
    let line_number = row.line;
    let external_id = row.external_id;
    let store_error = |source| ImportError::Store {
        line: line_number,
        source,
    };

    let brand_id = resolver
        .resolve(ReferenceKind::Brand, &row.brand)
        .await
        .map_err(store_error)?;
    let category_id = resolver
        .resolve(ReferenceKind::Category, &row.category)
        .await
        .map_err(store_error)?;

    let product = Product {
        id: row.external_id,
        name: row.name,
        barcode: row.barcode,
        category_id,
        brand_id,
    };
    resolver
        .store()
        .create_product(product)
        .await
        .map_err(store_error)?;

    debug!(external_id, line = line_number, "loaded product");
    Ok(())
}
