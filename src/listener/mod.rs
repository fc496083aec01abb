pub mod notifier;
pub mod updater;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

// Re-export commonly used types
pub use notifier::{ChangeEvent, ChangeNotifier, DEFAULT_NOTIFY_TIMEOUT};
pub use updater::StatisticsUpdater;

use crate::storage::CatalogStore;

/// Wire a notifier/updater pair over a single-slot channel
///
/// The notifier goes to write-path handlers; the updater loop is spawned as
/// its own task and stopped through `shutdown`.
pub fn statistics_channel<S: CatalogStore>(
    store: Arc<S>,
    shutdown: CancellationToken,
) -> (ChangeNotifier, StatisticsUpdater<S>) {
    let (tx, rx) = mpsc::channel(1);
    (
        ChangeNotifier::new(tx),
        StatisticsUpdater::new(store, rx, shutdown),
    )
}
