use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::notifier::ChangeEvent;
use crate::storage::{CatalogStore, StorageError};

/// Background loop that recomputes shopping-list aggregates on change events
///
/// Runs until shutdown is requested or every notifier has been dropped. A
/// failed recompute ends the loop and surfaces the error to the supervisor;
/// restarting the task is a deployment-level concern, not retried here.
pub struct StatisticsUpdater<S> {
    store: Arc<S>,
    events: mpsc::Receiver<ChangeEvent>,
    shutdown: CancellationToken,
}

impl<S: CatalogStore> StatisticsUpdater<S> {
    pub(crate) fn new(
        store: Arc<S>,
        events: mpsc::Receiver<ChangeEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            store,
            events,
            shutdown,
        }
    }

    /// Drain events until shutdown, recomputing the aggregate for each
    pub async fn run(mut self) -> Result<(), StorageError> {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    debug!("statistics updater shutting down");
                    return Ok(());
                }
                event = self.events.recv() => {
                    let Some(event) = event else {
                        debug!("all notifiers dropped, statistics updater stopping");
                        return Ok(());
                    };

                    if let Err(err) = self
                        .store
                        .recompute_shopping_list_statistic(event.shopping_list_id)
                        .await
                    {
                        error!(
                            shopping_list_id = event.shopping_list_id,
                            %err,
                            "statistic recompute failed, stopping updater"
                        );
                        return Err(err);
                    }

                    debug!(
                        shopping_list_id = event.shopping_list_id,
                        "recomputed shopping list statistic"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::listener::statistics_channel;
    use crate::storage::InMemoryCatalog;

    #[tokio::test]
    async fn recomputes_on_notification() {
        let store = Arc::new(InMemoryCatalog::new());
        let list = store.create_shopping_list("groceries");
        store.add_product_to_list(list, 10).unwrap();
        store.set_product_checked(list, 10, true).unwrap();

        let shutdown = CancellationToken::new();
        let (notifier, updater) = statistics_channel(store.clone(), shutdown.clone());
        let handle = tokio::spawn(updater.run());

        notifier.notify(list).await;

        // Wait for the updater to drain the event.
        let mut stat = None;
        for _ in 0..100 {
            stat = store.statistic(list);
            if stat.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let stat = stat.expect("statistic was not recomputed");
        assert_eq!(stat.products_count, 1);
        assert_eq!(stat.checked_products_count, 1);

        shutdown.cancel();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn shutdown_exits_cleanly() {
        let store = Arc::new(InMemoryCatalog::new());
        let shutdown = CancellationToken::new();
        let (_notifier, updater) = statistics_channel(store, shutdown.clone());

        let handle = tokio::spawn(updater.run());
        shutdown.cancel();

        let result = timeout(Duration::from_secs(1), handle)
            .await
            .expect("updater did not observe shutdown")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn stops_when_all_notifiers_are_dropped() {
        let store = Arc::new(InMemoryCatalog::new());
        let (notifier, updater) = statistics_channel(store, CancellationToken::new());

        drop(notifier);

        let result = timeout(Duration::from_secs(1), updater.run())
            .await
            .expect("updater did not stop on closed channel");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failed_recompute_is_fail_stop() {
        let store = Arc::new(InMemoryCatalog::new());
        let shutdown = CancellationToken::new();
        let (notifier, updater) = statistics_channel(store, shutdown);
        let handle = tokio::spawn(updater.run());

        // No such shopping list: recompute fails and the loop terminates.
        notifier.notify(999).await;

        let result = timeout(Duration::from_secs(1), handle)
            .await
            .expect("updater did not fail-stop")
            .unwrap();
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn write_path_is_never_coupled_to_a_wedged_updater() {
        let store = Arc::new(InMemoryCatalog::new());
        let list = store.create_shopping_list("groceries");

        // Updater never spawned: the receiver exists but nobody drains it.
        let (notifier, _updater) = statistics_channel(store.clone(), CancellationToken::new());
        let notifier = notifier.with_timeout(Duration::from_millis(50));

        notifier.notify(list).await;
        let start = std::time::Instant::now();
        notifier.notify(list).await;

        assert!(start.elapsed() < Duration::from_secs(1));
        // Dropped on the floor: no side effect on the store.
        assert!(store.statistic(list).is_none());
    }
}
