use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::trace;

/// A "shopping list changed" event; transient, at-most-once delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub shopping_list_id: i64,
}

/// How long [`ChangeNotifier::notify`] waits for the updater before dropping
/// the event
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(1);

/// Best-effort, timeout-bounded sender of change events
///
/// Write-path handlers hold a clone of this and call [`notify`] after every
/// shopping-list mutation. Delivery is deliberately decoupled from the
/// caller's latency: when the updater is not ready within the timeout the
/// event is dropped and the call returns anyway. A dropped event is not an
/// error, since recomputation is idempotent and a later notification catches
/// up.
///
/// [`notify`]: ChangeNotifier::notify
#[derive(Clone)]
pub struct ChangeNotifier {
    events: mpsc::Sender<ChangeEvent>,
    timeout: Duration,
}

impl ChangeNotifier {
    pub(crate) fn new(events: mpsc::Sender<ChangeEvent>) -> Self {
        Self {
            events,
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        }
    }

    /// Override the handoff timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Hand a change event to the statistics updater, waiting at most the
    /// configured timeout
    ///
    /// Never blocks the caller beyond the timeout, regardless of updater
    /// health.
    pub async fn notify(&self, shopping_list_id: i64) {
        let event = ChangeEvent { shopping_list_id };

        match time::timeout(self.timeout, self.events.send(event)).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                trace!(shopping_list_id, "statistics updater gone, dropping change event");
            }
            Err(_) => {
                trace!(shopping_list_id, "statistics updater busy, dropping change event");
            }
        }
    }
}
