use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::error;

use super::error::AppError;

/// How long a signalled run may keep draining before the process exits
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Reusable CLI application runner that handles:
/// - Signal handling (SIGINT, SIGTERM, SIGHUP)
/// - Cooperative cancellation of the running pipeline
/// - Exit codes (0 = success, 1 = error, 130 = SIGINT, 143 = SIGTERM)
pub struct CliApp {
    name: String,
}

impl CliApp {
    /// Create a new CLI application runner
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Run the CLI application with signal handling and cooperative shutdown
    ///
    /// The main function receives a cancellation token; on a signal the token
    /// is cancelled first and the run gets a bounded grace period to stop its
    /// workers before the process exits with the signal's code.
    ///
    /// This function never returns - it calls std::process::exit with the
    /// appropriate code
    pub async fn run<F, Fut>(self, main_fn: F) -> !
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let shutdown = CancellationToken::new();

        let signal_fut = self.wait_for_signal();
        let main_fut = main_fn(shutdown.clone());
        tokio::pin!(main_fut);

        tokio::select! {
            result = &mut main_fut => {
                match result {
                    Ok(()) => std::process::exit(0),
                    Err(e) => {
                        error!("{}: {e}", self.name);
                        std::process::exit(1);
                    }
                }
            }
            signal_code = signal_fut => {
                shutdown.cancel();
                eprintln!("{}: waiting for workers to stop", self.name);
                let _ = tokio::time::timeout(SHUTDOWN_GRACE, &mut main_fut).await;
                std::process::exit(signal_code);
            }
        }
    }

    /// Wait for any Unix signal (SIGINT, SIGTERM, SIGHUP) or Ctrl+C
    /// Returns the exit code to use (130 for SIGINT, 143 for SIGTERM, etc.)
    async fn wait_for_signal(&self) -> i32 {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm =
                signal(SignalKind::terminate()).expect("Failed to setup SIGTERM handler");
            let mut sigint =
                signal(SignalKind::interrupt()).expect("Failed to setup SIGINT handler");
            let mut sighup = signal(SignalKind::hangup()).expect("Failed to setup SIGHUP handler");

            tokio::select! {
                _ = sigterm.recv() => {
                    eprintln!("Received SIGTERM");
                    143 // 128 + 15
                }
                _ = sigint.recv() => {
                    eprintln!("Received SIGINT");
                    130 // 128 + 2
                }
                _ = sighup.recv() => {
                    eprintln!("Received SIGHUP");
                    129 // 128 + 1
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to setup Ctrl+C handler");
            eprintln!("Received Ctrl+C");
            130
        }
    }
}
