//! Generic periodic-refresh driver for REST-backed panels.
//!
//! Every REST panel (order book, trades, chart) follows the same cycle:
//! fetch on a background task, deliver the result to the event loop over
//! the message channel, sleep, repeat. [`RefreshScheduler`] captures that
//! cycle once; the panels differ only in the fetch closure and interval.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::tui::Message;

/// Drives one panel's refresh loop until stopped.
///
/// An instance is bound to one symbol for its whole life. Symbol switches
/// stop the old instance and build a new one; instances are never reused.
pub struct RefreshScheduler {
    live: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Starts the refresh loop.
    ///
    /// `fetch` runs immediately and then once per `interval`. A `Some`
    /// result is delivered on `tx`; `None` means the cycle is skipped
    /// (typically a logged fetch failure) and the previous panel state
    /// stands. Results are only delivered while the scheduler is live, so
    /// a fetch that resolves after [`stop`](Self::stop) is discarded.
    pub fn start<F, Fut>(
        interval: Duration,
        tx: mpsc::UnboundedSender<Message>,
        mut fetch: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Option<Message>> + Send + 'static,
    {
        let live = Arc::new(AtomicBool::new(true));
        let task_live = Arc::clone(&live);

        let task = tokio::spawn(async move {
            loop {
                let result = fetch().await;

                if !task_live.load(Ordering::SeqCst) {
                    return;
                }
                if let Some(message) = result
                    && tx.send(message).is_err()
                {
                    // Event loop gone, nothing left to refresh for.
                    return;
                }

                tokio::time::sleep(interval).await;
                if !task_live.load(Ordering::SeqCst) {
                    return;
                }
            }
        });

        Self { live, task }
    }

    /// Stops the loop and discards any in-flight fetch result.
    pub fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
        self.task.abort();
    }

    /// Returns `true` until [`stop`](Self::stop) is called.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
