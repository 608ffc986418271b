//! Cancellable delayed tasks.
//!
//! Used by toast auto-dismissal and by the debounced search box. Tasks run on
//! the ambient tokio runtime; cancelling a task that already fired or was
//! already cancelled does nothing.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::warn;

/// Runs `task` after `delay` on the current runtime.
///
/// Returns `None` when called outside a tokio runtime, in which case nothing
/// is scheduled.
pub fn run_after<F>(delay: Duration, task: F) -> Option<AbortHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        warn!(?delay, "no async runtime available, delayed task dropped");
        return None;
    };

    let handle = runtime.spawn(async move {
        tokio::time::sleep(delay).await;
        task.await;
    });
    Some(handle.abort_handle())
}

/// A single pending task that is replaced on every reschedule.
///
/// Each call to [`Debouncer::schedule`] cancels the previously pending task,
/// so only the last one scheduled within the quiet period runs.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Cancels any pending task and schedules `task` after the quiet period.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        *pending = run_after(self.delay, task);
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }

    /// True while a scheduled task has neither fired nor been cancelled.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_schedule_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let seen = Arc::new(Mutex::new(Vec::new()));

        for input in ["s", "sh", "shi"] {
            let seen = seen.clone();
            debouncer.schedule(async move {
                seen.lock().unwrap().push(input);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["shi"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_is_idempotent() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let runs = Arc::new(AtomicUsize::new(0));

        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        let counter = runs.clone();
        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.cancel();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn nothing_is_scheduled_without_a_runtime() {
        assert!(run_after(Duration::from_millis(1), async {}).is_none());
    }
}
