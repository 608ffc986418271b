//! Toast queue with independent auto-dismiss timers.

use std::sync::{Arc, Weak};
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::debug;
use uuid::Uuid;

use super::models::{Toast, ToastSpec};
use crate::schedule::run_after;

#[derive(Debug)]
struct Queue {
    toasts: watch::Sender<Vec<Toast>>,
    /// Pending auto-dismiss timers, keyed by toast id.
    timers: DashMap<String, AbortHandle>,
}

impl Queue {
    fn dismiss(&self, id: &str) -> bool {
        if let Some((_, timer)) = self.timers.remove(id) {
            timer.abort();
        }
        self.toasts.send_if_modified(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        })
    }
}

/// Session-scoped notification queue.
///
/// Toasts are kept in insertion order. A toast with a non-zero duration is
/// removed automatically once its own timer fires; timers never affect one
/// another.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    queue: Arc<Queue>,
    default_duration: Duration,
}

impl ToastNotifier {
    /// Creates an empty queue; toasts without a duration live `default_duration`.
    pub fn new(default_duration: Duration) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            queue: Arc::new(Queue {
                toasts,
                timers: DashMap::new(),
            }),
            default_duration,
        }
    }

    /// Queues a toast and returns its id.
    pub fn add_toast(&self, spec: ToastSpec) -> String {
        let id = Uuid::new_v4().to_string();
        let duration = spec
            .duration
            .unwrap_or_else(|| u64::try_from(self.default_duration.as_millis()).unwrap_or(u64::MAX));

        let toast = Toast {
            id: id.clone(),
            title: spec.title,
            description: spec.description,
            variant: spec.variant,
            duration,
        };
        debug!(%id, variant = ?toast.variant, duration, title = %toast.title, "toast added");
        self.queue.toasts.send_modify(|toasts| toasts.push(toast));

        if duration > 0 {
            let queue: Weak<Queue> = Arc::downgrade(&self.queue);
            let expired = id.clone();
            // Hold the slot until the handle is stored: a timer that fires
            // right away blocks on it instead of racing the insert.
            let slot = self.queue.timers.entry(id.clone());
            let timer = run_after(Duration::from_millis(duration), async move {
                if let Some(queue) = queue.upgrade() {
                    queue.timers.remove(&expired);
                    if queue.dismiss(&expired) {
                        debug!(id = %expired, "toast expired");
                    }
                }
            });
            if let Some(timer) = timer {
                slot.insert(timer);
            }
        }

        id
    }

    /// Dismisses a toast and cancels its timer. Unknown ids are ignored.
    pub fn remove_toast(&self, id: &str) -> bool {
        self.queue.dismiss(id)
    }

    /// Current toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.queue.toasts.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.queue.toasts.subscribe()
    }

    /// Number of auto-dismiss timers still pending.
    pub fn pending_timers(&self) -> usize {
        self.queue.timers.len()
    }
}
