//! User-visible alerts, confirmations and toasts.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Blocking alert and confirmation dialogs, supplied by the host.
pub trait Prompt: Send + Sync {
    /// Show a message the user must acknowledge.
    fn alert(&self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&self, message: &str) -> bool;
}

/// Headless prompt: alerts go to the log, confirmations get a fixed answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPrompt {
    confirm_all: bool,
}

impl LoggingPrompt {
    pub fn new(confirm_all: bool) -> Self {
        Self { confirm_all }
    }
}

impl Prompt for LoggingPrompt {
    fn alert(&self, message: &str) {
        tracing::info!(alert = message, "user alert");
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::info!(question = message, answer = self.confirm_all, "user confirmation");
        self.confirm_all
    }
}

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Increases with every `show`.
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Default)]
struct ToastSlot {
    current: Option<Toast>,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl ToastSlot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Single-slot toast centre with auto-dismiss.
///
/// Clones share the slot. The dismiss timer runs on the ambient tokio
/// runtime; without one, toasts stay until dismissed.
#[derive(Debug, Clone)]
pub struct Toasts {
    slot: Arc<Mutex<ToastSlot>>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
            lifetime,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ToastSlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Show `message`, replacing the current toast and its timer.
    pub fn show(&self, message: impl Into<String>) -> u64 {
        let mut slot = self.lock();
        slot.cancel_timer();
        slot.generation += 1;
        let id = slot.generation;
        slot.current = Some(Toast {
            id,
            message: message.into(),
        });

        if let Ok(handle) = Handle::try_current() {
            let shared = Arc::clone(&self.slot);
            let lifetime = self.lifetime;
            slot.timer = Some(handle.spawn(async move {
                tokio::time::sleep(lifetime).await;
                let mut slot = shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                if slot.generation == id {
                    slot.current = None;
                    slot.timer = None;
                }
            }));
        }
        id
    }

    /// Hide the current toast early.
    pub fn dismiss(&self) {
        let mut slot = self.lock();
        slot.cancel_timer();
        slot.current = None;
    }

    /// The visible toast, if any.
    pub fn current(&self) -> Option<Toast> {
        self.lock().current.clone()
    }

    /// Message of the visible toast, if any.
    pub fn message(&self) -> Option<String> {
        self.lock().current.as_ref().map(|t| t.message.clone())
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_lifetime() {
        let toasts = Toasts::default();
        toasts.show("Lamp added to cart!");

        settle(2999).await;
        assert_eq!(toasts.message().as_deref(), Some("Lamp added to cart!"));

        settle(2).await;
        assert_eq!(toasts.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replaced_toast_keeps_its_own_timer() {
        let toasts = Toasts::default();
        toasts.show("first");
        settle(2000).await;
        let second = toasts.show("second");

        settle(1500).await;
        let current = toasts.current().unwrap();
        assert_eq!(current.id, second);
        assert_eq!(current.message, "second");

        settle(1600).await;
        assert_eq!(toasts.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_early() {
        let toasts = Toasts::new(Duration::from_millis(500));
        toasts.show("bye");
        toasts.dismiss();
        assert_eq!(toasts.current(), None);

        toasts.show("again");
        settle(100).await;
        assert!(toasts.current().is_some());
    }

    #[test]
    fn test_without_runtime_toast_stays() {
        let toasts = Toasts::default();
        let first = toasts.show("one");
        let second = toasts.show("two");
        assert!(second > first);
        assert_eq!(toasts.message().as_deref(), Some("two"));
    }

    #[test]
    fn test_logging_prompt_answers() {
        assert!(LoggingPrompt::new(true).confirm("Delete?"));
        assert!(!LoggingPrompt::default().confirm("Delete?"));
        LoggingPrompt::default().alert("saved");
    }
}
