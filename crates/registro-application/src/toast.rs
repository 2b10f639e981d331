//! Transient confirmation message with a cancelable auto-clear.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct ToastSlot {
    message: Option<String>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

fn lock(slot: &Mutex<ToastSlot>) -> MutexGuard<'_, ToastSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shows one message at a time and clears it after a fixed delay.
///
/// At most one clear is pending: showing a new message aborts the previous
/// timer, and a timer that fires late only clears the message it was
/// scheduled for. Must be used inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    slot: Arc<Mutex<ToastSlot>>,
    duration: Duration,
}

impl ToastNotifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ToastSlot::default())),
            duration,
        }
    }

    /// Displays `message` and schedules its removal.
    pub fn show(&self, message: impl Into<String>) {
        let mut slot = lock(&self.slot);
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }

        slot.generation += 1;
        slot.message = Some(message.into());

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let duration = self.duration;
        slot.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.message = None;
                slot.pending = None;
            }
        }));
    }

    /// Message currently displayed, if any.
    pub fn current(&self) -> Option<String> {
        lock(&self.slot).message.clone()
    }
}
