use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// The one outstanding clarification, if any.
#[derive(Debug)]
pub(crate) struct ActiveSession {
    pub id: Uuid,
    pub prompt: String,
    pub allow_typed: bool,
    /// Taken by the first typed reply; later submissions are ignored.
    pub reply_tx: Option<oneshot::Sender<String>>,
    pub cancel: CancellationToken,
}

pub(crate) type Slot = Arc<Mutex<Option<ActiveSession>>>;

pub(crate) fn lock(slot: &Slot) -> MutexGuard<'_, Option<ActiveSession>> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

/// Frees the slot when the waiting call ends, however it ends (reply, timeout,
/// cancellation, the future being dropped, or a panic unwinding through it).
pub(crate) struct SessionGuard {
    slot: Slot,
    id: Uuid,
}

impl SessionGuard {
    pub fn new(slot: Slot, id: Uuid) -> Self {
        Self { slot, id }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let mut active = lock(&self.slot);
        if active.as_ref().map(|s| s.id) == Some(self.id) {
            active.take();
            tracing::debug!(session = %self.id, "follow-up slot released");
        }
    }
}
