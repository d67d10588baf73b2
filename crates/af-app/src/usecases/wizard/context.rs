//! Shared wizard context.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::state::WizardPosition;

/// Position plus the dispatch lock serializing transitions.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then
/// `position`. The dispatch lock is held for a whole transition (read
/// position, write store, commit position) so overlapping triggers of the
/// same transition wait instead of racing; `position` alone guards the
/// cheap reads.
#[derive(Clone)]
pub struct WizardContext {
    position: Arc<Mutex<WizardPosition>>,
    /// Serializes transitions from this controller instance. Only acquired
    /// during a transition, never for `position()` reads.
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    pub fn new(initial: WizardPosition) -> Self {
        Self {
            position: Arc::new(Mutex::new(initial)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot of the current position. Does not take the dispatch lock.
    pub async fn position(&self) -> WizardPosition {
        self.position.lock().await.clone()
    }

    /// Guard that serializes a transition; released on drop.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Commit a new position. Call only while holding the dispatch lock
    /// and only after the backing store write has succeeded.
    pub async fn set_position(&self, position: WizardPosition) {
        let mut guard = self.position.lock().await;
        *guard = position;
    }
}
