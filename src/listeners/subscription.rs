use std::fmt;
use std::sync::Weak;

use super::Listeners;
use crate::key::ModalKey;

/// Handle returned by every `subscribe` call.
///
/// Dropping the handle leaves the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription {
    id: u64,
    key: Option<ModalKey>,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub(super) fn new(id: u64, key: Option<ModalKey>, listeners: Weak<Listeners>) -> Self {
        Subscription { id, key, listeners }
    }

    /// The key this subscription watches, `None` for global subscriptions.
    pub fn key(&self) -> Option<&ModalKey> {
        self.key.as_ref()
    }

    /// Remove the listener. Returns `false` if it was already gone (or the
    /// store no longer exists).
    pub fn unsubscribe(self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => listeners.remove(self.id, self.key.as_ref()),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("key", &self.key)
            .finish()
    }
}
