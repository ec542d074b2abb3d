use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use super::entry::ModalEntry;
use super::{InteractionResult, ModalState, Props};
use crate::deferred::Promise;
use crate::error::ModalError;
use crate::key::ModalKey;
use crate::listeners::{Listeners, StoreChange, Subscription};

/// Owner of every modal entry and listener registration.
///
/// Clone-friendly via `Arc`; clones operate on the same entries. Every
/// mutation and its notifications complete before the call returns.
/// Listeners run after the entry lock is released, so they may read the
/// store or call back into it.
///
/// Notification order matches mutation order only for calls made from one
/// thread. When two threads mutate the same key, their listener calls may
/// interleave, and the last state a listener sees can be older than the
/// entry; read [`ModalStore::get_modal_state`] for the current value.
///
/// Outstanding promises settle on [`ModalStore::remove`],
/// [`ModalStore::dispose`], or when the entries are dropped.
#[derive(Clone)]
pub struct ModalStore {
    entries: Arc<RwLock<HashMap<ModalKey, ModalEntry>>>,
    listeners: Arc<Listeners>,
}

/// What one mutation changed, gathered under the lock and emitted after it.
struct Transition {
    key: ModalKey,
    state: Option<ModalState>,
    change: Option<StoreChange>,
}

impl Transition {
    fn between(key: &ModalKey, before: &ModalState, after: &ModalState) -> Self {
        let change = match (before.is_mounted, after.is_mounted) {
            (false, true) => Some(StoreChange::Mounted(key.clone())),
            (true, false) => Some(StoreChange::Unmounted(key.clone())),
            _ => None,
        };
        Transition {
            key: key.clone(),
            state: (before != after).then(|| after.clone()),
            change,
        }
    }
}

impl Default for ModalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalStore {
    pub fn new() -> Self {
        ModalStore {
            entries: Arc::new(RwLock::new(HashMap::new())),
            listeners: Arc::new(Listeners::new()),
        }
    }

    /// Create an entry for `key` unless one exists.
    ///
    /// Returns `true` when the key is new. An existing entry is left exactly
    /// as it is.
    pub fn register(&self, key: &str) -> Result<bool, ModalError> {
        let registered = {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| ModalError::LockPoisoned("register"))?;
            if entries.contains_key(key) {
                None
            } else {
                let key = ModalKey::from(key);
                entries.insert(key.clone(), ModalEntry::new(key.clone()));
                Some(key)
            }
        };

        match registered {
            Some(key) => {
                debug!("Registered modal {}", key);
                self.listeners.emit_store(&StoreChange::Registered(key));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show the modal with `props` and start a new interaction.
    ///
    /// A previous interaction still pending for this key is settled as
    /// [`InteractionResult::Dismissed`] before the new one begins.
    pub fn open(&self, key: &str, props: Props) -> Result<Promise<InteractionResult>, ModalError> {
        self.update(key, "open", |entry| {
            let (superseded, promise) = entry.pending.begin_interaction();
            if superseded {
                debug!("Superseded pending interaction for modal {}", entry.key);
            }
            entry.state = ModalState {
                props,
                is_open: true,
                is_mounted: true,
            };
            debug!("Opened modal {}", entry.key);
            promise
        })
    }

    /// Hide the modal, keeping it mounted until [`ModalStore::remove`].
    ///
    /// The returned promise settles on removal. Concurrent closes share one
    /// promise; closing a modal that is not open (and not already closing)
    /// yields a promise that is already settled.
    pub fn close(&self, key: &str) -> Result<Promise<()>, ModalError> {
        self.update(key, "close", |entry| {
            let was_open = entry.state.is_open;
            entry.state.is_open = false;

            if let Some(pending) = entry.pending.pending_close() {
                return pending;
            }
            if was_open {
                debug!("Closing modal {}", entry.key);
                entry.pending.close_promise()
            } else {
                Promise::resolved(())
            }
        })
    }

    /// [`ModalStore::close`] without waiting for removal.
    ///
    /// Hiding an open modal still arms the close promise, so
    /// [`ModalStore::has_pending_close`] reports `true` until the modal is
    /// removed and a later `close` returns that same promise.
    pub fn hide(&self, key: &str) -> Result<(), ModalError> {
        self.close(key).map(|_| ())
    }

    /// Complete the pending interaction with `value`.
    ///
    /// Visibility is untouched. Returns `false` (and logs a warning) when no
    /// interaction is pending.
    pub fn resolve(&self, key: &str, value: Value) -> Result<bool, ModalError> {
        self.update(key, "resolve", |entry| {
            let settled = entry
                .pending
                .settle_interaction(InteractionResult::Completed { value });
            if !settled {
                warn!("Resolve on modal {} with no pending interaction", entry.key);
            }
            settled
        })
    }

    /// Dismiss the pending interaction without a result.
    ///
    /// Visibility is untouched. Returns `false` when no interaction is
    /// pending.
    pub fn cancel(&self, key: &str) -> Result<bool, ModalError> {
        self.update(key, "cancel", |entry| {
            let settled = entry
                .pending
                .settle_interaction(InteractionResult::Dismissed);
            if !settled {
                warn!("Cancel on modal {} with no pending interaction", entry.key);
            }
            settled
        })
    }

    /// Unmount the modal and settle everything outstanding for it.
    ///
    /// Props are kept until the next `open`. Calling this again is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), ModalError> {
        self.update(key, "remove", |entry| {
            let (dismissed, closed) = entry.unmount();
            if dismissed || closed {
                debug!(
                    "Removed modal {} (dismissed: {}, close settled: {})",
                    entry.key, dismissed, closed
                );
            }
        })
    }

    /// Unmount every modal, settle every outstanding promise and drop all
    /// listeners.
    ///
    /// Dropping the last handle also settles promises, but only once the
    /// entries are freed, and a listener that captured a store clone keeps
    /// them alive. Call this on teardown so no awaiting caller is left
    /// pending. Keys stay registered; the store remains usable.
    pub fn dispose(&self) -> Result<(), ModalError> {
        let mut settled = 0;
        let transitions: Vec<Transition> = {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| ModalError::LockPoisoned("dispose"))?;
            entries
                .values_mut()
                .map(|entry| {
                    let before = entry.state.clone();
                    let (dismissed, closed) = entry.unmount();
                    settled += usize::from(dismissed) + usize::from(closed);
                    Transition::between(&entry.key, &before, &entry.state)
                })
                .collect()
        };

        for transition in transitions {
            self.notify(transition);
        }
        let dropped = self.listeners.clear();
        debug!(
            "Disposed modal store (settled: {}, listeners dropped: {})",
            settled, dropped
        );
        Ok(())
    }

    pub fn get_modal_state(&self, key: &str) -> Result<ModalState, ModalError> {
        self.read(key, "get_modal_state", |entry| entry.state.clone())
    }

    pub fn is_registered(&self, key: &str) -> Result<bool, ModalError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ModalError::LockPoisoned("is_registered"))?;
        Ok(entries.contains_key(key))
    }

    pub fn has_pending_interaction(&self, key: &str) -> Result<bool, ModalError> {
        self.read(key, "has_pending_interaction", |entry| {
            entry.pending.has_interaction()
        })
    }

    pub fn has_pending_close(&self, key: &str) -> Result<bool, ModalError> {
        self.read(key, "has_pending_close", |entry| entry.pending.has_close())
    }

    /// Every registered key, sorted.
    pub fn keys(&self) -> Result<Vec<ModalKey>, ModalError> {
        self.collect_keys("keys", |_| true)
    }

    /// Keys whose modal is in the render tree, sorted.
    pub fn mounted_keys(&self) -> Result<Vec<ModalKey>, ModalError> {
        self.collect_keys("mounted_keys", |entry| entry.state.is_mounted)
    }

    /// Listen for state changes of one modal.
    pub fn subscribe_modal<F>(&self, key: &str, listener: F) -> Result<Subscription, ModalError>
    where
        F: Fn(&ModalState) + Send + Sync + 'static,
    {
        let key = self.read(key, "subscribe_modal", |entry| entry.key.clone())?;
        self.listeners.on_modal(&key, Arc::new(listener))
    }

    /// Listen for registrations and mounted-set changes across all modals.
    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription, ModalError>
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.listeners.on_store(Arc::new(listener))
    }

    fn read<R>(
        &self,
        key: &str,
        operation: &'static str,
        view: impl FnOnce(&ModalEntry) -> R,
    ) -> Result<R, ModalError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ModalError::LockPoisoned(operation))?;
        let entry = entries
            .get(key)
            .ok_or_else(|| ModalError::NotRegistered(ModalKey::from(key)))?;
        Ok(view(entry))
    }

    fn update<R>(
        &self,
        key: &str,
        operation: &'static str,
        apply: impl FnOnce(&mut ModalEntry) -> R,
    ) -> Result<R, ModalError> {
        let (result, transition) = {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| ModalError::LockPoisoned(operation))?;
            let entry = entries
                .get_mut(key)
                .ok_or_else(|| ModalError::NotRegistered(ModalKey::from(key)))?;
            let before = entry.state.clone();
            let result = apply(&mut *entry);
            (result, Transition::between(&entry.key, &before, &entry.state))
        };

        self.notify(transition);
        Ok(result)
    }

    fn notify(&self, transition: Transition) {
        if let Some(state) = &transition.state {
            self.listeners.emit_modal(&transition.key, state);
        }
        if let Some(change) = &transition.change {
            self.listeners.emit_store(change);
        }
    }

    fn collect_keys(
        &self,
        operation: &'static str,
        keep: impl Fn(&ModalEntry) -> bool,
    ) -> Result<Vec<ModalKey>, ModalError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ModalError::LockPoisoned(operation))?;
        let mut keys: Vec<ModalKey> = entries
            .values()
            .filter(|entry| keep(entry))
            .map(|entry| entry.key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
