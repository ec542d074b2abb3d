//! Change notification for the modal store.
//!
//! Two kinds of listener exist: per-key listeners, told the new
//! [`ModalState`] whenever that entry changes, and global listeners, told
//! about [`StoreChange`]s to the set of registered/mounted modals.
//!
//! Listeners are snapshotted before being called, so a listener may subscribe,
//! unsubscribe or read the store while it runs.

mod subscription;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::ModalError;
use crate::key::ModalKey;
use crate::store::ModalState;

pub use subscription::Subscription;

pub type ModalListener = Arc<dyn Fn(&ModalState) + Send + Sync>;
pub type StoreListener = Arc<dyn Fn(&StoreChange) + Send + Sync>;

/// A change to the set of modals a binding adapter renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// A key was registered for the first time.
    Registered(ModalKey),
    /// The modal entered the mounted set.
    Mounted(ModalKey),
    /// The modal left the mounted set.
    Unmounted(ModalKey),
}

impl StoreChange {
    pub fn key(&self) -> &ModalKey {
        match self {
            StoreChange::Registered(key)
            | StoreChange::Mounted(key)
            | StoreChange::Unmounted(key) => key,
        }
    }
}

#[derive(Default)]
struct Registrations {
    per_key: HashMap<ModalKey, Vec<(u64, ModalListener)>>,
    global: Vec<(u64, StoreListener)>,
}

pub(crate) struct Listeners {
    registrations: RwLock<Registrations>,
    next_id: AtomicU64,
}

impl Listeners {
    pub(crate) fn new() -> Self {
        Listeners {
            registrations: RwLock::new(Registrations::default()),
            next_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn on_modal(
        self: &Arc<Self>,
        key: &ModalKey,
        listener: ModalListener,
    ) -> Result<Subscription, ModalError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| ModalError::LockPoisoned("listeners write"))?;
        registrations
            .per_key
            .entry(key.clone())
            .or_default()
            .push((id, listener));
        Ok(Subscription::new(id, Some(key.clone()), Arc::downgrade(self)))
    }

    pub(crate) fn on_store(
        self: &Arc<Self>,
        listener: StoreListener,
    ) -> Result<Subscription, ModalError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| ModalError::LockPoisoned("listeners write"))?;
        registrations.global.push((id, listener));
        Ok(Subscription::new(id, None, Arc::downgrade(self)))
    }

    pub(crate) fn remove(&self, id: u64, key: Option<&ModalKey>) -> bool {
        let Ok(mut registrations) = self.registrations.write() else {
            return false;
        };
        match key {
            Some(key) => {
                let Some(listeners) = registrations.per_key.get_mut(key) else {
                    return false;
                };
                let before = listeners.len();
                listeners.retain(|(listener_id, _)| *listener_id != id);
                let removed = listeners.len() != before;
                if listeners.is_empty() {
                    registrations.per_key.remove(key);
                }
                removed
            }
            None => {
                let before = registrations.global.len();
                registrations
                    .global
                    .retain(|(listener_id, _)| *listener_id != id);
                registrations.global.len() != before
            }
        }
    }

    /// Drop every registration; returns how many there were.
    pub(crate) fn clear(&self) -> usize {
        let Ok(mut registrations) = self.registrations.write() else {
            return 0;
        };
        let count = registrations.global.len()
            + registrations.per_key.values().map(Vec::len).sum::<usize>();
        *registrations = Registrations::default();
        count
    }

    pub(crate) fn emit_modal(&self, key: &ModalKey, state: &ModalState) {
        let snapshot: Vec<ModalListener> = match self.registrations.read() {
            Ok(registrations) => registrations
                .per_key
                .get(key)
                .map(|listeners| listeners.iter().map(|(_, l)| Arc::clone(l)).collect())
                .unwrap_or_default(),
            Err(_) => return,
        };
        for listener in snapshot {
            listener(state);
        }
    }

    pub(crate) fn emit_store(&self, change: &StoreChange) {
        let snapshot: Vec<StoreListener> = match self.registrations.read() {
            Ok(registrations) => registrations
                .global
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect(),
            Err(_) => return,
        };
        for listener in snapshot {
            listener(change);
        }
    }

    #[cfg(test)]
    pub(crate) fn modal_listener_count(&self, key: &ModalKey) -> usize {
        self.registrations
            .read()
            .map(|r| r.per_key.get(key).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn store_listener_count(&self) -> usize {
        self.registrations
            .read()
            .map(|r| r.global.len())
            .unwrap_or(0)
    }
}
