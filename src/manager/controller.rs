use serde_json::Value;

use super::CompleteOptions;
use crate::error::ModalError;
use crate::key::ModalKey;
use crate::listeners::Subscription;
use crate::store::{ModalState, ModalStore};

/// The actions a presentation unit uses to drive its own lifecycle.
///
/// A binding adapter hands one of these to the unit it renders for `key`,
/// alongside the current [`ModalState`].
#[derive(Clone)]
pub struct ModalController {
    store: ModalStore,
    key: ModalKey,
}

impl ModalController {
    pub(super) fn new(store: ModalStore, key: ModalKey) -> Self {
        ModalController { store, key }
    }

    pub fn key(&self) -> &ModalKey {
        &self.key
    }

    pub fn state(&self) -> Result<ModalState, ModalError> {
        self.store.get_modal_state(self.key.as_str())
    }

    pub fn subscribe<F>(&self, listener: F) -> Result<Subscription, ModalError>
    where
        F: Fn(&ModalState) + Send + Sync + 'static,
    {
        self.store.subscribe_modal(self.key.as_str(), listener)
    }

    /// Finish the interaction with `value` and start closing; with
    /// `options.remove` the unit is unmounted immediately.
    pub fn complete(&self, value: Value, options: CompleteOptions) -> Result<(), ModalError> {
        self.store.resolve(self.key.as_str(), value)?;
        self.store.hide(self.key.as_str())?;
        if options.remove {
            self.store.remove(self.key.as_str())?;
        }
        Ok(())
    }

    /// End the interaction without a result and start closing.
    pub fn dismiss(&self) -> Result<(), ModalError> {
        self.store.cancel(self.key.as_str())?;
        self.store.hide(self.key.as_str())
    }

    pub fn hide(&self) -> Result<(), ModalError> {
        self.store.hide(self.key.as_str())
    }

    /// Unmount, typically once the exit transition has finished.
    pub fn remove(&self) -> Result<(), ModalError> {
        self.store.remove(self.key.as_str())
    }
}
