use tracing::debug;

use super::ManagedOptions;
use crate::deferred::Promise;
use crate::error::ModalError;
use crate::key::ModalKey;
use crate::store::{InteractionResult, ModalStore, Props};

/// Open/close handle scoped to the caller that owns it.
///
/// With `auto_unmount` (the default) dropping the handle removes the modal,
/// so any interaction still pending ends as dismissed.
pub struct ManagedModal {
    store: ModalStore,
    key: ModalKey,
    options: ManagedOptions,
}

impl ManagedModal {
    pub(super) fn new(store: ModalStore, key: ModalKey, options: ManagedOptions) -> Self {
        ManagedModal {
            store,
            key,
            options,
        }
    }

    pub fn key(&self) -> &ModalKey {
        &self.key
    }

    pub fn open(&self, props: Props) -> Result<Promise<InteractionResult>, ModalError> {
        self.store.open(self.key.as_str(), props)
    }

    pub fn close(&self) -> Result<Promise<()>, ModalError> {
        self.store.close(self.key.as_str())
    }
}

impl Drop for ManagedModal {
    fn drop(&mut self) {
        if !self.options.auto_unmount {
            return;
        }
        if let Err(err) = self.store.remove(self.key.as_str()) {
            debug!("Skipped auto-unmount of modal {}: {}", self.key, err);
        }
    }
}
