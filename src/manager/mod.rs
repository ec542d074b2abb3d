//! Modals Manager - the application-facing facade over [`ModalStore`].
//!
//! The manager adds three things on top of the store:
//! - a registry of presentation units ([`ComponentRef`]) per key, which a
//!   binding adapter reads to know what to render;
//! - identity resolution, so a presentation unit can be opened directly and is
//!   registered under a generated key the first time;
//! - composite operations (`close_modal`, [`ModalController::complete`]) that
//!   chain resolve/close/remove the way callers usually want.
//!
//! ## Example
//!
//! ```
//! use modal_manager::{props, CloseOptions, ComponentRef, ModalsManager};
//! use serde_json::json;
//!
//! struct ConfirmDialog;
//!
//! let manager = ModalsManager::new();
//! manager.register_modal("confirm", ComponentRef::new(ConfirmDialog)).unwrap();
//!
//! let result = manager.open_modal("confirm", props(json!({"title": "Sure?"})).unwrap()).unwrap();
//! manager.close_modal("confirm", json!(true), CloseOptions::default()).unwrap();
//!
//! let outcome = futures::executor::block_on(result).unwrap();
//! assert_eq!(outcome.decode::<bool>().unwrap(), Some(true));
//! ```

mod controller;
mod managed;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::debug;

use crate::deferred::Promise;
use crate::error::ModalError;
use crate::key::{ComponentRef, KeyResolver, ModalIdentity, ModalKey};
use crate::store::{InteractionResult, ModalStore, Props};

pub use controller::ModalController;
pub use managed::ManagedModal;

/// Options for [`ModalsManager::close_modal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseOptions {
    /// Unmount right away instead of waiting for an exit transition.
    pub remove: bool,
}

impl Default for CloseOptions {
    fn default() -> Self {
        CloseOptions { remove: true }
    }
}

/// Options for [`ModalController::complete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompleteOptions {
    pub remove: bool,
}

/// Options for [`ModalsManager::managed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagedOptions {
    /// Remove the modal when the [`ManagedModal`] is dropped.
    pub auto_unmount: bool,
}

impl Default for ManagedOptions {
    fn default() -> Self {
        ManagedOptions { auto_unmount: true }
    }
}

#[derive(Clone)]
pub struct ModalsManager {
    store: ModalStore,
    resolver: KeyResolver,
    components: Arc<RwLock<HashMap<ModalKey, ComponentRef>>>,
}

impl Default for ModalsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ModalsManager {
    pub fn new() -> Self {
        ModalsManager {
            store: ModalStore::new(),
            resolver: KeyResolver::new(),
            components: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Use an existing store, e.g. one shared with a binding adapter.
    pub fn with_store(mut self, store: ModalStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_resolver(mut self, resolver: KeyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn store(&self) -> &ModalStore {
        &self.store
    }

    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    /// Register `component` under `key` unless the key already has one.
    ///
    /// Returns `true` when the component was added.
    pub fn register_modal(
        &self,
        key: impl Into<ModalKey>,
        component: ComponentRef,
    ) -> Result<bool, ModalError> {
        let key = key.into();
        let added = {
            let mut components = self
                .components
                .write()
                .map_err(|_| ModalError::LockPoisoned("register_modal"))?;
            if components.contains_key(&key) {
                false
            } else {
                components.insert(key.clone(), component);
                true
            }
        };
        if added {
            self.store.register(key.as_str())?;
        }
        Ok(added)
    }

    /// Register several components at once, replacing any already held for
    /// the same keys.
    pub fn register_modals<K, I>(&self, modals: I) -> Result<(), ModalError>
    where
        K: Into<ModalKey>,
        I: IntoIterator<Item = (K, ComponentRef)>,
    {
        let modals: Vec<(ModalKey, ComponentRef)> =
            modals.into_iter().map(|(k, c)| (k.into(), c)).collect();
        {
            let mut components = self
                .components
                .write()
                .map_err(|_| ModalError::LockPoisoned("register_modals"))?;
            for (key, component) in &modals {
                components.insert(key.clone(), component.clone());
            }
        }
        for (key, _) in &modals {
            self.store.register(key.as_str())?;
        }
        Ok(())
    }

    pub fn resolve_key(&self, identity: &ModalIdentity) -> Result<ModalKey, ModalError> {
        self.resolver.resolve(identity)
    }

    /// Open a modal by name or by presentation unit.
    ///
    /// A presentation unit is registered under its generated key on first
    /// use; a name must have been registered beforehand.
    pub fn open_modal(
        &self,
        identity: impl Into<ModalIdentity>,
        props: Props,
    ) -> Result<Promise<InteractionResult>, ModalError> {
        let key = self.key_for(identity.into())?;
        self.store.open(key.as_str(), props)
    }

    /// Complete the modal with `value` and close it.
    ///
    /// With `options.remove` the modal is also unmounted and the returned
    /// promise is already settled; otherwise it settles on a later remove.
    pub fn close_modal(
        &self,
        identity: impl Into<ModalIdentity>,
        value: Value,
        options: CloseOptions,
    ) -> Result<Promise<()>, ModalError> {
        let key = self.known_key(identity.into())?;
        self.store.resolve(key.as_str(), value)?;
        let closed = self.store.close(key.as_str())?;
        if options.remove {
            self.store.remove(key.as_str())?;
        }
        Ok(closed)
    }

    /// Tear the modal down; a pending interaction ends as dismissed.
    pub fn cancel_modal(&self, identity: impl Into<ModalIdentity>) -> Result<(), ModalError> {
        let key = self.known_key(identity.into())?;
        self.store.remove(key.as_str())
    }

    pub fn component(&self, key: &str) -> Result<Option<ComponentRef>, ModalError> {
        let components = self
            .components
            .read()
            .map_err(|_| ModalError::LockPoisoned("component"))?;
        Ok(components.get(key).cloned())
    }

    /// Every registered presentation unit, sorted by key.
    pub fn components(&self) -> Result<Vec<(ModalKey, ComponentRef)>, ModalError> {
        let components = self
            .components
            .read()
            .map_err(|_| ModalError::LockPoisoned("components"))?;
        let mut all: Vec<(ModalKey, ComponentRef)> = components
            .iter()
            .map(|(k, c)| (k.clone(), c.clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(all)
    }

    /// The presentation units a binding adapter should currently render.
    pub fn mounted_components(&self) -> Result<Vec<(ModalKey, ComponentRef)>, ModalError> {
        let mounted = self.store.mounted_keys()?;
        let components = self
            .components
            .read()
            .map_err(|_| ModalError::LockPoisoned("mounted_components"))?;
        Ok(mounted
            .into_iter()
            .filter_map(|key| components.get(&key).cloned().map(|c| (key, c)))
            .collect())
    }

    /// Actions for the presentation unit rendering `identity`.
    pub fn controller(
        &self,
        identity: impl Into<ModalIdentity>,
    ) -> Result<ModalController, ModalError> {
        let key = self.known_key(identity.into())?;
        if !self.store.is_registered(key.as_str())? {
            return Err(ModalError::NotRegistered(key));
        }
        Ok(ModalController::new(self.store.clone(), key))
    }

    /// A scoped open/close handle for one modal.
    pub fn managed(
        &self,
        identity: impl Into<ModalIdentity>,
        options: ManagedOptions,
    ) -> Result<ManagedModal, ModalError> {
        let key = self.key_for(identity.into())?;
        Ok(ManagedModal::new(self.store.clone(), key, options))
    }

    fn key_for(&self, identity: ModalIdentity) -> Result<ModalKey, ModalError> {
        let key = self.resolver.resolve(&identity)?;
        if let ModalIdentity::Anonymous(component) = identity {
            if self.register_modal(key.clone(), component)? {
                debug!("Auto-registered anonymous modal {}", key);
            }
        }
        Ok(key)
    }

    /// Key of an identity that must already exist; never caches a new one.
    fn known_key(&self, identity: ModalIdentity) -> Result<ModalKey, ModalError> {
        match identity {
            ModalIdentity::Named(key) => Ok(key),
            ModalIdentity::Anonymous(component) => self
                .resolver
                .lookup(&component)?
                .ok_or_else(|| ModalError::NotRegistered(format!("{:?}", component).into())),
        }
    }
}
