use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{ComponentRef, ModalIdentity, ModalKey};
use crate::error::ModalError;

/// Maps modal identities to canonical keys.
///
/// Named identities pass through unchanged. Anonymous identities get a
/// generated key the first time they are seen; repeated lookups with the same
/// reference return the same key.
///
/// The cache holds a clone of every reference it has keyed, which keeps the
/// allocation (and therefore its address) alive. Entries stay until
/// [`KeyResolver::forget`] is called or the resolver is dropped.
#[derive(Clone, Default)]
pub struct KeyResolver {
    keys: Arc<RwLock<HashMap<usize, (ComponentRef, ModalKey)>>>,
}

impl KeyResolver {
    pub fn new() -> Self {
        KeyResolver {
            keys: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn resolve(&self, identity: &ModalIdentity) -> Result<ModalKey, ModalError> {
        match identity {
            ModalIdentity::Named(key) => Ok(key.clone()),
            ModalIdentity::Anonymous(component) => self.resolve_component(component),
        }
    }

    /// Key for `component`, generating and caching one on first sight.
    pub fn resolve_component(&self, component: &ComponentRef) -> Result<ModalKey, ModalError> {
        if let Some(key) = self.lookup(component)? {
            return Ok(key);
        }

        let mut keys = self
            .keys
            .write()
            .map_err(|_| ModalError::LockPoisoned("resolver write"))?;
        let (_, key) = keys.entry(component.address()).or_insert_with(|| {
            let key = ModalKey::generate();
            debug!("Generated modal key {} for {:?}", key, component);
            (component.clone(), key)
        });
        Ok(key.clone())
    }

    /// The cached key for `component`, without generating one.
    pub fn lookup(&self, component: &ComponentRef) -> Result<Option<ModalKey>, ModalError> {
        let keys = self
            .keys
            .read()
            .map_err(|_| ModalError::LockPoisoned("resolver read"))?;
        Ok(keys.get(&component.address()).map(|(_, key)| key.clone()))
    }

    /// Drop the cached key for `component`, releasing the resolver's clone.
    ///
    /// A later `resolve` of the same reference generates a new key.
    pub fn forget(&self, component: &ComponentRef) -> Result<Option<ModalKey>, ModalError> {
        let mut keys = self
            .keys
            .write()
            .map_err(|_| ModalError::LockPoisoned("resolver write"))?;
        Ok(keys.remove(&component.address()).map(|(_, key)| key))
    }

    pub fn len(&self) -> usize {
        self.keys.read().map(|keys| keys.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FoodModal;

    #[test]
    fn named_keys_pass_through() {
        let resolver = KeyResolver::new();
        let key = resolver.resolve(&ModalIdentity::from("drink")).unwrap();
        assert_eq!(key.as_str(), "drink");
        assert!(resolver.is_empty());
    }

    #[test]
    fn same_component_same_key() {
        let resolver = KeyResolver::new();
        let component = ComponentRef::new(FoodModal);

        let first = resolver.resolve(&(&component).into()).unwrap();
        let second = resolver.resolve(&component.clone().into()).unwrap();

        assert_eq!(first, second);
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn distinct_components_distinct_keys() {
        let resolver = KeyResolver::new();
        let a = ComponentRef::new(FoodModal);
        let b = ComponentRef::new(FoodModal);

        assert_ne!(
            resolver.resolve_component(&a).unwrap(),
            resolver.resolve_component(&b).unwrap()
        );
        assert_eq!(resolver.len(), 2);
    }

    #[test]
    fn lookup_does_not_generate() {
        let resolver = KeyResolver::new();
        let component = ComponentRef::new(FoodModal);

        assert_eq!(resolver.lookup(&component).unwrap(), None);
        let key = resolver.resolve_component(&component).unwrap();
        assert_eq!(resolver.lookup(&component).unwrap(), Some(key));
    }

    #[test]
    fn forget_releases_entry() {
        let resolver = KeyResolver::new();
        let component = ComponentRef::new(FoodModal);

        let key = resolver.resolve_component(&component).unwrap();
        assert_eq!(resolver.forget(&component).unwrap(), Some(key.clone()));
        assert!(resolver.is_empty());

        let fresh = resolver.resolve_component(&component).unwrap();
        assert_ne!(fresh, key);
    }

    #[test]
    fn clones_share_the_cache() {
        let resolver = KeyResolver::new();
        let shared = resolver.clone();
        let component = ComponentRef::new(FoodModal);

        let key = resolver.resolve_component(&component).unwrap();
        assert_eq!(shared.lookup(&component).unwrap(), Some(key));
    }
}
