//! Modal identities and their canonical keys.
//!
//! A modal is addressed either by a caller-chosen name or by the presentation
//! unit itself ([`ComponentRef`]). Both collapse to a [`ModalKey`] through the
//! [`KeyResolver`].

mod component;
mod resolver;

use std::borrow::Borrow;
use std::fmt;

use uuid::Uuid;

pub use component::ComponentRef;
pub use resolver::KeyResolver;

/// Canonical, process-unique name of one modal slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalKey(String);

impl ModalKey {
    pub fn new(key: impl Into<String>) -> Self {
        ModalKey(key.into())
    }

    /// A fresh random (UUID v4) key.
    ///
    /// Callers that want an anonymous slot without going through the identity
    /// cache obtain one of these once and keep reusing it.
    pub fn generate() -> Self {
        ModalKey(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalKey {
    fn from(key: &str) -> Self {
        ModalKey(key.to_string())
    }
}

impl From<String> for ModalKey {
    fn from(key: String) -> Self {
        ModalKey(key)
    }
}

impl AsRef<str> for ModalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModalKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What a caller may use to address a modal.
#[derive(Debug, Clone)]
pub enum ModalIdentity {
    /// A caller-chosen key, used as-is.
    Named(ModalKey),
    /// A presentation unit; its key is generated on first sight.
    Anonymous(ComponentRef),
}

impl ModalIdentity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ModalIdentity::Anonymous(_))
    }
}

impl From<&str> for ModalIdentity {
    fn from(key: &str) -> Self {
        ModalIdentity::Named(key.into())
    }
}

impl From<String> for ModalIdentity {
    fn from(key: String) -> Self {
        ModalIdentity::Named(key.into())
    }
}

impl From<ModalKey> for ModalIdentity {
    fn from(key: ModalKey) -> Self {
        ModalIdentity::Named(key)
    }
}

impl From<&ModalKey> for ModalIdentity {
    fn from(key: &ModalKey) -> Self {
        ModalIdentity::Named(key.clone())
    }
}

impl From<ComponentRef> for ModalIdentity {
    fn from(component: ComponentRef) -> Self {
        ModalIdentity::Anonymous(component)
    }
}

impl From<&ComponentRef> for ModalIdentity {
    fn from(component: &ComponentRef) -> Self {
        ModalIdentity::Anonymous(component.clone())
    }
}
