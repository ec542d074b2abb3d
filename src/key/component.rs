use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque, shared reference to a presentation unit.
///
/// Equality is identity: two refs are equal only when they point at the same
/// allocation, never because the wrapped values compare equal.
#[derive(Clone)]
pub struct ComponentRef(Arc<dyn Any + Send + Sync>);

impl ComponentRef {
    pub fn new<C: Any + Send + Sync>(component: C) -> Self {
        ComponentRef(Arc::new(component))
    }

    pub fn from_arc(component: Arc<dyn Any + Send + Sync>) -> Self {
        ComponentRef(component)
    }

    /// Borrow the wrapped value if it is a `C`.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.0.downcast_ref::<C>()
    }

    pub(crate) fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for ComponentRef {}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentRef({:#x})", self.address())
    }
}
