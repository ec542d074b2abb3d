//! Bridge from store changes to an [`EventEmitter`].
//!
//! Useful for observers that live outside the render path (analytics, audit
//! logs). Delivery is asynchronous: `event_emitter_rs` runs each callback on
//! its own thread.
//!
//! # Example
//!
//! ```ignore
//! use modal_manager::{EmitterBridge, EventEmitter, ModalStore};
//!
//! let store = ModalStore::new();
//! let mut emitter = EventEmitter::new();
//! emitter.on("ModalMounted", |key: String| {
//!     println!("mounted {}", key);
//! });
//!
//! let bridge = EmitterBridge::attach(&store, emitter)?;
//! store.register("confirm")?;
//! ```

use std::sync::{Arc, Mutex};

use event_emitter_rs::EventEmitter;
use tracing::warn;

use crate::error::ModalError;
use crate::listeners::{StoreChange, Subscription};
use crate::store::ModalStore;

pub const MODAL_REGISTERED: &str = "ModalRegistered";
pub const MODAL_MOUNTED: &str = "ModalMounted";
pub const MODAL_UNMOUNTED: &str = "ModalUnmounted";

/// Event name used for a store change.
pub fn event_name(change: &StoreChange) -> &'static str {
    match change {
        StoreChange::Registered(_) => MODAL_REGISTERED,
        StoreChange::Mounted(_) => MODAL_MOUNTED,
        StoreChange::Unmounted(_) => MODAL_UNMOUNTED,
    }
}

/// Forwards every [`StoreChange`] to an emitter, with the key as payload.
pub struct EmitterBridge {
    subscription: Subscription,
    emitter: Arc<Mutex<EventEmitter>>,
}

impl EmitterBridge {
    pub fn attach(store: &ModalStore, emitter: EventEmitter) -> Result<Self, ModalError> {
        let emitter = Arc::new(Mutex::new(emitter));
        let target = Arc::clone(&emitter);
        let subscription = store.subscribe(move |change| {
            let Ok(mut emitter) = target.lock() else {
                warn!("Emitter bridge lock poisoned; dropped {:?}", change);
                return;
            };
            emitter.emit(event_name(change), change.key().to_string());
        })?;

        Ok(EmitterBridge {
            subscription,
            emitter,
        })
    }

    /// Register another callback on the wrapped emitter.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<(), ModalError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| ModalError::LockPoisoned("emitter on"))?;
        emitter.on(event, listener);
        Ok(())
    }

    /// Stop forwarding. Returns `false` if the store is already gone.
    pub fn detach(self) -> bool {
        self.subscription.unsubscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Props;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn event_names() {
        assert_eq!(event_name(&StoreChange::Registered("a".into())), MODAL_REGISTERED);
        assert_eq!(event_name(&StoreChange::Mounted("a".into())), MODAL_MOUNTED);
        assert_eq!(event_name(&StoreChange::Unmounted("a".into())), MODAL_UNMOUNTED);
    }

    #[test]
    fn forwards_mount_changes() {
        let store = ModalStore::new();
        let bridge = EmitterBridge::attach(&store, EventEmitter::new()).unwrap();

        let (tx, rx) = mpsc::channel();
        let mounted = tx.clone();
        bridge
            .on(MODAL_MOUNTED, move |key| {
                let _ = mounted.send(format!("mounted:{}", key));
            })
            .unwrap();
        bridge
            .on(MODAL_UNMOUNTED, move |key| {
                let _ = tx.send(format!("unmounted:{}", key));
            })
            .unwrap();

        store.register("confirm").unwrap();
        store.open("confirm", Props::new()).unwrap();
        store.remove("confirm").unwrap();

        // EventEmitter delivers on its own threads
        let mut received = vec![
            rx.recv_timeout(Duration::from_secs(1)).unwrap(),
            rx.recv_timeout(Duration::from_secs(1)).unwrap(),
        ];
        received.sort();
        assert_eq!(received, vec!["mounted:confirm", "unmounted:confirm"]);
    }

    #[test]
    fn detach_stops_forwarding() {
        let store = ModalStore::new();
        let bridge = EmitterBridge::attach(&store, EventEmitter::new()).unwrap();

        let (tx, rx) = mpsc::channel::<String>();
        bridge
            .on(MODAL_REGISTERED, move |key| {
                let _ = tx.send(key);
            })
            .unwrap();

        assert!(bridge.detach());
        store.register("late").unwrap();

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }
}
