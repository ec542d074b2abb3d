mod deferred;
#[cfg(feature = "emitter")]
mod emitter;
mod error;
mod key;
mod listeners;
mod manager;
mod store;

pub use deferred::{Deferred, Promise, PromiseError, Rejection};
#[cfg(feature = "emitter")]
pub use emitter::{
    event_name, EmitterBridge, MODAL_MOUNTED, MODAL_REGISTERED, MODAL_UNMOUNTED,
};
pub use error::ModalError;
pub use key::{ComponentRef, KeyResolver, ModalIdentity, ModalKey};
pub use listeners::{ModalListener, StoreChange, StoreListener, Subscription};
pub use manager::{
    CloseOptions, CompleteOptions, ManagedModal, ManagedOptions, ModalController, ModalsManager,
};
pub use store::{props, InteractionResult, ModalState, ModalStore, Props};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
