use std::sync::{Arc, Mutex, Once};

use modal_manager::{ModalState, ModalStore, StoreChange};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary; `RUST_LOG` selects levels.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Records every state a per-key listener receives.
#[allow(dead_code)]
pub fn record_states(store: &ModalStore, key: &str) -> Arc<Mutex<Vec<ModalState>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store
        .subscribe_modal(key, move |state| sink.lock().unwrap().push(state.clone()))
        .unwrap();
    seen
}

/// Records every global change.
#[allow(dead_code)]
pub fn record_changes(store: &ModalStore) -> Arc<Mutex<Vec<StoreChange>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store
        .subscribe(move |change| sink.lock().unwrap().push(change.clone()))
        .unwrap();
    seen
}
