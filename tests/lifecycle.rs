mod support;

use modal_manager::{props, InteractionResult, ModalError, ModalState, ModalStore, Props};
use serde_json::json;
use support::{init_tracing, record_changes, record_states};

fn store_with(key: &str) -> ModalStore {
    init_tracing();
    let store = ModalStore::new();
    store.register(key).unwrap();
    store
}

#[test]
fn register_yields_default_state() {
    let store = store_with("confirm");
    assert_eq!(
        store.get_modal_state("confirm").unwrap(),
        ModalState {
            props: Props::new(),
            is_open: false,
            is_mounted: false,
        }
    );
}

#[test]
fn open_sets_props_and_visibility() {
    let store = store_with("confirm");
    let p = props(json!({"title": "Confirm", "danger": true})).unwrap();

    store.open("confirm", p.clone()).unwrap();

    assert_eq!(
        store.get_modal_state("confirm").unwrap(),
        ModalState {
            props: p,
            is_open: true,
            is_mounted: true,
        }
    );
}

#[test]
fn registering_an_open_modal_does_not_reset_it() {
    let store = store_with("confirm");
    let p = props(json!({"title": "Confirm"})).unwrap();
    let result = store.open("confirm", p.clone()).unwrap();

    assert!(!store.register("confirm").unwrap());

    let state = store.get_modal_state("confirm").unwrap();
    assert_eq!(state.props, p);
    assert!(state.is_open);
    assert!(state.is_mounted);
    assert!(!result.is_settled());
    assert!(store.has_pending_interaction("confirm").unwrap());
}

#[tokio::test]
async fn resolve_settles_exactly_once() {
    let store = store_with("confirm");
    let result = store.open("confirm", Props::new()).unwrap();

    assert!(store.resolve("confirm", json!("first")).unwrap());
    assert!(!store.resolve("confirm", json!("second")).unwrap());

    assert_eq!(
        result.await.unwrap(),
        InteractionResult::Completed {
            value: json!("first")
        }
    );
    assert!(!store.has_pending_interaction("confirm").unwrap());
}

#[tokio::test]
async fn second_open_supersedes_the_first() {
    let store = store_with("confirm");
    let first = store.open("confirm", props(json!({"n": 1})).unwrap()).unwrap();
    let second = store.open("confirm", props(json!({"n": 2})).unwrap()).unwrap();

    assert_eq!(first.await.unwrap(), InteractionResult::Dismissed);
    assert!(!second.is_settled());
    assert_eq!(
        store.get_modal_state("confirm").unwrap().props,
        props(json!({"n": 2})).unwrap()
    );
}

#[tokio::test]
async fn remove_drains_and_keeps_props() {
    let store = store_with("confirm");
    let p = props(json!({"title": "Confirm"})).unwrap();
    let result = store.open("confirm", p.clone()).unwrap();

    store.remove("confirm").unwrap();

    assert_eq!(result.await.unwrap(), InteractionResult::Dismissed);
    assert_eq!(
        store.get_modal_state("confirm").unwrap(),
        ModalState {
            props: p,
            is_open: false,
            is_mounted: false,
        }
    );
    assert!(!store.has_pending_interaction("confirm").unwrap());
    assert!(!store.has_pending_close("confirm").unwrap());
}

#[test]
fn remove_is_idempotent() {
    let store = store_with("confirm");
    store.open("confirm", Props::new()).unwrap();
    let states = record_states(&store, "confirm");

    store.remove("confirm").unwrap();
    let after_first = store.get_modal_state("confirm").unwrap();
    store.remove("confirm").unwrap();

    assert_eq!(store.get_modal_state("confirm").unwrap(), after_first);
    assert_eq!(states.lock().unwrap().len(), 1);
}

#[test]
fn close_settles_only_on_remove() {
    let store = store_with("confirm");
    store.open("confirm", Props::new()).unwrap();

    let closing = store.close("confirm").unwrap();
    assert!(!closing.is_settled());

    let state = store.get_modal_state("confirm").unwrap();
    assert!(!state.is_open);
    assert!(state.is_mounted);

    store.remove("confirm").unwrap();
    assert_eq!(closing.try_outcome(), Some(Ok(())));
}

#[test]
fn concurrent_closes_share_one_promise() {
    let store = store_with("confirm");
    store.open("confirm", Props::new()).unwrap();

    let a = store.close("confirm").unwrap();
    let b = store.close("confirm").unwrap();
    assert!(a.ptr_eq(&b));

    store.remove("confirm").unwrap();
    assert!(a.is_settled());
    assert!(b.is_settled());
}

#[tokio::test]
async fn resolve_does_not_close() {
    let store = store_with("confirm");
    let result = store
        .open("confirm", props(json!({"title": "Confirm"})).unwrap())
        .unwrap();

    store.resolve("confirm", json!(true)).unwrap();

    assert_eq!(
        result.await.unwrap(),
        InteractionResult::Completed { value: json!(true) }
    );
    assert!(store.get_modal_state("confirm").unwrap().is_open);
}

#[tokio::test]
async fn closing_a_never_opened_modal_resolves_immediately() {
    let store = store_with("confirm");

    let closing = store.close("confirm").unwrap();

    assert!(closing.is_settled());
    assert!(!store.has_pending_close("confirm").unwrap());
    closing.await.unwrap();
}

#[test]
fn resolve_and_cancel_without_interaction_are_no_ops() {
    let store = store_with("confirm");
    assert!(!store.resolve("confirm", json!(1)).unwrap());
    assert!(!store.cancel("confirm").unwrap());
    assert_eq!(
        store.get_modal_state("confirm").unwrap(),
        ModalState::default()
    );
}

#[test]
fn operations_on_unknown_keys_fail_synchronously() {
    let store = store_with("confirm");
    assert_eq!(
        store.open("confirm-typo", Props::new()).unwrap_err(),
        ModalError::NotRegistered("confirm-typo".into())
    );
    assert!(store.keys().unwrap().iter().all(|k| k.as_str() == "confirm"));
}

#[test]
fn listeners_observe_full_lifecycle() {
    let store = store_with("confirm");
    let states = record_states(&store, "confirm");
    let changes = record_changes(&store);

    let result = store.open("confirm", Props::new()).unwrap();
    store.resolve("confirm", json!(42)).unwrap();
    store.close("confirm").unwrap();
    store.remove("confirm").unwrap();

    let flags: Vec<(bool, bool)> = states
        .lock()
        .unwrap()
        .iter()
        .map(|s| (s.is_open, s.is_mounted))
        .collect();
    assert_eq!(flags, vec![(true, true), (false, true), (false, false)]);
    assert_eq!(changes.lock().unwrap().len(), 2);
    assert_eq!(
        result.try_outcome(),
        Some(Ok(InteractionResult::completed(42)))
    );
}

#[test]
fn superseded_promise_settles_before_new_one_exists() {
    let store = store_with("confirm");
    let first = store.open("confirm", Props::new()).unwrap();

    let observer = store.clone();
    let first_seen = first.clone();
    let checked = std::sync::Arc::new(std::sync::Mutex::new(false));
    let flag = std::sync::Arc::clone(&checked);
    store
        .subscribe_modal("confirm", move |_| {
            // By the time listeners run for the second open, the first
            // interaction is already dismissed.
            assert!(first_seen.is_settled());
            assert!(observer.has_pending_interaction("confirm").unwrap());
            *flag.lock().unwrap() = true;
        })
        .unwrap();

    store
        .open("confirm", props(json!({"again": true})).unwrap())
        .unwrap();

    assert!(*checked.lock().unwrap());
    assert_eq!(first.try_outcome(), Some(Ok(InteractionResult::Dismissed)));
}

#[test]
fn dispose_releases_callers_even_when_a_listener_holds_the_store() {
    let store = store_with("confirm");
    let observer = store.clone();
    store
        .subscribe_modal("confirm", move |_| {
            let _ = observer.is_registered("confirm");
        })
        .unwrap();
    let result = store.open("confirm", Props::new()).unwrap();

    store.dispose().unwrap();
    drop(store);

    assert_eq!(result.try_outcome(), Some(Ok(InteractionResult::Dismissed)));
}
