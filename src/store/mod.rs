//! Modal Store - the lifecycle state machine.
//!
//! Every registered key owns one entry:
//!
//! ```text
//!   register            open                 close / hide          remove
//! ──────────▶ closed ──────────▶ open ─────────────────▶ closing ──────────▶ closed
//!            unmounted          mounted               mounted             unmounted
//!                                 │  ▲                                        ▲
//!                                 │  └── open (supersedes pending result)     │
//!                                 └───────────────────────────────────────────┘
//!                                                   remove
//! ```
//!
//! `open` hands back a [`Promise`](crate::Promise) of an [`InteractionResult`];
//! `close` hands back a promise that settles when the entry is removed.
//! `resolve`/`cancel` settle the interaction without touching visibility.
//!
//! ## Example
//!
//! ```
//! use modal_manager::{props, InteractionResult, ModalStore};
//! use futures::FutureExt;
//! use serde_json::json;
//!
//! let store = ModalStore::new();
//! store.register("confirm").unwrap();
//!
//! let result = store.open("confirm", props(json!({"title": "Confirm"})).unwrap()).unwrap();
//! store.resolve("confirm", json!(true)).unwrap();
//!
//! assert_eq!(
//!     result.now_or_never(),
//!     Some(Ok(InteractionResult::Completed { value: json!(true) }))
//! );
//! assert!(store.get_modal_state("confirm").unwrap().is_open);
//! ```

mod entry;
mod store;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ModalError;

pub use store::ModalStore;

/// Payload supplied to `open`, replaced wholesale on every open.
pub type Props = Map<String, Value>;

/// Convert a JSON object into [`Props`]. `null` yields empty props.
pub fn props(value: Value) -> Result<Props, ModalError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Props::new()),
        other => Err(ModalError::InvalidProps(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Externally visible state of one modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub props: Props,
    /// Visible. Implies `is_mounted`.
    pub is_open: bool,
    /// Present in the render tree, possibly running an exit transition.
    pub is_mounted: bool,
}

/// Outcome of one open-to-settle cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InteractionResult {
    Completed { value: Value },
    Dismissed,
}

impl InteractionResult {
    pub fn completed(value: impl Into<Value>) -> Self {
        InteractionResult::Completed {
            value: value.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, InteractionResult::Completed { .. })
    }

    pub fn is_dismissed(&self) -> bool {
        matches!(self, InteractionResult::Dismissed)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            InteractionResult::Completed { value } => Some(value),
            InteractionResult::Dismissed => None,
        }
    }

    /// Decode the completed value as `T`. `Ok(None)` when dismissed.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Option<T>, ModalError> {
        match self {
            InteractionResult::Completed { value } => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ModalError::Decode(e.to_string())),
            InteractionResult::Dismissed => Ok(None),
        }
    }
}
