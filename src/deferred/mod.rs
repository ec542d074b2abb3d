//! Deferred - a promise whose outcome is decided by someone other than the
//! code awaiting it.
//!
//! The store hands the [`Promise`] half to the caller of `open`/`close` and
//! keeps the [`Deferred`] half in the modal entry until the presentation layer
//! settles it.
//!
//! ## Example
//!
//! ```
//! use modal_manager::Deferred;
//! use futures::FutureExt;
//!
//! let mut deferred = Deferred::new();
//! let promise = deferred.promise();
//!
//! assert!(deferred.resolve(7));
//! assert!(!deferred.resolve(8)); // already settled, ignored
//!
//! assert_eq!(promise.now_or_never(), Some(Ok(7)));
//! ```

mod deferred;
mod promise;

use std::fmt;

pub use deferred::Deferred;
pub use promise::Promise;

/// Reason attached to a rejected deferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection(pub String);

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error produced when awaiting a [`Promise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromiseError {
    /// The deferred was rejected.
    Rejected(Rejection),
    /// The deferred was dropped without ever being settled.
    Abandoned,
}

impl fmt::Display for PromiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseError::Rejected(reason) => write!(f, "promise rejected: {}", reason),
            PromiseError::Abandoned => write!(f, "promise abandoned before settlement"),
        }
    }
}

impl std::error::Error for PromiseError {}
