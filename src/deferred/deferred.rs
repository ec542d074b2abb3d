use futures::channel::oneshot;
use futures::FutureExt;

use super::{Promise, Rejection};

/// Settling half of a promise.
///
/// The sender is taken on the first `resolve`/`reject`, so every later call
/// finds nothing to settle and returns `false`.
pub struct Deferred<T: Clone> {
    sender: Option<oneshot::Sender<Result<T, Rejection>>>,
    promise: Promise<T>,
}

impl<T: Clone> Deferred<T> {
    pub fn new() -> Self {
        let (sender, receiver) = oneshot::channel();
        Deferred {
            sender: Some(sender),
            promise: Promise::from_shared(receiver.shared()),
        }
    }

    /// A handle to the promise. Every handle observes the same outcome.
    pub fn promise(&self) -> Promise<T> {
        self.promise.clone()
    }

    /// Fulfil the promise. Returns `false` if it was already settled.
    pub fn resolve(&mut self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Reject the promise. Returns `false` if it was already settled.
    pub fn reject(&mut self, reason: impl Into<String>) -> bool {
        self.settle(Err(Rejection(reason.into())))
    }

    pub fn is_settled(&self) -> bool {
        self.sender.is_none()
    }

    fn settle(&mut self, outcome: Result<T, Rejection>) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // Nobody holding a promise handle is fine; the outcome is simply unobserved.
                let _ = sender.send(outcome);
                true
            }
            None => false,
        }
    }
}

impl<T: Clone> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}
