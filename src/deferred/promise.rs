use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::Shared;
use futures::FutureExt;

use super::{Deferred, PromiseError, Rejection};

type Outcome<T> = Result<T, Rejection>;

/// Awaitable half of a [`Deferred`].
///
/// Cheap to clone; clones share one outcome, so a coalesced operation can hand
/// the same pending promise to every caller.
pub struct Promise<T: Clone> {
    inner: Shared<oneshot::Receiver<Outcome<T>>>,
}

impl<T: Clone> Promise<T> {
    pub(super) fn from_shared(inner: Shared<oneshot::Receiver<Outcome<T>>>) -> Self {
        Promise { inner }
    }

    /// A promise that is already fulfilled with `value`.
    pub fn resolved(value: T) -> Self {
        let mut deferred = Deferred::new();
        deferred.resolve(value);
        deferred.promise()
    }

    /// The outcome if the promise has settled, without waiting.
    pub fn try_outcome(&self) -> Option<Result<T, PromiseError>> {
        self.clone().now_or_never()
    }

    pub fn is_settled(&self) -> bool {
        self.try_outcome().is_some()
    }

    /// Whether both handles observe the same deferred.
    pub fn ptr_eq(&self, other: &Promise<T>) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl<T: Clone> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Promise {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> Future for Promise<T> {
    type Output = Result<T, PromiseError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx).map(|outcome| match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(reason)) => Err(PromiseError::Rejected(reason)),
            Err(oneshot::Canceled) => Err(PromiseError::Abandoned),
        })
    }
}

impl<T: Clone> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("settled", &self.is_settled())
            .finish()
    }
}
