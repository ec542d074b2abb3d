use crate::deferred::{Deferred, Promise};
use crate::key::ModalKey;

use super::{InteractionResult, ModalState};

/// One registered modal: its visible state and the promises tied to it.
pub(super) struct ModalEntry {
    pub(super) key: ModalKey,
    pub(super) state: ModalState,
    pub(super) pending: PendingOperations,
}

impl ModalEntry {
    pub(super) fn new(key: ModalKey) -> Self {
        ModalEntry {
            key,
            state: ModalState::default(),
            pending: PendingOperations::default(),
        }
    }

    /// Hide and unmount, settling both deferreds. Returns whether an
    /// interaction was dismissed and whether a close was settled.
    pub(super) fn unmount(&mut self) -> (bool, bool) {
        let dismissed = self
            .pending
            .settle_interaction(InteractionResult::Dismissed);
        let closed = self.pending.settle_close();
        self.state.is_open = false;
        self.state.is_mounted = false;
        (dismissed, closed)
    }
}

/// Outstanding deferreds for one entry.
///
/// A deferred is always taken out of its slot before it is settled, so a slot
/// that holds a value is by construction still unsettled.
#[derive(Default)]
pub(super) struct PendingOperations {
    open_outcome: Option<Deferred<InteractionResult>>,
    close_outcome: Option<Deferred<()>>,
}

impl PendingOperations {
    /// Start a new interaction. A still-pending one is dismissed first;
    /// returns whether that happened alongside the new promise.
    pub(super) fn begin_interaction(&mut self) -> (bool, Promise<InteractionResult>) {
        let superseded = self.settle_interaction(InteractionResult::Dismissed);
        let deferred = Deferred::new();
        let promise = deferred.promise();
        self.open_outcome = Some(deferred);
        (superseded, promise)
    }

    pub(super) fn settle_interaction(&mut self, result: InteractionResult) -> bool {
        match self.open_outcome.take() {
            Some(mut deferred) => deferred.resolve(result),
            None => false,
        }
    }

    /// The pending close promise, creating one if none is outstanding.
    pub(super) fn close_promise(&mut self) -> Promise<()> {
        self.close_outcome
            .get_or_insert_with(Deferred::new)
            .promise()
    }

    pub(super) fn pending_close(&self) -> Option<Promise<()>> {
        self.close_outcome.as_ref().map(Deferred::promise)
    }

    pub(super) fn settle_close(&mut self) -> bool {
        match self.close_outcome.take() {
            Some(mut deferred) => deferred.resolve(()),
            None => false,
        }
    }

    pub(super) fn has_interaction(&self) -> bool {
        self.open_outcome.is_some()
    }

    pub(super) fn has_close(&self) -> bool {
        self.close_outcome.is_some()
    }
}

impl Drop for PendingOperations {
    fn drop(&mut self) {
        self.settle_interaction(InteractionResult::Dismissed);
        self.settle_close();
    }
}
