//! Single-shot continuations for replies from the platform.
//!
//! Whenever the composer presents something (a picker, a share sheet),
//! it hands out a `Completion` and keeps the matching `Pending` end.
//! The platform replies exactly once, whenever it's ready.

use std::error::Error;
use std::fmt;

use futures::channel::oneshot;


/// Create a connected `Completion` & `Pending` pair.
pub fn continuation<T>() -> (Completion<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (Completion{tx}, Pending{rx})
}


/// The replying end of a continuation, given to the platform.
///
/// Dropping it without calling `complete` abandons the continuation.
#[must_use = "dropping a Completion abandons the request"]
pub struct Completion<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Completion<T> {
    /// Reply with given value.
    pub fn complete(self, value: T) {
        if self.tx.send(value).is_err() {
            warn!("Completion delivered after the requester stopped waiting");
        }
    }

    /// Whether the requester is still waiting for the reply.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        !self.tx.is_canceled()
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Completion{{waiting: {}}}", self.is_waiting())
    }
}


/// The waiting end of a continuation, kept by the requester.
pub struct Pending<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Pending<T> {
    /// Check if the reply has arrived.
    ///
    /// Returns `None` while there is no reply yet, or `Some` with the reply
    /// or `Abandoned` if the `Completion` was dropped without one.
    pub fn poll(&mut self) -> Option<Result<T, Abandoned>> {
        match self.rx.try_recv() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(Abandoned)),
        }
    }
}

impl<T> fmt::Debug for Pending<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Pending")
    }
}


/// Error when the `Completion` was dropped without replying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Abandoned;

impl Error for Abandoned {}

impl fmt::Display for Abandoned {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "request was abandoned without a reply")
    }
}


#[cfg(test)]
mod tests {
    use super::{continuation, Abandoned};

    #[test]
    fn nothing_until_completed() {
        let (done, mut pending) = continuation::<u32>();
        assert!(pending.poll().is_none());
        assert!(done.is_waiting());
        done.complete(42);
        assert_eq!(Some(Ok(42)), pending.poll());
    }

    #[test]
    fn dropped_completion_is_abandoned() {
        let (done, mut pending) = continuation::<u32>();
        drop(done);
        assert_eq!(Some(Err(Abandoned)), pending.poll());
    }

    #[test]
    fn completion_without_requester() {
        let (done, pending) = continuation::<u32>();
        drop(pending);
        assert!(!done.is_waiting());
        done.complete(42);  // just a warning
    }
}
