//! Seek tickets and their one-shot completion signals.
//!
//! Every relocation request hands out a `PendingSeek` bound to exactly one
//! completion. A later request never satisfies an earlier ticket, so a waiter
//! can't mistake somebody else's seek for its own.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

/// Identifier of a single relocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeekTicket(u64);

impl SeekTicket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Observed state of a pending relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStatus {
    /// Requested, not yet at rest
    Pending,
    /// The asset confirmed the relocation
    Completed,
    /// The asset dropped the request without confirming (asset gone)
    Lost,
}

/// Waiting side of a relocation request.
#[derive(Debug)]
pub struct PendingSeek {
    ticket: SeekTicket,
    target: f64,
    rx: Receiver<SeekTicket>,
    completed: bool,
}

/// Asset side of a relocation request. Consumed by `complete`.
#[derive(Debug)]
pub struct SeekCompleter {
    ticket: SeekTicket,
    target: f64,
    tx: Sender<SeekTicket>,
}

/// Create a linked pending/completer pair for one relocation.
pub fn seek_pair(ticket: SeekTicket, target: f64) -> (PendingSeek, SeekCompleter) {
    let (tx, rx) = mpsc::channel();
    (
        PendingSeek {
            ticket,
            target,
            rx,
            completed: false,
        },
        SeekCompleter { ticket, target, tx },
    )
}

impl PendingSeek {
    /// A relocation that took effect synchronously.
    pub fn completed(ticket: SeekTicket, target: f64) -> Self {
        let (pending, completer) = seek_pair(ticket, target);
        completer.complete();
        pending
    }

    pub fn ticket(&self) -> SeekTicket {
        self.ticket
    }

    /// Requested position in seconds.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Check for the completion signal without blocking.
    pub fn poll(&mut self) -> SeekStatus {
        if self.completed {
            return SeekStatus::Completed;
        }
        match self.rx.try_recv() {
            Ok(ticket) => self.accept(ticket),
            Err(TryRecvError::Empty) => SeekStatus::Pending,
            Err(TryRecvError::Disconnected) => SeekStatus::Lost,
        }
    }

    /// Block for up to `timeout` waiting for the completion signal.
    ///
    /// Returns `Pending` when the timeout elapses first.
    pub fn wait_timeout(&mut self, timeout: Duration) -> SeekStatus {
        if self.completed {
            return SeekStatus::Completed;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(ticket) => self.accept(ticket),
            Err(RecvTimeoutError::Timeout) => SeekStatus::Pending,
            Err(RecvTimeoutError::Disconnected) => SeekStatus::Lost,
        }
    }

    fn accept(&mut self, ticket: SeekTicket) -> SeekStatus {
        // The channel is private to this pair, so any other ticket is a bug
        debug_assert_eq!(ticket, self.ticket);
        self.completed = ticket == self.ticket;
        if self.completed {
            SeekStatus::Completed
        } else {
            SeekStatus::Pending
        }
    }
}

impl SeekCompleter {
    pub fn ticket(&self) -> SeekTicket {
        self.ticket
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Fire the completion signal.
    pub fn complete(self) {
        // Ignore send errors (the waiter may have given up)
        let _ = self.tx.send(self.ticket);
    }
}
