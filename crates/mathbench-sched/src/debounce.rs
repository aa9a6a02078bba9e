// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Debounced input: a cancellable scheduled action per value.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::trace;

use crate::cancel::CancelToken;

/// Quiet period used by the editors.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Pending {
    token: CancelToken,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
struct Settled<T> {
    generation: u64,
    value: T,
}

/// Collapses bursts of values into the last one after a quiet period.
///
/// Every [`push`](Self::push) cancels the pending action and schedules a new
/// one with the same delay. [`settled`](Self::settled) yields only the value
/// of the newest generation; anything superseded is never observed.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending>,
    tx: mpsc::UnboundedSender<Settled<T>>,
    rx: mpsc::UnboundedReceiver<Settled<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// New debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            generation: 0,
            pending: None,
            tx,
            rx,
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generation of the most recent push.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `value`, superseding any pending one. Returns its generation.
    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, value: T) -> u64 {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let token = CancelToken::new();
        let cancel = token.clone();
        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {}
                () = time::sleep(delay) => {
                    if !cancel.is_cancelled() {
                        let _ = tx.send(Settled { generation, value });
                    }
                }
            }
        });
        trace!(generation, "debounce scheduled");
        self.pending = Some(Pending { token, handle });
        generation
    }

    /// Cancel the pending action, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
            pending.handle.abort();
        }
    }

    /// Whether a value is waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the newest value to settle. Returns `None` when nothing is
    /// pending.
    pub async fn settled(&mut self) -> Option<T> {
        loop {
            let finished = self
                .pending
                .as_ref()
                .is_none_or(|p| p.handle.is_finished());
            let next = if finished {
                self.rx.try_recv().ok()
            } else {
                self.rx.recv().await
            };
            match next {
                Some(s) if s.generation == self.generation => {
                    self.pending = None;
                    return Some(s.value);
                }
                Some(_) => {}
                None => {
                    self.pending = None;
                    return None;
                }
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
            pending.handle.abort();
        }
    }
}
