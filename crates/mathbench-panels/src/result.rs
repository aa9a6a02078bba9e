// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The result a panel displays, and the slot that owns it.

use crate::error::PanelError;

/// Outcome of the latest evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult<T> {
    /// Nothing evaluated yet, or the last artifact was disposed.
    Empty,
    /// A rendered artifact.
    Ready(T),
    /// A message to show instead.
    Failed(PanelError),
}

impl<T> EvaluationResult<T> {
    /// The artifact, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The error, if any.
    pub fn error(&self) -> Option<&PanelError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether an artifact is installed.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Holds one [`EvaluationResult`]; the previous artifact is always disposed
/// before the next is installed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSlot<T> {
    current: EvaluationResult<T>,
    installed: u64,
    disposed: u64,
}

impl<T> Default for ResultSlot<T> {
    fn default() -> Self {
        Self {
            current: EvaluationResult::Empty,
            installed: 0,
            disposed: 0,
        }
    }
}

impl<T> ResultSlot<T> {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// What is shown now.
    pub fn current(&self) -> &EvaluationResult<T> {
        &self.current
    }

    /// Dispose the current artifact (if any), then install `next`.
    /// Returns the disposed artifact.
    pub fn install(&mut self, next: EvaluationResult<T>) -> Option<T> {
        let previous = self.dispose();
        if next.is_ready() {
            self.installed += 1;
        }
        self.current = next;
        previous
    }

    /// Drop whatever is shown and go back to empty.
    pub fn dispose(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.current, EvaluationResult::Empty) {
            EvaluationResult::Ready(value) => {
                self.disposed += 1;
                Some(value)
            }
            _ => None,
        }
    }

    /// Artifacts installed so far.
    pub fn installs(&self) -> u64 {
        self.installed
    }

    /// Artifacts disposed so far.
    pub fn disposals(&self) -> u64 {
        self.disposed
    }
}
