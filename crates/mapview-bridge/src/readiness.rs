//! Ready/not-ready state of one embedded page.

use std::collections::VecDeque;

use crate::command::Command;

/// What [`Readiness::admit`] did with a command.
#[derive(Debug)]
pub enum Admission {
    /// The page is ready; dispatch now.
    Dispatch(Command),
    /// Buffered; carries the queue length after insertion.
    Queued(usize),
}

/// Monotonic readiness with the pending buffer owned by the not-ready state.
///
/// Once `Ready`, there is no buffer left to append to or replay from.
#[derive(Debug)]
pub enum Readiness {
    NotReady { pending: VecDeque<Command> },
    Ready,
}

impl Default for Readiness {
    fn default() -> Self {
        Self::NotReady {
            pending: VecDeque::new(),
        }
    }
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn pending_len(&self) -> usize {
        match self {
            Self::NotReady { pending } => pending.len(),
            Self::Ready => 0,
        }
    }

    pub fn admit(&mut self, command: Command) -> Admission {
        match self {
            Self::NotReady { pending } => {
                pending.push_back(command);
                Admission::Queued(pending.len())
            }
            Self::Ready => Admission::Dispatch(command),
        }
    }

    /// Switch to `Ready`, handing back the buffered commands in insertion
    /// order. Subsequent calls return an empty list.
    pub fn mark_ready(&mut self) -> Vec<Command> {
        match std::mem::replace(self, Self::Ready) {
            Self::NotReady { pending } => pending.into(),
            Self::Ready => Vec::new(),
        }
    }
}
