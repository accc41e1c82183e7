use std::{cell::Cell, rc::Rc};

use crate::foundation::core::Millis;

/// Set-once "revealed" flag shared with the layout around the core
/// (header, navigation). Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct RevealSignal {
    revealed_at: Rc<Cell<Option<Millis>>>,
}

impl RevealSignal {
    /// Unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the page has been revealed.
    pub fn is_revealed(&self) -> bool {
        self.revealed_at.get().is_some()
    }

    /// Instant of the reveal, if any.
    pub fn revealed_at(&self) -> Option<Millis> {
        self.revealed_at.get()
    }

    /// Raise the flag. Later calls keep the first instant.
    pub(crate) fn raise(&self, now: Millis) -> bool {
        if self.revealed_at.get().is_some() {
            return false;
        }
        self.revealed_at.set(Some(now));
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/signal.rs"]
mod tests;
