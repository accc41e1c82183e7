use crate::foundation::core::Millis;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Page-level reveal progress. Only ever moves forward, one step at a time.
pub enum RevealState {
    /// Loading surface only; content not mounted.
    Hidden,
    /// Content mounted beneath the loading surface; waiting for the peak.
    ContentMounted,
    /// Peak reached; content fading in.
    Peaked,
    /// Terminal: scroll position drives layer opacity and offset.
    ScrollLinked,
}

impl RevealState {
    /// The only state reachable from `self`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::ContentMounted),
            Self::ContentMounted => Some(Self::Peaked),
            Self::Peaked => Some(Self::ScrollLinked),
            Self::ScrollLinked => None,
        }
    }

    /// Whether content has reached the peak (or later).
    pub fn is_revealed(self) -> bool {
        self >= Self::Peaked
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// What triggered a transition.
pub enum Cause {
    /// Loading gate completed after assets loaded.
    Loaded,
    /// Loading gate completed by its safety valve.
    LoadForced,
    /// Peak milestone from the sequencer.
    Milestone,
    /// Peak fallback timer.
    Fallback,
    /// Synchronous follow-up of the previous transition.
    Continuation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One step of the reveal state machine.
pub struct Transition {
    /// Session instant of the step.
    pub at: Millis,
    /// State left.
    pub from: RevealState,
    /// State entered.
    pub to: RevealState,
    /// Trigger.
    pub cause: Cause,
}

#[cfg(test)]
#[path = "../../tests/unit/reveal/state.rs"]
mod tests;
