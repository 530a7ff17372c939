//! Orchestrator state machine.

/// States of a single optimization run.
///
/// ```text
/// Init ─┬──────────────► MatrixReady ─┬─► Exploring ─┬─► Exploiting ─► Refining ─► Done
///       └─► Fallback ──►              │              └──────────────► Refining
///                                     └─► Done (at most one interior waypoint)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    Init,
    /// The routing provider failed; building the great-circle matrix.
    Fallback,
    MatrixReady,
    Exploring,
    Exploiting,
    Refining,
    Done,
}

impl RunState {
    /// Whether `self → next` is a legal transition.
    pub fn can_advance(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Init, MatrixReady)
                | (Init, Fallback)
                | (Fallback, MatrixReady)
                | (MatrixReady, Exploring)
                | (MatrixReady, Done)
                | (Exploring, Exploiting)
                | (Exploring, Refining)
                | (Exploiting, Refining)
                | (Refining, Done)
        )
    }
}

/// Visited states of one run.
#[derive(Debug, Clone)]
pub(crate) struct Trace {
    states: Vec<RunState>,
}

impl Trace {
    pub(crate) fn new() -> Self {
        Self {
            states: vec![RunState::Init],
        }
    }

    pub(crate) fn current(&self) -> RunState {
        self.states.last().copied().unwrap_or(RunState::Init)
    }

    pub(crate) fn advance(&mut self, next: RunState) {
        let from = self.current();
        debug_assert!(from.can_advance(next), "illegal transition {from:?} -> {next:?}");
        log::debug!("state {:?} -> {:?}", from, next);
        self.states.push(next);
    }

    pub(crate) fn into_states(self) -> Vec<RunState> {
        self.states
    }
}
