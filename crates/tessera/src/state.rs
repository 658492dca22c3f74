//! The lexer's state stack.

/// Index of a compiled lexer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Returns the index into the lexer's state table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A never-empty stack of lexer states.
///
/// The bottom entry is the initial state and cannot be popped, so the
/// lexer always has rules to try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStack {
    stack: Vec<StateId>,
}

impl StateStack {
    /// Creates a stack holding only `initial`.
    #[must_use]
    pub fn new(initial: StateId) -> Self {
        Self {
            stack: vec![initial],
        }
    }

    /// Returns the active state.
    #[must_use]
    pub fn current(&self) -> StateId {
        self.stack.last().copied().unwrap_or(StateId(0))
    }

    /// Returns the number of entries, never less than one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Enters `state`, remembering the current one.
    pub fn push(&mut self, state: StateId) {
        self.stack.push(state);
    }

    /// Returns to the previous state. Popping the last entry is a no-op.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Replaces the active state without changing depth.
    pub fn switch_to(&mut self, state: StateId) {
        if let Some(top) = self.stack.last_mut() {
            *top = state;
        }
    }
}
