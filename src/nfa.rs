//! Arena storage for NFA states.
//!
//! States refer to each other through [`StateId`] indexes into the owning
//! [`Nfa`] rather than through references, so cyclic graphs (produced by
//! unbounded repetition) need no shared ownership.

/// Index of a state inside an [`Nfa`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a transition consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Exactly one input byte.
    Byte(u8),
    /// Nothing.
    Epsilon,
}

#[derive(Clone, Debug, Default)]
pub struct State {
    bytes: Vec<(u8, StateId)>,
    epsilon: Vec<StateId>,
    pub start: bool,
    pub terminal: bool,
}

impl State {
    /// Targets of the edges consuming `byte`, in insertion order.
    pub fn on_byte(&self, byte: u8) -> impl Iterator<Item = StateId> + '_ {
        self.bytes
            .iter()
            .filter(move |(b, _)| *b == byte)
            .map(|&(_, target)| target)
    }

    /// Targets of the epsilon edges, in insertion order.
    #[must_use]
    pub fn epsilon(&self) -> &[StateId] {
        &self.epsilon
    }

    /// Number of outgoing edges of any kind.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.bytes.len() + self.epsilon.len()
    }
}

/// A compiled automaton: an arena of states plus its global start and
/// terminal states.
#[derive(Clone, Debug)]
pub struct Nfa {
    states: Vec<State>,
    start: StateId,
    terminal: StateId,
}

impl Nfa {
    pub(crate) fn new(states: Vec<State>, start: StateId, terminal: StateId) -> Self {
        Self {
            states,
            start,
            terminal,
        }
    }

    #[must_use]
    pub fn start(&self) -> StateId {
        self.start
    }

    #[must_use]
    pub fn terminal(&self) -> StateId {
        self.terminal
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Iterates over all states with their ids.
    #[allow(clippy::cast_possible_truncation)]
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        // The arena never allocates more than `u32::MAX` states.
        self.states
            .iter()
            .enumerate()
            .map(|(i, state)| (StateId(i as u32), state))
    }
}

impl std::ops::Index<StateId> for Nfa {
    type Output = State;

    fn index(&self, id: StateId) -> &Self::Output {
        &self.states[id.index()]
    }
}

/// Growable arena used while compiling.
#[derive(Debug, Default)]
pub(crate) struct StateArena {
    states: Vec<State>,
}

impl StateArena {
    /// Allocates a new state, returning `None` once `limit` states exist.
    pub fn alloc(&mut self, limit: usize) -> Option<StateId> {
        if self.states.len() >= limit {
            return None;
        }
        let id = StateId(u32::try_from(self.states.len()).ok()?);
        self.states.push(State::default());
        Some(id)
    }

    pub fn add_edge(&mut self, from: StateId, trigger: Trigger, to: StateId) {
        let state = &mut self.states[from.index()];
        match trigger {
            Trigger::Byte(b) => state.bytes.push((b, to)),
            Trigger::Epsilon => state.epsilon.push(to),
        }
    }

    pub fn get_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn into_nfa(self, start: StateId, terminal: StateId) -> Nfa {
        Nfa::new(self.states, start, terminal)
    }
}
