use super::nfa::{Nfa, StateId};
use std::collections::HashSet;

/// Position of the start-of-text sentinel, just before the first byte.
pub const START_OF_TEXT: isize = -1;

/// Returned when a search visits more states than its step budget allows.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
#[error("match aborted after {limit} steps")]
pub struct StepLimitExceeded {
    pub limit: u64,
}

/// What the matcher sees at a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Symbol {
    StartOfText,
    Byte(u8),
    EndOfText,
}

/// Returns `true` if the whole of `input` is accepted by `nfa`.
#[must_use]
pub fn check(nfa: &Nfa, input: &[u8]) -> bool {
    // Without a budget the search cannot be aborted.
    check_with_limit(nfa, input, None).unwrap_or(false)
}

/// Returns `true` if the whole of `input` is accepted by `nfa`, giving up
/// after `step_limit` state visits.
///
/// # Errors
///
/// If the step budget runs out before the search finishes, a
/// [`StepLimitExceeded`] error is returned.
pub fn check_with_limit(
    nfa: &Nfa,
    input: &[u8],
    step_limit: Option<u64>,
) -> Result<bool, StepLimitExceeded> {
    let mut search = Search {
        nfa,
        input,
        path: HashSet::new(),
        stack: Vec::new(),
        steps: 0,
        step_limit,
    };
    let result = search.run();
    if let Err(err) = result {
        log::debug!("{err} on {} input bytes", input.len());
    }
    result
}

/// A pending visit of `state` at `pos`, with the moves not yet tried.
struct Frame {
    state: StateId,
    pos: isize,
    moves: Vec<(StateId, isize)>,
    next: usize,
}

/// Depth-first search over `(state, position)` pairs.
///
/// The explicit stack stands in for recursion. A pair that is already on the
/// current path fails instead of being searched again, which is what stops
/// epsilon cycles. Failed pairs are not remembered once they leave the path.
struct Search<'a> {
    nfa: &'a Nfa,
    input: &'a [u8],
    path: HashSet<(StateId, isize)>,
    stack: Vec<Frame>,
    steps: u64,
    step_limit: Option<u64>,
}

impl Search<'_> {
    fn run(&mut self) -> Result<bool, StepLimitExceeded> {
        if self.visit(self.nfa.start(), START_OF_TEXT)? {
            return Ok(true);
        }

        while let Some(frame) = self.stack.last_mut() {
            if let Some(&(state, pos)) = frame.moves.get(frame.next) {
                frame.next += 1;
                if self.visit(state, pos)? {
                    return Ok(true);
                }
            } else if let Some(frame) = self.stack.pop() {
                self.path.remove(&(frame.state, frame.pos));
            }
        }

        Ok(false)
    }

    /// Returns `Ok(true)` if `state` accepts at `pos`; otherwise queues the
    /// moves out of it.
    fn visit(&mut self, state: StateId, pos: isize) -> Result<bool, StepLimitExceeded> {
        if self.path.contains(&(state, pos)) {
            return Ok(false);
        }

        self.steps += 1;
        if let Some(limit) = self.step_limit
            && self.steps > limit
        {
            return Err(StepLimitExceeded { limit });
        }

        let symbol = self.symbol(pos);
        let nfa = self.nfa;
        let node = &nfa[state];
        if symbol == Symbol::EndOfText && node.terminal {
            return Ok(true);
        }

        let mut moves = Vec::with_capacity(node.edge_count());
        if let Symbol::Byte(b) = symbol {
            moves.extend(node.on_byte(b).map(|target| (target, pos + 1)));
        }
        for &target in node.epsilon() {
            moves.push((target, pos));
            // There is no edge consuming the start sentinel; epsilon moves
            // step over it instead.
            if symbol == Symbol::StartOfText {
                moves.push((target, pos + 1));
            }
        }

        if !moves.is_empty() {
            self.path.insert((state, pos));
            self.stack.push(Frame {
                state,
                pos,
                moves,
                next: 0,
            });
        }

        Ok(false)
    }

    fn symbol(&self, pos: isize) -> Symbol {
        match usize::try_from(pos) {
            Err(_) => Symbol::StartOfText,
            Ok(pos) => self
                .input
                .get(pos)
                .map_or(Symbol::EndOfText, |&b| Symbol::Byte(b)),
        }
    }
}
