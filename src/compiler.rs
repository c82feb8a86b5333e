use super::{
    ast::{ParseContext, Repeat, Token},
    nfa::{Nfa, StateArena, StateId, Trigger},
};

/// The default maximum number of states in one automaton.
pub const DEFAULT_STATE_LIMIT: usize = 1 << 20;

/// The error type returned when tokens cannot be compiled.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The automaton would need more states than allowed.
    #[error("compiled automaton exceeds {limit} states")]
    TooManyStates { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The start and end state of a compiled piece of the automaton.
type Fragment = (StateId, StateId);

/// Compiles a parsed pattern into an [`Nfa`] with the default state limit.
///
/// # Errors
///
/// If the automaton would exceed [`DEFAULT_STATE_LIMIT`] states, an [`Error`]
/// is returned.
pub fn compile(context: &ParseContext) -> Result<Nfa> {
    Compiler::new().compile(context.tokens())
}

/// Builds an [`Nfa`] from tokens, one fragment per token.
#[derive(Debug)]
pub struct Compiler {
    arena: StateArena,
    state_limit: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_state_limit(DEFAULT_STATE_LIMIT)
    }

    #[must_use]
    pub fn with_state_limit(state_limit: usize) -> Self {
        Self {
            arena: StateArena::default(),
            state_limit,
        }
    }

    /// Compiles `tokens` into a complete automaton with one global start state
    /// and one global terminal state, consuming the compiler.
    ///
    /// # Errors
    ///
    /// If the automaton would exceed the state limit, an [`Error`] is returned.
    pub fn compile(mut self, tokens: &[Token]) -> Result<Nfa> {
        let start = self.state()?;
        let terminal = self.state()?;
        self.arena.get_mut(start).start = true;
        self.arena.get_mut(terminal).terminal = true;

        let (first, last) = self.sequence(tokens)?;
        self.epsilon(start, first);
        self.epsilon(last, terminal);

        log::debug!(
            "compiled {} tokens into {} states",
            tokens.len(),
            self.arena.len()
        );

        Ok(self.arena.into_nfa(start, terminal))
    }

    fn state(&mut self) -> Result<StateId> {
        self.arena.alloc(self.state_limit).ok_or(Error::TooManyStates {
            limit: self.state_limit,
        })
    }

    fn epsilon(&mut self, from: StateId, to: StateId) {
        self.arena.add_edge(from, Trigger::Epsilon, to);
    }

    /// Two fresh states joined by a single epsilon edge.
    fn empty(&mut self) -> Result<Fragment> {
        let start = self.state()?;
        let end = self.state()?;
        self.epsilon(start, end);
        Ok((start, end))
    }

    /// Concatenates the fragments of `tokens` with epsilon edges.
    fn sequence(&mut self, tokens: &[Token]) -> Result<Fragment> {
        let Some((first, rest)) = tokens.split_first() else {
            return self.empty();
        };

        let (start, mut end) = self.fragment(first)?;
        for token in rest {
            let (next_start, next_end) = self.fragment(token)?;
            self.epsilon(end, next_start);
            end = next_end;
        }

        Ok((start, end))
    }

    fn fragment(&mut self, token: &Token) -> Result<Fragment> {
        match token {
            &Token::Literal(b) => {
                let start = self.state()?;
                let end = self.state()?;
                self.arena.add_edge(start, Trigger::Byte(b), end);
                Ok((start, end))
            }
            Token::Bracket(set) => {
                if set.is_empty() {
                    return self.empty();
                }
                let start = self.state()?;
                let end = self.state()?;
                for b in set.iter() {
                    self.arena.add_edge(start, Trigger::Byte(b), end);
                }
                Ok((start, end))
            }
            Token::Or { left, right } => {
                let start = self.state()?;
                let end = self.state()?;
                for branch in [left, right] {
                    let (branch_start, branch_end) = self.sequence(branch)?;
                    self.epsilon(start, branch_start);
                    self.epsilon(branch_end, end);
                }
                Ok((start, end))
            }
            Token::Group(children) | Token::UncaptureGroup(children) => self.group(children),
            Token::Repeat(repeat) => self.repeat(repeat),
        }
    }

    /// A group is an alternation over its immediate children: `(abc)` matches
    /// any one of `a`, `b` or `c`.
    fn group(&mut self, children: &[Token]) -> Result<Fragment> {
        if children.is_empty() {
            return self.empty();
        }

        let start = self.state()?;
        let end = self.state()?;
        for child in children {
            let (child_start, child_end) = self.fragment(child)?;
            self.epsilon(start, child_start);
            self.epsilon(child_end, end);
        }

        Ok((start, end))
    }

    fn repeat(&mut self, repeat: &Repeat) -> Result<Fragment> {
        let start = self.state()?;
        let mut end = start;

        for _ in 0..repeat.min {
            let (copy_start, copy_end) = self.fragment(&repeat.inner)?;
            self.epsilon(end, copy_start);
            end = copy_end;
        }

        match repeat.optional_copies() {
            Some(optional) => {
                for _ in 0..optional {
                    let (copy_start, copy_end) = self.fragment(&repeat.inner)?;
                    self.epsilon(end, copy_start);
                    self.epsilon(copy_start, copy_end);
                    end = copy_end;
                }
            }
            None => {
                let (copy_start, copy_end) = self.fragment(&repeat.inner)?;
                self.epsilon(end, copy_start);
                self.epsilon(copy_start, copy_end);
                self.epsilon(copy_end, copy_start);
                end = copy_end;
            }
        }

        Ok((start, end))
    }
}
