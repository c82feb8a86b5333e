//! A small byte-oriented regular expression engine.
//!
//! A pattern goes through three stages: [`parser`] turns it into [`Token`]s,
//! [`compiler`] turns those into an [`Nfa`], and [`matcher`] runs a
//! backtracking search of the automaton against the whole input.
//!
//! ```
//! assert!(bytematch::is_match("aaa", "a{1,3}").unwrap());
//! assert!(!bytematch::is_match("aaaa", "a{1,3}").unwrap());
//! ```

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc)]

pub mod ast;
pub mod charset;
pub mod compiler;
pub mod lexer;
pub mod matcher;
pub mod nfa;
pub mod parser;

pub use self::{
    ast::{ParseContext, Repeat, Token},
    charset::CharSet,
    compiler::{Compiler, Error as CompileError, compile},
    matcher::{StepLimitExceeded, check, check_with_limit},
    nfa::Nfa,
    parser::{Error as ParseError, parse},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The pattern is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The pattern could not be turned into an automaton.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The search ran out of its step budget.
    #[error("match aborted after {limit} steps")]
    StepLimit { limit: u64 },
}

impl From<StepLimitExceeded> for Error {
    fn from(StepLimitExceeded { limit }: StepLimitExceeded) -> Self {
        Error::StepLimit { limit }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Resource limits applied by [`is_match_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    step_limit: Option<u64>,
    state_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_limit: None,
            state_limit: compiler::DEFAULT_STATE_LIMIT,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many `(state, position)` visits one match may make. `None`,
    /// the default, searches until an answer is found.
    #[must_use]
    pub fn step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    /// Limits how many states the compiled automaton may have.
    #[must_use]
    pub fn state_limit(mut self, limit: usize) -> Self {
        self.state_limit = limit;
        self
    }
}

/// Returns `true` if the whole of `input` matches `pattern`.
///
/// Every call parses and compiles the pattern afresh.
pub fn is_match(input: impl AsRef<[u8]>, pattern: impl AsRef<[u8]>) -> Result<bool> {
    is_match_with(&Config::default(), input, pattern)
}

/// Like [`is_match`], with the limits of `config` applied.
pub fn is_match_with(
    config: &Config,
    input: impl AsRef<[u8]>,
    pattern: impl AsRef<[u8]>,
) -> Result<bool> {
    let context = parse(pattern.as_ref())?;
    let nfa = Compiler::with_state_limit(config.state_limit).compile(context.tokens())?;
    Ok(check_with_limit(&nfa, input.as_ref(), config.step_limit)?)
}
