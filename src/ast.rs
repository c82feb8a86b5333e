pub mod node;
pub mod quantifier;

pub use self::{node::Token, quantifier::Repeat};

/// The tokens produced by parsing a pattern, along with the pattern position
/// where parsing stopped.
#[derive(Debug, Default, PartialEq)]
pub struct ParseContext {
    tokens: Vec<Token>,
    pos: usize,
}

impl ParseContext {
    #[must_use]
    pub(crate) fn new(tokens: Vec<Token>, pos: usize) -> Self {
        Self { tokens, pos }
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl std::ops::Deref for ParseContext {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl PartialEq<&[Token]> for ParseContext {
    fn eq(&self, other: &&[Token]) -> bool {
        self.tokens == *other
    }
}

impl<const N: usize> PartialEq<&[Token; N]> for ParseContext {
    fn eq(&self, other: &&[Token; N]) -> bool {
        self.tokens == other[..]
    }
}
