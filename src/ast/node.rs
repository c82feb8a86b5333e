use super::{super::CharSet, Repeat};

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    Literal(u8),
    Bracket(CharSet), // [...] or [^...], negation already applied

    // Both compile to an alternation over their children
    Group(Vec<Token>),          // (...)
    UncaptureGroup(Vec<Token>), // (?:...)

    Or {
        left: Vec<Token>,
        right: Vec<Token>,
    },

    Repeat(Repeat),
}

impl Token {
    /// Wraps this token in a [`Token::Repeat`].
    #[must_use]
    pub fn repeated(self, min: usize, max: Option<usize>) -> Self {
        Token::Repeat(Repeat {
            inner: Box::new(self),
            min,
            max,
        })
    }
}
