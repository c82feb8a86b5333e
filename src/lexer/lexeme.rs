/// A pattern string lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// A byte matched literally, including escaped metacharacters.
    Literal(u8),
    /// `(`
    LParen,
    /// `(?:`
    NonCapturing,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `^` directly after `[`.
    Caret,
    /// `-` inside a bracket expression.
    Dash,
    /// `|`
    Pipe,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `{m,n}`. A `max` of `None` is unbounded.
    Bounds { min: usize, max: Option<usize> },
}

impl Lexeme {
    /// Returns the repetition range of a quantifier lexeme.
    #[must_use]
    pub const fn repetition(self) -> Option<(usize, Option<usize>)> {
        match self {
            Lexeme::Star => Some((0, None)),
            Lexeme::Plus => Some((1, None)),
            Lexeme::Question => Some((0, Some(1))),
            Lexeme::Bounds { min, max } => Some((min, max)),
            _ => None,
        }
    }
}

/// A [`Lexeme`] with associated position information.
#[derive(Clone, Copy, Debug, Eq)]
pub struct PosLexeme {
    /// The start position of the lexeme in the pattern string.
    pub pos: usize,
    /// The lexeme.
    pub lexeme: Lexeme,
}

impl core::ops::Deref for PosLexeme {
    type Target = Lexeme;

    fn deref(&self) -> &Self::Target {
        &self.lexeme
    }
}

impl PartialEq for PosLexeme {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.lexeme == other.lexeme
    }
}
