use super::{
    ast::{ParseContext, Token},
    charset::{self, CharSet},
    lexer::{Lexeme, Lexer, PosLexeme},
};

/// The error type returned when a pattern cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A `(` was never closed.
    #[error("unclosed group opened at {pos}")]
    UnclosedGroup { pos: usize },

    /// A `[` was never closed.
    #[error("unclosed bracket opened at {pos}")]
    UnclosedBracket { pos: usize },

    /// A `{` was never closed.
    #[error("unclosed repetition bounds opened at {pos}")]
    UnclosedBounds { pos: usize },

    /// A repetition bound is not a non-negative integer.
    #[error("invalid repetition bound '{{{text}}}' at {pos}")]
    InvalidBound { pos: usize, text: String },

    /// A repetition lower bound exceeds the upper bound.
    #[error("repetition lower bound {min} exceeds upper bound {max} at {pos}")]
    ReversedBounds { pos: usize, min: usize, max: usize },

    /// A quantifier does not follow anything it could repeat.
    #[error("nothing to repeat at {pos}")]
    NothingToRepeat { pos: usize },

    /// The pattern ends with a `\`.
    #[error("malformed pattern (ends with '\\') at {pos}")]
    DanglingEscape { pos: usize },

    /// A bracket expression contains an invalid range.
    #[error("{err} at {pos}")]
    CharSet { pos: usize, err: charset::Error },

    /// Groups, alternations and quantifiers are nested too deeply.
    #[error("pattern nests deeper than {MAX_DEPTH} levels at {pos}")]
    TooDeep { pos: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The deepest nesting of groups, alternations and quantifiers a pattern may
/// have.
pub const MAX_DEPTH: usize = 500;

/// Parses a pattern into its token sequence.
///
/// # Errors
///
/// If the pattern string cannot be parsed, an [`Error`] is returned.
pub fn parse(pattern: &[u8]) -> Result<ParseContext> {
    let context = Parser::new(pattern)?.parse()?;
    log::trace!(
        "parsed '{}' into {} top-level tokens",
        pattern.escape_ascii(),
        context.len()
    );
    Ok(context)
}

/// Converts a pattern string into a token sequence by recursive descent.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

/// The tokens of one scope, each with the height of its subtree.
#[derive(Default)]
struct Scope {
    tokens: Vec<Token>,
    heights: Vec<usize>,
}

impl Scope {
    fn push(&mut self, token: Token, height: usize) {
        self.tokens.push(token);
        self.heights.push(height);
    }

    fn pop(&mut self) -> Option<(Token, usize)> {
        Some((self.tokens.pop()?, self.heights.pop()?))
    }

    fn height(&self) -> usize {
        self.heights.iter().copied().max().unwrap_or(0)
    }
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given `pattern`.
    ///
    /// # Errors
    ///
    /// If the first byte sequence in the input is not a valid lexeme, an
    /// [`Error`] is returned.
    pub fn new(pattern: &'a [u8]) -> Result<Self> {
        Ok(Parser {
            lexer: Lexer::new(pattern)?,
            depth: 0,
        })
    }

    /// Converts the pattern into a [`ParseContext`], consuming the parser.
    ///
    /// # Errors
    ///
    /// If the pattern string is invalid, an [`Error`] is returned.
    pub fn parse(mut self) -> Result<ParseContext> {
        let Scope { tokens, .. } = self.parse_sequence()?;
        // The lexer never yields `)` without an open group, so the top-level
        // scope only stops at the end of the pattern.
        debug_assert!(self.lexer.peek().is_none());
        Ok(ParseContext::new(tokens, self.lexer.tell()))
    }

    /// Parses one scope: up to the end of the pattern or the `)` closing the
    /// enclosing group, which is left unconsumed.
    fn parse_sequence(&mut self) -> Result<Scope> {
        let mut scope = Scope::default();

        while let Some(PosLexeme { pos, lexeme }) = self.lexer.peek()
            && lexeme != Lexeme::RParen
        {
            if lexeme == Lexeme::Pipe {
                self.lexer.next_lexeme()?;
                let left = std::mem::take(&mut scope);
                let right = self.nested(pos, Self::parse_sequence)?;
                let height = checked_height(pos, left.height().max(right.height()))?;
                scope.push(
                    Token::Or {
                        left: left.tokens,
                        right: right.tokens,
                    },
                    height,
                );
            } else if let Some((min, max)) = lexeme.repetition() {
                self.lexer.next_lexeme()?;
                let Some((last, height)) = scope.pop() else {
                    return Err(Error::NothingToRepeat { pos });
                };
                scope.push(last.repeated(min, max), checked_height(pos, height)?);
            } else {
                let (token, height) = self.parse_item()?;
                scope.push(token, height);
            }
        }

        Ok(scope)
    }

    fn parse_item(&mut self) -> Result<(Token, usize)> {
        let Some(PosLexeme { pos, lexeme }) = self.lexer.next_lexeme()? else {
            unreachable!("parse_item is only called after a successful peek");
        };

        match lexeme {
            Lexeme::Literal(b) => Ok((Token::Literal(b), 1)),
            Lexeme::LParen => {
                let (inner, height) = self.parse_group(pos)?;
                Ok((Token::Group(inner), height))
            }
            Lexeme::NonCapturing => {
                let (inner, height) = self.parse_group(pos)?;
                Ok((Token::UncaptureGroup(inner), height))
            }
            Lexeme::LBracket => Ok((self.parse_bracket(pos)?, 1)),
            // Either bracket-only or already handled by `parse_sequence`.
            Lexeme::RParen
            | Lexeme::RBracket
            | Lexeme::Caret
            | Lexeme::Dash
            | Lexeme::Pipe
            | Lexeme::Star
            | Lexeme::Plus
            | Lexeme::Question
            | Lexeme::Bounds { .. } => unreachable!("unexpected lexeme {lexeme:?} at {pos}"),
        }
    }

    fn parse_group(&mut self, open: usize) -> Result<(Vec<Token>, usize)> {
        let inner = self.nested(open, Self::parse_sequence)?;

        if !self.lexer.consume(Lexeme::RParen)? {
            return Err(Error::UnclosedGroup { pos: open });
        }

        let height = checked_height(open, inner.height())?;
        Ok((inner.tokens, height))
    }

    /// Runs `parse` one level deeper, failing once [`MAX_DEPTH`] is passed.
    fn nested<T>(&mut self, pos: usize, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::TooDeep { pos });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_bracket(&mut self, open: usize) -> Result<Token> {
        let mut set = CharSet::new();
        let negated = self.lexer.consume(Lexeme::Caret)?;

        loop {
            let Some(PosLexeme { pos, lexeme }) = self.lexer.next_lexeme()? else {
                return Err(Error::UnclosedBracket { pos: open });
            };

            let start = match lexeme {
                Lexeme::RBracket => break,
                Lexeme::Literal(b) => b,
                // [-a]
                Lexeme::Dash => b'-',
                _ => unreachable!("unexpected lexeme {lexeme:?} inside bracket at {pos}"),
            };

            if self.lexer.peek().is_some_and(|next| *next == Lexeme::Dash) {
                self.lexer.next_lexeme()?;
                let end = match self.lexer.peek().map(|next| *next) {
                    Some(Lexeme::Literal(end)) => Some(end),
                    // [!--]
                    Some(Lexeme::Dash) => Some(b'-'),
                    _ => None,
                };
                match end {
                    // [a-z]
                    Some(end) => {
                        self.lexer.next_lexeme()?;
                        set.add_range(start, end)
                            .map_err(|err| Error::CharSet { pos, err })?;
                    }
                    // [a-]
                    None => {
                        set.add_byte(start);
                        set.add_byte(b'-');
                    }
                }
            } else {
                set.add_byte(start);
            }
        }

        if negated {
            set.invert();
        }

        Ok(Token::Bracket(set))
    }
}

/// Height of a token wrapping a subtree of height `inner`.
fn checked_height(pos: usize, inner: usize) -> Result<usize> {
    let height = inner + 1;
    if height > MAX_DEPTH {
        return Err(Error::TooDeep { pos });
    }
    Ok(height)
}
