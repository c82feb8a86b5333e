use super::parser::{Error, Result};

pub mod lexeme;

pub use lexeme::{Lexeme, PosLexeme};

/// Splits a pattern into [`Lexeme`]s with one lexeme of lookahead.
///
/// Which bytes are special depends on where the lexer is: inside a bracket
/// expression only `]`, `-`, a leading `^` and `\` mean anything, and a `)`
/// with no open group is an ordinary byte.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    group_depth: usize,
    in_set: bool,
    set_start: bool,
    peeked: Option<PosLexeme>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given `input`.
    ///
    /// # Errors
    ///
    /// If the first byte sequence in the input is not a valid lexeme, an
    /// [`Error`] is returned.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        let mut lexer = Lexer {
            input,
            pos: 0,
            group_depth: 0,
            in_set: false,
            set_start: false,
            peeked: None,
        };
        lexer.peeked = lexer.lex()?;
        Ok(lexer)
    }

    /// Returns the next lexeme without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<PosLexeme> {
        self.peeked
    }

    /// Consumes and returns the next lexeme.
    pub fn next_lexeme(&mut self) -> Result<Option<PosLexeme>> {
        let current = self.peeked;
        if current.is_some() {
            self.peeked = self.lex()?;
        }
        Ok(current)
    }

    /// Consumes the next lexeme if it is `lexeme`.
    pub fn consume(&mut self, lexeme: Lexeme) -> Result<bool> {
        if self.peek().is_some_and(|next| next.lexeme == lexeme) {
            self.next_lexeme()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Returns the position of the next unconsumed lexeme, or the length of the
    /// pattern if there are none left.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.peeked.map_or(self.input.len(), |next| next.pos)
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn lex(&mut self) -> Result<Option<PosLexeme>> {
        let pos = self.pos;
        let Some(byte) = self.advance() else {
            return Ok(None);
        };

        let lexeme = if self.in_set {
            self.lex_in_set(pos, byte)?
        } else {
            self.lex_outside_set(pos, byte)?
        };

        Ok(Some(PosLexeme { pos, lexeme }))
    }

    fn lex_in_set(&mut self, pos: usize, byte: u8) -> Result<Lexeme> {
        let set_start = std::mem::take(&mut self.set_start);
        Ok(match byte {
            b']' => {
                self.in_set = false;
                Lexeme::RBracket
            }
            b'^' if set_start => {
                // Only one caret may negate; `[^^]` holds a literal caret.
                Lexeme::Caret
            }
            b'-' => Lexeme::Dash,
            b'\\' => Lexeme::Literal(self.escaped(pos)?),
            _ => Lexeme::Literal(byte),
        })
    }

    fn lex_outside_set(&mut self, pos: usize, byte: u8) -> Result<Lexeme> {
        Ok(match byte {
            b'(' => {
                self.group_depth += 1;
                if self.input[self.pos..].starts_with(b"?:") {
                    self.pos += 2;
                    Lexeme::NonCapturing
                } else {
                    Lexeme::LParen
                }
            }
            b')' if self.group_depth > 0 => {
                self.group_depth -= 1;
                Lexeme::RParen
            }
            b'[' => {
                self.in_set = true;
                self.set_start = true;
                Lexeme::LBracket
            }
            b'|' => Lexeme::Pipe,
            b'*' => Lexeme::Star,
            b'+' => Lexeme::Plus,
            b'?' => Lexeme::Question,
            b'{' => self.bounds(pos)?,
            b'\\' => Lexeme::Literal(self.escaped(pos)?),
            _ => Lexeme::Literal(byte),
        })
    }

    fn escaped(&mut self, pos: usize) -> Result<u8> {
        self.advance().ok_or(Error::DanglingEscape { pos })
    }

    fn bounds(&mut self, pos: usize) -> Result<Lexeme> {
        let rest = &self.input[self.pos..];
        let Some(len) = rest.iter().position(|&b| b == b'}') else {
            return Err(Error::UnclosedBounds { pos });
        };
        let body = &rest[..len];
        self.pos += len + 1;

        let (min, max) = parse_bounds(pos, body)?;
        if let Some(max) = max
            && min > max
        {
            return Err(Error::ReversedBounds { pos, min, max });
        }

        Ok(Lexeme::Bounds { min, max })
    }
}

/// Parses the body of a `{...}` quantifier.
///
/// `{n}` is exactly `n`; an empty lower bound is 0 and an empty upper bound is
/// unbounded, so `{,}` and `{}` both repeat any number of times.
fn parse_bounds(pos: usize, body: &[u8]) -> Result<(usize, Option<usize>)> {
    let invalid = || Error::InvalidBound {
        pos,
        text: String::from_utf8_lossy(body).into_owned(),
    };

    let mut parts = body.split(|&b| b == b',');
    let first = parts.next().unwrap_or_default();
    let second = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let min = parse_bound(first).ok_or_else(invalid)?;
    let max = match second {
        Some(second) => parse_bound(second).ok_or_else(invalid)?,
        None => min,
    };

    Ok((min.unwrap_or(0), max))
}

/// Returns `Some(None)` for an empty bound and `None` for an invalid one.
fn parse_bound(text: &[u8]) -> Option<Option<usize>> {
    let text = text.trim_ascii();
    if text.is_empty() {
        return Some(None);
    }
    if !text.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(text).ok()?.parse().ok().map(Some)
}
