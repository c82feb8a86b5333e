use bytematch::{
    ParseError,
    lexer::{Lexeme, Lexer},
};
use pretty_assertions::assert_eq;

fn lex_all(input: &[u8]) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexer = Lexer::new(input)?;
    let mut lexemes = Vec::new();
    while let Some(next) = lexer.next_lexeme()? {
        lexemes.push(next.lexeme);
    }
    Ok(lexemes)
}

#[test]
fn test_basic_lexemes() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(b"abc")?,
        vec![
            Lexeme::Literal(b'a'),
            Lexeme::Literal(b'b'),
            Lexeme::Literal(b'c')
        ]
    );
    assert_eq!(
        lex_all(b"(a|b)*+?")?,
        vec![
            Lexeme::LParen,
            Lexeme::Literal(b'a'),
            Lexeme::Pipe,
            Lexeme::Literal(b'b'),
            Lexeme::RParen,
            Lexeme::Star,
            Lexeme::Plus,
            Lexeme::Question,
        ]
    );
    assert_eq!(lex_all(b"")?, Vec::<Lexeme>::new());
    Ok(())
}

#[test]
fn test_unbalanced_closers_are_literals() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(b")]}")?,
        vec![
            Lexeme::Literal(b')'),
            Lexeme::Literal(b']'),
            Lexeme::Literal(b'}')
        ]
    );
    assert_eq!(
        lex_all(b"())")?,
        vec![Lexeme::LParen, Lexeme::RParen, Lexeme::Literal(b')')]
    );
    Ok(())
}

#[test]
fn test_non_capturing_group() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(b"(?:a)")?,
        vec![Lexeme::NonCapturing, Lexeme::Literal(b'a'), Lexeme::RParen]
    );
    assert_eq!(
        lex_all(b"(?a)")?,
        vec![
            Lexeme::LParen,
            Lexeme::Question,
            Lexeme::Literal(b'a'),
            Lexeme::RParen
        ]
    );
    Ok(())
}

#[test]
fn test_bracket_lexemes() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(b"[^a-c]")?,
        vec![
            Lexeme::LBracket,
            Lexeme::Caret,
            Lexeme::Literal(b'a'),
            Lexeme::Dash,
            Lexeme::Literal(b'c'),
            Lexeme::RBracket
        ]
    );
    // Metacharacters lose their meaning inside a bracket.
    assert_eq!(
        lex_all(b"[(|*^]")?,
        vec![
            Lexeme::LBracket,
            Lexeme::Literal(b'('),
            Lexeme::Literal(b'|'),
            Lexeme::Literal(b'*'),
            Lexeme::Literal(b'^'),
            Lexeme::RBracket
        ]
    );
    assert_eq!(
        lex_all(b"-[-]-")?,
        vec![
            Lexeme::Literal(b'-'),
            Lexeme::LBracket,
            Lexeme::Dash,
            Lexeme::RBracket,
            Lexeme::Literal(b'-')
        ]
    );
    Ok(())
}

#[test]
fn test_escapes() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(br"\*\\\(")?,
        vec![
            Lexeme::Literal(b'*'),
            Lexeme::Literal(b'\\'),
            Lexeme::Literal(b'(')
        ]
    );
    assert_eq!(
        lex_all(br"[\]\-]")?,
        vec![
            Lexeme::LBracket,
            Lexeme::Literal(b']'),
            Lexeme::Literal(b'-'),
            Lexeme::RBracket
        ]
    );
    assert_eq!(lex_all(br"ab\"), Err(ParseError::DanglingEscape { pos: 2 }));
    Ok(())
}

#[test]
fn test_bounds() -> Result<(), ParseError> {
    assert_eq!(
        lex_all(b"a{2,5}")?,
        vec![
            Lexeme::Literal(b'a'),
            Lexeme::Bounds {
                min: 2,
                max: Some(5)
            }
        ]
    );
    assert_eq!(
        lex_all(b"{3}{3,}{,4}{,}")?,
        vec![
            Lexeme::Bounds {
                min: 3,
                max: Some(3)
            },
            Lexeme::Bounds { min: 3, max: None },
            Lexeme::Bounds {
                min: 0,
                max: Some(4)
            },
            Lexeme::Bounds { min: 0, max: None },
        ]
    );
    assert_eq!(
        lex_all(b"a{1,x}"),
        Err(ParseError::InvalidBound {
            pos: 1,
            text: "1,x".to_string()
        })
    );
    assert_eq!(
        lex_all(b"a{5,2}"),
        Err(ParseError::ReversedBounds {
            pos: 1,
            min: 5,
            max: 2
        })
    );
    assert_eq!(lex_all(b"ab{1,2"), Err(ParseError::UnclosedBounds { pos: 2 }));
    Ok(())
}

#[test]
fn test_positions() -> Result<(), ParseError> {
    let mut lexer = Lexer::new(b"a(?:b){2}")?;
    let mut positions = Vec::new();
    while let Some(next) = lexer.next_lexeme()? {
        positions.push(next.pos);
    }
    assert_eq!(positions, vec![0, 1, 4, 5, 6]);
    assert_eq!(lexer.tell(), 9);
    Ok(())
}
