//! Unit tests for the CSS tokenizer

use cassia_numeric::lexer::tokenize;
use cassia_numeric::token::CssToken;

#[test]
fn test_numbers() {
    assert_eq!(
        tokenize("42"),
        vec![CssToken::Number {
            value: 42.0,
            is_integer: true
        }]
    );
    assert_eq!(
        tokenize("3.14"),
        vec![CssToken::Number {
            value: 3.14,
            is_integer: false
        }]
    );
    assert_eq!(
        tokenize("-7"),
        vec![CssToken::Number {
            value: -7.0,
            is_integer: true
        }]
    );
    assert_eq!(
        tokenize("+.5"),
        vec![CssToken::Number {
            value: 0.5,
            is_integer: false
        }]
    );
    assert_eq!(
        tokenize("2e3"),
        vec![CssToken::Number {
            value: 2000.0,
            is_integer: false
        }]
    );
    assert_eq!(
        tokenize("1.5e-2"),
        vec![CssToken::Number {
            value: 0.015,
            is_integer: false
        }]
    );
}

#[test]
fn test_dimensions_and_percentages() {
    assert_eq!(
        tokenize("10px"),
        vec![CssToken::Dimension {
            value: 10.0,
            is_integer: true,
            unit: "px".into()
        }]
    );
    // 'e' followed by a non-digit is a unit, not an exponent.
    assert_eq!(
        tokenize("5em"),
        vec![CssToken::Dimension {
            value: 5.0,
            is_integer: true,
            unit: "em".into()
        }]
    );
    assert_eq!(
        tokenize("-1.5turn"),
        vec![CssToken::Dimension {
            value: -1.5,
            is_integer: false,
            unit: "turn".into()
        }]
    );
    assert_eq!(tokenize("50%"), vec![CssToken::Percentage(50.0)]);
}

#[test]
fn test_idents_and_functions() {
    assert_eq!(tokenize("auto"), vec![CssToken::Ident("auto".into())]);
    assert_eq!(
        tokenize("-webkit-foo"),
        vec![CssToken::Ident("-webkit-foo".into())]
    );
    assert_eq!(
        tokenize("--custom"),
        vec![CssToken::Ident("--custom".into())]
    );
    assert_eq!(tokenize("calc("), vec![CssToken::Function("calc".into())]);
    assert_eq!(
        tokenize("min(1px"),
        vec![
            CssToken::Function("min".into()),
            CssToken::Dimension {
                value: 1.0,
                is_integer: true,
                unit: "px".into()
            }
        ]
    );
}

#[test]
fn test_escapes() {
    // \70 with a terminating space is 'p'.
    assert_eq!(tokenize("\\70 x"), vec![CssToken::Ident("px".into())]);

    // A lone trailing backslash yields the replacement character.
    assert_eq!(tokenize("\\"), vec![CssToken::Ident("\u{FFFD}".into())]);

    // Zero and out-of-range code points degrade to the replacement
    // character, never an error.
    assert_eq!(tokenize("\\0"), vec![CssToken::Ident("\u{FFFD}".into())]);
    assert_eq!(
        tokenize("\\110000 x"),
        vec![CssToken::Ident("\u{FFFD}x".into())]
    );
}

#[test]
fn test_strings() {
    assert_eq!(tokenize("'hello'"), vec![CssToken::String("hello".into())]);
    assert_eq!(tokenize("\"hi\""), vec![CssToken::String("hi".into())]);

    // EOF closes an unterminated string.
    assert_eq!(tokenize("'abc"), vec![CssToken::String("abc".into())]);

    // A bare newline degrades to BadString; the newline is not consumed.
    let tokens = tokenize("'ab\ncd'");
    assert_eq!(tokens[0], CssToken::BadString);
    assert_eq!(tokens[1], CssToken::Whitespace);
}

#[test]
fn test_urls() {
    assert_eq!(
        tokenize("url(foo.png)"),
        vec![CssToken::Url("foo.png".into())]
    );
    // A quoted url is a plain function.
    let tokens = tokenize("url('foo.png')");
    assert_eq!(tokens[0], CssToken::Function("url".into()));
    // Unterminated url degrades at EOF.
    assert_eq!(tokenize("url(foo"), vec![CssToken::Url("foo".into())]);
    // A stray quote inside an unquoted url is unrecoverable.
    assert_eq!(tokenize("url(f'oo)"), vec![CssToken::BadUrl]);
}

#[test]
fn test_whitespace_collapses() {
    assert_eq!(
        tokenize("a  \t\n b"),
        vec![
            CssToken::Ident("a".into()),
            CssToken::Whitespace,
            CssToken::Ident("b".into())
        ]
    );
}

#[test]
fn test_punctuation_and_delims() {
    assert_eq!(
        tokenize("([{}]),:;"),
        vec![
            CssToken::OpenParen,
            CssToken::OpenBracket,
            CssToken::OpenBrace,
            CssToken::CloseBrace,
            CssToken::CloseBracket,
            CssToken::CloseParen,
            CssToken::Comma,
            CssToken::Colon,
            CssToken::Semicolon,
        ]
    );
    assert_eq!(tokenize("$"), vec![CssToken::Delim('$')]);
    assert_eq!(tokenize("+"), vec![CssToken::Delim('+')]);
    assert_eq!(tokenize("#fff"), vec![CssToken::Hash("fff".into())]);
    assert_eq!(tokenize("@media"), vec![CssToken::AtKeyword("media".into())]);
}

#[test]
fn test_cdo_cdc() {
    assert_eq!(tokenize("<!--"), vec![CssToken::Cdo]);
    assert_eq!(tokenize("-->"), vec![CssToken::Cdc]);
    assert_eq!(tokenize("<"), vec![CssToken::Delim('<')]);
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        tokenize("/* one */1px/* two */"),
        vec![CssToken::Dimension {
            value: 1.0,
            is_integer: true,
            unit: "px".into()
        }]
    );
    // Unterminated comment consumes to EOF without failing.
    assert_eq!(tokenize("1 /* open"), {
        vec![
            CssToken::Number {
                value: 1.0,
                is_integer: true,
            },
            CssToken::Whitespace,
        ]
    });
}

#[test]
fn test_signed_dimension_vs_cdc() {
    assert_eq!(
        tokenize("-5px"),
        vec![CssToken::Dimension {
            value: -5.0,
            is_integer: true,
            unit: "px".into()
        }]
    );
    assert_eq!(tokenize("-"), vec![CssToken::Delim('-')]);
}
