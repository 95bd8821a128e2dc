//! CSS tokenizer - converts input text into a flat token sequence
//!
//! Follows the consumption rules of CSS Syntax Level 3. The tokenizer never
//! fails: malformed constructs degrade (`BadString`, `BadUrl`, replacement
//! characters for broken escapes) and tokenization always terminates. The
//! full token sequence is produced eagerly per call; there is no shared
//! state between calls.

use crate::token::CssToken;

const REPLACEMENT: char = '\u{FFFD}';

/// The CSS tokenizer.
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
}

/// Tokenize the entire input into an ordered token sequence.
pub fn tokenize(input: &str) -> Vec<CssToken> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    tokens
}

impl Tokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// Applies the input preprocessing step: newline forms collapse to
    /// `\n` and NUL becomes the replacement character.
    pub fn new(input: &str) -> Self {
        let mut chars = Vec::with_capacity(input.len());
        let mut iter = input.chars().peekable();
        while let Some(c) = iter.next() {
            match c {
                '\r' => {
                    if iter.peek() == Some(&'\n') {
                        iter.next();
                    }
                    chars.push('\n');
                }
                '\x0C' => chars.push('\n'),
                '\0' => chars.push(REPLACEMENT),
                _ => chars.push(c),
            }
        }
        Self { chars, pos: 0 }
    }

    /// Peek at the character `offset` positions ahead without advancing.
    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consume and return the current character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        Some(c)
    }

    /// Consume and return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<CssToken> {
        self.consume_comments();

        let c = self.peek(0)?;
        let token = match c {
            c if is_whitespace(c) => {
                self.skip_whitespace();
                CssToken::Whitespace
            }
            '"' | '\'' => self.consume_string(c),
            '#' => {
                if self.peek(1).map(is_ident_char).unwrap_or(false) || self.is_valid_escape(1) {
                    self.bump(); // Skip '#'
                    CssToken::Hash(self.consume_ident_sequence())
                } else {
                    self.bump();
                    CssToken::Delim('#')
                }
            }
            '(' => self.single(CssToken::OpenParen),
            ')' => self.single(CssToken::CloseParen),
            '[' => self.single(CssToken::OpenBracket),
            ']' => self.single(CssToken::CloseBracket),
            '{' => self.single(CssToken::OpenBrace),
            '}' => self.single(CssToken::CloseBrace),
            ',' => self.single(CssToken::Comma),
            ':' => self.single(CssToken::Colon),
            ';' => self.single(CssToken::Semicolon),
            '+' => {
                if self.would_start_number() {
                    self.consume_numeric()
                } else {
                    self.single(CssToken::Delim('+'))
                }
            }
            '-' => {
                if self.would_start_number() {
                    self.consume_numeric()
                } else if self.peek(1) == Some('-') && self.peek(2) == Some('>') {
                    self.pos += 3;
                    CssToken::Cdc
                } else if self.would_start_ident(0) {
                    self.consume_ident_like()
                } else {
                    self.single(CssToken::Delim('-'))
                }
            }
            '.' => {
                if self.would_start_number() {
                    self.consume_numeric()
                } else {
                    self.single(CssToken::Delim('.'))
                }
            }
            '<' => {
                if self.peek(1) == Some('!') && self.peek(2) == Some('-') && self.peek(3) == Some('-')
                {
                    self.pos += 4;
                    CssToken::Cdo
                } else {
                    self.single(CssToken::Delim('<'))
                }
            }
            '@' => {
                if self.would_start_ident(1) {
                    self.bump(); // Skip '@'
                    CssToken::AtKeyword(self.consume_ident_sequence())
                } else {
                    self.single(CssToken::Delim('@'))
                }
            }
            '\\' => {
                if self.is_valid_escape(0) {
                    self.consume_ident_like()
                } else {
                    // Backslash followed by a newline escapes nothing.
                    self.single(CssToken::Delim('\\'))
                }
            }
            c if c.is_ascii_digit() => self.consume_numeric(),
            c if is_ident_start(c) => self.consume_ident_like(),
            c => self.single(CssToken::Delim(c)),
        };

        Some(token)
    }

    /// Consume a single character and return the given token.
    fn single(&mut self, token: CssToken) -> CssToken {
        self.bump();
        token
    }

    /// Skip comments (`/* */` only; CSS has no line comments).
    fn consume_comments(&mut self) {
        while self.peek(0) == Some('/') && self.peek(1) == Some('*') {
            self.pos += 2;
            loop {
                match self.bump() {
                    None => return, // unterminated comment reaches EOF
                    Some('*') if self.peek(0) == Some('/') => {
                        self.bump();
                        break;
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Skip a run of whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek(0).map(is_whitespace).unwrap_or(false) {
            self.bump();
        }
    }

    /// Check whether the characters at `offset` are a valid escape
    /// (backslash not followed by a newline; EOF counts as valid and
    /// produces the replacement character).
    fn is_valid_escape(&self, offset: usize) -> bool {
        self.peek(offset) == Some('\\') && self.peek(offset + 1) != Some('\n')
    }

    /// Check whether the next characters would start a number.
    fn would_start_number(&self) -> bool {
        match self.peek(0) {
            Some('+') | Some('-') => match self.peek(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('.') => self.peek(2).map(|c| c.is_ascii_digit()).unwrap_or(false),
                _ => false,
            },
            Some('.') => self.peek(1).map(|c| c.is_ascii_digit()).unwrap_or(false),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    /// Check whether the characters at `offset` would start an ident
    /// sequence.
    fn would_start_ident(&self, offset: usize) -> bool {
        match self.peek(offset) {
            Some('-') => match self.peek(offset + 1) {
                Some(c) if is_ident_start(c) || c == '-' => true,
                _ => self.is_valid_escape(offset + 1),
            },
            Some('\\') => self.is_valid_escape(offset),
            Some(c) => is_ident_start(c),
            None => false,
        }
    }

    /// Read a number and classify the token that follows it: an ident
    /// sequence makes a Dimension, a `%` makes a Percentage.
    fn consume_numeric(&mut self) -> CssToken {
        let (value, is_integer) = self.consume_number();

        if self.would_start_ident(0) {
            let unit = self.consume_ident_sequence();
            CssToken::Dimension {
                value,
                is_integer,
                unit,
            }
        } else if self.peek(0) == Some('%') {
            self.bump(); // Skip '%'
            CssToken::Percentage(value)
        } else {
            CssToken::Number { value, is_integer }
        }
    }

    /// Read a number: optional sign, digits, optional fraction, optional
    /// exponent. Returns the value and whether it is an integer.
    fn consume_number(&mut self) -> (f64, bool) {
        let mut repr = String::new();
        let mut is_integer = true;

        if let Some(c @ ('+' | '-')) = self.peek(0) {
            self.bump();
            repr.push(c);
        }
        while let Some(c) = self.peek(0) {
            if c.is_ascii_digit() {
                self.bump();
                repr.push(c);
            } else {
                break;
            }
        }

        // Fractional part, only if the dot is followed by digits.
        if self.peek(0) == Some('.') && self.peek(1).map(|c| c.is_ascii_digit()).unwrap_or(false) {
            is_integer = false;
            self.bump();
            repr.push('.');
            while let Some(c) = self.peek(0) {
                if c.is_ascii_digit() {
                    self.bump();
                    repr.push(c);
                } else {
                    break;
                }
            }
        }

        // Exponent part: e/E, optional sign, digits.
        if let Some(e @ ('e' | 'E')) = self.peek(0) {
            let exponent_digits = match self.peek(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => {
                    self.peek(2).map(|c| c.is_ascii_digit()).unwrap_or(false)
                }
                _ => false,
            };
            if exponent_digits {
                is_integer = false;
                self.bump();
                repr.push(e);
                if let Some(sign @ ('+' | '-')) = self.peek(0) {
                    self.bump();
                    repr.push(sign);
                }
                while let Some(c) = self.peek(0) {
                    if c.is_ascii_digit() {
                        self.bump();
                        repr.push(c);
                    } else {
                        break;
                    }
                }
            }
        }

        // The collected repr matches the float grammar by construction.
        let value = repr.parse::<f64>().unwrap_or(0.0);
        (value, is_integer)
    }

    /// Read an ident sequence, resolving escapes.
    fn consume_ident_sequence(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.peek(0) {
                Some(c) if is_ident_char(c) => {
                    self.bump();
                    out.push(c);
                }
                Some('\\') if self.is_valid_escape(0) => {
                    self.bump(); // Skip '\'
                    out.push(self.consume_escape());
                }
                _ => break,
            }
        }
        out
    }

    /// Resolve an escape sequence. The backslash has already been consumed.
    ///
    /// Up to 6 hex digits plus one optional trailing whitespace character;
    /// zero, surrogate, or out-of-range code points and EOF all yield the
    /// replacement character, never an error.
    fn consume_escape(&mut self) -> char {
        let Some(c) = self.bump() else {
            return REPLACEMENT;
        };

        if !c.is_ascii_hexdigit() {
            return c;
        }

        let mut value = c.to_digit(16).unwrap_or(0);
        let mut digits = 1;
        while digits < 6 {
            match self.peek(0) {
                Some(h) if h.is_ascii_hexdigit() => {
                    self.bump();
                    value = value * 16 + h.to_digit(16).unwrap_or(0);
                    digits += 1;
                }
                _ => break,
            }
        }
        if self.peek(0).map(is_whitespace).unwrap_or(false) {
            self.bump(); // a single whitespace terminates the escape
        }

        if value == 0 || (0xD800..=0xDFFF).contains(&value) || value > 0x10FFFF {
            return REPLACEMENT;
        }
        char::from_u32(value).unwrap_or(REPLACEMENT)
    }

    /// Read an ident-like token: a plain ident, a function, or a url.
    fn consume_ident_like(&mut self) -> CssToken {
        let name = self.consume_ident_sequence();

        if self.peek(0) == Some('(') {
            self.bump(); // Skip '('
            if name.eq_ignore_ascii_case("url") {
                self.skip_whitespace();
                if matches!(self.peek(0), Some('"') | Some('\'')) {
                    return CssToken::Function(name);
                }
                return self.consume_url();
            }
            return CssToken::Function(name);
        }

        CssToken::Ident(name)
    }

    /// Read an unquoted url token. The `url(` and any leading whitespace
    /// have already been consumed.
    fn consume_url(&mut self) -> CssToken {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return CssToken::Url(value), // EOF still yields a url
                Some(')') => return CssToken::Url(value),
                Some(c) if is_whitespace(c) => {
                    self.skip_whitespace();
                    return match self.peek(0) {
                        None => CssToken::Url(value),
                        Some(')') => {
                            self.bump();
                            CssToken::Url(value)
                        }
                        _ => self.consume_bad_url_remnants(),
                    };
                }
                Some('"') | Some('\'') | Some('(') => return self.consume_bad_url_remnants(),
                Some('\\') => {
                    if self.peek(0) != Some('\n') {
                        value.push(self.consume_escape());
                    } else {
                        return self.consume_bad_url_remnants();
                    }
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Swallow the rest of a broken url so the next token starts clean.
    fn consume_bad_url_remnants(&mut self) -> CssToken {
        loop {
            match self.bump() {
                None | Some(')') => return CssToken::BadUrl,
                Some('\\') if self.peek(0) != Some('\n') => {
                    self.consume_escape();
                }
                Some(_) => {}
            }
        }
    }

    /// Read a string token. Unterminated strings degrade: EOF closes the
    /// string, a bare newline turns it into `BadString`.
    fn consume_string(&mut self, quote: char) -> CssToken {
        self.bump(); // Skip the opening quote
        let mut value = String::new();
        loop {
            match self.peek(0) {
                None => return CssToken::String(value),
                Some(c) if c == quote => {
                    self.bump();
                    return CssToken::String(value);
                }
                // The newline is not consumed; it belongs to the next token.
                Some('\n') => return CssToken::BadString,
                Some('\\') => {
                    self.bump(); // Skip '\'
                    match self.peek(0) {
                        None => {} // a trailing backslash contributes nothing
                        Some('\n') => {
                            self.bump(); // escaped newline: line continuation
                        }
                        Some(_) => value.push(self.consume_escape()),
                    }
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }
}

fn is_whitespace(c: char) -> bool {
    // \r and \x0C were normalized to \n during preprocessing.
    matches!(c, ' ' | '\t' | '\n')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c >= '\u{0080}'
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}
