//! Dot/bracket path syntax.
//!
//! The string form uses dots between keys and brackets for indices:
//! `buttons[2].icon.color`. Keys that contain delimiter characters are
//! written as quoted bracket members: `rows[0]['odd.key']`.

use crate::{Path, Seg};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character: {0}")]
    UnexpectedChar(char),
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Empty key segment")]
    EmptyKey,
    #[error("Invalid array index")]
    InvalidIndex,
    #[error("Unclosed string")]
    UnclosedString,
    #[error("Invalid escape sequence")]
    InvalidEscape,
}

/// Parse a dot/bracket path string into segments.
///
/// - The empty string is the root path
/// - `a.b` and `a['b']` both address key `b` under key `a`
/// - `[2]` addresses index 2; indices are unquoted digits
/// - Quoted keys accept `\\`, `\'`, `\"`, `\n`, `\t`, and `\r` escapes
///
/// # Example
///
/// ```
/// use draftboard_path::{parse_path, Seg};
///
/// assert_eq!(parse_path("").unwrap(), vec![]);
/// assert_eq!(
///     parse_path("buttons[2].label").unwrap(),
///     vec![Seg::key("buttons"), Seg::index(2), Seg::key("label")]
/// );
/// assert_eq!(
///     parse_path("rows[0]['odd.key']").unwrap(),
///     vec![Seg::key("rows"), Seg::index(0), Seg::key("odd.key")]
/// );
/// ```
pub fn parse_path(input: &str) -> Result<Path, ParseError> {
    PathParser::parse(input)
}

/// Format segments back into the dot/bracket string form.
///
/// Keys that are empty or contain `.`, `[`, `]`, quotes, backslashes, or
/// control characters are emitted as quoted bracket members, so the output
/// always parses back to the same segments.
///
/// # Example
///
/// ```
/// use draftboard_path::{format_path, Seg};
///
/// assert_eq!(format_path(&[]), "");
/// assert_eq!(
///     format_path(&[Seg::key("buttons"), Seg::index(2), Seg::key("label")]),
///     "buttons[2].label"
/// );
/// assert_eq!(
///     format_path(&[Seg::key("odd.key")]),
///     "['odd.key']"
/// );
/// ```
pub fn format_path(path: &[Seg]) -> String {
    let mut out = String::new();
    for (i, seg) in path.iter().enumerate() {
        match seg {
            Seg::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            Seg::Key(key) => {
                if needs_quoting(key) {
                    out.push_str("['");
                    push_escaped(&mut out, key);
                    out.push_str("']");
                } else {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(key);
                }
            }
        }
    }
    out
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '\'' | '"' | '\\') || c.is_control())
}

fn push_escaped(out: &mut String, key: &str) {
    for c in key.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

/// Dot/bracket path parser.
struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn parse(input: &'a str) -> Result<Path, ParseError> {
        let mut parser = Self { input, pos: 0 };
        parser.parse_segments()
    }

    fn parse_segments(&mut self) -> Result<Path, ParseError> {
        let mut path = Path::new();
        if self.is_at_end() {
            // Empty string addresses the root.
            return Ok(path);
        }

        // The first segment carries no leading dot.
        if self.peek() == Some('[') {
            path.push(self.parse_bracket()?);
        } else {
            path.push(Seg::Key(self.parse_bare_key()?));
        }

        while !self.is_at_end() {
            match self.peek() {
                Some('.') => {
                    self.advance();
                    path.push(Seg::Key(self.parse_bare_key()?));
                }
                Some('[') => path.push(self.parse_bracket()?),
                Some(c) => return Err(ParseError::UnexpectedChar(c)),
                None => break,
            }
        }

        Ok(path)
    }

    fn parse_bare_key(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if matches!(c, '.' | '[' | ']') {
                break;
            }
            self.advance();
        }
        if self.pos == start {
            return Err(ParseError::EmptyKey);
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_bracket(&mut self) -> Result<Seg, ParseError> {
        self.expect('[')?;
        let seg = match self.peek() {
            Some('\'') | Some('"') => Seg::Key(self.parse_quoted()?),
            Some('0'..='9') => Seg::Index(self.parse_index()?),
            Some(c) => return Err(ParseError::UnexpectedChar(c)),
            None => return Err(ParseError::UnexpectedEnd),
        };
        self.expect(']')?;
        Ok(seg)
    }

    fn parse_index(&mut self) -> Result<usize, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        let digits = &self.input[start..self.pos];
        // "0" is fine, "01" is not.
        if digits.len() > 1 && digits.as_bytes()[0] == b'0' {
            return Err(ParseError::InvalidIndex);
        }
        digits.parse::<usize>().map_err(|_| ParseError::InvalidIndex)
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let quote = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        self.advance();

        let mut result = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::UnclosedString),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('\\') => result.push('\\'),
                        Some('\'') => result.push('\''),
                        Some('"') => result.push('"'),
                        _ => return Err(ParseError::InvalidEscape),
                    }
                    self.advance();
                }
                Some(c) => {
                    result.push(c);
                    self.advance();
                }
            }
        }

        Ok(result)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += self.peek().unwrap().len_utf8();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(c) => Err(ParseError::UnexpectedChar(c)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}
