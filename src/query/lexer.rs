//! tokenizer for media query strings
//!
//! produces a flat token stream with byte spans; whitespace and comments are
//! dropped. identifiers and units are lowercased since media queries are
//! ASCII case-insensitive.

use lazy_static::lazy_static;
use regex::Regex;

use super::types::RangeOp;
use crate::error::ParseError;

lazy_static! {
    static ref NUMBER_RE: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number regex");
    static ref IDENT_RE: Regex =
        Regex::new(r"^(?:--|-?[a-zA-Z_])[a-zA-Z0-9_-]*").expect("valid ident regex");
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    /// identifier directly followed by `(`, the paren is part of the token
    Function(String),
    Number {
        value: f64,
        integer: bool,
    },
    Dimension {
        value: f64,
        unit: String,
    },
    Colon,
    Comma,
    Slash,
    LParen,
    RParen,
    Op(RangeOp),
    Delim(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, TokenKind::LParen | TokenKind::Function(_))
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(s) => Some(s),
            _ => None,
        }
    }
}

/// split a query string into tokens
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            pos += c.len_utf8();
            continue;
        }

        if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(end) => {
                    pos += end + 4;
                    continue;
                }
                None => return Err(ParseError::new("unterminated comment", pos)),
            }
        }

        let single = match c {
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '/' => Some(TokenKind::Slash),
            _ => None,
        };
        if let Some(kind) = single {
            tokens.push(Token::new(kind, pos, pos + 1));
            pos += 1;
            continue;
        }

        if c == '<' || c == '>' || c == '=' {
            let len = if c != '=' && rest[1..].starts_with('=') {
                2
            } else {
                1
            };
            let op = RangeOp::parse(&rest[..len])
                .ok_or_else(|| ParseError::new(format!("invalid operator '{}'", c), pos))?;
            tokens.push(Token::new(TokenKind::Op(op), pos, pos + len));
            pos += len;
            continue;
        }

        if let Some(m) = NUMBER_RE.find(rest) {
            let text = m.as_str();
            let value: f64 = text
                .parse()
                .map_err(|_| ParseError::new(format!("invalid number '{}'", text), pos))?;
            let integer = !text.contains(['.', 'e', 'E']);
            let mut end = pos + m.end();

            let after = &source[end..];
            let kind = if let Some(unit) = IDENT_RE.find(after) {
                end += unit.end();
                TokenKind::Dimension {
                    value,
                    unit: unit.as_str().to_ascii_lowercase(),
                }
            } else if after.starts_with('%') {
                end += 1;
                TokenKind::Dimension {
                    value,
                    unit: "%".to_string(),
                }
            } else {
                TokenKind::Number { value, integer }
            };

            tokens.push(Token::new(kind, pos, end));
            pos = end;
            continue;
        }

        if let Some(m) = IDENT_RE.find(rest) {
            let name = m.as_str().to_ascii_lowercase();
            let mut end = pos + m.end();
            let kind = if source[end..].starts_with('(') {
                end += 1;
                TokenKind::Function(name)
            } else {
                TokenKind::Ident(name)
            };
            tokens.push(Token::new(kind, pos, end));
            pos = end;
            continue;
        }

        tokens.push(Token::new(TokenKind::Delim(c), pos, pos + c.len_utf8()));
        pos += c.len_utf8();
    }

    Ok(tokens)
}
