//! query parser - converts a media query string to the condition tree
//!
//! follows the media queries level 4 grammar:
//! - query lists separated by commas
//! - `not` / `only` prefixes on media types
//! - `and` / `or` / `not` conditions (no mixing of `and` and `or` at one level)
//! - boolean, plain and range feature forms
//! - anything else in parentheses is kept as general-enclosed text

use super::lexer::{tokenize, Token, TokenKind};
use super::types::{Condition, Feature, InParens, MediaType, Prefix, Query, QueryList, Value};
use crate::error::ParseError;

const RESERVED_TYPES: &[&str] = &["not", "only", "and", "or", "layer"];

/// parse a full media query list
///
/// an empty string is the single query `all`.
pub fn parse_query_list(source: &str) -> Result<QueryList, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Ok(QueryList::new(vec![Query::of_type(MediaType::All)]));
    }

    let mut queries = Vec::new();
    for segment in split_top_level(source, &tokens)? {
        let mut parser = Parser::new(source, segment);
        let query = parser.query()?;
        parser.expect_end()?;
        queries.push(query);
    }

    Ok(QueryList::new(queries))
}

/// parse a single media query (no top-level commas)
pub fn parse_query(source: &str) -> Result<Query, ParseError> {
    let list = parse_query_list(source)?;
    match <[Query; 1]>::try_from(list.queries) {
        Ok([query]) => Ok(query),
        Err(_) => Err(ParseError::new("expected a single media query", 0)),
    }
}

/// parse a media condition such as `(width > 10px) and (hover)`
pub fn parse_condition(source: &str) -> Result<Condition, ParseError> {
    let tokens = tokenize(source)?;
    check_balanced(&tokens)?;
    let mut parser = Parser::new(source, &tokens);
    let condition = parser.condition(true)?;
    parser.expect_end()?;
    Ok(condition)
}

fn check_balanced(tokens: &[Token]) -> Result<(), ParseError> {
    let mut open: Vec<usize> = Vec::new();
    for token in tokens {
        if token.is_open() {
            open.push(token.start);
        } else if token.kind == TokenKind::RParen && open.pop().is_none() {
            return Err(ParseError::new("unexpected ')'", token.start));
        }
    }
    match open.pop() {
        Some(start) => Err(ParseError::new("unclosed parenthesis", start)),
        None => Ok(()),
    }
}

fn split_top_level<'t>(source: &str, tokens: &'t [Token]) -> Result<Vec<&'t [Token]>, ParseError> {
    check_balanced(tokens)?;

    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.is_open() {
            depth += 1;
        } else if token.kind == TokenKind::RParen {
            depth = depth.saturating_sub(1);
        } else if token.kind == TokenKind::Comma && depth == 0 {
            if i == start {
                return Err(ParseError::new("empty media query", token.start));
            }
            segments.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    if start == tokens.len() {
        return Err(ParseError::new("empty media query", source.len()));
    }
    segments.push(&tokens[start..]);
    Ok(segments)
}

struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    fn peek_ident(&self) -> Option<&'a str> {
        self.peek().and_then(|t| t.ident())
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn offset(&self) -> usize {
        self.peek()
            .map(|t| t.start)
            .or_else(|| self.tokens.last().map(|t| t.end))
            .unwrap_or(self.source.len())
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.offset())
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing input"))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_ident() == Some(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn query(&mut self) -> Result<Query, ParseError> {
        let Some(first) = self.peek() else {
            return Err(self.error("expected a media query"));
        };

        match &first.kind {
            TokenKind::LParen | TokenKind::Function(_) => Ok(Query::condition(self.condition(true)?)),
            TokenKind::Ident(word) => {
                // `not (...)` is a condition, `not screen` is a prefix
                if word == "not" && self.peek_at(1).is_some_and(|t| t.is_open()) {
                    return Ok(Query::condition(self.condition(true)?));
                }

                let prefix = match word.as_str() {
                    "not" => Some(Prefix::Not),
                    "only" => Some(Prefix::Only),
                    _ => None,
                };
                if prefix.is_some() {
                    self.pos += 1;
                }

                let media_type = match self.peek_ident() {
                    Some(name) if !RESERVED_TYPES.contains(&name) => MediaType::from_ident(name),
                    Some(name) => {
                        return Err(self.error(format!("'{}' is not a valid media type", name)))
                    }
                    None => return Err(self.error("expected a media type")),
                };
                self.pos += 1;

                let mut query = Query {
                    prefix,
                    media_type,
                    condition: None,
                };

                if self.at_end() {
                    return Ok(query);
                }
                if !self.eat_keyword("and") {
                    return Err(self.error("expected 'and' after media type"));
                }
                query.condition = Some(self.condition(false)?);
                Ok(query)
            }
            _ => Err(self.error("expected a media type or condition")),
        }
    }

    fn condition(&mut self, allow_or: bool) -> Result<Condition, ParseError> {
        if self.eat_keyword("not") {
            return Ok(Condition::not(self.in_parens()?));
        }

        let mut items = vec![self.in_parens()?];
        let mut joiner: Option<&'a str> = None;

        while let Some(word) = self.peek_ident() {
            if word != "and" && word != "or" {
                break;
            }
            if word == "or" && !allow_or {
                return Err(self.error("'or' is not allowed after a media type"));
            }
            if joiner.is_some_and(|j| j != word) {
                return Err(self.error("cannot mix 'and' and 'or' without parentheses"));
            }
            joiner = Some(word);
            self.pos += 1;
            items.push(self.in_parens()?);
        }

        Ok(match joiner {
            Some("or") => Condition::Or(items),
            _ => Condition::And(items),
        })
    }

    fn in_parens(&mut self) -> Result<InParens, ParseError> {
        let Some(open) = self.peek() else {
            return Err(self.error("expected '('"));
        };
        if !open.is_open() {
            return Err(self.error("expected '('"));
        }

        let close = self.matching_paren(self.pos)?;
        let text = self.source[open.start..self.tokens[close].end].to_string();

        if let TokenKind::Function(_) = open.kind {
            self.pos = close + 1;
            return Ok(InParens::GeneralEnclosed(text));
        }

        let inner = &self.tokens[self.pos + 1..close];
        self.pos = close + 1;

        let mut nested = Parser::new(self.source, inner);
        if let Ok(condition) = nested.condition(true) {
            if nested.at_end() {
                return Ok(InParens::Condition(Box::new(condition)));
            }
        }

        match parse_feature(inner) {
            Some(feature) => Ok(InParens::Feature(feature)),
            None => Ok(InParens::GeneralEnclosed(text)),
        }
    }

    fn matching_paren(&self, open: usize) -> Result<usize, ParseError> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            if token.is_open() {
                depth += 1;
            } else if token.kind == TokenKind::RParen {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
        }
        Err(ParseError::new(
            "unclosed parenthesis",
            self.tokens[open].start,
        ))
    }
}

fn parse_feature(tokens: &[Token]) -> Option<Feature> {
    match tokens {
        [name] => Some(Feature::boolean(name.ident()?)),
        [name, colon, rest @ ..] if colon.kind == TokenKind::Colon => {
            Some(Feature::plain(name.ident()?, parse_value(rest)?))
        }
        _ => parse_range_feature(tokens),
    }
}

fn parse_range_feature(tokens: &[Token]) -> Option<Feature> {
    let ops: Vec<usize> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| matches!(t.kind, TokenKind::Op(_)))
        .map(|(i, _)| i)
        .collect();

    let op_at = |i: usize| match tokens[i].kind {
        TokenKind::Op(op) => Some(op),
        _ => None,
    };

    match ops.as_slice() {
        [i] => {
            let op = op_at(*i)?;
            let (before, after) = (&tokens[..*i], &tokens[i + 1..]);
            if let [name] = before {
                if let Some(name) = name.ident() {
                    return Some(Feature::compare(name, op, parse_value(after)?));
                }
            }
            match after {
                [name] => Some(Feature::Range {
                    name: name.ident()?.to_string(),
                    left: Some((parse_value(before)?, op)),
                    right: None,
                }),
                _ => None,
            }
        }
        [i, j] => {
            let (min_op, max_op) = (op_at(*i)?, op_at(*j)?);
            let same_direction = (min_op.is_less() && max_op.is_less())
                || (min_op.is_greater() && max_op.is_greater());
            if !same_direction {
                return None;
            }
            let name = match &tokens[i + 1..*j] {
                [name] => name.ident()?,
                _ => return None,
            };
            Some(Feature::between(
                parse_value(&tokens[..*i])?,
                min_op,
                name,
                max_op,
                parse_value(&tokens[j + 1..])?,
            ))
        }
        _ => None,
    }
}

fn parse_value(tokens: &[Token]) -> Option<Value> {
    let number = |t: &Token| match t.kind {
        TokenKind::Number { value, .. } => Some(value),
        _ => None,
    };

    match tokens {
        [single] => match &single.kind {
            TokenKind::Number { value, integer } => Some(Value::Number {
                value: *value,
                integer: *integer,
            }),
            TokenKind::Dimension { value, unit } => Some(Value::dimension(*value, unit.clone())),
            TokenKind::Ident(name) => Some(Value::ident(name.clone())),
            _ => None,
        },
        [num, slash, den] if slash.kind == TokenKind::Slash => {
            Some(Value::ratio(number(num)?, number(den)?))
        }
        _ => None,
    }
}
