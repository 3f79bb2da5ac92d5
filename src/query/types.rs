//! core types for the media query condition tree

use std::fmt;

/// comparison operators allowed in range context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOp {
    /// <
    Lt,
    /// <=
    Le,
    /// >
    Gt,
    /// >=
    Ge,
    /// =
    Eq,
}

impl RangeOp {
    /// parse operator from its source form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<" => Some(RangeOp::Lt),
            "<=" => Some(RangeOp::Le),
            ">" => Some(RangeOp::Gt),
            ">=" => Some(RangeOp::Ge),
            "=" => Some(RangeOp::Eq),
            _ => None,
        }
    }

    /// mirror the operator so `value op name` reads as `name op' value`
    pub fn flip(self) -> Self {
        match self {
            RangeOp::Lt => RangeOp::Gt,
            RangeOp::Le => RangeOp::Ge,
            RangeOp::Gt => RangeOp::Lt,
            RangeOp::Ge => RangeOp::Le,
            RangeOp::Eq => RangeOp::Eq,
        }
    }

    pub fn is_less(self) -> bool {
        matches!(self, RangeOp::Lt | RangeOp::Le)
    }

    pub fn is_greater(self) -> bool {
        matches!(self, RangeOp::Gt | RangeOp::Ge)
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::Lt => write!(f, "<"),
            RangeOp::Le => write!(f, "<="),
            RangeOp::Gt => write!(f, ">"),
            RangeOp::Ge => write!(f, ">="),
            RangeOp::Eq => write!(f, "="),
        }
    }
}

/// a raw feature value as written in the query
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// plain number, `integer` is false when written with a fraction or exponent
    Number { value: f64, integer: bool },
    /// number with a unit, e.g. `120px` or `2dppx`
    Dimension { value: f64, unit: String },
    /// `numerator / denominator`
    Ratio { numerator: f64, denominator: f64 },
    /// identifier, lowercased
    Ident(String),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Number {
            value,
            integer: value.fract() == 0.0,
        }
    }

    pub fn dimension(value: f64, unit: impl Into<String>) -> Self {
        Value::Dimension {
            value,
            unit: unit.into(),
        }
    }

    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        Value::Ratio {
            numerator,
            denominator,
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Value::Ident(name.into())
    }

    /// try to get as identifier
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Value::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number {
                value,
                integer: true,
            } => Some(*value as i64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number { value, .. } => write!(f, "{}", value),
            Value::Dimension { value, unit } => write!(f, "{}{}", value, unit),
            Value::Ratio {
                numerator,
                denominator,
            } => write!(f, "{}/{}", numerator, denominator),
            Value::Ident(s) => write!(f, "{}", s),
        }
    }
}

/// a single media feature test
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    /// `(name)`
    Boolean { name: String },
    /// `(name: value)`, `name` may carry a `min-`/`max-` prefix
    Plain { name: String, value: Value },
    /// `(name op value)`, `(value op name)` or `(value op name op value)`
    ///
    /// `left` holds `value op` written before the name, `right` holds
    /// `op value` written after it. at least one side is present.
    Range {
        name: String,
        left: Option<(Value, RangeOp)>,
        right: Option<(RangeOp, Value)>,
    },
}

impl Feature {
    pub fn boolean(name: impl Into<String>) -> Self {
        Feature::Boolean { name: name.into() }
    }

    pub fn plain(name: impl Into<String>, value: Value) -> Self {
        Feature::Plain {
            name: name.into(),
            value,
        }
    }

    /// `(name op value)`
    pub fn compare(name: impl Into<String>, op: RangeOp, value: Value) -> Self {
        Feature::Range {
            name: name.into(),
            left: None,
            right: Some((op, value)),
        }
    }

    /// `(min min_op name max_op max)`
    pub fn between(
        min: Value,
        min_op: RangeOp,
        name: impl Into<String>,
        max_op: RangeOp,
        max: Value,
    ) -> Self {
        Feature::Range {
            name: name.into(),
            left: Some((min, min_op)),
            right: Some((max_op, max)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Feature::Boolean { name } | Feature::Plain { name, .. } | Feature::Range { name, .. } => {
                name
            }
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Boolean { name } => write!(f, "({})", name),
            Feature::Plain { name, value } => write!(f, "({}: {})", name, value),
            Feature::Range { name, left, right } => {
                write!(f, "(")?;
                if let Some((value, op)) = left {
                    write!(f, "{} {} ", value, op)?;
                }
                write!(f, "{}", name)?;
                if let Some((op, value)) = right {
                    write!(f, " {} {}", op, value)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// something that may appear in parentheses inside a condition
#[derive(Debug, Clone, PartialEq)]
pub enum InParens {
    /// a nested condition
    Condition(Box<Condition>),
    /// a media feature
    Feature(Feature),
    /// syntactically valid but unrecognised content, kept verbatim
    GeneralEnclosed(String),
}

impl From<Feature> for InParens {
    fn from(feature: Feature) -> Self {
        InParens::Feature(feature)
    }
}

impl From<Condition> for InParens {
    fn from(condition: Condition) -> Self {
        InParens::Condition(Box::new(condition))
    }
}

impl fmt::Display for InParens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InParens::Condition(c) => write!(f, "({})", c),
            InParens::Feature(feature) => write!(f, "{}", feature),
            InParens::GeneralEnclosed(text) => write!(f, "{}", text),
        }
    }
}

/// a media condition - a single in-parens is an `And` of one
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    And(Vec<InParens>),
    Or(Vec<InParens>),
    Not(Box<InParens>),
}

impl Condition {
    /// a condition made of one parenthesised item
    pub fn single(item: impl Into<InParens>) -> Self {
        Condition::And(vec![item.into()])
    }

    pub fn and(items: Vec<InParens>) -> Self {
        Condition::And(items)
    }

    pub fn or(items: Vec<InParens>) -> Self {
        Condition::Or(items)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(item: impl Into<InParens>) -> Self {
        Condition::Not(Box::new(item.into()))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[InParens], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::And(items) => write_joined(f, items, "and"),
            Condition::Or(items) => write_joined(f, items, "or"),
            Condition::Not(inner) => write!(f, "not {}", inner),
        }
    }
}

/// `not` / `only` in front of a media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    Not,
    Only,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    All,
    Screen,
    Print,
    /// deprecated or unknown types (`tv`, `handheld`, ...) which match nothing
    Other(String),
}

impl MediaType {
    /// map a lowercased identifier to a media type
    pub fn from_ident(ident: &str) -> Self {
        match ident {
            "all" => MediaType::All,
            "screen" => MediaType::Screen,
            "print" => MediaType::Print,
            other => MediaType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::All => write!(f, "all"),
            MediaType::Screen => write!(f, "screen"),
            MediaType::Print => write!(f, "print"),
            MediaType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// one comma-separated entry of a media query list
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub prefix: Option<Prefix>,
    pub media_type: MediaType,
    pub condition: Option<Condition>,
}

impl Query {
    /// a bare media type, e.g. `print`
    pub fn of_type(media_type: MediaType) -> Self {
        Self {
            prefix: None,
            media_type,
            condition: None,
        }
    }

    /// a query made only of a condition, e.g. `(min-width: 100px)`
    pub fn condition(condition: Condition) -> Self {
        Self {
            prefix: None,
            media_type: MediaType::All,
            condition: Some(condition),
        }
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare_condition = self.prefix.is_none() && self.media_type == MediaType::All;
        match (&self.condition, bare_condition) {
            (Some(condition), true) => write!(f, "{}", condition),
            (condition, _) => {
                match self.prefix {
                    Some(Prefix::Not) => write!(f, "not ")?,
                    Some(Prefix::Only) => write!(f, "only ")?,
                    None => {}
                }
                write!(f, "{}", self.media_type)?;
                if let Some(condition) = condition {
                    write!(f, " and {}", condition)?;
                }
                Ok(())
            }
        }
    }
}

/// a comma-separated media query list, OR'd together
#[derive(Debug, Clone, PartialEq)]
pub struct QueryList {
    pub queries: Vec<Query>,
}

impl QueryList {
    pub fn new(queries: Vec<Query>) -> Self {
        Self { queries }
    }

    /// wrap a single condition as a one-query list
    pub fn from_condition(condition: Condition) -> Self {
        Self::new(vec![Query::condition(condition)])
    }
}

impl fmt::Display for QueryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, query) in self.queries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", query)?;
        }
        Ok(())
    }
}
