//! media query condition trees
//!
//! provides the tree shared by the compiler and the solver:
//! - query lists, OR'd together
//! - media types with `not` / `only` prefixes
//! - `and` / `or` / `not` conditions
//! - boolean, plain and range features
//!
//! plus a parser turning query strings into that tree.

mod lexer;
mod parser;
mod types;

pub use parser::{parse_condition, parse_query, parse_query_list};
pub use types::{
    Condition, Feature, InParens, MediaType, Prefix, Query, QueryList, RangeOp, Value,
};
