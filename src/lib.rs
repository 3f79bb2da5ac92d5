//! media query compiler, matcher and solver
//!
//! - [`compile_query`] turns a query list into a disjunction of simple
//!   clauses, reporting invalid and never-matching features
//! - [`matches`] evaluates a compiled result against a known device
//! - [`solve_media_query_list`] reasons about a query with partial
//!   knowledge, answering true / false / unknown

pub mod algebra;
pub mod compile;
pub mod config;
pub mod error;
pub mod features;
pub mod matcher;
pub mod query;
pub mod solver;
pub mod units;

pub use compile::{compile_ast, compile_query, compile_query_with, EvaluateResult};
pub use error::{EnvironmentError, Error, ParseError};
pub use matcher::{matches, Environment};
pub use query::{parse_condition, parse_query, parse_query_list};
pub use solver::{
    solve_media_condition, solve_media_feature, solve_media_in_parens, solve_media_query,
    solve_media_query_list, FeatureKnowledge, Kleene3, SolverConfig, UnknownSolver,
    DEFAULT_KNOWN_FEATURES,
};
pub use units::UnitConversions;
