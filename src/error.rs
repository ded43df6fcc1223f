//! Contract violations
//!
//! Relational failure is never an error: it travels through the search as
//! a failed [`Outcome`](crate::core::outcome::Outcome). The variants below
//! are raised when a goal is built or attained in a way that breaks the
//! engine's contract, and they abort the search immediately.

use crate::core::freshness::Freshness;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KrakenError {
    #[error("relation `{relation}` expects {expected} argument(s), got {found}")]
    Arity {
        relation: String,
        expected: usize,
        found: usize,
    },
    #[error("argument {index} of `{relation}` must be {expected}, got {found}")]
    InvalidArgument {
        relation: String,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("variable name must not be empty")]
    EmptyName,
    #[error("variable `{0}` is already declared in this scope")]
    DuplicateVariable(String),
    #[error("reference to undeclared variable `{0}`")]
    UndeclaredVariable(String),
    #[error("`{0}` is not a formal argument of the relation")]
    UnknownFormal(String),
    #[error("relation `{0}` is declared but has no body")]
    UndefinedRelation(String),
    #[error("relation `{0}` already has a body")]
    AlreadyDefined(String),
    #[error("unsupported freshness combination ({left:?}, {right:?})")]
    Freshness { left: Freshness, right: Freshness },
}

pub type Result<T, E = KrakenError> = std::result::Result<T, E>;
