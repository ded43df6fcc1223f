//! A miniKanren-style relational programming engine.
//!
//! Goals are built from equality, conjunction, disjunction, `conde`, fresh
//! scopes and user defined relations, and attained against an environment
//! of logic variables. Attaining a goal produces a lazy stream of outcomes.
//! [`RunStar`] drives the search and reifies the query variables of every
//! success.
//!
//! ```
//! use mini_kraken::*;
//!
//! let result = run!(*, q, conde! {
//!     equals(q.clone(), "tea");
//!     equals(q, "cup");
//! });
//! assert_eq!(result.unwrap().to_string(), "(tea cup)");
//! ```

#[macro_use]
pub mod macros;
pub mod core;
pub mod error;
pub mod goals;
pub mod prelude;
pub mod run_star;
pub mod testing;

#[cfg(test)]
mod acceptance_tests;

pub use crate::prelude::*;
