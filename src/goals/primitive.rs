//! Leaf goals: they produce a single outcome directly.

use crate::core::environment::Environment;
use crate::core::goal::{Arg, Goal, Relation};
use crate::core::outcome::{Outcome, Outcomes};
use crate::core::stream::Stream;
use crate::core::term::Term;
use crate::core::unify::unify;
use crate::error::Result;

/// Creates a goal that always fails.
pub fn fail() -> Goal {
    Goal::from_parts(Relation::Fail, vec![])
}

/// Creates a goal that always succeeds, without binding anything.
pub fn succeed() -> Goal {
    Goal::from_parts(Relation::Succeed, vec![])
}

/// Creates a goal that succeeds if `a` and `b` unify.
pub fn equals(a: impl Into<Term>, b: impl Into<Term>) -> Goal {
    Goal::from_parts(Relation::Equals, vec![Arg::Term(a.into()), Arg::Term(b.into())])
}

pub(crate) fn solve_fail(env: Environment) -> Outcomes {
    Stream::singleton(Ok(Outcome::failure(env)))
}

pub(crate) fn solve_succeed(env: Environment) -> Outcomes {
    Stream::singleton(Ok(Outcome::success(env)))
}

pub(crate) fn solve_equals(a: &Term, b: &Term, env: Environment) -> Result<Outcomes> {
    let a = env.close(a)?;
    let b = env.close(b)?;
    let outcome = unify(Some(&a), Some(&b), env)?;
    Ok(Stream::singleton(Ok(outcome)))
}
