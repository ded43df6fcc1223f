//! Compose goals using combinators to build more complex goals
//!

use crate::core::environment::Environment;
use crate::core::goal::{Arg, Goal, Relation};
use crate::core::outcome::{Outcome, Outcomes};
use crate::core::stream::Stream;
use crate::error::Result;
use crate::goals::primitive::{fail, succeed};
use std::rc::Rc;
use tracing::trace;

/// Creates a goal that succeeds if both of its subgoals succeed.
/// The second goal sees the bindings of the first.
pub fn conj2(g1: Goal, g2: Goal) -> Goal {
    Goal::from_parts(Relation::Conj2, vec![g1.into(), g2.into()])
}

/// Creates a goal that succeeds if either of its subgoals succeeds.
pub fn disj2(g1: Goal, g2: Goal) -> Goal {
    Goal::from_parts(Relation::Disj2, vec![g1.into(), g2.into()])
}

/// Conjunction of any number of goals: `conj2(a, conj2(b, c))`.
pub fn conj(goals: impl IntoIterator<Item = Goal>) -> Goal {
    let goals: Vec<Goal> = goals.into_iter().collect();
    let mut goals = goals.into_iter().rev();
    match goals.next() {
        None => succeed(),
        Some(last) => goals.fold(last, |acc, g| conj2(g, acc)),
    }
}

/// Disjunction of any number of goals: `disj2(a, disj2(b, c))`.
pub fn disj(goals: impl IntoIterator<Item = Goal>) -> Goal {
    let goals: Vec<Goal> = goals.into_iter().collect();
    let mut goals = goals.into_iter().rev();
    match goals.next() {
        None => fail(),
        Some(last) => goals.fold(last, |acc, g| disj2(g, acc)),
    }
}

/// Creates a goal that succeeds for every clause that succeeds, in order.
/// A clause succeeds if all of its goals succeed.
pub fn conde(clauses: impl IntoIterator<Item = Vec<Goal>>) -> Goal {
    let clauses = clauses.into_iter().map(Arg::Clause).collect();
    Goal::from_parts(Relation::Conde, clauses)
}

pub(crate) fn solve_conj2(g1: &Goal, g2: &Goal, env: Environment) -> Result<Outcomes> {
    if g1.is_fail() || g2.is_fail() {
        return Ok(Stream::singleton(Ok(Outcome::failure(env))));
    }
    Ok(conjoin(g1.attain(env)?, g2.clone()))
}

/// Drive `g2` once per success of the first stream, against its bindings.
fn conjoin(s1: Outcomes, g2: Goal) -> Outcomes {
    match s1 {
        Stream::Empty => Stream::Empty,
        Stream::Suspension(sup) => Stream::suspension(move || conjoin(sup(), g2)),
        Stream::Pair(Err(e), _) => Stream::singleton(Err(e)),
        Stream::Pair(Ok(o1), rest) if o1.is_success() => match g2.attain(o1.into_env()) {
            Ok(s2) => s2.append(move || conjoin(*rest, g2)),
            Err(e) => Stream::singleton(Err(e)),
        },
        Stream::Pair(Ok(o1), rest) => {
            Stream::cons(Ok(o1), Stream::suspension(move || conjoin(*rest, g2)))
        }
    }
}

pub(crate) fn solve_disj2(g1: &Goal, g2: &Goal, env: Environment) -> Result<Outcomes> {
    if g1.is_fail() && g2.is_fail() {
        return Ok(Stream::singleton(Ok(Outcome::failure(env))));
    }
    Alternatives::new(vec![g1.clone(), g2.clone()], env).next_clause()
}

pub(crate) fn solve_conde(clauses: Vec<Goal>, env: Environment) -> Result<Outcomes> {
    Alternatives::new(clauses, env).next_clause()
}

/// Goals tried one after the other against the same bindings.
///
/// Every success of every clause is forwarded and failures are dropped.
/// A single failure is produced at the end only if no clause succeeded.
struct Alternatives {
    clauses: Rc<[Goal]>,
    next: usize,
    env: Environment,
    succeeded: bool,
}

impl Alternatives {
    fn new(clauses: Vec<Goal>, env: Environment) -> Self {
        Alternatives {
            clauses: clauses.into(),
            next: 0,
            env,
            succeeded: false,
        }
    }

    fn next_clause(mut self) -> Result<Outcomes> {
        let clause = match self.clauses.get(self.next) {
            Some(clause) => clause.clone(),
            None if self.succeeded => return Ok(Stream::Empty),
            None => return Ok(Stream::singleton(Ok(Outcome::failure(self.env)))),
        };
        trace!(clause = self.next, goal = ?clause, "trying clause");
        self.next += 1;
        let outcomes = clause.attain(self.env.clone())?;
        Ok(self.drain(outcomes))
    }

    fn drain(self, outcomes: Outcomes) -> Outcomes {
        match outcomes {
            Stream::Empty => Stream::suspension(move || match self.next_clause() {
                Ok(outcomes) => outcomes,
                Err(e) => Stream::singleton(Err(e)),
            }),
            Stream::Suspension(sup) => Stream::suspension(move || self.drain(sup())),
            Stream::Pair(Err(e), _) => Stream::singleton(Err(e)),
            Stream::Pair(Ok(o), rest) if o.is_success() => {
                let this = Alternatives {
                    succeeded: true,
                    ..self
                };
                Stream::cons(Ok(o), Stream::suspension(move || this.drain(*rest)))
            }
            Stream::Pair(Ok(_), rest) => Stream::suspension(move || self.drain(*rest)),
        }
    }
}
