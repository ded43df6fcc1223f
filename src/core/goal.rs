use crate::core::environment::Environment;
use crate::core::outcome::Outcomes;
use crate::core::term::Term;
use crate::error::{KrakenError, Result};
use crate::goals::template::DefRelation;
use crate::goals::{combinators, fresh, primitive, template};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Number of arguments a relation takes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Arity {
    Fixed(usize),
    Any,
}

/// What an argument of a goal (or goal template) is.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ArgKind {
    Term,
    Goal,
    Clause,
}

impl ArgKind {
    pub fn describe(self) -> &'static str {
        match self {
            ArgKind::Term => "a term",
            ArgKind::Goal => "a goal",
            ArgKind::Clause => "a list of goals",
        }
    }
}

/// Actual argument of a goal.
#[derive(Clone, Debug)]
pub enum Arg {
    Term(Term),
    Goal(Goal),
    /// Goals that hold together, as in one line of `conde`.
    Clause(Vec<Goal>),
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Term(_) => ArgKind::Term,
            Arg::Goal(_) => ArgKind::Goal,
            Arg::Clause(_) => ArgKind::Clause,
        }
    }
}

impl From<Term> for Arg {
    fn from(t: Term) -> Self {
        Arg::Term(t)
    }
}

impl From<Goal> for Arg {
    fn from(g: Goal) -> Self {
        Arg::Goal(g)
    }
}

impl From<Vec<Goal>> for Arg {
    fn from(goals: Vec<Goal>) -> Self {
        Arg::Clause(goals)
    }
}

/// Stateless description of a relation.
#[derive(Clone)]
pub enum Relation {
    Fail,
    Succeed,
    Equals,
    Conj2,
    Disj2,
    Conde,
    /// Opens a scope that declares the given names around its only argument.
    Fresh(Rc<[Rc<str>]>),
    Def(Rc<DefRelation>),
}

impl Relation {
    pub fn name(&self) -> &str {
        match self {
            Relation::Fail => "fail",
            Relation::Succeed => "succeed",
            Relation::Equals => "equals",
            Relation::Conj2 => "conj2",
            Relation::Disj2 => "disj2",
            Relation::Conde => "conde",
            Relation::Fresh(_) => "fresh",
            Relation::Def(rel) => rel.name(),
        }
    }

    pub fn alt_name(&self) -> Option<&'static str> {
        match self {
            Relation::Fail => Some("#u"),
            Relation::Succeed => Some("#s"),
            Relation::Equals => Some("=="),
            _ => None,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Relation::Fail | Relation::Succeed => Arity::Fixed(0),
            Relation::Equals | Relation::Conj2 | Relation::Disj2 => Arity::Fixed(2),
            Relation::Conde => Arity::Any,
            Relation::Fresh(_) => Arity::Fixed(1),
            Relation::Def(rel) => Arity::Fixed(rel.formals().len()),
        }
    }

    fn accepts(&self, kind: ArgKind) -> bool {
        match self {
            Relation::Fail | Relation::Succeed => false,
            Relation::Equals | Relation::Def(_) => kind == ArgKind::Term,
            Relation::Conj2 | Relation::Disj2 | Relation::Fresh(_) => kind == ArgKind::Goal,
            Relation::Conde => kind != ArgKind::Term,
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            Relation::Conde => "a goal or a list of goals",
            Relation::Equals | Relation::Def(_) => ArgKind::Term.describe(),
            _ => ArgKind::Goal.describe(),
        }
    }

    /// Check the number and the kinds of the arguments for this relation.
    pub fn check(&self, kinds: &[ArgKind]) -> Result<()> {
        if let Arity::Fixed(n) = self.arity() {
            if kinds.len() != n {
                return Err(KrakenError::Arity {
                    relation: self.name().to_string(),
                    expected: n,
                    found: kinds.len(),
                });
            }
        }
        match kinds.iter().position(|k| !self.accepts(*k)) {
            None => Ok(()),
            Some(index) => Err(KrakenError::InvalidArgument {
                relation: self.name().to_string(),
                index,
                expected: self.expected(),
                found: kinds[index].describe(),
            }),
        }
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        use Relation::*;
        match (self, other) {
            (Fail, Fail) | (Succeed, Succeed) | (Equals, Equals) => true,
            (Conj2, Conj2) | (Disj2, Disj2) | (Conde, Conde) => true,
            (Fresh(a), Fresh(b)) => a == b,
            (Def(a), Def(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Debug for Relation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A relation applied to actual arguments.
#[derive(Clone)]
pub struct Goal {
    relation: Relation,
    actuals: Rc<[Arg]>,
}

impl Goal {
    /// Apply `relation` to `actuals`, checking arity and argument kinds.
    pub fn new(relation: Relation, actuals: Vec<Arg>) -> Result<Self> {
        let kinds: Vec<ArgKind> = actuals.iter().map(Arg::kind).collect();
        relation.check(&kinds)?;
        Ok(Goal::from_parts(relation, actuals))
    }

    /// For callers that build the arguments of the right kind by construction.
    pub(crate) fn from_parts(relation: Relation, actuals: Vec<Arg>) -> Self {
        Goal {
            relation,
            actuals: actuals.into(),
        }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn actuals(&self) -> &[Arg] {
        &self.actuals
    }

    pub fn is_fail(&self) -> bool {
        self.relation == Relation::Fail
    }

    /// Attempt the goal against `env`, producing a lazy stream of outcomes.
    pub fn attain(&self, env: Environment) -> Result<Outcomes> {
        match &self.relation {
            Relation::Fail => Ok(primitive::solve_fail(env)),
            Relation::Succeed => Ok(primitive::solve_succeed(env)),
            Relation::Equals => primitive::solve_equals(self.term(0)?, self.term(1)?, env),
            Relation::Conj2 => combinators::solve_conj2(self.goal(0)?, self.goal(1)?, env),
            Relation::Disj2 => combinators::solve_disj2(self.goal(0)?, self.goal(1)?, env),
            Relation::Conde => combinators::solve_conde(self.clauses()?, env),
            Relation::Fresh(names) => fresh::solve_fresh(names, self.goal(0)?, env),
            Relation::Def(rel) => template::solve_def(rel, &self.actuals, env),
        }
    }

    fn term(&self, index: usize) -> Result<&Term> {
        match &self.actuals[index] {
            Arg::Term(t) => Ok(t),
            other => Err(self.invalid(index, ArgKind::Term, other)),
        }
    }

    fn goal(&self, index: usize) -> Result<&Goal> {
        match &self.actuals[index] {
            Arg::Goal(g) => Ok(g),
            other => Err(self.invalid(index, ArgKind::Goal, other)),
        }
    }

    /// Arguments of a `conde`, each turned into one goal.
    fn clauses(&self) -> Result<Vec<Goal>> {
        self.actuals
            .iter()
            .enumerate()
            .map(|(index, arg)| match arg {
                Arg::Goal(g) => Ok(g.clone()),
                Arg::Clause(goals) => Ok(combinators::conj(goals.iter().cloned())),
                Arg::Term(_) => Err(KrakenError::InvalidArgument {
                    relation: self.relation.name().to_string(),
                    index,
                    expected: self.relation.expected(),
                    found: arg.kind().describe(),
                }),
            })
            .collect()
    }

    fn invalid(&self, index: usize, expected: ArgKind, found: &Arg) -> KrakenError {
        KrakenError::InvalidArgument {
            relation: self.relation.name().to_string(),
            index,
            expected: expected.describe(),
            found: found.kind().describe(),
        }
    }
}

impl Debug for Goal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "({}", self.relation.alt_name().unwrap_or(self.relation.name()))?;
        if let Relation::Fresh(names) = &self.relation {
            write!(f, " ({})", names.join(" "))?;
        }
        for arg in self.actuals.iter() {
            match arg {
                Arg::Term(t) => write!(f, " {}", t)?,
                Arg::Goal(g) => write!(f, " {:?}", g)?,
                Arg::Clause(goals) => {
                    write!(f, " [")?;
                    for (i, g) in goals.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{:?}", g)?;
                    }
                    write!(f, "]")?;
                }
            }
        }
        write!(f, ")")
    }
}
