//! Search driver: run a goal and collect reified solutions.

use crate::core::environment::Environment;
use crate::core::goal::Goal;
use crate::core::logic_variable::{VarId, VarRef};
use crate::core::outcome::Outcome;
use crate::core::stream::StreamIter;
use crate::core::term::Term;
use crate::error::{KrakenError, Result};
use crate::goals::combinators::conj;
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};

/// A query: the names of the query variables and the goal to satisfy.
#[derive(Clone, Debug)]
pub struct RunStar {
    names: Vec<Rc<str>>,
    goal: Goal,
}

impl RunStar {
    pub fn new(names: &[&str], goal: Goal) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in names {
            if name.is_empty() {
                return Err(KrakenError::EmptyName);
            }
            if !seen.insert(*name) {
                return Err(KrakenError::DuplicateVariable(name.to_string()));
            }
        }
        Ok(RunStar {
            names: names.iter().map(|n| Rc::from(*n)).collect(),
            goal,
        })
    }

    /// Query whose goal is the conjunction of `goals`.
    pub fn with_goals(names: &[&str], goals: impl IntoIterator<Item = Goal>) -> Result<Self> {
        RunStar::new(names, conj(goals))
    }

    /// Lazily produce the solutions, one per success of the goal.
    pub fn solutions(&self) -> Result<Solutions> {
        let mut env = Environment::new();
        let vars = self
            .names
            .iter()
            .map(|name| Ok((name.clone(), env.declare(name)?)))
            .collect::<Result<Vec<_>>>()?;
        debug!(query = ?self.names, goal = ?self.goal, "run");
        let outcomes = self.goal.attain(env)?;
        Ok(Solutions {
            vars,
            outcomes: Some(outcomes.into_iter()),
        })
    }

    /// List of all solutions. Does not return if there are infinitely many.
    pub fn run(&self) -> Result<Term> {
        let solutions = self.solutions()?.collect::<Result<Vec<_>>>()?;
        debug!(query = ?self.names, count = solutions.len(), "exhausted");
        Ok(Term::list(solutions))
    }

    /// List of at most `n` solutions.
    pub fn run_n(&self, n: usize) -> Result<Term> {
        let solutions = self.solutions()?.take(n).collect::<Result<Vec<_>>>()?;
        debug!(query = ?self.names, count = solutions.len(), limit = n, "done");
        Ok(Term::list(solutions))
    }
}

/// `run*`: all solutions of `goal` for the query variables `names`.
///
/// With a single query variable every solution is the value of that
/// variable, otherwise it is the list of the values of all variables.
pub fn run_star(names: &[&str], goal: Goal) -> Result<Term> {
    RunStar::new(names, goal)?.run()
}

/// Iterator over the reified solutions of a query.
pub struct Solutions {
    vars: Vec<(Rc<str>, VarId)>,
    outcomes: Option<StreamIter<Result<Outcome>>>,
}

impl Solutions {
    fn reify(&self, outcome: Outcome) -> Term {
        let mut env = outcome.into_env();
        env.propagate_all();
        env.clear_rankings();
        let mut values: Vec<Term> = self
            .vars
            .iter()
            .map(|(name, id)| env.quote(&Term::Var(VarRef::closed(name.clone(), *id))))
            .collect();
        match values.len() {
            1 => values.remove(0),
            _ => Term::list(values),
        }
    }
}

impl Iterator for Solutions {
    type Item = Result<Term>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let outcome = match self.outcomes.as_mut()?.next()? {
                Ok(outcome) => outcome,
                Err(e) => {
                    self.outcomes = None;
                    return Some(Err(e));
                }
            };
            if outcome.is_success() {
                let solution = self.reify(outcome);
                trace!(%solution, "solution");
                return Some(Ok(solution));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn unequal_atoms_have_no_solution() {
        let result = run_star(&["q"], equals("pea", "pod")).unwrap();
        assert_eq!(result.to_string(), "()");
    }

    #[test]
    fn query_variable_gets_bound_in_both_directions() {
        assert_eq!(run_star(&["q"], equals(Term::var("q"), "pea")).unwrap().to_string(), "(pea)");
        assert_eq!(run_star(&["q"], equals("pea", Term::var("q"))).unwrap().to_string(), "(pea)");
    }

    #[test]
    fn unconstrained_variable_reifies_to_rank_zero() {
        assert_eq!(run_star(&["q"], succeed()).unwrap(), list![Term::rv(0)]);
    }

    #[test]
    fn several_query_variables_give_lists() {
        let goal = conde(vec![
            vec![equals("split", Term::var("x")), equals("pea", Term::var("y"))],
            vec![equals("red", Term::var("x")), equals("bean", Term::var("y"))],
        ]);
        let result = run_star(&["x", "y"], goal).unwrap();
        assert_eq!(result.to_string(), "((split pea) (red bean))");
    }

    #[test]
    fn ranks_restart_for_every_solution() {
        let goal = disj2(succeed(), equals(Term::var("x"), "pea"));
        let result = run_star(&["x", "y"], goal).unwrap();
        assert_eq!(result.to_string(), "((_0 _1) (pea _0))");
    }

    #[test]
    fn running_twice_gives_the_same_solutions() {
        let query = RunStar::new(
            &["q"],
            fresh(&["x"], equals(Term::list(vec![Term::var("x")]), Term::var("q"))),
        )
        .unwrap();
        let first = query.run().unwrap();
        let second = query.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "((_0))");
    }

    #[test]
    fn run_n_limits_the_number_of_solutions() {
        let query = RunStar::new(
            &["q"],
            disj(vec![
                equals(Term::var("q"), 1),
                equals(Term::var("q"), 2),
                equals(Term::var("q"), 3),
            ]),
        )
        .unwrap();
        assert_eq!(query.run_n(2).unwrap(), list![1, 2]);
        assert_eq!(query.run_n(0).unwrap(), list![]);
    }

    #[test]
    fn with_goals_conjoins_the_goals() {
        let query = RunStar::with_goals(
            &["q"],
            vec![equals(Term::var("q"), "pea"), equals(Term::var("q"), "pea")],
        )
        .unwrap();
        assert_eq!(query.run().unwrap(), list!["pea"]);
    }

    #[test]
    fn query_names_are_validated() {
        assert_eq!(
            RunStar::new(&["q", "q"], succeed()).unwrap_err(),
            KrakenError::DuplicateVariable("q".into())
        );
        assert_eq!(RunStar::new(&[""], succeed()).unwrap_err(), KrakenError::EmptyName);
    }

    #[test]
    fn contract_violations_abort_the_search() {
        let goal = disj2(equals(Term::var("q"), 1), equals(Term::var("nope"), 2));
        assert_eq!(
            run_star(&["q"], goal),
            Err(KrakenError::UndeclaredVariable("nope".into()))
        );
    }
}
