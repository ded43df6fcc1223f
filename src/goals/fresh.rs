//! Nested scopes for local logic variables

use crate::core::environment::Environment;
use crate::core::goal::{Goal, Relation};
use crate::core::outcome::{Outcome, Outcomes};
use crate::error::Result;
use std::rc::Rc;

/// Creates a goal that declares `names` in a new scope around `body`.
///
/// The names are checked when the goal is attained: an empty name or a
/// name given twice is an error.
pub fn fresh(names: &[&str], body: Goal) -> Goal {
    let names: Rc<[Rc<str>]> = names.iter().map(|n| Rc::from(*n)).collect();
    Goal::from_parts(Relation::Fresh(names), vec![body.into()])
}

pub(crate) fn solve_fresh(names: &[Rc<str>], body: &Goal, mut env: Environment) -> Result<Outcomes> {
    env.enter_scope();
    for name in names {
        env.declare(name)?;
    }
    Ok(body
        .attain(env)?
        .map(|outcome| outcome.map(Outcome::leave_scope)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::term::Term;
    use crate::error::KrakenError;
    use crate::goals::primitive::{equals, succeed};

    #[test]
    fn outcomes_come_back_to_the_enclosing_scope() {
        let env = Environment::new();
        let root = env.current_scope();
        let outcomes: Vec<_> = fresh(&["x"], succeed())
            .attain(env)
            .unwrap()
            .into_iter()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].env().current_scope(), root);
    }

    #[test]
    fn local_names_are_only_visible_inside() {
        let mut env = Environment::new();
        env.declare("q").unwrap();
        let goal = fresh(&["x"], equals(Term::var("x"), Term::var("q")));
        let outcome = goal.attain(env).unwrap().into_iter().next().unwrap().unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.env().lookup("x"), None);
        assert!(outcome.env().lookup("q").is_some());
    }

    #[test]
    fn duplicate_names_are_reported_on_attain() {
        let goal = fresh(&["x", "x"], succeed());
        assert_eq!(
            goal.attain(Environment::new()).err(),
            Some(KrakenError::DuplicateVariable("x".into()))
        );
        let goal = fresh(&[""], succeed());
        assert_eq!(goal.attain(Environment::new()).err(), Some(KrakenError::EmptyName));
    }
}
