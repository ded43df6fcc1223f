//! User defined relations
//!
//! The body of a [`DefRelation`] is a [`GoalTemplate`]: a goal expression in
//! which the formal arguments of the relation appear as placeholders. Every
//! call instantiates the template with the actual arguments and attains the
//! resulting goal in a scope of its own.

use crate::core::cons_cell::ConsCell;
use crate::core::environment::Environment;
use crate::core::goal::{Arg, ArgKind, Goal, Relation};
use crate::core::outcome::{Outcome, Outcomes};
use crate::core::stream::Stream;
use crate::core::term::Term;
use crate::error::{KrakenError, Result};
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Formal argument of a relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormalArg {
    name: Rc<str>,
}

impl FormalArg {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(KrakenError::EmptyName);
        }
        Ok(FormalArg { name: name.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Placeholder for the formal argument called `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormalRef {
    name: Rc<str>,
}

impl FormalRef {
    pub fn new(name: &str) -> Self {
        FormalRef { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Argument of a goal template.
///
/// Inside a `Term`, a variable reference named like a formal argument is a
/// placeholder as well, unless a `fresh` template in between declares the
/// same name.
#[derive(Clone, Debug)]
pub enum TemplateArg {
    Formal(FormalRef),
    Term(Term),
    Template(GoalTemplate),
    Clause(Vec<GoalTemplate>),
}

impl TemplateArg {
    pub fn kind(&self) -> ArgKind {
        match self {
            TemplateArg::Formal(_) | TemplateArg::Term(_) => ArgKind::Term,
            TemplateArg::Template(_) => ArgKind::Goal,
            TemplateArg::Clause(_) => ArgKind::Clause,
        }
    }
}

type Bindings = HashMap<Rc<str>, Term>;

/// A relation applied to template arguments.
#[derive(Clone, Debug)]
pub struct GoalTemplate {
    relation: Relation,
    args: Vec<TemplateArg>,
}

impl GoalTemplate {
    pub fn new(relation: Relation, args: Vec<TemplateArg>) -> Result<Self> {
        let kinds: Vec<ArgKind> = args.iter().map(TemplateArg::kind).collect();
        relation.check(&kinds)?;
        Ok(GoalTemplate { relation, args })
    }

    /// Template with the same shape as `goal`.
    pub fn from_goal(goal: &Goal) -> Self {
        let args = goal
            .actuals()
            .iter()
            .map(|arg| match arg {
                Arg::Term(t) => TemplateArg::Term(t.clone()),
                Arg::Goal(g) => TemplateArg::Template(GoalTemplate::from_goal(g)),
                Arg::Clause(goals) => {
                    TemplateArg::Clause(goals.iter().map(GoalTemplate::from_goal).collect())
                }
            })
            .collect();
        GoalTemplate {
            relation: goal.relation().clone(),
            args,
        }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Replace the placeholders of `formals` by `actuals`.
    pub fn instantiate(&self, formals: &[FormalArg], actuals: &[Term]) -> Result<Goal> {
        if formals.len() != actuals.len() {
            return Err(KrakenError::Arity {
                relation: self.relation.name().to_string(),
                expected: formals.len(),
                found: actuals.len(),
            });
        }
        let bindings: Bindings = formals
            .iter()
            .map(|f| f.name.clone())
            .zip(actuals.iter().cloned())
            .collect();
        self.instantiate_with(&bindings)
    }

    fn instantiate_with(&self, bindings: &Bindings) -> Result<Goal> {
        let shadowed;
        let bindings = match &self.relation {
            Relation::Fresh(names) if names.iter().any(|n| bindings.contains_key(n)) => {
                shadowed = bindings
                    .iter()
                    .filter(|(k, _)| !names.contains(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Bindings>();
                &shadowed
            }
            _ => bindings,
        };

        let args = self
            .args
            .iter()
            .map(|arg| {
                Ok(match arg {
                    TemplateArg::Formal(f) => match bindings.get(&f.name) {
                        Some(actual) => Arg::Term(actual.clone()),
                        None => return Err(KrakenError::UnknownFormal(f.name.to_string())),
                    },
                    TemplateArg::Term(t) => Arg::Term(substitute(t, bindings)),
                    TemplateArg::Template(t) => Arg::Goal(t.instantiate_with(bindings)?),
                    TemplateArg::Clause(ts) => Arg::Clause(
                        ts.iter()
                            .map(|t| t.instantiate_with(bindings))
                            .collect::<Result<_>>()?,
                    ),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Goal::from_parts(self.relation.clone(), args))
    }

    /// Names of the explicit formal placeholders in this template.
    fn formal_refs<'a>(&'a self, refs: &mut HashSet<&'a str>) {
        for arg in &self.args {
            match arg {
                TemplateArg::Formal(f) => {
                    refs.insert(f.name());
                }
                TemplateArg::Term(_) => {}
                TemplateArg::Template(t) => t.formal_refs(refs),
                TemplateArg::Clause(ts) => ts.iter().for_each(|t| t.formal_refs(refs)),
            }
        }
    }
}

impl From<Goal> for GoalTemplate {
    fn from(goal: Goal) -> Self {
        GoalTemplate::from_goal(&goal)
    }
}

/// Rebuild `term` with every unresolved reference named in `bindings`
/// replaced by its actual value.
fn substitute(term: &Term, bindings: &Bindings) -> Term {
    match term {
        Term::Var(r) if r.target().is_none() => match bindings.get(r.shared_name()) {
            Some(actual) => actual.clone(),
            None => term.clone(),
        },
        Term::Cons(cell) if !cell.is_null() => {
            let car = cell.car().map(|t| substitute(t, bindings));
            let cdr = cell.cdr().map(|t| substitute(t, bindings));
            ConsCell::from_parts(car, cdr).into()
        }
        _ => term.clone(),
    }
}

/// A named relation defined by a goal template over formal arguments.
pub struct DefRelation {
    name: Rc<str>,
    formals: Vec<FormalArg>,
    body: OnceCell<GoalTemplate>,
}

impl DefRelation {
    /// Define a relation whose body does not refer to the relation itself.
    pub fn new(name: &str, formals: &[&str], body: Goal) -> Result<Rc<Self>> {
        let rel = DefRelation::declare(name, formals)?;
        rel.define(body)?;
        Ok(rel)
    }

    /// Define a relation whose body may call the relation being defined.
    pub fn recursive(
        name: &str,
        formals: &[&str],
        build: impl FnOnce(&Rc<DefRelation>) -> Goal,
    ) -> Result<Rc<Self>> {
        let rel = DefRelation::declare(name, formals)?;
        let body = build(&rel);
        rel.define(body)?;
        Ok(rel)
    }

    /// Declare a relation without a body yet. See [`DefRelation::define`].
    pub fn declare(name: &str, formals: &[&str]) -> Result<Rc<Self>> {
        if name.is_empty() {
            return Err(KrakenError::EmptyName);
        }
        let mut seen = HashSet::new();
        for formal in formals {
            if !seen.insert(*formal) {
                return Err(KrakenError::DuplicateVariable(formal.to_string()));
            }
        }
        let formals = formals
            .iter()
            .map(|f| FormalArg::new(f))
            .collect::<Result<_>>()?;
        Ok(Rc::new(DefRelation {
            name: name.into(),
            formals,
            body: OnceCell::new(),
        }))
    }

    /// Give a declared relation its body.
    pub fn define(&self, body: impl Into<GoalTemplate>) -> Result<()> {
        let body = body.into();
        let mut refs = HashSet::new();
        body.formal_refs(&mut refs);
        if let Some(unknown) = refs
            .into_iter()
            .find(|r| !self.formals.iter().any(|f| f.name() == *r))
        {
            return Err(KrakenError::UnknownFormal(unknown.to_string()));
        }
        self.body
            .set(body)
            .map_err(|_| KrakenError::AlreadyDefined(self.name.to_string()))
    }

    /// Relation known to be well formed by construction, like the ones of
    /// the list library and those generated by `defrel!`.
    pub fn builtin(
        name: &str,
        formals: &[&str],
        build: impl FnOnce(&Rc<DefRelation>) -> Goal,
    ) -> Rc<Self> {
        let rel = Rc::new(DefRelation {
            name: name.into(),
            formals: formals
                .iter()
                .map(|f| FormalArg { name: (*f).into() })
                .collect(),
            body: OnceCell::new(),
        });
        let body = build(&rel);
        let defined = rel.body.set(body.into()).is_ok();
        assert!(defined, "relation `{name}` was defined while building its body");
        rel
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn formals(&self) -> &[FormalArg] {
        &self.formals
    }

    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }

    /// Goal that applies this relation to `actuals`.
    pub fn call<T: Into<Term>>(self: &Rc<Self>, actuals: impl IntoIterator<Item = T>) -> Result<Goal> {
        let actuals = actuals.into_iter().map(|t| Arg::Term(t.into())).collect();
        Goal::new(Relation::Def(self.clone()), actuals)
    }

    /// Like [`DefRelation::call`], but a wrong number of actuals is only
    /// reported when the goal is attained.
    pub fn goal(self: &Rc<Self>, actuals: Vec<Term>) -> Goal {
        let actuals = actuals.into_iter().map(Arg::Term).collect();
        Goal::from_parts(Relation::Def(self.clone()), actuals)
    }
}

impl Debug for DefRelation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let formals: Vec<&str> = self.formals.iter().map(FormalArg::name).collect();
        write!(f, "(defrel ({} {}))", self.name, formals.join(" "))
    }
}

pub(crate) fn solve_def(rel: &Rc<DefRelation>, actuals: &[Arg], env: Environment) -> Result<Outcomes> {
    let body = rel
        .body
        .get()
        .ok_or_else(|| KrakenError::UndefinedRelation(rel.name.to_string()))?;

    let actuals = actuals
        .iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Arg::Term(t) => env.close(t),
            other => Err(KrakenError::InvalidArgument {
                relation: rel.name.to_string(),
                index,
                expected: ArgKind::Term.describe(),
                found: other.kind().describe(),
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    let goal = body.instantiate(&rel.formals, &actuals)?;

    let mut env = env;
    env.enter_scope();
    Ok(Stream::suspension(move || match goal.attain(env) {
        Ok(outcomes) => outcomes.map(|outcome| outcome.map(Outcome::leave_scope)),
        Err(e) => Stream::singleton(Err(e)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn placeholders_are_replaced_inside_lists() {
        let template = GoalTemplate::from_goal(&equals(
            Term::list(vec![Term::var("a"), Term::symbol("b"), Term::var("c")]),
            Term::var("q"),
        ));
        let formals = vec![FormalArg::new("a").unwrap(), FormalArg::new("c").unwrap()];
        let goal = template
            .instantiate(&formals, &[Term::integer(1), Term::integer(3)])
            .unwrap();
        assert_eq!(format!("{:?}", goal), "(== (1 b 3) q)");
    }

    #[test]
    fn explicit_formal_placeholders_are_replaced() {
        let template = GoalTemplate::new(
            Relation::Equals,
            vec![
                TemplateArg::Formal(FormalRef::new("t")),
                TemplateArg::Term(Term::symbol("tea")),
            ],
        )
        .unwrap();
        let goal = template
            .instantiate(&[FormalArg::new("t").unwrap()], &[Term::symbol("cup")])
            .unwrap();
        assert_eq!(format!("{:?}", goal), "(== cup tea)");
    }

    #[test]
    fn unknown_formal_placeholders_are_rejected() {
        let template = GoalTemplate::new(
            Relation::Equals,
            vec![
                TemplateArg::Formal(FormalRef::new("u")),
                TemplateArg::Term(Term::symbol("tea")),
            ],
        )
        .unwrap();
        let rel = DefRelation::declare("teacupo", &["t"]).unwrap();
        assert_eq!(rel.define(template), Err(KrakenError::UnknownFormal("u".into())));
    }

    #[test]
    fn template_arguments_are_checked() {
        let err = GoalTemplate::new(Relation::Disj2, vec![TemplateArg::Term(Term::null())]);
        assert!(matches!(err, Err(KrakenError::Arity { .. })));
    }

    #[test]
    fn fresh_names_shadow_formals() {
        let body = fresh(&["x"], equals(Term::var("x"), Term::symbol("inner")));
        let template = GoalTemplate::from_goal(&body);
        let goal = template
            .instantiate(&[FormalArg::new("x").unwrap()], &[Term::symbol("outer")])
            .unwrap();
        assert_eq!(format!("{:?}", goal), "(fresh (x) (== x inner))");
    }

    #[test]
    fn relations_check_arity_when_called() {
        let rel = DefRelation::new("teacupo", &["t"], succeed()).unwrap();
        assert_eq!(
            rel.call(vec!["tea", "cup"]).unwrap_err(),
            KrakenError::Arity {
                relation: "teacupo".into(),
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn formals_must_be_distinct() {
        assert_eq!(
            DefRelation::declare("r", &["a", "a"]).unwrap_err(),
            KrakenError::DuplicateVariable("a".into())
        );
    }

    #[test]
    fn declared_relations_need_a_body() {
        let rel = DefRelation::declare("later", &["x"]).unwrap();
        let goal = rel.call(vec!["pea"]).unwrap();
        assert_eq!(
            goal.attain(Environment::new()).err(),
            Some(KrakenError::UndefinedRelation("later".into()))
        );
        rel.define(succeed()).unwrap();
        assert!(rel.is_defined());
        assert_eq!(
            rel.define(fail()),
            Err(KrakenError::AlreadyDefined("later".into()))
        );
    }

    #[test]
    fn builtin_relations_are_defined_at_once() {
        let rel = DefRelation::builtin("loopo", &["x"], |this| this.goal(vec![Term::var("x")]));
        assert!(rel.is_defined());
        assert_eq!(
            rel.define(succeed()),
            Err(KrakenError::AlreadyDefined("loopo".into()))
        );
    }

    #[test]
    #[should_panic(expected = "relation `twice` was defined while building its body")]
    fn builtin_body_cannot_be_defined_twice() {
        DefRelation::builtin("twice", &["x"], |this| {
            this.define(succeed()).unwrap();
            fail()
        });
    }
}
