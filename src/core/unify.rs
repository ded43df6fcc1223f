//! Unification of two terms under an environment.

use crate::core::cons_cell::ConsCell;
use crate::core::environment::Environment;
use crate::core::freshness::Freshness;
use crate::core::logic_variable::{IName, VarId, VarRef};
use crate::core::outcome::Outcome;
use crate::core::term::Term;
use crate::core::walker::Resolved;
use crate::error::{KrakenError, Result};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::trace;

/// Unify two closed terms, either of which may be absent.
///
/// The bindings are made in a copy of `env`. A failed attempt discards the
/// copy and reports failure against the untouched `env`.
pub fn unify(a: Option<&Term>, b: Option<&Term>, env: Environment) -> Result<Outcome> {
    let mut unifier = Unifier::new(env.clone());
    let unified = unifier.unify(a.cloned(), b.cloned())?;
    trace!(?a, ?b, unified, "unify");
    if unified {
        Ok(Outcome::success(unifier.env))
    } else {
        Ok(Outcome::failure(env))
    }
}

struct Unifier {
    env: Environment,
    pending: Vec<(Option<Term>, Option<Term>)>,
    visited_cells: HashSet<(*const ConsCell, *const ConsCell)>,
    visited_vars: HashSet<(IName, IName)>,
}

impl Unifier {
    fn new(env: Environment) -> Self {
        Unifier {
            env,
            pending: vec![],
            visited_cells: HashSet::new(),
            visited_vars: HashSet::new(),
        }
    }

    /// Depth first, in lock-step over both terms. Stops at the first mismatch.
    fn unify(&mut self, a: Option<Term>, b: Option<Term>) -> Result<bool> {
        self.pending.push((a, b));
        while let Some(pair) = self.pending.pop() {
            let unified = match pair {
                (None, None) => true,
                (Some(a), Some(b)) => self.step(a, b)?,
                _ => false,
            };
            if !unified {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn step(&mut self, a: Term, b: Term) -> Result<bool> {
        let (a, b) = self.commute(a, b);
        match (&a, &b) {
            (Term::Var(x), Term::Var(y)) => self.unify_refs(x, y),
            (Term::Var(x), _) => self.unify_ref(x, b.clone()),
            (Term::Cons(c1), Term::Cons(c2)) => {
                self.descend(c1, c2);
                Ok(true)
            }
            (Term::Cons(_), _) => Ok(false),
            _ => Ok(a == b),
        }
    }

    /// Put the side that is more resolved second, so a reference is always
    /// first when the other side is not a reference.
    fn commute(&self, a: Term, b: Term) -> (Term, Term) {
        let swap = match (&a, &b) {
            (Term::Atomic(_) | Term::Reified(_), _) => true,
            (Term::Cons(_), Term::Var(_)) => true,
            (Term::Cons(_), Term::Cons(_)) | (Term::Var(_), Term::Var(_)) => {
                !self.env.classify(&b).is_ground()
            }
            _ => false,
        };
        if swap {
            (b, a)
        } else {
            (a, b)
        }
    }

    fn descend(&mut self, c1: &Rc<ConsCell>, c2: &Rc<ConsCell>) {
        if !self.visited_cells.insert((Rc::as_ptr(c1), Rc::as_ptr(c2))) {
            return;
        }

        // an absent cdr is the end of a proper list
        let (d1, d2) = match (c1.cdr(), c2.cdr()) {
            (Some(d1), None) => (Some(d1.clone()), Some(Term::null())),
            (None, Some(d2)) => (Some(Term::null()), Some(d2.clone())),
            (d1, d2) => (d1.cloned(), d2.cloned()),
        };
        self.pending.push((d1, d2));
        self.pending.push((c1.car().cloned(), c2.car().cloned()));
    }

    fn unify_ref(&mut self, x: &VarRef, value: Term) -> Result<bool> {
        let id = target(x)?;
        match self.env.resolve(id) {
            Resolved::Fresh(end) => self.env.bind(end, value),
            Resolved::Value(bound) => self.pending.push((Some(bound), Some(value))),
        }
        Ok(true)
    }

    fn unify_refs(&mut self, x: &VarRef, y: &VarRef) -> Result<bool> {
        let (tx, ty) = (target(x)?, target(y)?);
        let (ix, iy) = (self.env.i_name(tx), self.env.i_name(ty));
        if ix == iy || !self.visited_vars.insert((ix, iy)) {
            return Ok(true);
        }

        let fx = self.env.classify(&Term::Var(x.clone()));
        let fy = self.env.classify(&Term::Var(y.clone()));
        match (fx, fy) {
            (Freshness::Fresh, Freshness::Fresh) => {
                self.env.fuse(&[ix, iy]);
            }
            (Freshness::Fresh, _) => self.bind_fresh(tx, fx, y, fy)?,
            (_, Freshness::Fresh) => self.bind_fresh(ty, fy, x, fx)?,
            _ => {
                let vx = self.env.walk(x);
                let vy = self.env.walk(y);
                self.pending.push((Some(vx), Some(vy)));
            }
        }
        Ok(true)
    }

    fn bind_fresh(&mut self, fresh: VarId, f: Freshness, other: &VarRef, g: Freshness) -> Result<()> {
        match self.env.resolve(fresh) {
            Resolved::Fresh(end) if end == fresh => {
                self.env.bind(fresh, Term::Var(other.clone()));
                Ok(())
            }
            _ => Err(KrakenError::Freshness { left: f, right: g }),
        }
    }
}

fn target(r: &VarRef) -> Result<VarId> {
    r.target()
        .ok_or_else(|| KrakenError::UndeclaredVariable(r.name().to_string()))
}
