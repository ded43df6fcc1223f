//! Walking association chains: resolution, freshness and reification.

use crate::core::cons_cell::ConsCell;
use crate::core::environment::Environment;
use crate::core::freshness::Freshness;
use crate::core::logic_variable::{IName, VarId, VarRef};
use crate::core::term::Term;
use std::collections::HashSet;

/// Where the bindings of a variable lead.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// The chain ends in this variable, which has no value.
    Fresh(VarId),
    /// First value on the chain that is not a variable.
    Value(Term),
}

impl Environment {
    /// Follow the bindings of `var` until a value that is not a variable
    /// is found. An atomic value is preferred over a composite one and any
    /// value is preferred over walking further.
    pub fn resolve(&self, var: VarId) -> Resolved {
        let mut current = var;
        let mut visitees = HashSet::new();
        loop {
            let i_name = self.i_name(current);
            visitees.insert(i_name);
            let values = self.associations_of(i_name);

            let value = values
                .iter()
                .find(|v| matches!(v, Term::Atomic(_)))
                .or_else(|| values.iter().find(|v| v.as_var().is_none()));
            if let Some(value) = value {
                return Resolved::Value((*value).clone());
            }

            let next = values
                .iter()
                .filter_map(|v| v.as_var().and_then(VarRef::target))
                .find(|id| !visitees.contains(&self.i_name(*id)));
            match next {
                Some(id) => current = id,
                None => return Resolved::Fresh(current),
            }
        }
    }

    /// The ground value reachable from `var`, if there is one.
    pub fn resolve_ground(&self, var: VarId) -> Option<Term> {
        match self.resolve(var) {
            Resolved::Value(v) if self.classify(&v).is_ground() => Some(v),
            _ => None,
        }
    }

    /// The term that stands for `var` once its bindings are followed:
    /// either its value or the fresh variable at the end of the chain.
    pub(crate) fn walk(&self, r: &VarRef) -> Term {
        match r.target().map(|id| (id, self.resolve(id))) {
            Some((_, Resolved::Value(v))) => v,
            Some((id, Resolved::Fresh(end))) if id == end => Term::Var(r.clone()),
            Some((_, Resolved::Fresh(end))) => {
                let name = self.variable(end).name();
                Term::Var(VarRef::closed(name.into(), end))
            }
            None => Term::Var(r.clone()),
        }
    }

    /// Freshness of a closed term.
    pub fn classify(&self, term: &Term) -> Freshness {
        self.classify_guarded(term, &mut HashSet::new())
    }

    fn classify_guarded(&self, term: &Term, visiting: &mut HashSet<IName>) -> Freshness {
        match term {
            Term::Atomic(_) | Term::Reified(_) => Freshness::Ground,
            Term::Cons(cell) => {
                let children: Vec<Freshness> = cell
                    .children()
                    .map(|child| self.classify_guarded(child, visiting))
                    .collect();
                Freshness::combine(children)
            }
            Term::Var(r) => {
                let id = match r.target() {
                    Some(id) => id,
                    None => return Freshness::Fresh,
                };
                let i_name = self.i_name(id);
                match self.resolve(id) {
                    Resolved::Fresh(end) if self.i_name(end) == i_name => Freshness::Fresh,
                    Resolved::Fresh(_) => Freshness::Bound,
                    Resolved::Value(value) => {
                        if !visiting.insert(i_name) {
                            return Freshness::Bound;
                        }
                        let freshness = self.classify_guarded(&value, visiting);
                        visiting.remove(&i_name);
                        match freshness {
                            Freshness::Ground => Freshness::Ground,
                            _ => Freshness::Bound,
                        }
                    }
                }
            }
        }
    }

    /// Reified form of a closed term: ground parts as they are and every
    /// fresh variable replaced by a placeholder named after its rank.
    ///
    /// A variable met again while its own value is being reified is
    /// replaced by its placeholder, so cyclic bindings terminate.
    pub fn quote(&mut self, term: &Term) -> Term {
        self.quote_guarded(term, &mut vec![])
    }

    fn quote_guarded(&mut self, term: &Term, path: &mut Vec<IName>) -> Term {
        match term {
            Term::Atomic(_) | Term::Reified(_) => term.clone(),
            Term::Cons(cell) if cell.is_null() => term.clone(),
            Term::Cons(cell) => {
                let car = cell.car().map(|t| self.quote_guarded(t, path));
                let cdr = cell.cdr().map(|t| self.quote_guarded(t, path));
                ConsCell::from_parts(car, cdr).into()
            }
            Term::Var(r) => {
                let id = match r.target() {
                    Some(id) => id,
                    None => return term.clone(),
                };
                match self.resolve(id) {
                    Resolved::Fresh(end) => {
                        let i_name = self.i_name(end);
                        Term::rv(self.rank(i_name))
                    }
                    Resolved::Value(value) => {
                        let i_name = self.i_name(id);
                        if path.contains(&i_name) {
                            return Term::rv(self.rank(i_name));
                        }
                        path.push(i_name);
                        let quoted = self.quote_guarded(&value, path);
                        path.pop();
                        quoted
                    }
                }
            }
        }
    }
}
