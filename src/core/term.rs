use crate::core::atomic::AtomicTerm;
use crate::core::cons_cell::ConsCell;
use crate::core::environment::Environment;
use crate::core::freshness::Freshness;
use crate::core::logic_variable::{ReifiedVar, VarRef};
use crate::error::Result;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// Anything that can appear as an argument of `equals` or inside a list.
#[derive(Clone, PartialEq, Eq)]
pub enum Term {
    Atomic(AtomicTerm),
    Cons(Rc<ConsCell>),
    Var(VarRef),
    /// Placeholder for a variable that is still fresh in a solution.
    Reified(ReifiedVar),
}

impl Term {
    pub fn symbol(s: &str) -> Self {
        Term::Atomic(AtomicTerm::Symbol(s.into()))
    }

    pub fn string(s: &str) -> Self {
        Term::Atomic(AtomicTerm::String(s.into()))
    }

    pub fn integer(i: i64) -> Self {
        Term::Atomic(AtomicTerm::Integer(i))
    }

    pub fn boolean(b: bool) -> Self {
        Term::Atomic(AtomicTerm::Boolean(b))
    }

    /// Reference to the variable called `name` in the enclosing scopes.
    pub fn var(name: &str) -> Self {
        Term::Var(VarRef::new(name))
    }

    /// Reified variable of rank `n`.
    pub fn rv(n: usize) -> Self {
        Term::Reified(ReifiedVar(n))
    }

    /// The empty list.
    pub fn null() -> Self {
        Term::Cons(Rc::new(ConsCell::null()))
    }

    pub fn cons(car: impl Into<Term>, cdr: impl Into<Term>) -> Self {
        Term::Cons(Rc::new(ConsCell::new(car.into(), cdr.into())))
    }

    /// Proper list of the given items.
    pub fn list<T: Into<Term>>(items: impl IntoIterator<Item = T>) -> Self {
        Term::improper_list(items, Term::null())
    }

    /// List of the given items that ends in `tail` instead of the empty list.
    pub fn improper_list<T: Into<Term>>(items: impl IntoIterator<Item = T>, tail: Term) -> Self {
        let items: Vec<Term> = items.into_iter().map(Into::into).collect();
        items
            .into_iter()
            .rev()
            .fold(tail, |cdr, car| Term::cons(car, cdr))
    }

    pub fn is_null(&self) -> bool {
        match self {
            Term::Cons(cell) => cell.is_null(),
            _ => false,
        }
    }

    pub fn as_cons(&self) -> Option<&ConsCell> {
        match self {
            Term::Cons(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&VarRef> {
        match self {
            Term::Var(r) => Some(r),
            _ => None,
        }
    }

    /// Collect the items of a proper list, or `None` for anything else.
    pub fn to_vec(&self) -> Option<Vec<Term>> {
        let mut items = vec![];
        let mut cell = self.as_cons()?;
        while let Some(car) = cell.car() {
            items.push(car.clone());
            match cell.cdr() {
                None => break,
                Some(cdr) => cell = cdr.as_cons()?,
            }
        }
        Some(items)
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Term::Atomic(a) => a.kind(),
            Term::Cons(_) => "composite",
            Term::Var(_) => "variable reference",
            Term::Reified(_) => "reified variable",
        }
    }

    /// Classify the term against the bindings of `env`.
    pub fn freshness(&self, env: &Environment) -> Result<Freshness> {
        Ok(env.classify(&env.close(self)?))
    }

    pub fn is_ground(&self, env: &Environment) -> Result<bool> {
        Ok(self.freshness(env)?.is_ground())
    }

    /// Fully resolved, cycle free rendition of the term in `env`.
    /// Variables that are still fresh become ranked placeholders.
    pub fn quote(&self, env: &mut Environment) -> Result<Term> {
        let closed = env.close(self)?;
        Ok(env.quote(&closed))
    }
}

impl From<AtomicTerm> for Term {
    fn from(a: AtomicTerm) -> Self {
        Term::Atomic(a)
    }
}

impl From<ConsCell> for Term {
    fn from(cell: ConsCell) -> Self {
        Term::Cons(Rc::new(cell))
    }
}

impl From<VarRef> for Term {
    fn from(r: VarRef) -> Self {
        Term::Var(r)
    }
}

impl From<ReifiedVar> for Term {
    fn from(rv: ReifiedVar) -> Self {
        Term::Reified(rv)
    }
}

/// Bare strings become symbols.
impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::symbol(s)
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::integer(i)
    }
}

impl From<i32> for Term {
    fn from(i: i32) -> Self {
        Term::integer(i64::from(i))
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::boolean(b)
    }
}

impl From<&Term> for Term {
    fn from(t: &Term) -> Self {
        t.clone()
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Term::Atomic(a) => write!(f, "{}", a),
            Term::Cons(cell) => write!(f, "{}", cell),
            Term::Var(r) => write!(f, "{:?}", r),
            Term::Reified(rv) => write!(f, "{}", rv),
        }
    }
}

impl Debug for Term {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialEq<&str> for Term {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Term::Atomic(AtomicTerm::Symbol(s)) if &**s == *other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_builds_nested_cons_cells() {
        let l = Term::list(vec!["a", "b"]);
        assert_eq!(l, Term::cons("a", Term::cons("b", Term::null())));
        assert_eq!(l.to_string(), "(a b)");
    }

    #[test]
    fn empty_list_is_null() {
        assert!(Term::list(Vec::<Term>::new()).is_null());
        assert!(!Term::symbol("nil").is_null());
    }

    #[test]
    fn improper_list_ends_in_tail() {
        let l = Term::improper_list(vec![1, 2], Term::integer(3));
        assert_eq!(l.to_string(), "(1 2 . 3)");
    }

    #[test]
    fn to_vec_only_accepts_proper_lists() {
        let l = Term::list(vec![1, 2, 3]);
        assert_eq!(l.to_vec(), Some(vec![1.into(), 2.into(), 3.into()]));
        assert_eq!(Term::null().to_vec(), Some(vec![]));
        assert_eq!(Term::cons(1, 2).to_vec(), None);
        assert_eq!(Term::integer(1).to_vec(), None);
    }

    #[test]
    fn canonical_text_form() {
        let t = Term::list(vec![
            Term::rv(0),
            Term::boolean(true),
            Term::list(vec![Term::symbol("a")]),
            Term::null(),
        ]);
        assert_eq!(t.to_string(), "(_0 true (a) ())");
    }

    #[test]
    fn symbols_compare_with_str() {
        assert_eq!(Term::symbol("pea"), "pea");
        assert_ne!(Term::string("pea"), "pea");
    }
}
