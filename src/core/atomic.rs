use std::fmt::{Display, Formatter, Result};
use std::rc::Rc;

/// Immutable primitive value. Atomic terms are always ground.
///
/// Two atomic terms are equal only if they have the same kind and value,
/// so the symbol `a` differs from the string `"a"`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AtomicTerm {
    Symbol(Rc<str>),
    String(Rc<str>),
    Integer(i64),
    Boolean(bool),
}

impl AtomicTerm {
    pub fn kind(&self) -> &'static str {
        match self {
            AtomicTerm::Symbol(_) => "symbol",
            AtomicTerm::String(_) => "string",
            AtomicTerm::Integer(_) => "integer",
            AtomicTerm::Boolean(_) => "boolean",
        }
    }
}

impl Display for AtomicTerm {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            AtomicTerm::Symbol(s) | AtomicTerm::String(s) => write!(f, "{}", s),
            AtomicTerm::Integer(i) => write!(f, "{}", i),
            AtomicTerm::Boolean(b) => write!(f, "{}", b),
        }
    }
}
