use crate::core::term::Term;
use std::fmt::{Display, Formatter, Result};

/// Composite term: an ordered pair whose members may be absent.
///
/// The cell with both members absent is the empty list. A cell whose cdr
/// would be the empty list stores an absent cdr instead, so `(a)` and
/// `(a . ())` have a single representation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConsCell {
    car: Option<Term>,
    cdr: Option<Term>,
}

impl ConsCell {
    pub fn null() -> Self {
        ConsCell {
            car: None,
            cdr: None,
        }
    }

    pub fn new(car: Term, cdr: Term) -> Self {
        let cdr = if cdr.is_null() { None } else { Some(cdr) };
        ConsCell {
            car: Some(car),
            cdr,
        }
    }

    pub(crate) fn from_parts(car: Option<Term>, cdr: Option<Term>) -> Self {
        match cdr {
            Some(d) if d.is_null() => ConsCell { car, cdr: None },
            cdr => ConsCell { car, cdr },
        }
    }

    pub fn car(&self) -> Option<&Term> {
        self.car.as_ref()
    }

    pub fn cdr(&self) -> Option<&Term> {
        self.cdr.as_ref()
    }

    pub fn is_null(&self) -> bool {
        self.car.is_none() && self.cdr.is_none()
    }

    /// Children that are present, car first.
    pub fn children(&self) -> impl Iterator<Item = &Term> {
        self.car.iter().chain(self.cdr.iter())
    }
}

impl Display for ConsCell {
    fn fmt(&self, f: &mut Formatter) -> Result {
        if !f.alternate() {
            write!(f, "(")?;
        }

        match &self.car {
            Some(car) => write!(f, "{}", car)?,
            None if self.cdr.is_none() => {}
            None => write!(f, "()")?,
        }

        match &self.cdr {
            None => {}
            Some(Term::Cons(next)) if !next.is_null() => write!(f, " {:#}", next)?,
            Some(tail) => write!(f, " . {}", tail)?,
        }

        if !f.alternate() {
            write!(f, ")")?;
        }

        Ok(())
    }
}
