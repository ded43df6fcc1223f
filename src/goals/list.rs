//! Relations over lists

use crate::core::goal::Goal;
use crate::core::term::Term;
use crate::goals::combinators::{conde, conj};
use crate::goals::fresh::fresh;
use crate::goals::primitive::equals;
use crate::goals::template::DefRelation;
use std::rc::Rc;

thread_local! {
    static CONSO: Rc<DefRelation> = DefRelation::builtin("conso", &["a", "d", "p"], |_| {
        equals(Term::cons(Term::var("a"), Term::var("d")), Term::var("p"))
    });

    static CARO: Rc<DefRelation> = DefRelation::builtin("caro", &["p", "a"], |_| {
        fresh(&["d"], conso(Term::var("a"), Term::var("d"), Term::var("p")))
    });

    static CDRO: Rc<DefRelation> = DefRelation::builtin("cdro", &["p", "d"], |_| {
        fresh(&["a"], conso(Term::var("a"), Term::var("d"), Term::var("p")))
    });

    static NULLO: Rc<DefRelation> = DefRelation::builtin("nullo", &["l"], |_| {
        equals(Term::var("l"), Term::null())
    });

    static PAIRO: Rc<DefRelation> = DefRelation::builtin("pairo", &["p"], |_| {
        fresh(&["a", "d"], conso(Term::var("a"), Term::var("d"), Term::var("p")))
    });

    static MEMBERO: Rc<DefRelation> = DefRelation::builtin("membero", &["x", "l"], |membero| {
        conde(vec![
            vec![caro(Term::var("l"), Term::var("x"))],
            vec![fresh(
                &["d"],
                conj(vec![
                    cdro(Term::var("l"), Term::var("d")),
                    membero.goal(vec![Term::var("x"), Term::var("d")]),
                ]),
            )],
        ])
    });
}

/// Creates a goal that succeeds if `p` is the pair `(a . d)`.
pub fn conso(a: impl Into<Term>, d: impl Into<Term>, p: impl Into<Term>) -> Goal {
    CONSO.with(|rel| rel.goal(vec![a.into(), d.into(), p.into()]))
}

/// Creates a goal that succeeds if `a` is the first element of `p`.
pub fn caro(p: impl Into<Term>, a: impl Into<Term>) -> Goal {
    CARO.with(|rel| rel.goal(vec![p.into(), a.into()]))
}

/// Creates a goal that succeeds if `d` is `p` without its first element.
pub fn cdro(p: impl Into<Term>, d: impl Into<Term>) -> Goal {
    CDRO.with(|rel| rel.goal(vec![p.into(), d.into()]))
}

/// Creates a goal that succeeds if `l` is the empty list.
pub fn nullo(l: impl Into<Term>) -> Goal {
    NULLO.with(|rel| rel.goal(vec![l.into()]))
}

/// Creates a goal that succeeds if `p` is a pair.
pub fn pairo(p: impl Into<Term>) -> Goal {
    PAIRO.with(|rel| rel.goal(vec![p.into()]))
}

/// Creates a goal that succeeds if `x` is an element of the list `l`.
pub fn membero(x: impl Into<Term>, l: impl Into<Term>) -> Goal {
    MEMBERO.with(|rel| rel.goal(vec![x.into(), l.into()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::*;

    #[test]
    fn conso_builds_pairs() {
        let result = run!(*, q, conso(1, list![2, 3], q)).unwrap();
        assert_eq!(result.to_string(), "((1 2 3))");
    }

    #[test]
    fn conso_takes_pairs_apart() {
        let result = run!(*, q, conso(q, list![2], list![1, 2])).unwrap();
        assert_eq!(result, list![1]);
        let result = run!(*, q, conso(1, q, list![1, 2])).unwrap();
        assert_eq!(result, list![list![2]]);
    }

    #[test]
    fn caro_finds_first_element() {
        let result = run!(*, q, caro(list!["a", "c", "o", "r", "n"], q)).unwrap();
        assert_eq!(result.to_string(), "(a)");
    }

    #[test]
    fn cdro_finds_the_rest() {
        let result = run!(*, q, cdro(list!["a", "c", "o", "r", "n"], q)).unwrap();
        assert_eq!(result.to_string(), "((c o r n))");
    }

    #[test]
    fn cdro_of_a_single_element_list_is_empty() {
        let result = run!(*, q, cdro(list!["a"], q)).unwrap();
        assert_eq!(result.to_string(), "(())");
    }

    #[test]
    fn caro_fails_on_empty_list() {
        let result = run!(*, q, caro(list![], q)).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn nullo_only_accepts_empty_list() {
        assert_eq!(run!(*, q, nullo(list![])).unwrap().to_string(), "(_0)");
        assert!(run!(*, q, nullo(list!["grape"])).unwrap().is_null());
        assert_eq!(run!(*, q, nullo(q)).unwrap().to_string(), "(())");
    }

    #[test]
    fn pairo_accepts_any_pair() {
        assert_eq!(run!(*, q, pairo(Term::cons(q.clone(), q))).unwrap().to_string(), "(_0)");
        assert!(run!(*, q, pairo(list![])).unwrap().is_null());
        assert_eq!(run!(*, q, pairo(q)).unwrap().to_string(), "((_0 . _1))");
    }

    #[test]
    fn membero_does_not_succeed_if_value_not_in_list() {
        let result = run!(*, q, membero(0, list![1, 2, 3])).unwrap();
        assert!(result.is_null());
    }

    #[test]
    fn membero_does_succeed_if_value_first_in_list() {
        let result = run!(*, q, membero(1, list![1, 2, 3])).unwrap();
        assert_eq!(result, list![Term::rv(0)]);
    }

    #[test]
    fn membero_does_succeed_if_value_in_list() {
        let result = run!(*, q, membero(3, list![1, 2, 3])).unwrap();
        assert_eq!(result, list![Term::rv(0)]);
    }

    #[test]
    fn membero_succeeds_for_all_possible_members() {
        let result = run!(*, q, membero(q, list![1, 2, 3])).unwrap();
        assert_eq!(result, list![1, 2, 3]);
    }

    #[test]
    fn membero_succeeds_for_all_possible_lists() {
        let mut result = run!(q, membero(42, q)).unwrap();
        assert_eq!(result.next().unwrap().unwrap(), list![42 ; Term::rv(0)]);
        assert_eq!(
            result.next().unwrap().unwrap(),
            list![Term::rv(0), 42 ; Term::rv(1)]
        );
        assert_eq!(
            result.next().unwrap().unwrap(),
            list![Term::rv(0), Term::rv(1), 42 ; Term::rv(2)]
        );
    }
}
