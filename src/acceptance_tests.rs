use crate::testing::{fails, has_unique_solution, succeeds};
use crate::*;

defrel! {
    teacupo(t) {
        disj2(equals("tea", t.clone()), equals("cup", t))
    }
}

#[test]
fn running_goal_that_fails_produces_empty_list() {
    let result = run!(*, q, fail()).unwrap();
    assert!(result.is_null());
}

#[test]
fn running_equality_goal_associates_value_to_fresh_variable() {
    has_unique_solution(run!(q, equals(q, 1)).unwrap(), Term::from(1));
}

#[test]
fn fresh_variables_keep_their_identity_in_the_answer() {
    let result = run!(*, q, fresh!((x, y), equals(list![x.clone(), y, x], q))).unwrap();
    assert_eq!(result.to_string(), "((_0 _1 _0))");

    let result = run!(*, q, fresh!((x, y), equals(list![x, y], q))).unwrap();
    assert_eq!(result.to_string(), "((_0 _1))");
}

#[test]
fn fused_fresh_variables_reify_alike() {
    let result = run!(*, q, fresh!((x, y), equals(x.clone(), y.clone()), equals(list![x, y], q)))
        .unwrap();
    assert_eq!(result.to_string(), "((_0 _0))");
}

#[test]
fn fresh_variable_inside_a_ground_list() {
    let result = run!(*, q, fresh!((x), equals(q, list!["olive", x, "oil"]))).unwrap();
    assert_eq!(result.to_string(), "((olive _0 oil))");
}

#[test]
fn teacupo_has_two_values() {
    assert_eq!(run!(*, x, teacupo(x)).unwrap().to_string(), "(tea cup)");
    succeeds(teacupo("cup"));
    fails(teacupo("coffee"));
}

#[test]
fn teacupo_or_false() {
    let result = run!(*, (x, y), disj2(
        conj2(teacupo(x.clone()), equals(true, y.clone())),
        conj2(equals(false, x), equals(true, y))
    ))
    .unwrap();
    assert_eq!(result.to_string(), "((tea true) (cup true) (false true))");
}

#[test]
fn every_pair_of_teacups() {
    let result = run!(*, (x, y), teacupo(x), teacupo(y)).unwrap();
    assert_eq!(
        result.to_string(),
        "((tea tea) (tea cup) (cup tea) (cup cup))"
    );
}

#[test]
fn same_teacup_twice_leaves_the_other_variable_fresh() {
    let result = run!(*, (x, y), teacupo(x.clone()), teacupo(x)).unwrap();
    assert_eq!(result.to_string(), "((tea _0) (cup _0))");
}

#[test]
fn conde_over_teacups() {
    let result = run!(*, (x, y), conde! {
        teacupo(x.clone()), teacupo(x.clone());
        equals(false, x), teacupo(y);
    })
    .unwrap();
    assert_eq!(
        result.to_string(),
        "((tea _0) (cup _0) (false tea) (false cup))"
    );
}

#[test]
fn conde_clause_binding_only_a_local_variable() {
    let result = run!(*, (x, y), conde! {
        fresh!((z), equals("lentil", z));
        equals(x, y);
    })
    .unwrap();
    assert_eq!(result.to_string(), "((_0 _1) (_0 _0))");
}

#[test]
fn membero_counts_every_occurrence() {
    let result = run!(*, q, membero("tofu", list!["a", "tofu", "b", "tofu"])).unwrap();
    assert_eq!(result.to_string(), "(_0 _0)");
}

#[test]
fn first_solutions_of_an_infinite_relation() {
    let result = run!(3, q, membero("tofu", q)).unwrap();
    assert_eq!(
        result.to_string(),
        "((tofu . _0) (_0 tofu . _1) (_0 _1 tofu . _2))"
    );
}

#[test]
fn self_referencing_binding_reifies_with_a_placeholder() {
    let result = run!(*, q, equals(q.clone(), list!["a" ; q])).unwrap();
    assert_eq!(result.to_string(), "((a . _0))");
}

#[test]
fn strings_integers_and_booleans_are_distinct_from_symbols() {
    fails(equals(Term::string("pea"), Term::symbol("pea")));
    fails(equals(1, true));
    succeeds(equals(Term::string("pea"), Term::string("pea")));
}

#[test]
fn undeclared_variables_abort_the_run() {
    let result = run!(*, q, equals(Term::var("r"), q));
    assert_eq!(result, Err(KrakenError::UndeclaredVariable("r".into())));
}

#[test]
fn membero_walks_a_long_list() {
    let items = Term::list((0..100).map(Term::integer).collect::<Vec<_>>());
    let result = run!(*, q, membero(q, items.clone())).unwrap();
    assert_eq!(result, items);
}

#[test]
fn appendo_splits_a_long_list() {
    defrel! {
        appendo(l, t, out) {
            conde! {
                nullo(l.clone()), equals(t.clone(), out.clone());
                fresh!((a, d, res),
                    conso(a.clone(), d.clone(), l),
                    conso(a, res.clone(), out),
                    appendo(d, t, res));
            }
        }
    }

    let items = Term::list((0..60).map(Term::integer).collect::<Vec<_>>());
    let splits = run!((x, y), appendo(x, y, items.clone()))
        .unwrap()
        .collect::<Result<Vec<_>>>()
        .unwrap();
    assert_eq!(splits.len(), 61);
    assert_eq!(splits[0], list![list![], items]);
}

#[test]
fn locals_of_finished_relation_calls_can_still_be_bound() {
    let result = run!(*, q, cdro(q.clone(), list!["pea"]), caro(q, "pod")).unwrap();
    assert_eq!(result.to_string(), "((pod pea))");
}
