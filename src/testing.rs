//! Assertions for testing relations

use crate::core::goal::Goal;
use crate::core::term::Term;
use crate::error::Result;

/// Assert that a goal fails
pub fn fails(goal: Goal) {
    let result = run!(1, q, goal).unwrap();
    assert!(result.is_null(), "expected no solution, got {}", result);
}

/// Assert that a goal succeeds at least once
pub fn succeeds(goal: Goal) {
    let result = run!(1, q, goal).unwrap();
    assert!(!result.is_null(), "expected a solution");
}

/// Assert that `solutions` holds exactly one solution, equal to `expected`.
pub fn has_unique_solution(mut solutions: impl Iterator<Item = Result<Term>>, expected: Term) {
    assert_eq!(solutions.next(), Some(Ok(expected)));
    assert_eq!(solutions.next(), None);
}
