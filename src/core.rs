//! Core data structures and logic algorithms

pub mod atomic;
pub mod cons_cell;
pub mod environment;
pub mod freshness;
pub mod goal;
pub mod logic_variable;
pub mod outcome;
pub mod stream;
pub mod term;
pub mod unify;
pub mod walker;
