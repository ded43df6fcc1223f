pub use crate::{
    core::{
        atomic::AtomicTerm,
        cons_cell::ConsCell,
        environment::Environment,
        freshness::Freshness,
        goal::{Arg, Arity, Goal, Relation},
        logic_variable::{ReifiedVar, VarRef},
        outcome::{Outcome, Outcomes, Resultant},
        stream::Stream,
        term::Term,
    },
    error::{KrakenError, Result},
    goals::{
        combinators::*,
        fresh::fresh,
        list::*,
        primitive::*,
        template::{DefRelation, FormalArg, FormalRef, GoalTemplate, TemplateArg},
    },
    run_star::{run_star, RunStar, Solutions},
};
