use crate::core::environment::Environment;
use crate::core::stream::Stream;
use crate::error::Result;

/// Tag of an outcome. Relational failure is a value, not an error.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Resultant {
    Success,
    Failure,
}

/// Result of attempting a goal, together with the bindings it produced.
///
/// The environment of a failed outcome is the one the goal was attempted
/// against; nothing a failed attempt bound is retained.
#[derive(Clone, Debug)]
pub struct Outcome {
    resultant: Resultant,
    env: Environment,
}

/// Lazy sequence of outcomes produced by attaining a goal.
pub type Outcomes = Stream<Result<Outcome>>;

impl Outcome {
    pub fn success(env: Environment) -> Self {
        Outcome {
            resultant: Resultant::Success,
            env,
        }
    }

    pub fn failure(env: Environment) -> Self {
        Outcome {
            resultant: Resultant::Failure,
            env,
        }
    }

    pub fn resultant(&self) -> Resultant {
        self.resultant
    }

    pub fn is_success(&self) -> bool {
        self.resultant == Resultant::Success
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Close the scope the outcome was produced in.
    pub(crate) fn leave_scope(mut self) -> Self {
        self.env.leave_scope();
        self
    }
}
