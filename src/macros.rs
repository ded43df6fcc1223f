//! Macros for embedding mini_kraken as DSL in Rust

/// Build a list term.
///
/// `list![a, b, c]` is the proper list `(a b c)`, `list![a, b ; t]` is the
/// improper list `(a b . t)` and `list![]` is the empty list.
#[macro_export]
macro_rules! list {
    () => { $crate::prelude::Term::null() };

    ($single:expr) => {
        $crate::prelude::Term::cons($single, $crate::prelude::Term::null())
    };

    ($car:expr ; $cdr:expr) => {
        $crate::prelude::Term::cons($car, $cdr)
    };

    (($($first:tt)*), $($rest:tt)*) => {
        $crate::prelude::Term::cons($crate::list![$($first)*], $crate::list![$($rest)*])
    };

    ($first:expr, $($rest:tt)*) => {
        $crate::prelude::Term::cons($first, $crate::list![$($rest)*])
    };
}

/// Creates a goal that succeeds if any of its subgoals succeeds
#[macro_export]
macro_rules! disj {
    () => { $crate::prelude::fail() };
    ($g:expr) => { $g };
    ($g0:expr; $($g:expr);*) => { $crate::prelude::disj2($g0, $crate::disj!($($g);*))}
}

/// Creates a goal that succeeds if all of its subgoals succeed
#[macro_export]
macro_rules! conj {
    () => { $crate::prelude::succeed() };
    ($g:expr) => { $g };
    ($g0:expr, $($g:expr),*) => { $crate::prelude::conj2($g0, $crate::conj!($($g),*))}
}

/// Creates a goal that succeeds for every *line* that succeeds.
///
/// A *line* (separated by `;`) succeeds if all of its
/// goals (separated by `,`) succeed.
#[macro_export]
macro_rules! conde {
    ( $($($g:expr),+);* $(;)? ) => {
        $crate::prelude::conde(vec![$(vec![$($g),+]),*])
    }
}

/// Bind fresh variables with scope inside the body of `fresh!`.
///
/// Every name becomes a Rust variable holding a reference to the logic
/// variable of the same name.
#[macro_export]
macro_rules! fresh {
    (($($x:ident),+), $($g:expr),* $(,)?) => {{
        $( let $x = $crate::prelude::Term::var(stringify!($x)); )+
        $crate::prelude::fresh(&[$(stringify!($x)),+], $crate::conj!($($g),*))
    }}
}

/// Define a relation.
/// A relation is a function that creates a goal.
///
/// Inside the body the formal arguments are logic variables and the name
/// of the relation refers to the relation itself, taking terms.
#[macro_export]
macro_rules! defrel {
    ($(#[$outer:meta])* $vis:vis $name:ident($($args:ident),*) { $($g:expr),* $(,)? }) => {
        $(#[$outer])*
        $vis fn $name($($args: impl Into<$crate::prelude::Term>),*) -> $crate::prelude::Goal {
            thread_local! {
                static RELATION: ::std::rc::Rc<$crate::prelude::DefRelation> =
                    $crate::prelude::DefRelation::builtin(
                        stringify!($name),
                        &[$(stringify!($args)),*],
                        |this| {
                            #[allow(unused_variables)]
                            let $name = |$($args: $crate::prelude::Term),*| this.goal(vec![$($args),*]);
                            $( let $args = $crate::prelude::Term::var(stringify!($args)); )*
                            $crate::conj!($($g),*)
                        },
                    );
            }
            RELATION.with(|rel| rel.goal(vec![$($args.into()),*]))
        }
    };

    // alternate syntax: separate goals with ;
    ($(#[$outer:meta])* $vis:vis $name:ident($($args:ident),*) { $($g:expr);* $(;)? }) => {
        $crate::defrel!{$(#[$outer])* $vis $name($($args),*) { $($g),* }}
    };
}

/// Run one or more goals.
///
/// The syntax `run!(n, var(s), goal1, goal2, ...)` produces at most n
/// solutions in Scheme you would write `(run n var(s) goal1 goal2 ...)`.
/// The syntax `run!(*, var(s), goal1, goal2, ...)` produces all
/// solutions in Scheme you would write `(run* var(s) goal1 goal2 ...)`.
/// The latter does not return if there are infinitely many solutions.
/// Both return the list of solutions as a single term.
///
/// We support an additional syntax `run!(var(s), goal1, goal2, ...)`
/// that returns a (possibly infinite) iterator over all solutions.
#[macro_export]
macro_rules! run {
    (*, ($($x:ident),+), $($g:expr),* $(,)?) => {
        $crate::run!(@ ($($x),+), $($g),*).and_then(|query| query.run())
    };

    (*, $q:ident, $($g:expr),* $(,)?) => {
        $crate::run!(@ ($q), $($g),*).and_then(|query| query.run())
    };

    ($n:literal, ($($x:ident),+), $($g:expr),* $(,)?) => {
        $crate::run!(@ ($($x),+), $($g),*).and_then(|query| query.run_n($n))
    };

    ($n:literal, $q:ident, $($g:expr),* $(,)?) => {
        $crate::run!(@ ($q), $($g),*).and_then(|query| query.run_n($n))
    };

    (($($x:ident),+), $($g:expr),* $(,)?) => {
        $crate::run!(@ ($($x),+), $($g),*).and_then(|query| query.solutions())
    };

    ($q:ident, $($g:expr),* $(,)?) => {
        $crate::run!(@ ($q), $($g),*).and_then(|query| query.solutions())
    };

    (@ ($($x:ident),+), $($g:expr),*) => {{
        $( #[allow(unused_variables)] let $x = $crate::prelude::Term::var(stringify!($x)); )+
        $crate::prelude::RunStar::with_goals(&[$(stringify!($x)),+], vec![$($g),*])
    }};
}
