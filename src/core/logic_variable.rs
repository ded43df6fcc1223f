use crate::core::environment::ScopeId;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static INAME_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Internal identity of a logic variable.
///
/// The user-facing name of a variable is purely descriptive. Bindings are
/// recorded against the internal name, which is unique among all internal
/// names ever minted. When variables get fused they share one new internal
/// name.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IName(usize);

impl IName {
    /// Mint a new, never seen internal name.
    pub fn mint() -> Self {
        IName(INAME_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Debug for IName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a logic variable in the variable arena of an environment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct VarId(pub(crate) usize);

/// A variable declared in one scope of an environment.
#[derive(Clone, Debug)]
pub struct LogicVariable {
    name: Rc<str>,
    i_name: IName,
    scope: ScopeId,
}

impl LogicVariable {
    pub(crate) fn new(name: Rc<str>, scope: ScopeId) -> Self {
        LogicVariable {
            name,
            i_name: IName::mint(),
            scope,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Internal name minted at declaration. Fusion does not change it,
    /// use [`Environment::i_name`](crate::core::environment::Environment::i_name)
    /// for the current identity.
    pub fn i_name(&self) -> IName {
        self.i_name
    }

    /// The scope that declared this variable.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

/// Occurrence of a variable inside a term.
///
/// A reference built by user code only knows the variable name and is
/// resolved against the scope chain when the goal holding it is attained.
/// After that it is *closed*: it points to exactly one declared variable,
/// no matter in which scope it is looked at later.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct VarRef {
    name: Rc<str>,
    target: Option<VarId>,
}

impl VarRef {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        VarRef {
            name: name.into(),
            target: None,
        }
    }

    pub(crate) fn closed(name: Rc<str>, target: VarId) -> Self {
        VarRef {
            name,
            target: Some(target),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> &Rc<str> {
        &self.name
    }

    /// The variable this reference was resolved to, if any.
    pub fn target(&self) -> Option<VarId> {
        self.target
    }
}

impl std::fmt::Debug for VarRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Reified logic variable.
///
/// Reified variables stand for logic variables that remain fresh
/// after goals have run. They print as `_N` where `N` is the rank.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ReifiedVar(pub usize);

impl std::fmt::Debug for ReifiedVar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

impl std::fmt::Display for ReifiedVar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn minted_names_are_all_different() {
        let a = IName::mint();
        let b = IName::mint();
        assert_ne!(a, b);
    }

    #[test]
    fn copied_names_are_equal() {
        let a = IName::mint();
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn two_variables_with_same_name_have_different_identities() {
        let x1 = LogicVariable::new("x".into(), ScopeId(0));
        let x2 = LogicVariable::new("x".into(), ScopeId(0));
        assert_eq!(x1.name(), x2.name());
        assert_ne!(x1.i_name(), x2.i_name());
    }

    #[test]
    fn new_references_are_not_closed() {
        let r = VarRef::new("q");
        assert_eq!(r.name(), "q");
        assert_eq!(r.target(), None);
    }

    #[test]
    fn reified_variables_print_with_rank() {
        assert_eq!(format!("{:?}", ReifiedVar(3)), "_3");
        assert_eq!(ReifiedVar(0).to_string(), "_0");
    }
}
