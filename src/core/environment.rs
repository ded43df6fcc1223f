//! Hierarchical binding store
//!
//! An [`Environment`] holds the chain of scopes from the root to the
//! current scope. Every scope declares variables by name and keeps a
//! registry of the user names that share an internal name.
//!
//! Associations live in one store keyed by internal name. Each one is
//! tagged with the scope that holds it: the scope it was made in, until
//! that scope is left and the association moves to the scope that declared
//! the variable. Associations of variables whose scope is gone are detached
//! and stay visible to every lookup.
//!
//! All parts are persistent collections, so cloning an environment is cheap
//! and is how a search branch gets its own bindings: a sibling branch never
//! observes what another branch bound.

use crate::core::cons_cell::ConsCell;
use crate::core::logic_variable::{IName, LogicVariable, VarId, VarRef};
use crate::core::term::Term;
use crate::error::{KrakenError, Result};
use im::{HashMap, Vector};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::rc::Rc;
use tracing::trace;

/// Position of a scope in the chain of an environment. The root is 0.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ScopeId(pub(crate) usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Clone, Debug, Default)]
struct Scope {
    vars: BTreeMap<Rc<str>, VarId>,
    ivars: BTreeMap<IName, BTreeSet<Rc<str>>>,
    /// Internal names with associations held by this scope.
    held: BTreeSet<IName>,
}

#[derive(Clone, Debug, PartialEq)]
struct Association {
    holder: Option<ScopeId>,
    value: Term,
}

#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vector<Rc<Scope>>,
    variables: Vector<LogicVariable>,
    /// Internal names that were fused, mapped to the name they were fused into.
    fused: HashMap<IName, IName>,
    /// Scope that declares the variables of each live internal name.
    homes: HashMap<IName, ScopeId>,
    associations: HashMap<IName, Vec<Association>>,
    rankings: HashMap<IName, usize>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// Create an environment that consists of the root scope only.
    pub fn new() -> Self {
        let mut scopes = Vector::new();
        scopes.push_back(Rc::new(Scope::default()));
        Environment {
            scopes,
            variables: Vector::new(),
            fused: HashMap::new(),
            homes: HashMap::new(),
            associations: HashMap::new(),
            rankings: HashMap::new(),
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        ScopeId(self.scopes.len() - 1)
    }

    pub fn parent_of(&self, scope: ScopeId) -> Option<ScopeId> {
        match scope.0 {
            0 => None,
            n if n < self.scopes.len() => Some(ScopeId(n - 1)),
            _ => None,
        }
    }

    /// Open a child of the current scope and make it current.
    pub fn enter_scope(&mut self) {
        self.scopes.push_back(Rc::new(Scope::default()));
    }

    /// Hand the associations of the current scope over to the scopes that
    /// declared the bound variables and drop the scope. Associations of
    /// its own variables are detached. Does nothing at the root.
    pub fn leave_scope(&mut self) {
        let current = self.current_scope();
        if current == ScopeId::ROOT {
            return;
        }
        self.propagate(current);

        let held = std::mem::take(&mut self.scope_mut(current).held);
        for i_name in held {
            self.retag(i_name, current, None);
        }

        if let Some(scope) = self.scopes.pop_back() {
            for var in scope.vars.values() {
                let i_name = self.i_name(*var);
                if self.homes.get(&i_name) == Some(&current) {
                    self.homes.remove(&i_name);
                }
            }
        }
    }

    /// Declare a new variable in the current scope.
    pub fn declare(&mut self, name: &str) -> Result<VarId> {
        if name.is_empty() {
            return Err(KrakenError::EmptyName);
        }
        let current = self.current_scope();
        if self.scopes[current.0].vars.contains_key(name) {
            return Err(KrakenError::DuplicateVariable(name.to_string()));
        }

        let name: Rc<str> = name.into();
        let var = LogicVariable::new(name.clone(), current);
        let i_name = var.i_name();
        let id = VarId(self.variables.len());
        self.variables.push_back(var);
        self.homes.insert(i_name, current);

        let scope = self.scope_mut(current);
        scope.vars.insert(name.clone(), id);
        scope.ivars.entry(i_name).or_default().insert(name);
        Ok(id)
    }

    /// Find the variable called `name`, looking at the current scope first
    /// and then at its ancestors.
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.vars.get(name).copied())
    }

    pub fn variable(&self, var: VarId) -> &LogicVariable {
        &self.variables[var.0]
    }

    /// Internal name of `var`, after all fusions.
    pub fn i_name(&self, var: VarId) -> IName {
        let mut i_name = self.variables[var.0].i_name();
        while let Some(next) = self.fused.get(&i_name) {
            i_name = *next;
        }
        i_name
    }

    /// Resolve every variable reference in `term` against the current scope
    /// chain. References that are already resolved are kept as they are.
    pub fn close(&self, term: &Term) -> Result<Term> {
        Ok(self.close_changed(term)?.unwrap_or_else(|| term.clone()))
    }

    fn close_changed(&self, term: &Term) -> Result<Option<Term>> {
        match term {
            Term::Atomic(_) | Term::Reified(_) => Ok(None),
            Term::Var(r) if r.target().is_some() => Ok(None),
            Term::Var(r) => match self.lookup(r.name()) {
                Some(id) => Ok(Some(Term::Var(VarRef::closed(r.shared_name().clone(), id)))),
                None => Err(KrakenError::UndeclaredVariable(r.name().to_string())),
            },
            Term::Cons(cell) => {
                let car = cell.car().map(|t| self.close_changed(t)).transpose()?;
                let cdr = cell.cdr().map(|t| self.close_changed(t)).transpose()?;
                if car.iter().chain(cdr.iter()).all(Option::is_none) {
                    return Ok(None);
                }
                let car = match car {
                    Some(Some(closed)) => Some(closed),
                    _ => cell.car().cloned(),
                };
                let cdr = match cdr {
                    Some(Some(closed)) => Some(closed),
                    _ => cell.cdr().cloned(),
                };
                Ok(Some(ConsCell::from_parts(car, cdr).into()))
            }
        }
    }

    /// Record that `var` is bound to `value`.
    ///
    /// When `value` is a variable whose bindings already lead back to `var`,
    /// the variables on that cycle are fused into a single identity instead.
    pub fn bind(&mut self, var: VarId, value: Term) {
        let i_name = self.i_name(var);
        if let Some(other) = value.as_var().and_then(VarRef::target) {
            let other = self.i_name(other);
            if other == i_name {
                return;
            }
            if let Some(mut cycle) = self.var_path(other, i_name) {
                cycle.push(i_name);
                self.fuse(&cycle);
                return;
            }
        }

        trace!(var = self.variables[var.0].name(), %value, "bind");
        let current = self.current_scope();
        self.associations
            .entry(i_name)
            .or_insert_with(Vec::new)
            .push(Association {
                holder: Some(current),
                value,
            });
        self.scope_mut(current).held.insert(i_name);
    }

    /// Internal names on a chain of variable-to-variable bindings from
    /// `from` to `to`, excluding `to`.
    fn var_path(&self, from: IName, to: IName) -> Option<Vec<IName>> {
        let mut came_from: BTreeMap<IName, IName> = BTreeMap::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        seen.insert(from);
        queue.push_back(from);

        while let Some(node) = queue.pop_front() {
            for value in self.associations_of(node) {
                let next = match value.as_var().and_then(VarRef::target) {
                    Some(id) => self.i_name(id),
                    None => continue,
                };
                if next == to {
                    let mut path = vec![node];
                    let mut node = node;
                    while let Some(prev) = came_from.get(&node) {
                        path.push(*prev);
                        node = *prev;
                    }
                    return Some(path);
                }
                if seen.insert(next) {
                    came_from.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Merge the identities of `members` into one newly minted internal name.
    ///
    /// Associations of all members move to the new name, except the ones
    /// that link members among themselves. The new name belongs to the
    /// outermost scope that declared one of the members.
    pub fn fuse(&mut self, members: &[IName]) -> IName {
        let fused = IName::mint();
        let members: BTreeSet<IName> = members.iter().copied().collect();
        trace!(?members, ?fused, "fuse");

        let mut home: Option<ScopeId> = None;
        for member in &members {
            self.fused.insert(*member, fused);
            if let Some(scope) = self.homes.remove(member) {
                home = Some(home.map_or(scope, |h| h.min(scope)));
            }
        }
        if let Some(home) = home {
            self.homes.insert(fused, home);
        }

        let mut kept = vec![];
        for member in &members {
            if let Some(entries) = self.associations.remove(member) {
                kept.extend(entries);
            }
        }
        kept.retain(|a| {
            a.value
                .as_var()
                .and_then(VarRef::target)
                .map_or(true, |id| self.i_name(id) != fused)
        });
        if !kept.is_empty() {
            self.associations.insert(fused, kept);
        }

        for index in 0..self.scopes.len() {
            let scope = &self.scopes[index];
            let touched = members
                .iter()
                .any(|m| scope.held.contains(m) || scope.ivars.contains_key(m));
            if !touched {
                continue;
            }
            let scope = self.scope_mut(ScopeId(index));
            for member in &members {
                if scope.held.remove(member) {
                    scope.held.insert(fused);
                }
                if let Some(names) = scope.ivars.remove(member) {
                    scope.ivars.entry(fused).or_default().extend(names);
                }
            }
        }

        fused
    }

    /// Move the associations held by `scope` to the ancestor that declared
    /// the bound variable. Associations of variables declared in `scope`
    /// itself stay where they are.
    pub fn propagate(&mut self, scope: ScopeId) {
        if self.parent_of(scope).is_none() {
            return;
        }

        let moves: Vec<(IName, ScopeId)> = self.scopes[scope.0]
            .held
            .iter()
            .filter_map(|i_name| match self.homes.get(i_name) {
                Some(home) if *home < scope => Some((*i_name, *home)),
                _ => None,
            })
            .collect();

        for (i_name, home) in moves {
            self.retag(i_name, scope, Some(home));
            self.scope_mut(scope).held.remove(&i_name);
            self.scope_mut(home).held.insert(i_name);
        }
    }

    /// Propagate the associations of all scopes, innermost first.
    pub fn propagate_all(&mut self) {
        for scope in (1..self.scopes.len()).rev() {
            self.propagate(ScopeId(scope));
        }
    }

    /// Drop the associations held by the current scope.
    pub fn clear(&mut self) {
        let current = self.current_scope();
        let held = std::mem::take(&mut self.scope_mut(current).held);
        for i_name in held {
            let emptied = match self.associations.get_mut(&i_name) {
                Some(entries) => {
                    entries.retain(|a| a.holder != Some(current));
                    entries.is_empty()
                }
                None => false,
            };
            if emptied {
                self.associations.remove(&i_name);
            }
        }
    }

    /// Rank of an unbound identity, assigned in order of first request.
    pub fn rank(&mut self, i_name: IName) -> usize {
        let next = self.rankings.len();
        *self.rankings.entry(i_name).or_insert(next)
    }

    pub fn clear_rankings(&mut self) {
        self.rankings.clear();
    }

    /// Values the variable called `name` is bound to.
    pub fn associations(&self, name: &str) -> Result<Vec<Term>> {
        let var = self.existing(name)?;
        Ok(self
            .associations_of(self.i_name(var))
            .into_iter()
            .cloned()
            .collect())
    }

    /// Other user names in scope that share the identity of `name`.
    pub fn names_fused(&self, name: &str) -> Result<Vec<String>> {
        let var = self.existing(name)?;
        let i_name = self.i_name(var);
        let names: BTreeSet<&str> = self
            .scopes
            .iter()
            .filter_map(|scope| scope.ivars.get(&i_name))
            .flatten()
            .map(|n| &**n)
            .filter(|n| *n != name)
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }

    pub fn is_fused(&self, name: &str) -> Result<bool> {
        Ok(!self.names_fused(name)?.is_empty())
    }

    fn existing(&self, name: &str) -> Result<VarId> {
        self.lookup(name)
            .ok_or_else(|| KrakenError::UndeclaredVariable(name.to_string()))
    }

    /// All associations recorded for `i_name`, oldest first.
    pub(crate) fn associations_of(&self, i_name: IName) -> Vec<&Term> {
        self.associations
            .get(&i_name)
            .map(|entries| entries.iter().map(|a| &a.value).collect())
            .unwrap_or_default()
    }

    fn retag(&mut self, i_name: IName, from: ScopeId, to: Option<ScopeId>) {
        if let Some(entries) = self.associations.get_mut(&i_name) {
            for entry in entries.iter_mut().filter(|a| a.holder == Some(from)) {
                entry.holder = to;
            }
        }
    }

    fn scope_mut(&mut self, scope: ScopeId) -> &mut Scope {
        Rc::make_mut(&mut self.scopes[scope.0])
    }
}
