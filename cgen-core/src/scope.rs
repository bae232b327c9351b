//! Weak parent links between generated elements.
//!
//! Containers own their children outright. Children only keep a
//! [`ParentRef`], a non-owning link to the container's [`ScopeHandle`],
//! which is walked on demand whenever a qualified name is needed. Attaching
//! a container somewhere else therefore changes the names of everything
//! below it, even children that were added earlier.
//!
//! A scope also records the names of the types declared in it (nested
//! classes, enums), so a type used outside its scope can be qualified.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use log::{trace, warn};

#[derive(Debug)]
struct ScopeNode {
    name: String,
    parent: RefCell<ParentRef>,
    types: RefCell<Vec<String>>,
}

/// Identity of a named container (class, struct, namespace).
///
/// Owned by the container; hand out [`ParentRef`]s to its children with
/// [`as_parent`](Self::as_parent).
#[derive(Debug)]
pub struct ScopeHandle {
    node: Rc<ScopeNode>,
}

impl ScopeHandle {
    /// Create a detached scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            node: Rc::new(ScopeNode {
                name: name.into(),
                parent: RefCell::new(ParentRef::detached()),
                types: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Name of this scope.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// A weak link children use to reach this scope.
    pub fn as_parent(&self) -> ParentRef {
        ParentRef(Rc::downgrade(&self.node))
    }

    /// The scope this one is nested in.
    pub fn parent(&self) -> ParentRef {
        self.node.parent.borrow().clone()
    }

    /// Nest this scope inside `parent`, replacing any previous link.
    ///
    /// A parent that is this scope or lies below it would close a cycle; it
    /// is refused, the previous link is kept and `false` is returned.
    pub fn attach(&self, parent: ParentRef) -> bool {
        if parent.ancestors().any(|node| Rc::ptr_eq(&node, &self.node)) {
            warn!(scope = self.name(); "Refusing to nest a scope inside itself or a descendant");
            return false;
        }
        trace!(scope = self.name(); "Attaching scope");
        *self.node.parent.borrow_mut() = parent;
        true
    }

    /// Record a type declared directly in this scope.
    pub fn declare_type(&self, name: impl Into<String>) {
        self.node.types.borrow_mut().push(name.into());
    }

    /// Names from the outermost ancestor down to this scope.
    pub fn path(&self) -> Vec<String> {
        let mut path = self.parent().path().unwrap_or_default();
        path.push(self.node.name.clone());
        path
    }
}

/// Non-owning link from a child element to its enclosing scope.
#[derive(Debug, Clone, Default)]
pub struct ParentRef(Weak<ScopeNode>);

impl ParentRef {
    /// A link that points nowhere.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    /// Whether the enclosing scope is set and still alive.
    pub fn is_attached(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Name of the enclosing scope.
    pub fn name(&self) -> Option<String> {
        self.0.upgrade().map(|node| node.name.clone())
    }

    /// Names of the enclosing scope and all of its ancestors, outermost first.
    ///
    /// Returns `None` when detached.
    pub fn path(&self) -> Option<Vec<String>> {
        if !self.is_attached() {
            return None;
        }
        let mut path: Vec<String> = self.ancestors().map(|node| node.name.clone()).collect();
        path.reverse();
        Some(path)
    }

    /// Qualify the leading type name of `ty` with the scope that declares it.
    ///
    /// The innermost enclosing scope declaring the name wins, and anything
    /// around the name (`const `, `*`, `&`, template arguments) is kept:
    /// with `Kind` declared in `Outer`, `const Kind&` becomes
    /// `const Outer::Kind&`. Unknown names are returned unchanged.
    pub fn resolve_type(&self, ty: &str, separator: &str) -> String {
        let rest = ty.strip_prefix("const ").unwrap_or(ty);
        let prefix = &ty[..ty.len() - rest.len()];
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let (ident, suffix) = rest.split_at(end);
        if ident.is_empty() {
            return ty.to_string();
        }

        let declaring = self
            .ancestors()
            .position(|node| node.types.borrow().iter().any(|t| t == ident));
        let Some(depth) = declaring else {
            return ty.to_string();
        };
        let mut scopes: Vec<String> = self
            .ancestors()
            .skip(depth)
            .map(|node| node.name.clone())
            .collect();
        scopes.reverse();
        scopes.push(ident.to_string());
        format!("{prefix}{}{suffix}", scopes.join(separator))
    }

    /// The enclosing scope, then its parent, up to the outermost one.
    fn ancestors(&self) -> impl Iterator<Item = Rc<ScopeNode>> {
        std::iter::successors(self.0.upgrade(), |node| node.parent.borrow().0.upgrade())
    }

    /// Prefix `name` with every enclosing scope, joined by `separator`.
    ///
    /// Returns `None` when detached.
    pub fn qualify(&self, name: &str, separator: &str) -> Option<String> {
        let mut path = self.path()?;
        path.push(name.to_string());
        Some(path.join(separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached() {
        let parent = ParentRef::detached();
        assert!(!parent.is_attached());
        assert_eq!(parent.path(), None);
        assert_eq!(parent.qualify("x", "::"), None);
    }

    #[test]
    fn test_nested_path() {
        let outer = ScopeHandle::new("A");
        let inner = ScopeHandle::new("B");
        inner.attach(outer.as_parent());

        let link = inner.as_parent();
        assert_eq!(link.path(), Some(vec!["A".to_string(), "B".to_string()]));
        assert_eq!(link.qualify("m", "::").as_deref(), Some("A::B::m"));
        assert_eq!(inner.path(), vec!["A", "B"]);
    }

    #[test]
    fn test_resolution_is_lazy() {
        let inner = ScopeHandle::new("B");
        let link = inner.as_parent();
        assert_eq!(link.qualify("m", "::").as_deref(), Some("B::m"));

        // Attaching after the child link was handed out still applies.
        let outer = ScopeHandle::new("A");
        inner.attach(outer.as_parent());
        assert_eq!(link.qualify("m", "::").as_deref(), Some("A::B::m"));
        assert_eq!(link.qualify("m", ".").as_deref(), Some("A.B.m"));
    }

    #[test]
    fn test_dropped_scope_detaches() {
        let link = {
            let scope = ScopeHandle::new("Gone");
            scope.as_parent()
        };
        assert!(!link.is_attached());
        assert_eq!(link.name(), None);
    }

    #[test]
    fn test_cycles_are_refused() {
        let outer = ScopeHandle::new("A");
        let inner = ScopeHandle::new("B");
        assert!(inner.attach(outer.as_parent()));

        assert!(!outer.attach(outer.as_parent()));
        assert!(!outer.attach(inner.as_parent()));
        assert!(!outer.parent().is_attached());
        assert_eq!(inner.path(), vec!["A", "B"]);
        assert_eq!(outer.path(), vec!["A"]);
    }

    #[test]
    fn test_resolve_type() {
        let outer = ScopeHandle::new("Outer");
        outer.declare_type("Kind");
        outer.declare_type("Inner");
        let inner = ScopeHandle::new("Inner");
        inner.declare_type("Node");
        inner.attach(outer.as_parent());

        let link = inner.as_parent();
        assert_eq!(link.resolve_type("Kind", "::"), "Outer::Kind");
        assert_eq!(link.resolve_type("const Kind&", "::"), "const Outer::Kind&");
        assert_eq!(link.resolve_type("Node*", "::"), "Outer::Inner::Node*");
        assert_eq!(link.resolve_type("Inner", "::"), "Outer::Inner");
        assert_eq!(link.resolve_type("std::string", "::"), "std::string");
        assert_eq!(link.resolve_type("int", "::"), "int");
        assert_eq!(ParentRef::detached().resolve_type("Kind", "::"), "Kind");
    }
}
