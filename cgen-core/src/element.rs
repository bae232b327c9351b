//! The base abstraction shared by every generated construct.

use crate::ParentRef;

/// A named, optionally parented node of the code model.
pub trait Element {
    /// Unqualified name.
    fn name(&self) -> &str;

    /// Link to the enclosing scope.
    fn parent(&self) -> ParentRef;

    /// Place this element inside a scope.
    fn attach(&mut self, parent: ParentRef);

    /// Name prefixed by every enclosing scope.
    ///
    /// Resolved at call time, so it reflects where the element lives when
    /// it is rendered rather than when it was created.
    fn qualified_name(&self, separator: &str) -> String {
        self.parent()
            .qualify(self.name(), separator)
            .unwrap_or_else(|| self.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScopeHandle;

    struct Leaf {
        name: String,
        parent: ParentRef,
    }

    impl Element for Leaf {
        fn name(&self) -> &str {
            &self.name
        }

        fn parent(&self) -> ParentRef {
            self.parent.clone()
        }

        fn attach(&mut self, parent: ParentRef) {
            self.parent = parent;
        }
    }

    #[test]
    fn test_qualified_name() {
        let mut leaf = Leaf {
            name: "x".into(),
            parent: ParentRef::detached(),
        };
        assert_eq!(leaf.qualified_name("::"), "x");

        let scope = ScopeHandle::new("Outer");
        leaf.attach(scope.as_parent());
        assert_eq!(leaf.qualified_name("::"), "Outer::x");
    }
}
