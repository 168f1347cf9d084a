//! The mutable accumulator a rule's step functions write into.

use crate::ast::node::Node;
use crate::error::AstError;
use crate::kind::Kind;

/// Holds the "currently being built" node(s) for one [`crate::ast::table::Make::apply`]
/// call. Step functions mutate this in place; the final value is read back via
/// [`AstResult::apply`].
pub struct AstResult<'arena, N: Kind> {
    current: Vec<&'arena Node<'arena, N>>,
}

impl<'arena, N: Kind> AstResult<'arena, N> {
    /// An empty accumulator.
    pub fn new() -> Self {
        AstResult { current: Vec::new() }
    }

    /// Replaces the current node list with a single freshly-allocated node.
    pub fn make_node(&mut self, arena: &'arena crate::arena::Arena<'arena, N>, kind: N, data: impl Into<String>) {
        let node = arena.alloc(Node::new(kind, data));
        self.current = vec![node];
    }

    /// Replaces the current list with `nodes`, unless `nodes` is empty - in which
    /// case this is a no-op (the previous current list is kept).
    pub fn set_nodes(&mut self, nodes: Vec<&'arena Node<'arena, N>>) {
        if !nodes.is_empty() {
            self.current = nodes;
        }
    }

    /// Extends the current list with `nodes`.
    pub fn append_nodes(&mut self, nodes: Vec<&'arena Node<'arena, N>>) {
        self.current.extend(nodes);
    }

    /// Attaches `children` to the sole current node. Errors if there is not
    /// exactly one current node.
    pub fn append_children(&mut self, children: Vec<&'arena Node<'arena, N>>) -> Result<(), AstError<N>> {
        match self.current.as_slice() {
            [] => Err(AstError::NoNodeToAppendTo),
            [only] => {
                for child in children {
                    only.append_child(child);
                }
                Ok(())
            }
            _ => Err(AstError::AppendToMultipleNodes),
        }
    }

    /// Overwrites the kind and data of every current node in place.
    pub fn transform_nodes(&mut self, kind: N, data: impl Into<String>) {
        let data = data.into();
        for node in &self.current {
            node.set_kind_and_data(kind, data.clone());
        }
    }

    /// Reads back the current node list.
    pub fn apply(self) -> Vec<&'arena Node<'arena, N>> {
        self.current
    }
}

impl<'arena, N: Kind> Default for AstResult<'arena, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use std::fmt;

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    enum K {
        Eof,
        A,
        B,
    }

    impl fmt::Display for K {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt::Debug::fmt(self, f)
        }
    }

    impl Kind for K {
        const EOF: Self = K::Eof;
    }

    #[test]
    fn make_node_replaces_current() {
        let arena: Arena<K> = Arena::new();
        let mut result = AstResult::new();
        result.make_node(&arena, K::A, "first");
        result.make_node(&arena, K::B, "second");
        let nodes = result.apply();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), K::B);
    }

    #[test]
    fn append_children_requires_single_current_node() {
        let arena: Arena<K> = Arena::new();
        let mut result = AstResult::new();
        let child = arena.alloc(Node::new(K::A, "child"));
        assert!(matches!(result.append_children(vec![child]), Err(AstError::NoNodeToAppendTo)));

        result.make_node(&arena, K::B, "parent");
        assert!(result.append_children(vec![child]).is_ok());
        assert_eq!(result.apply()[0].children().len(), 1);
    }

    #[test]
    fn append_children_errors_on_multiple_current_nodes() {
        let arena: Arena<K> = Arena::new();
        let mut result = AstResult::new();
        let a = arena.alloc(Node::new(K::A, "a"));
        let b = arena.alloc(Node::new(K::B, "b"));
        result.append_nodes(vec![a, b]);
        let child = arena.alloc(Node::new(K::A, "child"));
        assert!(matches!(
            result.append_children(vec![child]),
            Err(AstError::AppendToMultipleNodes)
        ));
    }
}
