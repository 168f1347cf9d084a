//! Generic iterative depth-first traversal over the AST produced by
//! [`crate::ast::table::Make::apply`].

use crate::ast::node::Node;
use crate::kind::Kind;

/// Visits every node reachable from `root` in pre-order, using an explicit stack
/// (no recursion, so traversal depth is not bounded by the call stack). Children
/// are pushed in reverse order so they come off the stack - and are visited -
/// left to right.
///
/// Aborts and propagates `visit`'s error on the first failure.
pub fn simple_dfs<'arena, N: Kind, E>(
    root: &'arena Node<'arena, N>,
    mut visit: impl FnMut(&'arena Node<'arena, N>) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        visit(node)?;
        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }
    Ok(())
}

/// A stateful visitor: [`Traverser::apply`] is given a node and its own
/// per-branch state, and returns the `(child, child_state)` pairs to descend
/// into next. Unlike [`simple_dfs`], every node gets its own threaded state
/// value rather than sharing one visitor closure's captures.
pub trait Traverser<'arena, N: Kind> {
    /// Per-branch state threaded alongside each node.
    type State;
    /// The error a single `apply` call can fail with.
    type Error;

    /// Processes `node` with its threaded `state`, returning the children to
    /// visit next along with the state each of them should be given.
    fn apply(
        &mut self,
        node: &'arena Node<'arena, N>,
        state: Self::State,
    ) -> Result<Vec<(&'arena Node<'arena, N>, Self::State)>, Self::Error>;
}

/// Drives a [`Traverser`] iteratively (explicit stack, no recursion) starting
/// from `root` with `initial_state`. Child/state pairs are pushed in reverse so
/// traversal visits left to right.
pub fn traverse<'arena, N: Kind, T: Traverser<'arena, N>>(
    traverser: &mut T,
    root: &'arena Node<'arena, N>,
    initial_state: T::State,
) -> Result<(), T::Error> {
    let mut stack = vec![(root, initial_state)];
    while let Some((node, state)) = stack.pop() {
        let mut next = traverser.apply(node, state)?;
        next.reverse();
        stack.extend(next);
    }
    Ok(())
}
