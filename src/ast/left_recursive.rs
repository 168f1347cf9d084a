//! Linearizes left-recursive productions of the form `L := a L | a` into a flat,
//! left-to-right sequence of sub-ASTs.

use log::trace;

use crate::ast::node::Node;
use crate::error::AstError;
use crate::kind::Kind;
use crate::token::Token;

/// Repeatedly peels the leading self-reference off a left-recursive parse token,
/// invoking `f` on each layer's remaining children and flattening the results.
///
/// `root.kind()` must equal `lhs`. At each step: if the *first* child also has kind
/// `lhs` (this crate's rules list children in shift order, so a leading-recursive
/// production like `EXPR := EXPR PLUS NUM` puts the recursive `EXPR` first), that
/// child becomes the new root for the next iteration and is excluded from `f`'s
/// input; otherwise this is the innermost (base-case) layer. `f` is called once
/// per layer, left-to-right - the base case first, then each subsequent operator
/// layer in the order it was originally parsed.
pub fn left_recursive<'arena, 'tok, K: Kind, N: Kind, F>(
    root: &'tok Token<K>,
    lhs: K,
    mut f: F,
) -> Result<Vec<&'arena Node<'arena, N>>, AstError<K>>
where
    F: FnMut(&[Token<K>]) -> Result<Vec<&'arena Node<'arena, N>>, Box<dyn std::error::Error>>,
{
    if root.kind() != lhs {
        return Err(AstError::UnexpectedTokenKind(root.kind()));
    }

    // Collect each layer's children outermost-first (root, then its leading-L
    // child, and so on), then invoke `f` innermost-first so output order is
    // left-to-right.
    let mut layers: Vec<&[Token<K>]> = Vec::new();
    let mut current = root;
    loop {
        let children = current.children().ok_or(AstError::UnexpectedTokenKind(current.kind()))?;
        if children.is_empty() {
            return Err(AstError::UnexpectedTokenKind(current.kind()));
        }
        let first = &children[0];
        if first.kind() == lhs {
            layers.push(&children[1..]);
            current = first;
        } else {
            layers.push(children);
            break;
        }
    }

    let mut out = Vec::new();
    for remaining in layers.into_iter().rev() {
        trace!("left_recursive: invoking f on a layer of {} children", remaining.len());
        let nodes = f(remaining).map_err(|cause| AstError::StepFailed { kind: lhs, cause })?;
        out.extend(nodes);
    }
    Ok(out)
}

/// A trivial wrapper around a single `f(root) -> list<N>` call that null-checks
/// its input before invoking `f`.
pub fn to_ast<'arena, 'tok, K: Kind, N: Kind, F>(
    root: Option<&'tok Token<K>>,
    f: F,
) -> Result<Vec<&'arena Node<'arena, N>>, AstError<K>>
where
    F: FnOnce(&'tok Token<K>) -> Result<Vec<&'arena Node<'arena, N>>, Box<dyn std::error::Error>>,
{
    match root {
        None => Ok(Vec::new()),
        Some(root) => f(root).map_err(|cause| AstError::StepFailed { kind: root.kind(), cause }),
    }
}
