//! Grammar rules: an LHS kind produced from an ordered sequence of RHS kinds.

use crate::kind::Kind;

/// An immutable production `lhs := rhs[0] rhs[1] ... rhs[n-1]`.
///
/// Per the design convention adopted by this crate, `rhs` is listed **top-of-stack
/// first** (the order tokens are popped in, not the order they were shifted in). See
/// [`crate::parser::Parser::apply_reduce`] for where this convention is consumed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Rule<K: Kind> {
    lhs: K,
    rhs: Vec<K>,
}

impl<K: Kind> Rule<K> {
    /// Creates a new rule. Panics if `rhs` is empty - a rule with no RHS symbols
    /// cannot be reduced to (there would be nothing to pop).
    pub fn new(lhs: K, rhs: Vec<K>) -> Self {
        assert!(!rhs.is_empty(), "a rule's RHS must contain at least one symbol");
        Rule { lhs, rhs }
    }

    /// The symbol produced by this rule.
    pub fn lhs(&self) -> K {
        self.lhs
    }

    /// The symbols this rule reduces, in pop order (top-of-stack first).
    pub fn rhs(&self) -> &[K] {
        &self.rhs
    }

    /// The number of symbols in the RHS.
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    /// A rule's RHS is never empty; kept for API symmetry with other collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The RHS symbol at position `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<K> {
        self.rhs.get(i).copied()
    }

    /// Positions within the RHS at which `k` occurs.
    pub fn indices_of(&self, k: K) -> Vec<usize> {
        self.rhs
            .iter()
            .enumerate()
            .filter_map(|(i, &rk)| if rk == k { Some(i) } else { None })
            .collect()
    }
}

impl<K: Kind> std::fmt::Display for Rule<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :=", self.lhs)?;
        for k in &self.rhs {
            write!(f, " {}", k)?;
        }
        Ok(())
    }
}
