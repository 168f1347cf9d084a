//! The closed set of decisions an oracle may hand back to the parser engine.

use crate::kind::Kind;
use crate::rule::Rule;

/// A decision made by the oracle for the current parser state.
#[derive(Debug, Clone)]
pub enum Action<K: Kind> {
    /// Consume one token from the input and push it onto the stack.
    Shift,
    /// Pop `rule.rhs().len()` tokens and push a synthesized `rule.lhs()` token.
    Reduce(Rule<K>),
    /// Like [`Action::Reduce`], but also terminates the parse on success.
    Accept(Rule<K>),
}

impl<K: Kind> Action<K> {
    /// The rule this action reduces by, if any.
    pub fn rule(&self) -> Option<&Rule<K>> {
        match self {
            Action::Shift => None,
            Action::Reduce(r) | Action::Accept(r) => Some(r),
        }
    }

    /// A short, human-readable one-liner used by the debug stepper.
    pub fn describe(&self) -> String {
        match self {
            Action::Shift => "shift".to_string(),
            Action::Reduce(r) => format!("reduce by {}", r),
            Action::Accept(r) => format!("accept by {}", r),
        }
    }
}
