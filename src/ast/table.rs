//! Maps token kinds to the ordered step pipelines that build their AST nodes.

use std::collections::HashMap;

use log::trace;

use crate::ast::node::Node;
use crate::ast::result::AstResult;
use crate::error::{AstError, InvalidParameter, NilParameter};
use crate::kind::Kind;
use crate::token::Token;

/// One unit in a rule's AST-construction pipeline: given the accumulator and the
/// value threaded from the previous step (or the root parse token, for the first
/// step), mutates the accumulator and returns the value to thread into the next
/// step - `None` once there is nothing left to hand off.
pub type Step<'arena, 'tok, K, N> =
    Box<dyn Fn(&mut AstResult<'arena, N>, Option<&'tok Token<K>>) -> Result<Option<&'tok Token<K>>, Box<dyn std::error::Error>> + 'arena>;

/// A registry of parse-token-kind -> ordered step list, used to fold a parse token
/// tree into AST nodes.
pub struct Make<'arena, 'tok, K: Kind, N: Kind> {
    entries: HashMap<K, Vec<Step<'arena, 'tok, K, N>>>,
}

impl<'arena, 'tok, K: Kind, N: Kind> Make<'arena, 'tok, K, N> {
    /// An empty table.
    pub fn new() -> Self {
        Make { entries: HashMap::new() }
    }

    /// Registers `steps` under `kind`. `steps` entries that are `None` are
    /// filtered out first. Errors if `steps` was empty, if every entry was
    /// filtered out, or if `kind` was already registered.
    pub fn add_entry(
        &mut self,
        kind: K,
        steps: Vec<Option<Step<'arena, 'tok, K, N>>>,
    ) -> Result<(), AstError<K>> {
        if steps.is_empty() {
            return Err(AstError::Nil(NilParameter::EmptySteps));
        }
        let filtered: Vec<_> = steps.into_iter().flatten().collect();
        if filtered.is_empty() {
            return Err(AstError::Nil(NilParameter::AllStepsNull));
        }
        if self.entries.contains_key(&kind) {
            return Err(AstError::Invalid(InvalidParameter::DuplicateEntry));
        }
        self.entries.insert(kind, filtered);
        Ok(())
    }

    /// Runs `root` through the step list registered for its kind and returns the
    /// resulting AST nodes.
    ///
    /// The `prev` value is threaded from step to step, starting as `Some(root)`.
    /// The last step MUST return `None`; a non-null result there is an invariant
    /// violation in the caller's rule table, not a recoverable error.
    pub fn apply(&self, root: &'tok Token<K>) -> Result<Vec<&'arena Node<'arena, N>>, AstError<K>> {
        let steps = self.entries.get(&root.kind()).ok_or(AstError::UnexpectedTokenKind(root.kind()))?;

        let mut result = AstResult::new();
        let mut prev = Some(root);
        for step in steps {
            trace!("running step for kind {}", root.kind());
            prev = step(&mut result, prev).map_err(|cause| AstError::StepFailed {
                kind: root.kind(),
                cause,
            })?;
        }
        if prev.is_some() {
            crate::error::assertion_failed("last AST step for a kind must return None");
        }
        Ok(result.apply())
    }
}

impl<'arena, 'tok, K: Kind, N: Kind> Default for Make<'arena, 'tok, K, N> {
    fn default() -> Self {
        Self::new()
    }
}
