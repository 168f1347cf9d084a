//! The error taxonomy used across the parser engine and AST construction pipeline.
//!
//! Mirrors the hand-rolled `Display`/`Error` style used throughout the teacher
//! codebase (e.g. `grammar::tokenizer::Error`, `ast::InsertError`): no `thiserror`,
//! explicit `impl Display` and `impl std::error::Error`.

use itertools::Itertools;

use crate::kind::Kind;
use std::fmt;

/// A token of kind `got` (or none, at end of input) appeared where one of `expected`
/// was required.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct UnexpectedToken<K: Kind> {
    /// The kinds that would have been accepted at this point.
    pub expected: Vec<K>,
    /// The kind that was actually found, or `None` if input was exhausted.
    pub got: Option<K>,
    /// The kind of the token immediately preceding this one, if any.
    pub after: Option<K>,
}

impl<K: Kind> fmt::Display for UnexpectedToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected ")?;
        match self.expected.as_slice() {
            [] => write!(f, "nothing")?,
            [only] => write!(f, "{}", only.quoted())?,
            [init @ .., last] => {
                write!(f, "either {} or {}", init.iter().map(Kind::quoted).join(", "), last.quoted())?;
            }
        }
        if let Some(after) = self.after {
            write!(f, " after {}", after.quoted())?;
        }
        match self.got {
            Some(got) => write!(f, ", got {} instead", got.quoted()),
            None => write!(f, ", got end of input instead"),
        }
    }
}

impl<K: Kind> std::error::Error for UnexpectedToken<K> {}

/// Any of the reasons [`crate::parser::Parser::full_parse`] can fail, wrapped with
/// positional context so callers can point at the offending source location.
#[derive(Debug)]
pub struct ParseError<K: Kind> {
    /// Byte offset of the token that triggered the error.
    pub at: usize,
    /// Column span of the offending token, or `-1` if unknown.
    pub delta: isize,
    /// The underlying cause.
    pub reason: ParseErrorReason<K>,
    /// An optional human-readable hint for how to fix the error.
    pub suggestion: Option<String>,
}

impl<K: Kind> ParseError<K> {
    /// Builds a `ParseError` with no column-span information and no suggestion.
    pub fn new(at: usize, reason: ParseErrorReason<K>) -> Self {
        ParseError {
            at,
            delta: -1,
            reason,
            suggestion: None,
        }
    }
}

/// The concrete reasons a [`ParseError`] can carry.
#[derive(Debug)]
pub enum ParseErrorReason<K: Kind> {
    /// A token of an unexpected kind (or none) was encountered.
    UnexpectedToken(UnexpectedToken<K>),
    /// The oracle could not decide on an action and returned a free-form message.
    Undecidable(String),
    /// `full_parse` was called with an empty token slice.
    NoTokens,
}

impl<K: Kind> fmt::Display for ParseError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at byte {}: {}", self.at, self.reason)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

impl<K: Kind> fmt::Display for ParseErrorReason<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorReason::UnexpectedToken(e) => write!(f, "{}", e),
            ParseErrorReason::Undecidable(msg) => write!(f, "{}", msg),
            ParseErrorReason::NoTokens => write!(f, "no tokens were specified"),
        }
    }
}

impl<K: Kind> std::error::Error for ParseError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            ParseErrorReason::UnexpectedToken(e) => Some(e),
            ParseErrorReason::Undecidable(_) | ParseErrorReason::NoTokens => None,
        }
    }
}

/// A programmer error: a required, non-optional argument was null/empty.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum NilParameter {
    /// `Make::add_entry` was called with no step functions.
    EmptySteps,
    /// `Make::add_entry` was called with only null/filtered-out steps.
    AllStepsNull,
}

impl fmt::Display for NilParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NilParameter::EmptySteps => write!(f, "step list must not be empty"),
            NilParameter::AllStepsNull => write!(f, "step list must contain at least one non-null step"),
        }
    }
}

impl std::error::Error for NilParameter {}

/// An invalid (non-null, but still unusable) parameter was supplied.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum InvalidParameter {
    /// `Make::add_entry` was called twice for the same kind.
    DuplicateEntry,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidParameter::DuplicateEntry => write!(f, "a step list is already registered for this kind"),
        }
    }
}

impl std::error::Error for InvalidParameter {}

/// The error family returned by the AST construction pipeline ([`crate::ast::table`],
/// [`crate::ast::left_recursive`]).
#[derive(Debug)]
pub enum AstError<K: Kind> {
    /// `Make::apply` was called for a kind with no registered steps.
    UnexpectedTokenKind(K),
    /// `AstResult::append_children` was asked to append to more than one current node.
    AppendToMultipleNodes,
    /// `AstResult::append_children` was asked to append with no current node.
    NoNodeToAppendTo,
    /// A step function failed; `kind` names the rule table entry it failed under.
    StepFailed {
        /// The kind whose step list produced the failure.
        kind: K,
        /// The underlying cause.
        cause: Box<dyn std::error::Error>,
    },
    /// [`NilParameter`] surfaced through the AST layer (e.g. from `Make::add_entry`).
    Nil(NilParameter),
    /// [`InvalidParameter`] surfaced through the AST layer.
    Invalid(InvalidParameter),
}

impl<K: Kind> fmt::Display for AstError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstError::UnexpectedTokenKind(k) => write!(f, "unexpected token kind {}", k.quoted()),
            AstError::AppendToMultipleNodes => write!(f, "cannot append children to multiple nodes"),
            AstError::NoNodeToAppendTo => write!(f, "no node to append children to"),
            AstError::StepFailed { kind, cause } => {
                write!(f, "step for {} failed: {}", kind.quoted(), cause)
            }
            AstError::Nil(e) => write!(f, "{}", e),
            AstError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl<K: Kind> std::error::Error for AstError<K> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AstError::StepFailed { cause, .. } => Some(cause.as_ref()),
            AstError::Nil(e) => Some(e),
            AstError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

/// Sentinel returned by subordinate matching helpers (outside the core parser loop)
/// when a rule simply did not apply. Compared by identity, never wrapped: callers
/// that see this value should try another alternative rather than propagate it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct NoMatch;

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no matching rule")
    }
}

impl std::error::Error for NoMatch {}

/// Panics with a message identifying an invariant violation. Reserved for states
/// that a correct caller can never trigger (e.g. the last AST step returning a
/// non-null `prev`); never returned through a normal `Result`.
pub fn assertion_failed(message: impl fmt::Display) -> ! {
    panic!("assertion failed: {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    enum K {
        Eof,
        Num,
        Plus,
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
    fn renders_single_expectation() {
        let e: UnexpectedToken<K> = UnexpectedToken {
            expected: vec![K::Num],
            got: Some(K::Plus),
            after: None,
        };
        assert_eq!(e.to_string(), "expected \"Num\", got \"Plus\" instead");
    }

    #[test]
    fn renders_multiple_expectations_with_after() {
        let e: UnexpectedToken<K> = UnexpectedToken {
            expected: vec![K::Num, K::Plus],
            got: None,
            after: Some(K::Eof),
        };
        assert_eq!(
            e.to_string(),
            "expected either \"Num\" or \"Plus\" after \"Eof\", got end of input instead"
        );
    }
}
