//! A generic toolkit for bottom-up (shift/reduce) parsers and the AST
//! construction pipeline that turns their output into a typed tree.
//!
//! The caller supplies a token-kind enumeration ([`kind::Kind`]), a finished
//! token stream, and a decision [`parser::Oracle`]; [`parser::Parser`] drives the
//! shift/reduce loop to a parse forest. The [`ast`] module then folds a chosen
//! root of that forest into AST nodes via a per-kind [`ast::Make`] rule table,
//! with [`ast::left_recursive`] available for flattening left-recursive
//! productions.

pub mod action;
pub mod arena;
pub mod ast;
pub mod error;
pub mod kind;
pub mod parser;
pub mod rule;
pub mod stepper;
pub mod token;
pub mod traversal;

pub use action::Action;
pub use arena::Arena;
pub use error::{AstError, NilParameter, NoMatch, ParseError, ParseErrorReason, UnexpectedToken};
pub use kind::Kind;
pub use parser::{Oracle, Parser, Stack};
pub use rule::Rule;
pub use stepper::StepperConfig;
pub use token::{Lookahead, Payload, Token};
