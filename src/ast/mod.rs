//! The AST construction pipeline: folds a parse forest (from [`crate::parser`])
//! into a typed abstract syntax tree.

pub mod left_recursive;
pub mod node;
pub mod result;
pub mod table;

pub use left_recursive::{left_recursive, to_ast};
pub use node::Node;
pub use result::AstResult;
pub use table::{Make, Step};
