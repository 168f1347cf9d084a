//! The contract that token kinds (and AST node kinds) must satisfy.

use std::fmt::Display;

/// A finite, totally-ordered, displayable classifier for parse tokens or AST nodes.
///
/// Implementors are usually a `#[repr(...)]` enum with `EOF` as the first (ordinal `0`)
/// variant. `Ord` is required so kinds can be used as keys in sorted tables and so
/// [`Kind::quoted`] has a stable default, but the parser engine itself never compares
/// kinds by order - only by equality.
pub trait Kind: Copy + Eq + Ord + std::hash::Hash + Display + std::fmt::Debug {
    /// The distinguished end-of-input kind. Every token stream passed to the parser
    /// engine is expected to end with a token of this kind.
    const EOF: Self;

    /// The "quoted" form used in diagnostics, e.g. `"NUM"` -> `"\"NUM\""`.
    fn quoted(&self) -> String {
        format!("\"{}\"", self)
    }
}
