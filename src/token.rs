//! The generic parse token tree produced by the shift/reduce engine.

use crate::kind::Kind;

/// A lightweight view of the token that follows another token in the original
/// stream, used by oracles to decide shift vs. reduce without consuming input.
///
/// The design-level spec describes this as `Option<&T>` (a borrow of the next
/// token). Storing a real borrow here would make [`Token`] self-referential once
/// tokens are moved between the parser's `input`/`stack`/`popped` slices, so this
/// crate instead stores the two fields an oracle actually needs - the next token's
/// `kind` and source position - by value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Lookahead<K: Kind> {
    /// The kind of the following token.
    pub kind: K,
    /// The byte offset at which the following token begins.
    pub at: usize,
}

/// The payload of a [`Token`]: either literal source text (a leaf produced by the
/// lexer) or an ordered list of children (an interior token produced by a reduction).
#[derive(Debug, Clone)]
pub enum Payload<K: Kind> {
    /// The literal source text of a leaf token.
    Literal(String),
    /// The ordered children of an interior token, left-to-right.
    Branch(Vec<Token<K>>),
}

/// A node in the parse forest: either a leaf carrying source text, or an interior
/// token synthesized by a reduction, owning its children in left-to-right order.
#[derive(Debug, Clone)]
pub struct Token<K: Kind> {
    kind: K,
    at: usize,
    lookahead: Option<Lookahead<K>>,
    payload: Payload<K>,
}

impl<K: Kind> Token<K> {
    /// Builds a leaf token carrying literal text.
    pub fn leaf(kind: K, at: usize, text: impl Into<String>, lookahead: Option<Lookahead<K>>) -> Self {
        Token {
            kind,
            at,
            lookahead,
            payload: Payload::Literal(text.into()),
        }
    }

    /// Builds an interior token from an ordered, non-empty list of children.
    ///
    /// Panics if `children` is empty - interior tokens always own at least one
    /// child (the invariant that made them interior in the first place).
    pub fn branch(kind: K, at: usize, lookahead: Option<Lookahead<K>>, children: Vec<Token<K>>) -> Self {
        assert!(!children.is_empty(), "an interior token must have at least one child");
        Token {
            kind,
            at,
            lookahead,
            payload: Payload::Branch(children),
        }
    }

    /// This token's kind.
    pub fn kind(&self) -> K {
        self.kind
    }

    /// The byte offset in the source where this token begins.
    pub fn at(&self) -> usize {
        self.at
    }

    /// A view of the token that follows this one in the original stream, if any.
    pub fn lookahead(&self) -> Option<Lookahead<K>> {
        self.lookahead
    }

    /// This token's payload.
    pub fn payload(&self) -> &Payload<K> {
        &self.payload
    }

    /// The literal text of a leaf token, or `None` for an interior token.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Literal(s) => Some(s.as_str()),
            Payload::Branch(_) => None,
        }
    }

    /// The children of an interior token, or `None` for a leaf.
    pub fn children(&self) -> Option<&[Token<K>]> {
        match &self.payload {
            Payload::Literal(_) => None,
            Payload::Branch(children) => Some(children),
        }
    }

    /// `true` if this token is a leaf (carries literal text, no children).
    pub fn is_leaf(&self) -> bool {
        matches!(self.payload, Payload::Literal(_))
    }
}

/// Derives each token's [`Lookahead`] from the token that follows it in `tokens`,
/// leaving the last token's lookahead as `None`. This is the usual way a caller
/// turns a plain lexed sequence into the input stream [`crate::parser::Parser`]
/// expects, matching the "next token from the lexer's viewpoint" semantics.
pub fn prepare_input_stream<K: Kind>(mut tokens: Vec<Token<K>>) -> Vec<Token<K>> {
    for i in 0..tokens.len().saturating_sub(1) {
        let next = &tokens[i + 1];
        let lookahead = Lookahead {
            kind: next.kind,
            at: next.at,
        };
        tokens[i].lookahead = Some(lookahead);
    }
    tokens
}
