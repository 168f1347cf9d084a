//! End-to-end shift/reduce + AST construction scenarios for a tiny
//! `EXPR := NUM | EXPR PLUS NUM` grammar.

mod common;

use std::fmt;

use bottomup::ast::left_recursive;
use bottomup::{Action, Kind, Lookahead, Oracle, ParseError, ParseErrorReason, Parser, Rule, Stack, Token, UnexpectedToken};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
enum TokKind {
    Eof,
    Num,
    Plus,
    Expr,
}

impl fmt::Display for TokKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Kind for TokKind {
    const EOF: Self = TokKind::Eof;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
enum NodeKind {
    Eof,
    Num,
    Plus,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Kind for NodeKind {
    const EOF: Self = NodeKind::Eof;
}

fn num(at: usize, text: &str) -> Token<TokKind> {
    Token::leaf(TokKind::Num, at, text, None)
}
fn plus(at: usize) -> Token<TokKind> {
    Token::leaf(TokKind::Plus, at, "+", None)
}
fn eof(at: usize) -> Token<TokKind> {
    Token::leaf(TokKind::Eof, at, "", None)
}

fn r1() -> Rule<TokKind> {
    Rule::new(TokKind::Expr, vec![TokKind::Num])
}
fn r2() -> Rule<TokKind> {
    Rule::new(TokKind::Expr, vec![TokKind::Num, TokKind::Plus, TokKind::Expr])
}
fn r_start() -> Rule<TokKind> {
    Rule::new(TokKind::Expr, vec![TokKind::Expr])
}

/// `EXPR := NUM | EXPR PLUS NUM`, wrapped by an augmented start rule on accept.
struct ExprOracle;
impl Oracle<TokKind> for ExprOracle {
    fn decide(&mut self, stack: &mut Stack<TokKind>, lookahead: Option<Lookahead<TokKind>>) -> Result<Action<TokKind>, String> {
        match stack.peek().map(Token::kind) {
            Some(TokKind::Num) => {
                stack.pop();
                let below = stack.peek().map(Token::kind);
                match below {
                    Some(TokKind::Plus) => Ok(Action::Reduce(r2())),
                    _ => Ok(Action::Reduce(r1())),
                }
            }
            Some(TokKind::Plus) => Ok(Action::Shift),
            Some(TokKind::Expr) => match lookahead.map(|l| l.kind) {
                None | Some(TokKind::Eof) => Ok(Action::Accept(r_start())),
                Some(TokKind::Plus) => Ok(Action::Shift),
                _ => Err("unexpected lookahead after EXPR".to_string()),
            },
            _ => Err("no decision".to_string()),
        }
    }
}

/// An oracle that only knows `R1`: it reduces every `NUM` on its own, but has no
/// rule for combining two `EXPR`s (it doesn't know `R2` exists), and blindly tries
/// `R1` against whatever else shows up on top of the stack.
struct OnlyR1Oracle;
impl Oracle<TokKind> for OnlyR1Oracle {
    fn decide(&mut self, stack: &mut Stack<TokKind>, lookahead: Option<Lookahead<TokKind>>) -> Result<Action<TokKind>, String> {
        match stack.peek().map(Token::kind) {
            Some(TokKind::Num) => Ok(Action::Reduce(r1())),
            Some(TokKind::Expr) => match lookahead.map(|l| l.kind) {
                None | Some(TokKind::Eof) => Err("no rule combines two adjacent EXPRs".to_string()),
                _ => Ok(Action::Shift),
            },
            _ => Ok(Action::Reduce(r1())),
        }
    }
}

#[test]
fn single_number_via_augmented_start_rule() {
    common::init_logger();
    let tokens = bottomup::token::prepare_input_stream(vec![num(0, "1"), eof(1)]);
    let mut parser = Parser::new(ExprOracle);
    let forest = parser.full_parse(tokens);

    assert!(parser.err.is_none());
    assert_eq!(forest.len(), 1);
    let inner = &forest[0].children().unwrap()[0];
    assert_eq!(inner.kind(), TokKind::Expr);
    assert_eq!(inner.children().unwrap()[0].kind(), TokKind::Num);
    assert_eq!(inner.children().unwrap()[0].text(), Some("1"));
}

#[test]
fn addition_combines_left_to_right() {
    common::init_logger();
    let tokens = bottomup::token::prepare_input_stream(vec![num(0, "1"), plus(1), num(2, "2"), eof(3)]);
    let mut parser = Parser::new(ExprOracle);
    let forest = parser.full_parse(tokens);

    assert!(parser.err.is_none());
    let addition = &forest[0].children().unwrap()[0];
    let children = addition.children().unwrap();
    assert_eq!(children[0].kind(), TokKind::Expr);
    assert_eq!(children[0].children().unwrap()[0].text(), Some("1"));
    assert_eq!(children[1].kind(), TokKind::Plus);
    assert_eq!(children[2].kind(), TokKind::Num);
    assert_eq!(children[2].text(), Some("2"));
}

#[test]
fn unknown_rule_surfaces_unexpected_token() {
    common::init_logger();
    let tokens = bottomup::token::prepare_input_stream(vec![plus(0), num(1, "1"), eof(2)]);
    let mut parser = Parser::new(OnlyR1Oracle);
    let _forest = parser.full_parse(tokens);

    match parser.err {
        Some(ParseError {
            at: 0,
            reason: ParseErrorReason::UnexpectedToken(UnexpectedToken { expected, got: Some(TokKind::Plus), .. }),
            ..
        }) => assert_eq!(expected, vec![TokKind::Num]),
        other => panic!("expected UnexpectedToken at byte 0, got {:?}", other.map(|e| e.to_string())),
    }
}

#[test]
fn oracle_stuck_after_reducing_both_numbers_leaves_partial_forest() {
    common::init_logger();
    let tokens = bottomup::token::prepare_input_stream(vec![num(0, "1"), num(1, "2"), eof(2)]);
    let mut parser = Parser::new(OnlyR1Oracle);
    let forest = parser.full_parse(tokens);

    assert!(parser.err.is_some());
    // Stack was [EXPR(1), EXPR(2)] when the oracle ran out of ideas; forest
    // extraction pops top-first.
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children().unwrap()[0].text(), Some("2"));
    assert_eq!(forest[1].children().unwrap()[0].text(), Some("1"));
}

#[test]
fn empty_input_reports_no_tokens() {
    common::init_logger();
    let mut parser = Parser::new(ExprOracle);
    let forest = parser.full_parse(vec![]);

    assert!(forest.is_empty());
    assert!(matches!(
        parser.err,
        Some(ParseError {
            at: 0,
            reason: ParseErrorReason::NoTokens,
            ..
        })
    ));
}

#[test]
fn left_recursive_chain_yields_one_ast_node_per_addition() {
    common::init_logger();
    let tokens = bottomup::token::prepare_input_stream(vec![
        num(0, "1"),
        plus(1),
        num(2, "2"),
        plus(3),
        num(4, "3"),
        eof(5),
    ]);
    let mut parser = Parser::new(ExprOracle);
    let forest = parser.full_parse(tokens);
    assert!(parser.err.is_none());

    // Unwrap the augmented start rule's single layer to reach the real root.
    let root = &forest[0].children().unwrap()[0];

    let arena = bottomup::Arena::new();
    let mut calls = 0;
    let nodes = left_recursive::<TokKind, NodeKind, _>(root, TokKind::Expr, |children| {
        calls += 1;
        let node = arena.alloc(bottomup::ast::Node::new(NodeKind::Plus, format!("{} children", children.len())));
        Ok(vec![node])
    })
    .unwrap();

    assert_eq!(calls, 3);
    assert_eq!(nodes.len(), 3);
}
