//! The shift/reduce parser engine: the core of this crate.

use std::collections::VecDeque;

use log::{debug, trace, warn};

use crate::action::Action;
use crate::error::{ParseError, ParseErrorReason, UnexpectedToken};
use crate::kind::Kind;
use crate::rule::Rule;
use crate::stepper::{self, StepperConfig};
use crate::token::{Lookahead, Token};

/// The mutable state an oracle inspects and mutates while deciding an [`Action`]:
/// the unconsumed input queue, the shifted-token stack, and the "popped since the
/// last `accept()`" staging region.
///
/// Split out from [`Parser`] so that `oracle.decide(&mut stack, ..)` and
/// `self.oracle` can be borrowed independently of one another.
#[derive(Debug, Default)]
pub struct Stack<K: Kind> {
    input: VecDeque<Token<K>>,
    stack: Vec<Token<K>>,
    popped: Vec<Token<K>>,
}

impl<K: Kind> Stack<K> {
    fn new() -> Self {
        Stack {
            input: VecDeque::new(),
            stack: Vec::new(),
            popped: Vec::new(),
        }
    }

    fn set_input(&mut self, tokens: Vec<Token<K>>) {
        self.input = tokens.into();
        self.stack.clear();
        self.popped.clear();
    }

    /// Returns a read-only view of the current top of `stack` - the token that
    /// would be removed by the next `pop()`. Tokens already staged in `popped`
    /// are considered consumed, not peekable; to look further down the stack,
    /// callers `pop()` the current top and `peek()` again.
    pub fn peek(&self) -> Option<&Token<K>> {
        self.stack.last()
    }

    /// Moves the top of `stack` into `popped`, returning a reference to the
    /// token that was just moved.
    pub fn pop(&mut self) -> Option<&Token<K>> {
        let tok = self.stack.pop()?;
        self.popped.push(tok);
        trace!("pop -> popped.len() = {}", self.popped.len());
        self.popped.last()
    }

    /// Consumes one token from `input`, pushing it onto `stack`. Returns `false`
    /// (a no-op) if `input` was already empty.
    pub fn shift(&mut self) -> bool {
        match self.input.pop_front() {
            Some(tok) => {
                trace!("shift {:?}", tok.kind());
                self.stack.push(tok);
                true
            }
            None => {
                trace!("shift: no input left");
                false
            }
        }
    }

    /// Pushes a token directly onto `stack` (used by `apply_reduce` to push the
    /// synthesized parent token).
    pub fn push(&mut self, token: Token<K>) {
        trace!("push {:?}", token.kind());
        self.stack.push(token);
    }

    /// Undoes every `pop()` since the last `accept()`/`refuse()`, restoring
    /// `stack` to what it contained beforehand.
    pub fn refuse(&mut self) {
        if !self.popped.is_empty() {
            trace!("refuse: restoring {} popped token(s)", self.popped.len());
        }
        while let Some(tok) = self.popped.pop() {
            self.stack.push(tok);
        }
    }

    /// Commits every `pop()` since the last `accept()`/`refuse()`: `popped` is
    /// discarded and `stack` is left as-is (already missing those tokens).
    pub fn accept(&mut self) {
        if !self.popped.is_empty() {
            trace!("accept: discarding {} popped token(s)", self.popped.len());
        }
        self.popped.clear();
    }

    /// A snapshot of `popped`, top-of-stack-first (i.e. reversed from pop order).
    pub fn popped_snapshot(&self) -> Vec<Token<K>> {
        self.popped.iter().cloned().rev().collect()
    }

    /// `true` if there is no more input to shift.
    pub fn is_input_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// The unconsumed input tokens, front-to-back.
    pub fn input(&self) -> &VecDeque<Token<K>> {
        &self.input
    }

    /// The shifted-token stack, bottom-to-top.
    pub fn stack(&self) -> &[Token<K>] {
        &self.stack
    }

    /// Pops every remaining stack entry and returns them in pop order (top
    /// first). Leaves `stack` empty.
    fn extract_forest(&mut self) -> Vec<Token<K>> {
        let mut forest = Vec::with_capacity(self.stack.len());
        while let Some(tok) = self.stack.pop() {
            forest.push(tok);
        }
        forest
    }
}

/// Caller-supplied decision procedure. Given the current stack/input state and the
/// lookahead of the current top-of-stack token, decides the next [`Action`].
///
/// Implementations may call [`Stack::pop`]/[`Stack::peek`] freely to inspect several
/// stack entries - the engine automatically [`Stack::refuse`]s before dispatching the
/// chosen action, so oracles never need to restore state themselves.
pub trait Oracle<K: Kind> {
    /// Decides the next action given the current stack/input state.
    fn decide(&mut self, stack: &mut Stack<K>, lookahead: Option<Lookahead<K>>) -> Result<Action<K>, String>;
}

/// Drives a shift/reduce parse to completion against a caller-supplied [`Oracle`].
pub struct Parser<K: Kind, O: Oracle<K>> {
    stack: Stack<K>,
    oracle: O,
    /// Set once `full_parse` encounters an unrecoverable error.
    pub err: Option<ParseError<K>>,
    /// The most recently committed action, for debug rendering only.
    pub last_action: Option<Action<K>>,
}

impl<K: Kind, O: Oracle<K>> Parser<K, O> {
    /// Creates a parser that will consult `oracle` for every decision.
    pub fn new(oracle: O) -> Self {
        Parser {
            stack: Stack::new(),
            oracle,
            err: None,
            last_action: None,
        }
    }

    /// Resets all state (stack, input, popped, error) and adopts `tokens` as the
    /// new input queue. The tokens previously held are dropped.
    pub fn set_input(&mut self, tokens: Vec<Token<K>>) {
        self.stack.set_input(tokens);
        self.err = None;
        self.last_action = None;
    }

    /// Peek at the current top-of-stack token.
    pub fn peek(&self) -> Option<&Token<K>> {
        self.stack.peek()
    }

    /// Pop the current top-of-stack token into the `popped` staging region.
    pub fn pop(&mut self) -> Option<&Token<K>> {
        self.stack.pop()
    }

    /// Shift one token from input onto the stack.
    pub fn shift(&mut self) -> bool {
        self.stack.shift()
    }

    /// Push a token directly onto the stack.
    pub fn push(&mut self, token: Token<K>) {
        self.stack.push(token)
    }

    /// Undo every pop since the last accept/refuse.
    pub fn refuse(&mut self) {
        self.stack.refuse()
    }

    /// Commit every pop since the last accept/refuse.
    pub fn accept(&mut self) {
        self.stack.accept()
    }

    /// A snapshot of popped tokens, top-of-stack-first.
    pub fn popped_snapshot(&self) -> Vec<Token<K>> {
        self.stack.popped_snapshot()
    }

    /// Runs a full shift/reduce parse over `tokens`, returning the resulting
    /// forest. On failure, `self.err` is set and the forest returned is whatever
    /// remained on the stack.
    pub fn full_parse(&mut self, tokens: Vec<Token<K>>) -> Vec<Token<K>> {
        self.run(tokens, None)
    }

    /// Like [`Parser::full_parse`], but renders the parser's state via the debug
    /// stepper between every transition.
    pub fn full_parse_with_steps(&mut self, tokens: Vec<Token<K>>, source: &[u8], tab_size: i32) -> Vec<Token<K>> {
        let config = StepperConfig {
            tab_size,
            ..StepperConfig::default()
        };
        self.run(tokens, Some((source, config)))
    }

    fn run(&mut self, tokens: Vec<Token<K>>, debug: Option<(&[u8], StepperConfig)>) -> Vec<Token<K>> {
        self.set_input(tokens);

        if let Some((source, config)) = &debug {
            self.render_step("Initial State", source, config);
        }

        if self.stack.input.is_empty() {
            warn!("full_parse called with no tokens");
            self.err = Some(ParseError::new(0, ParseErrorReason::NoTokens));
            if let Some((source, config)) = &debug {
                self.render_step("Final State", source, config);
            }
            return self.stack.extract_forest();
        }
        self.stack.shift();

        loop {
            if self.err.is_some() {
                break;
            }

            let top = match self.stack.peek() {
                Some(tok) => tok,
                None => {
                    self.err = Some(ParseError::new(
                        0,
                        ParseErrorReason::Undecidable("stack unexpectedly empty".to_string()),
                    ));
                    break;
                }
            };
            let top_at = top.at();
            let lookahead = top.lookahead();

            if let Some((source, config)) = &debug {
                self.render_step("Before Decision", source, config);
            }

            let action = match self.oracle.decide(&mut self.stack, lookahead) {
                Ok(action) => action,
                Err(reason) => {
                    warn!("oracle error at byte {}: {}", top_at, reason);
                    self.stack.refuse();
                    self.err = Some(ParseError::new(top_at, ParseErrorReason::Undecidable(reason)));
                    break;
                }
            };
            self.stack.refuse();
            self.last_action = Some(action.clone());
            debug!("committed action: {}", action.describe());

            if let Some((source, config)) = &debug {
                self.render_step("After Decision", source, config);
            }

            match action {
                Action::Shift => {
                    self.stack.shift();
                }
                Action::Reduce(rule) => {
                    if let Err(e) = self.apply_reduce(&rule) {
                        self.err = Some(e);
                    }
                }
                Action::Accept(rule) => match self.apply_reduce(&rule) {
                    Ok(()) => break,
                    Err(e) => self.err = Some(e),
                },
            }

            if let Some((source, config)) = &debug {
                self.render_step("After Apply", source, config);
            }
        }

        self.stack.refuse();
        let forest = self.stack.extract_forest();

        if let Some((source, config)) = &debug {
            self.render_step("Final State", source, config);
        }

        forest
    }

    fn render_step(&self, title: &str, source: &[u8], config: &StepperConfig) {
        stepper::step(
            title,
            self.stack.stack(),
            self.stack.input(),
            self.last_action.as_ref(),
            source,
            config,
        );
    }

    /// Pops `rule.rhs().len()` tokens off the stack (validating each against the
    /// rule's RHS, in pop order) and pushes a synthesized `rule.lhs()` token
    /// owning them as children.
    fn apply_reduce(&mut self, rule: &Rule<K>) -> Result<(), ParseError<K>> {
        let mut prev_kind: Option<K> = None;
        for &rhs_k in rule.rhs() {
            let top = self.stack.pop().map(|t| (t.kind(), t.at()));
            match top {
                None => {
                    return Err(ParseError::new(
                        0,
                        ParseErrorReason::UnexpectedToken(UnexpectedToken {
                            expected: vec![rhs_k],
                            got: None,
                            after: prev_kind,
                        }),
                    ));
                }
                Some((k, at)) if k != rhs_k => {
                    // The mismatched token is now staged in `popped`, along with
                    // whatever else this loop already popped. Leave it there -
                    // the caller's run loop does a final `refuse()` once `err`
                    // is observed, restoring the stack to its pre-reduce state
                    // rather than us unwinding it here.
                    return Err(ParseError::new(
                        at,
                        ParseErrorReason::UnexpectedToken(UnexpectedToken {
                            expected: vec![rhs_k],
                            got: Some(k),
                            after: prev_kind,
                        }),
                    ));
                }
                Some((k, _)) => prev_kind = Some(k),
            }
        }

        let popped = self.stack.popped_snapshot();
        self.stack.accept();

        let at = popped
            .first()
            .map(Token::at)
            .expect("rule RHS is non-empty, so popped is non-empty");
        let lookahead = popped.last().and_then(Token::lookahead);
        let parent = Token::branch(rule.lhs(), at, lookahead, popped);
        self.stack.push(parent);
        Ok(())
    }
}
