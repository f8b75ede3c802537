// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser with operator precedence climbing.
//!
//! The parser consumes a lazy [`Lexeme`] stream and produces one AST
//! [`Node`] per top-level statement, reading no further upstream than the
//! current statement requires. Consumers may simply stop iterating;
//! dropping the parser drops the whole upstream pipeline.
//!
//! # Error recovery
//!
//! Parsing never fails and never panics. Failures are absorbed at the
//! smallest grammatical scope that can hold them:
//!
//! 1. a defaultable slot (ternary branch, parameter default, list
//!    element) gets an [`Node::Error`] in just that slot;
//! 2. a failure that cannot be isolated abandons the current statement,
//!    yields a single [`Node::Error`] for it, and resynchronizes at the
//!    next statement boundary (`;`, `}`, or end of input);
//! 3. statements already produced are never discarded.
//!
//! Internally statement parsers return [`ParseResult`]; an `Err` is
//! always caught in [`Parser::parse_statement`] and rendered into an
//! error node. Nothing escapes the iterator as `Err`.

mod expressions;
mod statements;


use std::collections::VecDeque;

use crate::ast::Node;

use super::{Lexeme, LexemeCategory, Lexemes, Position, SyntaxError, Tokenizer};

/// Maximum expression/statement nesting depth.
///
/// Beyond this the parser emits an error node instead of recursing
/// further. Combined with `stacker::maybe_grow` this keeps deeply nested
/// input from overflowing the stack.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

/// Stack red zone for `stacker::maybe_grow`.
const STACK_RED_ZONE: usize = 32 * 1024;

/// Stack allocation size when growing.
const STACK_ALLOCATION: usize = 256 * 1024;

/// Result type for the internal statement-level parsers.
///
/// An `Err` never crosses the public API: `parse_statement` converts it
/// into an [`Node::Error`] after resynchronizing.
pub(crate) type ParseResult<T> = Result<T, SyntaxError>;

/// A parser over a lexeme stream.
///
/// Implements [`Iterator`]: each `next()` yields the AST for one
/// top-level statement, or `None` at end of input.
pub struct Parser<I> {
    /// Upstream lexeme producer.
    lexemes: I,
    /// Lexemes pulled but not yet consumed.
    lookahead: VecDeque<Lexeme>,
    /// Position just past the last consumed lexeme's start, used for
    /// end-of-input diagnostics.
    last_position: Position,
    /// Current nesting depth, bounded by [`MAX_NESTING_DEPTH`].
    depth: usize,
    /// Total lexemes consumed, used to guarantee forward progress.
    consumed: usize,
}

impl Parser<Lexemes<Tokenizer<std::iter::Once<String>>>> {
    /// Creates a parser over a complete source string, wiring up the full
    /// tokenizer → lexer → parser pipeline.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::new(Lexemes::new(Tokenizer::new(source)))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Lexeme>,
{
    /// Creates a parser over an arbitrary lexeme stream.
    #[must_use]
    pub fn new(lexemes: I) -> Self {
        Self {
            lexemes,
            lookahead: VecDeque::new(),
            last_position: Position::START,
            depth: 0,
            consumed: 0,
        }
    }

    /// Ensures at least `n` lexemes are buffered. Returns `false` if the
    /// stream ended first.
    fn fill(&mut self, n: usize) -> bool {
        while self.lookahead.len() < n {
            match self.lexemes.next() {
                Some(lexeme) => self.lookahead.push_back(lexeme),
                None => return false,
            }
        }
        true
    }

    /// Peeks at the next lexeme without consuming it.
    pub(crate) fn peek(&mut self) -> Option<&Lexeme> {
        self.fill(1);
        self.lookahead.front()
    }

    /// Peeks `n+1` lexemes ahead (`n == 0` is `peek`).
    pub(crate) fn peek_n(&mut self, n: usize) -> Option<&Lexeme> {
        self.fill(n + 1);
        self.lookahead.get(n)
    }

    /// Consumes and returns the next lexeme.
    pub(crate) fn advance(&mut self) -> Option<Lexeme> {
        self.fill(1);
        let lexeme = self.lookahead.pop_front()?;
        self.last_position = lexeme.token.position;
        self.consumed += 1;
        Some(lexeme)
    }

    /// Position of the next lexeme, or of the last consumed one at end of
    /// input.
    pub(crate) fn position(&mut self) -> Position {
        match self.peek() {
            Some(lexeme) => lexeme.token.position,
            None => self.last_position,
        }
    }

    /// Returns `true` if the next lexeme has this category.
    pub(crate) fn at_category(&mut self, category: LexemeCategory) -> bool {
        self.peek().is_some_and(|l| l.category == category)
    }

    /// Consumes the next lexeme if it has this category.
    pub(crate) fn eat_category(&mut self, category: LexemeCategory) -> bool {
        if self.at_category(category) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes the next lexeme if it is an operator with this text.
    pub(crate) fn eat_op(&mut self, op: &str) -> bool {
        if self.peek().is_some_and(|l| l.is_op(op)) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes the next lexeme if it is a control keyword with this text.
    pub(crate) fn eat_control(&mut self, word: &str) -> bool {
        if self.peek().is_some_and(|l| l.is_control(word)) {
            self.advance();
            return true;
        }
        false
    }

    /// Runs `f` one nesting level deeper, growing the stack if the red
    /// zone is near. Returns `None` when the depth guard trips.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return None;
        }
        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_ALLOCATION, || f(self));
        self.depth -= 1;
        Some(result)
    }

    /// Skips ahead to the next statement boundary: consumes through the
    /// next `;`, or stops before `}` or end of input.
    pub(crate) fn resync(&mut self) {
        loop {
            match self.peek() {
                None => break,
                Some(l) if l.category == LexemeCategory::Terminator => {
                    self.advance();
                    break;
                }
                Some(l) if l.category == LexemeCategory::RBrace => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Abandons the current statement: renders the error into an error
    /// node carrying the offending text and resynchronizes.
    pub(crate) fn recover(&mut self, error: SyntaxError) -> Node {
        let value = self
            .peek()
            .map(|l| l.token.value.clone())
            .unwrap_or_default();
        tracing::trace!(%error, "abandoning statement, resyncing to next boundary");
        self.resync();
        Node::from_syntax_error(&error, value)
    }
}

impl<I> Iterator for Parser<I>
where
    I: Iterator<Item = Lexeme>,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        // Stray terminators between statements produce no nodes
        while self.at_category(LexemeCategory::Terminator) {
            self.advance();
        }
        self.peek()?;

        let before = self.consumed;
        let node = self.parse_statement();
        // A statement must consume at least one lexeme
        if self.consumed == before {
            self.advance();
        }
        Some(node)
    }
}
