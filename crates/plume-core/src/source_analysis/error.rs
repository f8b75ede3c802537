// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error vocabulary for the parsing pipeline.
//!
//! Errors carry source positions for precise diagnostics and integrate
//! with [`miette`] for rich reporting. Nothing in the pipeline *returns*
//! these as `Err`: every error is rendered into an [`Error`] AST node so
//! that parsing always produces output. The types here exist so the
//! messages embedded in those nodes are constructed in one place and
//! stay consistent.
//!
//! [`Error`]: crate::ast::Node::Error

// Spurious warnings from miette derive macro expansion
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

use super::Position;

/// A lexical error encountered during tokenization.
///
/// The tokenizer uses error recovery, so lexical errors never stop the
/// pipeline: the offending input becomes an `Unknown` token and the
/// parser turns it into an `Error` node carrying this error's message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct LexicalError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexicalErrorKind,
    /// Where the offending input starts.
    pub position: Position,
}

impl LexicalError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexicalErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Creates an "unknown character" error.
    #[must_use]
    pub fn unknown_character(c: char, position: Position) -> Self {
        Self::new(LexicalErrorKind::UnknownCharacter(c), position)
    }

    /// Creates an "unterminated string" error for the given quote style.
    #[must_use]
    pub fn unterminated_string(quote: char, position: Position) -> Self {
        Self::new(LexicalErrorKind::UnterminatedString { quote }, position)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LexicalErrorKind {
    /// A character the tokenizer has no rule for (e.g. a backtick).
    #[error("Unknown character '{0}'")]
    #[diagnostic(code(plume::lex::unknown_character))]
    UnknownCharacter(char),

    /// A string literal reached end of input before its closing quote.
    ///
    /// The message names the missing quote character explicitly so the
    /// resulting `Error` node tells the user which quote to add.
    #[error("Unterminated string literal: missing closing {quote}")]
    #[diagnostic(code(plume::lex::unterminated_string))]
    UnterminatedString {
        /// The quote character that was never closed.
        quote: char,
    },

    /// A regex literal reached end of input before its closing slash.
    #[error("Unterminated regex literal: missing closing /")]
    #[diagnostic(code(plume::lex::unterminated_regex))]
    UnterminatedRegex,

    /// A `qw` literal reached end of input before its closing delimiter.
    #[error("Unterminated qw list: missing closing {delimiter}")]
    #[diagnostic(code(plume::lex::unterminated_qw))]
    UnterminatedQuoteWords {
        /// The delimiter character that was never closed.
        delimiter: char,
    },
}

/// A syntactic error encountered while building the AST.
///
/// Like lexical errors these are recovered, not thrown: the parser
/// substitutes an `Error` node at the smallest grammatical scope that
/// can absorb the failure and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic()]
pub struct SyntaxError {
    /// The kind of syntax error.
    #[source]
    pub kind: SyntaxErrorKind,
    /// Where the failure was detected.
    pub position: Position,
}

impl SyntaxError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

/// The kind of syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SyntaxErrorKind {
    /// A delimiter was opened but its closing counterpart never appeared.
    #[error("Missing closing '{delimiter}'")]
    #[diagnostic(code(plume::parse::missing_delimiter))]
    MissingClosingDelimiter {
        /// The closing delimiter that was expected.
        delimiter: char,
    },

    /// A control construct is missing its parenthesized condition.
    #[error("Expected condition after '{keyword}'")]
    #[diagnostic(code(plume::parse::missing_condition))]
    MissingCondition {
        /// The control keyword that needed a condition.
        keyword: &'static str,
    },

    /// A construct that requires a `{ ... }` body has none.
    #[error("Expected block after '{context}'")]
    #[diagnostic(code(plume::parse::missing_block))]
    MissingBlock {
        /// What the block was supposed to follow.
        context: &'static str,
    },

    /// A ternary is missing a branch or its `:` separator.
    #[error("Incomplete ternary: expected '{expected}'")]
    #[diagnostic(code(plume::parse::incomplete_ternary))]
    IncompleteTernary {
        /// The part that was missing.
        expected: &'static str,
    },

    /// A `sub` or `class` declaration is missing its name.
    #[error("Expected name after '{keyword}'")]
    #[diagnostic(code(plume::parse::missing_name))]
    MissingName {
        /// The declaring keyword.
        keyword: &'static str,
    },

    /// A parameter, field, or method declaration could not be parsed.
    #[error("Malformed {what} declaration")]
    #[diagnostic(code(plume::parse::malformed_declaration))]
    MalformedDeclaration {
        /// Which declaration form was malformed.
        what: &'static str,
    },

    /// A declarator was not followed by a variable.
    #[error("Expected variable after '{declarator}'")]
    #[diagnostic(code(plume::parse::missing_variable))]
    MissingVariable {
        /// The declarator keyword (`my`, `our`, `local`, …).
        declarator: &'static str,
    },

    /// A token appeared where an expression was required.
    #[error("Unexpected token '{found}'")]
    #[diagnostic(code(plume::parse::unexpected_token))]
    UnexpectedToken {
        /// The offending token text.
        found: ecow::EcoString,
    },

    /// The input ended in the middle of a construct.
    #[error("Unexpected end of input")]
    #[diagnostic(code(plume::parse::unexpected_eof))]
    UnexpectedEof,

    /// Expression nesting exceeded the parser's depth guard.
    #[error("Expression nesting is too deep")]
    #[diagnostic(code(plume::parse::nesting_too_deep))]
    NestingTooDeep,
}
