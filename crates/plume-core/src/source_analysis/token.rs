// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Token types produced by the tokenizer.
//!
//! A [`Token`] pairs a [`TokenKind`] with the raw source text it was
//! scanned from and the position of its first character. Tokens are
//! immutable once produced and are cheap to clone ([`EcoString`] for the
//! text).
//!
//! The tokenizer is deliberately coarse: it only distinguishes the shapes
//! a character-level scanner can see. Finer semantic categories (binary
//! operator vs assignment operator, declaration keyword vs control
//! keyword) are assigned later by [`Lexeme::classify`].
//!
//! [`Lexeme::classify`]: super::Lexeme::classify

use ecow::EcoString;

use super::Position;

/// The kind of token, without its text or location.
///
/// One variant per scanner-level shape. Ambiguities the scanner cannot
/// resolve stay conservative: a `/` in expression position always becomes
/// [`TokenKind::Regex`], and anything unscannable becomes
/// [`TokenKind::Unknown`] rather than a hard failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A numeric literal: `42`, `3.14`, `1e10`
    Number,
    /// A string literal (either quote style), text without the quotes.
    String,
    /// A sigil-prefixed variable: `$x`, `@items`, `%opts`, `$_`
    Variable,
    /// An operator, always the longest match: `==`, `//=`, `->`, `..`
    Operator,
    /// A reserved word: `my`, `if`, `sub`, … including composite
    /// quote-word literals (`qw(a b c)` is one `Keyword` token).
    Keyword,
    /// A bareword identifier: `foo`, `List::Util`
    Identifier,
    /// Left parenthesis: `(`
    LParen,
    /// Right parenthesis: `)`
    RParen,
    /// Left brace: `{`
    LBrace,
    /// Right brace: `}`
    RBrace,
    /// Left bracket: `[`
    LBracket,
    /// Right bracket: `]`
    RBracket,
    /// Statement terminator: `;`
    Terminator,
    /// A regex literal scanned in expression position: `/pat/flags`
    Regex,
    /// Unscannable input, preserved verbatim for error recovery.
    Unknown,
}

impl TokenKind {
    /// Returns `true` if this kind marks an opening delimiter.
    #[must_use]
    pub const fn is_opening(self) -> bool {
        matches!(self, Self::LParen | Self::LBrace | Self::LBracket)
    }

    /// Returns `true` if this kind marks a closing delimiter.
    #[must_use]
    pub const fn is_closing(self) -> bool {
        matches!(self, Self::RParen | Self::RBrace | Self::RBracket)
    }

    /// Returns `true` if this is an error token.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// A token with its raw text and source position.
///
/// `value` holds the text the parser needs: the literal content for
/// strings (quotes stripped), the full raw form for regexes and
/// quote-word literals, and the verbatim source text for everything else.
/// `position` is always the token's **start**.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The token's text (see type-level docs for per-kind conventions).
    pub value: EcoString,
    /// Position of the token's first character.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<EcoString>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Returns `true` if this token is an operator with exactly this text.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.value == op
    }

    /// Returns `true` if this token is a keyword with exactly this text.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == word
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String => write!(f, "\"{}\"", self.value),
            TokenKind::Unknown => write!(f, "<unknown: {}>", self.value),
            _ => write!(f, "{}", self.value),
        }
    }
}
