// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Token classification.
//!
//! The second pipeline stage reclassifies each [`Token`] into the
//! semantic [`LexemeCategory`] that drives parser dispatch. Classification
//! is a pure, total, stateless function of the token's kind and value:
//! consuming N tokens always yields exactly N lexemes, in order.
//!
//! The interesting partitions live here:
//! - sigil character → scalar / array / hash variable
//! - keyword → declaration keyword vs control keyword
//! - operator → assignment operator vs binary operator

use ecow::EcoString;

use super::{Token, TokenKind};

/// Keywords that introduce a binding or definition.
const DECLARATION_KEYWORDS: &[&str] = &[
    "my", "our", "local", "sub", "class", "field", "has", "method", "package",
];

/// Operators that assign to their left operand.
const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", ".=", "**=", "//=", "||=", "&&=",
];

/// The semantic category of a lexeme.
///
/// Categories collapse token values the parser treats identically
/// (every literal shape is `Literal`) and split token kinds the parser
/// treats differently (`Operator` becomes `BinOp` or `AssignOp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeCategory {
    /// Number, string, or boolean literal.
    Literal,
    /// A regex literal.
    Regex,
    /// A composite `qw(...)` quote-word literal.
    QuoteWords,
    /// A `$`-sigil variable.
    ScalarVar,
    /// An `@`-sigil variable.
    ArrayVar,
    /// A `%`-sigil variable.
    HashVar,
    /// Any operator that is not an assignment operator.
    BinOp,
    /// `=` and the compound assignment operators.
    AssignOp,
    /// A control-flow or builtin-statement keyword.
    Control,
    /// A keyword introducing a binding (`my`, `sub`, `class`, …).
    Declaration,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Terminator,
    /// A bareword identifier.
    Identifier,
    /// Unscannable input carried through for error recovery.
    Unknown,
}

/// A token annotated with its semantic category.
///
/// One lexeme per token; the underlying token is preserved so the parser
/// retains the raw text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    /// The semantic category driving parser dispatch.
    pub category: LexemeCategory,
    /// The underlying token.
    pub token: Token,
}

impl Lexeme {
    /// Classifies a token. Pure and total: every token maps to exactly
    /// one category, and identical tokens always map to the same one.
    #[must_use]
    pub fn classify(token: Token) -> Self {
        let category = match token.kind {
            TokenKind::Number | TokenKind::String => LexemeCategory::Literal,
            TokenKind::Regex => LexemeCategory::Regex,
            TokenKind::Variable => match token.value.chars().next() {
                Some('@') => LexemeCategory::ArrayVar,
                Some('%') => LexemeCategory::HashVar,
                _ => LexemeCategory::ScalarVar,
            },
            TokenKind::Operator => {
                if ASSIGNMENT_OPERATORS.contains(&token.value.as_str()) {
                    LexemeCategory::AssignOp
                } else {
                    LexemeCategory::BinOp
                }
            }
            TokenKind::Keyword => classify_keyword(&token.value),
            TokenKind::Identifier => LexemeCategory::Identifier,
            TokenKind::LParen => LexemeCategory::LParen,
            TokenKind::RParen => LexemeCategory::RParen,
            TokenKind::LBrace => LexemeCategory::LBrace,
            TokenKind::RBrace => LexemeCategory::RBrace,
            TokenKind::LBracket => LexemeCategory::LBracket,
            TokenKind::RBracket => LexemeCategory::RBracket,
            TokenKind::Terminator => LexemeCategory::Terminator,
            TokenKind::Unknown => LexemeCategory::Unknown,
        };
        Self { category, token }
    }

    /// Returns `true` if this lexeme is an operator with exactly this text.
    #[must_use]
    pub fn is_op(&self, op: &str) -> bool {
        matches!(
            self.category,
            LexemeCategory::BinOp | LexemeCategory::AssignOp
        ) && self.token.value == op
    }

    /// Returns `true` if this lexeme is a control keyword with this text.
    #[must_use]
    pub fn is_control(&self, word: &str) -> bool {
        self.category == LexemeCategory::Control && self.token.value == word
    }

    /// Returns `true` if this lexeme is a declaration keyword with this text.
    #[must_use]
    pub fn is_declaration(&self, word: &str) -> bool {
        self.category == LexemeCategory::Declaration && self.token.value == word
    }

    /// The lexeme's raw text.
    #[must_use]
    pub fn value(&self) -> &EcoString {
        &self.token.value
    }
}

/// Categorizes a keyword token's value.
///
/// `true`/`false` are literal keywords, quote-word composites keep their
/// own category, declaration keywords introduce bindings, and everything
/// else (control flow, builtin statement forms) is `Control`.
fn classify_keyword(value: &str) -> LexemeCategory {
    if value == "true" || value == "false" {
        return LexemeCategory::Literal;
    }
    if value.starts_with("qw") && value.len() > 2 {
        return LexemeCategory::QuoteWords;
    }
    if DECLARATION_KEYWORDS.contains(&value) {
        return LexemeCategory::Declaration;
    }
    LexemeCategory::Control
}

/// Iterator adapter classifying a token stream into a lexeme stream.
///
/// Strictly one-to-one and order-preserving; pulls from its upstream only
/// when its own consumer asks for the next lexeme.
#[derive(Debug)]
pub struct Lexemes<I> {
    tokens: I,
}

impl<I> Lexemes<I>
where
    I: Iterator<Item = Token>,
{
    /// Wraps a token stream.
    #[must_use]
    pub fn new(tokens: I) -> Self {
        Self { tokens }
    }
}

impl<I> Iterator for Lexemes<I>
where
    I: Iterator<Item = Token>,
{
    type Item = Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next().map(Lexeme::classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_analysis::{Position, Tokenizer};

    fn classify_one(kind: TokenKind, value: &str) -> LexemeCategory {
        Lexeme::classify(Token::new(kind, value, Position::START)).category
    }

    #[test]
    fn sigils_partition_variables() {
        assert_eq!(
            classify_one(TokenKind::Variable, "$x"),
            LexemeCategory::ScalarVar
        );
        assert_eq!(
            classify_one(TokenKind::Variable, "@items"),
            LexemeCategory::ArrayVar
        );
        assert_eq!(
            classify_one(TokenKind::Variable, "%opts"),
            LexemeCategory::HashVar
        );
        assert_eq!(
            classify_one(TokenKind::Variable, "$_"),
            LexemeCategory::ScalarVar
        );
    }

    #[test]
    fn operators_partition_into_binop_and_assignop() {
        for op in ["=", "+=", ".=", "//=", "||=", "**="] {
            assert_eq!(
                classify_one(TokenKind::Operator, op),
                LexemeCategory::AssignOp,
                "{op} should be an assignment operator"
            );
        }
        for op in ["==", "!=", "<=", "&&", "**", "//", "=~", "..", "->", ","] {
            assert_eq!(
                classify_one(TokenKind::Operator, op),
                LexemeCategory::BinOp,
                "{op} should be a binary operator"
            );
        }
    }

    #[test]
    fn keywords_partition_into_declaration_and_control() {
        for word in ["my", "our", "local", "sub", "class", "field", "method"] {
            assert_eq!(
                classify_one(TokenKind::Keyword, word),
                LexemeCategory::Declaration
            );
        }
        for word in ["if", "unless", "while", "until", "foreach", "return", "print"] {
            assert_eq!(
                classify_one(TokenKind::Keyword, word),
                LexemeCategory::Control
            );
        }
    }

    #[test]
    fn literal_keywords() {
        assert_eq!(
            classify_one(TokenKind::Keyword, "true"),
            LexemeCategory::Literal
        );
        assert_eq!(
            classify_one(TokenKind::Keyword, "false"),
            LexemeCategory::Literal
        );
        assert_eq!(
            classify_one(TokenKind::Keyword, "qw(a b)"),
            LexemeCategory::QuoteWords
        );
    }

    #[test]
    fn delimiters_pass_through() {
        assert_eq!(classify_one(TokenKind::LParen, "("), LexemeCategory::LParen);
        assert_eq!(classify_one(TokenKind::RBrace, "}"), LexemeCategory::RBrace);
        assert_eq!(
            classify_one(TokenKind::Terminator, ";"),
            LexemeCategory::Terminator
        );
        assert_eq!(
            classify_one(TokenKind::Unknown, "`"),
            LexemeCategory::Unknown
        );
    }

    #[test]
    fn one_lexeme_per_token_in_order() {
        let tokens: Vec<Token> = Tokenizer::new("my $x = 1 + 2;").collect();
        let lexemes: Vec<Lexeme> = Lexemes::new(tokens.clone().into_iter()).collect();
        assert_eq!(tokens.len(), lexemes.len());
        for (token, lexeme) in tokens.iter().zip(&lexemes) {
            assert_eq!(token, &lexeme.token);
        }
    }
}
