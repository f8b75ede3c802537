// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source analysis: tokenization, classification, and parsing.
//!
//! The pipeline has three pull-based stages, each a lazy iterator over
//! its upstream:
//!
//! 1. [`Tokenizer`] turns source-text chunks into [`Token`]s,
//! 2. [`Lexemes`] classifies each token into a [`Lexeme`],
//! 3. [`Parser`] builds one AST [`Node`] per top-level statement.
//!
//! No stage does work until its consumer asks for the next item, so
//! stopping iteration at any point cancels the whole pipeline. Every
//! stage recovers from malformed input; the output tree contains
//! [`Node::Error`] nodes instead of the pipeline ever failing.
//!
//! The compositional form is public for streaming use:
//!
//! ```
//! use plume_core::source_analysis::{Lexemes, Parser, Tokenizer};
//!
//! let tokenizer = Tokenizer::new("my $x = 1; my $y = 2;");
//! let mut parser = Parser::new(Lexemes::new(tokenizer));
//! let first = parser.next();
//! assert!(first.is_some());
//! // Dropping the parser here cancels the rest of the pipeline
//! ```
//!
//! [`Node`]: crate::ast::Node
//! [`Node::Error`]: crate::ast::Node::Error

mod error;
mod lexeme;
mod parser;
mod position;
mod token;
mod tokenizer;

pub use error::{LexicalError, LexicalErrorKind, SyntaxError, SyntaxErrorKind};
pub use lexeme::{Lexeme, LexemeCategory, Lexemes};
pub use parser::Parser;
pub use position::Position;
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

use crate::ast::Node;

/// Parses complete source text into one node per top-level statement.
///
/// Never fails: malformed input produces [`Node::Error`] nodes inline.
///
/// [`Node::Error`]: crate::ast::Node::Error
#[must_use]
pub fn parse(source: &str) -> Vec<Node> {
    tracing::debug!(bytes = source.len(), "parsing source");
    Parser::from_source(source).collect()
}

/// Parses source text delivered as an arbitrary sequence of chunks.
///
/// Chunk boundaries never affect the result.
#[must_use]
pub fn parse_chunks(chunks: impl IntoIterator<Item = String>) -> Vec<Node> {
    Parser::new(Lexemes::new(Tokenizer::from_chunks(chunks.into_iter()))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_parse_chunks_agree() {
        let source = "my $total = 0;\nforeach my $n (1..10) { $total = $total + $n; }\n";
        let whole = parse(source);
        let halves = parse_chunks([source[..20].to_string(), source[20..].to_string()]);
        assert_eq!(whole, halves);
    }

    #[test]
    fn pipeline_output_is_serializable() {
        let nodes = parse("print \"hello\";");
        let json = crate::ast::to_json_pretty(&nodes).unwrap();
        assert!(json.contains("\"type\": \"Print\""));
    }
}
