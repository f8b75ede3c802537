// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core front-end for the Plume scripting language.
//!
//! Plume is a small Perl-inspired scripting language. This crate is its
//! language front-end: it turns source text into an abstract syntax
//! tree through a three-stage, pull-based pipeline (tokenizer → lexer →
//! parser). Later phases (analysis, execution) build on the AST and
//! live elsewhere.
//!
//! Two guarantees shape the whole design:
//!
//! - **Totality.** Parsing never fails and never panics. Malformed
//!   input degrades to a partial tree with [`ast::Node::Error`] nodes
//!   at the smallest scope that can absorb each failure.
//! - **Determinism.** The same input always yields the same tree, and
//!   the serialized form of that tree is byte-identical across runs,
//!   which is what external snapshot tooling diffs against.
//!
//! # Quick start
//!
//! ```
//! use plume_core::source_analysis::parse;
//!
//! let nodes = parse("my $x = 2 + 3 * 4;");
//! assert_eq!(nodes.len(), 1);
//! assert!(!nodes[0].contains_error());
//! ```

pub mod ast;
pub mod source_analysis;

pub use ast::Node;
pub use source_analysis::{parse, parse_chunks, tokenize};
