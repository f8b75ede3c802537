// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree for Plume programs.
//!
//! The parser produces one [`Node`] per top-level statement. A `Node` is a
//! tagged union over every syntactic construct; each variant carries only
//! the fields that construct needs. Nodes exclusively own their children
//! (a tree, never a graph) and are immutable once built.
//!
//! # Serialization
//!
//! The tree serializes through [`serde`] with a stable shape used by
//! snapshot-based regression tooling: the variant name becomes a `"type"`
//! tag, field names are camelCase, and optional fields are *absent* rather
//! than `null` when unset. Numeric and string literals store their
//! verbatim source text, so re-serializing a tree parsed from identical
//! input is byte-identical.
//!
//! # Error nodes
//!
//! Parsing never fails: malformed input becomes an [`Node::Error`] variant
//! inline in the tree, carrying a human-readable message, the offending
//! raw text, and the 1-based source position.

use ecow::EcoString;
use serde::Serialize;

use crate::source_analysis::{LexicalError, Position, SyntaxError};

/// A node in the abstract syntax tree.
///
/// Exhaustive matching is deliberate: adding a construct forces every
/// consumer to decide how to handle it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Node {
    /// A numeric literal. The value is the verbatim source text (`42`,
    /// `3.14`, `1e10`), preserving the author's formatting.
    Number {
        /// Verbatim source text of the literal.
        value: EcoString,
    },

    /// A string literal, quotes stripped and escapes resolved.
    String {
        /// The string's content.
        value: EcoString,
    },

    /// A `true` or `false` literal.
    Boolean {
        /// The literal's value.
        value: bool,
    },

    /// A regex literal: `/pattern/flags`.
    RegexLiteral {
        /// The pattern between the slashes, verbatim.
        pattern: EcoString,
        /// Trailing flag characters; empty when none.
        flags: EcoString,
    },

    /// A sigil-prefixed variable reference.
    Variable {
        /// The name including its sigil: `$x`, `@items`, `%opts`.
        name: EcoString,
    },

    /// A binary operation.
    BinaryOp {
        /// The operator text: `+`, `==`, `=~`, `..`, …
        operator: EcoString,
        /// Left operand.
        left: Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },

    /// A prefix unary operation: `-$x`, `!$ok`, `+4`.
    UnaryOp {
        /// The operator text: `-`, `+`, or `!`.
        operator: EcoString,
        /// The operand.
        operand: Box<Node>,
    },

    /// A ternary conditional: `cond ? then : else`. Right-associative.
    Ternary {
        /// The condition.
        condition: Box<Node>,
        /// The value when the condition is true.
        true_expr: Box<Node>,
        /// The value when the condition is false.
        false_expr: Box<Node>,
    },

    /// An assignment: `$x = 1`, `$s .= "!"`. Right-associative.
    Assignment {
        /// The operator text: `=`, `+=`, `.=`, `//=`, …
        operator: EcoString,
        /// The assignment target.
        target: Box<Node>,
        /// The assigned value.
        value: Box<Node>,
    },

    /// A variable declaration: `my $x = 1;`, `our @ys;`.
    Declaration {
        /// The declaring keyword: `my`, `our`, or `local`.
        declarator: EcoString,
        /// The declared variable (or parenthesized list of variables).
        variable: Box<Node>,
        /// The initializer expression, absent when none was written.
        #[serde(skip_serializing_if = "Option::is_none")]
        initializer: Option<Box<Node>>,
    },

    /// An `if` statement. `elsif` chains nest: each `elsif` becomes an
    /// `If` that is the sole statement of its predecessor's `else_block`.
    If {
        /// The condition.
        condition: Box<Node>,
        /// Statements executed when the condition is true.
        then_block: Vec<Node>,
        /// The `else` branch, absent when none was written.
        #[serde(skip_serializing_if = "Option::is_none")]
        else_block: Option<Vec<Node>>,
    },

    /// An `unless` statement (inverted `if`).
    Unless {
        /// The condition.
        condition: Box<Node>,
        /// Statements executed when the condition is false.
        then_block: Vec<Node>,
        /// The `else` branch, absent when none was written.
        #[serde(skip_serializing_if = "Option::is_none")]
        else_block: Option<Vec<Node>>,
    },

    /// A `while` loop, optionally labeled.
    While {
        /// The loop condition.
        condition: Box<Node>,
        /// The loop body.
        body: Vec<Node>,
        /// The loop's label, absent when unlabeled.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// An `until` loop (inverted `while`), optionally labeled.
    Until {
        /// The loop condition.
        condition: Box<Node>,
        /// The loop body.
        body: Vec<Node>,
        /// The loop's label, absent when unlabeled.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// A `foreach`/`for` loop. Without an explicit loop variable the
    /// special variable `$_` is used.
    Foreach {
        /// The loop variable.
        variable: Box<Node>,
        /// The expression producing the values iterated over.
        list: Box<Node>,
        /// The loop body.
        body: Vec<Node>,
        /// The loop's label, absent when unlabeled.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// A bare `{ ... }` block in statement position.
    Block {
        /// The block's statements.
        statements: Vec<Node>,
    },

    /// A `do { ... }` expression block.
    DoBlock {
        /// The block's statements.
        statements: Vec<Node>,
    },

    /// A function call: `foo()`, `sqrt(2)`, or a bareword in expression
    /// position (`time`).
    Call {
        /// The called function's name.
        name: EcoString,
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A method call: `$obj->method(args)`, `Class->new`.
    MethodCall {
        /// The receiver expression.
        object: Box<Node>,
        /// The method name.
        method: EcoString,
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A `return` statement.
    Return {
        /// The returned expression, absent for a bare `return;`.
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Box<Node>>,
    },

    /// A `die` statement.
    Die {
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A `warn` statement.
    Warn {
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A `print` statement.
    Print {
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A `say` statement.
    Say {
        /// The arguments, in source order.
        args: Vec<Node>,
    },

    /// A subroutine definition, named (`sub foo { }`) or anonymous
    /// (`sub { }` in expression position).
    Sub {
        /// The subroutine's name, absent for anonymous subs.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<EcoString>,
        /// The parameters, each a [`Node::Parameter`].
        params: Vec<Node>,
        /// The body statements.
        body: Vec<Node>,
    },

    /// A single parameter in a `sub` or `method` signature.
    Parameter {
        /// The parameter variable.
        variable: Box<Node>,
        /// The default value expression, absent when none was written.
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<Box<Node>>,
    },

    /// An array literal: `[1, 2, 3]`.
    ArrayLiteral {
        /// The elements, in source order.
        elements: Vec<Node>,
    },

    /// A hash literal: `+{ a => 1 }` or `{ a => 1 }` in expression
    /// position. Pairs preserve key/value source order.
    HashLiteral {
        /// The key/value pairs, in source order.
        pairs: Vec<(Node, Node)>,
    },

    /// A comma-joined list: `(1, 2, 3)`. A parenthesized expression with
    /// no top-level comma is *not* a list; it parses as the inner
    /// expression.
    List {
        /// The elements, in source order.
        elements: Vec<Node>,
    },

    /// A single-element array access: `$xs[0]`, `$ref->[1]`.
    ArrayAccess {
        /// The array expression.
        array: Box<Node>,
        /// The index expression.
        index: Box<Node>,
    },

    /// An array slice: `@xs[1..3]`, `@xs[0, 2]`.
    ArraySlice {
        /// The array expression.
        array: Box<Node>,
        /// The index expression or [`Node::List`] of indices.
        indices: Box<Node>,
    },

    /// A single-key hash access: `$h{key}`, `$ref->{key}`.
    HashAccess {
        /// The hash expression.
        hash: Box<Node>,
        /// The key expression.
        key: Box<Node>,
    },

    /// A hash slice: `@h{qw(a b)}`, `@h{'x', 'y'}`.
    HashSlice {
        /// The hash expression.
        hash: Box<Node>,
        /// The key expression or [`Node::List`] of keys.
        keys: Box<Node>,
    },

    /// A `package NAME;` statement.
    Package {
        /// The package name, possibly `::`-separated.
        name: EcoString,
    },

    /// A `use MODULE [imports];` statement.
    Use {
        /// The module name, possibly `::`-separated.
        module: EcoString,
        /// The import list; empty when none was written.
        imports: Vec<Node>,
    },

    /// A `class NAME { ... }` definition.
    Class {
        /// The class name.
        name: EcoString,
        /// Field and method declarations, in source order.
        body: Vec<Node>,
    },

    /// A `field`/`has` attribute declaration inside a class body.
    Field {
        /// The declaring keyword: `field` or `has`.
        declarator: EcoString,
        /// The field variable.
        variable: Box<Node>,
        /// The default value expression, absent when none was written.
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<Box<Node>>,
    },

    /// A `method` definition inside a class body.
    Method {
        /// The method name.
        name: EcoString,
        /// The parameters, each a [`Node::Parameter`].
        params: Vec<Node>,
        /// The body statements.
        body: Vec<Node>,
    },

    /// A `last` loop-control statement.
    Last {
        /// The targeted loop label, absent for the innermost loop.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// A `next` loop-control statement.
    Next {
        /// The targeted loop label, absent for the innermost loop.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// A `redo` loop-control statement.
    Redo {
        /// The targeted loop label, absent for the innermost loop.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<EcoString>,
    },

    /// A recovered parse failure, inline in the tree.
    ///
    /// Always carries a human-readable message, the offending raw text,
    /// and 1-based line/column of where the failure starts.
    Error {
        /// Human-readable description of what went wrong.
        message: EcoString,
        /// The offending raw source text.
        value: EcoString,
        /// 1-based line of the failure.
        line: u32,
        /// 1-based column of the failure.
        column: u32,
    },
}

impl Node {
    /// Creates an error node from a message, the offending text, and the
    /// failure position.
    #[must_use]
    pub fn error(
        message: impl Into<EcoString>,
        value: impl Into<EcoString>,
        position: Position,
    ) -> Self {
        Self::Error {
            message: message.into(),
            value: value.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// Renders a lexical error into an error node.
    #[must_use]
    pub fn from_lexical_error(error: &LexicalError, value: impl Into<EcoString>) -> Self {
        Self::error(error.to_string(), value, error.position)
    }

    /// Renders a syntax error into an error node.
    #[must_use]
    pub fn from_syntax_error(error: &SyntaxError, value: impl Into<EcoString>) -> Self {
        Self::error(error.to_string(), value, error.position)
    }

    /// Returns `true` if this node is an [`Node::Error`].
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns `true` if this node or any of its descendants is an
    /// [`Node::Error`].
    #[must_use]
    pub fn contains_error(&self) -> bool {
        if self.is_error() {
            return true;
        }
        let mut found = false;
        self.visit_children(&mut |child| {
            if child.contains_error() {
                found = true;
            }
        });
        found
    }

    /// Calls `f` once for each direct child node.
    fn visit_children(&self, f: &mut impl FnMut(&Node)) {
        match self {
            Self::Number { .. }
            | Self::String { .. }
            | Self::Boolean { .. }
            | Self::RegexLiteral { .. }
            | Self::Variable { .. }
            | Self::Package { .. }
            | Self::Last { .. }
            | Self::Next { .. }
            | Self::Redo { .. }
            | Self::Error { .. } => {}
            Self::BinaryOp { left, right, .. } => {
                f(left);
                f(right);
            }
            Self::UnaryOp { operand, .. } => f(operand),
            Self::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                f(condition);
                f(true_expr);
                f(false_expr);
            }
            Self::Assignment { target, value, .. } => {
                f(target);
                f(value);
            }
            Self::Declaration {
                variable,
                initializer,
                ..
            } => {
                f(variable);
                if let Some(init) = initializer {
                    f(init);
                }
            }
            Self::If {
                condition,
                then_block,
                else_block,
            }
            | Self::Unless {
                condition,
                then_block,
                else_block,
            } => {
                f(condition);
                then_block.iter().for_each(&mut *f);
                if let Some(block) = else_block {
                    block.iter().for_each(&mut *f);
                }
            }
            Self::While {
                condition, body, ..
            }
            | Self::Until {
                condition, body, ..
            } => {
                f(condition);
                body.iter().for_each(f);
            }
            Self::Foreach {
                variable,
                list,
                body,
                ..
            } => {
                f(variable);
                f(list);
                body.iter().for_each(f);
            }
            Self::Block { statements } | Self::DoBlock { statements } => {
                statements.iter().for_each(f);
            }
            Self::Call { args, .. }
            | Self::Die { args }
            | Self::Warn { args }
            | Self::Print { args }
            | Self::Say { args } => args.iter().for_each(f),
            Self::MethodCall { object, args, .. } => {
                f(object);
                args.iter().for_each(f);
            }
            Self::Return { value } => {
                if let Some(v) = value {
                    f(v);
                }
            }
            Self::Sub { params, body, .. } | Self::Method { params, body, .. } => {
                params.iter().for_each(&mut *f);
                body.iter().for_each(f);
            }
            Self::Parameter { variable, default } => {
                f(variable);
                if let Some(d) = default {
                    f(d);
                }
            }
            Self::ArrayLiteral { elements } | Self::List { elements } => {
                elements.iter().for_each(f);
            }
            Self::HashLiteral { pairs } => {
                for (key, value) in pairs {
                    f(key);
                    f(value);
                }
            }
            Self::ArrayAccess { array, index } => {
                f(array);
                f(index);
            }
            Self::ArraySlice { array, indices } => {
                f(array);
                f(indices);
            }
            Self::HashAccess { hash, key } => {
                f(hash);
                f(key);
            }
            Self::HashSlice { hash, keys } => {
                f(hash);
                f(keys);
            }
            Self::Use { imports, .. } => imports.iter().for_each(f),
            Self::Class { body, .. } => body.iter().for_each(f),
            Self::Field {
                variable, default, ..
            } => {
                f(variable);
                if let Some(d) = default {
                    f(d);
                }
            }
        }
    }
}

/// Serializes a statement sequence to compact JSON.
///
/// Identical input always yields byte-identical output: field order is
/// fixed by the variant definitions and literal text is stored verbatim.
pub fn to_json(nodes: &[Node]) -> serde_json::Result<String> {
    serde_json::to_string(nodes)
}

/// Serializes a statement sequence to pretty-printed JSON, the
/// human-diffable form used for snapshot comparison.
pub fn to_json_pretty(nodes: &[Node]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn to_value(node: &Node) -> Value {
        serde_json::to_value(node).unwrap()
    }

    #[test]
    fn serializes_with_type_tag_and_camel_case_fields() {
        let node = Node::BinaryOp {
            operator: "+".into(),
            left: Box::new(Node::Number { value: "2".into() }),
            right: Box::new(Node::Number { value: "3".into() }),
        };
        assert_eq!(
            to_value(&node),
            json!({
                "type": "BinaryOp",
                "operator": "+",
                "left": { "type": "Number", "value": "2" },
                "right": { "type": "Number", "value": "3" },
            })
        );
    }

    #[test]
    fn absent_optional_fields_are_omitted_not_null() {
        let node = Node::Declaration {
            declarator: "my".into(),
            variable: Box::new(Node::Variable { name: "$x".into() }),
            initializer: None,
        };
        let value = to_value(&node);
        assert!(value.get("initializer").is_none());

        let node = Node::If {
            condition: Box::new(Node::Boolean { value: true }),
            then_block: vec![],
            else_block: None,
        };
        assert!(to_value(&node).get("elseBlock").is_none());
    }

    #[test]
    fn present_optional_fields_use_camel_case_names() {
        let node = Node::If {
            condition: Box::new(Node::Boolean { value: true }),
            then_block: vec![],
            else_block: Some(vec![]),
        };
        let value = to_value(&node);
        assert_eq!(value["elseBlock"], json!([]));
        assert_eq!(value["thenBlock"], json!([]));
    }

    #[test]
    fn number_preserves_verbatim_source_text() {
        // 1e10 must not round-trip through a float and come back as
        // 10000000000
        let node = Node::Number {
            value: "1e10".into(),
        };
        assert_eq!(to_value(&node)["value"], json!("1e10"));
    }

    #[test]
    fn error_node_constructor() {
        let node = Node::error("boom", "`", Position::new(3, 9));
        assert!(node.is_error());
        assert_eq!(
            to_value(&node),
            json!({
                "type": "Error",
                "message": "boom",
                "value": "`",
                "line": 3,
                "column": 9,
            })
        );
    }

    #[test]
    fn contains_error_finds_nested_errors() {
        let clean = Node::UnaryOp {
            operator: "-".into(),
            operand: Box::new(Node::Number { value: "1".into() }),
        };
        assert!(!clean.contains_error());

        let dirty = Node::Declaration {
            declarator: "my".into(),
            variable: Box::new(Node::Variable { name: "$s".into() }),
            initializer: Some(Box::new(Node::error(
                "Unterminated string literal: missing closing \"",
                "\"hello",
                Position::new(1, 11),
            ))),
        };
        assert!(dirty.contains_error());
    }

    #[test]
    fn hash_pairs_serialize_in_source_order() {
        let node = Node::HashLiteral {
            pairs: vec![
                (
                    Node::String { value: "b".into() },
                    Node::Number { value: "2".into() },
                ),
                (
                    Node::String { value: "a".into() },
                    Node::Number { value: "1".into() },
                ),
            ],
        };
        let value = to_value(&node);
        assert_eq!(value["pairs"][0][0]["value"], json!("b"));
        assert_eq!(value["pairs"][1][0]["value"], json!("a"));
    }

    #[test]
    fn to_json_is_deterministic() {
        let nodes = vec![Node::Foreach {
            variable: Box::new(Node::Variable { name: "$_".into() }),
            list: Box::new(Node::Variable {
                name: "@items".into(),
            }),
            body: vec![Node::Print {
                args: vec![Node::Variable { name: "$_".into() }],
            }],
            label: None,
        }];
        let first = to_json(&nodes).unwrap();
        let second = to_json(&nodes).unwrap();
        assert_eq!(first, second);
        assert_eq!(to_json_pretty(&nodes).unwrap(), to_json_pretty(&nodes).unwrap());
    }
}
