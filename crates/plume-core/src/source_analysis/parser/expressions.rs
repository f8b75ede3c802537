// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing: precedence climbing, postfix chains, primaries.
//!
//! Binding powers follow a Pratt-style table. Left-associative operators
//! get `(bp, bp + 1)`, right-associative ones `(bp + 1, bp)`, so the
//! recursive `parse_binary` naturally groups `2 ** 3 ** 2` to the right
//! and `2 - 3 - 4` to the left.
//!
//! The comma is *not* in the table: list construction is driven entirely
//! by the grouping contexts (`(...)`, `[...]`, subscripts, call
//! arguments), which is what makes `(1 + 2)` a grouped `BinaryOp` but
//! `(1, 2)` a `List`.

use ecow::EcoString;

use crate::ast::Node;
use crate::source_analysis::{
    Lexeme, LexemeCategory, LexicalError, LexicalErrorKind, SyntaxError, SyntaxErrorKind, Token,
    TokenKind,
};

use super::{Parser, MAX_NESTING_DEPTH};

/// Left and right binding power of an infix operator.
struct BindingPower {
    left: u8,
    right: u8,
}

const fn left_assoc(bp: u8) -> Option<BindingPower> {
    Some(BindingPower {
        left: bp,
        right: bp + 1,
    })
}

const fn right_assoc(bp: u8) -> Option<BindingPower> {
    Some(BindingPower {
        left: bp + 1,
        right: bp,
    })
}

/// Binding powers for every infix operator, lowest to highest.
///
/// `?`, `:`, assignment operators, and the comma are handled outside the
/// table; `=>` deliberately has no power so it only acts as a list
/// separator.
fn binding_power(op: &str) -> Option<BindingPower> {
    match op {
        "||" | "&&" | "//" => left_assoc(10),
        "==" | "!=" | "<" | ">" | "<=" | ">=" | "=~" | "!~" => left_assoc(20),
        ".." => left_assoc(30),
        "." => left_assoc(40),
        "+" | "-" => left_assoc(50),
        "*" | "/" | "%" => left_assoc(60),
        "**" => right_assoc(70),
        _ => None,
    }
}

/// Returns `true` for `@`-sigil bases, which make subscripts slices
/// rather than single-element accesses.
fn has_array_sigil(node: &Node) -> bool {
    matches!(node, Node::Variable { name } if name.starts_with('@'))
}

/// Reconstructs the lexical error behind an `Unknown` token from its
/// preserved raw text.
fn lexical_error_for(token: &Token) -> LexicalError {
    let position = token.position;
    match token.value.chars().next() {
        Some(quote @ ('"' | '\'')) => LexicalError::unterminated_string(quote, position),
        Some('/') if token.value.len() > 1 => {
            LexicalError::new(LexicalErrorKind::UnterminatedRegex, position)
        }
        Some('q') if token.value.starts_with("qw") && token.value.len() > 2 => {
            let delimiter = match token.value.chars().nth(2) {
                Some('(') => ')',
                Some('[') => ']',
                Some('{') => '}',
                _ => '/',
            };
            LexicalError::new(
                LexicalErrorKind::UnterminatedQuoteWords { delimiter },
                position,
            )
        }
        Some(c) => LexicalError::unknown_character(c, position),
        None => LexicalError::unknown_character(' ', position),
    }
}

/// Splits a raw `/pattern/flags` regex token into its parts.
fn split_regex(raw: &str) -> Node {
    let Some(last_slash) = raw.rfind('/') else {
        return Node::RegexLiteral {
            pattern: raw.into(),
            flags: EcoString::new(),
        };
    };
    if last_slash == 0 {
        return Node::RegexLiteral {
            pattern: raw[1..].into(),
            flags: EcoString::new(),
        };
    }
    Node::RegexLiteral {
        pattern: raw[1..last_slash].into(),
        flags: raw[last_slash + 1..].into(),
    }
}

/// Splits a composite `qw(a b c)` token into a list of string nodes.
fn split_quote_words(raw: &str) -> Node {
    // Shape is always `qw<open>…<close>`; the inner text splits on
    // whitespace
    let inner = if raw.len() > 4 { &raw[3..raw.len() - 1] } else { "" };
    Node::List {
        elements: inner
            .split_whitespace()
            .map(|word| Node::String { value: word.into() })
            .collect(),
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = Lexeme>,
{
    /// Parses a full expression. This is the depth-guarded entry point;
    /// every recursive re-entry into expression parsing goes through it.
    pub(crate) fn parse_expression(&mut self) -> Node {
        let position = self.position();
        match self.nested(Self::parse_assignment) {
            Some(node) => node,
            None => {
                let error = SyntaxError::new(SyntaxErrorKind::NestingTooDeep, position);
                let value = self
                    .advance()
                    .map(|l| l.token.value)
                    .unwrap_or_default();
                Node::from_syntax_error(&error, value)
            }
        }
    }

    /// Assignment, right-associative: `$a = $b = 1` groups as
    /// `$a = ($b = 1)`.
    fn parse_assignment(&mut self) -> Node {
        let target = self.parse_ternary();
        if self.at_category(LexemeCategory::AssignOp) {
            let Some(op) = self.advance() else {
                return target;
            };
            let value = self.parse_expression();
            return Node::Assignment {
                operator: op.token.value,
                target: Box::new(target),
                value: Box::new(value),
            };
        }
        target
    }

    /// Ternary conditional, right-associative. A missing `:` leaves an
    /// error node in just the false-branch slot.
    fn parse_ternary(&mut self) -> Node {
        let condition = self.parse_binary(0);
        if !self.eat_op("?") {
            return condition;
        }
        let true_expr = self.parse_expression();
        let false_expr = if self.eat_op(":") {
            self.parse_expression()
        } else {
            let error = SyntaxError::new(
                SyntaxErrorKind::IncompleteTernary { expected: ":" },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            Node::from_syntax_error(&error, value)
        };
        Node::Ternary {
            condition: Box::new(condition),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
        }
    }

    /// Precedence climbing over the [`binding_power`] table.
    fn parse_binary(&mut self, min_bp: u8) -> Node {
        let mut lhs = self.parse_unary();
        loop {
            let Some((op, power)) = self.peek_binary_op() else {
                break;
            };
            if power.left < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(power.right);
            lhs = Node::BinaryOp {
                operator: op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        lhs
    }

    fn peek_binary_op(&mut self) -> Option<(EcoString, BindingPower)> {
        let lexeme = self.peek()?;
        if lexeme.category != LexemeCategory::BinOp {
            return None;
        }
        let power = binding_power(lexeme.value())?;
        Some((lexeme.token.value.clone(), power))
    }

    /// Prefix unary operators `-`, `+`, `!`, stackable. `+{` is not unary
    /// plus: it always introduces a hash literal.
    fn parse_unary(&mut self) -> Node {
        let prefix = self.peek().and_then(|l| {
            if l.category == LexemeCategory::BinOp
                && matches!(l.token.value.as_str(), "-" | "+" | "!")
            {
                Some(l.token.value.clone())
            } else {
                None
            }
        });
        let Some(op) = prefix else {
            return self.parse_postfix();
        };

        if op == "+"
            && self
                .peek_n(1)
                .is_some_and(|l| l.category == LexemeCategory::LBrace)
        {
            self.advance();
            return self.parse_hash_literal();
        }

        let position = self.position();
        self.advance();
        if self.depth >= MAX_NESTING_DEPTH {
            let error = SyntaxError::new(SyntaxErrorKind::NestingTooDeep, position);
            return Node::from_syntax_error(&error, op);
        }
        self.depth += 1;
        let operand = self.parse_unary();
        self.depth -= 1;
        Node::UnaryOp {
            operator: op,
            operand: Box::new(operand),
        }
    }

    /// Postfix chain: subscripts and arrow forms, left-associative and
    /// chainable indefinitely.
    fn parse_postfix(&mut self) -> Node {
        let mut expr = self.parse_primary();
        loop {
            match self.peek() {
                Some(l) if l.category == LexemeCategory::LBracket => {
                    expr = self.parse_bracket_subscript(expr);
                }
                Some(l) if l.category == LexemeCategory::LBrace => {
                    expr = self.parse_brace_subscript(expr);
                }
                Some(l) if l.is_op("->") => {
                    expr = self.parse_arrow(expr);
                }
                _ => break,
            }
        }
        expr
    }

    /// `expr[...]`: a slice for `@`-sigil bases, otherwise an access.
    fn parse_bracket_subscript(&mut self, base: Node) -> Node {
        let subscript = self.parse_subscript_list(LexemeCategory::RBracket, ']', false);
        if has_array_sigil(&base) {
            Node::ArraySlice {
                array: Box::new(base),
                indices: Box::new(subscript),
            }
        } else {
            Node::ArrayAccess {
                array: Box::new(base),
                index: Box::new(subscript),
            }
        }
    }

    /// `expr{...}`: a slice for `@`-sigil bases, otherwise an access.
    /// Bareword keys promote to strings.
    fn parse_brace_subscript(&mut self, base: Node) -> Node {
        let subscript = self.parse_subscript_list(LexemeCategory::RBrace, '}', true);
        if has_array_sigil(&base) {
            Node::HashSlice {
                hash: Box::new(base),
                keys: Box::new(subscript),
            }
        } else {
            Node::HashAccess {
                hash: Box::new(base),
                key: Box::new(subscript),
            }
        }
    }

    /// Arrow dereference and method call forms: `->[...]`, `->{...}`,
    /// `->name`, `->name(args)`.
    fn parse_arrow(&mut self, base: Node) -> Node {
        self.advance(); // ->
        match self.peek().map(|l| l.category) {
            Some(LexemeCategory::LBracket) => {
                let index = self.parse_subscript_list(LexemeCategory::RBracket, ']', false);
                Node::ArrayAccess {
                    array: Box::new(base),
                    index: Box::new(index),
                }
            }
            Some(LexemeCategory::LBrace) => {
                let key = self.parse_subscript_list(LexemeCategory::RBrace, '}', true);
                Node::HashAccess {
                    hash: Box::new(base),
                    key: Box::new(key),
                }
            }
            Some(LexemeCategory::Identifier) => {
                let method = self
                    .advance()
                    .map(|l| l.token.value)
                    .unwrap_or_default();
                let args = if self.at_category(LexemeCategory::LParen) {
                    self.parse_paren_args()
                } else {
                    Vec::new()
                };
                Node::MethodCall {
                    object: Box::new(base),
                    method,
                    args,
                }
            }
            _ => {
                let position = self.position();
                let value = self
                    .peek()
                    .map(|l| l.token.value.clone())
                    .unwrap_or_default();
                let error = SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken {
                        found: value.clone(),
                    },
                    position,
                );
                Node::from_syntax_error(&error, value)
            }
        }
    }

    /// The body of a subscript: consumes the opening delimiter through
    /// its closing counterpart. A single expression stays as-is; any
    /// comma makes a `List`. An immediately closed subscript is an empty
    /// `List` (observed behavior for `@a[]`).
    fn parse_subscript_list(
        &mut self,
        close: LexemeCategory,
        close_char: char,
        promote_barewords: bool,
    ) -> Node {
        self.advance(); // opening delimiter
        if self.eat_category(close) {
            return Node::List {
                elements: Vec::new(),
            };
        }

        let first = self.parse_subscript_element(close, promote_barewords);
        let mut rest = Vec::new();
        let mut is_list = false;
        while self.eat_op(",") || self.eat_op("=>") {
            is_list = true;
            if self.at_category(close) {
                break;
            }
            rest.push(self.parse_subscript_element(close, promote_barewords));
        }

        if !self.eat_category(close) {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingClosingDelimiter {
                    delimiter: close_char,
                },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            rest.push(Node::from_syntax_error(&error, value));
            is_list = true;
        }

        if is_list {
            let mut elements = vec![first];
            elements.append(&mut rest);
            Node::List { elements }
        } else {
            first
        }
    }

    fn parse_subscript_element(
        &mut self,
        close: LexemeCategory,
        promote_barewords: bool,
    ) -> Node {
        if promote_barewords && self.at_category(LexemeCategory::Identifier) {
            let next_is_end = self
                .peek_n(1)
                .map_or(true, |l| l.is_op(",") || l.is_op("=>") || l.category == close);
            if next_is_end {
                if let Some(ident) = self.advance() {
                    return Node::String {
                        value: ident.token.value,
                    };
                }
            }
        }
        self.parse_expression()
    }

    /// A parenthesized expression or list. No top-level comma means the
    /// parens are pure grouping; any comma (even trailing) makes a
    /// `List`.
    pub(super) fn parse_paren_group(&mut self) -> Node {
        self.advance(); // (
        if self.eat_category(LexemeCategory::RParen) {
            return Node::List {
                elements: Vec::new(),
            };
        }

        let first = self.parse_expression();
        let mut rest = Vec::new();
        let mut is_list = false;
        while self.eat_op(",") || self.eat_op("=>") {
            is_list = true;
            if self.at_category(LexemeCategory::RParen) {
                break;
            }
            rest.push(self.parse_expression());
        }

        if !self.eat_category(LexemeCategory::RParen) {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingClosingDelimiter { delimiter: ')' },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            if !is_list {
                return Node::from_syntax_error(&error, value);
            }
            rest.push(Node::from_syntax_error(&error, value));
        }

        if is_list {
            let mut elements = vec![first];
            elements.append(&mut rest);
            Node::List { elements }
        } else {
            first
        }
    }

    /// A parenthesized argument list for calls and method calls. A
    /// missing `)` appends an error node to the arguments rather than
    /// abandoning the statement.
    pub(crate) fn parse_paren_args(&mut self) -> Vec<Node> {
        self.advance(); // (
        let mut args = Vec::new();
        if self.eat_category(LexemeCategory::RParen) {
            return args;
        }

        args.push(self.parse_expression());
        while self.eat_op(",") || self.eat_op("=>") {
            if self.at_category(LexemeCategory::RParen) {
                break;
            }
            args.push(self.parse_expression());
        }

        if !self.eat_category(LexemeCategory::RParen) {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingClosingDelimiter { delimiter: ')' },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            args.push(Node::from_syntax_error(&error, value));
        }
        args
    }

    /// `[ ... ]` array literal.
    fn parse_array_literal(&mut self) -> Node {
        self.advance(); // [
        let mut elements = Vec::new();
        if self.eat_category(LexemeCategory::RBracket) {
            return Node::ArrayLiteral { elements };
        }

        elements.push(self.parse_expression());
        while self.eat_op(",") || self.eat_op("=>") {
            if self.at_category(LexemeCategory::RBracket) {
                break;
            }
            elements.push(self.parse_expression());
        }

        if !self.eat_category(LexemeCategory::RBracket) {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingClosingDelimiter { delimiter: ']' },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            elements.push(Node::from_syntax_error(&error, value));
        }
        Node::ArrayLiteral { elements }
    }

    /// `{ ... }` hash literal (also reached via the `+{` prefix form).
    /// Pairs preserve source order; a dangling key gets an error node in
    /// its value slot.
    pub(crate) fn parse_hash_literal(&mut self) -> Node {
        let open_position = self.position();
        self.advance(); // {
        let mut pairs = Vec::new();

        loop {
            if self.eat_category(LexemeCategory::RBrace) {
                break;
            }
            if self.peek().is_none() {
                let error = SyntaxError::new(
                    SyntaxErrorKind::MissingClosingDelimiter { delimiter: '}' },
                    open_position,
                );
                return Node::from_syntax_error(&error, "{");
            }

            let before = self.consumed;
            let key = self.parse_hash_key();

            let value = if self.eat_op("=>") || self.eat_op(",") {
                self.parse_hash_value()
            } else {
                // Odd item count: the final value slot becomes an error
                let position = self.position();
                let found = self
                    .peek()
                    .map(|l| l.token.value.clone())
                    .unwrap_or_default();
                let error = SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken {
                        found: found.clone(),
                    },
                    position,
                );
                Node::from_syntax_error(&error, found)
            };
            pairs.push((key, value));

            if !(self.eat_op(",") || self.at_category(LexemeCategory::RBrace)) && self.consumed == before {
                // Unparseable content; skip one lexeme to keep moving
                self.advance();
            }
        }

        Node::HashLiteral { pairs }
    }

    fn parse_hash_key(&mut self) -> Node {
        // Bareword keys promote to strings
        if self.at_category(LexemeCategory::Identifier) {
            let next_is_end = self.peek_n(1).map_or(true, |l| {
                l.is_op("=>") || l.is_op(",") || l.category == LexemeCategory::RBrace
            });
            if next_is_end {
                if let Some(ident) = self.advance() {
                    return Node::String {
                        value: ident.token.value,
                    };
                }
            }
        }
        self.parse_expression()
    }

    fn parse_hash_value(&mut self) -> Node {
        if self.at_category(LexemeCategory::RBrace) {
            // Trailing separator with no value
            let position = self.position();
            let error = SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken { found: "}".into() },
                position,
            );
            return Node::from_syntax_error(&error, "}");
        }
        self.parse_expression()
    }

    /// Primary expressions: literals, variables, barewords, grouped and
    /// composite forms. `Unknown` tokens surface here as error nodes
    /// carrying their reconstructed lexical error.
    fn parse_primary(&mut self) -> Node {
        let Some(lexeme) = self.peek() else {
            let error = SyntaxError::new(SyntaxErrorKind::UnexpectedEof, self.position());
            return Node::from_syntax_error(&error, "");
        };
        let category = lexeme.category;
        let value = lexeme.token.value.clone();
        let position = lexeme.token.position;

        match category {
            LexemeCategory::Literal => {
                let Some(lexeme) = self.advance() else {
                    let error = SyntaxError::new(SyntaxErrorKind::UnexpectedEof, position);
                    return Node::from_syntax_error(&error, "");
                };
                match lexeme.token.kind {
                    TokenKind::Number => Node::Number { value },
                    TokenKind::String => Node::String { value },
                    _ => Node::Boolean {
                        value: value == "true",
                    },
                }
            }
            LexemeCategory::Regex => {
                self.advance();
                split_regex(&value)
            }
            LexemeCategory::QuoteWords => {
                self.advance();
                split_quote_words(&value)
            }
            LexemeCategory::ScalarVar | LexemeCategory::ArrayVar | LexemeCategory::HashVar => {
                self.advance();
                Node::Variable { name: value }
            }
            LexemeCategory::Identifier => {
                self.advance();
                if self.peek().is_some_and(|l| l.is_op("=>")) {
                    // Bareword before a fat comma is a string key
                    return Node::String { value };
                }
                if self.at_category(LexemeCategory::LParen) {
                    let args = self.parse_paren_args();
                    return Node::Call { name: value, args };
                }
                if self.peek().is_some_and(|l| l.is_op("->")) {
                    // Class name receiver; the postfix chain builds the
                    // method call
                    return Node::String { value };
                }
                Node::Call {
                    name: value,
                    args: Vec::new(),
                }
            }
            LexemeCategory::LParen => self.parse_paren_group(),
            LexemeCategory::LBracket => self.parse_array_literal(),
            LexemeCategory::LBrace => self.parse_hash_literal(),
            LexemeCategory::Control if value == "do" => self.parse_do_block(),
            LexemeCategory::Declaration if value == "sub" => self.parse_sub_expression(),
            LexemeCategory::Unknown => {
                let Some(lexeme) = self.advance() else {
                    let error = SyntaxError::new(SyntaxErrorKind::UnexpectedEof, position);
                    return Node::from_syntax_error(&error, "");
                };
                let error = lexical_error_for(&lexeme.token);
                Node::from_lexical_error(&error, lexeme.token.value)
            }
            LexemeCategory::Terminator
            | LexemeCategory::RParen
            | LexemeCategory::RBrace
            | LexemeCategory::RBracket => {
                // Statement boundary in expression position; left in
                // place for the enclosing construct to resynchronize on
                let error = SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken {
                        found: value.clone(),
                    },
                    position,
                );
                Node::from_syntax_error(&error, value)
            }
            _ => {
                self.advance();
                let error = SyntaxError::new(
                    SyntaxErrorKind::UnexpectedToken {
                        found: value.clone(),
                    },
                    position,
                );
                Node::from_syntax_error(&error, value)
            }
        }
    }

    /// `do { ... }` expression block.
    fn parse_do_block(&mut self) -> Node {
        self.advance(); // do
        match self.parse_braced_statements("do") {
            Ok(statements) => Node::DoBlock { statements },
            Err(error) => {
                let value = self
                    .peek()
                    .map(|l| l.token.value.clone())
                    .unwrap_or_default();
                Node::from_syntax_error(&error, value)
            }
        }
    }
}
