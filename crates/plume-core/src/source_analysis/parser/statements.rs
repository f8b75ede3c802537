// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Statement parsing: declarations, control flow, definitions.
//!
//! Statements come in two shapes. Compound statements (`if`, loops,
//! `class`, named `sub`, bare blocks) own a braced body and take no
//! postfix modifier. Simple statements (declarations, expression
//! statements, `return`, the print family, loop control) may carry one
//! postfix modifier (`STMT if COND` and friends) and end at a `;`, which
//! is optional before `}` and end of input.

use ecow::EcoString;

use crate::ast::Node;
use crate::source_analysis::{Lexeme, LexemeCategory, SyntaxError, SyntaxErrorKind};

use super::{ParseResult, Parser};

impl<I> Parser<I>
where
    I: Iterator<Item = Lexeme>,
{
    /// Parses one statement. Depth-guarded; all failures are rendered
    /// into error nodes here, nothing propagates.
    pub(crate) fn parse_statement(&mut self) -> Node {
        let position = self.position();
        match self.nested(Self::statement) {
            Some(node) => node,
            None => {
                let error = SyntaxError::new(SyntaxErrorKind::NestingTooDeep, position);
                self.recover(error)
            }
        }
    }

    fn statement(&mut self) -> Node {
        let Some(lexeme) = self.peek() else {
            let error = SyntaxError::new(SyntaxErrorKind::UnexpectedEof, self.position());
            return Node::from_syntax_error(&error, "");
        };
        let category = lexeme.category;
        let value = lexeme.token.value.clone();

        // Compound statements: braced body, no postfix modifier
        let compound: Option<ParseResult<Node>> = match (category, value.as_str()) {
            (LexemeCategory::Control, "if") => Some(self.parse_if_chain("if")),
            (LexemeCategory::Control, "unless") => Some(self.parse_unless()),
            (LexemeCategory::Control, "while" | "until") => Some(self.parse_loop(None)),
            (LexemeCategory::Control, "for" | "foreach") => Some(self.parse_foreach(None)),
            (LexemeCategory::Declaration, "class") => Some(self.parse_class()),
            (LexemeCategory::Declaration, "sub")
                if self
                    .peek_n(1)
                    .is_some_and(|l| l.category == LexemeCategory::Identifier) =>
            {
                Some(self.parse_named_sub())
            }
            (LexemeCategory::LBrace, _) => Some(self.parse_bare_block()),
            (LexemeCategory::Identifier, _) if self.is_label_ahead() => {
                Some(self.parse_labeled_loop())
            }
            _ => None,
        };
        if let Some(result) = compound {
            let node = match result {
                Ok(node) => node,
                Err(error) => self.recover(error),
            };
            self.eat_category(LexemeCategory::Terminator);
            return node;
        }

        // Simple statements
        let result: ParseResult<Node> = match (category, value.as_str()) {
            (LexemeCategory::Declaration, "my" | "our" | "local") => {
                self.parse_variable_declaration()
            }
            (LexemeCategory::Declaration, "package") => self.parse_package(),
            (LexemeCategory::Control, "use") => self.parse_use(),
            (LexemeCategory::Control, "return") => Ok(self.parse_return()),
            (LexemeCategory::Control, "last" | "next" | "redo") => {
                Ok(self.parse_loop_control(&value))
            }
            (LexemeCategory::Control, "print" | "say" | "die" | "warn") => {
                Ok(self.parse_builtin_statement(&value))
            }
            // `elsif`/`else` with no preceding `if` is a stray keyword
            (LexemeCategory::Control, "elsif" | "else") => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken {
                    found: value.clone(),
                },
                self.position(),
            )),
            (LexemeCategory::Declaration, "field" | "has") => Err(SyntaxError::new(
                SyntaxErrorKind::MalformedDeclaration { what: "field" },
                self.position(),
            )),
            (LexemeCategory::Declaration, "method") => Err(SyntaxError::new(
                SyntaxErrorKind::MalformedDeclaration { what: "method" },
                self.position(),
            )),
            _ => Ok(self.parse_expression()),
        };
        let node = match result {
            Ok(node) => node,
            Err(error) => return self.recover(error),
        };
        let node = self.apply_statement_modifier(node);
        self.eat_category(LexemeCategory::Terminator);
        node
    }

    /// Returns `true` at `LABEL:` followed by a loop keyword.
    fn is_label_ahead(&mut self) -> bool {
        if !self.peek_n(1).is_some_and(|l| l.is_op(":")) {
            return false;
        }
        self.peek_n(2).is_some_and(|l| {
            l.category == LexemeCategory::Control
                && matches!(l.token.value.as_str(), "while" | "until" | "for" | "foreach")
        })
    }

    fn parse_labeled_loop(&mut self) -> ParseResult<Node> {
        let label = self.advance().map(|l| l.token.value).unwrap_or_default();
        self.advance(); // :
        let keyword = self
            .peek()
            .map(|l| l.token.value.clone())
            .unwrap_or_default();
        match keyword.as_str() {
            "while" | "until" => self.parse_loop(Some(label)),
            _ => self.parse_foreach(Some(label)),
        }
    }

    /// `if`/`elsif` chain. Each `elsif` nests as an `If` that is the sole
    /// statement of its predecessor's else branch.
    fn parse_if_chain(&mut self, keyword: &'static str) -> ParseResult<Node> {
        self.advance(); // if / elsif
        let condition = self.parse_condition(keyword)?;
        let then_block = self.parse_braced_statements(keyword)?;
        let else_block = if self.peek().is_some_and(|l| l.is_control("elsif")) {
            Some(vec![self.parse_if_chain("elsif")?])
        } else if self.eat_control("else") {
            Some(self.parse_braced_statements("else")?)
        } else {
            None
        };
        Ok(Node::If {
            condition: Box::new(condition),
            then_block,
            else_block,
        })
    }

    fn parse_unless(&mut self) -> ParseResult<Node> {
        self.advance(); // unless
        let condition = self.parse_condition("unless")?;
        let then_block = self.parse_braced_statements("unless")?;
        let else_block = if self.eat_control("else") {
            Some(self.parse_braced_statements("else")?)
        } else {
            None
        };
        Ok(Node::Unless {
            condition: Box::new(condition),
            then_block,
            else_block,
        })
    }

    /// A parenthesized condition after a control keyword.
    fn parse_condition(&mut self, keyword: &'static str) -> ParseResult<Node> {
        if !self.eat_category(LexemeCategory::LParen) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingCondition { keyword },
                self.position(),
            ));
        }
        let condition = self.parse_expression();
        if !self.eat_category(LexemeCategory::RParen) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingClosingDelimiter { delimiter: ')' },
                self.position(),
            ));
        }
        Ok(condition)
    }

    /// A `{ ... }` statement list. Statement-level failures inside the
    /// block recover locally; only a missing brace propagates.
    pub(crate) fn parse_braced_statements(
        &mut self,
        context: &'static str,
    ) -> ParseResult<Vec<Node>> {
        if !self.eat_category(LexemeCategory::LBrace) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingBlock { context },
                self.position(),
            ));
        }
        let mut statements = Vec::new();
        loop {
            while self.at_category(LexemeCategory::Terminator) {
                self.advance();
            }
            if self.eat_category(LexemeCategory::RBrace) {
                return Ok(statements);
            }
            if self.peek().is_none() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingClosingDelimiter { delimiter: '}' },
                    self.position(),
                ));
            }
            let before = self.consumed;
            statements.push(self.parse_statement());
            if self.consumed == before {
                self.advance();
            }
        }
    }

    /// A bare `{ ... }` in statement position: a block with its own
    /// scope, not a hash literal.
    fn parse_bare_block(&mut self) -> ParseResult<Node> {
        let statements = self.parse_braced_statements("block")?;
        Ok(Node::Block { statements })
    }

    fn parse_loop(&mut self, label: Option<EcoString>) -> ParseResult<Node> {
        let keyword = self.advance().map(|l| l.token.value).unwrap_or_default();
        let kw: &'static str = if keyword == "until" { "until" } else { "while" };
        let condition = Box::new(self.parse_condition(kw)?);
        let body = self.parse_braced_statements(kw)?;
        Ok(if kw == "until" {
            Node::Until {
                condition,
                body,
                label,
            }
        } else {
            Node::While {
                condition,
                body,
                label,
            }
        })
    }

    /// `foreach`/`for` loop. Without an explicit loop variable the
    /// special variable `$_` is used.
    fn parse_foreach(&mut self, label: Option<EcoString>) -> ParseResult<Node> {
        self.advance(); // for / foreach
        let variable = if self.peek().is_some_and(|l| l.is_declaration("my")) {
            self.advance();
            if !self.at_category(LexemeCategory::ScalarVar) {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingVariable { declarator: "my" },
                    self.position(),
                ));
            }
            let name = self.advance().map(|l| l.token.value).unwrap_or_default();
            Node::Variable { name }
        } else if self.at_category(LexemeCategory::ScalarVar) {
            let name = self.advance().map(|l| l.token.value).unwrap_or_default();
            Node::Variable { name }
        } else {
            Node::Variable { name: "$_".into() }
        };

        if !self.at_category(LexemeCategory::LParen) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingCondition { keyword: "foreach" },
                self.position(),
            ));
        }
        let list = self.parse_paren_group();
        let body = self.parse_braced_statements("foreach")?;
        Ok(Node::Foreach {
            variable: Box::new(variable),
            list: Box::new(list),
            body,
            label,
        })
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<Node> {
        let declarator = self.advance().map(|l| l.token.value).unwrap_or_default();
        let variable = match self.peek().map(|l| l.category) {
            Some(
                LexemeCategory::ScalarVar | LexemeCategory::ArrayVar | LexemeCategory::HashVar,
            ) => {
                let name = self.advance().map(|l| l.token.value).unwrap_or_default();
                Node::Variable { name }
            }
            // List declaration: `my ($a, $b) = ...`
            Some(LexemeCategory::LParen) => self.parse_paren_group(),
            _ => {
                let kw: &'static str = match declarator.as_str() {
                    "our" => "our",
                    "local" => "local",
                    _ => "my",
                };
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingVariable { declarator: kw },
                    self.position(),
                ));
            }
        };
        let initializer = if self.peek().is_some_and(|l| l.is_op("=")) {
            self.advance();
            Some(Box::new(self.parse_expression()))
        } else {
            None
        };
        Ok(Node::Declaration {
            declarator,
            variable: Box::new(variable),
            initializer,
        })
    }

    fn parse_return(&mut self) -> Node {
        self.advance(); // return
        if self.at_statement_end() {
            return Node::Return { value: None };
        }
        let mut items = self.parse_expression_list();
        let value = if items.len() == 1 {
            items.pop().map(Box::new)
        } else {
            Some(Box::new(Node::List { elements: items }))
        };
        Node::Return { value }
    }

    fn parse_loop_control(&mut self, keyword: &str) -> Node {
        self.advance();
        let label = if self.at_category(LexemeCategory::Identifier) {
            self.advance().map(|l| l.token.value)
        } else {
            None
        };
        match keyword {
            "next" => Node::Next { label },
            "redo" => Node::Redo { label },
            _ => Node::Last { label },
        }
    }

    /// `print`, `say`, `die`, `warn` with optional call parens.
    fn parse_builtin_statement(&mut self, keyword: &str) -> Node {
        self.advance();
        let args = if self.at_category(LexemeCategory::LParen) {
            self.parse_paren_args()
        } else if self.at_statement_end() {
            Vec::new()
        } else {
            self.parse_expression_list()
        };
        match keyword {
            "say" => Node::Say { args },
            "die" => Node::Die { args },
            "warn" => Node::Warn { args },
            _ => Node::Print { args },
        }
    }

    /// Returns `true` where a simple statement may end: `;`, `}`, end of
    /// input, or a postfix modifier keyword.
    fn at_statement_end(&mut self) -> bool {
        self.peek().map_or(true, |l| {
            l.category == LexemeCategory::Terminator
                || l.category == LexemeCategory::RBrace
                || (l.category == LexemeCategory::Control
                    && matches!(l.token.value.as_str(), "if" | "unless" | "while" | "until"))
        })
    }

    /// A comma-joined expression sequence without surrounding parens.
    fn parse_expression_list(&mut self) -> Vec<Node> {
        let mut items = vec![self.parse_expression()];
        while self.eat_op(",") || self.eat_op("=>") {
            if self.at_statement_end() {
                break;
            }
            items.push(self.parse_expression());
        }
        items
    }

    fn parse_package(&mut self) -> ParseResult<Node> {
        self.advance(); // package
        if !self.at_category(LexemeCategory::Identifier) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingName { keyword: "package" },
                self.position(),
            ));
        }
        let name = self.advance().map(|l| l.token.value).unwrap_or_default();
        Ok(Node::Package { name })
    }

    fn parse_use(&mut self) -> ParseResult<Node> {
        self.advance(); // use
        if !self.at_category(LexemeCategory::Identifier) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingName { keyword: "use" },
                self.position(),
            ));
        }
        let module = self.advance().map(|l| l.token.value).unwrap_or_default();
        let imports = if self.at_statement_end() {
            Vec::new()
        } else {
            // `use List::Util qw(sum max);` imports flatten into the list
            match self.parse_expression() {
                Node::List { elements } => elements,
                other => vec![other],
            }
        };
        Ok(Node::Use { module, imports })
    }

    fn parse_named_sub(&mut self) -> ParseResult<Node> {
        self.advance(); // sub
        let name = self.advance().map(|l| l.token.value).unwrap_or_default();
        let params = if self.at_category(LexemeCategory::LParen) {
            self.parse_parameter_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_braced_statements("sub")?;
        Ok(Node::Sub {
            name: Some(name),
            params,
            body,
        })
    }

    /// An anonymous `sub` in expression position.
    pub(super) fn parse_sub_expression(&mut self) -> Node {
        self.advance(); // sub
        let name = if self.at_category(LexemeCategory::Identifier) {
            self.advance().map(|l| l.token.value)
        } else {
            None
        };
        let params = if self.at_category(LexemeCategory::LParen) {
            match self.parse_parameter_list() {
                Ok(params) => params,
                Err(error) => {
                    let value = self
                        .peek()
                        .map(|l| l.token.value.clone())
                        .unwrap_or_default();
                    return Node::from_syntax_error(&error, value);
                }
            }
        } else {
            Vec::new()
        };
        match self.parse_braced_statements("sub") {
            Ok(body) => Node::Sub { name, params, body },
            Err(error) => {
                let value = self
                    .peek()
                    .map(|l| l.token.value.clone())
                    .unwrap_or_default();
                Node::from_syntax_error(&error, value)
            }
        }
    }

    /// A parenthesized parameter list with optional default values. A
    /// malformed parameter becomes an error node in just that slot.
    fn parse_parameter_list(&mut self) -> ParseResult<Vec<Node>> {
        self.advance(); // (
        let mut params = Vec::new();
        loop {
            if self.eat_category(LexemeCategory::RParen) {
                break;
            }
            if self.peek().is_none() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingClosingDelimiter { delimiter: ')' },
                    self.position(),
                ));
            }
            match self.peek().map(|l| l.category) {
                Some(
                    LexemeCategory::ScalarVar
                    | LexemeCategory::ArrayVar
                    | LexemeCategory::HashVar,
                ) => {
                    let name = self.advance().map(|l| l.token.value).unwrap_or_default();
                    let default = if self.eat_op("=") {
                        Some(Box::new(self.parse_expression()))
                    } else {
                        None
                    };
                    params.push(Node::Parameter {
                        variable: Box::new(Node::Variable { name }),
                        default,
                    });
                }
                _ => {
                    let position = self.position();
                    let found = self
                        .peek()
                        .map(|l| l.token.value.clone())
                        .unwrap_or_default();
                    let error = SyntaxError::new(
                        SyntaxErrorKind::MalformedDeclaration { what: "parameter" },
                        position,
                    );
                    params.push(Node::from_syntax_error(&error, found));
                    self.advance();
                }
            }
            if !self.eat_op(",") {
                if !self.eat_category(LexemeCategory::RParen) {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::MissingClosingDelimiter { delimiter: ')' },
                        self.position(),
                    ));
                }
                break;
            }
        }
        Ok(params)
    }

    fn parse_class(&mut self) -> ParseResult<Node> {
        self.advance(); // class
        if !self.at_category(LexemeCategory::Identifier) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingName { keyword: "class" },
                self.position(),
            ));
        }
        let name = self.advance().map(|l| l.token.value).unwrap_or_default();
        if !self.eat_category(LexemeCategory::LBrace) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingBlock { context: "class" },
                self.position(),
            ));
        }

        let mut body = Vec::new();
        loop {
            while self.at_category(LexemeCategory::Terminator) {
                self.advance();
            }
            if self.eat_category(LexemeCategory::RBrace) {
                break;
            }
            if self.peek().is_none() {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::MissingClosingDelimiter { delimiter: '}' },
                    self.position(),
                ));
            }
            let before = self.consumed;
            body.push(self.parse_class_member());
            if self.consumed == before {
                self.advance();
            }
        }
        Ok(Node::Class { name, body })
    }

    fn parse_class_member(&mut self) -> Node {
        let Some(lexeme) = self.peek() else {
            let error = SyntaxError::new(SyntaxErrorKind::UnexpectedEof, self.position());
            return Node::from_syntax_error(&error, "");
        };
        let category = lexeme.category;
        let value = lexeme.token.value.clone();
        match (category, value.as_str()) {
            (LexemeCategory::Declaration, "field" | "has") => self.parse_field(),
            (LexemeCategory::Declaration, "method") => self.parse_method(),
            _ => {
                let error = SyntaxError::new(
                    SyntaxErrorKind::MalformedDeclaration { what: "class body" },
                    self.position(),
                );
                self.resync();
                Node::from_syntax_error(&error, value)
            }
        }
    }

    fn parse_field(&mut self) -> Node {
        let declarator = self.advance().map(|l| l.token.value).unwrap_or_default();
        let variable = match self.peek().map(|l| l.category) {
            Some(
                LexemeCategory::ScalarVar | LexemeCategory::ArrayVar | LexemeCategory::HashVar,
            ) => {
                let name = self.advance().map(|l| l.token.value).unwrap_or_default();
                Node::Variable { name }
            }
            _ => {
                let value = self
                    .peek()
                    .map(|l| l.token.value.clone())
                    .unwrap_or_default();
                let error = SyntaxError::new(
                    SyntaxErrorKind::MalformedDeclaration { what: "field" },
                    self.position(),
                );
                self.resync();
                return Node::from_syntax_error(&error, value);
            }
        };
        let default = if self.eat_op("=") {
            Some(Box::new(self.parse_expression()))
        } else {
            None
        };
        self.eat_category(LexemeCategory::Terminator);
        Node::Field {
            declarator,
            variable: Box::new(variable),
            default,
        }
    }

    fn parse_method(&mut self) -> Node {
        self.advance(); // method
        if !self.at_category(LexemeCategory::Identifier) {
            let error = SyntaxError::new(
                SyntaxErrorKind::MissingName { keyword: "method" },
                self.position(),
            );
            let value = self
                .peek()
                .map(|l| l.token.value.clone())
                .unwrap_or_default();
            self.resync();
            return Node::from_syntax_error(&error, value);
        }
        let name = self.advance().map(|l| l.token.value).unwrap_or_default();
        let params = if self.at_category(LexemeCategory::LParen) {
            match self.parse_parameter_list() {
                Ok(params) => params,
                Err(error) => {
                    self.resync();
                    return Node::from_syntax_error(&error, name);
                }
            }
        } else {
            Vec::new()
        };
        match self.parse_braced_statements("method") {
            Ok(body) => Node::Method { name, params, body },
            Err(error) => {
                self.resync();
                Node::from_syntax_error(&error, name)
            }
        }
    }

    /// Postfix statement modifiers: `STMT if|unless|while|until COND`.
    fn apply_statement_modifier(&mut self, statement: Node) -> Node {
        let keyword = self.peek().and_then(|l| {
            if l.category == LexemeCategory::Control
                && matches!(l.token.value.as_str(), "if" | "unless" | "while" | "until")
            {
                Some(l.token.value.clone())
            } else {
                None
            }
        });
        let Some(keyword) = keyword else {
            return statement;
        };
        self.advance();
        let condition = Box::new(self.parse_expression());
        match keyword.as_str() {
            "unless" => Node::Unless {
                condition,
                then_block: vec![statement],
                else_block: None,
            },
            "while" => Node::While {
                condition,
                body: vec![statement],
                label: None,
            },
            "until" => Node::Until {
                condition,
                body: vec![statement],
                label: None,
            },
            _ => Node::If {
                condition,
                then_block: vec![statement],
                else_block: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Node;
    use crate::source_analysis::parse;

    fn stmt(source: &str) -> Node {
        let mut nodes = parse(source);
        assert_eq!(nodes.len(), 1, "expected one statement from {source:?}");
        nodes.remove(0)
    }

    fn var(name: &str) -> Node {
        Node::Variable { name: name.into() }
    }

    #[test]
    fn declaration_without_initializer_has_absent_field() {
        let Node::Declaration {
            declarator,
            variable,
            initializer,
        } = stmt("my $x;")
        else {
            panic!("expected declaration");
        };
        assert_eq!(declarator, "my");
        assert_eq!(*variable, var("$x"));
        assert!(initializer.is_none());
    }

    #[test]
    fn declarators_my_our_local() {
        for (source, expected) in [
            ("my $x = 1;", "my"),
            ("our @ys;", "our"),
            ("local %opts;", "local"),
        ] {
            let Node::Declaration { declarator, .. } = stmt(source) else {
                panic!("expected declaration from {source:?}");
            };
            assert_eq!(declarator, expected);
        }
    }

    #[test]
    fn list_declaration() {
        let Node::Declaration { variable, .. } = stmt("my ($a, $b) = (1, 2);") else {
            panic!("expected declaration");
        };
        assert_eq!(
            *variable,
            Node::List {
                elements: vec![var("$a"), var("$b")]
            }
        );
    }

    #[test]
    fn declaration_missing_variable_recovers() {
        let node = stmt("my = 1;");
        assert!(node.is_error());
        if let Node::Error { message, .. } = node {
            assert!(message.contains("Expected variable after 'my'"));
        }
    }

    #[test]
    fn if_elsif_else_nests_rightward() {
        let Node::If { else_block, .. } = stmt("if ($a) { 1; } elsif ($b) { 2; } else { 3; }")
        else {
            panic!("expected if");
        };
        let chain = else_block.unwrap();
        assert_eq!(chain.len(), 1);
        let Node::If { else_block, .. } = &chain[0] else {
            panic!("expected nested elsif as If");
        };
        assert!(else_block.is_some());
    }

    #[test]
    fn unless_statement() {
        let Node::Unless {
            condition,
            then_block,
            else_block,
        } = stmt("unless ($ok) { die \"bad\"; }")
        else {
            panic!("expected unless");
        };
        assert_eq!(*condition, var("$ok"));
        assert_eq!(then_block.len(), 1);
        assert!(else_block.is_none());
    }

    #[test]
    fn while_and_until_loops() {
        let Node::While { label, body, .. } = stmt("while ($x) { $x = $x - 1; }") else {
            panic!("expected while");
        };
        assert!(label.is_none());
        assert_eq!(body.len(), 1);

        assert!(matches!(stmt("until ($done) { }"), Node::Until { .. }));
    }

    #[test]
    fn foreach_defaults_loop_variable_to_underscore() {
        let Node::Foreach { variable, list, .. } = stmt("foreach (@items) { print $_; }") else {
            panic!("expected foreach");
        };
        assert_eq!(*variable, var("$_"));
        assert_eq!(*list, var("@items"));
    }

    #[test]
    fn foreach_with_declared_loop_variable() {
        let Node::Foreach { variable, .. } = stmt("for my $i (1..10) { }") else {
            panic!("expected foreach");
        };
        assert_eq!(*variable, var("$i"));
    }

    #[test]
    fn labeled_loops_and_loop_control() {
        let source =
            "OUTER: while ($x) { INNER: for my $i (@items) { last OUTER if $done; } }";
        let Node::While { label, body, .. } = stmt(source) else {
            panic!("expected while");
        };
        assert_eq!(label.as_deref(), Some("OUTER"));

        let Node::Foreach { label, body, .. } = &body[0] else {
            panic!("expected nested foreach");
        };
        assert_eq!(label.as_deref(), Some("INNER"));

        let Node::If {
            condition,
            then_block,
            ..
        } = &body[0]
        else {
            panic!("expected postfix if");
        };
        assert_eq!(**condition, var("$done"));
        assert_eq!(
            then_block[0],
            Node::Last {
                label: Some("OUTER".into())
            }
        );
    }

    #[test]
    fn postfix_if_wraps_the_statement() {
        let Node::If {
            condition,
            then_block,
            else_block,
        } = stmt("$x = 10 if $condition;")
        else {
            panic!("expected if");
        };
        assert_eq!(*condition, var("$condition"));
        assert!(else_block.is_none());
        assert_eq!(then_block.len(), 1);
        assert!(matches!(then_block[0], Node::Assignment { .. }));
    }

    #[test]
    fn all_four_postfix_modifiers() {
        assert!(matches!(stmt("print 1 if $a;"), Node::If { .. }));
        assert!(matches!(stmt("print 1 unless $a;"), Node::Unless { .. }));
        assert!(matches!(stmt("print 1 while $a;"), Node::While { .. }));
        assert!(matches!(stmt("print 1 until $a;"), Node::Until { .. }));
    }

    #[test]
    fn loop_control_with_and_without_label() {
        let source = "while ($x) { next; last LOOP; redo; }";
        let Node::While { body, .. } = stmt(source) else {
            panic!("expected while");
        };
        assert_eq!(body[0], Node::Next { label: None });
        assert_eq!(
            body[1],
            Node::Last {
                label: Some("LOOP".into())
            }
        );
        assert_eq!(body[2], Node::Redo { label: None });
    }

    #[test]
    fn print_family_with_and_without_parens() {
        let Node::Print { args } = stmt("print \"a\", \"b\";") else {
            panic!("expected print");
        };
        assert_eq!(args.len(), 2);

        let Node::Say { args } = stmt("say($x);") else {
            panic!("expected say");
        };
        assert_eq!(args, vec![var("$x")]);

        let Node::Print { args } = stmt("print;") else {
            panic!("expected print");
        };
        assert!(args.is_empty());

        assert!(matches!(stmt("die \"oops\";"), Node::Die { .. }));
        assert!(matches!(stmt("warn \"careful\";"), Node::Warn { .. }));
    }

    #[test]
    fn unclosed_call_parens_stay_one_statement() {
        let nodes = parse("print(\"hello\", \"world\";");
        assert_eq!(nodes.len(), 1);
        let Node::Print { args } = &nodes[0] else {
            panic!("expected best-effort print");
        };
        assert_eq!(args.len(), 3);
        assert!(args[2].is_error());
    }

    #[test]
    fn return_forms() {
        let Node::Sub { body, .. } = stmt("sub f { return; }") else {
            panic!("expected sub");
        };
        assert_eq!(body[0], Node::Return { value: None });

        let Node::Sub { body, .. } = stmt("sub g { return $x + 1; }") else {
            panic!("expected sub");
        };
        let Node::Return { value } = &body[0] else {
            panic!("expected return");
        };
        assert!(matches!(**value.as_ref().unwrap(), Node::BinaryOp { .. }));
    }

    #[test]
    fn named_sub_with_parameter_defaults() {
        let Node::Sub { name, params, body } = stmt("sub greet($name, $greeting = \"hi\") { print $greeting; }")
        else {
            panic!("expected sub");
        };
        assert_eq!(name.as_deref(), Some("greet"));
        assert_eq!(body.len(), 1);
        assert_eq!(params.len(), 2);
        let Node::Parameter { variable, default } = &params[0] else {
            panic!("expected parameter");
        };
        assert_eq!(**variable, var("$name"));
        assert!(default.is_none());
        let Node::Parameter { default, .. } = &params[1] else {
            panic!("expected parameter");
        };
        assert_eq!(
            **default.as_ref().unwrap(),
            Node::String { value: "hi".into() }
        );
    }

    #[test]
    fn anonymous_sub_in_expression_position() {
        let Node::Declaration { initializer, .. } = stmt("my $f = sub ($x) { return $x; };")
        else {
            panic!("expected declaration");
        };
        let Node::Sub { name, params, .. } = *initializer.unwrap() else {
            panic!("expected sub");
        };
        assert!(name.is_none());
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn malformed_parameter_errors_only_that_slot() {
        let Node::Sub { params, .. } = stmt("sub f($x, 42, $y) { }") else {
            panic!("expected sub");
        };
        assert_eq!(params.len(), 3);
        assert!(!params[0].is_error());
        assert!(params[1].is_error());
        assert!(!params[2].is_error());
    }

    #[test]
    fn bare_block_statement() {
        let Node::Block { statements } = stmt("{ my $x = 1; print $x; }") else {
            panic!("expected block");
        };
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn package_and_use() {
        assert_eq!(
            stmt("package Math::Utils;"),
            Node::Package {
                name: "Math::Utils".into()
            }
        );

        let Node::Use { module, imports } = stmt("use List::Util qw(sum max);") else {
            panic!("expected use");
        };
        assert_eq!(module, "List::Util");
        assert_eq!(
            imports,
            vec![
                Node::String { value: "sum".into() },
                Node::String { value: "max".into() },
            ]
        );

        let Node::Use { imports, .. } = stmt("use strict;") else {
            panic!("expected use");
        };
        assert!(imports.is_empty());
    }

    #[test]
    fn class_with_fields_and_methods() {
        let source = "class Counter { field $count = 0; has $step = 1; method increment() { $count = $count + $step; } }";
        let Node::Class { name, body } = stmt(source) else {
            panic!("expected class");
        };
        assert_eq!(name, "Counter");
        assert_eq!(body.len(), 3);

        let Node::Field {
            declarator,
            variable,
            default,
        } = &body[0]
        else {
            panic!("expected field");
        };
        assert_eq!(declarator, "field");
        assert_eq!(**variable, var("$count"));
        assert_eq!(
            **default.as_ref().unwrap(),
            Node::Number { value: "0".into() }
        );

        let Node::Field { declarator, .. } = &body[1] else {
            panic!("expected has field");
        };
        assert_eq!(declarator, "has");

        let Node::Method { name, params, body } = &body[2] else {
            panic!("expected method");
        };
        assert_eq!(name, "increment");
        assert!(params.is_empty());
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn junk_in_class_body_errors_locally() {
        let Node::Class { body, .. } = stmt("class C { field $x; 42; method m() { } }") else {
            panic!("expected class");
        };
        assert_eq!(body.len(), 3);
        assert!(!body[0].is_error());
        assert!(body[1].is_error());
        assert!(matches!(body[2], Node::Method { .. }));
    }

    #[test]
    fn stray_else_is_an_error_statement() {
        let nodes = parse("else { 1; } print 2;");
        assert!(nodes[0].is_error());
        assert!(matches!(nodes.last(), Some(Node::Print { .. })));
    }

    #[test]
    fn missing_condition_abandons_only_that_statement() {
        let nodes = parse("while { } print 1;");
        assert!(nodes[0].is_error());
        assert!(nodes.iter().any(|n| matches!(n, Node::Print { .. })));
    }

    #[test]
    fn terminator_optional_before_closing_brace_and_eof() {
        let Node::Sub { body, .. } = stmt("sub f { return 1 }") else {
            panic!("expected sub");
        };
        assert_eq!(body.len(), 1);

        let nodes = parse("my $x = 1");
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn expression_statement() {
        assert!(matches!(stmt("$x + 1;"), Node::BinaryOp { .. }));
        assert!(matches!(stmt("$obj->poke;"), Node::MethodCall { .. }));
    }
}
