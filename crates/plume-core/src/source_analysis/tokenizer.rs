// Copyright 2026 Plume Contributors
// SPDX-License-Identifier: Apache-2.0

//! Character-level tokenization for Plume source code.
//!
//! This module converts source text into a stream of [`Token`]s. The
//! tokenizer is hand-written for maximum control over error recovery and
//! the context-sensitive scanning rules Perl-style syntax needs.
//!
//! # Design Principles
//!
//! - **Error recovery**: never panic on malformed input; emit
//!   [`TokenKind::Unknown`] tokens and keep scanning
//! - **Streaming input**: source text arrives as an arbitrary sequence of
//!   chunks; the scanner buffers only what the current token needs
//! - **Precise positions**: every token carries the 1-based line/column
//!   of its first character, maintained across chunk boundaries
//!
//! # Division vs. regex
//!
//! A `/` is scanned as a regex literal whenever the previous significant
//! token indicates an expression is expected (start of input, after an
//! operator, after an opening delimiter, after a control keyword), and as
//! an operator otherwise. The decision is deliberately conservative here;
//! the parser owns the remaining ambiguities.
//!
//! # Example
//!
//! ```
//! use plume_core::source_analysis::{Tokenizer, TokenKind};
//!
//! let tokens: Vec<_> = Tokenizer::new("my $x = 1;").collect();
//! assert_eq!(tokens.len(), 5); // my, $x, =, 1, ;
//! assert_eq!(tokens[1].kind, TokenKind::Variable);
//! ```

use std::collections::VecDeque;

use ecow::EcoString;

use super::{Position, Token, TokenKind};

/// Reserved words of the language.
///
/// `qw` is included: when followed by a delimiter it scans as a composite
/// quote-word literal, but it is still reserved on its own.
const KEYWORDS: &[&str] = &[
    "my", "our", "local", "sub", "class", "field", "has", "method", "package", "if", "elsif",
    "else", "unless", "while", "until", "for", "foreach", "return", "last", "next", "redo", "do",
    "use", "print", "say", "die", "warn", "qw", "true", "false",
];

/// Three-character operators, tried first (maximal munch).
const OPERATORS_3: &[&str] = &["**=", "//=", "||=", "&&="];

/// Two-character operators, tried before single characters.
const OPERATORS_2: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "**", "//", "=>", "->", "=~", "!~", "..", "+=", "-=",
    "*=", "/=", "%=", ".=",
];

/// Single-character operators.
const OPERATORS_1: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '.', ',', '?', ':', '&', '|', '\\', '~',
];

/// Returns `true` if the character can start an identifier (or follow a
/// sigil).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns `true` if the character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A tokenizer over an incrementally delivered chunk stream.
///
/// Implements [`Iterator`]; the sequence is finite (ends when the chunk
/// stream ends) and non-restartable. Pull-based: upstream chunks are
/// requested only when the scanner's lookahead needs more characters.
pub struct Tokenizer<I> {
    /// Upstream producer of source-text chunks.
    chunks: I,
    /// Characters buffered but not yet consumed.
    buffer: VecDeque<char>,
    /// 1-based line of the next unconsumed character.
    line: u32,
    /// 1-based column of the next unconsumed character.
    column: u32,
    /// Kind and text of the last token produced, for the division-vs-regex
    /// decision. `None` at start of input.
    prev: Option<(TokenKind, EcoString)>,
}

impl<I> std::fmt::Debug for Tokenizer<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("line", &self.line)
            .field("column", &self.column)
            .finish()
    }
}

impl Tokenizer<std::iter::Once<String>> {
    /// Creates a tokenizer for source text delivered as a single chunk.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self::from_chunks(std::iter::once(source.to_string()))
    }
}

impl<I> Tokenizer<I>
where
    I: Iterator<Item = String>,
{
    /// Creates a tokenizer over an arbitrary chunk stream.
    ///
    /// Chunk boundaries are invisible to scanning: a token may span any
    /// number of chunks.
    #[must_use]
    pub fn from_chunks(chunks: I) -> Self {
        Self {
            chunks,
            buffer: VecDeque::new(),
            line: 1,
            column: 1,
            prev: None,
        }
    }

    /// Position of the next unconsumed character.
    ///
    /// Takes `&mut self` so the call resolves here rather than to
    /// `Iterator::position` on the same receiver.
    fn position(&mut self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Ensures at least `n` characters are buffered, pulling upstream
    /// chunks as needed. Returns `false` if the input ended first.
    fn fill(&mut self, n: usize) -> bool {
        while self.buffer.len() < n {
            match self.chunks.next() {
                Some(chunk) => self.buffer.extend(chunk.chars()),
                None => return false,
            }
        }
        true
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.fill(1);
        self.buffer.front().copied()
    }

    /// Peeks `n+1` characters ahead without consuming (n=0 is the same as
    /// `peek_char`).
    fn peek_char_n(&mut self, n: usize) -> Option<char> {
        self.fill(n + 1);
        self.buffer.get(n).copied()
    }

    /// Consumes the next character, updating the line/column cursor.
    fn advance(&mut self) -> Option<char> {
        self.fill(1);
        let c = self.buffer.pop_front()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while the predicate holds, collecting them.
    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> EcoString {
        let mut text = EcoString::new();
        while self.peek_char().is_some_and(&predicate) {
            if let Some(c) = self.advance() {
                text.push(c);
            }
        }
        text
    }

    /// Skips whitespace and `#` line comments. Neither produces a token,
    /// but both advance the cursor.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Scans the next token. `None` at end of input.
    fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let c = self.peek_char()?;
        let position = self.position();

        let token = match c {
            '0'..='9' => self.scan_number(position),
            '"' | '\'' => self.scan_string(c, position),
            '$' | '@' | '%' => self.scan_sigil(c, position),
            c if is_ident_start(c) => self.scan_identifier_or_keyword(position),
            '(' => self.scan_single(TokenKind::LParen, position),
            ')' => self.scan_single(TokenKind::RParen, position),
            '{' => self.scan_single(TokenKind::LBrace, position),
            '}' => self.scan_single(TokenKind::RBrace, position),
            '[' => self.scan_single(TokenKind::LBracket, position),
            ']' => self.scan_single(TokenKind::RBracket, position),
            ';' => self.scan_single(TokenKind::Terminator, position),
            '/' if self.expression_expected() => self.scan_regex(position),
            c if OPERATORS_1.contains(&c) => self.scan_operator(position),
            // Unknown character - error recovery, never a hard failure
            _ => {
                self.advance();
                Token::new(TokenKind::Unknown, c, position)
            }
        };

        self.prev = Some((token.kind, token.value.clone()));
        Some(token)
    }

    /// Returns `true` if the previous token puts us in a position where
    /// an expression (and therefore a regex literal) is expected.
    fn expression_expected(&self) -> bool {
        match &self.prev {
            // Start of input
            None => true,
            Some((kind, value)) => match kind {
                TokenKind::Operator | TokenKind::Terminator => true,
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => true,
                // Control keywords expect a condition; literal-like
                // keywords (`true`, `false`, `qw(...)`) do not.
                TokenKind::Keyword => {
                    value != "true" && value != "false" && !value.starts_with("qw")
                }
                TokenKind::Number
                | TokenKind::String
                | TokenKind::Variable
                | TokenKind::Identifier
                | TokenKind::Regex
                | TokenKind::RParen
                | TokenKind::RBrace
                | TokenKind::RBracket
                | TokenKind::Unknown => false,
            },
        }
    }

    /// Consumes one character into a token of the given kind.
    fn scan_single(&mut self, kind: TokenKind, position: Position) -> Token {
        let c = self.advance().unwrap_or_default();
        Token::new(kind, c, position)
    }

    /// Scans an integer or floating-point literal: `42`, `3.14`, `1e10`.
    ///
    /// The raw text is preserved verbatim so serialization of the parsed
    /// tree is byte-stable.
    fn scan_number(&mut self, position: Position) -> Token {
        let mut text = self.take_while(|c| c.is_ascii_digit());

        // Fractional part: a dot followed by a digit (`1..10` stays a range)
        if self.peek_char() == Some('.') && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            text.push('.');
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        // Exponent part: e or E, optional sign, digits
        let has_exponent = match (self.peek_char(), self.peek_char_n(1), self.peek_char_n(2)) {
            (Some('e' | 'E'), Some(d), _) if d.is_ascii_digit() => true,
            (Some('e' | 'E'), Some('+' | '-'), Some(d)) if d.is_ascii_digit() => true,
            _ => false,
        };
        if has_exponent {
            if let Some(e) = self.advance() {
                text.push(e);
            }
            if matches!(self.peek_char(), Some('+' | '-')) {
                if let Some(sign) = self.advance() {
                    text.push(sign);
                }
            }
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }

        Token::new(TokenKind::Number, text, position)
    }

    /// Scans a string literal for either quote style.
    ///
    /// Backslash-escaped quotes do not terminate the literal. If the input
    /// ends before the closing quote, a single [`TokenKind::Unknown`] token
    /// is produced carrying the opening quote plus the partial body,
    /// positioned at the *opening* quote.
    fn scan_string(&mut self, quote: char, position: Position) -> Token {
        self.advance(); // opening quote

        let mut content = EcoString::new();
        // Raw text as consumed, kept for the error token on unterminated input
        let mut raw = EcoString::new();
        raw.push(quote);

        loop {
            match self.peek_char() {
                None => {
                    return Token::new(TokenKind::Unknown, raw, position);
                }
                Some('\\') => {
                    self.advance();
                    raw.push('\\');
                    match self.advance() {
                        None => {
                            return Token::new(TokenKind::Unknown, raw, position);
                        }
                        Some(c) => {
                            raw.push(c);
                            // Resolve the escaped delimiter and backslash;
                            // other escapes pass through verbatim.
                            if c == quote || c == '\\' {
                                content.push(c);
                            } else {
                                content.push('\\');
                                content.push(c);
                            }
                        }
                    }
                }
                Some(c) if c == quote => {
                    self.advance(); // closing quote
                    return Token::new(TokenKind::String, content, position);
                }
                Some(c) => {
                    self.advance();
                    raw.push(c);
                    content.push(c);
                }
            }
        }
    }

    /// Scans a sigil-prefixed variable, or falls back when the sigil is
    /// not followed by an identifier character.
    ///
    /// `%` and `@` fall back to operator scanning (`%` is also modulo);
    /// a lone `$` has no other reading and becomes an `Unknown` token.
    fn scan_sigil(&mut self, sigil: char, position: Position) -> Token {
        if self.peek_char_n(1).is_some_and(is_ident_start) {
            self.advance(); // sigil
            let mut name = EcoString::new();
            name.push(sigil);
            name.push_str(&self.take_while(is_ident_continue));
            return Token::new(TokenKind::Variable, name, position);
        }

        match sigil {
            '%' | '@' => self.scan_operator(position),
            _ => {
                self.advance();
                Token::new(TokenKind::Unknown, sigil, position)
            }
        }
    }

    /// Scans an identifier or keyword; identifiers may contain `::`
    /// package separators (`List::Util`). A `qw` keyword immediately
    /// followed by a delimiter scans as one composite quote-word token.
    fn scan_identifier_or_keyword(&mut self, position: Position) -> Token {
        let mut text = self.take_while(is_ident_continue);

        // Package separators: consume `::` only when an identifier follows
        while self.peek_char() == Some(':')
            && self.peek_char_n(1) == Some(':')
            && self.peek_char_n(2).is_some_and(is_ident_start)
        {
            self.advance();
            self.advance();
            text.push_str("::");
            text.push_str(&self.take_while(is_ident_continue));
        }

        // A word after `->` is a method name, never a keyword
        if matches!(&self.prev, Some((TokenKind::Operator, op)) if op == "->") {
            return Token::new(TokenKind::Identifier, text, position);
        }

        if text == "qw" {
            if let Some(open) = self.peek_char() {
                if matches!(open, '(' | '[' | '{' | '/') {
                    return self.scan_quote_words(text, open, position);
                }
            }
        }

        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, position)
    }

    /// Scans the delimited body of a `qw` literal into a single composite
    /// keyword token: `qw(a b c)`. The parser splits the inner text into
    /// individual string nodes later.
    fn scan_quote_words(&mut self, mut text: EcoString, open: char, position: Position) -> Token {
        let close = match open {
            '(' => ')',
            '[' => ']',
            '{' => '}',
            _ => '/',
        };

        self.advance(); // opening delimiter
        text.push(open);

        loop {
            match self.peek_char() {
                None => {
                    // Unterminated qw list - preserve the partial text
                    return Token::new(TokenKind::Unknown, text, position);
                }
                Some(c) if c == close => {
                    self.advance();
                    text.push(close);
                    return Token::new(TokenKind::Keyword, text, position);
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
    }

    /// Scans a regex literal: `/pattern/flags`.
    ///
    /// The pattern ends at the first unescaped `/`; trailing alphabetic
    /// characters are captured as flags. The token value is the full raw
    /// form including both slashes.
    fn scan_regex(&mut self, position: Position) -> Token {
        self.advance(); // opening slash
        let mut text = EcoString::new();
        text.push('/');

        loop {
            match self.peek_char() {
                None => {
                    return Token::new(TokenKind::Unknown, text, position);
                }
                Some('\\') => {
                    self.advance();
                    text.push('\\');
                    match self.advance() {
                        None => {
                            return Token::new(TokenKind::Unknown, text, position);
                        }
                        Some(c) => text.push(c),
                    }
                }
                Some('/') => {
                    self.advance();
                    text.push('/');
                    break;
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }

        text.push_str(&self.take_while(|c| c.is_ascii_alphabetic()));
        Token::new(TokenKind::Regex, text, position)
    }

    /// Scans an operator, always preferring the longest valid match.
    fn scan_operator(&mut self, position: Position) -> Token {
        // Maximal munch: look at up to three characters
        let mut lookahead = String::new();
        for n in 0..3 {
            match self.peek_char_n(n) {
                Some(c) => lookahead.push(c),
                None => break,
            }
        }

        if lookahead.len() == 3 && OPERATORS_3.contains(&lookahead.as_str()) {
            for _ in 0..3 {
                self.advance();
            }
            return Token::new(TokenKind::Operator, lookahead, position);
        }

        let two: String = lookahead.chars().take(2).collect();
        if two.len() == 2 && OPERATORS_2.contains(&two.as_str()) {
            self.advance();
            self.advance();
            return Token::new(TokenKind::Operator, two, position);
        }

        let c = self.advance().unwrap_or_default();
        Token::new(TokenKind::Operator, c, position)
    }
}

impl<I> Iterator for Tokenizer<I>
where
    I: Iterator<Item = String>,
{
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Convenience function to tokenize source into a vector of tokens.
///
/// For streaming use cases, prefer the [`Tokenizer`] iterator directly.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to tokenize and extract `(kind, value)` pairs.
    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.value.to_string()))
            .collect()
    }

    #[test]
    fn tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
        assert!(tokenize("# just a comment").is_empty());
    }

    #[test]
    fn tokenize_numbers() {
        assert_eq!(
            kinds("42 3.14 0 1e10 2.5e-3"),
            vec![
                (TokenKind::Number, "42".into()),
                (TokenKind::Number, "3.14".into()),
                (TokenKind::Number, "0".into()),
                (TokenKind::Number, "1e10".into()),
                (TokenKind::Number, "2.5e-3".into()),
            ]
        );
    }

    #[test]
    fn number_does_not_swallow_range() {
        assert_eq!(
            kinds("1..10"),
            vec![
                (TokenKind::Number, "1".into()),
                (TokenKind::Operator, "..".into()),
                (TokenKind::Number, "10".into()),
            ]
        );
    }

    #[test]
    fn tokenize_variables() {
        assert_eq!(
            kinds("$x @items %opts $_ $ENV @ARGV"),
            vec![
                (TokenKind::Variable, "$x".into()),
                (TokenKind::Variable, "@items".into()),
                (TokenKind::Variable, "%opts".into()),
                (TokenKind::Variable, "$_".into()),
                (TokenKind::Variable, "$ENV".into()),
                (TokenKind::Variable, "@ARGV".into()),
            ]
        );
    }

    #[test]
    fn percent_is_modulo_without_identifier() {
        assert_eq!(
            kinds("10 % 3"),
            vec![
                (TokenKind::Number, "10".into()),
                (TokenKind::Operator, "%".into()),
                (TokenKind::Number, "3".into()),
            ]
        );
    }

    #[test]
    fn tokenize_strings_both_quote_styles() {
        assert_eq!(
            kinds(r#""hello" 'world'"#),
            vec![
                (TokenKind::String, "hello".into()),
                (TokenKind::String, "world".into()),
            ]
        );
    }

    #[test]
    fn string_with_escaped_quote() {
        assert_eq!(
            kinds(r#""it\"s""#),
            vec![(TokenKind::String, "it\"s".into())]
        );
        assert_eq!(kinds(r"'don\'t'"), vec![(TokenKind::String, "don't".into())]);
    }

    #[test]
    fn unterminated_string_preserves_opening_position() {
        let tokens = tokenize("my $str = \"hello");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Unknown);
        assert_eq!(last.value, "\"hello");
        assert_eq!(last.position, Position::new(1, 11));
    }

    #[test]
    fn maximal_munch_operators() {
        assert_eq!(
            kinds("$a //= $b"),
            vec![
                (TokenKind::Variable, "$a".into()),
                (TokenKind::Operator, "//=".into()),
                (TokenKind::Variable, "$b".into()),
            ]
        );
        assert_eq!(
            kinds("$x **= 2"),
            vec![
                (TokenKind::Variable, "$x".into()),
                (TokenKind::Operator, "**=".into()),
                (TokenKind::Number, "2".into()),
            ]
        );
        assert_eq!(
            kinds("$a <= $b"),
            vec![
                (TokenKind::Variable, "$a".into()),
                (TokenKind::Operator, "<=".into()),
                (TokenKind::Variable, "$b".into()),
            ]
        );
    }

    #[test]
    fn division_after_value_regex_after_operator() {
        assert_eq!(
            kinds("10 / 2"),
            vec![
                (TokenKind::Number, "10".into()),
                (TokenKind::Operator, "/".into()),
                (TokenKind::Number, "2".into()),
            ]
        );
        assert_eq!(
            kinds("$x =~ /test/"),
            vec![
                (TokenKind::Variable, "$x".into()),
                (TokenKind::Operator, "=~".into()),
                (TokenKind::Regex, "/test/".into()),
            ]
        );
    }

    #[test]
    fn regex_at_condition_position() {
        let tokens = tokenize("if (/test/i) { }");
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].value, "/test/i");
    }

    #[test]
    fn regex_with_escaped_slash() {
        let tokens = tokenize("= /a\\/b/");
        assert_eq!(tokens[1].kind, TokenKind::Regex);
        assert_eq!(tokens[1].value, "/a\\/b/");
    }

    #[test]
    fn defined_or_stays_an_operator() {
        assert_eq!(
            kinds("$a // $b"),
            vec![
                (TokenKind::Variable, "$a".into()),
                (TokenKind::Operator, "//".into()),
                (TokenKind::Variable, "$b".into()),
            ]
        );
    }

    #[test]
    fn quote_words_is_one_composite_token() {
        assert_eq!(
            kinds("qw(a b c)"),
            vec![(TokenKind::Keyword, "qw(a b c)".into())]
        );
        assert_eq!(
            kinds("qw[x y]"),
            vec![(TokenKind::Keyword, "qw[x y]".into())]
        );
        assert_eq!(
            kinds("qw/one two/"),
            vec![(TokenKind::Keyword, "qw/one two/".into())]
        );
    }

    #[test]
    fn identifiers_with_package_separators() {
        assert_eq!(
            kinds("List::Util"),
            vec![(TokenKind::Identifier, "List::Util".into())]
        );
        // A trailing colon is not a separator
        assert_eq!(
            kinds("LOOP:"),
            vec![
                (TokenKind::Identifier, "LOOP".into()),
                (TokenKind::Operator, ":".into()),
            ]
        );
    }

    #[test]
    fn unknown_character_is_recovered() {
        let tokens = tokenize("my $x = `ls`;");
        let unknowns: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Unknown)
            .collect();
        assert_eq!(unknowns.len(), 2);
        assert_eq!(unknowns[0].value, "`");
    }

    #[test]
    fn comments_advance_positions() {
        let tokens = tokenize("# header\nmy $x;");
        assert_eq!(tokens[0].value, "my");
        assert_eq!(tokens[0].position, Position::new(2, 1));
        assert_eq!(tokens[1].position, Position::new(2, 4));
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("my $x = 1;\n  print $x;");
        assert_eq!(tokens[0].position, Position::new(1, 1));
        assert_eq!(tokens[1].position, Position::new(1, 4));
        assert_eq!(tokens[5].value, "print");
        assert_eq!(tokens[5].position, Position::new(2, 3));
    }

    #[test]
    fn chunk_boundaries_are_invisible() {
        let whole = tokenize("my $count = 42;\nprint $count;");
        let chunked: Vec<Token> = Tokenizer::from_chunks(
            ["my $cou", "nt = 4", "2;\npri", "nt $count;"]
                .iter()
                .map(ToString::to_string),
        )
        .collect();
        assert_eq!(whole, chunked);
    }

    #[test]
    fn reserved_word_after_arrow_is_a_method_name() {
        assert_eq!(
            kinds("$obj->print"),
            vec![
                (TokenKind::Variable, "$obj".into()),
                (TokenKind::Operator, "->".into()),
                (TokenKind::Identifier, "print".into()),
            ]
        );
        assert_eq!(
            kinds("$h->do(1)"),
            vec![
                (TokenKind::Variable, "$h".into()),
                (TokenKind::Operator, "->".into()),
                (TokenKind::Identifier, "do".into()),
                (TokenKind::LParen, "(".into()),
                (TokenKind::Number, "1".into()),
                (TokenKind::RParen, ")".into()),
            ]
        );
    }

    #[test]
    fn lone_sigils_fall_back() {
        // `@` without an identifier scans as an operator, like `%`
        assert_eq!(
            kinds("@ x")[0],
            (TokenKind::Operator, "@".into())
        );
        // `$` has no operator reading
        assert_eq!(kinds("$ x")[0], (TokenKind::Unknown, "$".into()));
    }

    #[test]
    fn fat_comma_and_arrow() {
        assert_eq!(
            kinds("a => 1"),
            vec![
                (TokenKind::Identifier, "a".into()),
                (TokenKind::Operator, "=>".into()),
                (TokenKind::Number, "1".into()),
            ]
        );
        assert_eq!(
            kinds("$obj->method"),
            vec![
                (TokenKind::Variable, "$obj".into()),
                (TokenKind::Operator, "->".into()),
                (TokenKind::Identifier, "method".into()),
            ]
        );
    }
}
