//! Lexer for Apex source code.
//!
//! Handles tokenization including:
//! - Reserved keywords (case-insensitive) and identifiers
//! - Integer, long (`42L`), decimal and single-quoted string literals
//! - Operators and punctuation
//! - Bracketed SOQL/SOSL literals, captured as single opaque tokens with their bind variables
//! - `//` line comments and `/* */` block comments (skipped)
//!
//! ## Notes
//! - `>` is always emitted on its own (or as `>=`). The parser assembles `>>`, `>>>`, `>>=` and
//!   `>>>=` from adjacent tokens, which keeps `List<List<Id>>` context-free here.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::{QueryLiteral, Span, Spanned};
use crate::diagnostics::LexError;
use apex_core::lang::operators::OperatorId;
use apex_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for Apex source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

/// Which embedded query language a bracketed literal holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryKind {
    Soql,
    Sosl,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<LexError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn error(&mut self, message: impl Into<String>, start: usize) {
        self.errors
            .push(LexError::new(message, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            ' ' | '\t' | '\n' | '\r' | '\u{feff}' => {}

            // Comments and slash operators
            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else {
                    self.operator(start, OperatorId::Slash, &[('=', OperatorId::SlashEq)]);
                }
            }

            // Operators
            '+' => self.operator(
                start,
                OperatorId::Plus,
                &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)],
            ),
            '-' => self.operator(
                start,
                OperatorId::Minus,
                &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
            ),
            '*' => self.operator(start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '&' => self.operator(start, OperatorId::Amp, &[('&', OperatorId::AndAnd), ('=', OperatorId::AmpEq)]),
            '|' => self.operator(start, OperatorId::Pipe, &[('|', OperatorId::OrOr), ('=', OperatorId::PipeEq)]),
            '^' => self.operator(start, OperatorId::Caret, &[('=', OperatorId::CaretEq)]),
            '~' => self.add_op(OperatorId::Tilde, start),
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::NotEqEq, start);
                    } else {
                        self.add_op(OperatorId::NotEq, start);
                    }
                } else {
                    self.add_op(OperatorId::Bang, start);
                }
            }
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::EqEqEq, start);
                    } else {
                        self.add_op(OperatorId::EqEq, start);
                    }
                } else if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start);
                } else {
                    self.add_op(OperatorId::Eq, start);
                }
            }
            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::ShlEq, start);
                    } else {
                        self.add_op(OperatorId::Shl, start);
                    }
                } else {
                    self.operator(
                        start,
                        OperatorId::Lt,
                        &[('=', OperatorId::LtEq), ('>', OperatorId::LtGt)],
                    );
                }
            }
            '>' => self.operator(start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),

            // Punctuation
            '?' => self.add_punct(PunctuationId::Question, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            '.' => self.add_punct(PunctuationId::Dot, start),
            '@' => self.add_punct(PunctuationId::At, start),
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            '[' => match self.query_kind_ahead() {
                Some(kind) => self.scan_query(start, kind),
                None => self.add_punct(PunctuationId::LBracket, start),
            },

            // Strings
            '\'' => self.scan_string(start),

            // Numbers
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => self.error(format!("Unexpected character '{c}'"), start),
        }
    }

    // ========================================================================
    // Operator helpers
    // ========================================================================

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    /// Try to match compound operator, fallback to simple.
    fn operator(&mut self, start: usize, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start);
                return;
            }
        }
        self.add_op(simple, start);
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.error("Unterminated block comment", start);
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string(&mut self, start: usize) {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\'') => break,
                Some('\\') => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('b') => value.push('\u{8}'),
                    Some('f') => value.push('\u{c}'),
                    Some('u') => self.scan_unicode_escape(&mut value),
                    Some(other @ ('\'' | '"' | '\\')) => value.push(other),
                    Some(other) => {
                        // Unknown escapes keep both characters, as the platform does.
                        value.push('\\');
                        value.push(other);
                    }
                    None => {
                        self.error("Unterminated string literal", start);
                        return;
                    }
                },
                Some('\n') | None => {
                    self.error("Unterminated string literal", start);
                    return;
                }
                Some(c) => value.push(c),
            }
        }
        self.add_token(TokenKind::String(value), start);
    }

    fn scan_unicode_escape(&mut self, value: &mut String) {
        let escape_start = self.current_pos.saturating_sub(2);
        let mut code = 0u32;
        for _ in 0..4 {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    self.advance();
                    code = code * 16 + d;
                }
                None => {
                    self.error("Invalid unicode escape", escape_start);
                    return;
                }
            }
        }
        match char::from_u32(code) {
            Some(c) => value.push(c),
            None => self.error("Invalid unicode escape", escape_start),
        }
    }

    fn scan_number(&mut self, start: usize) {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }

        let mut is_float = false;
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            is_float = true;
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }

        let digits_end = self.current_pos;
        let text = &self.source[start..digits_end];

        match self.peek() {
            Some('l' | 'L') if !is_float => {
                self.advance();
                match text.parse::<i64>() {
                    Ok(v) => self.add_token(TokenKind::Long(v), start),
                    Err(_) => self.error(format!("Long literal '{text}' is out of range"), start),
                }
            }
            Some('d' | 'D') => {
                self.advance();
                self.push_float(text, start);
            }
            _ if is_float => self.push_float(text, start),
            _ => match text.parse::<i64>() {
                Ok(v) => self.add_token(TokenKind::Int(v), start),
                Err(_) => self.error(format!("Integer literal '{text}' is out of range"), start),
            },
        }
    }

    fn push_float(&mut self, text: &str, start: usize) {
        match text.parse::<f64>() {
            Ok(v) => self.add_token(TokenKind::Float(v), start),
            Err(_) => self.error(format!("Invalid decimal literal '{text}'"), start),
        }
    }

    // ========================================================================
    // Query literals
    // ========================================================================

    /// After `[`, check whether the next word opens a SOQL or SOSL literal.
    ///
    /// The keyword must be followed by whitespace and then something that can continue the
    /// query (a field for `SELECT`; a quoted, braced or bound search term for `FIND`), so
    /// `items[find]` and `rows[select + 1]` stay index expressions.
    fn query_kind_ahead(&self) -> Option<QueryKind> {
        let rest = self.source[self.current_pos..].trim_start();
        let word_len = rest.find(|c: char| !is_ident_continue(c)).unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_len);
        let next = after.trim_start();
        if next.len() == after.len() {
            return None;
        }
        let next = next.chars().next()?;
        if word.eq_ignore_ascii_case("select") && is_ident_start(next) {
            Some(QueryKind::Soql)
        } else if word.eq_ignore_ascii_case("find") && matches!(next, '\'' | '{' | ':') {
            Some(QueryKind::Sosl)
        } else {
            None
        }
    }

    /// Capture everything up to the matching `]`, skipping over quoted strings.
    fn scan_query(&mut self, start: usize, kind: QueryKind) {
        let text_start = self.current_pos;
        let mut depth = 0usize;
        let mut binds = Vec::new();

        loop {
            let Some(c) = self.advance() else {
                self.error("Unterminated query literal", start);
                return;
            };
            match c {
                '[' => depth += 1,
                ']' if depth == 0 => break,
                ']' => depth -= 1,
                '\'' => {
                    if !self.skip_query_string() {
                        self.error("Unterminated string in query literal", start);
                        return;
                    }
                }
                ':' if self.peek().is_some_and(is_ident_start) => {
                    let bind_start = self.current_pos - 1;
                    self.scan_bind_path();
                    binds.push(Spanned::new(
                        self.source[bind_start..self.current_pos].to_string(),
                        Span::new(bind_start, self.current_pos),
                    ));
                }
                _ => {}
            }
        }

        let text = self.source[text_start..self.current_pos - 1].to_string();
        let literal = QueryLiteral { text, binds };
        let token = match kind {
            QueryKind::Soql => TokenKind::Soql(literal),
            QueryKind::Sosl => TokenKind::Sosl(literal),
        };
        self.add_token(token, start);
    }

    /// Consume `name(.name)*` after a bind colon.
    fn scan_bind_path(&mut self) {
        loop {
            while self.peek().is_some_and(is_ident_continue) {
                self.advance();
            }
            if self.peek() == Some('.') && self.peek_next().is_some_and(is_ident_start) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip a single-quoted string inside a query; returns `false` at EOF.
    fn skip_query_string(&mut self) -> bool {
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('\'') => return true,
                Some(_) => {}
                None => return false,
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            let token = Token::keyword(id, spelling, Span::new(start, self.current_pos));
            self.tokens.push(token);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
