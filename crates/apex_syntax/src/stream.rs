//! Token cursor with position marks.
//!
//! The parser reads tokens only through [`TokenCursor`]. Besides the usual `current` / `advance`
//! it exposes [`TokenCursor::mark`] and [`TokenCursor::rollback`], which the parser uses for its
//! bounded speculative sub-parses. A mark is just a position, so restoring is O(1).

use crate::ast::Span;
use crate::lexer::{Token, TokenKind};
use std::borrow::Cow;

/// Saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Read-only cursor over a token slice that always ends in `Eof`.
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: Cow<'a, [Token]>,
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Wrap a token slice. If it does not end with `Eof` (hand-built streams), one is appended.
    pub fn new(tokens: &'a [Token]) -> Self {
        let tokens = match tokens.last() {
            Some(last) if matches!(last.kind, TokenKind::Eof) => Cow::Borrowed(tokens),
            last => {
                let end = last.map_or(0, |t| t.span.end);
                let mut owned = tokens.to_vec();
                owned.push(Token::new(TokenKind::Eof, Span::new(end, end)));
                Cow::Owned(owned)
            }
        };
        Self { tokens, pos: 0 }
    }

    /// The token under the cursor.
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The token `n` positions ahead (`peek_at(0)` is `current`); clamps to `Eof`.
    pub fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// The most recently consumed token, if any.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    /// Consume the current token and return it. Never moves past `Eof`.
    pub fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
            &self.tokens[self.pos - 1]
        } else {
            &self.tokens[self.pos]
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn rollback(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// The first token that follows an `Eof` which is not the last token of the stream.
    ///
    /// The cursor never moves past `Eof`, so anything returned here would go unread.
    pub fn token_after_early_eof(&self) -> Option<&Token> {
        let eof = self.tokens.iter().position(|t| matches!(t.kind, TokenKind::Eof))?;
        self.tokens.get(eof + 1)
    }

    /// All tokens, including the trailing `Eof`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
