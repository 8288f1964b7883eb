/// Token-stream helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, contextual words, operators, and punctuation
/// - Error construction (`error_expected`)
/// - Bounded speculation (`speculate`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.cursor.current()
    }

    /// Return the token `n` positions ahead without consuming anything.
    fn peek_at(&self, n: usize) -> &Token {
        self.cursor.peek_at(n)
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        self.cursor.advance()
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Span of the last consumed token.
    fn previous_span(&self) -> Option<Span> {
        self.cursor.previous().map(|t| t.span)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        match self.previous_span() {
            Some(end) if end.end >= start.start => start.merge(end),
            _ => start,
        }
    }

    /// Consume a run of `;` and return how many there were.
    fn skip_semicolons(&mut self) -> usize {
        let mut count = 0;
        while self.match_punct(PunctuationId::Semicolon) {
            count += 1;
        }
        count
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the given operator.
    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    /// Return `true` if the current token is an identifier spelling the contextual word `id`.
    fn check_contextual(&self, id: KeywordId) -> bool {
        self.peek().kind.is_contextual(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId) -> Result<Span, ParseError> {
        if self.check_keyword(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected([format!("'{}'", apex_core::lang::keywords::as_str(id))]))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId) -> Result<Span, ParseError> {
        if self.check_punct(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected([format!("'{}'", apex_core::lang::punctuation::as_str(id))]))
        }
    }

    fn expect_op(&mut self, id: OperatorId) -> Result<Span, ParseError> {
        if self.check_op(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected([format!("'{}'", apex_core::lang::operators::as_str(id))]))
        }
    }

    fn expect_contextual(&mut self, id: KeywordId) -> Result<Span, ParseError> {
        if self.check_contextual(id) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected([format!("'{}'", apex_core::lang::keywords::as_str(id))]))
        }
    }

    /// Build a [`SyntaxError`] at the current token.
    fn error_expected<I, S>(&self, expected: I) -> ParseError
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let token = self.peek();
        ParseError::Syntax(SyntaxError::new(token.span, expected, token.kind.to_string()))
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    /// Return `true` if tokens `i` and `i + 1` ahead touch with no whitespace between them.
    fn adjacent(&self, i: usize) -> bool {
        self.peek_at(i).span.end == self.peek_at(i + 1).span.start
    }

    /// Recognise a right-shift family operator spelled by adjacent `>` / `>=` tokens.
    fn composed_gt(&self) -> Option<ComposedGt> {
        if !self.check_op(OperatorId::Gt) {
            return None;
        }
        let second = &self.peek_at(1).kind;
        if second.is_operator(OperatorId::GtEq) && self.adjacent(0) {
            return Some(ComposedGt::ShrEq);
        }
        if !(second.is_operator(OperatorId::Gt) && self.adjacent(0)) {
            return None;
        }
        let third = &self.peek_at(2).kind;
        if third.is_operator(OperatorId::GtEq) && self.adjacent(1) {
            Some(ComposedGt::UShrEq)
        } else if third.is_operator(OperatorId::Gt) && self.adjacent(1) {
            Some(ComposedGt::UShr)
        } else {
            Some(ComposedGt::Shr)
        }
    }

    /// Consume a composed operator and return its full span.
    fn consume_composed(&mut self, op: ComposedGt) -> Span {
        let start = self.current_span();
        for _ in 0..op.token_count() {
            self.advance();
        }
        self.span_from(start)
    }

    /// Run `f` as a speculative sub-parse and report whether it matched.
    ///
    /// The cursor is restored on every exit path, success included: callers use the answer to
    /// pick an alternative and then parse it for real. The `speculating` flag is restored to its
    /// previous value, so a speculation started inside another one leaves the outer one active.
    fn speculate(&mut self, f: impl FnOnce(&mut Self) -> Result<(), ParseError>) -> bool {
        let mark = self.cursor.mark();
        let outer = std::mem::replace(&mut self.speculating, true);
        let result = f(self);
        self.speculating = outer;
        self.cursor.rollback(mark);
        if let Err(err) = &result {
            if !outer {
                tracing::trace!(position = self.cursor.position(), %err, "speculative parse rolled back");
            }
        }
        result.is_ok()
    }
}
