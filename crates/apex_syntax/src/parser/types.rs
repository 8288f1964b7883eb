/// Type reference parsing and the cast lookahead.
///
/// Generic arguments close on single `>` tokens, so `Map<Id, List<Account>>` needs no
/// token splitting.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// `Name ('.' Name)* ('<' TypeRef (',' TypeRef)* '>')? ('[' ']')*`
    fn type_ref(&mut self) -> Result<Spanned<TypeRef>, ParseError> {
        let start = self.current_span();
        let mut ty = self.type_ref_no_dims()?.node;
        while self.check_punct(PunctuationId::LBracket) && self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket) {
            self.advance();
            self.advance();
            ty.array_dims += 1;
        }
        Ok(Spanned::new(ty, self.span_from(start)))
    }

    /// A type reference without trailing `[]`; `new` parses dimensions itself.
    fn type_ref_no_dims(&mut self) -> Result<Spanned<TypeRef>, ParseError> {
        let start = self.current_span();
        let mut segments = vec![self.identifier()?];
        while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            self.advance();
            segments.push(self.identifier()?);
        }

        let mut arguments = Vec::new();
        if self.match_op(OperatorId::Lt) {
            arguments.push(self.nested(Self::type_ref)?);
            while self.match_punct(PunctuationId::Comma) {
                arguments.push(self.nested(Self::type_ref)?);
            }
            if !self.match_op(OperatorId::Gt) {
                return Err(self.error_expected(["'>'", "','"]));
            }
        }

        Ok(Spanned::new(
            TypeRef {
                segments,
                arguments,
                array_dims: 0,
            },
            self.span_from(start),
        ))
    }

    // ========================================================================
    // Cast lookahead
    // ========================================================================

    /// Decide whether the `(` under the cursor opens a cast.
    ///
    /// It does when the parenthesised tokens form a type shape and the token after `)` can start
    /// a unary operand other than `+`, `-`, `++` or `--` (those keep `(a) - b` a subtraction).
    /// Only token kinds are inspected, never more than [`MAX_CAST_LOOKAHEAD`] tokens.
    fn is_cast_ahead(&self) -> bool {
        if !self.check_punct(PunctuationId::LParen) {
            return false;
        }
        let Some(end) = self.type_shape_end(1) else {
            return false;
        };
        self.peek_at(end).kind.is_punctuation(PunctuationId::RParen) && self.starts_cast_operand(end + 1)
    }

    /// Index just past a type shape starting at lookahead offset `i`.
    fn type_shape_end(&self, mut i: usize) -> Option<usize> {
        if i > MAX_CAST_LOOKAHEAD || !matches!(self.peek_at(i).kind, TokenKind::Ident(_)) {
            return None;
        }
        i += 1;
        while self.peek_at(i).kind.is_punctuation(PunctuationId::Dot)
            && matches!(self.peek_at(i + 1).kind, TokenKind::Ident(_))
        {
            i += 2;
        }
        if self.peek_at(i).kind.is_operator(OperatorId::Lt) {
            i += 1;
            loop {
                i = self.type_shape_end(i)?;
                let kind = &self.peek_at(i).kind;
                if kind.is_punctuation(PunctuationId::Comma) {
                    i += 1;
                } else if kind.is_operator(OperatorId::Gt) {
                    i += 1;
                    break;
                } else {
                    return None;
                }
            }
        }
        while self.peek_at(i).kind.is_punctuation(PunctuationId::LBracket)
            && self.peek_at(i + 1).kind.is_punctuation(PunctuationId::RBracket)
        {
            i += 2;
        }
        (i <= MAX_CAST_LOOKAHEAD).then_some(i)
    }

    fn starts_cast_operand(&self, i: usize) -> bool {
        match &self.peek_at(i).kind {
            TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Long(_)
            | TokenKind::Float(_)
            | TokenKind::String(_)
            | TokenKind::Soql(_)
            | TokenKind::Sosl(_) => true,
            TokenKind::Keyword(kw) => matches!(
                kw,
                KeywordId::This
                    | KeywordId::Super
                    | KeywordId::New
                    | KeywordId::True
                    | KeywordId::False
                    | KeywordId::Null
                    | KeywordId::Trigger
            ),
            TokenKind::Punctuation(p) => *p == PunctuationId::LParen,
            TokenKind::Operator(op) => matches!(op, OperatorId::Bang | OperatorId::Tilde),
            TokenKind::Eof => false,
        }
    }
}
