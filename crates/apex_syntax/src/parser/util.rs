/// Miscellaneous parser utilities.
///
/// Identifier parsing, including the contexts where reserved words are acceptable names
/// (`Trigger.new`, `Database.insert(...)`).
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Spanned<Ident>, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                let name = name.clone();
                self.advance();
                Ok(Spanned::new(name, span))
            }
            _ => Err(self.error_expected(["identifier"])),
        }
    }

    /// Parse a member name after `.`; reserved words are allowed here and keep their source
    /// spelling.
    fn member_name(&mut self) -> Result<Spanned<Ident>, ParseError> {
        let token = self.peek();
        let span = token.span;
        let Some(name) = token.written_word().map(str::to_string) else {
            return Err(self.error_expected(["identifier"]));
        };
        self.advance();
        Ok(Spanned::new(name, span))
    }

    /// `name ('.' name)*`
    fn qualified_name(&mut self) -> Result<Spanned<QualifiedName>, ParseError> {
        let start = self.current_span();
        let mut parts = vec![self.identifier()?];
        while self.check_punct(PunctuationId::Dot) {
            self.advance();
            parts.push(self.member_name()?);
        }
        Ok(Spanned::new(QualifiedName { parts }, self.span_from(start)))
    }
}
