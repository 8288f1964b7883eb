/// Parse a token stream into a [`CompilationUnit`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `apex_syntax::lexer`. A missing trailing `Eof` is
///   tolerated.
///
/// ## Errors
/// Returns the first [`ParseError`]; no partial tree is produced.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<CompilationUnit, ParseError> {
    Parser::new(tokens).parse()
}

/// Lex and parse `source` in one step.
///
/// Lexical errors surface as [`ParseError::Lex`] carrying the first error the lexer reported.
pub fn parse_source(source: &str) -> Result<CompilationUnit, ParseError> {
    let tokens = crate::lexer::lex(source).map_err(|errors| match errors.into_iter().next() {
        Some(first) => ParseError::Lex(first),
        None => ParseError::Lex(crate::diagnostics::LexError::new("invalid input", Span::default())),
    })?;
    parse(&tokens)
}
