/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
/// It also contains a few small internal helper types shared across the other
/// parser chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// Annotations and modifiers that precede a declaration, in any interleaving.
#[derive(Default)]
struct DeclHeader {
    annotations: Vec<Spanned<Annotation>>,
    modifiers: Vec<Spanned<ModifierId>>,
    start: Option<Span>,
}

impl DeclHeader {
    fn has(&self, id: ModifierId) -> bool {
        self.modifiers.iter().any(|m| m.node == id)
    }
}

/// A right-shift family operator assembled from adjacent `>` / `>=` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComposedGt {
    Shr,
    UShr,
    ShrEq,
    UShrEq,
}

impl ComposedGt {
    fn token_count(self) -> usize {
        match self {
            ComposedGt::Shr | ComposedGt::ShrEq => 2,
            ComposedGt::UShr | ComposedGt::UShrEq => 3,
        }
    }
}

/// Upper bound on tokens inspected when deciding whether `(` opens a cast.
const MAX_CAST_LOOKAHEAD: usize = 48;

/// Deepest nesting of expressions, statements, type arguments and member types the parser
/// descends into.
pub const MAX_NESTING_DEPTH: usize = 1_000;

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and fails on the first error.
/// - The only mutable state is the cursor position, the nesting depth and the speculation
///   flag, all owned by one parse invocation.
pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    /// Set while any speculative sub-parse runs.
    speculating: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `apex_syntax::lexer` (or any equivalent source).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            speculating: false,
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`CompilationUnit`].
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered.
    pub fn parse(mut self) -> Result<CompilationUnit, ParseError> {
        if let Some(stray) = self.cursor.token_after_early_eof() {
            return Err(ParseError::Syntax(SyntaxError::new(
                stray.span,
                ["end of token stream"],
                stray.kind.to_string(),
            )));
        }
        let first = self.current_span();

        let trailing_semicolons;
        let declaration = if self.is_at_end() || self.check_punct(PunctuationId::Semicolon) {
            let start = self.current_span();
            trailing_semicolons = self.skip_semicolons();
            let span = match self.previous_span() {
                Some(end) => start.merge(end),
                None => start,
            };
            Spanned::new(TypeDeclaration::Empty, span)
        } else {
            let decl = self.type_declaration()?;
            trailing_semicolons = self.skip_semicolons();
            decl
        };

        if !self.is_at_end() {
            return Err(self.error_expected(["end of file"]));
        }

        let span = match self.previous_span() {
            Some(end) => first.merge(end),
            None => first,
        };
        Ok(CompilationUnit {
            declaration,
            trailing_semicolons,
            span,
        })
    }

    /// Run `f` one nesting level deeper.
    ///
    /// Past [`MAX_NESTING_DEPTH`] this fails with a [`SyntaxError`] at the current token instead
    /// of recursing further.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, ParseError>) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_expected(["less deeply nested code"]));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
