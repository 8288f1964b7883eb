//! Errors produced by the lexer and parser.
//!
//! Every error carries a [`Span`] and derives [`miette::Diagnostic`], so callers can render it
//! against the source with `miette::Report::new(err).with_source_code(..)`.

use crate::ast::Span;
use miette::Diagnostic;
use thiserror::Error;

/// A character-level problem found while tokenizing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(apex::lex))]
pub struct LexError {
    pub message: String,
    #[label("here")]
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// The token stream did not match any grammar alternative at `span`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("expected {}, found {found}", describe_expected(.expected))]
#[diagnostic(code(apex::syntax))]
pub struct SyntaxError {
    #[label("unexpected {found}")]
    pub span: Span,
    /// Human-readable descriptions of what would have been accepted, deduplicated.
    pub expected: Vec<String>,
    pub found: String,
}

impl SyntaxError {
    pub fn new(span: Span, expected: impl IntoIterator<Item = impl Into<String>>, found: impl Into<String>) -> Self {
        let mut deduped: Vec<String> = Vec::new();
        for e in expected {
            let e = e.into();
            if !deduped.contains(&e) {
                deduped.push(e);
            }
        }
        Self {
            span,
            expected: deduped,
            found: found.into(),
        }
    }
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => "something else".to_string(),
        [one] => one.clone(),
        [init @ .., last] => format!("one of {} or {last}", init.join(", ")),
    }
}

/// Fatal error for one parse call. No partial tree is returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("unknown trigger event '{found}'")]
    #[diagnostic(
        code(apex::unknown_trigger_event),
        help("valid events are before/after insert, update, delete, and after undelete")
    )]
    UnknownTriggerEvent {
        #[label("not a trigger event")]
        span: Span,
        found: String,
    },

    #[error("malformed annotation value: {reason}")]
    #[diagnostic(
        code(apex::malformed_annotation_value),
        help("annotation values must be literals, `{{...}}` arrays or nested annotations")
    )]
    MalformedAnnotationValue {
        #[label("invalid value")]
        span: Span,
        reason: String,
    },

    #[error("duplicate modifier '{modifier}'")]
    #[diagnostic(code(apex::duplicate_modifier))]
    DuplicateModifier {
        #[label("already specified")]
        span: Span,
        modifier: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Location of the failure.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax(e) => e.span,
            ParseError::UnknownTriggerEvent { span, .. }
            | ParseError::MalformedAnnotationValue { span, .. }
            | ParseError::DuplicateModifier { span, .. } => *span,
            ParseError::Lex(e) => e.span,
        }
    }
}

/// Get line number, column number, and line text for a byte offset (both 1-based).
pub fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    (line_num, offset - line_start + 1, &source[line_start..line_end])
}
