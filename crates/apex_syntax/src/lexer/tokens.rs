//! Token types for the Apex lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words only (contextual words stay `Ident`)
//! - `Operator(OperatorId)` for operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::{QueryLiteral, Span};
use apex_core::lang::keywords::{self, KeywordId};
use apex_core::lang::operators::{self, OperatorId};
use apex_core::lang::punctuation::{self, PunctuationId};
use std::fmt;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    Int(i64),
    Long(i64),
    Float(f64),
    String(String),
    /// Bracketed SOQL query, kept opaque.
    Soql(QueryLiteral),
    /// Bracketed SOSL search, kept opaque.
    Sosl(QueryLiteral),

    // ========== Special ==========
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(id) => write!(f, "'{}'", keywords::as_str(*id)),
            TokenKind::Operator(id) => write!(f, "'{}'", operators::as_str(*id)),
            TokenKind::Punctuation(id) => write!(f, "'{}'", punctuation::as_str(*id)),
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Int(v) => write!(f, "integer {v}"),
            TokenKind::Long(v) => write!(f, "long {v}L"),
            TokenKind::Float(v) => write!(f, "number {v}"),
            TokenKind::String(_) => write!(f, "string literal"),
            TokenKind::Soql(_) => write!(f, "SOQL query"),
            TokenKind::Sosl(_) => write!(f, "SOSL search"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Source spelling of a reserved word written other than in lowercase (`Trigger`, `NEW`).
    pub spelling: Option<String>,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            spelling: None,
        }
    }

    /// Keyword token that remembers how it was written.
    pub fn keyword(id: KeywordId, spelling: &str, span: Span) -> Self {
        let spelling = (spelling != keywords::as_str(id)).then(|| spelling.to_string());
        Self {
            kind: TokenKind::Keyword(id),
            span,
            spelling,
        }
    }

    /// Whether this token carries a value a tree leaf must preserve (identifier or literal).
    pub fn is_leaf_bearing(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Ident(_)
                | TokenKind::Int(_)
                | TokenKind::Long(_)
                | TokenKind::Float(_)
                | TokenKind::String(_)
                | TokenKind::Soql(_)
                | TokenKind::Sosl(_)
        )
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::reserved_from_str(name)
}
