//! Punctuation vocabulary.
//!
//! Delimiters, separators, access markers and the few structural markers Apex uses (`@` for
//! annotations, `=>` inside map initializers, `?`/`:` for the ternary and enhanced `for`).
//!
//! ## Examples
//! ```rust
//! use apex_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("=>"), Some(PunctuationId::FatArrow));
//! assert_eq!(punctuation::as_str(PunctuationId::At), "@");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,`, `;` and `:`.
    Separator,
    /// Member access `.`.
    Access,
    /// Misc markers like `?`, `@`, `=>`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    Comma,
    Semicolon,
    Colon,
    Question,
    At,
    Dot,
    FatArrow,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

use PunctuationCategory as C;

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", C::Separator),
    info(PunctuationId::Semicolon, ";", C::Separator),
    info(PunctuationId::Colon, ":", C::Separator),
    info(PunctuationId::Question, "?", C::Marker),
    info(PunctuationId::At, "@", C::Marker),
    info(PunctuationId::Dot, ".", C::Access),
    info(PunctuationId::FatArrow, "=>", C::Marker),
    info(PunctuationId::LParen, "(", C::Delimiter),
    info(PunctuationId::RParen, ")", C::Delimiter),
    info(PunctuationId::LBracket, "[", C::Delimiter),
    info(PunctuationId::RBracket, "]", C::Delimiter),
    info(PunctuationId::LBrace, "{", C::Delimiter),
    info(PunctuationId::RBrace, "}", C::Delimiter),
];

/// Canonical spelling.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
