//! Define the keyword vocabulary for the Apex language.
//!
//! This module is the single source of truth for keyword spellings: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records the canonical spelling,
//! a category, and whether the word is **reserved**.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive** (`Class`, `CLASS` and `class` are the same word).
//! - Reserved words are lexed as keyword tokens. Contextual words (`get`, `set`, `sharing`, `on`,
//!   `before`, ...) stay identifiers and the parser recognises them with [`is_contextual`], so they
//!   remain usable as ordinary names elsewhere.
//!
//! ## Examples
//! ```rust
//! use apex_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("Trigger"), Some(KeywordId::Trigger));
//! assert!(keywords::is_reserved(KeywordId::Trigger));
//! assert!(!keywords::is_reserved(KeywordId::Sharing));
//! ```

/// Stable identifier for every keyword, reserved or contextual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Class,
    Interface,
    Enum,
    Trigger,
    Extends,
    Implements,
    Void,

    // Modifiers
    Public,
    Private,
    Protected,
    Global,
    Static,
    Final,
    Abstract,
    Virtual,
    Override,
    Transient,
    TestMethod,
    WebService,
    With,

    // Control flow
    If,
    Else,
    While,
    Do,
    For,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Catch,
    Finally,

    // Expressions
    New,
    This,
    Super,
    InstanceOf,

    // Literals
    True,
    False,
    Null,

    // DML shortcuts
    Insert,
    Update,
    Upsert,
    Delete,
    Undelete,
    Merge,

    // Contextual words (lexed as identifiers)
    Get,
    Set,
    Sharing,
    Without,
    Inherited,
    On,
    Before,
    After,
    System,
    RunAs,
}

/// High-level grouping for documentation and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Modifier,
    ControlFlow,
    Expression,
    Literal,
    Dml,
    Contextual,
}

/// Metadata for a keyword.
///
/// ## Notes
/// - `canonical` is the lowercase spelling used in docs and diagnostics.
/// - `reserved` words can never be used as identifiers; contextual words can.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
    pub reserved: bool,
}

use KeywordCategory as C;

/// Registry of all keywords.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Class, "class", C::Declaration),
    info(KeywordId::Interface, "interface", C::Declaration),
    info(KeywordId::Enum, "enum", C::Declaration),
    info(KeywordId::Trigger, "trigger", C::Declaration),
    info(KeywordId::Extends, "extends", C::Declaration),
    info(KeywordId::Implements, "implements", C::Declaration),
    info(KeywordId::Void, "void", C::Declaration),
    // Modifiers
    info(KeywordId::Public, "public", C::Modifier),
    info(KeywordId::Private, "private", C::Modifier),
    info(KeywordId::Protected, "protected", C::Modifier),
    info(KeywordId::Global, "global", C::Modifier),
    info(KeywordId::Static, "static", C::Modifier),
    info(KeywordId::Final, "final", C::Modifier),
    info(KeywordId::Abstract, "abstract", C::Modifier),
    info(KeywordId::Virtual, "virtual", C::Modifier),
    info(KeywordId::Override, "override", C::Modifier),
    info(KeywordId::Transient, "transient", C::Modifier),
    info(KeywordId::TestMethod, "testmethod", C::Modifier),
    info(KeywordId::WebService, "webservice", C::Modifier),
    info(KeywordId::With, "with", C::Modifier),
    // Control flow
    info(KeywordId::If, "if", C::ControlFlow),
    info(KeywordId::Else, "else", C::ControlFlow),
    info(KeywordId::While, "while", C::ControlFlow),
    info(KeywordId::Do, "do", C::ControlFlow),
    info(KeywordId::For, "for", C::ControlFlow),
    info(KeywordId::Break, "break", C::ControlFlow),
    info(KeywordId::Continue, "continue", C::ControlFlow),
    info(KeywordId::Return, "return", C::ControlFlow),
    info(KeywordId::Throw, "throw", C::ControlFlow),
    info(KeywordId::Try, "try", C::ControlFlow),
    info(KeywordId::Catch, "catch", C::ControlFlow),
    info(KeywordId::Finally, "finally", C::ControlFlow),
    // Expressions
    info(KeywordId::New, "new", C::Expression),
    info(KeywordId::This, "this", C::Expression),
    info(KeywordId::Super, "super", C::Expression),
    info(KeywordId::InstanceOf, "instanceof", C::Expression),
    // Literals
    info(KeywordId::True, "true", C::Literal),
    info(KeywordId::False, "false", C::Literal),
    info(KeywordId::Null, "null", C::Literal),
    // DML shortcuts
    info(KeywordId::Insert, "insert", C::Dml),
    info(KeywordId::Update, "update", C::Dml),
    info(KeywordId::Upsert, "upsert", C::Dml),
    info(KeywordId::Delete, "delete", C::Dml),
    info(KeywordId::Undelete, "undelete", C::Dml),
    info(KeywordId::Merge, "merge", C::Dml),
    // Contextual
    contextual(KeywordId::Get, "get"),
    contextual(KeywordId::Set, "set"),
    contextual(KeywordId::Sharing, "sharing"),
    contextual(KeywordId::Without, "without"),
    contextual(KeywordId::Inherited, "inherited"),
    contextual(KeywordId::On, "on"),
    contextual(KeywordId::Before, "before"),
    contextual(KeywordId::After, "after"),
    contextual(KeywordId::System, "system"),
    contextual(KeywordId::RunAs, "runas"),
];

/// Canonical (lowercase) spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Whether `id` is reserved (never an identifier).
pub fn is_reserved(id: KeywordId) -> bool {
    info_for(id).reserved
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling, ignoring ASCII case.
///
/// ## Returns
/// - `Some(KeywordId)` for reserved and contextual words alike.
/// - `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical.eq_ignore_ascii_case(s)).map(|k| k.id)
}

/// Lookup restricted to reserved words; this is what the lexer uses.
pub fn reserved_from_str(s: &str) -> Option<KeywordId> {
    from_str(s).filter(|id| is_reserved(*id))
}

/// Check whether an identifier spelling is the contextual word `id`.
///
/// ## Examples
/// ```rust
/// use apex_core::lang::keywords::{self, KeywordId};
///
/// assert!(keywords::is_contextual("Sharing", KeywordId::Sharing));
/// assert!(!keywords::is_contextual("shared", KeywordId::Sharing));
/// ```
pub fn is_contextual(name: &str, id: KeywordId) -> bool {
    as_str(id).eq_ignore_ascii_case(name)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category,
        reserved: true,
    }
}

const fn contextual(id: KeywordId, canonical: &'static str) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        category: KeywordCategory::Contextual,
        reserved: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(from_str("WebService"), Some(KeywordId::WebService));
        assert_eq!(from_str("INSTANCEOF"), Some(KeywordId::InstanceOf));
        assert_eq!(from_str("runAs"), Some(KeywordId::RunAs));
        assert_eq!(from_str("account"), None);
    }

    #[test]
    fn contextual_words_are_not_reserved() {
        for id in [KeywordId::Get, KeywordId::Set, KeywordId::On, KeywordId::System] {
            assert!(!is_reserved(id), "{id:?} should be contextual");
            assert_eq!(reserved_from_str(as_str(id)), None);
        }
        assert_eq!(reserved_from_str("Merge"), Some(KeywordId::Merge));
    }

    #[test]
    fn canonical_spellings_are_unique_and_lowercase() {
        for (i, a) in KEYWORDS.iter().enumerate() {
            assert_eq!(a.canonical, a.canonical.to_ascii_lowercase());
            for b in &KEYWORDS[i + 1..] {
                assert_ne!(a.canonical, b.canonical);
                assert_ne!(a.id, b.id);
            }
        }
    }
}
