//! Declaration modifier vocabulary.
//!
//! Modifiers attach to classes, interfaces, members and parameters. Most are a single reserved
//! word; the sharing modifiers are two-word phrases (`with sharing`, `without sharing`,
//! `inherited sharing`) built from one reserved word or contextual identifier plus `sharing`.
//!
//! ## Notes
//! - A declaration holds modifiers as a set: the parser rejects duplicates, so consumers never
//!   have to deal with them.

use super::keywords::KeywordId;

/// Stable identifier for every modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModifierId {
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
    WithSharing,
    WithoutSharing,
    InheritedSharing,
}

/// What a modifier controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierCategory {
    Visibility,
    Inheritance,
    Sharing,
    Storage,
    Test,
    WebService,
}

/// Metadata for a modifier.
#[derive(Debug, Clone, Copy)]
pub struct ModifierInfo {
    pub id: ModifierId,
    pub canonical: &'static str,
    pub category: ModifierCategory,
    /// The reserved keyword that spells this modifier, for single-word modifiers.
    pub keyword: Option<KeywordId>,
}

use ModifierCategory as C;

/// Registry of all modifiers.
pub const MODIFIERS: &[ModifierInfo] = &[
    word(ModifierId::Public, "public", C::Visibility, KeywordId::Public),
    word(ModifierId::Private, "private", C::Visibility, KeywordId::Private),
    word(ModifierId::Protected, "protected", C::Visibility, KeywordId::Protected),
    word(ModifierId::Global, "global", C::Visibility, KeywordId::Global),
    word(ModifierId::Static, "static", C::Storage, KeywordId::Static),
    word(ModifierId::Final, "final", C::Storage, KeywordId::Final),
    word(ModifierId::Transient, "transient", C::Storage, KeywordId::Transient),
    word(ModifierId::Abstract, "abstract", C::Inheritance, KeywordId::Abstract),
    word(ModifierId::Virtual, "virtual", C::Inheritance, KeywordId::Virtual),
    word(ModifierId::Override, "override", C::Inheritance, KeywordId::Override),
    word(ModifierId::TestMethod, "testMethod", C::Test, KeywordId::TestMethod),
    word(ModifierId::WebService, "webService", C::WebService, KeywordId::WebService),
    phrase(ModifierId::WithSharing, "with sharing"),
    phrase(ModifierId::WithoutSharing, "without sharing"),
    phrase(ModifierId::InheritedSharing, "inherited sharing"),
];

/// Canonical spelling.
pub fn as_str(id: ModifierId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: ModifierId) -> ModifierCategory {
    info_for(id).category
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ModifierId) -> &'static ModifierInfo {
    MODIFIERS.iter().find(|m| m.id == id).expect("modifier info missing")
}

/// Map a reserved keyword to the single-word modifier it spells.
///
/// `with` is not a modifier on its own and maps to `None`; the parser combines it with `sharing`.
pub fn from_keyword(kw: KeywordId) -> Option<ModifierId> {
    MODIFIERS.iter().find(|m| m.keyword == Some(kw)).map(|m| m.id)
}

// --- helpers -----------------------------------------------------------------

const fn word(id: ModifierId, canonical: &'static str, category: ModifierCategory, kw: KeywordId) -> ModifierInfo {
    ModifierInfo {
        id,
        canonical,
        category,
        keyword: Some(kw),
    }
}

const fn phrase(id: ModifierId, canonical: &'static str) -> ModifierInfo {
    ModifierInfo {
        id,
        canonical,
        category: ModifierCategory::Sharing,
        keyword: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_modifier_keyword_maps_back() {
        for info in MODIFIERS {
            if let Some(kw) = info.keyword {
                assert_eq!(from_keyword(kw), Some(info.id));
            }
        }
        assert_eq!(from_keyword(KeywordId::With), None);
        assert_eq!(from_keyword(KeywordId::Class), None);
    }

    #[test]
    fn sharing_phrases() {
        assert_eq!(category(ModifierId::InheritedSharing), ModifierCategory::Sharing);
        assert_eq!(as_str(ModifierId::WithoutSharing), "without sharing");
    }
}
