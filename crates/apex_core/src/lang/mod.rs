//! Apex language vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `OperatorId`, `ModifierId`, ...) and look up
//! spellings and metadata via the registry tables, rather than scattering string checks.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata.
//!
//! ## Examples
//! ```rust
//! use apex_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("CLASS"), Some(KeywordId::Class));
//! assert_eq!(keywords::as_str(KeywordId::Class), "class");
//! ```

pub mod keywords;
pub mod modifiers;
pub mod operators;
pub mod punctuation;
pub mod trigger_events;
