//! Recursive-descent parser for Apex.
//!
//! Converts a token stream into exactly one [`CompilationUnit`]. The first mismatch aborts the
//! parse; no partial tree is returned.
//!
//! ## Examples
//!
//! ```rust
//! use apex_syntax::{lexer, parser};
//!
//! let source = "trigger T on Account (before insert, after update) { }";
//! let tokens = lexer::lex(source).unwrap();
//! let unit = parser::parse(&tokens).unwrap();
//! assert_eq!(unit.declaration.node.name().map(|n| n.node.as_str()), Some("T"));
//! ```

use crate::ast::*;
use crate::diagnostics::{ParseError, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::stream::TokenCursor;
use apex_core::lang::keywords::KeywordId;
use apex_core::lang::modifiers::{self, ModifierId};
use apex_core::lang::operators::OperatorId;
use apex_core::lang::punctuation::PunctuationId;
use apex_core::lang::trigger_events::{self, TriggerEventId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/types.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
