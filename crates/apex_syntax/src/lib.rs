//! Apex syntax frontend.
//!
//! Source text flows through three stages:
//! - [`lexer::lex`] turns text into a token stream (query literals stay opaque).
//! - [`parser::parse`] turns tokens into one immutable [`ast::CompilationUnit`].
//! - [`walk`] traverses the tree with a [`walk::Listener`] (enter/exit notifications) or a
//!   [`walk::Visitor`] (value-returning, consumer-driven recursion).
//!
//! ## Examples
//!
//! ```rust
//! use apex_syntax::parser::parse_source;
//!
//! let unit = parse_source("public class Greeter { String hello() { return 'hi'; } }").unwrap();
//! assert!(matches!(unit.declaration.node, apex_syntax::ast::TypeDeclaration::Class(_)));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token_helpers;
pub mod walk;
