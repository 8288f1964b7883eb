//! Provide the canonical, pure vocabulary of the Apex language.
//!
//! Both the tokenizer and the parser in `apex_syntax` consult these tables instead of comparing
//! raw strings, and downstream tooling (diagnostics, outlines) uses them to render spellings.
//!
//! ## Notes
//!
//! - This crate has **no IO**, no global state and no AST types.
//! - Apex is case-insensitive; every `from_str` lookup here folds ASCII case.

pub mod lang;
