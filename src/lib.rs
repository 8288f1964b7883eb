#![forbid(unsafe_code)]
//! apexscan: parse Apex sources and run tree consumers over them.
//!
//! The syntax work lives in the `apex_syntax` crate; this crate adds file discovery
//! ([`scan`]), a handful of built-in consumers ([`consumers`]), a source printer ([`format`]) and
//! the command-line interface ([`cli`]).
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: registry lookups in `apex_core` use `.expect(..)` with a message naming the missing entry.

pub mod cli;
pub mod config;
pub mod consumers;
pub mod format;
pub mod scan;

pub use apex_syntax::ast;
pub use apex_syntax::diagnostics;
pub use apex_syntax::lexer;
pub use apex_syntax::parser;
pub use apex_syntax::walk;

pub use config::ScanConfig;
pub use scan::{ParsedFile, ScanError, ScanReport, parse_file, scan_paths};
