//! Apex source printer
//!
//! Prints a parsed [`CompilationUnit`] back to source with uniform layout:
//! - 4-space indentation, one statement per line
//! - Block bodies open on the header line; other bodies go on their own indented line
//! - A blank line between class members, except between consecutive fields
//!
//! The printed source lexes to the same tokens as the input apart from comments, which are not
//! kept, and the spelling of case-insensitive words (see [`Formatter`]). Parsing it again yields
//! the same tree.

mod config;
mod formatter;
mod writer;

pub use config::FormatConfig;
pub use formatter::Formatter;

use apex_syntax::ast::CompilationUnit;
use apex_syntax::diagnostics::ParseError;
use apex_syntax::parser;

/// Print an already parsed unit with default settings
pub fn format_unit(unit: &CompilationUnit) -> String {
    Formatter::new(FormatConfig::default()).format(unit)
}

/// Format Apex source code with default settings
pub fn format_source(source: &str) -> Result<String, ParseError> {
    format_source_with_config(source, FormatConfig::default())
}

/// Format Apex source code with custom configuration
pub fn format_source_with_config(source: &str, config: FormatConfig) -> Result<String, ParseError> {
    let unit = parser::parse_source(source)?;
    Ok(Formatter::new(config).format(&unit))
}

/// Check if source code is already formatted
pub fn check_formatted(source: &str) -> Result<bool, ParseError> {
    let formatted = format_source(source)?;
    Ok(source == formatted)
}

/// Line-by-line differences between `source` and its formatted form, or `None` when equal.
pub fn format_diff(source: &str) -> Result<Option<String>, ParseError> {
    let formatted = format_source(source)?;
    if source == formatted {
        return Ok(None);
    }

    let original_lines: Vec<&str> = source.lines().collect();
    let formatted_lines: Vec<&str> = formatted.lines().collect();
    let max_lines = original_lines.len().max(formatted_lines.len());

    let mut diff = String::new();
    for i in 0..max_lines {
        let orig = original_lines.get(i).copied().unwrap_or_default();
        let fmt = formatted_lines.get(i).copied().unwrap_or_default();
        if orig != fmt {
            if !orig.is_empty() {
                diff.push_str(&format!("-{:4} | {}\n", i + 1, orig));
            }
            if !fmt.is_empty() {
                diff.push_str(&format!("+{:4} | {}\n", i + 1, fmt));
            }
        }
    }
    Ok(Some(diff))
}
