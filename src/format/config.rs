//! Printer layout settings.

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Blank lines between class members (consecutive fields stay together)
    pub blank_lines_members: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            blank_lines_members: 1,
        }
    }
}

impl FormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_blank_lines_members(mut self, count: usize) -> Self {
        self.blank_lines_members = count;
        self
    }
}
