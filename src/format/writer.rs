//! Output writer with indentation tracking

use super::config::FormatConfig;

/// Writer that tracks indentation and builds formatted output
pub struct FormatWriter {
    output: String,
    indent_level: usize,
    config: FormatConfig,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl FormatWriter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            at_line_start: true,
        }
    }

    /// The output, ending in a newline unless nothing was written.
    pub fn finish(mut self) -> String {
        if !self.at_line_start {
            self.newline();
        }
        self.output
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.config.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string followed by newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write blank lines; a pending line is ended first.
    pub fn blank_lines(&mut self, count: usize) {
        if !self.at_line_start {
            self.newline();
        }
        for _ in 0..count {
            self.newline();
        }
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_applies_at_line_start() {
        let mut writer = FormatWriter::new(FormatConfig::default());
        writer.write("class A {");
        writer.newline();
        writer.indent();
        writer.write("Integer n;");
        writer.newline();
        writer.dedent();
        writer.write("}");
        assert_eq!(writer.finish(), "class A {\n    Integer n;\n}\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut writer = FormatWriter::new(FormatConfig::default().with_indent_width(2));
        writer.dedent();
        writer.indent();
        writer.write("x");
        assert_eq!(writer.finish(), "  x\n");
    }

    #[test]
    fn test_empty_output_stays_empty() {
        let writer = FormatWriter::new(FormatConfig::default());
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_blank_lines_end_pending_line() {
        let mut writer = FormatWriter::new(FormatConfig::default());
        writer.write("a");
        writer.blank_lines(1);
        writer.write("b");
        assert_eq!(writer.finish(), "a\n\nb\n");
    }
}
