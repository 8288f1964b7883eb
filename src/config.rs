//! Scan configuration.

use std::path::Path;

/// Largest source file the scanner will read.
pub const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Options controlling which files a scan picks up and how deep consumers look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as Apex sources, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Consumers that honour this stop at method, constructor and accessor bodies.
    pub skip_method_bodies: bool,
    /// Stop collecting files after this many; `None` means no limit.
    pub max_files: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["cls".to_string(), "trigger".to_string()],
            skip_method_bodies: false,
            max_files: None,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted extensions.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_method_bodies(mut self, skip: bool) -> Self {
        self.skip_method_bodies = skip;
        self
    }

    pub fn with_max_files(mut self, max_files: Option<usize>) -> Self {
        self.max_files = max_files;
        self
    }

    /// Whether `path` has one of the accepted extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_classes_and_triggers() {
        let config = ScanConfig::default();
        assert!(config.accepts(Path::new("force-app/classes/Foo.cls")));
        assert!(config.accepts(Path::new("AccountTrigger.trigger")));
        assert!(config.accepts(Path::new("Upper.CLS")));
        assert!(!config.accepts(Path::new("Foo.cls-meta.xml")));
        assert!(!config.accepts(Path::new("README")));
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ScanConfig::new(), ScanConfig::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = ScanConfig::new()
            .with_extensions(["apex"])
            .with_skip_method_bodies(true)
            .with_max_files(Some(3));
        assert_eq!(config.extensions, vec!["apex".to_string()]);
        assert!(config.skip_method_bodies);
        assert_eq!(config.max_files, Some(3));
        assert!(config.accepts(Path::new("x.apex")));
        assert!(!config.accepts(Path::new("x.cls")));
    }
}
