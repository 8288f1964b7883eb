//! Reading and parsing Apex sources from disk.
//!
//! Every file is parsed on its own. A file that cannot be read or parsed is recorded as skipped
//! and the scan moves on; one bad file never aborts the rest.

use crate::config::{MAX_SOURCE_SIZE, ScanConfig};
use apex_syntax::ast::CompilationUnit;
use apex_syntax::diagnostics::ParseError;
use apex_syntax::parser::parse_source;
use miette::{Diagnostic, NamedSource};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A successfully parsed source file.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub unit: CompilationUnit,
}

impl ParsedFile {
    /// Source text labelled with the file name, for rendering diagnostics.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.path.display().to_string(), self.source.clone())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ScanError {
    #[error("cannot read '{}': {error}", .path.display())]
    #[diagnostic(code(apexscan::io))]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("'{}' is too large ({size} bytes, max {max} bytes)", .path.display())]
    #[diagnostic(code(apexscan::too_large))]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to parse '{}'", .path.display())]
    #[diagnostic(code(apexscan::parse))]
    Parse {
        path: PathBuf,
        text: String,
        #[source]
        error: ParseError,
    },
}

impl ScanError {
    pub fn path(&self) -> &Path {
        match self {
            ScanError::Io { path, .. } | ScanError::TooLarge { path, .. } | ScanError::Parse { path, .. } => path,
        }
    }

    /// Render-ready report. Parse failures carry their source so labels point into the file.
    pub fn into_report(self) -> miette::Report {
        match self {
            ScanError::Parse { path, text, error } => {
                miette::Report::new(error).with_source_code(NamedSource::new(path.display().to_string(), text))
            }
            other => miette::Report::new(other),
        }
    }
}

/// A file the scan could not use.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ScanError,
}

/// Outcome of [`scan_paths`].
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: Vec<ParsedFile>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Read and parse one file.
///
/// ## Errors
/// - [`ScanError::Io`] if the file cannot be read.
/// - [`ScanError::TooLarge`] if it exceeds [`MAX_SOURCE_SIZE`].
/// - [`ScanError::Parse`] with the first lexical or syntax error.
pub fn parse_file(path: &Path) -> Result<ParsedFile, ScanError> {
    let io_error = |error| ScanError::Io {
        path: path.to_path_buf(),
        error,
    };

    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(ScanError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }

    let source = fs::read_to_string(path).map_err(io_error)?;
    match parse_source(&source) {
        Ok(unit) => Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            unit,
        }),
        Err(error) => Err(ScanError::Parse {
            path: path.to_path_buf(),
            text: source,
            error,
        }),
    }
}

/// Collect source files under `paths`.
///
/// Directories are searched recursively, skipping hidden directories and `node_modules`. Files
/// named explicitly are kept only if their extension is accepted. The result is sorted and
/// truncated to `config.max_files`.
pub fn collect_source_files(paths: &[PathBuf], config: &ScanConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        collect_into(path, config, &mut files);
    }
    files.sort();
    files.dedup();
    if let Some(max) = config.max_files {
        files.truncate(max);
    }
    files
}

fn collect_into(path: &Path, config: &ScanConfig, files: &mut Vec<PathBuf>) {
    if path.is_file() {
        if config.accepts(path) {
            files.push(path.to_path_buf());
        }
        return;
    }
    if !path.is_dir() {
        tracing::warn!(path = %path.display(), "path does not exist");
        return;
    }

    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "cannot read directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let entry_path = entry.path();
        if entry_path.is_dir() {
            let name = entry_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !name.starts_with('.') && name != "node_modules" {
                collect_into(&entry_path, config, files);
            }
        } else if config.accepts(&entry_path) {
            files.push(entry_path);
        }
    }
}

/// Parse every source file under `paths`.
#[tracing::instrument(skip_all, fields(paths = paths.len()))]
pub fn scan_paths(paths: &[PathBuf], config: &ScanConfig) -> ScanReport {
    let mut report = ScanReport::default();
    for path in collect_source_files(paths, config) {
        match parse_file(&path) {
            Ok(parsed) => {
                tracing::debug!(path = %path.display(), "parsed");
                report.files.push(parsed);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping file");
                report.skipped.push(SkippedFile { path, error });
            }
        }
    }
    tracing::info!(parsed = report.files.len(), skipped = report.skipped.len(), "scan finished");
    report
}
