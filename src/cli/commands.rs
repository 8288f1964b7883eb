//! Command implementations

use std::path::{Path, PathBuf};

use miette::Report;

use super::{CliError, CliResult, ExitCode};
use crate::config::ScanConfig;
use crate::consumers::{DmlInLoopListener, NodeCounter, OutlineListener};
use crate::format::{format_diff, format_unit};
use crate::scan::{self, ScanReport};
use apex_syntax::walk;

/// Print every skipped file as a rendered diagnostic.
fn report_skipped(report: ScanReport) -> (Vec<scan::ParsedFile>, usize) {
    let skipped = report.skipped.len();
    for file in report.skipped {
        eprintln!("{:?}", file.error.into_report());
    }
    (report.files, skipped)
}

/// Parse all files and run the DML-in-loop lint over the ones that parsed.
pub fn check(paths: &[PathBuf], config: &ScanConfig) -> CliResult<ExitCode> {
    let report = scan::scan_paths(paths, config);
    if report.files.is_empty() && report.skipped.is_empty() {
        return Err(CliError::failure("No Apex source files found"));
    }

    let (files, skipped) = report_skipped(report);
    let mut findings = 0;
    for file in &files {
        let mut listener = DmlInLoopListener::new();
        match walk::walk(&file.unit, &mut listener) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        for finding in listener.into_findings() {
            findings += 1;
            eprintln!("{:?}", Report::new(finding).with_source_code(file.named_source()));
        }
    }

    println!(
        "✓ {} file(s) parsed, {} skipped, {} finding(s)",
        files.len(),
        skipped,
        findings
    );

    if skipped > 0 || findings > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the outline of a single file.
pub fn outline(file: &Path) -> CliResult<ExitCode> {
    let parsed = scan::parse_file(file).map_err(|e| CliError::failure(format!("{:?}", e.into_report())))?;
    let mut listener = OutlineListener::new();
    match walk::walk(&parsed.unit, &mut listener) {
        Ok(()) => {}
        Err(never) => match never {},
    }
    print!("{}", listener.render());
    Ok(ExitCode::SUCCESS)
}

/// Count nodes across all files that parse.
pub fn stats(paths: &[PathBuf], config: &ScanConfig, json: bool) -> CliResult<ExitCode> {
    let report = scan::scan_paths(paths, config);
    let (files, skipped) = report_skipped(report);

    let mut counter = NodeCounter::skipping_method_bodies(config.skip_method_bodies);
    for file in &files {
        match walk::walk(&file.unit, &mut counter) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    if json {
        let mut value = counter.to_json();
        value["files"] = serde_json::Value::from(files.len());
        value["skipped"] = serde_json::Value::from(skipped);
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| CliError::failure(format!("Error encoding JSON: {}", e)))?;
        println!("{}", text);
    } else {
        println!("{} file(s), {} skipped, {} node(s)", files.len(), skipped, counter.total());
        for (kind, count) in counter.counts() {
            println!("  {:<24} {}", kind.as_str(), count);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print files in canonical layout, or with `check` / `diff` report the ones that would change.
pub fn format_files(paths: &[PathBuf], config: &ScanConfig, check_mode: bool, diff_mode: bool) -> CliResult<ExitCode> {
    let report = scan::scan_paths(paths, config);
    if report.files.is_empty() && report.skipped.is_empty() {
        return Err(CliError::failure("No Apex source files found"));
    }

    let (files, skipped) = report_skipped(report);
    let mut needs_formatting = false;
    for file in &files {
        let formatted = format_unit(&file.unit);
        let changed = file.source != formatted;

        if check_mode {
            if changed {
                println!("Would reformat: {}", file.path.display());
                needs_formatting = true;
            }
        } else if diff_mode {
            if changed {
                needs_formatting = true;
                println!("--- {}", file.path.display());
                if let Ok(Some(diff)) = format_diff(&file.source) {
                    print!("{}", diff);
                }
                println!();
            }
        } else {
            if files.len() > 1 {
                println!("// {}", file.path.display());
            }
            print!("{}", formatted);
        }
    }

    if skipped > 0 || needs_formatting {
        return Err(CliError::new("", ExitCode::FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}
