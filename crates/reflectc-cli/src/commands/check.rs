// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Check declaration files for errors without generating anything.

use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::debug;

use reflectc_core::model::SymbolTable;
use reflectc_core::source_analysis::{Severity, parse};

use crate::diagnostic::CompileDiagnostic;

use super::build::find_all_source_files;

/// Parse the given files or directories and report diagnostics.
pub fn check(paths: &[String]) -> Result<()> {
    let source_files = find_all_source_files(paths)?;
    if source_files.is_empty() {
        miette::bail!("No .h declaration files found in {paths:?}");
    }

    let mut symbols = SymbolTable::new();
    let mut failed = 0usize;

    for file in &source_files {
        debug!("Checking {file}");
        let source = fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read '{file}'"))?;

        let (_, diagnostics) = parse(&source, &mut symbols);
        for diagnostic in &diagnostics {
            let report =
                miette::Report::new(CompileDiagnostic::from_core(diagnostic, file.as_str(), &source));
            eprintln!("{report:?}");
        }
        if diagnostics.iter().any(|d| d.severity == Severity::Error) {
            failed += 1;
        }
    }

    if failed > 0 {
        miette::bail!("{failed} of {} file(s) failed", source_files.len());
    }
    println!("{} file(s) ok", source_files.len());
    Ok(())
}
