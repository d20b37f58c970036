// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Build reflection sources from annotated declaration files.

use camino::{Utf8Path, Utf8PathBuf};
use miette::{Context, IntoDiagnostic, Result};
use std::fs;
use tracing::{debug, info, instrument};

use reflectc_core::codegen::{Encoder, generated_file_names, write_if_changed};
use reflectc_core::model::{SymbolTable, TypeCollection};
use reflectc_core::source_analysis::{Severity, parse};

use crate::diagnostic::CompileDiagnostic;

/// Options for the build command.
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Output directory; defaults to each input file's directory.
    pub out_dir: Option<Utf8PathBuf>,
    /// Suppress per-file progress output.
    pub quiet: bool,
    /// Perform comparison but never write.
    pub dry_run: bool,
}

/// Build reflection sources for the given files or directories.
///
/// Input files are processed in lexicographic path order so the
/// process-wide symbol table accumulates deterministically. A failing file
/// prints its diagnostics and is skipped; the remaining files still
/// generate, and the command reports failure at the end.
#[instrument(skip_all)]
pub fn build(paths: &[String], options: &BuildOptions) -> Result<()> {
    info!("Starting build");

    let source_files = find_all_source_files(paths)?;
    if source_files.is_empty() {
        miette::bail!("No .h declaration files found in {paths:?}");
    }
    info!(count = source_files.len(), "Found declaration files");

    if let Some(ref out_dir) = options.out_dir {
        if !options.dry_run {
            fs::create_dir_all(out_dir)
                .into_diagnostic()
                .wrap_err("Failed to create output directory")?;
        }
    }

    // The symbol table and the context collection accumulate across files
    // so later files can resolve cross-file references.
    let mut symbols = SymbolTable::new();
    let mut context = TypeCollection::new();

    let mut failed = 0usize;
    for file in &source_files {
        if let Err(report) = process_file(file, options, &mut symbols, &mut context) {
            eprintln!("{report:?}");
            failed += 1;
        }
    }

    if failed > 0 {
        miette::bail!("{failed} of {} file(s) failed", source_files.len());
    }
    Ok(())
}

/// Runs lexer → parser → encoder for a single file and writes its outputs.
fn process_file(
    file: &Utf8Path,
    options: &BuildOptions,
    symbols: &mut SymbolTable,
    context: &mut TypeCollection,
) -> Result<()> {
    debug!("Compiling {file}");
    if !options.quiet {
        println!("Compiling {file}");
    }

    let source = fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{file}'"))?;

    let (unit, diagnostics) = parse(&source, symbols);
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if error_count > 0 {
        for diagnostic in &diagnostics {
            let report =
                miette::Report::new(CompileDiagnostic::from_core(diagnostic, file.as_str(), &source));
            eprintln!("{report:?}");
        }
        miette::bail!("{error_count} error(s) in '{file}'");
    }

    let include_name = file.file_name().unwrap_or(file.as_str());
    let generated = Encoder::new(&unit.collection, context, symbols)
        .encode(&unit.symbol_list, include_name)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to encode '{file}'"))?;

    let out_dir = options
        .out_dir
        .clone()
        .or_else(|| file.parent().map(Utf8Path::to_path_buf))
        .unwrap_or_else(|| Utf8PathBuf::from("."));
    let (header_name, source_name) = generated_file_names(file);
    let header_path = out_dir.join(header_name);
    let source_path = out_dir.join(source_name);

    if options.dry_run {
        for (path, content) in [
            (&header_path, &generated.header),
            (&source_path, &generated.source),
        ] {
            if !options.quiet && !is_up_to_date(path, content) {
                println!("{path} would be regenerated");
            }
        }
    } else {
        write_if_changed(&header_path, &generated.header).into_diagnostic()?;
        write_if_changed(&source_path, &generated.source).into_diagnostic()?;
    }

    context.absorb(unit.collection);
    Ok(())
}

/// Returns `true` if the file already holds exactly `content`.
fn is_up_to_date(path: &Utf8Path, content: &str) -> bool {
    fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

/// Find all `.h` declaration files for a set of input paths.
///
/// The combined list is sorted lexicographically and de-duplicated so
/// runs are reproducible regardless of argument order.
pub fn find_all_source_files(paths: &[String]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        find_source_files(Utf8Path::new(path), &mut files)?;
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Find all `.h` declaration files at the given path.
///
/// If `path` is a file, returns it (must have a `.h` extension). If it is
/// a directory, the tree is scanned recursively.
fn find_source_files(path: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    if path.is_file() {
        if path.extension() == Some("h") {
            files.push(path.to_path_buf());
        } else {
            miette::bail!("File '{path}' is not a .h declaration file");
        }
    } else if path.is_dir() {
        collect_header_files_recursive(path, files)?;
    } else {
        miette::bail!("Path '{path}' does not exist");
    }
    Ok(())
}

/// Recursively collect all `.h` files from a directory tree.
///
/// Generated outputs and symlinks are skipped; the latter avoids infinite
/// recursion through circular links.
fn collect_header_files_recursive(dir: &Utf8Path, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read directory '{dir}'"))?
    {
        let entry = entry.into_diagnostic()?;
        let file_type = entry.file_type().into_diagnostic()?;
        if file_type.is_symlink() {
            continue;
        }
        let entry_path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|_| miette::miette!("Non-UTF-8 path"))?;

        if file_type.is_dir() {
            collect_header_files_recursive(&entry_path, files)?;
        } else if file_type.is_file()
            && entry_path.extension() == Some("h")
            && !entry_path
                .file_name()
                .is_some_and(|name| name.ends_with("_generated.h"))
        {
            files.push(entry_path);
        }
    }
    Ok(())
}
