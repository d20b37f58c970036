// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Reflection compiler command-line interface.
//!
//! This is the main entry point for the `reflectc` command.

use clap::{Parser, Subcommand};
use miette::Result;

use reflectc_cli::commands;

/// reflectc: a build-time reflection and serialisation compiler
#[derive(Debug, Parser)]
#[command(name = "reflectc")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan declaration files and generate reflection sources
    Build {
        /// Declaration files, or directories to scan recursively
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Output directory (defaults to each input file's directory)
        #[arg(long)]
        out_dir: Option<String>,

        /// Suppress per-file progress output
        #[arg(long)]
        quiet: bool,

        /// Perform the full pipeline and comparison without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Check declaration files for errors without generating anything
    Check {
        /// Declaration files, or directories to check
        #[arg(default_value = ".")]
        paths: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber only if RUST_LOG is explicitly set,
    // keeping stderr clean for diagnostic rendering otherwise.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Build {
            paths,
            out_dir,
            quiet,
            dry_run,
        } => commands::build::build(
            &paths,
            &commands::build::BuildOptions {
                out_dir: out_dir.map(Into::into),
                quiet,
                dry_run,
            },
        ),
        Command::Check { paths } => commands::check::check(&paths),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            // miette already provides nice error formatting, just display it
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
