//! navtoc - table-of-contents generator
//!
//! A CLI tool that reads a markdown document, derives its numbered outline,
//! and writes an HTML document with a navigable (optionally collapsible)
//! table of contents.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use navtoc::cli::{Cli, Commands};
use navtoc::pipeline;
use navtoc::toc::TocEntry;

/// Main entry point for the navtoc CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = cli.command.overrides();

    match cli.command {
        Commands::Build {
            input,
            output,
            verbose,
            ..
        } => {
            init_logging(verbose);
            handle_build_command(&input, &output, &overrides)?;
        }

        Commands::Inspect { input, verbose, .. } => {
            init_logging(verbose);
            handle_inspect_command(&input, &overrides)?;
        }
    }

    Ok(())
}

/// Initialize logging when verbose output is requested
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the build command
fn handle_build_command(
    input: &Path,
    output: &Path,
    overrides: &navtoc::toc_config::TocOverrides,
) -> Result<()> {
    println!("Building table of contents...");
    println!("Input: {}", input.display());
    println!("Output: {}", output.display());

    let summary = pipeline::build(input, output, overrides)
        .with_context(|| format!("Failed to build {}", input.display()))?;

    if summary.populated {
        println!("✓ Successfully wrote: {}", output.display());
        println!("  {} ToC entries", summary.link_count);
    } else {
        println!("✓ Wrote: {} (no ToC entries produced)", output.display());
    }

    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(
    input: &Path,
    overrides: &navtoc::toc_config::TocOverrides,
) -> Result<()> {
    let entries = pipeline::outline(input, overrides)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if entries.is_empty() {
        println!("No table of contents found.");
        return Ok(());
    }

    print_entries(&entries);
    Ok(())
}

/// Print an outline forest as an indented listing
fn print_entries(entries: &[TocEntry]) {
    for entry in entries {
        let indent = "  ".repeat(entry.depth().saturating_sub(1));
        println!(
            "{}{} {} (#{})",
            indent,
            entry.numbering,
            entry.label.trim_start(),
            entry.target_id
        );
        print_entries(&entry.children);
    }
}
