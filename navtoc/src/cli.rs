//! Command-line interface definitions for navtoc

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::toc_config::TocOverrides;

/// CLI structure for the navtoc application
#[derive(Parser)]
#[command(name = "navtoc")]
#[command(version)]
#[command(about = "Table-of-contents generator for hierarchical documents", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for navtoc
#[derive(Subcommand)]
pub enum Commands {
    /// Build an HTML document with a generated table of contents
    Build {
        /// Input markdown file
        input: PathBuf,

        /// Output HTML file
        #[arg(short, long, default_value = "output.html")]
        output: PathBuf,

        /// Prefix for synthesized anchor identifiers
        #[arg(long)]
        prefix: Option<String>,

        /// Maximum outline depth (0 or negative means unlimited)
        #[arg(long)]
        max_depth: Option<i32>,

        /// Disable numbering display and heading rewriting
        #[arg(long)]
        suppress_counter: bool,

        /// Collapsible ToC entries (implies numbering)
        #[arg(long)]
        dynamic: bool,

        /// Discover hierarchy from section containers instead of heading ranks
        #[arg(long)]
        use_sections: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the extracted outline without writing any HTML
    Inspect {
        /// Input markdown file
        input: PathBuf,

        /// Prefix for synthesized anchor identifiers
        #[arg(long)]
        prefix: Option<String>,

        /// Maximum outline depth (0 or negative means unlimited)
        #[arg(long)]
        max_depth: Option<i32>,

        /// Discover hierarchy from section containers instead of heading ranks
        #[arg(long)]
        use_sections: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    /// The option overrides this invocation carries
    pub fn overrides(&self) -> TocOverrides {
        match self {
            Commands::Build {
                prefix,
                max_depth,
                suppress_counter,
                dynamic,
                use_sections,
                ..
            } => TocOverrides {
                prefix: prefix.clone(),
                max_depth: *max_depth,
                suppress_counter: *suppress_counter,
                dynamic: *dynamic,
                use_sections: *use_sections,
            },
            Commands::Inspect {
                prefix,
                max_depth,
                use_sections,
                ..
            } => TocOverrides {
                prefix: prefix.clone(),
                max_depth: *max_depth,
                suppress_counter: false,
                dynamic: false,
                use_sections: *use_sections,
            },
        }
    }
}
