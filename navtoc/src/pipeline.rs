//! Three-stage document processing pipeline
//!
//! This module orchestrates the three stages of ToC generation:
//! 1. **Parsing**: load the markdown source and build the document tree
//! 2. **ToC**: resolve configuration, then extract and render the outline
//! 3. **Export**: serialize the processed tree to HTML
//!
//! The whole pass is synchronous and run-to-completion; the only mutable
//! state is the document tree itself, which the ToC stage rewrites in place.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::html_exporter::{self, ExportError};
use crate::source_model::{parse_document, SourceDocument};
use crate::toc::{self, TocEntry};
use crate::toc_config::{TocConfig, TocConfigError, TocOverrides};

/// Name of the optional configuration file next to the input document
pub const CONFIG_FILE_NAME: &str = "navtoc.toml";

/// Outcome of a build pass
#[derive(Debug)]
pub struct BuildSummary {
    /// Whether the nav received any entries
    pub populated: bool,
    /// Number of links rendered into the nav
    pub link_count: usize,
    /// Document title, if one was found
    pub title: Option<String>,
}

/// Pipeline errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error reading {path}: {source}", path = .0.display(), source = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config error loading {path}: {source}", path = .0.display(), source = .1)]
    Config(PathBuf, #[source] TocConfigError),

    #[error("Export error writing {path}: {source}", path = .0.display(), source = .1)]
    Export(PathBuf, #[source] ExportError),
}

/// Run the full pipeline: markdown in, HTML with a ToC out
pub fn build(
    input: &Path,
    output: &Path,
    overrides: &TocOverrides,
) -> Result<BuildSummary, PipelineError> {
    // Stage 1: parse
    let content =
        fs::read_to_string(input).map_err(|e| PipelineError::Io(input.to_path_buf(), e))?;
    let mut doc = parse_document(&content);
    log::info!(
        "parsed {} ({} bytes, marker: {})",
        input.display(),
        content.len(),
        doc.toc_target.is_some()
    );

    // Stage 2: resolve options, then extract and render
    let config = resolve_config(input, &doc, overrides)?;
    let populated = apply_toc(&mut doc, &config);

    // Stage 3: export
    html_exporter::to_html(&doc, &config, output)
        .map_err(|e| PipelineError::Export(output.to_path_buf(), e))?;
    log::info!("wrote {}", output.display());

    let link_count = doc
        .toc_target
        .map(|nav| {
            doc.tree
                .descendants(nav)
                .into_iter()
                .filter(|&n| doc.tree.tag(n) == "a")
                .count()
        })
        .unwrap_or(0);

    Ok(BuildSummary {
        populated,
        link_count,
        title: doc.title.clone(),
    })
}

/// Extract the outline of a document without rendering or exporting
pub fn outline(input: &Path, overrides: &TocOverrides) -> Result<Vec<TocEntry>, PipelineError> {
    let content =
        fs::read_to_string(input).map_err(|e| PipelineError::Io(input.to_path_buf(), e))?;
    let mut doc = parse_document(&content);
    let config = resolve_config(input, &doc, overrides)?;
    let root = doc.content_root();
    Ok(toc::extract(&mut doc.tree, root, &config.extract_options()))
}

/// Resolve the option set for a document
///
/// Resolution order, later wins: `navtoc.toml` next to the input, the
/// document's own marker attributes, command-line overrides.
fn resolve_config(
    input: &Path,
    doc: &SourceDocument,
    overrides: &TocOverrides,
) -> Result<TocConfig, PipelineError> {
    let config_path = input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    let mut config = TocConfig::load_optional(&config_path)
        .map_err(|e| PipelineError::Config(config_path.clone(), e))?;
    config.apply_attributes(&doc.toc_attributes);
    config.apply_overrides(overrides);
    Ok(config)
}

/// Run the extract-and-render pass over a parsed document
///
/// Returns whether the nav was populated.
pub fn apply_toc(doc: &mut SourceDocument, config: &TocConfig) -> bool {
    let root = doc.content_root();
    let target = doc.ensure_toc_target();
    let populated = toc::extract_and_render(
        &mut doc.tree,
        root,
        target,
        &config.extract_options(),
        &config.render_options(),
    );
    if !populated {
        log::info!("document produced no ToC entries");
    }
    populated
}
