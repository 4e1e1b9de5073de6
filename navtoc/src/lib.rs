//! navtoc - table-of-contents generation for hierarchical documents
//!
//! navtoc parses a markdown document into an element tree, derives a
//! numbered outline from it (by nested section containers or by heading-rank
//! inference), assigns stable anchor identifiers, renders the outline as a
//! nested list of links under a `nav` element, and exports the whole
//! document as HTML.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod document_tree;
pub mod html_exporter;
pub mod pipeline;
pub mod source_model;
pub mod toc;
pub mod toc_config;
