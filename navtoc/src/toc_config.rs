//! ToC configuration
//!
//! Options arrive from three places, later ones winning: an optional
//! `navtoc.toml` next to the document, the attribute list on the in-document
//! `<!-- toc ... -->` marker, and command-line flags. This module owns the
//! option set, the file loading, and the attribute-map resolution with its
//! degrade-gracefully fallbacks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::toc::{ExtractOptions, RenderOptions, Strategy};

/// Default prefix for synthesized anchor identifiers
pub const DEFAULT_ID_PREFIX: &str = "section";

/// The resolved option set for one ToC run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Prefix used when synthesizing missing identifiers
    pub prefix: String,

    /// Disable numbering display and heading-text injection
    pub suppress_counter: bool,

    /// Maximum outline depth; 0 or negative means unlimited
    pub max_depth: i32,

    /// Collapsible entries; implies numbering display
    pub dynamic: bool,

    /// Use the container-based strategy instead of heading-rank inference
    pub use_sections: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ID_PREFIX.to_string(),
            suppress_counter: false,
            max_depth: 0,
            dynamic: false,
            use_sections: false,
        }
    }
}

impl TocConfig {
    /// Load configuration from a navtoc.toml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TocConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: TocConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration if the file exists, defaults otherwise
    pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<Self, TocConfigError> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a navtoc.toml file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TocConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Apply the declarative attribute map from the document's toc marker
    ///
    /// Flags are presence-based; `prefix` takes its value verbatim; a
    /// `max_depth` that does not parse as an integer falls back to unlimited.
    pub fn apply_attributes(&mut self, attrs: &BTreeMap<String, String>) {
        if let Some(prefix) = attrs.get("prefix") {
            self.prefix = prefix.clone();
        }
        if attrs.contains_key("suppress_counter") {
            self.suppress_counter = true;
        }
        if attrs.contains_key("dynamic") {
            self.dynamic = true;
        }
        if attrs.contains_key("use_sections") {
            self.use_sections = true;
        }
        if let Some(raw) = attrs.get("max_depth") {
            self.max_depth = raw.trim().parse().unwrap_or(0);
        }
    }

    /// Apply command-line overrides, the last word in resolution order
    pub fn apply_overrides(&mut self, overrides: &TocOverrides) {
        if let Some(ref prefix) = overrides.prefix {
            self.prefix = prefix.clone();
        }
        if let Some(max_depth) = overrides.max_depth {
            self.max_depth = max_depth;
        }
        if overrides.suppress_counter {
            self.suppress_counter = true;
        }
        if overrides.dynamic {
            self.dynamic = true;
        }
        if overrides.use_sections {
            self.use_sections = true;
        }
    }

    /// Whether numbering is in effect; dynamic mode forces it on
    pub fn numbering(&self) -> bool {
        self.dynamic || !self.suppress_counter
    }

    /// The selected discovery strategy
    pub fn strategy(&self) -> Strategy {
        if self.use_sections {
            Strategy::Sections
        } else {
            Strategy::Headings
        }
    }

    /// Extractor parameters derived from this configuration
    pub fn extract_options(&self) -> ExtractOptions<'_> {
        ExtractOptions {
            id_prefix: &self.prefix,
            numbering: self.numbering(),
            max_depth: self.max_depth,
            strategy: self.strategy(),
        }
    }

    /// Renderer parameters derived from this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            numbering: self.numbering(),
            dynamic: self.dynamic,
        }
    }
}

/// Option overrides taken from the command line
///
/// `None`/`false` means "not given"; flags can only switch behavior on, the
/// way marker attributes can.
#[derive(Debug, Default, Clone)]
pub struct TocOverrides {
    /// Override the identifier prefix
    pub prefix: Option<String>,
    /// Override the maximum depth
    pub max_depth: Option<i32>,
    /// Force numbering off
    pub suppress_counter: bool,
    /// Force dynamic mode on
    pub dynamic: bool,
    /// Force the container-based strategy
    pub use_sections: bool,
}

/// Errors that can occur when loading or saving ToC configuration
#[derive(Error, Debug)]
pub enum TocConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = TocConfig::default();
        assert_eq!(config.prefix, "section");
        assert!(!config.suppress_counter);
        assert_eq!(config.max_depth, 0);
        assert!(!config.dynamic);
        assert!(!config.use_sections);
        assert!(config.numbering());
        assert_eq!(config.strategy(), Strategy::Headings);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TocConfig = toml::from_str("dynamic = true\nmax_depth = 3\n").unwrap();
        assert!(config.dynamic);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.prefix, "section");
        assert!(!config.use_sections);
    }

    #[test]
    fn test_attribute_presence_flags() {
        let mut config = TocConfig::default();
        config.apply_attributes(&attrs(&[
            ("dynamic", ""),
            ("use_sections", ""),
            ("prefix", "chap"),
        ]));
        assert!(config.dynamic);
        assert!(config.use_sections);
        assert_eq!(config.prefix, "chap");
        assert_eq!(config.strategy(), Strategy::Sections);
    }

    #[test]
    fn test_malformed_max_depth_falls_back_to_unlimited() {
        let mut config = TocConfig::default();
        config.apply_attributes(&attrs(&[("max_depth", "2")]));
        assert_eq!(config.max_depth, 2);

        config.apply_attributes(&attrs(&[("max_depth", "lots")]));
        assert_eq!(config.max_depth, 0);
    }

    #[test]
    fn test_dynamic_forces_numbering() {
        let mut config = TocConfig::default();
        config.suppress_counter = true;
        assert!(!config.numbering());

        config.apply_attributes(&attrs(&[("dynamic", "")]));
        assert!(config.numbering());
        assert!(config.render_options().dynamic);
        assert!(config.render_options().numbering);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navtoc.toml");

        let mut config = TocConfig::default();
        config.prefix = "part".to_string();
        config.max_depth = 4;
        config.save(&path).unwrap();

        let loaded = TocConfig::load(&path).unwrap();
        assert_eq!(loaded.prefix, "part");
        assert_eq!(loaded.max_depth, 4);
    }

    #[test]
    fn test_load_optional_missing_file() {
        let config = TocConfig::load_optional("does/not/exist/navtoc.toml").unwrap();
        assert_eq!(config.prefix, "section");
    }
}
