//! Composer configuration and output naming.
//!
//! Configuration is explicit: a [`ComposerConfig`] is built by the caller (or
//! loaded from YAML) and handed to [`crate::compose::Composer::new`].
//!
//! ```yaml
//! templates_dir: /srv/decks/templates
//! output_dir: /srv/decks/out
//! ```
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Yaml(String),
}

/// Where templates are looked up and composed documents are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Directory holding template `.pptx` files
    pub templates_dir: PathBuf,
    /// Directory receiving generated documents
    pub output_dir: PathBuf,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("generated_documents"),
        }
    }
}

impl ComposerConfig {
    pub fn new(templates_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Path of the template called `name` (`.pptx` appended when missing).
    pub fn template_path(&self, name: &str) -> PathBuf {
        let path = self.templates_dir.join(name);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("pptx")
        }
    }

    pub fn namer(&self) -> OutputNamer {
        OutputNamer::new(&self.output_dir)
    }
}

/// Derives collision-free output paths: `{stem}_{YYYYmmdd_HHMMSS}_{id8}.pptx`.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
}

impl OutputNamer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A fresh output path for a document built from `template`.
    ///
    /// Only the file stem of `template` is used, so both a template name and
    /// a template path are accepted.
    pub fn next_path(&self, template: &str) -> PathBuf {
        let stem = Path::new(template)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("presentation");
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let id = uuid::Uuid::new_v4().simple().to_string();
        self.dir.join(format!("{}_{}_{}.pptx", stem, timestamp, &id[..8]))
    }
}
