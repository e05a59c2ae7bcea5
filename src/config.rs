//! `docnav.toml` loading and validation.
//!
//! Handles loading, validating, and merging `docnav.toml`. The stock defaults
//! are overridden by whatever the user's file specifies, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # Every key may be omitted; these are the defaults
//!
//! docs_dir = "docs"          # Docs root, relative to the working directory
//! index_marker = "_index"    # Filename substring marking a track's landing page
//!
//! # One sidebar per track directory, listed file by file.
//! [[sidebars]]
//! id = "solidTsSidebar"
//! track = "solid_ts"
//!
//! # Numbered study pages grouped into modules.
//! [[study_sidebars]]
//! id = "dddCsSidebar"
//! track = "ddd_cs"
//! prefix = "ddd"
//! modules = [
//!     { title = "Module 1: Foundations", start = 1, end = 10 },
//!     { start = 11, end = 12 },       # untitled: spliced flat
//! ]
//!
//! [search]
//! path_prefix = "docs"       # Prefix for per-track search contexts
//!
//! [images]
//! width_threshold = 2000     # Downscale pictures wider than this
//! scale_factor = 0.5         # Multiplier applied to both dimensions
//!
//! [processing]
//! max_processes = 4          # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! A misspelled key is an error rather than silently ignored.

use crate::types::ModuleRange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `docnav.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Docs root directory. The `--docs` flag takes precedence.
    pub docs_dir: String,
    /// Filename substring that marks a track's landing page.
    pub index_marker: String,
    /// Directory-scan sidebars, one per track.
    pub sidebars: Vec<TrackSidebar>,
    /// Numbered-range sidebars.
    pub study_sidebars: Vec<StudySidebar>,
    pub search: SearchConfig,
    pub images: ImagesConfig,
    pub processing: ProcessingConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            docs_dir: "docs".to_string(),
            index_marker: crate::naming::INDEX_MARKER.to_string(),
            sidebars: Vec::new(),
            study_sidebars: Vec::new(),
            search: SearchConfig::default(),
            images: ImagesConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// A sidebar built by listing every markdown page in one track directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackSidebar {
    /// Sidebar identifier referenced by the site's navbar.
    pub id: String,
    /// Subdirectory of the docs root.
    pub track: String,
}

/// A sidebar built from numbered `{prefix}_study_NNN` pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudySidebar {
    pub id: String,
    pub track: String,
    /// Study id prefix (`ddd` in `ddd_study_001`).
    pub prefix: String,
    pub modules: Vec<ModuleRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Path prefix for the per-track search contexts (`docs/solid_ts`).
    pub path_prefix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            path_prefix: "docs".to_string(),
        }
    }
}

/// Oversized picture handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Images strictly wider than this (in pixels) are downscaled.
    pub width_threshold: u32,
    /// Multiplier applied to both dimensions, in `(0, 1]`.
    pub scale_factor: f64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            width_threshold: 2000,
            scale_factor: 0.5,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image workers.
    /// When absent, defaults to the number of CPU cores.
    pub max_processes: Option<usize>,
}

/// Number of rayon workers for the downscale pass.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

impl SiteConfig {
    /// Reject settings the builders cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.index_marker.is_empty() {
            return Err(ConfigError::Validation(
                "index_marker must not be empty".into(),
            ));
        }
        if self.images.width_threshold == 0 {
            return Err(ConfigError::Validation(
                "images.width_threshold must be non-zero".into(),
            ));
        }
        let factor = self.images.scale_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(ConfigError::Validation(
                "images.scale_factor must be in (0, 1]".into(),
            ));
        }

        let mut seen = HashSet::new();
        let ids = self
            .sidebars
            .iter()
            .map(|s| (&s.id, &s.track))
            .chain(self.study_sidebars.iter().map(|s| (&s.id, &s.track)));
        for (id, track) in ids {
            if id.is_empty() {
                return Err(ConfigError::Validation("sidebar id must not be empty".into()));
            }
            if track.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sidebar '{id}' has an empty track"
                )));
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate sidebar id '{id}'"
                )));
            }
        }

        for study in &self.study_sidebars {
            if study.prefix.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "study sidebar '{}' has an empty prefix",
                    study.id
                )));
            }
            if study
                .modules
                .iter()
                .any(|m| m.title.as_deref().is_some_and(|t| t.trim().is_empty()))
            {
                return Err(ConfigError::Validation(format!(
                    "study sidebar '{}' has a module with an empty title",
                    study.id
                )));
            }
        }
        Ok(())
    }

    /// Every configured track in declaration order, without repeats.
    pub fn tracks(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sidebars
            .iter()
            .map(|s| s.track.as_str())
            .chain(self.study_sidebars.iter().map(|s| s.track.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a user's
///   `[[sidebars]]` list replaces the default list rather than appending.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `docnav.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# docnav Configuration
# ====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Docs root, relative to the working directory. `--docs` overrides it.
docs_dir = "docs"

# Filename substring that marks a track's landing page. Marked pages are
# listed first in their sidebar.
index_marker = "_index"

# ---------------------------------------------------------------------------
# Sidebars
# ---------------------------------------------------------------------------
# One entry per track directory. Every `docs/<track>/*.md` page is listed.
#
# [[sidebars]]
# id = "solidTsSidebar"
# track = "solid_ts"

# Numbered study pages (`docs/<track>/<prefix>_study_NNN.md`) grouped into
# modules. Titled modules become categories; untitled ones are spliced flat.
# Numbers without a page on disk are skipped.
#
# [[study_sidebars]]
# id = "dddCsSidebar"
# track = "ddd_cs"
# prefix = "ddd"
# modules = [
#     { title = "Module 1", start = 1, end = 10 },
#     { start = 11, end = 12 },
# ]

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Prefix for per-track search contexts (written to search-contexts.json).
path_prefix = "docs"

# ---------------------------------------------------------------------------
# Pictures
# ---------------------------------------------------------------------------
[images]
# PNGs under docs/<track>/picture/ wider than this are downscaled.
width_threshold = 2000

# Multiplier applied to width and height, in (0, 1].
scale_factor = 0.5

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
