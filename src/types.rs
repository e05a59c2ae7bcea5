//! Shared types written to the JSON files the site generator consumes.
//!
//! Field names and the `type` tag follow the site generator's sidebar
//! schema, so `sidebars.json` can be loaded verbatim as navigation config.

use serde::{Deserialize, Serialize};

/// One node in a sidebar.
///
/// ```json
/// { "type": "doc", "id": "solid_ts/solid_ts_index" }
/// { "type": "category", "label": "Module 1", "items": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    /// Leaf reference to a page by its document id.
    Doc { id: String },
    /// Titled group of entries.
    Category {
        label: String,
        items: Vec<SidebarEntry>,
    },
}

impl SidebarEntry {
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc { id: id.into() }
    }

    pub fn category(label: impl Into<String>, items: Vec<SidebarEntry>) -> Self {
        Self::Category {
            label: label.into(),
            items,
        }
    }

    /// Number of leaf documents under this entry (1 for a doc).
    pub fn doc_count(&self) -> usize {
        match self {
            Self::Doc { .. } => 1,
            Self::Category { items, .. } => items.iter().map(Self::doc_count).sum(),
        }
    }
}

/// A contiguous block of numbered study pages.
///
/// With a `title` the block becomes a category; without one its pages are
/// spliced into the parent list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start: u32,
    pub end: u32,
}

/// Where a page's description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionSource {
    /// Written in the page's own frontmatter.
    FrontMatter,
    /// Loaded from the `memo/` sidecar.
    Memo,
}

/// A content page discovered under the docs root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocPage {
    /// Path relative to the docs root, extension included.
    pub path: String,
    /// Document id: relative path with the extension stripped.
    pub slug: String,
    pub has_index_marker: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_source: Option<DescriptionSource>,
}
