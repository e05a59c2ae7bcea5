//! Centralized filename conventions for documentation pages.
//!
//! Every track directory follows the same layout rules, and every component
//! that needs to reason about a filename goes through this module so the
//! rules live in exactly one place:
//!
//! - **Markdown pages**: `*.md` (and `*.mdx` for the frontmatter stage).
//! - **Index marker**: a filename containing `_index` is the track's landing
//!   page and must sort ahead of everything else in the sidebar.
//! - **Study pages**: `{prefix}_study_{NNN}.md`, where `NNN` is zero-padded
//!   to three digits (`ddd_study_007.md`).
//! - **Memo sidecars**: `memo/{stem}.memo` next to the page.
//!
//! ```text
//! docs/ddd_cs/
//! ├── ddd_cs_index.md        → has_index_marker = true
//! ├── ddd_study_001.md       → study number 1
//! ├── ddd_study_002.md
//! └── memo/
//!     └── ddd_study_001.memo → description for ddd_study_001
//! ```

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Substring that marks a track's landing page.
pub const INDEX_MARKER: &str = "_index";

/// Markdown extension listed in sidebars.
pub const MARKDOWN_EXT: &str = "md";

/// Markdown extensions whose frontmatter is parsed.
pub const PAGE_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Sidecar subdirectory holding memo files.
pub const MEMO_DIR: &str = "memo";

/// Extension of memo sidecar files.
pub const MEMO_EXT: &str = "memo";

/// Width of the zero-padded number in study ids.
const STUDY_NUMBER_WIDTH: usize = 3;

/// Whether `filename` carries the given index marker.
pub fn has_index_marker(filename: &str, marker: &str) -> bool {
    filename.contains(marker)
}

/// The collator could not load its root-locale data.
#[derive(Error, Debug)]
#[error("filename collator unavailable: {0}")]
pub struct CollatorError(String);

/// Root-locale collator matching the site generator's string compare.
///
/// Punctuation sorts before digits and digits before letters, so
/// `intro_advanced.md` precedes `intro.md` and `a.md` precedes `a1.md`.
pub fn filename_collator() -> Result<CollatorBorrowed<'static>, CollatorError> {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .map_err(|e| CollatorError(e.to_string()))
}

/// Sidebar ordering for filenames in a single track.
///
/// Index-marked names come first; within each partition names compare with
/// `collator`. Equivalent to sorting on `(!is_index, filename)`. Names the
/// collator ranks equal fall back to byte order so the result is total.
pub fn sidebar_order(
    collator: &CollatorBorrowed<'_>,
    a: &str,
    b: &str,
    marker: &str,
) -> Ordering {
    let regular = |name: &str| !has_index_marker(name, marker);
    regular(a)
        .cmp(&regular(b))
        .then_with(|| collator.compare(a, b))
        .then_with(|| a.cmp(b))
}

/// Strip the `.md` extension from a sidebar filename.
///
/// Returns `None` for anything that isn't a markdown page.
pub fn markdown_stem(filename: &str) -> Option<&str> {
    filename
        .strip_suffix(MARKDOWN_EXT)
        .and_then(|s| s.strip_suffix('.'))
        .filter(|s| !s.is_empty())
}

/// Whether `path` has one of the page extensions that carry frontmatter.
pub fn is_page(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PAGE_EXTENSIONS.contains(&e))
}

/// Build the document id for a page in a track: `{track}/{stem}`.
pub fn doc_id(track: &str, stem: &str) -> String {
    format!("{track}/{stem}")
}

/// Build a numbered study id: `{track}/{prefix}_study_{NNN}`.
///
/// Numbers wider than three digits are written in full (`_study_1000`).
pub fn study_id(track: &str, prefix: &str, number: u32) -> String {
    format!(
        "{track}/{prefix}_study_{number:0>width$}",
        width = STUDY_NUMBER_WIDTH
    )
}

/// Parse the study number from a filename stem like `ddd_study_012`.
///
/// Returns the prefix and the number. Stems that don't follow the
/// convention return `None`.
pub fn parse_study_stem(stem: &str) -> Option<(&str, u32)> {
    let (prefix, number) = stem.rsplit_once("_study_")?;
    if prefix.is_empty() || number.len() < STUDY_NUMBER_WIDTH {
        return None;
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = number.parse().ok()?;
    // Only the spelling `study_id` produces; `0001` is not study 1.
    (format!("{n:0>width$}", width = STUDY_NUMBER_WIDTH) == number).then_some((prefix, n))
}

/// Path of the memo sidecar for a page.
///
/// `docs/ddd_cs/ddd_study_001.md` → `docs/ddd_cs/memo/ddd_study_001.memo`.
/// Only the last extension is replaced, so `.md` and `.mdx` pages share the
/// same memo name.
pub fn memo_path(page: &Path) -> PathBuf {
    let dir = page.parent().unwrap_or_else(|| Path::new(""));
    let stem = page.file_stem().unwrap_or_default();
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(MEMO_EXT);
    dir.join(MEMO_DIR).join(name)
}
