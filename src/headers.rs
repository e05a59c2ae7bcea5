//! Index page header cleanup.
//!
//! Landing pages (`*_index.md`) must open directly with their frontmatter
//! fence; blank lines in front of `---` make the site generator treat the
//! frontmatter as body text. This pass rewrites such pages in place as plain
//! UTF-8 starting at the first non-blank line, dropping any byte-order mark
//! along the way. A leading BOM by itself is tolerated and left alone, and
//! so are pages that are already clean.

use crate::naming;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use walkdir::WalkDir;

const BOM: char = '\u{feff}';

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Outcome of a cleanup pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// Every index page inspected, relative to the docs root.
    pub scanned: Vec<PathBuf>,
    /// The subset that was (or, on a dry run, would be) rewritten.
    pub cleaned: Vec<PathBuf>,
}

/// Strip leading blank lines, and the BOM in front of them.
///
/// Returns `None` when there are no leading blank lines, even if the text
/// starts with a BOM.
pub fn strip_leading_blank_lines(text: &str) -> Option<String> {
    let without_bom = text.strip_prefix(BOM).unwrap_or(text);

    let mut start = 0;
    for line in without_bom.split_inclusive('\n') {
        if !line.trim().is_empty() {
            break;
        }
        start += line.len();
    }

    (start > 0).then(|| without_bom[start..].to_string())
}

/// Clean every index page under `docs_root`.
///
/// With `dry_run` set, files are inspected and reported but not written.
pub fn clean_index_headers(
    docs_root: &Path,
    index_marker: &str,
    dry_run: bool,
) -> Result<CleanReport, CleanError> {
    let suffix = format!("{index_marker}.{}", naming::MARKDOWN_EXT);
    let mut report = CleanReport::default();

    for entry in WalkDir::new(docs_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !entry.file_name().to_string_lossy().ends_with(&suffix)
        {
            continue;
        }

        let path = entry.path();
        let rel = path.strip_prefix(docs_root).unwrap_or(path).to_path_buf();
        let text = fs::read_to_string(path)?;

        if let Some(cleaned) = strip_leading_blank_lines(&text) {
            if !dry_run {
                fs::write(path, cleaned)?;
            }
            info!(page = %rel.display(), dry_run, "cleaned header");
            report.cleaned.push(rel.clone());
        }
        report.scanned.push(rel);
    }

    Ok(report)
}
