//! CLI output formatting for every command.
//!
//! Output is information-first: each sidebar or page leads with its
//! identity, with counts and sources as indented context lines.
//!
//! ## Sidebars
//!
//! ```text
//! Sidebars
//! 001 dddCsSidebar (12 pages)
//!     Module 1 (10 pages)
//!     Module 2 (0 pages)
//!     ddd_cs/ddd_study_021
//! 002 kissTsSidebar (4 pages)
//!
//! Warnings
//!     docs directory not found for track 'gone_ts': docs/gone_ts
//! ```
//!
//! ## Pages
//!
//! ```text
//! Pages
//! 001 kiss_ts/kiss_ts_index [index]
//!     Description: frontmatter
//! 002 kiss_ts/a
//!     Description: memo
//!
//! 2 pages, 2 with descriptions (1 from memos)
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::headers::CleanReport;
use crate::imaging::{DownscaleOutcome, DownscaleReport};
use crate::sidebar::Sidebars;
use crate::types::{DescriptionSource, DocPage, SidebarEntry};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Sidebars
// ============================================================================

pub fn format_sidebars_output(sidebars: &Sidebars) -> Vec<String> {
    let mut lines = vec!["Sidebars".to_string()];

    for (i, (id, entries)) in sidebars.sidebars.iter().enumerate() {
        let pages: usize = entries.iter().map(SidebarEntry::doc_count).sum();
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            id,
            plural(pages, "page")
        ));
        for entry in entries {
            if let SidebarEntry::Category { label, .. } = entry {
                lines.push(format!("    {} ({})", label, plural(entry.doc_count(), "page")));
            }
        }
    }

    if !sidebars.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &sidebars.warnings {
            lines.push(format!("    {warning}"));
        }
    }
    lines
}

pub fn print_sidebars_output(sidebars: &Sidebars) {
    for line in format_sidebars_output(sidebars) {
        println!("{}", line);
    }
}

/// Study pages that exist on disk but no module range covers.
pub fn format_uncovered(sidebar_id: &str, ids: &[String]) -> Vec<String> {
    if ids.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!(
        "{}: {} not in any module",
        sidebar_id,
        plural(ids.len(), "study page")
    )];
    lines.extend(ids.iter().map(|id| format!("    {id}")));
    lines
}

// ============================================================================
// Pages
// ============================================================================

pub fn format_pages_output(pages: &[DocPage]) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    let mut described = 0;
    let mut from_memo = 0;

    for (i, page) in pages.iter().enumerate() {
        let marker = if page.has_index_marker { " [index]" } else { "" };
        lines.push(format!("{} {}{}", format_index(i + 1), page.slug, marker));
        match page.description_source {
            Some(DescriptionSource::FrontMatter) => {
                described += 1;
                lines.push("    Description: frontmatter".to_string());
            }
            Some(DescriptionSource::Memo) => {
                described += 1;
                from_memo += 1;
                lines.push("    Description: memo".to_string());
            }
            None => {}
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {} with descriptions ({} from memos)",
        plural(pages.len(), "page"),
        described,
        from_memo
    ));
    lines
}

pub fn print_pages_output(pages: &[DocPage]) {
    for line in format_pages_output(pages) {
        println!("{}", line);
    }
}

// ============================================================================
// Header cleanup
// ============================================================================

pub fn format_clean_output(report: &CleanReport, dry_run: bool) -> Vec<String> {
    let verb = if dry_run { "Would clean" } else { "Cleaned" };
    let mut lines: Vec<String> = report
        .cleaned
        .iter()
        .map(|p| format!("{}: {}", verb, p.display()))
        .collect();
    lines.push(format!(
        "{} of {} cleaned",
        report.cleaned.len(),
        plural(report.scanned.len(), "index page")
    ));
    lines
}

pub fn print_clean_output(report: &CleanReport, dry_run: bool) {
    for line in format_clean_output(report, dry_run) {
        println!("{}", line);
    }
}

// ============================================================================
// Picture downscale
// ============================================================================

pub fn format_images_output(report: &DownscaleReport) -> Vec<String> {
    let mut lines = Vec::new();
    for picture in &report.pictures {
        match &picture.outcome {
            DownscaleOutcome::Resized { from, to } => lines.push(format!(
                "{}: {}x{} → {}x{}",
                picture.path.display(),
                from.width,
                from.height,
                to.width,
                to.height
            )),
            DownscaleOutcome::Failed(err) => {
                lines.push(format!("{}: failed: {}", picture.path.display(), err))
            }
            DownscaleOutcome::Unchanged(_) => {}
        }
    }
    lines.push(format!(
        "{} checked, {} resized, {} failed",
        plural(report.pictures.len(), "picture"),
        report.resized(),
        report.failed()
    ));
    lines
}

pub fn print_images_output(report: &DownscaleReport) {
    for line in format_images_output(report) {
        println!("{}", line);
    }
}
