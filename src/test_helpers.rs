//! Shared test utilities for the docnav test suite.
//!
//! Builders for throwaway docs trees plus lookup helpers that panic with a
//! readable message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_pages(tmp.path(), "solid_ts", &["solid_ts_index.md", "a.md"]);
//! write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 5]);
//! write_file(tmp.path(), "solid_ts/memo/a.memo", "About SRP");
//! ```

use std::path::Path;

use crate::types::{DocPage, ModuleRange};

// =========================================================================
// Docs tree builders
// =========================================================================

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Create markdown pages (by filename) in a track directory.
pub fn write_pages(root: &Path, track: &str, filenames: &[&str]) {
    for name in filenames {
        write_file(root, &format!("{track}/{name}"), &format!("# {name}\n"));
    }
}

/// Create `{prefix}_study_NNN.md` pages in a track directory.
pub fn write_study_pages(root: &Path, track: &str, prefix: &str, numbers: &[u32]) {
    for n in numbers {
        write_file(
            root,
            &format!("{track}/{prefix}_study_{n:03}.md"),
            &format!("# Study {n}\n"),
        );
    }
}

pub fn module(title: Option<&str>, start: u32, end: u32) -> ModuleRange {
    ModuleRange {
        title: title.map(String::from),
        start,
        end,
    }
}

/// Write a solid-color RGB PNG of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
    img.save(path).unwrap();
}

// =========================================================================
// Lookups (panic with a clear message on miss)
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(pages: &'a [DocPage], slug: &str) -> &'a DocPage {
    pages.iter().find(|p| p.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = pages.iter().map(|p| p.slug.as_str()).collect();
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}
