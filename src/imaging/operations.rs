//! Discovery and downscaling of oversized pictures.
//!
//! Screenshots and diagrams live in `docs/{track}/picture/*.png`. Anything
//! wider than the configured threshold is scaled down in place. Pictures are
//! processed in parallel with [rayon](https://docs.rs/rayon); a picture that
//! fails is reported and the rest carry on.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::downscaled_dimensions;
use super::params::ResizeParams;
use crate::config::ImagesConfig;
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Subdirectory of a track holding its pictures.
pub const PICTURE_DIR: &str = "picture";

/// What happened to a single picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownscaleOutcome {
    Resized { from: Dimensions, to: Dimensions },
    Unchanged(Dimensions),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureResult {
    /// Path relative to the docs root.
    pub path: PathBuf,
    pub outcome: DownscaleOutcome,
}

/// Per-picture results, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownscaleReport {
    pub pictures: Vec<PictureResult>,
}

impl DownscaleReport {
    pub fn resized(&self) -> usize {
        self.count(|o| matches!(o, DownscaleOutcome::Resized { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DownscaleOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&DownscaleOutcome) -> bool) -> usize {
        self.pictures.iter().filter(|p| pred(&p.outcome)).count()
    }
}

/// All `docs/*/picture/*.png` files, sorted. Extension match is
/// case-insensitive.
pub fn find_pictures(docs_root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut pictures = Vec::new();
    for track in fs::read_dir(docs_root)? {
        let picture_dir = track?.path().join(PICTURE_DIR);
        if !picture_dir.is_dir() {
            continue;
        }
        for entry in fs::read_dir(&picture_dir)? {
            let path = entry?.path();
            if path.is_file() && is_png(&path) {
                pictures.push(path);
            }
        }
    }
    pictures.sort();
    Ok(pictures)
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// Downscale every oversized picture under `docs_root`.
///
/// With `dry_run` set, pictures are identified and reported as they would
/// be resized, but nothing is written.
pub fn downscale_pictures(
    backend: &impl ImageBackend,
    docs_root: &Path,
    config: &ImagesConfig,
    dry_run: bool,
) -> io::Result<DownscaleReport> {
    let pictures = find_pictures(docs_root)?;

    let mut results: Vec<PictureResult> = pictures
        .par_iter()
        .map(|path| {
            let rel = path.strip_prefix(docs_root).unwrap_or(path).to_path_buf();
            let outcome = match downscale_one(backend, path, config, dry_run) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(picture = %rel.display(), error = %e, "downscale failed");
                    DownscaleOutcome::Failed(e.to_string())
                }
            };
            PictureResult { path: rel, outcome }
        })
        .collect();

    results.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(DownscaleReport { pictures: results })
}

fn downscale_one(
    backend: &impl ImageBackend,
    path: &Path,
    config: &ImagesConfig,
    dry_run: bool,
) -> Result<DownscaleOutcome, BackendError> {
    let from = backend.identify(path)?;
    let Some((width, height)) = downscaled_dimensions(
        (from.width, from.height),
        config.width_threshold,
        config.scale_factor,
    ) else {
        return Ok(DownscaleOutcome::Unchanged(from));
    };

    if !dry_run {
        backend.resize(&ResizeParams {
            source: path.to_path_buf(),
            output: path.to_path_buf(),
            width,
            height,
        })?;
    }
    info!(
        picture = %path.display(),
        from = %format!("{}x{}", from.width, from.height),
        to = %format!("{width}x{height}"),
        dry_run,
        "downscaled"
    );
    Ok(DownscaleOutcome::Resized {
        from,
        to: Dimensions { width, height },
    })
}
