//! Sidebar generation.
//!
//! Turns the docs tree into the navigation config the site generator loads
//! as its sidebars. Two modes exist, both driven by [`SiteConfig`]:
//!
//! ## Directory scan
//!
//! Every `*.md` file directly inside `docs/{track}/` becomes a doc entry.
//! Pages carrying the index marker (`solid_ts_index.md`) come first, the rest
//! follow in filename order:
//!
//! ```text
//! docs/solid_ts/                 solidTsSidebar
//! ├── a_srp.md                   ├── solid_ts/solid_ts_index
//! ├── b_ocp.md          →        ├── solid_ts/a_srp
//! ├── solid_ts_index.md          └── solid_ts/b_ocp
//! └── memo/                      (subdirectories are ignored)
//! ```
//!
//! ## Numbered ranges
//!
//! Study tracks hold sequentially numbered pages (`ddd_study_001.md`). A list
//! of [`ModuleRange`]s picks which numbers go where: a titled range becomes a
//! category, an untitled range is spliced into the parent list. Numbers with
//! no page on disk are skipped, so ranges may be sparse.
//!
//! ## Missing tracks
//!
//! A track directory that doesn't exist yields an empty sidebar and a
//! [`SidebarWarning`], never an error: one missing track must not break the
//! whole site build.

use crate::config::{SiteConfig, StudySidebar};
use crate::naming;
use crate::types::{ModuleRange, SidebarEntry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Collator(#[from] naming::CollatorError),
}

/// Non-fatal problem found while building sidebars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarWarning {
    /// The track directory doesn't exist; its sidebar is empty.
    MissingTrack { track: String, path: PathBuf },
}

impl std::fmt::Display for SidebarWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTrack { track, path } => write!(
                f,
                "docs directory not found for track '{track}': {}",
                path.display()
            ),
        }
    }
}

/// All sidebars for the site, keyed by sidebar id.
#[derive(Debug, Default, Serialize)]
pub struct Sidebars {
    #[serde(flatten)]
    pub sidebars: BTreeMap<String, Vec<SidebarEntry>>,
    #[serde(skip)]
    pub warnings: Vec<SidebarWarning>,
}

/// Build every sidebar named in the config.
pub fn build_sidebars(docs_root: &Path, config: &SiteConfig) -> Result<Sidebars, SidebarError> {
    let mut out = Sidebars::default();

    for sidebar in &config.sidebars {
        let entries = generate_project_sidebar(
            docs_root,
            &sidebar.track,
            &config.index_marker,
            &mut out.warnings,
        )?;
        out.sidebars.insert(sidebar.id.clone(), entries);
    }

    for study in &config.study_sidebars {
        let entries =
            generate_sidebar_items(docs_root, &study.track, &study.prefix, &study.modules);
        out.sidebars.insert(study.id.clone(), entries);
    }

    Ok(out)
}

/// List the markdown pages of one track, index-marked pages first.
///
/// A missing track directory pushes one [`SidebarWarning::MissingTrack`]
/// and returns an empty list.
pub fn generate_project_sidebar(
    docs_root: &Path,
    track: &str,
    index_marker: &str,
    warnings: &mut Vec<SidebarWarning>,
) -> Result<Vec<SidebarEntry>, SidebarError> {
    let docs_path = docs_root.join(track);

    if !docs_path.is_dir() {
        let warning = SidebarWarning::MissingTrack {
            track: track.to_string(),
            path: docs_path,
        };
        warn!("{warning}");
        warnings.push(warning);
        return Ok(Vec::new());
    }

    let mut files = markdown_files(&docs_path)?;
    let collator = naming::filename_collator()?;
    files.sort_by(|a, b| naming::sidebar_order(&collator, a, b, index_marker));
    debug!(track, pages = files.len(), "listed track");

    Ok(files
        .iter()
        .filter_map(|file| naming::markdown_stem(file))
        .map(|stem| SidebarEntry::doc(naming::doc_id(track, stem)))
        .collect())
}

/// Filenames of the `.md` files directly inside `dir`.
fn markdown_files(dir: &Path) -> Result<Vec<String>, SidebarError> {
    let io_err = |source| SidebarError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if naming::markdown_stem(&name).is_some() {
            files.push(name);
        }
    }
    Ok(files)
}

/// Ids of the study pages numbered `start..=end` that exist on disk,
/// ascending. A reversed range (`end < start`) is empty.
pub fn generate_study_ids(
    docs_root: &Path,
    track: &str,
    prefix: &str,
    start: u32,
    end: u32,
) -> Vec<String> {
    (start..=end)
        .map(|n| naming::study_id(track, prefix, n))
        .filter(|id| doc_exists(docs_root, id))
        .collect()
}

fn doc_exists(docs_root: &Path, id: &str) -> bool {
    docs_root
        .join(format!("{id}.{}", naming::MARKDOWN_EXT))
        .is_file()
}

/// Build a study sidebar from its module ranges, in range order.
///
/// Titled ranges always produce a category, even when none of their pages
/// exist. Untitled ranges contribute their pages directly.
pub fn generate_sidebar_items(
    docs_root: &Path,
    track: &str,
    prefix: &str,
    modules: &[ModuleRange],
) -> Vec<SidebarEntry> {
    modules
        .iter()
        .flat_map(|module| {
            let items: Vec<SidebarEntry> =
                generate_study_ids(docs_root, track, prefix, module.start, module.end)
                    .into_iter()
                    .map(SidebarEntry::doc)
                    .collect();

            match &module.title {
                Some(title) => vec![SidebarEntry::category(title.clone(), items)],
                None => items,
            }
        })
        .collect()
}

/// Study pages present in the track that no module range covers.
///
/// Only used for reporting; the pages still exist on the site, they just
/// aren't reachable from the sidebar.
pub fn uncovered_study_pages(docs_root: &Path, study: &StudySidebar) -> Vec<String> {
    let Ok(files) = markdown_files(&docs_root.join(&study.track)) else {
        return Vec::new();
    };

    let numbers: BTreeSet<u32> = files
        .iter()
        .filter_map(|f| naming::markdown_stem(f))
        .filter_map(naming::parse_study_stem)
        .filter(|(prefix, _)| *prefix == study.prefix)
        .map(|(_, n)| n)
        .collect();

    numbers
        .into_iter()
        .filter(|n| !study.modules.iter().any(|m| (m.start..=m.end).contains(n)))
        .map(|n| naming::study_id(&study.track, &study.prefix, n))
        .collect()
}

/// Search index contexts, one per configured track: `docs/{track}`.
pub fn search_context_paths(config: &SiteConfig) -> Vec<String> {
    let prefix = config.search.path_prefix.trim_end_matches('/');
    config
        .tracks()
        .into_iter()
        .map(|track| {
            if prefix.is_empty() {
                track.to_string()
            } else {
                format!("{prefix}/{track}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackSidebar;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn ids(entries: &[SidebarEntry]) -> Vec<&str> {
        entries
            .iter()
            .map(|e| match e {
                SidebarEntry::Doc { id } => id.as_str(),
                SidebarEntry::Category { label, .. } => label.as_str(),
            })
            .collect()
    }

    fn project(root: &Path, track: &str) -> (Vec<SidebarEntry>, Vec<SidebarWarning>) {
        let mut warnings = Vec::new();
        let entries =
            generate_project_sidebar(root, track, naming::INDEX_MARKER, &mut warnings).unwrap();
        (entries, warnings)
    }

    // =========================================================================
    // Directory-scan mode
    // =========================================================================

    #[test]
    fn missing_track_is_empty_with_one_warning() {
        let tmp = TempDir::new().unwrap();
        let (entries, warnings) = project(tmp.path(), "nope_ts");

        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            SidebarWarning::MissingTrack { track, .. } if track == "nope_ts"
        ));
    }

    #[test]
    fn track_that_is_a_file_counts_as_missing() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "solid_ts", "not a directory");
        let (entries, warnings) = project(tmp.path(), "solid_ts");
        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn index_page_sorts_first() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "t", &["aa.md", "zz_index.md"]);

        let (entries, warnings) = project(tmp.path(), "t");
        assert!(warnings.is_empty());
        assert_eq!(ids(&entries), vec!["t/zz_index", "t/aa"]);
    }

    #[test]
    fn regular_pages_sort_by_name() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "t", &["b.md", "a.md"]);

        let (entries, _) = project(tmp.path(), "t");
        assert_eq!(ids(&entries), vec!["t/a", "t/b"]);
    }

    #[test]
    fn punctuation_and_digits_follow_collation() {
        let tmp = TempDir::new().unwrap();
        write_pages(
            tmp.path(),
            "t",
            &["intro.md", "intro_advanced.md", "a1.md", "a_1.md", "a.md"],
        );

        let (entries, _) = project(tmp.path(), "t");
        assert_eq!(
            ids(&entries),
            vec!["t/a_1", "t/a", "t/a1", "t/intro_advanced", "t/intro"]
        );
    }

    #[test]
    fn multiple_index_pages_sort_among_themselves() {
        let tmp = TempDir::new().unwrap();
        write_pages(
            tmp.path(),
            "solid_ts",
            &["c.md", "solid_ts_index.md", "a.md", "appendix_index.md"],
        );

        let (entries, _) = project(tmp.path(), "solid_ts");
        assert_eq!(
            ids(&entries),
            vec![
                "solid_ts/appendix_index",
                "solid_ts/solid_ts_index",
                "solid_ts/a",
                "solid_ts/c",
            ]
        );
    }

    #[test]
    fn only_markdown_files_directly_in_track() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "t", &["page.md", "notes.txt", "draft.mdx"]);
        write_file(tmp.path(), "t/memo/page.memo", "memo");
        write_file(tmp.path(), "t/nested/deep.md", "# deep");
        std::fs::create_dir_all(tmp.path().join("t/folder.md")).unwrap();

        let (entries, _) = project(tmp.path(), "t");
        assert_eq!(ids(&entries), vec!["t/page"]);
    }

    #[test]
    fn empty_track_has_no_warning() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("t")).unwrap();
        let (entries, warnings) = project(tmp.path(), "t");
        assert!(entries.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn project_sidebar_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "t", &["x.md", "t_index.md", "b.md", "a_b.md"]);

        let first = project(tmp.path(), "t").0;
        let second = project(tmp.path(), "t").0;
        assert_eq!(first, second);
        assert_eq!(ids(&first), vec!["t/t_index", "t/a_b", "t/b", "t/x"]);
    }

    // =========================================================================
    // Numbered-range mode
    // =========================================================================

    #[test]
    fn study_ids_skip_missing_numbers() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 3, 5]);

        let found = generate_study_ids(tmp.path(), "ddd_cs", "ddd", 1, 5);
        assert_eq!(
            found,
            vec![
                "ddd_cs/ddd_study_001",
                "ddd_cs/ddd_study_003",
                "ddd_cs/ddd_study_005",
            ]
        );
    }

    #[test]
    fn reversed_range_is_empty() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 3]);
        assert!(generate_study_ids(tmp.path(), "ddd_cs", "ddd", 3, 1).is_empty());
    }

    #[test]
    fn single_number_range() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[7]);
        assert_eq!(
            generate_study_ids(tmp.path(), "ddd_cs", "ddd", 7, 7),
            vec!["ddd_cs/ddd_study_007"]
        );
    }

    #[test]
    fn titled_ranges_become_categories() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 3, 4]);

        let modules = vec![
            module(Some("Module 1"), 1, 2),
            module(Some("Module 2"), 3, 4),
        ];
        let entries = generate_sidebar_items(tmp.path(), "ddd_cs", "ddd", &modules);

        assert_eq!(
            entries,
            vec![
                SidebarEntry::category(
                    "Module 1",
                    vec![
                        SidebarEntry::doc("ddd_cs/ddd_study_001"),
                        SidebarEntry::doc("ddd_cs/ddd_study_002"),
                    ]
                ),
                SidebarEntry::category(
                    "Module 2",
                    vec![
                        SidebarEntry::doc("ddd_cs/ddd_study_003"),
                        SidebarEntry::doc("ddd_cs/ddd_study_004"),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn untitled_ranges_are_spliced_flat() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 3]);

        let modules = vec![module(None, 1, 1), module(Some("Rest"), 2, 3)];
        let entries = generate_sidebar_items(tmp.path(), "ddd_cs", "ddd", &modules);

        assert_eq!(ids(&entries), vec!["ddd_cs/ddd_study_001", "Rest"]);
        assert_eq!(entries[1].doc_count(), 2);
    }

    #[test]
    fn empty_titled_range_still_produces_category() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("ddd_cs")).unwrap();

        let modules = vec![module(Some("Coming soon"), 50, 60), module(None, 61, 70)];
        let entries = generate_sidebar_items(tmp.path(), "ddd_cs", "ddd", &modules);

        assert_eq!(entries, vec![SidebarEntry::category("Coming soon", vec![])]);
    }

    #[test]
    fn range_order_is_preserved() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 9]);

        let modules = vec![module(None, 9, 9), module(None, 1, 2)];
        let entries = generate_sidebar_items(tmp.path(), "ddd_cs", "ddd", &modules);
        assert_eq!(
            ids(&entries),
            vec![
                "ddd_cs/ddd_study_009",
                "ddd_cs/ddd_study_001",
                "ddd_cs/ddd_study_002",
            ]
        );
    }

    #[test]
    fn other_prefixes_are_not_matched() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "cqrs", &[1]);
        assert!(generate_study_ids(tmp.path(), "ddd_cs", "ddd", 1, 1).is_empty());
    }

    #[test]
    fn uncovered_pages_are_reported() {
        let tmp = TempDir::new().unwrap();
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2, 3, 12]);
        write_pages(tmp.path(), "ddd_cs", &["ddd_cs_index.md"]);

        let study = StudySidebar {
            id: "dddCsSidebar".into(),
            track: "ddd_cs".into(),
            prefix: "ddd".into(),
            modules: vec![module(Some("Module 1"), 1, 2)],
        };
        assert_eq!(
            uncovered_study_pages(tmp.path(), &study),
            vec!["ddd_cs/ddd_study_003", "ddd_cs/ddd_study_012"]
        );
    }

    #[test]
    fn over_padded_study_names_are_not_study_pages() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "ddd_cs", &["ddd_study_0001.md"]);
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[2]);

        let study = StudySidebar {
            id: "dddCsSidebar".into(),
            track: "ddd_cs".into(),
            prefix: "ddd".into(),
            modules: vec![],
        };
        assert_eq!(
            uncovered_study_pages(tmp.path(), &study),
            vec!["ddd_cs/ddd_study_002"]
        );
    }

    // =========================================================================
    // Whole-site build
    // =========================================================================

    #[test]
    fn build_sidebars_from_config() {
        let tmp = TempDir::new().unwrap();
        write_pages(tmp.path(), "kiss_ts", &["kiss_ts_index.md", "a.md"]);
        write_study_pages(tmp.path(), "ddd_cs", "ddd", &[1, 2]);

        let config = SiteConfig {
            sidebars: vec![
                TrackSidebar {
                    id: "kissTsSidebar".into(),
                    track: "kiss_ts".into(),
                },
                TrackSidebar {
                    id: "goneTsSidebar".into(),
                    track: "gone_ts".into(),
                },
            ],
            study_sidebars: vec![StudySidebar {
                id: "dddCsSidebar".into(),
                track: "ddd_cs".into(),
                prefix: "ddd".into(),
                modules: vec![module(Some("Module 1"), 1, 10)],
            }],
            ..SiteConfig::default()
        };

        let built = build_sidebars(tmp.path(), &config).unwrap();
        assert_eq!(built.sidebars.len(), 3);
        assert_eq!(
            ids(&built.sidebars["kissTsSidebar"]),
            vec!["kiss_ts/kiss_ts_index", "kiss_ts/a"]
        );
        assert!(built.sidebars["goneTsSidebar"].is_empty());
        assert_eq!(built.sidebars["dddCsSidebar"][0].doc_count(), 2);
        assert_eq!(built.warnings.len(), 1);
    }

    #[test]
    fn sidebars_serialize_as_flat_map() {
        let mut sidebars = Sidebars::default();
        sidebars
            .sidebars
            .insert("kissTsSidebar".into(), vec![SidebarEntry::doc("kiss_ts/a")]);
        sidebars.warnings.push(SidebarWarning::MissingTrack {
            track: "x".into(),
            path: "docs/x".into(),
        });

        let json = serde_json::to_value(&sidebars).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kissTsSidebar": [{ "type": "doc", "id": "kiss_ts/a" }]
            })
        );
    }

    #[test]
    fn search_contexts_follow_track_order() {
        let config = SiteConfig {
            sidebars: vec![
                TrackSidebar {
                    id: "a".into(),
                    track: "adr_ts".into(),
                },
                TrackSidebar {
                    id: "b".into(),
                    track: "kiss_ts".into(),
                },
            ],
            ..SiteConfig::default()
        };
        assert_eq!(
            search_context_paths(&config),
            vec!["docs/adr_ts", "docs/kiss_ts"]
        );

        let mut config = config;
        config.search.path_prefix = String::new();
        assert_eq!(search_context_paths(&config), vec!["adr_ts", "kiss_ts"]);
    }
}
