//! # docnav
//!
//! Build-time navigation and page metadata for a documentation site that
//! teaches software-architecture concepts in parallel C# and TypeScript
//! tracks. The docs tree is the data source: each track directory becomes a
//! sidebar, numbered study pages are grouped into modules, and `.memo`
//! sidecars supply page descriptions that frontmatter leaves out.
//!
//! # Pipeline
//!
//! Each command reads the docs tree and writes one artifact. None depends on
//! another's output, so they can run in any order:
//!
//! ```text
//! sidebars   docs/ + docnav.toml  →  .docnav/sidebars.json, search-contexts.json
//! pages      docs/                →  .docnav/pages.json
//! clean      docs/**/*_index.md   →  rewritten in place
//! images     docs/*/picture/*.png →  rewritten in place
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sidebar`] | Directory-scan sidebars per track and numbered-range study sidebars |
//! | [`frontmatter`] | YAML frontmatter parsing and the memo description enricher |
//! | [`headers`] | Strips BOMs and blank lines ahead of index-page frontmatter |
//! | [`imaging`] | Downscales oversized track pictures in parallel |
//! | [`config`] | `docnav.toml` loading, stock defaults, merging, and validation |
//! | [`naming`] | Filename conventions: index marker, study ids, memo paths |
//! | [`types`] | Serialized output types (`SidebarEntry`, `DocPage`) |
//! | [`output`] | CLI summary formatting |
//! | [`logging`] | Tracing subscriber setup |
//!
//! # Design Decisions
//!
//! ## Sidebars Are Data, Not Code
//!
//! The site generator loads `sidebars.json` as-is. Entries are tagged with
//! `type` (`doc` or `category`) so the JSON matches the generator's sidebar
//! schema without a translation layer.
//!
//! ## Missing Content Is Not Fatal
//!
//! A track directory that doesn't exist yet yields an empty sidebar plus a
//! warning, and a study range with gaps lists only the pages present. Authors
//! add tracks and lessons incrementally; the build should never block on
//! unwritten pages.
//!
//! ## Parser Wrapping
//!
//! Description enrichment is a [`frontmatter::FrontMatterParser`] wrapping
//! another parser. The inner parser stays in charge of syntax, and the
//! wrapper only fills a description the page didn't set itself.

pub mod config;
pub mod frontmatter;
pub mod headers;
pub mod imaging;
pub mod logging;
pub mod naming;
pub mod output;
pub mod sidebar;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
