//! Page frontmatter parsing and memo-based description enrichment.
//!
//! Pages may leave `description` out of their frontmatter and keep it in a
//! plain-text sidecar instead:
//!
//! ```text
//! docs/ddd_cs/
//! ├── ddd_study_001.md          # no `description:` in frontmatter
//! └── memo/
//!     └── ddd_study_001.memo    # "Entities and value objects\nin practice"
//! ```
//!
//! [`MemoEnricher`] wraps any [`FrontMatterParser`]. After the wrapped parser
//! runs it fills in a missing description from the memo: trimmed, with every
//! run of line breaks collapsed to one space. A description written in the
//! page always wins, and a missing memo is simply no enrichment.

use crate::naming;
use crate::types::{DescriptionSource, DocPage};
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

const DESCRIPTION_KEY: &str = "description";
const FENCE: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid frontmatter YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Frontmatter in {0} is not a mapping")]
    NotAMapping(PathBuf),
}

/// Result of parsing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontMatter {
    pub front_matter: Mapping,
    /// Page body after the frontmatter block.
    pub content: String,
    /// Set when the description was filled in from a memo.
    pub enriched: bool,
}

impl ParsedFrontMatter {
    /// The page description, if it is set to something truthy.
    ///
    /// Non-string scalars are rendered as written (`2024`, `true`), and
    /// sequences or mappings as compact JSON.
    pub fn description(&self) -> Option<Cow<'_, str>> {
        let value = self.front_matter.get(DESCRIPTION_KEY).filter(|v| is_set(v))?;
        match value {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            other => serde_json::to_string(other).ok().map(Cow::Owned),
        }
    }

    fn has_description(&self) -> bool {
        self.front_matter.get(DESCRIPTION_KEY).is_some_and(is_set)
    }
}

/// Whether a description value is truthy: null, `false`, zero, NaN and
/// the empty string count as "no description".
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Tagged(tagged) => is_set(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => true,
    }
}

/// Turns a page's raw text into frontmatter plus body.
pub trait FrontMatterParser {
    fn parse(&self, file_path: &Path, file_content: &str)
    -> Result<ParsedFrontMatter, FrontMatterError>;
}

/// Leading `---` fenced YAML block, as the site generator reads it.
///
/// Pages without a block (or with an unterminated one) parse to an empty
/// mapping and keep their whole text as content.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl FrontMatterParser for DefaultParser {
    fn parse(
        &self,
        file_path: &Path,
        file_content: &str,
    ) -> Result<ParsedFrontMatter, FrontMatterError> {
        let Some((yaml, content)) = split_front_matter(file_content) else {
            return Ok(ParsedFrontMatter {
                front_matter: Mapping::new(),
                content: file_content.to_string(),
                enriched: false,
            });
        };

        if yaml.trim().is_empty() {
            return Ok(ParsedFrontMatter {
                front_matter: Mapping::new(),
                content: content.to_string(),
                enriched: false,
            });
        }

        let value: Value = serde_yaml::from_str(yaml).map_err(|source| FrontMatterError::Yaml {
            path: file_path.to_path_buf(),
            source,
        })?;
        let front_matter = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(m) => m,
            _ => return Err(FrontMatterError::NotAMapping(file_path.to_path_buf())),
        };

        Ok(ParsedFrontMatter {
            front_matter,
            content: content.to_string(),
            enriched: false,
        })
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its YAML and body parts.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let rest = text
        .strip_prefix(FENCE)
        .and_then(|r| r.strip_prefix("\r\n").or_else(|| r.strip_prefix('\n')))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Fills in a missing description from the page's memo sidecar.
#[derive(Debug, Clone, Default)]
pub struct MemoEnricher<P> {
    inner: P,
}

impl<P: FrontMatterParser> MemoEnricher<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: FrontMatterParser> FrontMatterParser for MemoEnricher<P> {
    fn parse(
        &self,
        file_path: &Path,
        file_content: &str,
    ) -> Result<ParsedFrontMatter, FrontMatterError> {
        let mut result = self.inner.parse(file_path, file_content)?;
        if result.has_description() {
            return Ok(result);
        }

        if let Some(memo) = read_memo(file_path) {
            debug!(page = %file_path.display(), "description from memo");
            result
                .front_matter
                .insert(Value::from(DESCRIPTION_KEY), Value::from(memo));
            result.enriched = true;
        }
        Ok(result)
    }
}

/// Read and normalize the memo for a page.
///
/// Returns `None` when the memo doesn't exist or normalizes to nothing.
/// Unreadable memos are logged and skipped.
pub fn read_memo(page: &Path) -> Option<String> {
    let path = naming::memo_path(page);
    match fs::read_to_string(&path) {
        Ok(raw) => Some(collapse_line_breaks(&raw)).filter(|s| !s.is_empty()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(memo = %path.display(), error = %e, "skipping unreadable memo");
            None
        }
    }
}

/// Trim, then replace each run of `\r`/`\n` with a single space.
pub fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for c in text.trim().chars() {
        if c == '\r' || c == '\n' {
            if !in_break {
                out.push(' ');
            }
            in_break = true;
        } else {
            out.push(c);
            in_break = false;
        }
    }
    out
}

/// Parse every page under the docs root into a [`DocPage`], sorted by slug.
///
/// `memo/` directories are skipped; hidden entries too.
pub fn scan_pages(
    docs_root: &Path,
    parser: &impl FrontMatterParser,
    index_marker: &str,
) -> Result<Vec<DocPage>, FrontMatterError> {
    let walker = WalkDir::new(docs_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !(e.file_type().is_dir() && name == naming::MEMO_DIR)
        });

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !naming::is_page(entry.path()) {
            continue;
        }
        pages.push(read_page(docs_root, entry.path(), parser, index_marker)?);
    }

    pages.sort_by(|a, b| a.slug.cmp(&b.slug));
    Ok(pages)
}

fn read_page(
    docs_root: &Path,
    path: &Path,
    parser: &impl FrontMatterParser,
    index_marker: &str,
) -> Result<DocPage, FrontMatterError> {
    let text = fs::read_to_string(path)?;
    let parsed = parser.parse(path, &text)?;

    let rel = path.strip_prefix(docs_root).unwrap_or(path);
    let rel_path = to_slash(rel);
    let slug = to_slash(&rel.with_extension(""));
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let description = parsed.description().map(Cow::into_owned);
    let description_source = match (&description, parsed.enriched) {
        (None, _) => None,
        (Some(_), true) => Some(DescriptionSource::Memo),
        (Some(_), false) => Some(DescriptionSource::FrontMatter),
    };

    Ok(DocPage {
        path: rel_path,
        slug,
        has_index_marker: naming::has_index_marker(&filename, index_marker),
        description,
        description_source,
    })
}

/// Relative path with `/` separators on every platform.
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
