use clap::{Parser, Subcommand};
use docnav::config::{self, SiteConfig};
use docnav::frontmatter::{self, DefaultParser, MemoEnricher};
use docnav::imaging::{self, RustBackend};
use docnav::{headers, logging, output, sidebar};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("DOCNAV_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("DOCNAV_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Shared flag for commands that rewrite docs in place.
#[derive(clap::Args, Clone, Copy)]
struct RewriteArgs {
    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Sidebar and page metadata generator for the architecture docs site")]
#[command(long_about = "\
Sidebar and page metadata generator for the architecture docs site

The docs tree is the data source. Every track directory becomes a sidebar,
numbered study pages are grouped into modules, and memo sidecars fill in page
descriptions.

Docs structure:

  docs/
  ├── solid_ts/                    # Track (listed by [[sidebars]])
  │   ├── solid_ts_index.md        # Landing page (index marker, sorts first)
  │   ├── 01-srp.md                # Page
  │   ├── memo/
  │   │   └── 01-srp.memo          # Description for 01-srp.md
  │   └── picture/
  │       └── diagram.png          # Downscaled by `docnav images`
  └── ddd_cs/                      # Track (listed by [[study_sidebars]])
      ├── ddd_study_001.md         # Study page, grouped by module ranges
      └── ddd_study_002.md

Description resolution (first available wins):
  frontmatter `description` → memo/{stem}.memo (line breaks collapsed)

Run 'docnav gen-config' to generate a documented docnav.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Docs root (defaults to `docs_dir` from the config)
    #[arg(long, global = true)]
    docs: Option<PathBuf>,

    /// Directory for generated JSON
    #[arg(long, default_value = ".docnav", global = true)]
    output: PathBuf,

    /// Config file (optional; stock defaults apply when absent)
    #[arg(long, default_value = "docnav.toml", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build sidebars.json and search-contexts.json
    Sidebars,
    /// Parse every page and write pages.json with enriched descriptions
    Pages,
    /// Strip BOMs and blank lines ahead of index-page frontmatter
    Clean(RewriteArgs),
    /// Downscale track pictures wider than the configured threshold
    Images(RewriteArgs),
    /// Validate config and docs without writing output
    Check,
    /// Run sidebars and pages
    Build,
    /// Print a stock docnav.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let site_config = config::load_config(&cli.config)?;
    let docs = resolve_docs_root(cli.docs.as_deref(), &site_config);

    match cli.command {
        Command::Sidebars => {
            run_sidebars(&docs, &cli.output, &site_config)?;
        }
        Command::Pages => {
            run_pages(&docs, &cli.output, &site_config)?;
        }
        Command::Clean(args) => {
            let report =
                headers::clean_index_headers(&docs, &site_config.index_marker, args.dry_run)?;
            output::print_clean_output(&report, args.dry_run);
        }
        Command::Images(args) => {
            init_thread_pool(&site_config.processing);
            let report = imaging::downscale_pictures(
                &RustBackend::new(),
                &docs,
                &site_config.images,
                args.dry_run,
            )?;
            output::print_images_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", docs.display());
            let sidebars = sidebar::build_sidebars(&docs, &site_config)?;
            output::print_sidebars_output(&sidebars);
            print_uncovered(&docs, &site_config);
            let pages = scan_enriched_pages(&docs, &site_config)?;
            output::print_pages_output(&pages);
            println!("==> Docs are valid");
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.output)?;
            println!("==> Stage 1: Sidebars from {}", docs.display());
            run_sidebars(&docs, &cli.output, &site_config)?;
            println!("==> Stage 2: Pages");
            run_pages(&docs, &cli.output, &site_config)?;
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

fn run_sidebars(
    docs: &Path,
    out_dir: &Path,
    site_config: &SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let sidebars = sidebar::build_sidebars(docs, site_config)?;
    write_json(&out_dir.join("sidebars.json"), &sidebars)?;
    write_json(
        &out_dir.join("search-contexts.json"),
        &sidebar::search_context_paths(site_config),
    )?;
    output::print_sidebars_output(&sidebars);
    print_uncovered(docs, site_config);
    Ok(())
}

fn run_pages(
    docs: &Path,
    out_dir: &Path,
    site_config: &SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = scan_enriched_pages(docs, site_config)?;
    write_json(&out_dir.join("pages.json"), &pages)?;
    output::print_pages_output(&pages);
    Ok(())
}

fn scan_enriched_pages(
    docs: &Path,
    site_config: &SiteConfig,
) -> Result<Vec<docnav::types::DocPage>, frontmatter::FrontMatterError> {
    frontmatter::scan_pages(
        docs,
        &MemoEnricher::new(DefaultParser),
        &site_config.index_marker,
    )
}

fn print_uncovered(docs: &Path, site_config: &SiteConfig) {
    for study in &site_config.study_sidebars {
        let uncovered = sidebar::uncovered_study_pages(docs, study);
        for line in output::format_uncovered(&study.id, &uncovered) {
            println!("{}", line);
        }
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// `--docs` wins over the config's `docs_dir`.
fn resolve_docs_root(cli_docs: Option<&Path>, site_config: &SiteConfig) -> PathBuf {
    cli_docs
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&site_config.docs_dir))
}
