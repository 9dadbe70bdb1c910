mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use neogrok_core::{
    livegrep_redirect_url, parse_cutoff, MatchSortOrder, RenderedPage, RepoList, ResultsView,
    SearchResponse, SearchType, TimedResponse,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "neogrok",
    version,
    about = "Render saved code search responses in the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a search API response
    Render {
        /// Response JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Order matches within each file
        #[arg(short, long)]
        sort: Option<SortArg>,

        /// Matches shown per file before the rest are hidden
        #[arg(short, long)]
        cutoff: Option<String>,

        /// Show every match of every file
        #[arg(short = 'a', long)]
        expand_all: bool,

        /// TOML preferences file
        #[arg(short, long)]
        prefs: Option<PathBuf>,

        /// Print the rendered results as JSON
        #[arg(long)]
        json: bool,

        /// Round trip of the saved request in ms; defaults to the time spent loading it
        #[arg(long)]
        request_ms: Option<u64>,
    },

    /// List repositories from a list API response
    Repos {
        /// List or search response JSON file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,

        /// Print the repository list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Translate a livegrep fileviewer path to a GitHub URL
    Redirect {
        /// Path such as /view/<org>/<repo>/<file>
        path: String,

        /// URL fragment, e.g. `#L10-L20`
        #[arg(long, default_value = "")]
        hash: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    LineNumber,
    Score,
}

impl From<SortArg> for MatchSortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::LineNumber => MatchSortOrder::LineNumber,
            SortArg::Score => MatchSortOrder::Score,
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "neogrok=info",
        1 => "neogrok=debug",
        _ => "neogrok=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Render {
            input,
            sort,
            cutoff,
            expand_all,
            prefs,
            json,
            request_ms,
        } => {
            let mut preferences = match prefs {
                Some(path) => config::load_preferences(&path)?,
                None => Default::default(),
            };
            if let Some(sort) = sort {
                preferences.match_sort_order = sort.into();
            }
            if let Some(cutoff) = cutoff {
                preferences.file_matches_cutoff =
                    parse_cutoff(&cutoff).context("Invalid --cutoff")?;
            }
            debug!(?preferences, "rendering");

            let started = Instant::now();
            let response = SearchResponse::from_json(&read_input(&input)?)
                .context("Failed to parse search response")?;
            let request_duration_ms =
                request_ms.unwrap_or_else(|| started.elapsed().as_millis() as u64);

            if response.search_type == SearchType::RepoOnly {
                info!("repository-only search, listing repositories");
                return print_page(
                    &RenderedPage::Repositories(response.repo_results),
                    json,
                );
            }

            let mut view = ResultsView::from_timed(
                TimedResponse {
                    response,
                    request_duration_ms,
                },
                preferences,
            );
            if expand_all {
                for i in 0..view.file_count() {
                    if let Err(e) = view.expand(i) {
                        warn!(file = i, "cannot expand: {e}");
                    }
                }
            }
            print_page(&RenderedPage::Files(view.render()), json)
        }
        Commands::Repos { input, json } => {
            let content = read_input(&input)?;
            // a search response embeds the list under RepoResults
            let repos: RepoList = match SearchResponse::from_json(&content) {
                Ok(response) => response.repo_results,
                Err(_) => {
                    serde_json::from_str(&content).context("Failed to parse repository list")?
                }
            };
            print_page(&RenderedPage::Repositories(repos), json)
        }
        Commands::Redirect { path, hash } => {
            let url = livegrep_redirect_url(&path, &hash)
                .with_context(|| format!("Malformed livegrep path: {path}"))?;
            println!("{url}");
            Ok(())
        }
    }
}

fn print_page(page: &RenderedPage, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }
    match page {
        RenderedPage::Files(results) => output::print_results(results),
        RenderedPage::Repositories(repos) => output::print_repositories(repos),
    }
    Ok(())
}
