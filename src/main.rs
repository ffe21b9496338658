mod cache;
mod commands;
mod config;
mod error;
mod fetch;
mod query;
mod ranking;
mod refresh;
mod types;

use anyhow::Context;
use cache::CacheStore;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueHint};
use clap_complete::Shell;
use config::{FilterConfig, Window};
use fetch::{FetchOptions, FetchOutcome, Fetcher};
use refresh::RefreshMode;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gh-trending")]
#[command(about = "Trending GitHub repositories, ranked by stars per day", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Time range: day, week, month, year
    #[arg(short = 'd', long, default_value = "week")]
    duration: String,

    /// Shortcut for --duration day
    #[arg(long)]
    today: bool,

    /// Shortcut for --duration week
    #[arg(long)]
    week: bool,

    /// Shortcut for --duration month
    #[arg(long)]
    monthly: bool,

    /// Number of repositories (1-100, anything else means 10)
    #[arg(short = 'l', long, default_value_t = 10, allow_negative_numbers = true)]
    limit: i64,

    /// Filter by programming language
    #[arg(long)]
    language: Option<String>,

    /// Alias for --language (ignored when --language is given)
    #[arg(long)]
    lang: Option<String>,

    /// Filter by spoken language
    #[arg(long)]
    spoken: Option<String>,

    /// HTTP/HTTPS proxy
    #[arg(long, value_hint = ValueHint::Url)]
    proxy: Option<String>,

    /// Auto refresh interval (e.g. 30s, 5m, 1h)
    #[arg(short = 'w', long)]
    watch: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Also write the output to a file
    #[arg(long, value_hint = ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// Open the top repository in your browser
    #[arg(long)]
    open: bool,

    /// Where the last successful result is kept
    #[arg(long, env = "GH_TRENDING_CACHE", value_hint = ValueHint::FilePath)]
    cache_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Shortcut flags win over --duration; --monthly beats --week beats --today.
    fn window(&self) -> Window {
        if self.monthly {
            Window::Month
        } else if self.week {
            Window::Week
        } else if self.today {
            Window::Day
        } else {
            Window::parse(&self.duration)
        }
    }

    fn language(&self) -> Option<String> {
        self.language
            .clone()
            .filter(|l| !l.is_empty())
            .or_else(|| self.lang.clone())
    }

    fn filter(&self) -> FilterConfig {
        FilterConfig::new(
            self.window(),
            self.limit,
            self.language(),
            self.spoken.clone(),
        )
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn show(cli: &Cli, filter: &FilterConfig, outcome: &FetchOutcome, first_cycle: bool) {
    let output = if cli.json {
        match commands::render_json(outcome) {
            Ok(json) => json,
            Err(e) => {
                warn!("could not encode results as JSON: {}", e);
                return;
            }
        }
    } else {
        commands::render_text(outcome, filter.window, Utc::now())
    };
    println!("{}", output);

    if let Some(path) = &cli.save {
        match commands::save_output(path, &output) {
            Ok(()) => eprintln!("Saved to {}", path.display()),
            Err(e) => warn!("could not save output to {}: {}", path.display(), e),
        }
    }

    if cli.open && first_cycle {
        if let Some(top) = outcome.repositories().first() {
            if let Err(e) = commands::open_in_browser(&top.html_url) {
                warn!("could not open {}: {}", top.html_url, e);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        commands::generate_completions(*shell);
        return Ok(());
    }

    init_tracing(cli.verbose);

    let filter = cli.filter();
    let interval = cli
        .watch
        .as_deref()
        .map(config::parse_interval)
        .transpose()?;
    let mode = RefreshMode::from_interval(interval);

    let cache_path = match &cli.cache_file {
        Some(path) => path.clone(),
        None => config::default_cache_path()?,
    };
    let options = FetchOptions {
        proxy: cli.proxy.clone(),
        timeout: Duration::from_secs(cli.timeout.max(1)),
        ..FetchOptions::default()
    };
    let fetcher = Fetcher::new(&options, CacheStore::new(cache_path))
        .context("Can't create HTTP client")?;

    info!(window = %filter.window, limit = filter.limit(), ?mode, "starting");

    refresh::run(mode, |cycle| {
        let outcome = fetcher.fetch(&filter);
        info!(cycle, live = outcome.is_live(), count = outcome.repositories().len(), "cycle done");
        show(&cli, &filter, &outcome, cycle == 1);

        if let RefreshMode::Watching(every) = mode {
            eprintln!("\nRefreshing in {:?}... (Ctrl + C to stop)", every);
        }
        ControlFlow::Continue(())
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gh-trending").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn shortcut_flags_override_duration() {
        assert_eq!(parse(&[]).window(), Window::Week);
        assert_eq!(parse(&["-d", "YEAR"]).window(), Window::Year);
        assert_eq!(parse(&["-d", "year", "--today"]).window(), Window::Day);
        assert_eq!(parse(&["--today", "--monthly"]).window(), Window::Month);
        assert_eq!(parse(&["--today", "--week"]).window(), Window::Week);
    }

    #[test]
    fn lang_alias_and_limit_resolution() {
        let cli = parse(&["--lang", "Rust", "-l", "150", "--spoken", "en"]);
        let filter = cli.filter();
        assert_eq!(filter.language.as_deref(), Some("Rust"));
        assert_eq!(filter.spoken_language.as_deref(), Some("en"));
        assert_eq!(filter.limit(), 10);
        assert_eq!(parse(&["--limit", "0"]).filter().limit(), 10);
        assert_eq!(parse(&["--limit", "-3"]).filter().limit(), 10);
        assert_eq!(parse(&["--limit", "42"]).filter().limit(), 42);
    }

    #[test]
    fn language_wins_over_lang_alias() {
        let both = parse(&["--language", "Go", "--lang", "Rust"]);
        assert_eq!(both.filter().language.as_deref(), Some("Go"));

        let empty_language = parse(&["--language", "", "--lang", "Rust"]);
        assert_eq!(empty_language.filter().language.as_deref(), Some("Rust"));

        assert_eq!(parse(&[]).filter().language, None);
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = parse(&["completions", "zsh"]);
        assert!(matches!(cli.command, Some(Commands::Completions { shell: Shell::Zsh })));
    }
}
