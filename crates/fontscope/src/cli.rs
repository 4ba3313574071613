//! Command line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use fontscope_core::{FontKind, ScrapeResult};
use fontscope_net::HttpClient;

use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::output::{OutputFormat, TextOptions, render, save};
use crate::scan::{FontScraper, filter_by_kind};

/// Find the fonts a website uses.
#[derive(Parser, Debug)]
#[command(name = "fontscope")]
#[command(version, about = "Find the fonts used by websites", long_about = None)]
pub struct Cli {
    /// Websites to analyze; a missing scheme defaults to https
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Also write the results to this file
    #[arg(short, long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Show sources, selectors and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// User agent sent with requests
    #[arg(short, long)]
    pub user_agent: Option<String>,

    /// Do not follow @import rules in stylesheets
    #[arg(long)]
    pub no_external: bool,

    /// Leave system fonts out of the results
    #[arg(long)]
    pub exclude_system: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_colors: bool,

    /// Pause between requests in seconds
    #[arg(long, value_name = "SECS")]
    pub delay: Option<f64>,

    /// Only report fonts of this type
    #[arg(short, long, value_enum)]
    pub filter: Option<KindFilter>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Font types accepted by `--filter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Web,
    System,
    Custom,
}

impl From<KindFilter> for FontKind {
    fn from(filter: KindFilter) -> Self {
        match filter {
            KindFilter::Web => FontKind::Web,
            KindFilter::System => FontKind::System,
            KindFilter::Custom => FontKind::Custom,
        }
    }
}

impl Cli {
    /// The configuration file (or defaults) with flag overrides applied.
    pub fn scraper_config(&self) -> Result<ScraperConfig> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };

        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(delay) = self.delay {
            if !delay.is_finite() || delay < 0.0 {
                return Err(Error::config(format!("delay must be a non-negative number of seconds, got {delay}")));
            }
            config.delay_ms = (delay * 1000.0).round() as u64;
        }
        if self.no_external {
            config.skip_external = true;
        }
        if self.exclude_system {
            config.include_system = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Text options for a destination; colours only reach terminals.
    pub fn text_options(&self, terminal: bool) -> TextOptions {
        TextOptions {
            verbose: self.verbose,
            colors: terminal && !self.no_colors,
        }
    }
}

/// Whether a single-site scan found nothing because of errors.
pub fn scan_failed(results: &[ScrapeResult]) -> bool {
    matches!(results, [only] if only.fonts.is_empty() && !only.errors.is_empty())
}

/// Run a scan as described by `cli` and print the report.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.scraper_config()?;
    let client = HttpClient::with_config(config.to_http_config())?;
    let scraper = FontScraper::new(client, &config);

    let mut results = match cli.urls.as_slice() {
        [url] => vec![scraper.analyze_website(url).await],
        urls => scraper.analyze_many(urls).await,
    };
    let failed = scan_failed(&results);

    if let Some(filter) = cli.filter {
        results = results
            .into_iter()
            .map(|result| filter_by_kind(result, filter.into()))
            .collect();
    }

    let terminal = cli.text_options(console::Term::stdout().is_term());
    print!("{}", render(&results, cli.output, &terminal)?);

    let mut code = if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS };
    if let Some(path) = &cli.save {
        let content = render(&results, cli.output, &cli.text_options(false))?;
        match save(&content, path) {
            Ok(()) => eprintln!("Results saved to {}", path.display()),
            Err(err) => {
                eprintln!("error: {err}");
                code = ExitCode::FAILURE;
            }
        }
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontscope_core::Font;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fontscope").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn url_is_required() {
        assert!(Cli::try_parse_from(["fontscope"]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = parse(&["example.com"]);
        assert_eq!(cli.urls, vec!["example.com".to_string()]);
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.filter.is_none());
        assert_eq!(cli.scraper_config().unwrap(), ScraperConfig::default());
    }

    #[test]
    fn all_flags() {
        let cli = parse(&[
            "a.example",
            "b.example",
            "-o",
            "csv",
            "-s",
            "out.csv",
            "-v",
            "-t",
            "12",
            "-u",
            "probe/2.0",
            "--no-external",
            "--exclude-system",
            "--no-colors",
            "--delay",
            "0.25",
            "-f",
            "web",
        ]);
        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.output, OutputFormat::Csv);
        assert_eq!(cli.save, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.filter, Some(KindFilter::Web));

        let config = cli.scraper_config().unwrap();
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.user_agent, "probe/2.0");
        assert_eq!(config.delay_ms, 250);
        assert!(config.skip_external);
        assert!(!config.include_system);

        let text = cli.text_options(true);
        assert!(text.verbose);
        assert!(!text.colors);
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["fontscope", "example.com", "-f", "bitmap"]).is_err());
    }

    #[test]
    fn negative_delay_is_rejected() {
        let cli = parse(&["example.com", "--delay=-1"]);
        assert!(matches!(cli.scraper_config(), Err(Error::Config(_))));
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();
        writeln!(file, "delay_ms = 0").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = parse(&["example.com", "-c", &path, "-t", "9"]);
        let config = cli.scraper_config().unwrap();
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.delay_ms, 0);
    }

    #[test]
    fn failure_needs_single_empty_result_with_errors() {
        let mut failed = ScrapeResult::new("https://down.example/");
        failed.add_error("Failed to fetch https://down.example/: Request timed out");
        assert!(scan_failed(std::slice::from_ref(&failed)));

        let empty = ScrapeResult::new("https://blank.example/");
        assert!(!scan_failed(std::slice::from_ref(&empty)));

        let mut partial = failed.clone();
        partial.fonts.push(Font::named("Arial"));
        assert!(!scan_failed(&[partial]));

        assert!(!scan_failed(&[failed.clone(), failed]));
    }
}
