//! Result rendering: plain text, JSON and CSV.

mod csv;
mod json;
mod text;

use std::path::Path;

use clap::ValueEnum;
use fontscope_core::ScrapeResult;

use crate::error::{Error, Result};
use crate::logging::targets;

pub use self::csv::{CSV_HEADER, to_csv};
pub use self::json::{JsonReport, to_json};
pub use self::text::{TextOptions, to_text};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `results` in `format`.
///
/// Text reports are separated by a blank line. JSON is a single object for
/// one result and an array otherwise. CSV shares one header.
pub fn render(results: &[ScrapeResult], format: OutputFormat, text: &TextOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(results
            .iter()
            .map(|result| to_text(result, text))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(results, true),
        OutputFormat::Csv => to_csv(results),
    }
}

/// Write rendered output to `path`.
pub fn save(content: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
    tracing::info!(target: targets::OUTPUT, "results saved to {}", path.display());
    Ok(())
}
