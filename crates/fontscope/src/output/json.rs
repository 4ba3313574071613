use fontscope_core::{Font, ScrapeResult, Statistics};
use serde::Serialize;

use crate::error::Result;

/// JSON shape of one scan.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub url: &'a str,
    /// RFC 3339 time of the scan.
    pub timestamp: String,
    pub fonts: &'a [Font],
    pub statistics: Statistics,
    pub css_files: &'a [String],
    pub errors: &'a [String],
}

impl<'a> From<&'a ScrapeResult> for JsonReport<'a> {
    fn from(result: &'a ScrapeResult) -> Self {
        Self {
            url: &result.url,
            timestamp: result.timestamp.to_rfc3339(),
            fonts: &result.fonts,
            statistics: result.statistics(),
            css_files: &result.css_files,
            errors: &result.errors,
        }
    }
}

/// Encode results as JSON: one object, or an array for several results.
pub fn to_json(results: &[ScrapeResult], pretty: bool) -> Result<String> {
    let reports: Vec<JsonReport<'_>> = results.iter().map(JsonReport::from).collect();
    let encoded = match (reports.as_slice(), pretty) {
        ([single], true) => serde_json::to_string_pretty(single)?,
        ([single], false) => serde_json::to_string(single)?,
        (_, true) => serde_json::to_string_pretty(&reports)?,
        (_, false) => serde_json::to_string(&reports)?,
    };
    Ok(encoded)
}
