use fontscope_core::{Font, ScrapeResult};

use crate::error::Result;

/// Header row of the CSV output.
pub const CSV_HEADER: &str = "name,type,provider,source,weights,styles,format,selectors,unicode_range";

const COLUMNS: [&str; 9] = [
    "name",
    "type",
    "provider",
    "source",
    "weights",
    "styles",
    "format",
    "selectors",
    "unicode_range",
];

/// Encode the fonts of all results as CSV, one row per font.
///
/// List fields are joined with `;`; absent values are empty cells.
pub fn to_csv(results: &[ScrapeResult]) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for font in results.iter().flat_map(|result| &result.fonts) {
        writer.write_record(row(font))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ::csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn row(font: &Font) -> [String; 9] {
    [
        font.name.clone(),
        font.kind.to_string(),
        font.provider.map(|p| p.to_string()).unwrap_or_default(),
        font.source.clone().unwrap_or_default(),
        font.weights.join(";"),
        font.styles.join(";"),
        font.format.clone().unwrap_or_default(),
        font.selectors.join(";"),
        font.unicode_range.clone().unwrap_or_default(),
    ]
}
