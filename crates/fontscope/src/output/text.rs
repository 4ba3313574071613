use std::fmt::Write;

use console::Style;
use fontscope_core::{Font, FontKind, ScrapeResult};

/// Selectors listed per font before the rest are summarized.
const MAX_SELECTORS: usize = 3;

/// Text rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Include sources, selectors, unicode ranges, CSS files and the time.
    pub verbose: bool,
    /// Emit ANSI colours.
    pub colors: bool,
}

struct Painter {
    colors: bool,
}

impl Painter {
    fn paint(&self, text: impl std::fmt::Display, style: Style) -> String {
        style.force_styling(self.colors).apply_to(text).to_string()
    }
}

/// Human-readable report for one scan.
pub fn to_text(result: &ScrapeResult, options: &TextOptions) -> String {
    let painter = Painter {
        colors: options.colors,
    };
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        painter.paint(format!("Font Analysis Results for {}", result.url), Style::new().cyan().bold())
    );
    let _ = writeln!(out, "{}\n", "=".repeat(50));

    let stats = result.statistics();
    let _ = writeln!(out, "{}", painter.paint("Summary:", Style::new().green().bold()));
    let _ = writeln!(out, "- Total fonts found: {}", stats.total_fonts);
    let _ = writeln!(out, "- Web fonts: {}", stats.web_fonts);
    let _ = writeln!(out, "- System fonts: {}", stats.system_fonts);
    let _ = writeln!(out, "- Custom fonts: {}", stats.custom_fonts);
    let _ = writeln!(out, "- CSS files analyzed: {}", stats.css_files_count);
    if stats.google_fonts > 0 {
        let _ = writeln!(out, "- Google Fonts: {}", stats.google_fonts);
    }
    if stats.adobe_fonts > 0 {
        let _ = writeln!(out, "- Adobe Fonts: {}", stats.adobe_fonts);
    }
    out.push('\n');

    for (kind, title, style) in [
        (FontKind::Web, "Web Fonts", Style::new().blue().bold()),
        (FontKind::System, "System Fonts", Style::new().yellow().bold()),
        (FontKind::Custom, "Custom Fonts", Style::new().magenta().bold()),
    ] {
        let fonts: Vec<&Font> = result.fonts_of_kind(kind).collect();
        if fonts.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", painter.paint(format!("{title} ({}):", fonts.len()), style));
        for font in fonts {
            write_font(&mut out, font, options.verbose, &painter);
        }
        out.push('\n');
    }

    if options.verbose && !result.css_files.is_empty() {
        let _ = writeln!(out, "{}", painter.paint("CSS Files Analyzed:", Style::new().green().bold()));
        for file in &result.css_files {
            let _ = writeln!(out, "  - {file}");
        }
        out.push('\n');
    }

    if !result.errors.is_empty() {
        let _ = writeln!(out, "{}", painter.paint("Errors:", Style::new().red().bold()));
        for error in &result.errors {
            let _ = writeln!(out, "{}", painter.paint(format!("  ⚠ {error}"), Style::new().red()));
        }
        out.push('\n');
    }

    if options.verbose {
        let _ = writeln!(
            out,
            "Analysis completed at: {}",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }

    out
}

fn write_font(out: &mut String, font: &Font, verbose: bool, painter: &Painter) {
    let _ = write!(
        out,
        "{}{}",
        painter.paint("  ✓ ", Style::new().green()),
        painter.paint(&font.name, Style::new().bold())
    );
    if let Some(provider) = font.provider {
        let _ = write!(out, "{}", painter.paint(format!(" ({provider})"), Style::new().cyan()));
    }
    out.push('\n');

    if !font.weights.is_empty() && font.weights != ["400"] {
        let _ = writeln!(out, "    - Weights: {}", font.weights.join(", "));
    }
    if !font.styles.is_empty() && font.styles != ["normal"] {
        let _ = writeln!(out, "    - Styles: {}", font.styles.join(", "));
    }
    if let Some(format) = &font.format {
        let _ = writeln!(out, "    - Format: {format}");
    }

    if verbose {
        if let Some(source) = &font.source {
            let _ = writeln!(out, "    - Source: {source}");
        }
        if !font.selectors.is_empty() {
            let shown = font.selectors.iter().take(MAX_SELECTORS).cloned().collect::<Vec<_>>();
            let mut line = shown.join(", ");
            if font.selectors.len() > MAX_SELECTORS {
                let _ = write!(line, " (and {} more)", font.selectors.len() - MAX_SELECTORS);
            }
            let _ = writeln!(out, "    - Used in: {line}");
        }
        if let Some(range) = &font.unicode_range {
            let _ = writeln!(out, "    - Unicode range: {range}");
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontscope_core::Provider;

    fn sample() -> ScrapeResult {
        let mut result = ScrapeResult::new("https://example.com/");
        result.fonts.push(
            Font::new("Inter", FontKind::Web)
                .with_source("https://fonts.googleapis.com/css2?family=Inter")
                .with_provider(Some(Provider::GoogleFonts))
                .with_weight("400")
                .with_weight("700")
                .with_style("normal"),
        );
        result.fonts.push(
            Font::new("Arial", FontKind::System)
                .with_selector("body")
                .with_selector("p")
                .with_selector("li")
                .with_selector("td")
                .with_selector("th"),
        );
        result.add_css_file("inline");
        result.add_error("Failed to fetch CSS https://example.com/missing.css: HTTP 404");
        result
    }

    #[test]
    fn plain_report_sections() {
        let text = to_text(&sample(), &TextOptions::default());

        assert!(text.starts_with("Font Analysis Results for https://example.com/\n"));
        assert!(text.contains("- Total fonts found: 2\n"));
        assert!(text.contains("- Google Fonts: 1\n"));
        assert!(!text.contains("Adobe Fonts:"));
        assert!(text.contains("Web Fonts (1):\n  ✓ Inter (Google Fonts)\n"));
        assert!(text.contains("    - Weights: 400, 700\n"));
        assert!(!text.contains("Styles:"));
        assert!(text.contains("System Fonts (1):"));
        assert!(!text.contains("Custom Fonts"));
        assert!(text.contains("Errors:\n  ⚠ Failed to fetch CSS"));
        assert!(!text.contains("\u{1b}["));
    }

    #[test]
    fn verbose_adds_details() {
        let plain = to_text(&sample(), &TextOptions::default());
        assert!(!plain.contains("Used in"));
        assert!(!plain.contains("CSS Files Analyzed"));

        let verbose = to_text(
            &sample(),
            &TextOptions {
                verbose: true,
                colors: false,
            },
        );
        assert!(verbose.contains("    - Source: https://fonts.googleapis.com/css2?family=Inter\n"));
        assert!(verbose.contains("    - Used in: body, p, li (and 2 more)\n"));
        assert!(verbose.contains("CSS Files Analyzed:\n  - inline\n"));
        assert!(verbose.contains("Analysis completed at: "));
    }

    #[test]
    fn errors_come_last() {
        let text = to_text(&sample(), &TextOptions::default());
        let errors = text.find("Errors:").unwrap();
        let fonts = text.find("System Fonts").unwrap();
        assert!(errors > fonts);
    }

    #[test]
    fn colors_emit_ansi() {
        let text = to_text(
            &sample(),
            &TextOptions {
                verbose: false,
                colors: true,
            },
        );
        assert!(text.contains("\u{1b}["));
    }
}
