//! Site analysis: fetch a page and its stylesheets, then detect fonts.

use std::collections::HashSet;

use fontscope_core::parser::extract_imports;
use fontscope_core::{
    AnalyzeOptions, CssDocument, FontKind, HtmlSignals, ScrapeResult, analyze, normalize_page_url,
};
use fontscope_net::Fetcher;
use futures_util::stream::{self, StreamExt};
use url::Url;

use crate::config::ScraperConfig;
use crate::html::{HtmlDocument, PageSignals};
use crate::logging::targets;

/// Scan behaviour taken from a [`ScraperConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub analyze: AnalyzeOptions,
    /// Do not follow `@import` rules.
    pub skip_external: bool,
    /// Longest `@import` chain followed from a page stylesheet.
    pub max_import_depth: usize,
    /// Sites analyzed at once by [`FontScraper::analyze_many`].
    pub concurrency: usize,
}

impl From<&ScraperConfig> for ScrapeOptions {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            analyze: config.analyze_options(),
            skip_external: config.skip_external,
            max_import_depth: config.max_import_depth,
            concurrency: config.concurrency.max(1),
        }
    }
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self::from(&ScraperConfig::default())
    }
}

/// Finds the fonts used by websites.
///
/// Fetch failures never abort a scan. They are recorded in the result's
/// `errors` and the scan continues with whatever was retrieved.
#[derive(Debug)]
pub struct FontScraper<F> {
    fetcher: F,
    options: ScrapeOptions,
}

impl<F: Fetcher> FontScraper<F> {
    pub fn new(fetcher: F, config: &ScraperConfig) -> Self {
        Self::with_options(fetcher, ScrapeOptions::from(config))
    }

    pub fn with_options(fetcher: F, options: ScrapeOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// Analyze one website.
    pub async fn analyze_website(&self, url: &str) -> ScrapeResult {
        let page_url = match normalize_page_url(url) {
            Ok(page_url) => page_url,
            Err(err) => {
                tracing::warn!(target: targets::SCRAPER, "{}", err);
                let mut result = ScrapeResult::new(url.trim());
                result.add_error(err.to_string());
                return result;
            }
        };

        tracing::info!(target: targets::SCRAPER, "analyzing {}", page_url);
        let html = match self.fetcher.fetch_html(page_url.as_str()).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(target: targets::SCRAPER, "failed to fetch {}: {}", page_url, err);
                let mut result = ScrapeResult::new(page_url.as_str());
                result.add_error(format!("Failed to fetch {page_url}: {err}"));
                return result;
            }
        };

        let page = HtmlDocument::parse(&html).signals(&page_url);
        let (documents, errors) = self.collect_stylesheets(&page_url, &page).await;

        let signals = HtmlSignals {
            inline_styles: page.inline_styles,
            services: page.services,
            errors,
        };
        let result = analyze(page_url.as_str(), &signals, &documents, &self.options.analyze);
        tracing::debug!(
            target: targets::SCRAPER,
            "{}: {} fonts from {} stylesheets, {} errors",
            result.url,
            result.fonts.len(),
            result.css_files.len(),
            result.errors.len()
        );
        result
    }

    /// Analyze several websites, at most `concurrency` at a time.
    ///
    /// Results come back in input order.
    pub async fn analyze_many(&self, urls: &[String]) -> Vec<ScrapeResult> {
        let mut indexed: Vec<(usize, ScrapeResult)> = stream::iter(urls.iter().enumerate())
            .map(|(index, url)| async move { (index, self.analyze_website(url).await) })
            .buffer_unordered(self.options.concurrency.max(1))
            .collect()
            .await;
        indexed.sort_by_key(|(index, _)| *index);
        indexed.into_iter().map(|(_, result)| result).collect()
    }

    /// Gather `<style>` blocks, linked stylesheets and their imports.
    ///
    /// Stylesheets are fetched level by level: linked sheets first, then the
    /// sheets they import, down to `max_import_depth`. Each URL is fetched at
    /// most once, which also breaks import cycles.
    async fn collect_stylesheets(
        &self,
        page_url: &Url,
        page: &PageSignals,
    ) -> (Vec<CssDocument>, Vec<String>) {
        let follow_imports = !self.options.skip_external && self.options.max_import_depth > 0;
        let mut documents = Vec::new();
        let mut errors = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut imported = Vec::new();

        for block in &page.style_blocks {
            if follow_imports {
                imported.extend(extract_imports(block, Some(page_url.as_str())));
            }
            documents.push(CssDocument::inline(page_url.as_str(), block.as_str()));
        }

        let mut pending: Vec<String> = page
            .stylesheet_links
            .iter()
            .filter(|url| visited.insert((*url).clone()))
            .cloned()
            .collect();
        let mut depth = 0;

        loop {
            let bodies = self.fetcher.fetch_many(&pending).await;
            for (url, body) in pending.iter().zip(bodies) {
                match body {
                    Ok(text) => {
                        if follow_imports && depth < self.options.max_import_depth {
                            imported.extend(extract_imports(&text, Some(url.as_str())));
                        }
                        documents.push(CssDocument::external(url.as_str(), text));
                    }
                    Err(err) => {
                        tracing::warn!(target: targets::SCRAPER, "failed to fetch CSS {}: {}", url, err);
                        errors.push(format!("Failed to fetch CSS {url}: {err}"));
                    }
                }
            }

            pending = imported
                .drain(..)
                .filter(|url| visited.insert(url.clone()))
                .collect();
            if pending.is_empty() {
                break;
            }
            depth += 1;
            tracing::debug!(
                target: targets::SCRAPER,
                "following {} imports at depth {}",
                pending.len(),
                depth
            );
        }

        (documents, errors)
    }
}

/// Keep only fonts of `kind`; statistics follow the filtered list.
pub fn filter_by_kind(mut result: ScrapeResult, kind: FontKind) -> ScrapeResult {
    result.retain_kind(kind);
    result
}
