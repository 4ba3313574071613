//! Site analysis against an in-memory fetcher.

use std::collections::HashMap;
use std::sync::Mutex;

use fontscope::{FontKind, FontScraper, ScrapeResult, ScraperConfig, filter_by_kind};
use fontscope_net::{Fetcher, NetworkError, Result as NetResult};

const GOOGLE_CSS_URL: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap";

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter:wght@400;700&display=swap">
  <link rel="stylesheet" href="/css/site.css">
  <link rel="stylesheet" href="/css/missing.css">
  <script src="https://use.typekit.net/xyz9876.js"></script>
  <style>h1 { font-family: "Playfair Display", Georgia, serif; }</style>
</head>
<body>
  <div style="font-family: Courier New, monospace">code</div>
</body>
</html>"#;

const GOOGLE_CSS: &str = "@font-face {
  font-family: 'Inter';
  font-style: normal;
  font-weight: 400;
  src: url(https://fonts.gstatic.com/s/inter/v13/inter-400.woff2) format('woff2');
}";

const SITE_CSS: &str = r#"@import url("print.css");
@font-face {
  font-family: "Brand Sans";
  src: url("../fonts/brand.woff2") format("woff2"), url("../fonts/brand.woff") format("woff");
  font-weight: 700;
}
body { font-family: "Brand Sans", Arial, sans-serif; }
"#;

const PRINT_CSS: &str = "@media print { body { font-family: Times New Roman, serif; } }";

/// Serves fixed pages and records every request.
#[derive(Default)]
struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    fn site() -> Self {
        Self::default()
            .with("https://shop.example/", PAGE)
            .with(GOOGLE_CSS_URL, GOOGLE_CSS)
            .with("https://shop.example/css/site.css", SITE_CSS)
            .with("https://shop.example/css/print.css", PRINT_CSS)
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn serve(&self, url: &str) -> NetResult<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url).cloned().ok_or(NetworkError::HttpStatus {
            status: 404,
            message: Some("Not Found".to_string()),
        })
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch_html(&self, url: &str) -> NetResult<String> {
        self.serve(url)
    }

    async fn fetch_css(&self, url: &str) -> NetResult<String> {
        self.serve(url)
    }
}

fn names(result: &ScrapeResult) -> Vec<&str> {
    result.fonts.iter().map(|f| f.name.as_str()).collect()
}

#[tokio::test]
async fn test_full_site_scan() {
    let scraper = FontScraper::new(MemoryFetcher::site(), &ScraperConfig::default());
    let result = scraper.analyze_website("shop.example").await;

    assert_eq!(result.url, "https://shop.example/");
    let found = names(&result);
    for expected in [
        "Courier New",
        "Playfair Display",
        "Georgia",
        "Inter",
        "Brand Sans",
        "Arial",
        "Times New Roman",
        "Adobe Fonts Kit (xyz9876)",
    ] {
        assert!(found.contains(&expected), "missing {expected} in {found:?}");
    }
    for generic in ["serif", "sans-serif", "monospace"] {
        assert!(!found.contains(&generic));
    }

    let brand_face = result
        .fonts
        .iter()
        .find(|f| f.name == "Brand Sans" && f.kind == FontKind::Web)
        .unwrap();
    assert_eq!(brand_face.source.as_deref(), Some("https://shop.example/fonts/brand.woff2"));
    assert_eq!(brand_face.format.as_deref(), Some("woff2"));
    assert_eq!(brand_face.weights, vec!["700".to_string()]);

    let inline = result.fonts.iter().find(|f| f.name == "Courier New").unwrap();
    assert_eq!(inline.kind, FontKind::System);
    assert_eq!(inline.selectors, vec!["[inline style]".to_string()]);

    let from_service = result
        .fonts
        .iter()
        .find(|f| f.name == "Inter" && f.source.as_deref() == Some(GOOGLE_CSS_URL))
        .unwrap();
    assert_eq!(from_service.weights, vec!["400".to_string(), "700".to_string()]);

    assert_eq!(
        result.css_files,
        vec![
            "inline".to_string(),
            GOOGLE_CSS_URL.to_string(),
            "https://shop.example/css/site.css".to_string(),
            "https://shop.example/css/print.css".to_string(),
        ]
    );
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("https://shop.example/css/missing.css"));

    let stats = result.statistics();
    assert_eq!(stats.google_fonts, 2);
    assert_eq!(stats.adobe_fonts, 1);
    assert_eq!(stats.css_files_count, 4);
    assert_eq!(stats.total_fonts, result.fonts.len());
}

#[tokio::test]
async fn test_skip_external_does_not_follow_imports() {
    let config = ScraperConfig {
        skip_external: true,
        ..ScraperConfig::default()
    };
    let scraper = FontScraper::new(MemoryFetcher::site(), &config);
    let result = scraper.analyze_website("https://shop.example/").await;

    assert!(!names(&result).contains(&"Times New Roman"));
    assert!(!scraper.fetcher().requests().contains(&"https://shop.example/css/print.css".to_string()));
    assert_eq!(result.css_files.len(), 3);
}

#[tokio::test]
async fn test_exclude_system_fonts() {
    let config = ScraperConfig {
        include_system: false,
        ..ScraperConfig::default()
    };
    let scraper = FontScraper::new(MemoryFetcher::site(), &config);
    let result = scraper.analyze_website("https://shop.example/").await;

    assert!(!result.fonts.is_empty());
    assert!(result.fonts.iter().all(|f| f.kind != FontKind::System));
    assert_eq!(result.statistics().system_fonts, 0);
}

#[tokio::test]
async fn test_import_depth_limit() {
    let fetcher = MemoryFetcher::default()
        .with("https://deep.example/", r#"<link rel="stylesheet" href="/0.css">"#)
        .with("https://deep.example/0.css", "@import '1.css'; a { font-family: Zero; }")
        .with("https://deep.example/1.css", "@import '2.css'; a { font-family: One; }")
        .with("https://deep.example/2.css", "@import '3.css'; a { font-family: Two; }")
        .with("https://deep.example/3.css", "a { font-family: Three; }");
    let config = ScraperConfig {
        max_import_depth: 2,
        ..ScraperConfig::default()
    };
    let scraper = FontScraper::new(fetcher, &config);
    let result = scraper.analyze_website("https://deep.example/").await;

    assert_eq!(names(&result), vec!["Zero", "One", "Two"]);
    assert!(!scraper.fetcher().requests().contains(&"https://deep.example/3.css".to_string()));
}

#[tokio::test]
async fn test_each_stylesheet_fetched_once() {
    let fetcher = MemoryFetcher::default()
        .with(
            "https://dup.example/",
            r#"<link rel="stylesheet" href="/a.css"><link rel="stylesheet" href="/b.css">"#,
        )
        .with("https://dup.example/a.css", "@import 'shared.css';")
        .with("https://dup.example/b.css", "@import 'shared.css';")
        .with("https://dup.example/shared.css", "p { font-family: Shared; }");
    let scraper = FontScraper::new(fetcher, &ScraperConfig::default());
    let result = scraper.analyze_website("https://dup.example/").await;

    assert_eq!(names(&result), vec!["Shared"]);
    let shared_requests = scraper
        .fetcher()
        .requests()
        .iter()
        .filter(|url| url.ends_with("/shared.css"))
        .count();
    assert_eq!(shared_requests, 1);
}

#[tokio::test]
async fn test_unreachable_site() {
    let scraper = FontScraper::new(MemoryFetcher::default(), &ScraperConfig::default());
    let result = scraper.analyze_website("https://down.example").await;

    assert!(result.fonts.is_empty());
    assert!(result.css_files.is_empty());
    assert_eq!(result.errors.len(), 1);
}

#[tokio::test]
async fn test_batch_keeps_input_order() {
    let fetcher = MemoryFetcher::default()
        .with("https://one.example/", "<style>p { font-family: Uno; }</style>")
        .with("https://two.example/", "<style>p { font-family: Dos; }</style>")
        .with("https://three.example/", "<style>p { font-family: Tres; }</style>");
    let config = ScraperConfig {
        concurrency: 2,
        ..ScraperConfig::default()
    };
    let scraper = FontScraper::new(fetcher, &config);
    let urls: Vec<String> = ["one.example", "two.example", "missing.example", "three.example"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let results = scraper.analyze_many(&urls).await;
    let firsts: Vec<Option<&str>> = results
        .iter()
        .map(|r| r.fonts.first().map(|f| f.name.as_str()))
        .collect();
    assert_eq!(firsts, vec![Some("Uno"), Some("Dos"), None, Some("Tres")]);
    assert_eq!(results[2].errors.len(), 1);
}

#[tokio::test]
async fn test_filter_by_kind_after_scan() {
    let scraper = FontScraper::new(MemoryFetcher::site(), &ScraperConfig::default());
    let result = scraper.analyze_website("https://shop.example/").await;

    let web = filter_by_kind(result, FontKind::Web);
    assert!(web.fonts.iter().all(|f| f.kind == FontKind::Web));
    let stats = web.statistics();
    assert_eq!(stats.total_fonts, stats.web_fonts);
    assert_eq!(stats.system_fonts + stats.custom_fonts, 0);
}
