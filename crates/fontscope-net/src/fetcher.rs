//! The fetch seam consumed by the scraper.

use crate::error::Result;
use std::future::Future;

/// Retrieves page HTML and stylesheets.
///
/// [`HttpClient`](crate::HttpClient) is the network implementation; tests
/// provide in-memory ones.
pub trait Fetcher: Send + Sync {
    /// Fetch a page's HTML.
    fn fetch_html(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    /// Fetch a stylesheet. Responses that do not look like CSS are errors.
    fn fetch_css(&self, url: &str) -> impl Future<Output = Result<String>> + Send;

    /// Fetch several stylesheets in order, one result per URL.
    fn fetch_many(&self, urls: &[String]) -> impl Future<Output = Vec<Result<String>>> + Send {
        async move {
            let mut bodies = Vec::with_capacity(urls.len());
            for url in urls {
                bodies.push(self.fetch_css(url).await);
            }
            bodies
        }
    }
}
