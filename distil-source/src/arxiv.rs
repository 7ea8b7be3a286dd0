//! arXiv export API client.
//!
//! Queries `http://export.arxiv.org/api/query` and reduces the Atom payload
//! to plain "Published / Title / Authors / Summary" records, one per entry.
//! The feed is treated as text: entries are extracted with regexes rather
//! than a full XML parse, which is all the four fixed tags need.

use async_trait::async_trait;
use distil_core::{DistilError, Result, TextSource};
use regex::Regex;
use reqwest::Client;
use tracing::debug;

/// Default arXiv export API endpoint.
pub const ARXIV_API_BASE: &str = "http://export.arxiv.org/api/query";

/// Configuration for [`ArxivSource`].
///
/// Result-count and content-length caps are fixed here, at construction
/// time, not per call.
#[derive(Debug, Clone)]
pub struct ArxivConfig {
    /// How many entries to request per topic.
    pub max_results: usize,
    /// Cap on the combined record text returned from one fetch.
    pub max_content_chars: usize,
    /// Optional custom endpoint.
    pub base_url: Option<String>,
}

impl Default for ArxivConfig {
    fn default() -> Self {
        Self { max_results: 1, max_content_chars: 300, base_url: None }
    }
}

impl ArxivConfig {
    pub fn new(max_results: usize, max_content_chars: usize) -> Self {
        Self { max_results, max_content_chars, base_url: None }
    }

    /// Set a custom endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// [`TextSource`] backed by the arXiv export API.
#[derive(Debug)]
pub struct ArxivSource {
    client: Client,
    config: ArxivConfig,
    entry_re: Regex,
    field_res: FieldPatterns,
}

#[derive(Debug)]
struct FieldPatterns {
    published: Regex,
    title: Regex,
    author: Regex,
    summary: Regex,
}

impl ArxivSource {
    /// Create a new source.
    pub fn new(config: ArxivConfig) -> Result<Self> {
        if config.max_results == 0 {
            return Err(DistilError::Config("max_results must be at least 1".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| DistilError::Config(format!("Failed to create HTTP client: {}", e)))?;

        // The export feed uses a fixed tag set; (?s) lets bodies span lines.
        let entry_re = Regex::new(r"(?s)<entry>(.*?)</entry>").expect("static regex");
        let field_res = FieldPatterns {
            published: Regex::new(r"<published>([^<]*)</published>").expect("static regex"),
            title: Regex::new(r"(?s)<title[^>]*>(.*?)</title>").expect("static regex"),
            author: Regex::new(r"(?s)<author>\s*<name>(.*?)</name>").expect("static regex"),
            summary: Regex::new(r"(?s)<summary[^>]*>(.*?)</summary>").expect("static regex"),
        };

        Ok(Self { client, config, entry_re, field_res })
    }

    fn api_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(ARXIV_API_BASE)
    }

    fn render_entry(&self, entry: &str) -> String {
        let field = |re: &Regex| {
            re.captures(entry)
                .and_then(|c| c.get(1))
                .map(|m| normalize_whitespace(&unescape_entities(m.as_str())))
                .unwrap_or_default()
        };

        let authors: Vec<String> = self
            .field_res
            .author
            .captures_iter(entry)
            .filter_map(|c| c.get(1).map(|m| normalize_whitespace(&unescape_entities(m.as_str()))))
            .collect();

        format!(
            "Published: {}\nTitle: {}\nAuthors: {}\nSummary: {}",
            field(&self.field_res.published),
            field(&self.field_res.title),
            authors.join(", "),
            field(&self.field_res.summary),
        )
    }
}

#[async_trait]
impl TextSource for ArxivSource {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn fetch(&self, topic: &str) -> Result<String> {
        let response = self
            .client
            .get(self.api_url())
            .query(&[
                ("search_query", format!("all:{}", topic)),
                ("start", "0".to_string()),
                ("max_results", self.config.max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| DistilError::Retrieval(format!("arXiv request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DistilError::Retrieval(format!(
                "arXiv API error ({}): {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DistilError::Retrieval(format!("Failed to read arXiv response: {}", e)))?;

        let records: Vec<String> = self
            .entry_re
            .captures_iter(&body)
            .take(self.config.max_results)
            .filter_map(|c| c.get(1).map(|m| self.render_entry(m.as_str())))
            .collect();

        if records.is_empty() {
            return Err(DistilError::Retrieval(format!("no arXiv results for '{}'", topic)));
        }

        debug!(topic, entries = records.len(), "fetched arXiv entries");

        let joined = records.join("\n\n");
        Ok(truncate_chars(&joined, self.config.max_content_chars))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
