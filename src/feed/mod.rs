//! arXiv feed client
//!
//! Issues one bounded query against the arXiv export API and parses the
//! Atom response into normalized [`RawEntry`] values. The raw publish
//! timestamp is kept as a string here; the orchestrator parses it so a
//! malformed date skips one entry instead of failing the whole batch.

use async_trait::async_trait;
use quick_xml::de::from_str;
use regex_lite::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::config::FeedConfig;
use crate::errors::FeedError;

const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// A normalized feed entry, order as returned by the source (newest first).
#[derive(Debug, Clone)]
pub struct RawEntry {
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: String,
    /// Canonical abs link, e.g. `http://arxiv.org/abs/2501.00001v1`.
    pub link: String,
    /// Publish timestamp exactly as sent, `YYYY-MM-DDTHH:MM:SSZ`.
    pub published_raw: String,
    pub category: Option<String>,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, max_results: u32) -> Result<Vec<RawEntry>, FeedError>;
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: String,
    #[serde(rename = "author", default)]
    authors: Vec<Author>,
    summary: String,
    published: String,
    #[serde(rename = "id")]
    arxiv_url: String,
    #[serde(rename = "category", default)]
    categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
struct Author {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "@term")]
    term: String,
}

impl Entry {
    fn into_raw(self) -> RawEntry {
        RawEntry {
            title: normalize_ws(&self.title),
            authors: self.authors.into_iter().map(|a| a.name).collect(),
            abstract_text: normalize_ws(&self.summary),
            link: self.arxiv_url,
            published_raw: self.published,
            category: self.categories.into_iter().next().map(|c| c.term),
        }
    }
}

/// arXiv wraps titles and abstracts with hard newlines and indentation.
fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts the arXiv-assigned numeric identifier from an abs link.
///
/// Pure and total: any string that does not contain the expected
/// `/abs/NNNN.NNNNN` shape yields `None`. Version suffixes (`v2`) are
/// not part of the identifier.
pub fn extract_arxiv_id(link: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(r"/abs/(\d{4}\.\d{4,5})").expect("valid arXiv id pattern"));
    re.captures(link).map(|caps| caps[1].to_string())
}

pub struct ArxivClient {
    http: reqwest::Client,
    category: String,
}

impl ArxivClient {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            category: config.category.clone(),
        }
    }
}

#[async_trait]
impl FeedSource for ArxivClient {
    async fn fetch(&self, max_results: u32) -> Result<Vec<RawEntry>, FeedError> {
        let response = self
            .http
            .get(ARXIV_API_URL)
            .query(&[
                ("search_query", format!("cat:{}", self.category).as_str()),
                ("max_results", max_results.to_string().as_str()),
                ("sortBy", "submittedDate"),
                ("sortOrder", "descending"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "arXiv feed response received");

        let feed: Feed =
            from_str(&body).map_err(|e| FeedError::Parse(format!("invalid Atom feed: {e}")))?;

        Ok(feed.entries.into_iter().map(Entry::into_raw).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=cat:cs.AI</title>
  <entry>
    <id>http://arxiv.org/abs/2501.00001v1</id>
    <updated>2025-01-02T18:59:59Z</updated>
    <published>2025-01-01T12:00:00Z</published>
    <title>Learning to Learn:
  A Survey</title>
    <summary>  We survey methods
  for meta-learning.</summary>
    <author><name>Alice Example</name></author>
    <author><name>Bob Example</name></author>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.AI" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2501.00002v2</id>
    <published>2025-01-01T09:30:00Z</published>
    <title>Another Paper</title>
    <summary>Abstract text.</summary>
    <author><name>Carol Example</name></author>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

    #[test]
    fn parses_atom_feed_into_raw_entries() {
        let feed: Feed = from_str(SAMPLE_FEED).unwrap();
        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Entry::into_raw).collect();

        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.title, "Learning to Learn: A Survey");
        assert_eq!(first.authors, vec!["Alice Example", "Bob Example"]);
        assert_eq!(first.abstract_text, "We survey methods for meta-learning.");
        assert_eq!(first.link, "http://arxiv.org/abs/2501.00001v1");
        assert_eq!(first.published_raw, "2025-01-01T12:00:00Z");
        assert_eq!(first.category.as_deref(), Some("cs.AI"));

        let second = &entries[1];
        assert_eq!(second.authors, vec!["Carol Example"]);
        assert_eq!(second.category.as_deref(), Some("cs.CL"));
    }

    #[test]
    fn parses_feed_with_no_entries() {
        let empty = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#;
        let feed: Feed = from_str(empty).unwrap();
        assert!(feed.entries.is_empty());
    }

    #[test]
    fn extracts_id_from_abs_links() {
        assert_eq!(
            extract_arxiv_id("http://arxiv.org/abs/2501.00001v1").as_deref(),
            Some("2501.00001")
        );
        assert_eq!(
            extract_arxiv_id("https://arxiv.org/abs/2301.07041").as_deref(),
            Some("2301.07041")
        );
        // Old 4-digit sequence numbers still match.
        assert_eq!(
            extract_arxiv_id("http://arxiv.org/abs/1901.1234").as_deref(),
            Some("1901.1234")
        );
    }

    #[test]
    fn rejects_links_without_an_id() {
        assert_eq!(extract_arxiv_id(""), None);
        assert_eq!(extract_arxiv_id("http://arxiv.org/list/cs.AI/recent"), None);
        assert_eq!(extract_arxiv_id("http://arxiv.org/abs/"), None);
        assert_eq!(extract_arxiv_id("not a url at all"), None);
        assert_eq!(extract_arxiv_id("/abs/123.456"), None);
    }
}
