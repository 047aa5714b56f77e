//! Ingestion run orchestration
//!
//! One run is: fetch a bounded batch from the feed, then per entry
//! extract the identifier, skip anything already stored, summarize,
//! assemble the record, and finish with a single bulk insert. Only a
//! feed failure or a rejected bulk insert aborts the run; everything
//! else degrades to a per-entry skip or a missing summary.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

use crate::db::{NewPaper, PaperStore};
use crate::errors::IngestError;
use crate::feed::{extract_arxiv_id, FeedSource};
use crate::summarizer::Summarize;

/// Fixed publish-timestamp format used by the feed.
const PUBLISHED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Outcome counters for one ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub fetched: usize,
    pub skipped_unidentified: usize,
    pub skipped_existing: usize,
    pub skipped_invalid_date: usize,
    pub inserted: usize,
}

impl IngestReport {
    /// Emits the run's counters. The hosting binary must have installed
    /// a recorder (see `metrics::install_recorder`) for these to count.
    fn record_metrics(&self, elapsed: std::time::Duration) {
        metrics::counter!("arxiv_social_ingest_runs_total").increment(1);
        metrics::counter!("arxiv_social_ingest_fetched_total").increment(self.fetched as u64);
        metrics::counter!("arxiv_social_ingest_inserted_total").increment(self.inserted as u64);
        metrics::histogram!("arxiv_social_ingest_duration_seconds").record(elapsed.as_secs_f64());
    }
}

pub struct IngestService {
    feed: Arc<dyn FeedSource>,
    store: Arc<dyn PaperStore>,
    summarizer: Arc<dyn Summarize>,
    max_results: u32,
}

impl IngestService {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        store: Arc<dyn PaperStore>,
        summarizer: Arc<dyn Summarize>,
        max_results: u32,
    ) -> Self {
        Self {
            feed,
            store,
            summarizer,
            max_results,
        }
    }

    /// Executes one ingestion run.
    ///
    /// There is no run-level lock: two overlapping runs can both pass
    /// the existence check for the same identifier and insert it twice.
    /// Re-running sequentially is safe, since every stored identifier
    /// is skipped before any enrichment work is spent on it.
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        let start = Instant::now();
        let mut report = IngestReport::default();

        let entries = self.feed.fetch(self.max_results).await?;
        report.fetched = entries.len();
        tracing::info!(fetched = report.fetched, "Feed batch received");

        let mut pending: Vec<NewPaper> = Vec::new();

        for entry in entries {
            let Some(external_id) = extract_arxiv_id(&entry.link) else {
                tracing::warn!(link = %entry.link, "No extractable identifier, dropping entry");
                report.skipped_unidentified += 1;
                continue;
            };

            // Dedup before the summarizer call so known papers cost nothing.
            if self
                .store
                .paper_exists(&external_id)
                .await
                .map_err(IngestError::Store)?
            {
                tracing::debug!(external_id = %external_id, "Already stored, skipping");
                report.skipped_existing += 1;
                continue;
            }

            let summary = self.summarizer.summarize(&entry.abstract_text).await;
            if summary.is_none() {
                tracing::warn!(external_id = %external_id, "Storing without summary");
            }

            let published_at = match parse_published(&entry.published_raw) {
                Some(ts) => ts,
                None => {
                    tracing::warn!(
                        external_id = %external_id,
                        published = %entry.published_raw,
                        "Unparseable publish date, dropping entry"
                    );
                    report.skipped_invalid_date += 1;
                    continue;
                }
            };

            pending.push(NewPaper {
                external_id,
                title: entry.title,
                authors: entry.authors.join(", "),
                abstract_text: entry.abstract_text,
                summary,
                category: entry.category,
                url: entry.link,
                published_at,
            });
        }

        if pending.is_empty() {
            tracing::info!("No new papers");
        } else {
            report.inserted = self
                .store
                .insert_papers(pending)
                .await
                .map_err(IngestError::Store)?;
        }

        report.record_metrics(start.elapsed());

        tracing::info!(
            fetched = report.fetched,
            inserted = report.inserted,
            skipped_existing = report.skipped_existing,
            skipped_unidentified = report.skipped_unidentified,
            skipped_invalid_date = report.skipped_invalid_date,
            "Ingestion run complete"
        );

        Ok(report)
    }
}

fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, PUBLISHED_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}
