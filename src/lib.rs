//! Arxiv Social backend.
//!
//! Two concerns share this crate: a periodic ingestion run that pulls
//! new paper metadata from the arXiv feed, enriches it with short LLM
//! summaries and appends it to the store (`fetch_papers` binary), and a
//! read-only HTTP API serving paginated listings and detail views
//! (`arxiv-social` binary).

pub mod config;
pub mod db;
pub mod errors;
pub mod feed;
pub mod metrics;
pub mod routes;
pub mod services;
pub mod summarizer;
