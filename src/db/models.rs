//! `papers` table entity.
//!
//! Records are append-only: nothing in this crate updates or deletes a
//! row once the ingestion run has inserted it.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "papers")]
pub struct Model {
    /// Store-assigned surrogate key, used for detail lookups.
    #[sea_orm(primary_key)]
    pub id: i32,
    /// arXiv-assigned identifier parsed from the abs link. Dedup key,
    /// enforced by the pre-insert exists check rather than a column
    /// constraint, so overlapping runs can race (see `IngestService::run`).
    pub external_id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    /// Comma-joined author names.
    #[sea_orm(column_type = "Text")]
    pub authors: String,
    // 'abstract' is a reserved keyword in Rust
    #[sea_orm(column_name = "abstract", column_type = "Text")]
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Machine-generated summary; absent when summarization failed.
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub category: Option<String>,
    pub url: String,
    pub published_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A record assembled by the ingestion run, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaper {
    pub external_id: String,
    pub title: String,
    pub authors: String,
    pub abstract_text: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub url: String,
    pub published_at: DateTimeUtc,
}

impl From<NewPaper> for ActiveModel {
    fn from(paper: NewPaper) -> Self {
        ActiveModel {
            id: NotSet,
            external_id: Set(paper.external_id),
            title: Set(paper.title),
            authors: Set(paper.authors),
            abstract_text: Set(paper.abstract_text),
            summary: Set(paper.summary),
            category: Set(paper.category),
            url: Set(paper.url),
            published_at: Set(paper.published_at),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
