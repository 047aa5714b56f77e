//! Read-side paper service: paginated listing and detail lookup.
//! Pure reads over the repository, safe to call concurrently.

use crate::db::{models, Repository};
use crate::errors::AppError;

/// Row offset for a 1-based page number.
pub fn page_offset(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1) * limit
}

pub struct PaperService {
    repo: Repository,
}

impl PaperService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Pages past the last stored record return an empty list.
    pub async fn list(&self, page: u64, limit: u64) -> Result<Vec<models::Model>, AppError> {
        let papers = self
            .repo
            .list_papers(page_offset(page, limit), limit)
            .await?;
        metrics::counter!("arxiv_social_papers_list_ops_total").increment(1);
        Ok(papers)
    }

    pub async fn get(&self, id: i32) -> Result<models::Model, AppError> {
        let paper = self
            .repo
            .get_paper(id)
            .await?
            .ok_or(AppError::PaperNotFound { id })?;
        metrics::counter!("arxiv_social_papers_detail_ops_total").increment(1);
        Ok(paper)
    }
}
