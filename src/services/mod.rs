use crate::db::Repository;
use crate::services::papers::PaperService;
use std::sync::Arc;

pub mod ingest;
pub mod papers;

// A container for the read-side services injected into routes
#[derive(Clone)]
pub struct AppState {
    pub papers: Arc<PaperService>,
}

impl AppState {
    pub fn new(repo: Repository) -> Self {
        // Repository is cheap to clone (connection pool handle inside)
        Self {
            papers: Arc::new(PaperService::new(repo)),
        }
    }
}
