use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::models;
use crate::errors::AppError;
use crate::services::AppState;
use tracing::instrument;

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// Upper bound on page size; the store should never be asked for an
/// unbounded range.
const MAX_LIMIT: u64 = 100;

pub async fn home() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Arxiv Social!" }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<u64>,
    limit: Option<u64>,
}

impl ListParams {
    fn resolve(self) -> Result<(u64, u64), AppError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if limit < 1 {
            return Err(AppError::Validation("limit must be >= 1".to_string()));
        }
        Ok((page, limit.min(MAX_LIMIT)))
    }
}

#[derive(Serialize)]
pub struct PaperListResponse {
    papers: Vec<models::Model>,
    page: u64,
    limit: u64,
}

#[instrument(skip(state))]
pub async fn list_papers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = params.resolve()?;
    let papers = state.papers.list(page, limit).await?;
    Ok(Json(PaperListResponse {
        papers,
        page,
        limit,
    }))
}

#[instrument(skip(state))]
pub async fn get_paper(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<models::Model>, AppError> {
    Ok(Json(state.papers.get(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let (page, limit) = ListParams::default().resolve().unwrap();
        assert_eq!((page, limit), (DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn explicit_params_pass_through() {
        let params = ListParams {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(params.resolve().unwrap(), (3, 25));
    }

    #[test]
    fn zero_page_or_limit_is_rejected() {
        let params = ListParams {
            page: Some(0),
            limit: None,
        };
        assert!(matches!(params.resolve(), Err(AppError::Validation(_))));

        let params = ListParams {
            page: None,
            limit: Some(0),
        };
        assert!(matches!(params.resolve(), Err(AppError::Validation(_))));
    }

    #[test]
    fn oversized_limit_is_capped() {
        let params = ListParams {
            page: Some(1),
            limit: Some(5000),
        };
        assert_eq!(params.resolve().unwrap(), (1, MAX_LIMIT));
    }
}
