use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::models::{self, NewPaper};
use crate::config::DatabaseConfig;
use crate::errors::AppError;

/// The store seam used by the ingestion run: the pre-enrichment existence
/// check and the single end-of-run bulk insert. Split out as a trait so
/// the orchestrator can be exercised against an in-memory store.
#[async_trait]
pub trait PaperStore: Send + Sync {
    async fn paper_exists(&self, external_id: &str) -> Result<bool, AppError>;

    /// Inserts the whole batch in one statement. Returns the number of
    /// records inserted. The batch is as atomic as the store makes it;
    /// there is no application-side staging or split-retry.
    async fn insert_papers(&self, papers: Vec<NewPaper>) -> Result<usize, AppError>;
}

#[derive(Clone)]
pub struct Repository {
    db: DatabaseConnection,
}

impl Repository {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut opt = sea_orm::ConnectOptions::new(&config.url);
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout))
            .sqlx_logging(false);

        let db = sea_orm::Database::connect(opt).await?;
        Ok(Self { db })
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.db.ping().await
    }

    /// Range read ordered by external identifier descending (newest
    /// arXiv ids sort last lexicographically within the same scheme, so
    /// descending order lists the most recent papers first).
    pub async fn list_papers(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<models::Model>, AppError> {
        let papers = models::Entity::find()
            .order_by_desc(models::Column::ExternalId)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(papers)
    }

    pub async fn get_paper(&self, id: i32) -> Result<Option<models::Model>, AppError> {
        Ok(models::Entity::find_by_id(id).one(&self.db).await?)
    }
}

#[async_trait]
impl PaperStore for Repository {
    async fn paper_exists(&self, external_id: &str) -> Result<bool, AppError> {
        let count = models::Entity::find()
            .filter(models::Column::ExternalId.eq(external_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert_papers(&self, papers: Vec<NewPaper>) -> Result<usize, AppError> {
        let count = papers.len();
        models::Entity::insert_many(papers.into_iter().map(models::ActiveModel::from))
            .exec(&self.db)
            .await?;
        Ok(count)
    }
}
