use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// arXiv category used as the `search_query` filter, e.g. `cs.AI`.
    pub category: String,
    pub max_results: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    /// OpenAI-compatible base URL, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.rust_log", "info,arxiv_social=debug")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 30)?
            .set_default("feed.category", "cs.AI")?
            .set_default("feed.max_results", 5)?
            .set_default("summarizer.base_url", "https://openrouter.ai/api/v1")?
            .set_default(
                "summarizer.model",
                "mistralai/mistral-small-24b-instruct-2501:free",
            )?
            // E.g. `APP_DATABASE__URL` sets `DatabaseConfig.url`
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("APP")
                    .prefix_separator("_"),
            );

        builder.build()?.try_deserialize()
    }
}
