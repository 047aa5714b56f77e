pub mod models;
pub mod repository;

pub use models::NewPaper;
pub use repository::{PaperStore, Repository};
