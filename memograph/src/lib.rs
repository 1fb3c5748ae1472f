//! # Memograph
//!
//! A property-graph memory for business memos. Free-form notes are turned
//! into structured facts (people, companies, events, projects and the
//! relations among them) by a language-model collaborator, deduplicated
//! against what the graph already knows, and persisted idempotently; natural
//! language questions are translated into graph queries and answered from
//! the stored facts.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use memograph::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Connect with configuration from files / environment
//!     let memograph = memograph::init_with_defaults().await?;
//!
//!     // Ingest a memo: extraction, person-name resolution, graph upserts
//!     let report = memograph
//!         .process_memo("오늘 ABC상사 김성길 과장님을 만났다. 010-2222-1234")
//!         .await?;
//!     println!("persisted: {}", report.persisted);
//!
//!     // Ask a question against the graph
//!     let answer = memograph.ask("김성길 전화번호?").await?;
//!     println!("{}", answer.answer);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **graph**: the shared property-graph store (pooled Bolt connection,
//!   idempotent merge-or-create mutations, closed label/relationship-type
//!   sets for injection safety)
//! - **resolve**: person-name normalization and matching against stored nodes
//! - **extraction**: language-model extraction of entities/relationships
//! - **ingest**: ordered persistence of one extraction batch
//! - **query**: question → validated graph query → rendered answer

pub mod config;
pub mod extraction;
pub mod graph;
pub mod ingest;
pub mod llm;
pub mod logging;
mod memograph;
pub mod query;
pub mod resolve;

pub use crate::memograph::{DEFAULT_RECENT_LIMIT, Memograph};

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::memograph::Memograph;

    pub use crate::{init, init_with_defaults};

    pub use crate::config::{ConfigLoader, GraphConfig, LlmConfig, LogFormat, LogLevel, MemographConfig};

    pub use crate::extraction::{
        ContactCard, ExtractedEntity, ExtractedRelationship, Extraction, MemoExtractor,
    };

    pub use crate::graph::{
        EntityLabel, GraphStore, MemoRecord, Neo4jGraphStore, PersonCandidate, QueryRow,
        RelationType,
    };

    pub use crate::ingest::{IngestReport, IngestionPipeline};

    pub use crate::query::{QueryAnswer, QueryTranslator};

    pub use crate::resolve::{PersonMatcher, normalize_person_name};

    pub use crate::{MemographError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for memograph operations.
#[derive(Debug, thiserror::Error)]
pub enum MemographError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// Logging setup failed
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// Graph store operation failed
    #[error("Graph error: {0}")]
    Graph(#[from] graph::GraphError),

    /// Extraction collaborator produced unusable output or failed outright
    #[error("Extraction error: {0}")]
    Extraction(#[from] extraction::ExtractionError),

    /// Language-model call failed
    #[error("Language model error: {0}")]
    Llm(#[from] llm::LlmError),

    /// Generated query text failed validation; nothing was executed
    #[error("Invalid generated query: {0}")]
    InvalidQuery(String),

    /// Caller-supplied input was unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for memograph operations
pub type Result<T> = std::result::Result<T, MemographError>;

/// Initialize with the provided configuration.
///
/// Sets up logging, opens the shared store connection (creating schema
/// constraints), builds the language-model client and returns the assembled
/// [`Memograph`] facade.
pub async fn init(config: config::MemographConfig) -> Result<Memograph> {
    // A subscriber installed by the host application wins.
    let _ = logging::init(&config.logging);

    let store = graph::Neo4jGraphStore::connect(&config.graph).await?;
    let llm = llm::ChatClient::new(&config.llm)?;

    Ok(Memograph::new(
        std::sync::Arc::new(store),
        std::sync::Arc::new(llm),
    ))
}

/// Initialize with configuration from default files and the environment.
pub async fn init_with_defaults() -> Result<Memograph> {
    let mut loader = config::ConfigLoader::new();
    loader.load_default_files().load_env();
    let config = loader.extract()?;
    init(config).await
}
