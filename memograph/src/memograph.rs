//! High-level facade over the extraction, ingestion and query components.

use std::sync::Arc;

use chrono::Local;

use crate::Result;
use crate::extraction::{ContactCard, Extraction, MemoExtractor};
use crate::graph::{GraphStore, MemoRecord};
use crate::ingest::{IngestReport, IngestionPipeline};
use crate::llm::LanguageModel;
use crate::query::{QueryAnswer, QueryTranslator};

/// Default number of memos returned by [`Memograph::recent_memos`].
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// The assembled system: one shared store, one language-model client, and
/// the components wired over them.
///
/// Construct once at startup (via [`crate::init`]) and share; the store
/// handle is a pooled connection and every method is safe to call from
/// concurrent tasks.
#[derive(Clone)]
pub struct Memograph {
    store: Arc<dyn GraphStore>,
    extractor: MemoExtractor,
    pipeline: IngestionPipeline,
    translator: QueryTranslator,
}

impl Memograph {
    pub fn new(store: Arc<dyn GraphStore>, llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            extractor: MemoExtractor::new(Arc::clone(&llm)),
            pipeline: IngestionPipeline::new(Arc::clone(&store)),
            translator: QueryTranslator::new(Arc::clone(&store), llm),
            store,
        }
    }

    /// Extract a memo's entities and relationships, then ingest them.
    ///
    /// Extraction failures abort before anything is written; see
    /// [`IngestionPipeline::ingest`] for what the report carries.
    pub async fn process_memo(&self, text: &str) -> Result<IngestReport> {
        let extraction = self.extractor.extract(text, &Local::now()).await?;
        Ok(self.pipeline.ingest(text, extraction).await?)
    }

    /// Ingest an extraction batch produced elsewhere.
    pub async fn ingest_extraction(
        &self,
        text: &str,
        extraction: Extraction,
    ) -> Result<IngestReport> {
        Ok(self.pipeline.ingest(text, extraction).await?)
    }

    /// Answer a natural-language question from the graph.
    pub async fn ask(&self, question: &str) -> Result<QueryAnswer> {
        self.translator.answer(question).await
    }

    /// The most recent memos, newest first.
    pub async fn recent_memos(&self, limit: Option<usize>) -> Result<Vec<MemoRecord>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(self.store.recent_memos(limit).await?)
    }

    /// Structure raw business-card text into contact fields.
    pub async fn extract_contact(&self, card_text: &str) -> Result<ContactCard> {
        Ok(self.extractor.extract_contact(card_text).await?)
    }

    /// Persist a structured contact into the graph.
    pub async fn save_contact(&self, card: &ContactCard) -> Result<()> {
        self.pipeline.save_contact(card).await
    }

    /// The shared store handle.
    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    /// Release the store's resources.
    pub async fn close(&self) -> Result<()> {
        Ok(self.store.close().await?)
    }
}
