//! Structured extraction from free-form text.
//!
//! The heavy lifting — recognizing entities, relationships and business
//! relevance — is delegated to the language-model collaborator; this module
//! owns the prompts, the response parsing rules and the record types. A
//! response that is not parseable JSON is a hard failure for the whole
//! request: nothing is ever ingested from output we cannot read.

mod prompts;
mod types;

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::llm::{ChatMessage, LanguageModel, LlmError, strip_code_fence};

pub use types::{ContactCard, ExtractedEntity, ExtractedRelationship, Extraction};

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The language-model call itself failed.
    #[error("language model error: {0}")]
    Llm(#[from] LlmError),

    /// The model's output was not parseable as the expected JSON shape.
    #[error("malformed extraction output: {0}")]
    Malformed(String),
}

/// Result type for extraction operations.
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Turns raw text into structured extraction records via the language model.
#[derive(Clone)]
pub struct MemoExtractor {
    llm: Arc<dyn LanguageModel>,
}

impl MemoExtractor {
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self { llm }
    }

    /// Extract entities and relationships from a memo.
    ///
    /// `now` is handed to the model so relative date expressions resolve to
    /// absolute ISO values at extraction time.
    pub async fn extract(
        &self,
        text: &str,
        now: &DateTime<Local>,
    ) -> ExtractionResult<Extraction> {
        let messages = [
            ChatMessage::system(prompts::extraction_prompt(now)),
            ChatMessage::user(text),
        ];
        let raw = self.llm.chat(&messages).await?;
        let body = strip_code_fence(&raw);

        let extraction: Extraction = serde_json::from_str(&body)
            .map_err(|e| ExtractionError::Malformed(format!("{e}: {body}")))?;
        debug!(
            entities = extraction.entities.len(),
            relationships = extraction.relationships.len(),
            business_related = extraction.business_related,
            "Extracted memo"
        );
        Ok(extraction)
    }

    /// Structure raw business-card text into contact fields.
    pub async fn extract_contact(&self, card_text: &str) -> ExtractionResult<ContactCard> {
        let messages = [
            ChatMessage::system(prompts::CONTACT_PROMPT),
            ChatMessage::user(card_text),
        ];
        let raw = self.llm.chat(&messages).await?;
        let body = strip_code_fence(&raw);

        serde_json::from_str(&body)
            .map_err(|e| ExtractionError::Malformed(format!("{e}: {body}")))
    }
}
