//! Natural-language querying against the graph.
//!
//! A question becomes a Cypher query (generated by the language model
//! against the fixed schema description), the query is validated and
//! executed, and the result rows are rendered back into a natural-language
//! answer. Generated text is never executed unvalidated: the trimmed query
//! must begin with a whitelisted read keyword or the request fails before
//! any store call.

mod prompts;

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::{GraphStore, QueryRow};
use crate::llm::{ChatMessage, LanguageModel, strip_code_fence};
use crate::{MemographError, Result};

/// Leading keywords a generated query may start with.
const ALLOWED_LEADING_KEYWORDS: &[&str] = &["MATCH", "CALL"];

/// An answered question: the rendered answer plus the raw material behind it.
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    /// Natural-language answer (or the deterministic fallback).
    pub answer: String,
    /// Result rows the answer was rendered from.
    pub rows: Vec<QueryRow>,
    /// The executed query text.
    pub query: String,
}

/// Orchestrates question → query → execution → answer.
#[derive(Clone)]
pub struct QueryTranslator {
    store: Arc<dyn GraphStore>,
    llm: Arc<dyn LanguageModel>,
}

impl QueryTranslator {
    pub fn new(store: Arc<dyn GraphStore>, llm: Arc<dyn LanguageModel>) -> Self {
        Self { store, llm }
    }

    /// Answer a natural-language question from the graph.
    ///
    /// Query-generation and execution failures abort the request; a failure
    /// while rendering the final answer does not — the caller gets a
    /// deterministic dump of the result rows instead.
    pub async fn answer(&self, question: &str) -> Result<QueryAnswer> {
        let raw = self
            .llm
            .chat(&[
                ChatMessage::system(prompts::query_generation_prompt()),
                ChatMessage::user(question),
            ])
            .await
            .map_err(MemographError::Llm)?;

        let query_text = strip_code_fence(&raw);
        validate_query(&query_text)?;
        debug!(query = %query_text, "Generated graph query");

        let rows = self.store.run_query(&query_text, &QueryRow::new()).await?;

        let answer = match self
            .llm
            .chat(&prompts::render_messages(question, &rows))
            .await
        {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(error = %err, "Answer rendering failed; returning raw results");
                fallback_answer(&rows)
            }
        };

        Ok(QueryAnswer {
            answer,
            rows,
            query: query_text,
        })
    }
}

/// Reject generated text that does not start with an allowed read keyword.
fn validate_query(query_text: &str) -> Result<()> {
    let upper = query_text.trim().to_uppercase();
    if ALLOWED_LEADING_KEYWORDS
        .iter()
        .any(|keyword| upper.starts_with(keyword))
    {
        Ok(())
    } else {
        Err(MemographError::InvalidQuery(query_text.trim().to_string()))
    }
}

/// Deterministic stand-in answer when rendering fails.
fn fallback_answer(rows: &[QueryRow]) -> String {
    format!(
        "검색 결과: {}",
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_queries_are_accepted() {
        assert!(validate_query("MATCH (n) RETURN n").is_ok());
        assert!(validate_query("  match (p:Person) RETURN p.name").is_ok());
    }

    #[test]
    fn call_queries_are_accepted() {
        assert!(validate_query("CALL db.labels()").is_ok());
    }

    #[test]
    fn write_queries_are_rejected() {
        let err = validate_query("CREATE (n:Person {name: 'x'})").unwrap_err();
        assert!(matches!(err, MemographError::InvalidQuery(_)));
        assert!(validate_query("MERGE (n:Person) RETURN n").is_err());
        assert!(validate_query("DETACH DELETE n").is_err());
    }

    #[test]
    fn prose_is_rejected() {
        assert!(validate_query("I cannot answer that question.").is_err());
        assert!(validate_query("").is_err());
    }

    #[test]
    fn fallback_answer_contains_rows() {
        let rows = vec![
            json!({"name": "김성길", "phone": "010-2222-1234"})
                .as_object()
                .unwrap()
                .clone(),
        ];
        let answer = fallback_answer(&rows);
        assert!(answer.starts_with("검색 결과:"));
        assert!(answer.contains("김성길"));
    }

    #[test]
    fn fallback_answer_handles_empty_rows() {
        assert_eq!(fallback_answer(&[]), "검색 결과: []");
    }
}
