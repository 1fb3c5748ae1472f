//! Memo ingestion: one extraction batch into the graph.
//!
//! Ordering matters. Person names are resolved and rewritten before any node
//! is touched, so a single batch can never create two `Person` nodes for the
//! same mention. Entity and memo persistence failures abort the batch;
//! individual relationship failures never do — they are counted into the
//! report and the remaining relationships still get their chance.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::MemographError;
use crate::extraction::{ContactCard, ExtractedEntity, ExtractedRelationship, Extraction};
use crate::graph::{EntityLabel, GraphResult, GraphStore, MemoRecord, QueryRow, RelationType};
use crate::resolve::PersonMatcher;

/// Outcome of one ingestion batch, for observability — not control flow.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    /// Id of the created memo node; `None` when nothing was persisted.
    pub memo_id: Option<String>,
    /// Whether the batch touched the graph at all.
    pub persisted: bool,
    /// Entity records after person-name resolution.
    pub entities: Vec<ExtractedEntity>,
    /// Relationship records after person-name resolution.
    pub relationships: Vec<ExtractedRelationship>,
    /// Relationships that could not be created.
    pub relationship_failures: usize,
}

/// Persists extraction batches into the graph.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    store: Arc<dyn GraphStore>,
    matcher: PersonMatcher,
}

impl IngestionPipeline {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        let matcher = PersonMatcher::new(Arc::clone(&store));
        Self { store, matcher }
    }

    /// Ingest one extracted memo.
    ///
    /// Non-business content is never persisted: the report echoes the
    /// extraction and the graph stays untouched. Otherwise a memo node is
    /// created, person names are resolved against stored nodes, every entity
    /// is upserted and linked to the memo, and relationships are created
    /// best-effort.
    pub async fn ingest(
        &self,
        memo_text: &str,
        extraction: Extraction,
    ) -> GraphResult<IngestReport> {
        if !extraction.business_related {
            debug!("Memo is not business related; skipping persistence");
            return Ok(IngestReport {
                memo_id: None,
                persisted: false,
                entities: extraction.entities,
                relationships: extraction.relationships,
                relationship_failures: 0,
            });
        }

        let now = Local::now();
        let memo_id = memo_id_for(&now);
        let memo = MemoRecord {
            id: memo_id.clone(),
            text: memo_text.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
            business_related: true,
        };
        self.store.create_memo(&memo).await?;

        let Extraction {
            mut entities,
            mut relationships,
            ..
        } = extraction;

        // Resolve each distinct person surface string once and rewrite the
        // entity records in place.
        let mut mapping: HashMap<String, String> = HashMap::new();
        for entity in &mut entities {
            if !entity.is_person() {
                continue;
            }
            let Some(name) = entity.name.clone() else {
                continue;
            };
            let resolved = match mapping.get(&name) {
                Some(resolved) => resolved.clone(),
                None => {
                    let resolved = self.matcher.resolve(&name).await?;
                    mapping.insert(name.clone(), resolved.clone());
                    resolved
                }
            };
            if resolved != name {
                info!(original = %name, resolved = %resolved, "Person name normalized");
            }
            entity.name = Some(resolved);
        }

        // The mapping is keyed by surface string, so it applies to every
        // endpoint that used one — whatever the endpoint's type.
        for relationship in &mut relationships {
            if let Some(from) = &relationship.from {
                if let Some(mapped) = mapping.get(from) {
                    relationship.from = Some(mapped.clone());
                }
            }
            if let Some(to) = &relationship.to {
                if let Some(mapped) = mapping.get(to) {
                    relationship.to = Some(mapped.clone());
                }
            }
        }

        for entity in &entities {
            let Some(name) = entity.name.as_deref() else {
                warn!(entity_type = ?entity.entity_type, "Skipping entity without a name");
                continue;
            };
            let Some(label) = entity.label() else {
                warn!(
                    entity_type = ?entity.entity_type,
                    name, "Skipping entity with unknown type"
                );
                continue;
            };
            let properties = entity.storable_properties();
            self.store.upsert_entity(label, name, &properties).await?;
            self.store.link_memo(label, name, &memo_id).await?;
        }

        let mut relationship_failures = 0usize;
        for relationship in &relationships {
            let (Some(from), Some(to)) = (relationship.from.as_deref(), relationship.to.as_deref())
            else {
                continue;
            };
            let Some(rel_type) = relationship.relation() else {
                if let Some(unknown) = relationship.rel_type.as_deref() {
                    warn!(from, to, rel_type = unknown, "Unknown relationship type");
                    relationship_failures += 1;
                }
                continue;
            };

            match self
                .store
                .create_relationship_by_name(from, to, rel_type)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    warn!(from, to, rel = %rel_type, "Failed to create relationship");
                    relationship_failures += 1;
                }
                Err(err) => {
                    warn!(from, to, rel = %rel_type, error = %err, "Error creating relationship");
                    relationship_failures += 1;
                }
            }
        }

        info!(
            memo_id = %memo_id,
            entities = entities.len(),
            relationships = relationships.len(),
            relationship_failures,
            "Memo ingested"
        );

        Ok(IngestReport {
            memo_id: Some(memo_id),
            persisted: true,
            entities,
            relationships,
            relationship_failures,
        })
    }

    /// Persist a structured contact: the person node, and when a company is
    /// known, the company node plus a `WORKS_AT` edge.
    pub async fn save_contact(&self, card: &ContactCard) -> crate::Result<()> {
        let Some(raw_name) = card.name.as_deref().filter(|n| !n.trim().is_empty()) else {
            return Err(MemographError::InvalidInput(
                "person name is required to save a contact".to_string(),
            ));
        };
        // Stored without whitespace so later lookups are consistent.
        let name: String = raw_name.chars().filter(|c| !c.is_whitespace()).collect();

        let mut properties = QueryRow::new();
        if let Some(title) = &card.title {
            properties.insert("title".to_string(), title.clone().into());
        }
        if let Some(phone) = &card.phone {
            properties.insert("phone".to_string(), phone.clone().into());
        }
        if let Some(email) = &card.email {
            properties.insert("email".to_string(), email.clone().into());
        }

        self.store
            .upsert_entity(EntityLabel::Person, &name, &properties)
            .await?;

        if let Some(company) = card.company.as_deref().filter(|c| !c.trim().is_empty()) {
            self.store
                .upsert_entity(EntityLabel::Company, company, &QueryRow::new())
                .await?;
            self.store
                .link(
                    EntityLabel::Person,
                    &name,
                    EntityLabel::Company,
                    company,
                    RelationType::WorksAt,
                )
                .await?;
        }

        info!(name = %name, company = ?card.company, "Contact saved");
        Ok(())
    }
}

/// Memo ids are derived from the creation instant, microsecond-precise.
fn memo_id_for(now: &DateTime<Local>) -> String {
    format!("memo_{}", now.format("%Y%m%d_%H%M%S_%6f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn memo_id_has_timestamp_format() {
        let now = Local.with_ymd_and_hms(2026, 2, 1, 14, 30, 5).unwrap();
        assert_eq!(memo_id_for(&now), "memo_20260201_143005_000000");
    }

    #[test]
    fn memo_ids_are_distinct_at_microsecond_resolution() {
        let base = Local.with_ymd_and_hms(2026, 2, 1, 14, 30, 5).unwrap();
        let later = base + chrono::Duration::microseconds(1);
        assert_ne!(memo_id_for(&base), memo_id_for(&later));
    }
}
