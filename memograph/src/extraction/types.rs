//! Records produced by the extraction collaborator.
//!
//! Parsing is deliberately lenient about optional fields — the model may
//! omit a name or emit an unknown type — but the envelope itself must be
//! valid JSON. Semantic filtering (unknown labels, missing names) happens
//! downstream in the ingestion pipeline, where it can be reported.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::graph::{EntityLabel, QueryRow, RelationType};

/// One extraction batch: everything recognized in a single memo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub entities: Vec<ExtractedEntity>,
    #[serde(default)]
    pub relationships: Vec<ExtractedRelationship>,
    #[serde(default)]
    pub business_related: bool,
}

/// A recognized entity. Fields beyond `type`/`name` (title, phone, email,
/// date, …) are collected as properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub properties: QueryRow,
}

impl ExtractedEntity {
    /// The entity's label, when its `type` is one of the schema labels.
    pub fn label(&self) -> Option<EntityLabel> {
        self.entity_type
            .as_deref()
            .and_then(|t| EntityLabel::from_str(t).ok())
    }

    /// Whether this record names a person.
    pub fn is_person(&self) -> bool {
        self.label() == Some(EntityLabel::Person)
    }

    /// The properties to persist: everything except `type`/`name`, with
    /// null-valued entries dropped.
    pub fn storable_properties(&self) -> QueryRow {
        self.properties
            .iter()
            .filter(|(_, value)| !matches!(value, Value::Null))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// A recognized relationship between two named entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRelationship {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rel_type: Option<String>,
}

impl ExtractedRelationship {
    /// The relationship type, when it is one of the schema types.
    pub fn relation(&self) -> Option<RelationType> {
        self.rel_type
            .as_deref()
            .and_then(|t| RelationType::from_str(t).ok())
    }
}

/// Structured fields recognized on a business card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactCard {
    pub name: Option<String>,
    pub title: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}
