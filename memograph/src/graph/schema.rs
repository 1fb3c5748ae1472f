//! Closed sets of node labels and relationship types.
//!
//! Cypher cannot bind label or relationship-type tokens as parameters, so any
//! token that ends up inside query text must come from these enums. Incoming
//! strings (extraction output, relationship records) are parsed through
//! [`FromStr`] and rejected when they fall outside the set; `as_str` is the
//! only way a token reaches a query string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Node labels that may appear in generated query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    Person,
    Company,
    Event,
    Project,
}

impl EntityLabel {
    /// All labels, in schema order.
    pub const ALL: [EntityLabel; 4] = [
        EntityLabel::Person,
        EntityLabel::Company,
        EntityLabel::Event,
        EntityLabel::Project,
    ];

    /// The label token as it appears in query text.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "Person",
            EntityLabel::Company => "Company",
            EntityLabel::Event => "Event",
            EntityLabel::Project => "Project",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityLabel {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Person" => Ok(EntityLabel::Person),
            "Company" => Ok(EntityLabel::Company),
            "Event" => Ok(EntityLabel::Event),
            "Project" => Ok(EntityLabel::Project),
            other => Err(UnknownToken::label(other)),
        }
    }
}

/// Relationship types that may appear in generated query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    WorksAt,
    Attended,
    Discussed,
    MentionedIn,
    IntroducedBy,
}

impl RelationType {
    /// The relationship-type token as it appears in query text.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::WorksAt => "WORKS_AT",
            RelationType::Attended => "ATTENDED",
            RelationType::Discussed => "DISCUSSED",
            RelationType::MentionedIn => "MENTIONED_IN",
            RelationType::IntroducedBy => "INTRODUCED_BY",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORKS_AT" => Ok(RelationType::WorksAt),
            "ATTENDED" => Ok(RelationType::Attended),
            "DISCUSSED" => Ok(RelationType::Discussed),
            "MENTIONED_IN" => Ok(RelationType::MentionedIn),
            "INTRODUCED_BY" => Ok(RelationType::IntroducedBy),
            other => Err(UnknownToken::relation(other)),
        }
    }
}

/// A label or relationship-type string outside the allowed sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} token: {token}")]
pub struct UnknownToken {
    kind: &'static str,
    token: String,
}

impl UnknownToken {
    fn label(token: &str) -> Self {
        Self {
            kind: "label",
            token: token.to_string(),
        }
    }

    fn relation(token: &str) -> Self {
        Self {
            kind: "relationship-type",
            token: token.to_string(),
        }
    }
}

/// Graph schema description handed verbatim to the query-generation model.
///
/// Versioned with the enums above; update both together.
pub const SCHEMA_DESCRIPTION: &str = "\
Nodes:
- Person {name: string, title: string, phone: string, email: string}
- Company {name: string}
- Event {name: string, date: string}
- Project {name: string}
- Memo {id: string, text: string, timestamp: string, business_related: boolean}

Relationships:
- (Person)-[:WORKS_AT]->(Company)
- (Person)-[:ATTENDED]->(Event)
- (Person)-[:MENTIONED_IN]->(Memo)
- (Company)-[:MENTIONED_IN]->(Memo)
- (Event)-[:DISCUSSED]->(Project)
- (Person)-[:INTRODUCED_BY]->(Person)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for label in EntityLabel::ALL {
            assert_eq!(label.as_str().parse::<EntityLabel>().unwrap(), label);
        }
    }

    #[test]
    fn relation_types_round_trip() {
        for rel in [
            RelationType::WorksAt,
            RelationType::Attended,
            RelationType::Discussed,
            RelationType::MentionedIn,
            RelationType::IntroducedBy,
        ] {
            assert_eq!(rel.as_str().parse::<RelationType>().unwrap(), rel);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Memo; DETACH DELETE n".parse::<EntityLabel>().unwrap_err();
        assert!(err.to_string().contains("unknown label"));
    }

    #[test]
    fn case_variants_are_rejected() {
        assert!("person".parse::<EntityLabel>().is_err());
        assert!("works_at".parse::<RelationType>().is_err());
    }

    #[test]
    fn unknown_relation_is_rejected() {
        assert!("KNOWS".parse::<RelationType>().is_err());
    }
}
