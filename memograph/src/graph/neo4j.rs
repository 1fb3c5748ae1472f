//! Neo4j-backed implementation of [`GraphStore`].
//!
//! One pooled Bolt connection is opened at construction and shared by every
//! caller; uniqueness constraints on `Person.name`, `Company.name` and
//! `Memo.id` are created at the same time, so concurrent merge-or-create
//! calls on the same key settle on a single node inside the store.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use neo4rs::{BoltMap, BoltType, Graph, query};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::GraphConfig;

use super::errors::{GraphError, GraphResult};
use super::schema::{EntityLabel, RelationType};
use super::traits::{CompanyMember, GraphStore, MemoRecord, PersonCandidate, QueryRow};

/// Uniqueness constraints created once at startup. `IF NOT EXISTS` keeps the
/// statements safe to replay on every boot.
const CONSTRAINTS: &[&str] = &[
    "CREATE CONSTRAINT person_name IF NOT EXISTS FOR (p:Person) REQUIRE p.name IS UNIQUE",
    "CREATE CONSTRAINT company_name IF NOT EXISTS FOR (c:Company) REQUIRE c.name IS UNIQUE",
    "CREATE CONSTRAINT memo_id IF NOT EXISTS FOR (m:Memo) REQUIRE m.id IS UNIQUE",
];

/// Graph store backed by a pooled Neo4j Bolt connection.
#[derive(Clone)]
pub struct Neo4jGraphStore {
    graph: Graph,
    uri: String,
}

impl fmt::Debug for Neo4jGraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jGraphStore")
            .field("uri", &self.uri)
            .finish_non_exhaustive()
    }
}

impl Neo4jGraphStore {
    /// Connect to the store and create the schema constraints.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        info!(uri = %config.uri, user = %config.user, "Connecting to graph store");

        let mut builder = neo4rs::ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections);
        if let Some(database) = &config.database {
            builder = builder.db(database.as_str());
        }
        let driver_config = builder
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(driver_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let store = Self {
            graph,
            uri: config.uri.clone(),
        };
        store.health_check().await?;
        store.create_constraints().await?;
        info!("Connected to graph store");

        Ok(store)
    }

    async fn create_constraints(&self) -> GraphResult<()> {
        for statement in CONSTRAINTS {
            self.graph.run(query(statement)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn health_check(&self) -> GraphResult<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))
    }

    async fn close(&self) -> GraphResult<()> {
        // neo4rs returns pooled connections on drop; nothing to flush here.
        Ok(())
    }

    async fn upsert_entity(
        &self,
        label: EntityLabel,
        name: &str,
        properties: &QueryRow,
    ) -> GraphResult<()> {
        let q = query(&format!(
            "MERGE (n:{label} {{name: $name}}) \
             ON CREATE SET n += $props \
             ON MATCH SET n += $props",
            label = label.as_str()
        ))
        .param("name", name)
        .param("props", json_map_to_bolt(properties));

        self.graph.run(q).await?;
        debug!(%label, name, keys = properties.len(), "Upserted entity node");
        Ok(())
    }

    async fn create_memo(&self, memo: &MemoRecord) -> GraphResult<()> {
        // No ON MATCH branch: an existing memo is never rewritten.
        let q = query(
            "MERGE (m:Memo {id: $id}) \
             ON CREATE SET m.text = $text, m.timestamp = $timestamp, \
                           m.business_related = $business_related",
        )
        .param("id", memo.id.as_str())
        .param("text", memo.text.as_str())
        .param("timestamp", memo.timestamp.as_str())
        .param("business_related", memo.business_related);

        self.graph.run(q).await?;
        debug!(memo_id = %memo.id, "Created memo node");
        Ok(())
    }

    async fn link(
        &self,
        from_label: EntityLabel,
        from_name: &str,
        to_label: EntityLabel,
        to_name: &str,
        rel_type: RelationType,
    ) -> GraphResult<()> {
        let q = query(&format!(
            "MATCH (a:{from} {{name: $from_name}}), (b:{to} {{name: $to_name}}) \
             MERGE (a)-[:{rel}]->(b)",
            from = from_label.as_str(),
            to = to_label.as_str(),
            rel = rel_type.as_str()
        ))
        .param("from_name", from_name)
        .param("to_name", to_name);

        self.graph.run(q).await?;
        Ok(())
    }

    async fn link_memo(
        &self,
        label: EntityLabel,
        name: &str,
        memo_id: &str,
    ) -> GraphResult<()> {
        let q = query(&format!(
            "MATCH (m:Memo {{id: $memo_id}}), (e:{label} {{name: $name}}) \
             MERGE (e)-[:{rel}]->(m)",
            label = label.as_str(),
            rel = RelationType::MentionedIn.as_str()
        ))
        .param("memo_id", memo_id)
        .param("name", name);

        self.graph.run(q).await?;
        Ok(())
    }

    async fn find_label(&self, name: &str) -> GraphResult<Option<EntityLabel>> {
        let q = query("MATCH (n) WHERE n.name = $name RETURN labels(n) AS labels LIMIT 1")
            .param("name", name);
        let mut stream = self.graph.execute(q).await?;
        if let Some(row) = stream.next().await? {
            let labels: Vec<String> = row
                .get("labels")
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            if let Some(label) = labels.first().and_then(|l| EntityLabel::from_str(l).ok()) {
                return Ok(Some(label));
            }
        }

        let q = query(
            "MATCH (n) WHERE n.name CONTAINS $name OR $name CONTAINS n.name \
             RETURN labels(n) AS labels, n.name AS matched_name LIMIT 1",
        )
        .param("name", name);
        let mut stream = self.graph.execute(q).await?;
        if let Some(row) = stream.next().await? {
            let labels: Vec<String> = row
                .get("labels")
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            if let Some(label) = labels.first().and_then(|l| EntityLabel::from_str(l).ok()) {
                let matched: String = row.get("matched_name").unwrap_or_default();
                info!(name, matched = %matched, "Partial name match while resolving label");
                return Ok(Some(label));
            }
        }

        Ok(None)
    }

    async fn create_relationship_by_name(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: RelationType,
    ) -> GraphResult<bool> {
        let from_label = self.find_label(from_name).await?;
        let to_label = self.find_label(to_name).await?;

        let (from_label, to_label) = match (from_label, to_label) {
            (Some(f), Some(t)) => (f, t),
            (from_label, to_label) => {
                warn!(
                    from_name,
                    to_name,
                    ?from_label,
                    ?to_label,
                    "Could not resolve both endpoints of relationship"
                );
                return Ok(false);
            }
        };

        self.link(from_label, from_name, to_label, to_name, rel_type)
            .await?;
        info!(from_name, to_name, rel = %rel_type, "Created relationship");
        Ok(true)
    }

    async fn find_person_candidates(
        &self,
        clean_name: &str,
    ) -> GraphResult<Vec<PersonCandidate>> {
        // Longer stored names first: a full name beats a fragment.
        let q = query(
            "MATCH (p:Person) \
             WHERE p.name CONTAINS $clean_name OR $clean_name CONTAINS p.name \
             RETURN p.name AS name, p.phone AS phone, p.email AS email, p.title AS title \
             ORDER BY size(p.name) DESC",
        )
        .param("clean_name", clean_name);

        let mut candidates = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let candidate: PersonCandidate = row
                .to()
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    async fn run_query(&self, query_text: &str, params: &QueryRow) -> GraphResult<Vec<QueryRow>> {
        let mut q = query(query_text);
        for (key, value) in params {
            if let Some(bolt) = json_value_to_bolt(value) {
                q = q.param(key.as_str(), bolt);
            }
        }

        let mut rows = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let record: QueryRow = row
                .to()
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            rows.push(record);
        }
        debug!(rows = rows.len(), "Executed query");
        Ok(rows)
    }

    async fn recent_memos(&self, limit: usize) -> GraphResult<Vec<MemoRecord>> {
        let q = query(
            "MATCH (m:Memo) \
             RETURN m.id AS id, m.text AS text, m.timestamp AS timestamp, \
                    m.business_related AS business_related \
             ORDER BY m.timestamp DESC LIMIT $limit",
        )
        .param("limit", limit as i64);

        let mut memos = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let memo: MemoRecord = row
                .to()
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            memos.push(memo);
        }
        Ok(memos)
    }

    async fn person_phone(&self, name: &str) -> GraphResult<Option<String>> {
        let q = query("MATCH (p:Person {name: $name}) RETURN p.phone AS phone").param("name", name);
        let mut stream = self.graph.execute(q).await?;
        if let Some(row) = stream.next().await? {
            let phone: Option<String> = row
                .get("phone")
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            return Ok(phone);
        }
        Ok(None)
    }

    async fn company_people(&self, company_name: &str) -> GraphResult<Vec<CompanyMember>> {
        let q = query(
            "MATCH (p:Person)-[:WORKS_AT]->(c:Company {name: $company_name}) \
             RETURN p.name AS name, p.title AS title",
        )
        .param("company_name", company_name);

        let mut people = Vec::new();
        let mut stream = self.graph.execute(q).await?;
        while let Some(row) = stream.next().await? {
            let member: CompanyMember = row
                .to()
                .map_err(|e| GraphError::Deserialization(e.to_string()))?;
            people.push(member);
        }
        Ok(people)
    }
}

/// Convert a JSON object into a Bolt map parameter.
fn json_map_to_bolt(map: &QueryRow) -> BoltType {
    let mut bolt = BoltMap::default();
    for (key, value) in map {
        if let Some(converted) = json_value_to_bolt(value) {
            bolt.put(key.as_str().into(), converted);
        }
    }
    BoltType::Map(bolt)
}

/// Convert a JSON value into a Bolt value. Nulls map to `None` so callers can
/// skip them instead of writing them.
fn json_value_to_bolt(value: &Value) -> Option<BoltType> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some((*b).into()),
        Value::Number(n) => n
            .as_i64()
            .map(BoltType::from)
            .or_else(|| n.as_f64().map(BoltType::from)),
        Value::String(s) => Some(s.as_str().into()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(json_value_to_bolt)
                .collect::<Vec<_>>()
                .into(),
        ),
        Value::Object(map) => Some(json_map_to_bolt(map)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> QueryRow {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn null_properties_are_skipped() {
        let map = as_map(json!({
            "title": "과장",
            "phone": null,
            "email": "kim@abc.com",
        }));
        let bolt = json_map_to_bolt(&map);
        match bolt {
            BoltType::Map(inner) => {
                assert_eq!(inner.value.len(), 2);
                assert!(inner.value.contains_key(&neo4rs::BoltString::from("title")));
                assert!(!inner.value.contains_key(&neo4rs::BoltString::from("phone")));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn scalar_values_convert() {
        assert!(json_value_to_bolt(&json!("text")).is_some());
        assert!(json_value_to_bolt(&json!(42)).is_some());
        assert!(json_value_to_bolt(&json!(1.5)).is_some());
        assert!(json_value_to_bolt(&json!(true)).is_some());
        assert!(json_value_to_bolt(&Value::Null).is_none());
    }

    #[test]
    fn nested_arrays_convert() {
        let bolt = json_value_to_bolt(&json!(["a", null, "b"])).unwrap();
        match bolt {
            BoltType::List(list) => assert_eq!(list.value.len(), 2),
            other => panic!("expected list, got {other:?}"),
        }
    }
}
