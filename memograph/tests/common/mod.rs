//! Shared test helpers: an in-memory [`GraphStore`] with the same
//! idempotence and matching semantics as the Bolt-backed store.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use memograph::graph::{
    CompanyMember, EntityLabel, GraphError, GraphResult, GraphStore, MemoRecord, PersonCandidate,
    QueryRow, RelationType,
};

#[derive(Debug, Clone, PartialEq)]
struct NodeRec {
    label: EntityLabel,
    name: String,
    properties: QueryRow,
}

#[derive(Debug, Clone, PartialEq)]
struct EdgeRec {
    from_label: EntityLabel,
    from_name: String,
    to_label: EntityLabel,
    to_name: String,
    rel_type: RelationType,
}

#[derive(Debug, Default)]
struct State {
    nodes: Vec<NodeRec>,
    memos: Vec<MemoRecord>,
    edges: Vec<EdgeRec>,
    memo_links: Vec<(EntityLabel, String, String)>,
    canned_rows: VecDeque<Vec<QueryRow>>,
    executed_queries: Vec<String>,
    candidate_calls: usize,
    fail_queries: bool,
}

/// In-memory graph store preserving node insertion order, merge-on-upsert,
/// create-only memos and edge deduplication.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    state: Mutex<State>,
}

#[allow(dead_code)]
impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a node directly, bypassing the trait.
    pub fn seed_node(&self, label: EntityLabel, name: &str, properties: QueryRow) {
        let mut state = self.state.lock().unwrap();
        state.nodes.push(NodeRec {
            label,
            name: name.to_string(),
            properties,
        });
    }

    /// Seed a person with optional contact fields.
    pub fn seed_person(
        &self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        title: Option<&str>,
    ) {
        let mut properties = QueryRow::new();
        if let Some(phone) = phone {
            properties.insert("phone".to_string(), phone.into());
        }
        if let Some(email) = email {
            properties.insert("email".to_string(), email.into());
        }
        if let Some(title) = title {
            properties.insert("title".to_string(), title.into());
        }
        self.seed_node(EntityLabel::Person, name, properties);
    }

    /// Queue rows for the next `run_query` call.
    pub fn push_rows(&self, rows: Vec<QueryRow>) {
        self.state.lock().unwrap().canned_rows.push_back(rows);
    }

    /// Make every subsequent `run_query` call fail.
    pub fn fail_queries(&self) {
        self.state.lock().unwrap().fail_queries = true;
    }

    pub fn node_count(&self) -> usize {
        self.state.lock().unwrap().nodes.len()
    }

    pub fn node_properties(&self, label: EntityLabel, name: &str) -> Option<QueryRow> {
        let state = self.state.lock().unwrap();
        state
            .nodes
            .iter()
            .find(|n| n.label == label && n.name == name)
            .map(|n| n.properties.clone())
    }

    pub fn memo_count(&self) -> usize {
        self.state.lock().unwrap().memos.len()
    }

    pub fn memo_text(&self, id: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .memos
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.text.clone())
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().unwrap().edges.len()
    }

    pub fn has_edge(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: RelationType,
    ) -> bool {
        let state = self.state.lock().unwrap();
        state
            .edges
            .iter()
            .any(|e| e.from_name == from_name && e.to_name == to_name && e.rel_type == rel_type)
    }

    pub fn memo_link_count(&self) -> usize {
        self.state.lock().unwrap().memo_links.len()
    }

    pub fn candidate_calls(&self) -> usize {
        self.state.lock().unwrap().candidate_calls
    }

    pub fn executed_queries(&self) -> Vec<String> {
        self.state.lock().unwrap().executed_queries.clone()
    }

    fn prop_string(properties: &QueryRow, key: &str) -> Option<String> {
        properties
            .get(key)
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn health_check(&self) -> GraphResult<()> {
        Ok(())
    }

    async fn close(&self) -> GraphResult<()> {
        Ok(())
    }

    async fn upsert_entity(
        &self,
        label: EntityLabel,
        name: &str,
        properties: &QueryRow,
    ) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(node) = state
            .nodes
            .iter_mut()
            .find(|n| n.label == label && n.name == name)
        {
            for (key, value) in properties {
                node.properties.insert(key.clone(), value.clone());
            }
        } else {
            state.nodes.push(NodeRec {
                label,
                name: name.to_string(),
                properties: properties.clone(),
            });
        }
        Ok(())
    }

    async fn create_memo(&self, memo: &MemoRecord) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.memos.iter().any(|m| m.id == memo.id) {
            return Ok(());
        }
        state.memos.push(memo.clone());
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
        let edge = EdgeRec {
            from_label,
            from_name: from_name.to_string(),
            to_label,
            to_name: to_name.to_string(),
            rel_type,
        };
        let mut state = self.state.lock().unwrap();
        if !state.edges.contains(&edge) {
            state.edges.push(edge);
        }
        Ok(())
    }

    async fn link_memo(
        &self,
        label: EntityLabel,
        name: &str,
        memo_id: &str,
    ) -> GraphResult<()> {
        let link = (label, name.to_string(), memo_id.to_string());
        let mut state = self.state.lock().unwrap();
        if !state.memo_links.contains(&link) {
            state.memo_links.push(link);
        }
        Ok(())
    }

    async fn find_label(&self, name: &str) -> GraphResult<Option<EntityLabel>> {
        let state = self.state.lock().unwrap();
        if let Some(node) = state.nodes.iter().find(|n| n.name == name) {
            return Ok(Some(node.label));
        }
        Ok(state
            .nodes
            .iter()
            .find(|n| n.name.contains(name) || name.contains(n.name.as_str()))
            .map(|n| n.label))
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
            _ => return Ok(false),
        };
        self.link(from_label, from_name, to_label, to_name, rel_type)
            .await?;
        Ok(true)
    }

    async fn find_person_candidates(
        &self,
        clean_name: &str,
    ) -> GraphResult<Vec<PersonCandidate>> {
        let mut state = self.state.lock().unwrap();
        state.candidate_calls += 1;
        let mut candidates: Vec<PersonCandidate> = state
            .nodes
            .iter()
            .filter(|n| n.label == EntityLabel::Person)
            .filter(|n| n.name.contains(clean_name) || clean_name.contains(n.name.as_str()))
            .map(|n| PersonCandidate {
                name: n.name.clone(),
                phone: Self::prop_string(&n.properties, "phone"),
                email: Self::prop_string(&n.properties, "email"),
                title: Self::prop_string(&n.properties, "title"),
            })
            .collect();
        // Longest name first; stable, so insertion order breaks ties.
        candidates.sort_by(|a, b| b.name.chars().count().cmp(&a.name.chars().count()));
        Ok(candidates)
    }

    async fn run_query(&self, query: &str, _params: &QueryRow) -> GraphResult<Vec<QueryRow>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_queries {
            return Err(GraphError::Backend("query execution failed".to_string()));
        }
        state.executed_queries.push(query.to_string());
        Ok(state.canned_rows.pop_front().unwrap_or_default())
    }

    async fn recent_memos(&self, limit: usize) -> GraphResult<Vec<MemoRecord>> {
        let state = self.state.lock().unwrap();
        let mut memos = state.memos.clone();
        memos.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        memos.truncate(limit);
        Ok(memos)
    }

    async fn person_phone(&self, name: &str) -> GraphResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .nodes
            .iter()
            .find(|n| n.label == EntityLabel::Person && n.name == name)
            .and_then(|n| Self::prop_string(&n.properties, "phone")))
    }

    async fn company_people(&self, company_name: &str) -> GraphResult<Vec<CompanyMember>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .edges
            .iter()
            .filter(|e| {
                e.rel_type == RelationType::WorksAt
                    && e.to_label == EntityLabel::Company
                    && e.to_name == company_name
            })
            .map(|e| {
                let title = state
                    .nodes
                    .iter()
                    .find(|n| n.label == EntityLabel::Person && n.name == e.from_name)
                    .and_then(|n| Self::prop_string(&n.properties, "title"));
                CompanyMember {
                    name: e.from_name.clone(),
                    title,
                }
            })
            .collect())
    }
}
