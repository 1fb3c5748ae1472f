//! Trait definition for the property-graph store.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::GraphResult;
use super::schema::{EntityLabel, RelationType};

/// A result row from an arbitrary read query: column name → value.
pub type QueryRow = serde_json::Map<String, serde_json::Value>;

/// A stored `Person` node as returned by candidate search, with the contact
/// attributes that drive match ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCandidate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

impl PersonCandidate {
    /// Whether any contact attribute is known for this person.
    pub fn has_contact_info(&self) -> bool {
        self.phone.is_some() || self.email.is_some() || self.title.is_some()
    }
}

/// A stored `Memo` node as returned by the listing interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoRecord {
    pub id: String,
    pub text: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
    pub business_related: bool,
}

/// A person working at a company, as returned by [`GraphStore::company_people`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyMember {
    pub name: String,
    pub title: Option<String>,
}

/// Operations against the shared property graph.
///
/// Implementations must guarantee at-most-one node per `(label, name)` pair
/// even under concurrent callers: every mutation here is an atomic
/// merge-or-create, backed by uniqueness constraints where the schema
/// declares them. Callers never get read-then-write atomicity across calls —
/// each method is its own unit of work.
#[async_trait]
pub trait GraphStore: Send + Sync + Debug {
    /// Verify connectivity to the store.
    async fn health_check(&self) -> GraphResult<()>;

    /// Close the connection pool and release resources.
    async fn close(&self) -> GraphResult<()>;

    /// Create the node if absent, otherwise merge `properties` into it.
    ///
    /// Only keys present in `properties` are written; existing keys are never
    /// removed. Callers are expected to have dropped null-valued entries.
    async fn upsert_entity(
        &self,
        label: EntityLabel,
        name: &str,
        properties: &QueryRow,
    ) -> GraphResult<()>;

    /// Create a memo node. A memo that already exists under `id` is left
    /// untouched — memo content is immutable after creation.
    async fn create_memo(&self, memo: &MemoRecord) -> GraphResult<()>;

    /// Create a typed edge between two entity nodes. Creating the same
    /// `(from, to, rel_type)` edge twice leaves a single edge.
    async fn link(
        &self,
        from_label: EntityLabel,
        from_name: &str,
        to_label: EntityLabel,
        to_name: &str,
        rel_type: RelationType,
    ) -> GraphResult<()>;

    /// Create a `MENTIONED_IN` edge from an entity node to a memo node.
    /// Idempotent in the same way as [`GraphStore::link`].
    async fn link_memo(
        &self,
        label: EntityLabel,
        name: &str,
        memo_id: &str,
    ) -> GraphResult<()>;

    /// Resolve an entity's label by node name: exact match first, then
    /// bidirectional substring match. Returns `None` when nothing matches or
    /// when the matched node carries a label outside the schema.
    async fn find_label(&self, name: &str) -> GraphResult<Option<EntityLabel>>;

    /// Create an edge between two nodes identified only by name, resolving
    /// each endpoint's label via [`GraphStore::find_label`]. Returns `false`
    /// (without touching the graph) when either endpoint stays unresolved.
    async fn create_relationship_by_name(
        &self,
        from_name: &str,
        to_name: &str,
        rel_type: RelationType,
    ) -> GraphResult<bool>;

    /// All stored persons whose name contains `clean_name` or is contained by
    /// it, ordered by name length descending (most specific first).
    async fn find_person_candidates(
        &self,
        clean_name: &str,
    ) -> GraphResult<Vec<PersonCandidate>>;

    /// Execute an arbitrary read query and return each result row as a
    /// column → value map. `query` must already have passed validation;
    /// `params` values are bound, never interpolated.
    async fn run_query(&self, query: &str, params: &QueryRow) -> GraphResult<Vec<QueryRow>>;

    /// The most recent memos, newest first.
    async fn recent_memos(&self, limit: usize) -> GraphResult<Vec<MemoRecord>>;

    /// A person's stored phone number, if any.
    async fn person_phone(&self, name: &str) -> GraphResult<Option<String>>;

    /// Everyone with a `WORKS_AT` edge to the given company.
    async fn company_people(&self, company_name: &str) -> GraphResult<Vec<CompanyMember>>;
}
