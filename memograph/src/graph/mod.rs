//! Property-graph storage.
//!
//! The [`GraphStore`] trait is the seam every other component works against;
//! [`Neo4jGraphStore`] is the Bolt-backed implementation. All node and edge
//! mutations are idempotent merge-or-create operations, and every label or
//! relationship-type token that reaches query text is drawn from the closed
//! enums in [`schema`].

mod errors;
mod neo4j;
pub mod schema;
mod traits;

pub use errors::{GraphError, GraphResult};
pub use neo4j::Neo4jGraphStore;
pub use schema::{EntityLabel, RelationType, SCHEMA_DESCRIPTION, UnknownToken};
pub use traits::{CompanyMember, GraphStore, MemoRecord, PersonCandidate, QueryRow};
