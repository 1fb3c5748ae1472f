//! Matching a mentioned person name against already-stored `Person` nodes.

use std::sync::Arc;

use tracing::info;

use crate::graph::{GraphResult, GraphStore};

use super::normalizer::normalize_person_name;

/// Resolves a person's surface string to the canonical stored name, so that
/// "인영", "인영님" and "이인영" all land on one node.
///
/// Read-only: the matcher only picks a name. The store's merge-or-create
/// constraint is what actually prevents duplicate nodes when two ingestions
/// race on the same new name — this lookup is a best-effort hint, not a lock.
#[derive(Debug, Clone)]
pub struct PersonMatcher {
    store: Arc<dyn GraphStore>,
}

impl PersonMatcher {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Resolve `candidate` to the name it should be persisted under.
    ///
    /// Candidates are stored persons whose name contains the normalized input
    /// or is contained by it, scanned longest-name-first. The first candidate
    /// carrying any contact attribute (phone, email, title) wins; with no
    /// contact information anywhere, the longest name wins. When nothing
    /// matches — including when normalization leaves an empty string — the
    /// original input is returned unchanged and a new node will be created
    /// under it.
    pub async fn resolve(&self, candidate: &str) -> GraphResult<String> {
        let clean = normalize_person_name(candidate);
        if clean.is_empty() {
            return Ok(candidate.to_string());
        }

        let candidates = self.store.find_person_candidates(&clean).await?;
        if candidates.is_empty() {
            return Ok(candidate.to_string());
        }

        for stored in &candidates {
            if stored.has_contact_info() {
                info!(
                    candidate,
                    resolved = %stored.name,
                    "Resolved person name (has contact info)"
                );
                return Ok(stored.name.clone());
            }
        }

        let best = &candidates[0].name;
        if best != candidate {
            info!(candidate, resolved = %best, "Resolved person name");
        }
        Ok(best.clone())
    }
}
