//! Entity resolution for person names.
//!
//! Extracted memos refer to people by whatever fragment the author wrote —
//! a given name, a full name, a name with an honorific. This module maps
//! each surface string onto the canonical stored `Person` node.

mod matcher;
mod normalizer;

pub use matcher::PersonMatcher;
pub use normalizer::normalize_person_name;
