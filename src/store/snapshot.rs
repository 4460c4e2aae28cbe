//! Serializable engine state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::catalog::{Content, User};
use crate::engine::interaction::Interaction;
use crate::engine::vectorize::TermWeights;

/// Full engine state in five named sections. Save-then-load must
/// reproduce identical scoring outcomes, so the derived vector caches are
/// persisted verbatim rather than recomputed on restore.
///
/// Users are kept as an ordered list: registration order feeds stable
/// sorts during ranking and must survive the round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub content: Vec<Content>,
    pub interactions: FxHashMap<String, Vec<Interaction>>,
    pub user_profiles: FxHashMap<String, TermWeights>,
    pub content_vectors: FxHashMap<String, TermWeights>,
}
