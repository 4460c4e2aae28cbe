//! Append-only interaction log, keyed by user.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Interaction type. `Other` carries forward any unrecognized label so the
/// log stays append-only even when upstream introduces new event kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Like,
    Share,
    #[serde(untagged)]
    Other(String),
}

impl InteractionKind {
    /// Trending weight: views count once, everything else double.
    #[must_use]
    pub(crate) fn trending_weight(&self) -> f64 {
        match self {
            Self::View => 1.0,
            _ => 2.0,
        }
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "view" => Self::View,
            "like" => Self::Like,
            "share" => Self::Share,
            other => Self::Other(other.to_string()),
        })
    }
}

/// A single user-content event. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub content_id: String,
    pub kind: InteractionKind,
    pub rating: Option<i32>,
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<String>,
}

/// Append-only log grouped per user.
#[derive(Debug, Default, Clone)]
pub(crate) struct InteractionLog {
    by_user: FxHashMap<String, Vec<Interaction>>,
    total: usize,
}

impl InteractionLog {
    pub(crate) fn append(&mut self, interaction: Interaction) {
        self.by_user
            .entry(interaction.user_id.clone())
            .or_default()
            .push(interaction);
        self.total += 1;
    }

    /// Iterate every interaction across all users.
    ///
    /// This is the trending-window scan; O(total log size) per call.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Interaction> {
        self.by_user.values().flatten()
    }

    #[must_use]
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub(crate) fn by_user(&self) -> &FxHashMap<String, Vec<Interaction>> {
        &self.by_user
    }

    #[must_use]
    pub(crate) fn from_records(by_user: FxHashMap<String, Vec<Interaction>>) -> Self {
        let total = by_user.values().map(Vec::len).sum();
        Self { by_user, total }
    }
}
