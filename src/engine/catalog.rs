//! Catalog store: content and user records.
//!
//! Pure CRUD with uniqueness invariants; no scoring logic lives here.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A catalog content item.
///
/// Tags and description are normalized to lowercase at insert time; title
/// and category are stored verbatim and lowercased at comparison sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub share_count: u64,
    pub quality_score: f64,
    pub trending_score: f64,
}

impl Content {
    #[must_use]
    pub(crate) fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        tags: &[String],
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            tags: tags.iter().map(|t| t.to_lowercase()).collect(),
            description: description.to_lowercase(),
            created_at,
            view_count: 0,
            like_count: 0,
            share_count: 0,
            // Neutral prior until the item has been viewed at least once.
            quality_score: 0.5,
            trending_score: 0.0,
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub interests: Vec<String>,
    pub viewed: Vec<String>,
    pub liked: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub(crate) fn new(
        id: impl Into<String>,
        interests: &[String],
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            interests: interests.iter().map(|i| i.to_lowercase()).collect(),
            viewed: Vec::new(),
            liked: Vec::new(),
            created_at,
            last_active: created_at,
        }
    }
}

/// In-memory store for content and user records.
///
/// Insertion order is preserved for both collections so that downstream
/// stable sorts (candidate ranking, similar-user ties) are deterministic.
#[derive(Debug, Default, Clone)]
pub(crate) struct CatalogStore {
    contents: Vec<Content>,
    content_index: FxHashMap<String, usize>,
    users: Vec<User>,
    user_index: FxHashMap<String, usize>,
}

impl CatalogStore {
    /// Insert a content item. Returns `false` without mutating when the id
    /// is already present.
    pub(crate) fn insert_content(&mut self, content: Content) -> bool {
        if self.content_index.contains_key(&content.id) {
            return false;
        }
        self.content_index
            .insert(content.id.clone(), self.contents.len());
        self.contents.push(content);
        true
    }

    /// Insert a user. Returns `false` without mutating when the id is
    /// already present.
    pub(crate) fn insert_user(&mut self, user: User) -> bool {
        if self.user_index.contains_key(&user.id) {
            return false;
        }
        self.user_index.insert(user.id.clone(), self.users.len());
        self.users.push(user);
        true
    }

    #[must_use]
    pub(crate) fn content(&self, id: &str) -> Option<&Content> {
        self.content_index.get(id).map(|&i| &self.contents[i])
    }

    pub(crate) fn content_mut(&mut self, id: &str) -> Option<&mut Content> {
        self.content_index
            .get(id)
            .copied()
            .map(|i| &mut self.contents[i])
    }

    #[must_use]
    pub(crate) fn user(&self, id: &str) -> Option<&User> {
        self.user_index.get(id).map(|&i| &self.users[i])
    }

    pub(crate) fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.user_index
            .get(id)
            .copied()
            .map(|i| &mut self.users[i])
    }

    #[must_use]
    pub(crate) fn contents(&self) -> &[Content] {
        &self.contents
    }

    #[must_use]
    pub(crate) fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub(crate) fn content_count(&self) -> usize {
        self.contents.len()
    }

    #[must_use]
    pub(crate) fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Rebuild a store from ordered record lists (snapshot restore path).
    #[must_use]
    pub(crate) fn from_records(contents: Vec<Content>, users: Vec<User>) -> Self {
        let content_index = contents
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        let user_index = users
            .iter()
            .enumerate()
            .map(|(i, u)| (u.id.clone(), i))
            .collect();
        Self {
            contents,
            content_index,
            users,
            user_index,
        }
    }
}
