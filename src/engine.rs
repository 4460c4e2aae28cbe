//! The recommendation engine: owns the catalog, interaction log, and
//! derived vector caches, and fuses every signal into ranked output.
//!
//! The engine is single-threaded and synchronous; callers that serve it
//! concurrently must serialize access (the control plane wraps it in a
//! `tokio::sync::RwLock`).

pub mod catalog;
pub mod collaborative;
pub mod diversity;
pub mod interaction;
pub mod scoring;
pub mod serendipity;
pub mod signals;
pub mod similarity;
pub mod vectorize;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::store::snapshot::Snapshot;

use self::catalog::{CatalogStore, Content, User};
use self::interaction::{Interaction, InteractionKind, InteractionLog};
use self::scoring::{
    CANDIDATE_SCORE_FLOOR, ScoredContent, SignalBundle, fuse_score, recommendation_reason,
};
use self::signals::RecContext;
use self::vectorize::TermWeights;

/// Tunable engine parameters. Defaults reproduce the reference behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParams {
    /// Per-day multiplier for interest decay.
    pub time_decay_factor: f64,
    /// Weight of the diversity term during re-ranking.
    pub diversity_weight: f64,
    /// Probability of a serendipity injection per recommendation call.
    pub serendipity_chance: f64,
    /// Trailing window for trending aggregation.
    pub trending_window_hours: i64,
    /// Categories boosted on weekends, lowercase.
    pub leisure_categories: Vec<String>,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            time_decay_factor: 0.95,
            diversity_weight: 0.3,
            serendipity_chance: 0.15,
            trending_window_hours: 24,
            leisure_categories: vec!["entertainment".to_string(), "sports".to_string()],
        }
    }
}

/// Aggregate engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub user_count: usize,
    pub content_count: usize,
    pub interaction_count: usize,
}

/// Outcome of one recommendation call, with telemetry detail.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationBatch {
    pub items: Vec<ScoredContent>,
    pub serendipity_injected: bool,
}

/// In-memory recommendation engine. All state is exclusively owned; there
/// is no ambient/static state and no internal concurrency control.
pub struct RecommenderEngine {
    params: EngineParams,
    catalog: CatalogStore,
    interactions: InteractionLog,
    user_profiles: FxHashMap<String, TermWeights>,
    content_vectors: FxHashMap<String, TermWeights>,
    rng: StdRng,
}

impl RecommenderEngine {
    #[must_use]
    pub fn new(params: EngineParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// Construct with an explicit random source; pair with
    /// `serendipity_chance` 0.0/1.0 for deterministic tests.
    #[must_use]
    pub fn with_rng(params: EngineParams, rng: StdRng) -> Self {
        Self {
            params,
            catalog: CatalogStore::default(),
            interactions: InteractionLog::default(),
            user_profiles: FxHashMap::default(),
            content_vectors: FxHashMap::default(),
            rng,
        }
    }

    /// Add a content item. Returns `false` (no mutation) when the id is
    /// already taken. Builds the item's TF-IDF vector against the corpus
    /// as of this call.
    pub fn add_content(
        &mut self,
        id: &str,
        title: &str,
        category: &str,
        tags: &[String],
        description: &str,
    ) -> bool {
        let content = Content::new(id, title, category, tags, description, Utc::now());
        if !self.catalog.insert_content(content) {
            debug!(content_id = id, "rejected duplicate content id");
            return false;
        }
        let inserted = self.catalog.content(id).map(|c| {
            vectorize::content_vector(c, self.catalog.contents())
        });
        if let Some(vector) = inserted {
            self.content_vectors.insert(id.to_string(), vector);
        }
        true
    }

    /// Register a user. Returns `false` (no mutation) on a duplicate id.
    pub fn add_user(&mut self, id: &str, interests: &[String]) -> bool {
        let user = User::new(id, interests, Utc::now());
        if !self.catalog.insert_user(user) {
            debug!(user_id = id, "rejected duplicate user id");
            return false;
        }
        self.rebuild_user_profile(id);
        true
    }

    /// Record a user-content event. Returns `false` (no mutation) when the
    /// user or content is unknown. Otherwise appends to the log, bumps the
    /// matching counter, refreshes quality/trending for the content, and
    /// rebuilds the acting user's profile.
    pub fn record_interaction(
        &mut self,
        user_id: &str,
        content_id: &str,
        kind: InteractionKind,
        rating: Option<i32>,
        session_id: Option<String>,
    ) -> bool {
        self.record_interaction_at(user_id, content_id, kind, rating, session_id, Utc::now())
    }

    pub(crate) fn record_interaction_at(
        &mut self,
        user_id: &str,
        content_id: &str,
        kind: InteractionKind,
        rating: Option<i32>,
        session_id: Option<String>,
        now: DateTime<Utc>,
    ) -> bool {
        if self.catalog.user(user_id).is_none() || self.catalog.content(content_id).is_none() {
            debug!(user_id, content_id, "rejected interaction for unknown record");
            return false;
        }

        self.interactions.append(Interaction {
            user_id: user_id.to_string(),
            content_id: content_id.to_string(),
            kind: kind.clone(),
            rating,
            timestamp: now,
            session_id,
        });

        {
            let user = self.catalog.user_mut(user_id).expect("checked above");
            match kind {
                InteractionKind::View => user.viewed.push(content_id.to_string()),
                InteractionKind::Like => user.liked.push(content_id.to_string()),
                _ => {}
            }
            user.last_active = now;
        }

        {
            let content = self.catalog.content_mut(content_id).expect("checked above");
            match kind {
                InteractionKind::View => content.view_count += 1,
                InteractionKind::Like => content.like_count += 1,
                InteractionKind::Share => content.share_count += 1,
                InteractionKind::Other(_) => {}
            }
        }

        let quality = signals::quality_score(
            self.catalog.content(content_id).expect("checked above"),
        );
        let trending = signals::trending_score(
            content_id,
            &self.interactions,
            now,
            self.params.trending_window_hours,
        );
        {
            let content = self.catalog.content_mut(content_id).expect("checked above");
            content.quality_score = quality;
            content.trending_score = trending;
        }

        self.rebuild_user_profile(user_id);
        true
    }

    /// Ranked recommendations for a user. Unknown users get an empty list.
    pub fn recommendations(
        &mut self,
        user_id: &str,
        count: usize,
        context: Option<RecContext>,
    ) -> RecommendationBatch {
        self.recommendations_at(user_id, count, context, Utc::now())
    }

    pub(crate) fn recommendations_at(
        &mut self,
        user_id: &str,
        count: usize,
        context: Option<RecContext>,
        now: DateTime<Utc>,
    ) -> RecommendationBatch {
        let Some(user) = self.catalog.user(user_id) else {
            return RecommendationBatch {
                items: Vec::new(),
                serendipity_injected: false,
            };
        };
        let context = context.unwrap_or_else(RecContext::current);
        let decay = signals::time_decay(user.last_active, now, self.params.time_decay_factor);

        let mut scored: Vec<ScoredContent> = Vec::new();
        for content in self.catalog.contents() {
            // Already-seen items never come back.
            if user.viewed.iter().any(|id| *id == content.id) {
                continue;
            }

            let empty = TermWeights::default();
            let profile = self.user_profiles.get(user_id).unwrap_or(&empty);
            let content_vector = self.content_vectors.get(&content.id).unwrap_or(&empty);

            let bundle = SignalBundle {
                interest_match: signals::interest_match(user, content),
                content_based: similarity::cosine_similarity(profile, content_vector),
                collaborative: collaborative::collaborative_score(
                    user_id,
                    &content.id,
                    &self.catalog,
                    &self.user_profiles,
                    &self.content_vectors,
                ),
                trending: content.trending_score,
                quality: content.quality_score,
                time_decay: decay,
                context_boost: signals::context_boost(
                    content,
                    context,
                    &self.params.leisure_categories,
                ),
            };
            let score = fuse_score(&bundle);
            if score < CANDIDATE_SCORE_FLOOR {
                continue;
            }

            let reason = recommendation_reason(user, content, score, &self.content_vectors);
            scored.push(ScoredContent {
                content: content.clone(),
                score,
                reason,
            });
        }

        // Stable sort keeps catalog insertion order among exact ties.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut items = diversity::rerank(scored.clone(), count, self.params.diversity_weight);
        let serendipity_injected = serendipity::inject(
            &mut self.rng,
            self.params.serendipity_chance,
            &mut items,
            &scored,
            count,
        );
        items.truncate(count);

        debug!(
            user_id,
            candidates = scored.len(),
            returned = items.len(),
            serendipity_injected,
            "recommendations computed"
        );
        RecommendationBatch {
            items,
            serendipity_injected,
        }
    }

    /// Look up a content record by id.
    #[must_use]
    pub fn content(&self, id: &str) -> Option<&Content> {
        self.catalog.content(id)
    }

    /// Look up a user record by id.
    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.catalog.user(id)
    }

    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            user_count: self.catalog.user_count(),
            content_count: self.catalog.content_count(),
            interaction_count: self.interactions.total(),
        }
    }

    /// Full state export: the five snapshot sections.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            users: self.catalog.users().to_vec(),
            content: self.catalog.contents().to_vec(),
            interactions: self.interactions.by_user().clone(),
            user_profiles: self.user_profiles.clone(),
            content_vectors: self.content_vectors.clone(),
        }
    }

    /// Replace all state from a snapshot. Derived vectors are restored
    /// verbatim, not recomputed, so scoring outcomes match the saved
    /// engine exactly.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.catalog = CatalogStore::from_records(snapshot.content, snapshot.users);
        self.interactions = InteractionLog::from_records(snapshot.interactions);
        self.user_profiles = snapshot.user_profiles;
        self.content_vectors = snapshot.content_vectors;
    }

    #[must_use]
    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    fn rebuild_user_profile(&mut self, user_id: &str) {
        if let Some(user) = self.catalog.user(user_id) {
            let profile = vectorize::user_profile(user, &self.catalog);
            self.user_profiles.insert(user_id.to_string(), profile);
        }
    }
}
