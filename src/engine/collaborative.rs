//! Collaborative filtering: user-user and item-item components.

use rustc_hash::FxHashMap;

use super::catalog::CatalogStore;
use super::similarity::cosine_similarity;
use super::vectorize::TermWeights;

/// How many similar users the user-user component consults.
pub(crate) const SIMILAR_USER_POOL: usize = 10;
/// How many recent views feed the item-item component.
pub(crate) const RECENT_VIEW_WINDOW: usize = 5;

/// Find the `top_k` users most similar to `user_id` by profile cosine,
/// descending. Excludes the user themself, users with empty profiles, and
/// zero-similarity pairs. Ties keep registration order (stable sort).
#[must_use]
pub(crate) fn find_similar_users<'a>(
    user_id: &str,
    catalog: &'a CatalogStore,
    profiles: &FxHashMap<String, TermWeights>,
    top_k: usize,
) -> Vec<(&'a str, f64)> {
    let Some(profile) = profiles.get(user_id).filter(|p| !p.is_empty()) else {
        return Vec::new();
    };

    let mut similarities: Vec<(&str, f64)> = catalog
        .users()
        .iter()
        .filter(|other| other.id != user_id)
        .filter_map(|other| {
            let other_profile = profiles.get(&other.id).filter(|p| !p.is_empty())?;
            let similarity = cosine_similarity(profile, other_profile);
            (similarity > 0.0).then_some((other.id.as_str(), similarity))
        })
        .collect();

    similarities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    similarities.truncate(top_k);
    similarities
}

/// Combined collaborative score for a (user, content) pair.
///
/// User-user: sum of similarities of similar users who viewed the item,
/// capped at 1.0. Item-item: mean cosine between the item's vector and the
/// user's five most recent views (0 without history). Fused 0.6 / 0.4.
#[must_use]
pub(crate) fn collaborative_score(
    user_id: &str,
    content_id: &str,
    catalog: &CatalogStore,
    profiles: &FxHashMap<String, TermWeights>,
    content_vectors: &FxHashMap<String, TermWeights>,
) -> f64 {
    let mut user_user = 0.0;
    for (similar_id, similarity) in
        find_similar_users(user_id, catalog, profiles, SIMILAR_USER_POOL)
    {
        let viewed = catalog
            .user(similar_id)
            .is_some_and(|u| u.viewed.iter().any(|id| id == content_id));
        if viewed {
            user_user += similarity;
        }
    }
    user_user = user_user.min(1.0);

    let empty = TermWeights::default();
    let target_vector = content_vectors.get(content_id).unwrap_or(&empty);

    let mut item_item = 0.0;
    if let Some(user) = catalog.user(user_id) {
        let recent: Vec<&String> = user
            .viewed
            .iter()
            .rev()
            .take(RECENT_VIEW_WINDOW)
            .collect();
        if !recent.is_empty() {
            let total: f64 = recent
                .iter()
                .map(|viewed_id| {
                    content_vectors
                        .get(viewed_id.as_str())
                        .map_or(0.0, |viewed_vector| {
                            cosine_similarity(viewed_vector, target_vector)
                        })
                })
                .sum();
            item_item = total / recent.len() as f64;
        }
    }

    user_user * 0.6 + item_item * 0.4
}
