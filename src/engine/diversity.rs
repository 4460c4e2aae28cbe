//! Greedy diversity-aware re-ranking.
//!
//! The greedy pick order is observable output; do not replace it with a
//! globally optimal diverse subset.

use std::collections::HashSet;

use super::scoring::ScoredContent;
use super::similarity::{jaccard_similarity, tag_set};

/// Reorder a score-sorted candidate list to balance relevance against
/// category/tag diversity. Returns the input unchanged when it already
/// fits in `num` slots.
///
/// Seeds with the top-scored item, then repeatedly moves the remaining
/// candidate with the highest `score*(1-w) + diversity*w` into the
/// selection. Ties go to the earliest candidate.
#[must_use]
pub(crate) fn rerank(
    scored: Vec<ScoredContent>,
    num: usize,
    diversity_weight: f64,
) -> Vec<ScoredContent> {
    if scored.len() <= num || num == 0 {
        return scored;
    }

    let mut remaining = scored;
    let mut selected = vec![remaining.remove(0)];

    while selected.len() < num && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_combined = -1.0;
        for (idx, item) in remaining.iter().enumerate() {
            let diversity = diversity_score(item, &selected);
            let combined =
                item.score * (1.0 - diversity_weight) + diversity * diversity_weight;
            if combined > best_combined {
                best_combined = combined;
                best_idx = idx;
            }
        }
        selected.push(remaining.remove(best_idx));
    }

    selected
}

/// Diversity of a candidate against the already-selected set: mean of
/// category novelty (0.5 when unseen, 0.0 otherwise) and average
/// `1 - jaccard(tags)` over the selected items.
fn diversity_score(item: &ScoredContent, selected: &[ScoredContent]) -> f64 {
    if selected.is_empty() {
        return 1.0;
    }

    let categories: HashSet<&str> = selected
        .iter()
        .map(|s| s.content.category.as_str())
        .collect();
    let category_diversity = if categories.contains(item.content.category.as_str()) {
        0.0
    } else {
        0.5
    };

    let item_tags = tag_set(&item.content.tags);
    let tag_diversity: f64 = selected
        .iter()
        .map(|s| 1.0 - jaccard_similarity(&item_tags, &tag_set(&s.content.tags)))
        .sum::<f64>()
        / selected.len() as f64;

    (category_diversity + tag_diversity) / 2.0
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::super::catalog::Content;
    use super::super::scoring::Reason;
    use super::*;

    fn candidate(id: &str, category: &str, tags: &[&str], score: f64) -> ScoredContent {
        let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        ScoredContent {
            content: Content::new(id, "Title", category, &tags, "", Utc::now()),
            score,
            reason: Reason::Recommended,
        }
    }

    #[test]
    fn short_lists_pass_through_unchanged() {
        let scored = vec![
            candidate("a", "tech", &["rust"], 0.9),
            candidate("b", "tech", &["go"], 0.8),
        ];
        let reranked = rerank(scored.clone(), 5, 0.3);
        assert_eq!(reranked, scored);
    }

    #[test]
    fn top_item_always_seeds_the_selection() {
        let scored = vec![
            candidate("a", "tech", &["rust"], 0.9),
            candidate("b", "music", &["jazz"], 0.85),
            candidate("c", "tech", &["rust"], 0.8),
        ];
        let reranked = rerank(scored, 2, 0.3);
        assert_eq!(reranked[0].content.id, "a");
    }

    #[test]
    fn diverse_category_beats_marginally_higher_score() {
        // "b" and "c" score the same, but "c" brings a new category and
        // disjoint tags, so the diversity term promotes it.
        let scored = vec![
            candidate("a", "tech", &["rust", "systems"], 0.9),
            candidate("b", "tech", &["rust", "systems"], 0.6),
            candidate("c", "music", &["jazz"], 0.6),
        ];
        let reranked = rerank(scored, 2, 0.3);
        assert_eq!(reranked[1].content.id, "c");
    }

    #[test]
    fn selection_size_and_uniqueness_hold() {
        let scored: Vec<ScoredContent> = (0..10)
            .map(|i| {
                candidate(
                    &format!("c{i}"),
                    if i % 2 == 0 { "tech" } else { "music" },
                    &[],
                    1.0 - 0.05 * i as f64,
                )
            })
            .collect();
        let reranked = rerank(scored, 4, 0.3);
        assert_eq!(reranked.len(), 4);

        let ids: HashSet<&str> = reranked.iter().map(|r| r.content.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn ties_resolve_to_earliest_candidate() {
        let scored = vec![
            candidate("a", "tech", &["x"], 0.9),
            candidate("b", "tech", &["x"], 0.5),
            candidate("c", "tech", &["x"], 0.5),
        ];
        let reranked = rerank(scored, 2, 0.3);
        assert_eq!(reranked[1].content.id, "b");
    }
}
