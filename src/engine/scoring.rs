//! Multi-factor score fusion and recommendation reasons.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog::{Content, User};
use super::similarity::cosine_similarity;
use super::vectorize::TermWeights;

/// Candidates below this final score are dropped before ranking.
pub(crate) const CANDIDATE_SCORE_FLOOR: f64 = 0.10;

/// Fixed display-range calibration so typical top matches land near
/// 0.5-0.9 instead of 0.2-0.3.
const SCORE_RESCALE: f64 = 3.0;

/// Diagnostic label attached to each recommendation; never feeds back into
/// scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    HighlyRecommended,
    Trending,
    HighQuality,
    SimilarToLiked,
    Serendipity,
    Recommended,
}

/// A scored, reasoned candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredContent {
    #[serde(flatten)]
    pub content: Content,
    pub score: f64,
    pub reason: Reason,
}

/// Raw per-item signals feeding the fusion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SignalBundle {
    pub(crate) interest_match: f64,
    pub(crate) content_based: f64,
    pub(crate) collaborative: f64,
    pub(crate) trending: f64,
    pub(crate) quality: f64,
    pub(crate) time_decay: f64,
    pub(crate) context_boost: f64,
}

/// Fuse all signals into one bounded score.
///
/// `base = interest*0.40 + content*0.35 + collaborative*0.20 + trend*0.05`,
/// dampened by quality (`0.7 + 0.3q`), multiplied by decay and context
/// boost, rescaled ×3 and clamped to `[0, 1]`.
#[must_use]
pub(crate) fn fuse_score(signals: &SignalBundle) -> f64 {
    // Interest match is always >= 0.05 by construction; a negative value
    // would mark the item irrelevant and short-circuits to near-zero.
    if signals.interest_match < 0.0 {
        return 0.01;
    }

    let mut base = signals.interest_match * 0.40
        + signals.content_based * 0.35
        + signals.collaborative * 0.20
        + signals.trending * 0.05;

    base *= 0.7 + signals.quality * 0.3;

    let final_score = base * signals.time_decay * signals.context_boost;
    (final_score * SCORE_RESCALE).clamp(0.0, 1.0)
}

/// Assign the diagnostic reason, in priority order.
#[must_use]
pub(crate) fn recommendation_reason(
    user: &User,
    content: &Content,
    score: f64,
    content_vectors: &FxHashMap<String, TermWeights>,
) -> Reason {
    if score > 0.8 {
        Reason::HighlyRecommended
    } else if content.trending_score > 0.7 {
        Reason::Trending
    } else if content.quality_score > 0.8 {
        Reason::HighQuality
    } else if max_similarity_to_liked(user, &content.id, content_vectors) > 0.7 {
        Reason::SimilarToLiked
    } else {
        Reason::Recommended
    }
}

/// Highest cosine similarity between a content item and anything the user
/// has liked; 0 without likes.
fn max_similarity_to_liked(
    user: &User,
    content_id: &str,
    content_vectors: &FxHashMap<String, TermWeights>,
) -> f64 {
    let empty = TermWeights::default();
    let target = content_vectors.get(content_id).unwrap_or(&empty);
    user.liked
        .iter()
        .map(|liked_id| {
            content_vectors
                .get(liked_id.as_str())
                .map_or(0.0, |liked| cosine_similarity(target, liked))
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    fn neutral_signals() -> SignalBundle {
        SignalBundle {
            interest_match: 0.05,
            content_based: 0.0,
            collaborative: 0.0,
            trending: 0.0,
            quality: 0.5,
            time_decay: 1.0,
            context_boost: 1.0,
        }
    }

    #[test]
    fn fused_score_is_bounded() {
        let maxed = SignalBundle {
            interest_match: 1.0,
            content_based: 1.0,
            collaborative: 1.0,
            trending: 1.0,
            quality: 1.0,
            time_decay: 1.0,
            context_boost: 1.32,
        };
        assert!((fuse_score(&maxed) - 1.0).abs() < f64::EPSILON);
        let score = fuse_score(&neutral_signals());
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn negative_interest_match_short_circuits() {
        let mut signals = neutral_signals();
        signals.interest_match = -1.0;
        assert!((fuse_score(&signals) - 0.01).abs() < f64::EPSILON);
    }

    #[test]
    fn fusion_matches_hand_computed_value() {
        let signals = SignalBundle {
            interest_match: 0.8,
            content_based: 0.5,
            collaborative: 0.2,
            trending: 0.1,
            quality: 0.6,
            time_decay: 0.95,
            context_boost: 1.2,
        };
        // base = 0.8*0.40 + 0.5*0.35 + 0.2*0.20 + 0.1*0.05 = 0.54
        // * (0.7 + 0.18) = 0.4752; * 0.95 * 1.2 = 0.541728; *3 -> 1.0 (clamped)
        assert!((fuse_score(&signals) - 1.0).abs() < 1e-9);

        let weak = SignalBundle {
            interest_match: 0.05,
            content_based: 0.1,
            collaborative: 0.0,
            trending: 0.0,
            quality: 0.5,
            time_decay: 1.0,
            context_boost: 1.0,
        };
        // base = 0.02 + 0.035 = 0.055; * 0.85 = 0.04675; *3 = 0.14025
        assert!((fuse_score(&weak) - 0.14025).abs() < 1e-9);
    }

    fn content(id: &str, trending: f64, quality: f64) -> Content {
        let mut c = Content::new(id, "Title", "tech", &[], "desc", Utc::now());
        c.trending_score = trending;
        c.quality_score = quality;
        c
    }

    #[rstest]
    #[case(0.9, 0.0, 0.0, Reason::HighlyRecommended)]
    #[case(0.5, 0.8, 0.0, Reason::Trending)]
    #[case(0.5, 0.1, 0.9, Reason::HighQuality)]
    #[case(0.5, 0.1, 0.5, Reason::Recommended)]
    fn reason_priority_order(
        #[case] score: f64,
        #[case] trending: f64,
        #[case] quality: f64,
        #[case] expected: Reason,
    ) {
        let user = User::new("u1", &[], Utc::now());
        let item = content("c1", trending, quality);
        let vectors = FxHashMap::default();
        assert_eq!(
            recommendation_reason(&user, &item, score, &vectors),
            expected
        );
    }

    #[test]
    fn similar_to_liked_wins_over_plain_recommended() {
        let mut user = User::new("u1", &[], Utc::now());
        user.liked.push("liked".to_string());
        let item = content("c1", 0.0, 0.5);

        let mut vectors: FxHashMap<String, TermWeights> = FxHashMap::default();
        let vector: TermWeights = [("rust".to_string(), 1.0)].into_iter().collect();
        vectors.insert("c1".to_string(), vector.clone());
        vectors.insert("liked".to_string(), vector);

        assert_eq!(
            recommendation_reason(&user, &item, 0.5, &vectors),
            Reason::SimilarToLiked
        );
    }

    #[test]
    fn reason_serializes_snake_case() {
        let json = serde_json::to_string(&Reason::HighlyRecommended).expect("serialize");
        assert_eq!(json, "\"highly_recommended\"");
    }
}
