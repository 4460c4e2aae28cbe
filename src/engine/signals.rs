//! Auxiliary per-content and per-user scalar signals: quality, trending,
//! time decay, context boost, and interest match.
//!
//! Every function here is pure in `now`/context so the signals are
//! unit-testable without a clock shim.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};

use super::catalog::{Content, User};
use super::interaction::InteractionLog;
use super::similarity::{jaccard_similarity, tag_set};

/// Request-time context for contextual boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecContext {
    /// Hour of day, 0-23.
    pub hour: u32,
    pub is_weekend: bool,
}

impl RecContext {
    /// Context derived from the local wall clock.
    #[must_use]
    pub fn current() -> Self {
        let now = Local::now();
        Self {
            hour: now.hour(),
            is_weekend: now.weekday().num_days_from_monday() >= 5,
        }
    }
}

/// Engagement-based quality in `[0.3, 1.0]`, or the 0.5 neutral prior for
/// items that have never been viewed.
#[must_use]
pub(crate) fn quality_score(content: &Content) -> f64 {
    if content.view_count == 0 {
        return 0.5;
    }
    let engagement = (content.like_count as f64 + 2.0 * content.share_count as f64)
        / content.view_count as f64;
    (engagement * 2.0).clamp(0.3, 1.0)
}

/// Weighted interaction volume over the trailing window, normalized by 100
/// and capped at 1.0. Scans the full log filtered by content id; O(total
/// interactions) per call.
#[must_use]
pub(crate) fn trending_score(
    content_id: &str,
    log: &InteractionLog,
    now: DateTime<Utc>,
    window_hours: i64,
) -> f64 {
    let window_seconds = window_hours * 3600;
    let recent_weight: f64 = log
        .iter()
        .filter(|interaction| interaction.content_id == content_id)
        .filter(|interaction| {
            let elapsed = (now - interaction.timestamp).num_seconds();
            (0..=window_seconds).contains(&elapsed)
        })
        .map(|interaction| interaction.kind.trending_weight())
        .sum();

    (recent_weight / 100.0).min(1.0)
}

/// Exponential interest decay by whole days of inactivity, floored at 0.5.
#[must_use]
pub(crate) fn time_decay(last_active: DateTime<Utc>, now: DateTime<Utc>, factor: f64) -> f64 {
    let days_inactive = (now - last_active).num_days().max(0);
    factor.powi(days_inactive as i32).max(0.5)
}

/// Multiplicative context boost, baseline 1.0.
///
/// Evening entertainment ×1.2, morning news ×1.15, weekend leisure ×1.1;
/// the boosts compose independently.
#[must_use]
pub(crate) fn context_boost(
    content: &Content,
    context: RecContext,
    leisure_categories: &[String],
) -> f64 {
    let mut boost = 1.0;
    let has_tag = |tag: &str| content.tags.iter().any(|t| t == tag);

    if (18..=23).contains(&context.hour) && has_tag("entertainment") {
        boost *= 1.2;
    }
    if (6..=12).contains(&context.hour) && has_tag("news") {
        boost *= 1.15;
    }
    if context.is_weekend {
        let category = content.category.to_lowercase();
        if leisure_categories.iter().any(|c| *c == category) {
            boost *= 1.1;
        }
    }
    boost
}

/// Interest match: tag Jaccard (0.75) plus category substring match (0.25),
/// floored to 0.05 so no item is excluded by interest mismatch alone.
#[must_use]
pub(crate) fn interest_match(user: &User, content: &Content) -> f64 {
    let interests = tag_set(&user.interests);
    let tags = tag_set(&content.tags);
    let jaccard = jaccard_similarity(&interests, &tags);

    let category = content.category.to_lowercase();
    let category_match = if interests
        .iter()
        .any(|interest| category.contains(interest) || interest.contains(category.as_str()))
    {
        1.0
    } else {
        0.0
    };

    let combined = jaccard * 0.75 + category_match * 0.25;
    if combined == 0.0 { 0.05 } else { combined }
}
