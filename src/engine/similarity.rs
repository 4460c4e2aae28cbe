//! Pure similarity functions: cosine over term-weight maps, Jaccard over
//! tag sets.

use std::collections::HashSet;

use super::vectorize::TermWeights;

/// Cosine similarity between two sparse vectors, in `[0, 1]`.
///
/// Returns 0 when either vector is empty or has zero magnitude.
#[must_use]
pub(crate) fn cosine_similarity(a: &TermWeights, b: &TermWeights) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Iterate the smaller map; terms absent from either side contribute 0.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, weight)| large.get(term).map(|other| weight * other))
        .sum();

    let magnitude_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let magnitude_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`, defined as 0 on an empty union.
#[must_use]
pub(crate) fn jaccard_similarity(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Borrow a tag slice as a set for Jaccard comparisons.
#[must_use]
pub(crate) fn tag_set(tags: &[String]) -> HashSet<&str> {
    tags.iter().map(String::as_str).collect()
}
