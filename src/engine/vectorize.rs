//! TF-IDF vectorization of content and user text.
//!
//! Vectors are sparse term-weight maps. Tag sets are deliberately excluded:
//! exact categorical overlap is handled by Jaccard similarity, not folded
//! into the continuous text signal.

use rustc_hash::FxHashMap;

use super::catalog::{CatalogStore, Content, User};

/// Sparse term-weight vector.
pub type TermWeights = FxHashMap<String, f64>;

/// Build the TF-IDF vector for one content item against the current corpus.
///
/// Document terms are the lowercased category token plus the
/// whitespace-delimited description words. The vector reflects the corpus
/// at build time; it is not refreshed when later items arrive.
#[must_use]
pub(crate) fn content_vector(content: &Content, corpus: &[Content]) -> TermWeights {
    let mut terms = vec![content.category.to_lowercase()];
    terms.extend(content.description.split_whitespace().map(str::to_string));
    weigh_terms(&terms, corpus)
}

/// Build a user's TF-IDF profile: interests plus the category and
/// description words of every viewed item, full rebuild each time.
#[must_use]
pub(crate) fn user_profile(user: &User, catalog: &CatalogStore) -> TermWeights {
    let mut terms = user.interests.clone();
    for content_id in &user.viewed {
        if let Some(content) = catalog.content(content_id) {
            terms.push(content.category.to_lowercase());
            terms.extend(content.description.split_whitespace().map(str::to_string));
        }
    }
    weigh_terms(&terms, catalog.contents())
}

/// `tf * idf` over a bag of terms.
///
/// `idf(term) = ln((|corpus| + 1) / (docs_containing + 1)) + 1`, where
/// `docs_containing` is a case-insensitive substring test against raw
/// descriptions. That is an approximation of a per-term document count and
/// is kept verbatim for score parity with the historical behavior.
fn weigh_terms(terms: &[String], corpus: &[Content]) -> TermWeights {
    if terms.is_empty() {
        return TermWeights::default();
    }

    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for term in terms {
        *counts.entry(term.as_str()).or_insert(0) += 1;
    }

    let total_terms = terms.len() as f64;
    let corpus_size = corpus.len() as f64;

    counts
        .into_iter()
        .map(|(term, count)| {
            let tf = count as f64 / total_terms;
            let docs_containing = corpus
                .iter()
                .filter(|c| c.description.contains(term))
                .count() as f64;
            let idf = ((corpus_size + 1.0) / (docs_containing + 1.0)).ln() + 1.0;
            (term.to_string(), tf * idf)
        })
        .collect()
}
