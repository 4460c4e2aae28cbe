//! Probabilistic serendipity injection.
//!
//! With fixed probability per recommendation call, the last diversified
//! slot is replaced by a uniform pick from the "next tier" of the scored
//! pool — the slice just below the requested cutoff. The random source is
//! injected so tests can force the branch deterministically.

use rand::Rng;

use super::scoring::{Reason, ScoredContent};

/// Maybe replace the last item of `recommendations` with a surprise from
/// `pool[num..min(2*num, pool.len())]`, relabeled [`Reason::Serendipity`].
///
/// Returns whether an injection happened (telemetry hook).
pub(crate) fn inject<R: Rng + ?Sized>(
    rng: &mut R,
    chance: f64,
    recommendations: &mut Vec<ScoredContent>,
    pool: &[ScoredContent],
    num: usize,
) -> bool {
    if rng.random::<f64>() > chance {
        return false;
    }
    if pool.len() <= num {
        return false;
    }

    let tier = &pool[num..(2 * num).min(pool.len())];
    if tier.is_empty() {
        return false;
    }

    let mut surprise = tier[rng.random_range(0..tier.len())].clone();
    surprise.reason = Reason::Serendipity;
    recommendations.pop();
    recommendations.push(surprise);
    true
}
