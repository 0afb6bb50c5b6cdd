//! Largest-remainder rounding of category shares.

use tracing::warn;

/// Turn category counts into integer percentages that sum to exactly 100.
///
/// Each share is floored, then the points lost to flooring are handed out
/// one at a time to the categories with the largest fractional parts. Ties
/// go to the lower index. Returns all zeros when `total` is zero.
///
/// `total` is expected to equal the sum of `counts`. When it does not, the
/// sum of `counts` is used instead so the result still partitions 100.
pub fn reconcile_percentages<const N: usize>(counts: [u64; N], total: u64) -> [u64; N] {
    let sum: u64 = counts.iter().sum();
    let base = if sum == total {
        total
    } else {
        warn!(total, sum, "category counts do not add up to total; using their sum");
        sum
    };
    if base == 0 {
        return [0; N];
    }

    // Shares are compared as exact fractions over the common denominator `base`.
    let mut floored = counts.map(|count| count * 100 / base);
    let fractions = counts.map(|count| count * 100 % base);
    let assigned: u64 = floored.iter().sum();
    let remainder = 100u64.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..N).collect();
    // Stable sort keeps first-seen order among equal fractions.
    order.sort_by(|&a, &b| fractions[b].cmp(&fractions[a]));
    for &index in order.iter().take(remainder) {
        if let Some(slot) = floored.get_mut(index) {
            *slot += 1;
        }
    }
    floored
}
