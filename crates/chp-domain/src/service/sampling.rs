//! Random selection of sampled-deficient checklist items

use std::collections::BTreeSet;

use rand::Rng;

use crate::model::{DeficiencyRate, CHECKLIST_LEN};

/// Source of uniform random indices.
///
/// Kept behind a trait so callers can pass a seeded or scripted source.
pub trait IndexSource {
    /// An index in `0..bound`; `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Adapter from any `rand` generator
pub struct RngIndexSource<R>(pub R);

impl<R: Rng> IndexSource for RngIndexSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Pick `rate.sample_size()` distinct checklist indices without replacement.
///
/// Partial Fisher-Yates over the 40 indices; the `i`th draw asks the source
/// for an offset into the remaining `40 - i` candidates.
pub fn sample_deficient_items<S: IndexSource + ?Sized>(
    rate: DeficiencyRate,
    source: &mut S,
) -> BTreeSet<usize> {
    let count = rate.sample_size().min(CHECKLIST_LEN);
    let mut pool: Vec<usize> = (0..CHECKLIST_LEN).collect();
    for i in 0..count {
        let remaining = CHECKLIST_LEN - i;
        let offset = source.next_index(remaining).min(remaining - 1);
        pool.swap(i, i + offset);
    }
    pool.into_iter().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Scripted(Vec<usize>);

    impl IndexSource for Scripted {
        fn next_index(&mut self, _bound: usize) -> usize {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_no_rate_draws_nothing() {
        let mut source = Scripted(vec![]);
        assert!(sample_deficient_items(DeficiencyRate::None, &mut source).is_empty());
    }

    #[test]
    fn test_scripted_source_gives_exact_indices() {
        let mut source = Scripted(vec![5, 0]);
        let picked = sample_deficient_items(DeficiencyRate::FivePercent, &mut source);
        assert_eq!(picked, BTreeSet::from([1, 5]));

        let mut source = Scripted(vec![10, 10, 10, 10]);
        let picked = sample_deficient_items(DeficiencyRate::TenPercent, &mut source);
        assert_eq!(picked, BTreeSet::from([10, 11, 12, 13]));
    }

    #[test]
    fn test_out_of_range_offsets_are_clamped() {
        let mut source = Scripted(vec![1000]);
        let picked = sample_deficient_items(DeficiencyRate::ThreePercent, &mut source);
        assert_eq!(picked, BTreeSet::from([39]));
    }

    #[test]
    fn test_seeded_rng_yields_distinct_in_range_indices() {
        let mut source = RngIndexSource(StdRng::seed_from_u64(108));
        for _ in 0..200 {
            let picked = sample_deficient_items(DeficiencyRate::TenPercent, &mut source);
            assert_eq!(picked.len(), 4);
            assert!(picked.iter().all(|&i| i < CHECKLIST_LEN));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = RngIndexSource(StdRng::seed_from_u64(7));
        let mut b = RngIndexSource(StdRng::seed_from_u64(7));
        assert_eq!(
            sample_deficient_items(DeficiencyRate::TenPercent, &mut a),
            sample_deficient_items(DeficiencyRate::TenPercent, &mut b)
        );
    }
}
