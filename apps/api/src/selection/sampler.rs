use crate::selection::rng::SeededRng;

/// Fisher–Yates shuffle of a copy of `items`, walking from the last index down to 1.
pub fn seeded_shuffle<T: Clone>(items: &[T], rng: &mut SeededRng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
        shuffled.swap(i, j);
    }
    shuffled
}

/// Draws up to `n` items without replacement, in shuffled order.
/// Asking for more than `items.len()` returns every item, permuted.
pub fn seeded_sample<T: Clone>(items: &[T], n: usize, rng: &mut SeededRng) -> Vec<T> {
    let mut shuffled = seeded_shuffle(items, rng);
    shuffled.truncate(n);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_shuffle_reference_permutation() {
        let items: Vec<u32> = (0..10).collect();
        let mut rng = SeededRng::from_key("2026-01-16-women-v3");
        assert_eq!(
            seeded_shuffle(&items, &mut rng),
            vec![7, 2, 0, 9, 1, 3, 5, 4, 6, 8]
        );
    }

    #[test]
    fn test_sample_does_not_mutate_input() {
        let items = vec!["a", "b", "c", "d"];
        let snapshot = items.clone();
        let mut rng = SeededRng::from_key("immutability");
        let _ = seeded_sample(&items, 2, &mut rng);
        assert_eq!(items, snapshot);
    }

    #[test]
    fn test_sample_is_prefix_of_shuffle() {
        let items: Vec<u32> = (0..20).collect();
        let shuffled = seeded_shuffle(&items, &mut SeededRng::from_key("prefix"));
        let sampled = seeded_sample(&items, 5, &mut SeededRng::from_key("prefix"));
        assert_eq!(sampled, shuffled[..5].to_vec());
    }

    #[test]
    fn test_empty_and_single_inputs() {
        let mut rng = SeededRng::from_key("edge");
        assert!(seeded_sample::<u8>(&[], 3, &mut rng).is_empty());
        assert_eq!(seeded_sample(&[42], 3, &mut rng), vec![42]);
        assert!(seeded_sample(&[1, 2, 3], 0, &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn sample_has_no_duplicates(len in 0usize..200, n in 0usize..250, key in "[a-z0-9-]{0,24}") {
            let items: Vec<usize> = (0..len).collect();
            let mut rng = SeededRng::from_key(&key);
            let sampled = seeded_sample(&items, n, &mut rng);

            prop_assert_eq!(sampled.len(), n.min(len));
            let unique: HashSet<_> = sampled.iter().collect();
            prop_assert_eq!(unique.len(), sampled.len());
            prop_assert!(sampled.iter().all(|x| *x < len));
        }

        #[test]
        fn oversized_sample_is_a_permutation(len in 0usize..100, extra in 1usize..50, key in "[a-z0-9-]{0,24}") {
            let items: Vec<usize> = (0..len).collect();
            let mut rng = SeededRng::from_key(&key);
            let mut sampled = seeded_sample(&items, len + extra, &mut rng);
            sampled.sort_unstable();
            prop_assert_eq!(sampled, items);
        }

        #[test]
        fn same_seed_same_sample(len in 0usize..100, n in 0usize..100, key in "[a-z0-9-]{0,24}") {
            let items: Vec<usize> = (0..len).collect();
            let a = seeded_sample(&items, n, &mut SeededRng::from_key(&key));
            let b = seeded_sample(&items, n, &mut SeededRng::from_key(&key));
            prop_assert_eq!(a, b);
        }
    }
}
