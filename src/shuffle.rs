//! Answer-order shuffle
//!
//! The two answer buttons are shown in random order so the correct one
//! is not always on the left. The RNG is injected: the UI seeds a
//! `Pcg32` from the clock, tests seed it with a constant for
//! reproducible layouts. Returned values are indices into the
//! challenge's original `pairs` array, so `submit_answer` always
//! receives config-order indices no matter the display order.

use rand::Rng;
use rand::seq::SliceRandom;

/// Display order for `len` answer options (Fisher-Yates).
pub fn display_order<R: Rng>(rng: &mut R, len: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_order_is_a_permutation() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let mut order = display_order(&mut rng, 2);
            order.sort_unstable();
            assert_eq!(order, vec![0, 1]);
        }
    }

    #[test]
    fn test_same_seed_same_order() {
        let orders_a: Vec<_> = {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..20).map(|_| display_order(&mut rng, 2)).collect()
        };
        let orders_b: Vec<_> = {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..20).map(|_| display_order(&mut rng, 2)).collect()
        };
        assert_eq!(orders_a, orders_b);
    }

    #[test]
    fn test_both_orders_occur() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(display_order(&mut rng, 2));
        }
        assert!(seen.contains(&vec![0, 1]));
        assert!(seen.contains(&vec![1, 0]));
    }
}
