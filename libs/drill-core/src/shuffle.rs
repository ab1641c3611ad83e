//! Randomized-order permutation used whenever words leave deck order.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return a shuffled copy of `items`. The input is left untouched and the
/// output always has the same elements and length.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
