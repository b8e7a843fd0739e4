use core::cmp::Ordering;
use core::ops::{Add, Sub};

use crate::score::{Consumed, Scorer};
use crate::weight::{TotalOrd, Weight};

/// A weight that tracks how many elements of each sequence the path it
/// accumulates over has consumed, and compares as strictly less than any
/// within-limit weight once either count passes its limit.
///
/// Rotational alignment fits `right` against a doubled `down`; the gate is
/// what rejects partial paths that consume more than one copy of `down`
/// (or more than all of `right`) without touching the backtracker at all:
/// the argmax simply never picks an over-consuming predecessor when a
/// within-limit one exists.
///
/// Addition and subtraction combine the real weights and the consumption
/// counts; the limits are carried inline and merged by `max`, so the zero
/// weight (all fields zero) composes with any gated weight. This is not a
/// numeric type: ordering is a lexicographic-but-asymmetric predicate, and
/// under floating-point real weights the gate itself stays exact while the
/// real-weight comparisons inherit ordinary float rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GatedWeight<W> {
    real: W,
    down_consumed: usize,
    right_consumed: usize,
    down_limit: usize,
    right_limit: usize,
}

impl<W: Weight> GatedWeight<W> {
    /// The real accumulated weight, with the gate stripped.
    pub fn real(self) -> W {
        self.real
    }

    fn exceeded(&self) -> bool {
        self.down_consumed > self.down_limit || self.right_consumed > self.right_limit
    }
}

impl<W: Weight> Add for GatedWeight<W> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            down_consumed: self.down_consumed + rhs.down_consumed,
            right_consumed: self.right_consumed + rhs.right_consumed,
            down_limit: self.down_limit.max(rhs.down_limit),
            right_limit: self.right_limit.max(rhs.right_limit),
        }
    }
}

impl<W: Weight> Sub for GatedWeight<W> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            real: self.real - rhs.real,
            down_consumed: self.down_consumed.saturating_sub(rhs.down_consumed),
            right_consumed: self.right_consumed.saturating_sub(rhs.right_consumed),
            down_limit: self.down_limit.max(rhs.down_limit),
            right_limit: self.right_limit.max(rhs.right_limit),
        }
    }
}

impl<W: Weight> TotalOrd for GatedWeight<W> {
    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.exceeded(), other.exceeded()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => self.real.total_cmp(&other.real),
        }
    }
}

impl<W: Weight> Weight for GatedWeight<W> {
    fn zero() -> Self {
        Self {
            real: W::zero(),
            down_consumed: 0,
            right_consumed: 0,
            down_limit: 0,
            right_limit: 0,
        }
    }

    fn is_finite(&self) -> bool {
        self.real.is_finite()
    }
}

/// Scorer wrapper that promotes an underlying weight into a
/// [`GatedWeight`], marking one unit of consumption per present side.
pub struct GatingScorer<'a, S> {
    inner: &'a S,
    down_limit: usize,
    right_limit: usize,
}

impl<'a, S> GatingScorer<'a, S> {
    pub fn new(inner: &'a S, down_limit: usize, right_limit: usize) -> Self {
        Self {
            inner,
            down_limit,
            right_limit,
        }
    }
}

impl<'a, S> Clone for GatingScorer<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S> Copy for GatingScorer<'a, S> {}

impl<'a, D, R, S> Scorer<D, R> for GatingScorer<'a, S>
where
    S: Scorer<D, R>,
{
    type Weight = GatedWeight<S::Weight>;

    fn score(&self, down: Option<Consumed<D>>, right: Option<Consumed<R>>) -> Self::Weight {
        GatedWeight {
            down_consumed: usize::from(down.is_some()),
            right_consumed: usize::from(right.is_some()),
            real: self.inner.score(down, right),
            down_limit: self.down_limit,
            right_limit: self.right_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use super::{GatedWeight, GatingScorer};
    use crate::score::{Scorer, SimpleScorer};
    use crate::weight::{TotalOrd, Weight};

    fn gated(real: i32, down: usize, right: usize) -> GatedWeight<i32> {
        let scorer = SimpleScorer::substitution(0i32, 0);
        let gating = GatingScorer::new(&scorer, 3, 2);
        // Seed a weight carrying limits (3, 2), then overwrite the counts
        // by summing unit consumptions.
        let mut acc = gating.score(Some((0, b'a')), Some((0, b'a')));
        acc = acc + GatedWeight::zero();
        acc.real = real;
        acc.down_consumed = down;
        acc.right_consumed = right;
        acc
    }

    #[test]
    fn within_limits_compares_real_weights() {
        assert_eq!(gated(5, 1, 1).total_cmp(&gated(7, 3, 2)), Ordering::Less);
        assert_eq!(gated(7, 3, 2).total_cmp(&gated(5, 0, 0)), Ordering::Greater);
    }

    #[test]
    fn exceeding_either_limit_loses_regardless_of_real_weight() {
        let over_down = gated(100, 4, 0);
        let over_right = gated(100, 0, 3);
        let modest = gated(-50, 3, 2);
        assert_eq!(over_down.total_cmp(&modest), Ordering::Less);
        assert_eq!(over_right.total_cmp(&modest), Ordering::Less);
        assert_eq!(modest.total_cmp(&over_down), Ordering::Greater);
    }

    #[test]
    fn addition_sums_counts_and_merges_limits() {
        let scorer = SimpleScorer::substitution(1i32, -1);
        let gating = GatingScorer::new(&scorer, 4, 4);
        let step = gating.score(Some((0, b'a')), Some((0, b'a')));
        let total = GatedWeight::zero() + step + step;
        assert_eq!(total.real(), 2);
        assert_eq!(total.down_consumed, 2);
        assert_eq!(total.right_consumed, 2);
        assert_eq!(total.down_limit, 4);
    }

    #[test]
    fn gap_edges_consume_one_side() {
        let scorer = SimpleScorer::<i32>::gap(-1);
        let gating = GatingScorer::new(&scorer, 4, 4);
        let step = gating.score(None, Some((2, b'z')));
        assert_eq!(step.down_consumed, 0);
        assert_eq!(step.right_consumed, 1);
    }
}
