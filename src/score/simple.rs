use crate::score::{Consumed, Scorer};
use crate::weight::Weight;

/// Constant-valued scorer covering the three edge classes.
///
/// Built through one of [`SimpleScorer::substitution`],
/// [`SimpleScorer::gap`] or [`SimpleScorer::freeride`] and passed to the
/// aligner slot of the same class.
#[derive(Clone, Copy, Debug)]
pub struct SimpleScorer<W> {
    rule: Rule<W>,
}

#[derive(Clone, Copy, Debug)]
enum Rule<W> {
    Substitution { hit: W, miss: W },
    Gap(W),
    Freeride,
}

impl<W: Weight> SimpleScorer<W> {
    /// Scores `hit` when the two elements compare equal, `miss` otherwise.
    pub fn substitution(hit: W, miss: W) -> Self {
        Self {
            rule: Rule::Substitution { hit, miss },
        }
    }

    /// Scores every gap edge with `cost`.
    pub fn gap(cost: W) -> Self {
        Self {
            rule: Rule::Gap(cost),
        }
    }

    /// Scores every freeride edge with zero.
    pub fn freeride() -> Self {
        Self {
            rule: Rule::Freeride,
        }
    }
}

impl<T: Copy + Eq, W: Weight> Scorer<T, T> for SimpleScorer<W> {
    type Weight = W;

    fn score(&self, down: Option<Consumed<T>>, right: Option<Consumed<T>>) -> W {
        match self.rule {
            Rule::Substitution { hit, miss } => match (down, right) {
                (Some((_, a)), Some((_, b))) if a == b => hit,
                (Some(_), Some(_)) => miss,
                _ => {
                    debug_assert!(false, "substitution scorer fed a non-substitution edge");
                    W::zero()
                }
            },
            Rule::Gap(cost) => cost,
            Rule::Freeride => W::zero(),
        }
    }
}

// ensure the scorer stays a plain value type
#[cfg(test)]
static_assertions::assert_impl_all!(SimpleScorer<i64>: Copy, Clone, Send, Sync);
