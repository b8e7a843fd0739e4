use core::marker::PhantomData;

use crate::score::{Consumed, Scorer};
use crate::weight::Weight;

/// Adapter promoting a scorer's weight into a wider type.
///
/// All scorers handed to one aligner call must agree on a weight type;
/// when they do not, wrap the narrower ones so every output lands in the
/// widest type. Widening goes through `From`, so a lossy conversion will
/// not compile.
///
/// ```
/// use pairalign::score::{Scorer, SimpleScorer, WideningScorer};
///
/// let narrow = SimpleScorer::substitution(1i8, -1);
/// let wide = WideningScorer::<_, i64>::new(&narrow);
/// assert_eq!(wide.score(Some((0, b'a')), Some((0, b'a'))), 1i64);
/// ```
pub struct WideningScorer<'a, S, W> {
    inner: &'a S,
    _weight: PhantomData<fn() -> W>,
}

impl<'a, S, W> WideningScorer<'a, S, W> {
    pub fn new(inner: &'a S) -> Self {
        Self {
            inner,
            _weight: PhantomData,
        }
    }
}

impl<'a, S, W> Clone for WideningScorer<'a, S, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S, W> Copy for WideningScorer<'a, S, W> {}

impl<'a, D, R, S, W> Scorer<D, R> for WideningScorer<'a, S, W>
where
    S: Scorer<D, R>,
    W: Weight + From<S::Weight>,
{
    type Weight = W;

    fn score(&self, down: Option<Consumed<D>>, right: Option<Consumed<R>>) -> W {
        W::from(self.inner.score(down, right))
    }
}

#[cfg(test)]
mod tests {
    use super::WideningScorer;
    use crate::score::{Scorer, SimpleScorer};

    #[test]
    fn widens_through_from() {
        let narrow = SimpleScorer::gap(-3i8);
        let wide = WideningScorer::<_, i32>::new(&narrow);
        assert_eq!(wide.score(Some((0, b'q')), None), -3i32);
    }
}
