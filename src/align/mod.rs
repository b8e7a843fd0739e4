//! Aligner entry points.
//!
//! Each function builds the graph shape for its alignment flavour, runs a
//! backtracker and maps the resulting edge path back to sequence indices.
//! The free functions address the grid with `usize`; [`Aligner`] pins a
//! narrower [`GridIndex`] when slot tables need to stay small:
//!
//! ```
//! use pairalign::align::Aligner;
//! use pairalign::score::SimpleScorer;
//!
//! let sub = SimpleScorer::substitution(1i32, 0);
//! let gap = SimpleScorer::gap(0);
//! let (_, score) = Aligner::<u8>::new()
//!     .global("panama", "banana", &sub, &gap)
//!     .unwrap();
//! assert_eq!(score, 4);
//! ```

mod error;

pub use self::error::AlignError;

use core::marker::PhantomData;

use error_stack::{Report, Result, ResultExt};

use crate::backtrack::{full_grid, SlicedBacktracker};
use crate::graph::{
    ix, AlignmentGraph, Edge, ExtendedGapGraph, FittingGraph, GlobalGraph, LocalGraph,
    OverlapGraph,
};
use crate::index::GridIndex;
use crate::score::{GatingScorer, Scorer};
use crate::seq::{RepeatSeq, Seq};
use crate::weight::Weight;

/// One alignment event: `None` for a freeride, otherwise the consumed
/// indices with `None` on the gapped side.
pub type AlignmentStep<Ix> = Option<(Option<Ix>, Option<Ix>)>;

/// An alignment: the index-pair events of a maximum-weight path, in
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alignment<Ix> {
    steps: Vec<AlignmentStep<Ix>>,
}

impl<Ix: GridIndex> Alignment<Ix> {
    pub fn steps(&self) -> &[AlignmentStep<Ix>] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlignmentStep<Ix>> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<Ix> IntoIterator for Alignment<Ix> {
    type Item = AlignmentStep<Ix>;
    type IntoIter = std::vec::IntoIter<AlignmentStep<Ix>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Aligner parameterized on the grid index width.
pub struct Aligner<Ix = usize> {
    _ix: PhantomData<fn() -> Ix>,
}

impl<Ix: GridIndex> Default for Aligner<Ix> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ix: GridIndex> Aligner<Ix> {
    pub fn new() -> Self {
        Self { _ix: PhantomData }
    }

    fn check_width(&self, down_len: usize, right_len: usize) -> Result<(), AlignError> {
        down_len
            .max(right_len)
            .checked_add(1)
            .and_then(Ix::from_usize)
            .map(|_| ())
            .ok_or_else(|| Report::new(AlignError::IndexTooNarrow))
    }

    fn check_tolerance<W: Weight>(&self, tolerance: W) -> Result<(), AlignError> {
        if tolerance.is_finite() {
            Ok(())
        } else {
            Err(Report::new(AlignError::NonFiniteTolerance))
        }
    }

    /// Global alignment: both sequences consumed end to end.
    pub fn global<D, R, Sub, Gap, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        gap: &Gap,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Gap: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        self.check_width(down.len(), right.len())?;
        let graph: GlobalGraph<'_, D, R, Sub, Gap, Ix> = GlobalGraph::new(down, right, sub, gap);
        let (path, weight) =
            full_grid::find_max_path(graph).change_context(AlignError::Backtrack)?;
        Ok((map_steps(graph, &path), weight))
    }

    /// Local alignment: the best-scoring pair of substrings.
    pub fn local<D, R, Sub, Gap, Fr, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        gap: &Gap,
        freeride: &Fr,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Gap: Scorer<D::Item, R::Item, Weight = W>,
        Fr: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        self.check_width(down.len(), right.len())?;
        let graph: LocalGraph<'_, D, R, Sub, Gap, Fr, Ix> =
            LocalGraph::new(down, right, sub, gap, freeride);
        let (path, weight) =
            full_grid::find_max_path(graph).change_context(AlignError::Backtrack)?;
        Ok((map_steps(graph, &path), weight))
    }

    /// Fitting alignment: all of `right` against a substring of `down`.
    pub fn fitting<D, R, Sub, Gap, Fr, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        gap: &Gap,
        freeride: &Fr,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Gap: Scorer<D::Item, R::Item, Weight = W>,
        Fr: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        self.check_width(down.len(), right.len())?;
        let graph: FittingGraph<'_, D, R, Sub, Gap, Fr, Ix> =
            FittingGraph::new(down, right, sub, gap, freeride);
        let (path, weight) =
            full_grid::find_max_path(graph).change_context(AlignError::Backtrack)?;
        Ok((map_steps(graph, &path), weight))
    }

    /// Overlap alignment: a suffix of `down` against a prefix of `right`.
    ///
    /// Runs the sliced backtracker; `tolerance` absorbs floating-point
    /// rounding in its internal weight-equality checks.
    pub fn overlap<D, R, Sub, Gap, Fr, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        gap: &Gap,
        freeride: &Fr,
        tolerance: W,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Gap: Scorer<D::Item, R::Item, Weight = W>,
        Fr: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        self.check_width(down.len(), right.len())?;
        self.check_tolerance(tolerance)?;
        let graph: OverlapGraph<'_, D, R, Sub, Gap, Fr, Ix> =
            OverlapGraph::new(down, right, sub, gap, freeride);
        let (path, weight) = SlicedBacktracker::new()
            .find_max_path(graph, tolerance)
            .change_context(AlignError::Backtrack)?;
        Ok((map_steps(graph, &path), weight))
    }

    /// Rotational alignment: all of `right` against the best cyclic
    /// rotation of `down`.
    ///
    /// Fits `right` against `down ⊕ down` under a consumption-gated
    /// weight, so no partial path may consume more than `|down|` doubled
    /// elements; emitted down indices are folded back into the first
    /// copy.
    pub fn rotational<D, R, Sub, Gap, Fr, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        gap: &Gap,
        freeride: &Fr,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Gap: Scorer<D::Item, R::Item, Weight = W>,
        Fr: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        let doubled = RepeatSeq::new(down, 2);
        self.check_width(doubled.len(), right.len())?;
        let gated_sub = GatingScorer::new(sub, down.len(), right.len());
        let gated_gap = GatingScorer::new(gap, down.len(), right.len());
        let gated_freeride = GatingScorer::new(freeride, down.len(), right.len());
        let graph: FittingGraph<'_, RepeatSeq<'_, D>, R, _, _, _, Ix> = FittingGraph::new(
            &doubled,
            right,
            &gated_sub,
            &gated_gap,
            &gated_freeride,
        );
        let (path, weight) =
            full_grid::find_max_path(graph).change_context(AlignError::Backtrack)?;

        // Down indices landing in the second copy fold back by |down|.
        let down_len = down.len();
        let steps = path
            .iter()
            .map(|edge| {
                graph.edge_elements(edge).map(|(d, r)| {
                    let d = d.map(|index| {
                        if index.index() >= down_len {
                            ix(index.index() - down_len)
                        } else {
                            index
                        }
                    });
                    (d, r)
                })
            })
            .collect();
        Ok((Alignment { steps }, weight.real()))
    }

    /// Affine (extended-gap) alignment with separate open and extend
    /// scorers.
    ///
    /// Runs the sliced backtracker over the three-depth graph; gap closes
    /// surface as freeride steps.
    #[allow(clippy::too_many_arguments)]
    pub fn extended_gap<D, R, Sub, Open, Ext, Fr, W>(
        &self,
        down: &D,
        right: &R,
        sub: &Sub,
        initial_gap: &Open,
        extended_gap: &Ext,
        freeride: &Fr,
        tolerance: W,
    ) -> Result<(Alignment<Ix>, W), AlignError>
    where
        D: Seq + ?Sized,
        R: Seq + ?Sized,
        Sub: Scorer<D::Item, R::Item, Weight = W>,
        Open: Scorer<D::Item, R::Item, Weight = W>,
        Ext: Scorer<D::Item, R::Item, Weight = W>,
        Fr: Scorer<D::Item, R::Item, Weight = W>,
        W: Weight,
    {
        self.check_width(down.len(), right.len())?;
        self.check_tolerance(tolerance)?;
        let graph: ExtendedGapGraph<'_, D, R, Sub, Open, Ext, Fr, Ix> =
            ExtendedGapGraph::new(down, right, sub, initial_gap, extended_gap, freeride);
        let (path, weight) = SlicedBacktracker::new()
            .find_max_path(graph, tolerance)
            .change_context(AlignError::Backtrack)?;
        Ok((map_steps(graph, &path), weight))
    }
}

fn map_steps<G: AlignmentGraph>(graph: G, path: &[Edge<G::Ix>]) -> Alignment<G::Ix> {
    Alignment {
        steps: path.iter().map(|edge| graph.edge_elements(edge)).collect(),
    }
}

/// [`Aligner::global`] with a `usize` grid index.
pub fn align_global<D, R, Sub, Gap, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    gap: &Gap,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().global(down, right, sub, gap)
}

/// [`Aligner::local`] with a `usize` grid index.
pub fn align_local<D, R, Sub, Gap, Fr, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    gap: &Gap,
    freeride: &Fr,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().local(down, right, sub, gap, freeride)
}

/// [`Aligner::fitting`] with a `usize` grid index.
pub fn align_fitting<D, R, Sub, Gap, Fr, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    gap: &Gap,
    freeride: &Fr,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().fitting(down, right, sub, gap, freeride)
}

/// [`Aligner::overlap`] with a `usize` grid index.
pub fn align_overlap<D, R, Sub, Gap, Fr, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    gap: &Gap,
    freeride: &Fr,
    tolerance: W,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().overlap(down, right, sub, gap, freeride, tolerance)
}

/// [`Aligner::rotational`] with a `usize` grid index.
pub fn align_rotational<D, R, Sub, Gap, Fr, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    gap: &Gap,
    freeride: &Fr,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().rotational(down, right, sub, gap, freeride)
}

/// [`Aligner::extended_gap`] with a `usize` grid index.
pub fn align_extended_gap<D, R, Sub, Open, Ext, Fr, W>(
    down: &D,
    right: &R,
    sub: &Sub,
    initial_gap: &Open,
    extended_gap: &Ext,
    freeride: &Fr,
    tolerance: W,
) -> Result<(Alignment<usize>, W), AlignError>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Open: Scorer<D::Item, R::Item, Weight = W>,
    Ext: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    W: Weight,
{
    Aligner::new().extended_gap(down, right, sub, initial_gap, extended_gap, freeride, tolerance)
}
