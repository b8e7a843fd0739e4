use error_stack::{Report, Result};

use crate::backtrack::error::BacktrackError;
use crate::backtrack::segment::{Part, ResidentSegmenter};
use crate::backtrack::subdivide::SlicedSubdivider;
use crate::graph::{AlignmentGraph, Middle};
use crate::store::{FactoryPack, HeapPack, Store};

/// Sliced divide-and-conquer backtracker.
///
/// Composition of the resident segmenter and the sliced subdivider: hops
/// are emitted directly, segments are subdivided, and the concatenation is
/// a maximum-weight root-to-leaf path. Peak memory is a handful of slot
/// rows regardless of grid height.
pub struct SlicedBacktracker<P = HeapPack> {
    pack: P,
}

impl SlicedBacktracker {
    pub fn new() -> Self {
        Self { pack: HeapPack }
    }
}

impl Default for SlicedBacktracker {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> SlicedBacktracker<P> {
    pub fn with_pack(pack: P) -> Self {
        Self { pack }
    }

    /// Find a maximum-weight root-to-leaf path and its total weight.
    ///
    /// `tolerance` absorbs floating-point rounding when weights are
    /// compared for equality against the maximum; pass zero for exact
    /// weight types.
    pub fn find_max_path<G>(
        &self,
        graph: G,
        tolerance: G::Weight,
    ) -> Result<(P::EdgeStore, G::Weight), BacktrackError>
    where
        G: AlignmentGraph,
        P: FactoryPack<G::Ix, G::Weight> + Copy,
    {
        let segmenter = ResidentSegmenter::with_pack(self.pack);
        let (parts, weight) = segmenter.segment_chain(graph, tolerance);

        let mut path = self.pack.edge_list(graph.path_edge_capacity());
        for part in parts {
            match part {
                Part::Hop(edge) => path.push(edge),
                Part::Segment { from, to } => {
                    let segment = Middle::new(graph, from, to);
                    let subdivider = SlicedSubdivider::with_pack(segment, self.pack);
                    for edge in subdivider.subdivide().iter() {
                        path.push(edge);
                    }
                }
            }
        }

        if path.is_empty() && graph.root() != graph.leaf() {
            return Err(Report::new(BacktrackError::Disconnected));
        }
        Ok((path, weight))
    }
}

#[cfg(test)]
mod tests {
    use super::SlicedBacktracker;
    use crate::backtrack::full_grid;
    use crate::graph::{
        AlignmentGraph, FittingGraph, GlobalGraph, LocalGraph, OverlapGraph,
    };
    use crate::score::SimpleScorer;

    fn scorers() -> (SimpleScorer<i32>, SimpleScorer<i32>, SimpleScorer<i32>) {
        (
            SimpleScorer::substitution(1, -1),
            SimpleScorer::gap(-1),
            SimpleScorer::freeride(),
        )
    }

    #[test]
    fn agrees_with_full_grid_on_global() {
        let sub = SimpleScorer::substitution(1i32, 0);
        let gap = SimpleScorer::gap(0);
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("panama", "banana", &sub, &gap);
        let (path, weight) = SlicedBacktracker::new().find_max_path(g, 0).unwrap();
        let (_, full) = full_grid::find_max_path(g).unwrap();
        assert_eq!(weight, full);
        let sum: i32 = path.iter().map(|e| g.edge_weight(e)).sum();
        assert_eq!(sum, weight);
    }

    #[test]
    fn agrees_with_full_grid_on_local() {
        let (sub, gap, freeride) = scorers();
        let g: LocalGraph<'_, str, str, _, _, _, usize> =
            LocalGraph::new("panama", "amaryllis", &sub, &gap, &freeride);
        let (path, weight) = SlicedBacktracker::new().find_max_path(g, 0).unwrap();
        let (_, full) = full_grid::find_max_path(g).unwrap();
        assert_eq!(weight, full);
        assert_eq!(weight, 3);

        // The path is contiguous from root to leaf even across hops.
        let mut cursor = g.root();
        for edge in &path {
            assert_eq!(g.edge_source(edge), cursor);
            cursor = g.edge_target(edge);
        }
        assert_eq!(cursor, g.leaf());
    }

    #[test]
    fn agrees_with_full_grid_on_fitting_and_overlap() {
        let (sub, gap, freeride) = scorers();

        let fitting: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("xxabxx", "ab", &sub, &gap, &freeride);
        let (_, sliced) = SlicedBacktracker::new().find_max_path(fitting, 0).unwrap();
        let (_, full) = full_grid::find_max_path(fitting).unwrap();
        assert_eq!(sliced, full);

        let overlap: OverlapGraph<'_, str, str, _, _, _, usize> =
            OverlapGraph::new("abcde", "cdexy", &sub, &gap, &freeride);
        let (_, sliced) = SlicedBacktracker::new().find_max_path(overlap, 0).unwrap();
        let (_, full) = full_grid::find_max_path(overlap).unwrap();
        assert_eq!(sliced, full);
        assert_eq!(sliced, 3); // "cde" dovetail
    }
}
