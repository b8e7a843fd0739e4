use core::iter;

use either::Either;

use crate::graph::lattice::LatticeCore;
use crate::graph::{AlignmentGraph, Edge, EdgeKind, ElementOffsets, Node};
use crate::index::GridIndex;
use crate::score::Scorer;
use crate::seq::Seq;
use crate::weight::Weight;

/// Overlap (dovetail) alignment graph: a suffix of `down` against a
/// prefix of `right`.
///
/// Freerides run down the left column from the root (skipping a down
/// prefix) and along the bottom row into the leaf (skipping a right
/// suffix).
pub struct OverlapGraph<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix = usize> {
    core: LatticeCore<'a, D, R, Sub, Gap, Ix>,
    freeride: &'a Fr,
}

impl<'a, D, R, Sub, Gap, Fr, Ix, W> OverlapGraph<'a, D, R, Sub, Gap, Fr, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    pub fn new(down: &'a D, right: &'a R, sub: &'a Sub, gap: &'a Gap, freeride: &'a Fr) -> Self {
        Self {
            core: LatticeCore::new(down, right, sub, gap),
            freeride,
        }
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix> Clone
    for OverlapGraph<'a, D, R, Sub, Gap, Fr, Ix>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix> Copy
    for OverlapGraph<'a, D, R, Sub, Gap, Fr, Ix>
{
}

impl<'a, D, R, Sub, Gap, Fr, Ix, W> AlignmentGraph for OverlapGraph<'a, D, R, Sub, Gap, Fr, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    type Ix = Ix;
    type Weight = W;

    fn down_count(&self) -> usize {
        self.core.down_count
    }

    fn right_count(&self) -> usize {
        self.core.right_count
    }

    fn root(&self) -> Node<Ix> {
        self.core.root()
    }

    fn leaf(&self) -> Node<Ix> {
        self.core.leaf()
    }

    fn edge_weight(&self, edge: &Edge<Ix>) -> W {
        match edge.kind {
            EdgeKind::Lattice => self.core.weight(edge),
            EdgeKind::Freeride => self.freeride.score(None, None),
        }
    }

    fn edge_elements(&self, edge: &Edge<Ix>) -> ElementOffsets<Ix> {
        match edge.kind {
            EdgeKind::Lattice => self.core.elements(edge),
            EdgeKind::Freeride => None,
        }
    }

    fn grid_offset(&self, node: Node<Ix>) -> (usize, usize, usize) {
        (node.down.index(), node.right.index(), node.depth as usize)
    }

    fn in_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let core = self.core;
        let (d, r) = (node.down.index(), node.right.index());
        let from_root = (r == 0 && d > 0).then(|| Edge::freeride(core.root(), node));
        let into_leaf = if node == core.leaf() && core.right_count > 1 {
            Either::Left((0..core.right_count - 1).map(move |fr| {
                Edge::freeride(core.node(core.down_count - 1, fr), core.leaf())
            }))
        } else {
            Either::Right(iter::empty())
        };
        core.in_edges(node).chain(from_root).chain(into_leaf)
    }

    fn out_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let core = self.core;
        let (d, r) = (node.down.index(), node.right.index());
        let into_leaf = (d == core.down_count - 1 && r + 1 < core.right_count)
            .then(|| Edge::freeride(node, core.leaf()));
        let from_root = if node == core.root() && core.down_count > 1 {
            Either::Left(
                (1..core.down_count).map(move |td| Edge::freeride(core.root(), core.node(td, 0))),
            )
        } else {
            Either::Right(iter::empty())
        };
        core.out_edges(node).chain(into_leaf).chain(from_root)
    }

    fn row_nodes(&self, row: usize) -> impl DoubleEndedIterator<Item = Node<Ix>> {
        self.core.row_nodes(row)
    }

    fn is_reachable(&self, from: Node<Ix>, to: Node<Ix>) -> bool {
        self.core.is_reachable(from, to)
    }

    fn resident_nodes(&self) -> impl DoubleEndedIterator<Item = Node<Ix>> {
        super::corner_residents(self.root(), self.leaf())
    }

    fn path_edge_capacity(&self) -> usize {
        self.core.down_count + self.core.right_count - 2
    }

    fn in_edge_capacity(&self) -> usize {
        // The leaf collects a freeride from every bottom-row node.
        self.core.right_count + 2
    }

    fn out_edge_capacity(&self) -> usize {
        // The root feeds a freeride to every left-column node.
        self.core.down_count + 2
    }
}

#[cfg(test)]
mod tests {
    use super::OverlapGraph;
    use crate::graph::{AlignmentGraph, EdgeKind};
    use crate::score::SimpleScorer;

    #[test]
    fn freerides_skip_down_prefix_and_right_suffix() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: OverlapGraph<'_, str, str, _, _, _, usize> =
            OverlapGraph::new("abc", "xy", &sub, &gap, &freeride);

        // Root sprays down the left column: rows 1..=3.
        let down_skips: Vec<_> = g
            .out_edges(g.root())
            .filter(|e| e.kind == EdgeKind::Freeride)
            .collect();
        assert_eq!(down_skips.len(), 3);
        assert!(down_skips.iter().all(|e| e.to.right == 0));

        // Leaf collects along the bottom row: columns 0..=1.
        let right_skips: Vec<_> = g
            .in_edges(g.leaf())
            .filter(|e| e.kind == EdgeKind::Freeride)
            .collect();
        assert_eq!(right_skips.len(), 2);
        assert!(right_skips.iter().all(|e| e.from.down == 3));
    }
}
