use core::iter;

use either::Either;

use crate::graph::lattice::LatticeCore;
use crate::graph::{AlignmentGraph, Edge, EdgeKind, ElementOffsets, Node};
use crate::index::GridIndex;
use crate::score::Scorer;
use crate::seq::Seq;
use crate::weight::Weight;

/// Local alignment graph: any contiguous substring of either sequence.
///
/// The root sprays a freeride to every other node and every node other
/// than the root and leaf feeds a freeride into the leaf, so an optimal
/// path can enter and exit the lattice anywhere. The root-to-leaf
/// freeride belongs to the root's set.
pub struct LocalGraph<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix = usize> {
    core: LatticeCore<'a, D, R, Sub, Gap, Ix>,
    freeride: &'a Fr,
}

impl<'a, D, R, Sub, Gap, Fr, Ix, W> LocalGraph<'a, D, R, Sub, Gap, Fr, Ix>
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

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix> Clone for LocalGraph<'a, D, R, Sub, Gap, Fr, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Fr, Ix> Copy for LocalGraph<'a, D, R, Sub, Gap, Fr, Ix> {}

impl<'a, D, R, Sub, Gap, Fr, Ix, W> AlignmentGraph for LocalGraph<'a, D, R, Sub, Gap, Fr, Ix>
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
        let root = core.root();
        let leaf = core.leaf();
        let from_root = (node != root).then(|| Edge::freeride(root, node));
        let into_leaf = if node == leaf {
            Either::Left(
                core.nodes()
                    .filter(move |m| *m != root && *m != leaf)
                    .map(move |m| Edge::freeride(m, leaf)),
            )
        } else {
            Either::Right(iter::empty())
        };
        core.in_edges(node).chain(from_root).chain(into_leaf)
    }

    fn out_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let core = self.core;
        let root = core.root();
        let leaf = core.leaf();
        let into_leaf = (node != root && node != leaf).then(|| Edge::freeride(node, leaf));
        let from_root = if node == root {
            Either::Left(
                core.nodes()
                    .filter(move |m| *m != root)
                    .map(move |m| Edge::freeride(root, m)),
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
        // The leaf collects a freeride from almost every node.
        self.core.down_count * self.core.right_count + 2
    }

    fn out_edge_capacity(&self) -> usize {
        self.core.down_count * self.core.right_count + 2
    }
}

#[cfg(test)]
mod tests {
    use super::LocalGraph;
    use crate::graph::{AlignmentGraph, EdgeKind, Node};
    use crate::score::SimpleScorer;

    #[test]
    fn every_interior_node_touches_both_residents() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: LocalGraph<'_, str, str, _, _, _, usize> =
            LocalGraph::new("ab", "cd", &sub, &gap, &freeride);

        let node = Node::at(1, 1, 0);
        assert!(g
            .in_edges(node)
            .any(|e| e.kind == EdgeKind::Freeride && e.from == g.root()));
        assert!(g
            .out_edges(node)
            .any(|e| e.kind == EdgeKind::Freeride && e.to == g.leaf()));

        // 3x3 grid: the leaf hears from all 7 non-corner nodes plus the
        // root's spray, plus 3 lattice edges.
        assert_eq!(g.in_degree(g.leaf()), 7 + 1 + 3);
        // No duplicate root-to-leaf freeride.
        let dupes = g
            .in_edges(g.leaf())
            .filter(|e| e.kind == EdgeKind::Freeride && e.from == g.root())
            .count();
        assert_eq!(dupes, 1);
    }
}
