use crate::graph::lattice::LatticeCore;
use crate::graph::{AlignmentGraph, Edge, EdgeKind, ElementOffsets, Node};
use crate::index::GridIndex;
use crate::score::Scorer;
use crate::seq::Seq;
use crate::weight::Weight;

/// Global alignment graph: both sequences are consumed end to end.
///
/// Pure lattice, no freerides. The root and leaf are still reported as
/// residents so the sliced backtracker treats every shape uniformly.
pub struct GlobalGraph<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix = usize> {
    core: LatticeCore<'a, D, R, Sub, Gap, Ix>,
}

impl<'a, D, R, Sub, Gap, Ix, W> GlobalGraph<'a, D, R, Sub, Gap, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    pub fn new(down: &'a D, right: &'a R, sub: &'a Sub, gap: &'a Gap) -> Self {
        Self {
            core: LatticeCore::new(down, right, sub, gap),
        }
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix> Clone for GlobalGraph<'a, D, R, Sub, Gap, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix> Copy for GlobalGraph<'a, D, R, Sub, Gap, Ix> {}

impl<'a, D, R, Sub, Gap, Ix, W> AlignmentGraph for GlobalGraph<'a, D, R, Sub, Gap, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
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
        debug_assert!(edge.kind == EdgeKind::Lattice, "global graphs have no freerides");
        self.core.weight(edge)
    }

    fn edge_elements(&self, edge: &Edge<Ix>) -> ElementOffsets<Ix> {
        self.core.elements(edge)
    }

    fn grid_offset(&self, node: Node<Ix>) -> (usize, usize, usize) {
        (node.down.index(), node.right.index(), node.depth as usize)
    }

    fn in_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        self.core.in_edges(node)
    }

    fn out_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        self.core.out_edges(node)
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
        3
    }

    fn out_edge_capacity(&self) -> usize {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::GlobalGraph;
    use crate::graph::{AlignmentGraph, Node};
    use crate::score::SimpleScorer;

    fn graph<'a>(
        sub: &'a SimpleScorer<i32>,
        gap: &'a SimpleScorer<i32>,
    ) -> GlobalGraph<'a, str, str, SimpleScorer<i32>, SimpleScorer<i32>, usize> {
        GlobalGraph::new("ab", "abc", sub, gap)
    }

    #[test]
    fn degrees_and_corners() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let g = graph(&sub, &gap);
        assert_eq!(g.down_count(), 3);
        assert_eq!(g.right_count(), 4);
        assert_eq!(g.in_degree(g.root()), 0);
        assert_eq!(g.out_degree(g.leaf()), 0);
        assert_eq!(g.in_degree(g.leaf()), 3);
        assert_eq!(g.in_degree(Node::at(0, 2, 0)), 1);
        assert_eq!(g.in_degree(Node::at(1, 2, 0)), 3);
    }

    #[test]
    fn diagonal_edges_score_substitutions() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let g = graph(&sub, &gap);
        let diagonal = g
            .in_edges(Node::at(1, 1, 0))
            .next()
            .expect("diagonal exists");
        assert_eq!(g.edge_weight(&diagonal), 1); // 'a' vs 'a'
        assert_eq!(g.edge_elements(&diagonal), Some((Some(0), Some(0))));

        let vertical = g.in_edges(Node::at(1, 0, 0)).next().expect("vertical");
        assert_eq!(g.edge_weight(&vertical), -1);
        assert_eq!(g.edge_elements(&vertical), Some((Some(0), None)));
    }

    #[test]
    fn every_non_root_node_has_a_parent() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let g = graph(&sub, &gap);
        for row in 0..g.down_count() {
            for node in g.row_nodes(row) {
                if node != g.root() {
                    assert!(g.in_degree(node) >= 1);
                }
                if node != g.leaf() {
                    assert!(g.out_degree(node) >= 1);
                }
            }
        }
    }
}
