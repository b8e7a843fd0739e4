use crate::graph::{AlignmentGraph, Edge, ElementOffsets, Node};
use crate::graph::ix;
use crate::index::GridIndex;

/// Wrapper for walking a graph as if every edge were reversed.
///
/// Node and edge ids are left untouched; sources and targets swap, grid
/// offsets mirror (`(d, r, depth) ↦ (D−1−d, R−1−r, depth)`), and rows
/// iterate right to left so intra-row edges still point forward. The
/// bidirectional walker's backward half is a forward walker over this
/// view.
#[derive(Clone, Copy, Debug)]
pub struct Reversed<G>(pub G);

impl<G: AlignmentGraph> AlignmentGraph for Reversed<G> {
    type Ix = G::Ix;
    type Weight = G::Weight;

    fn down_count(&self) -> usize {
        self.0.down_count()
    }

    fn right_count(&self) -> usize {
        self.0.right_count()
    }

    fn depth_count(&self) -> usize {
        self.0.depth_count()
    }

    fn root(&self) -> Node<G::Ix> {
        self.0.leaf()
    }

    fn leaf(&self) -> Node<G::Ix> {
        self.0.root()
    }

    fn edge_source(&self, edge: &Edge<G::Ix>) -> Node<G::Ix> {
        self.0.edge_target(edge)
    }

    fn edge_target(&self, edge: &Edge<G::Ix>) -> Node<G::Ix> {
        self.0.edge_source(edge)
    }

    fn edge_weight(&self, edge: &Edge<G::Ix>) -> G::Weight {
        self.0.edge_weight(edge)
    }

    fn edge_elements(&self, edge: &Edge<G::Ix>) -> ElementOffsets<G::Ix> {
        let (down, right) = self.0.edge_elements(edge)?;
        let down_len = self.0.down_count() - 1;
        let right_len = self.0.right_count() - 1;
        Some((
            down.map(|idx| ix(down_len - 1 - idx.index())),
            right.map(|idx| ix(right_len - 1 - idx.index())),
        ))
    }

    fn grid_offset(&self, node: Node<G::Ix>) -> (usize, usize, usize) {
        let (down, right, depth) = self.0.grid_offset(node);
        (
            self.0.down_count() - 1 - down,
            self.0.right_count() - 1 - right,
            depth,
        )
    }

    fn in_edges(&self, node: Node<G::Ix>) -> impl DoubleEndedIterator<Item = Edge<G::Ix>> {
        self.0.out_edges(node)
    }

    fn out_edges(&self, node: Node<G::Ix>) -> impl DoubleEndedIterator<Item = Edge<G::Ix>> {
        self.0.in_edges(node)
    }

    fn in_degree(&self, node: Node<G::Ix>) -> usize {
        self.0.out_degree(node)
    }

    fn out_degree(&self, node: Node<G::Ix>) -> usize {
        self.0.in_degree(node)
    }

    fn row_nodes(&self, row: usize) -> impl DoubleEndedIterator<Item = Node<G::Ix>> {
        let mirrored = self.0.down_count() - 1 - row;
        self.0.row_nodes(mirrored).rev()
    }

    fn is_reachable(&self, from: Node<G::Ix>, to: Node<G::Ix>) -> bool {
        self.0.is_reachable(to, from)
    }

    fn resident_nodes(&self) -> impl DoubleEndedIterator<Item = Node<G::Ix>> {
        self.0.resident_nodes()
    }

    fn resident_capacity(&self) -> usize {
        self.0.resident_capacity()
    }

    fn path_edge_capacity(&self) -> usize {
        self.0.path_edge_capacity()
    }

    fn in_edge_capacity(&self) -> usize {
        self.0.out_edge_capacity()
    }

    fn out_edge_capacity(&self) -> usize {
        self.0.in_edge_capacity()
    }
}
