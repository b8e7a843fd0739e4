use crate::graph::{AlignmentGraph, Edge, ElementOffsets, Node};

/// View of the sub-DAG spanned between two nodes of a backing graph.
///
/// The view's root is `from`, its leaf is `to`, and a node is visible
/// exactly when it sits on some `from → to` path. Grid offsets are
/// remapped so `from` sits at `(0, 0)`; node and edge ids are untouched,
/// so anything discovered through the view can be handed back to the
/// backing graph. The sliced subdivider and the resident segmenter carve
/// their working regions out of the whole graph with this.
pub struct Middle<G: AlignmentGraph> {
    graph: G,
    from: Node<G::Ix>,
    to: Node<G::Ix>,
    from_offset: (usize, usize),
    to_offset: (usize, usize),
}

/// The backing graph clamped to end at `leaf`.
pub fn prefix<G: AlignmentGraph>(graph: G, leaf: Node<G::Ix>) -> Middle<G> {
    let root = graph.root();
    Middle::new(graph, root, leaf)
}

/// The backing graph clamped to start at `root`.
pub fn suffix<G: AlignmentGraph>(graph: G, root: Node<G::Ix>) -> Middle<G> {
    let leaf = graph.leaf();
    Middle::new(graph, root, leaf)
}

impl<G: AlignmentGraph> Middle<G> {
    pub fn new(graph: G, from: Node<G::Ix>, to: Node<G::Ix>) -> Self {
        debug_assert!(
            graph.is_reachable(from, to),
            "from-node must reach to-node"
        );
        let from_full = graph.grid_offset(from);
        let to_full = graph.grid_offset(to);
        Self {
            graph,
            from,
            to,
            from_offset: (from_full.0, from_full.1),
            to_offset: (to_full.0, to_full.1),
        }
    }

    /// Whether `node` lies on some `from → to` path.
    pub fn contains(&self, node: Node<G::Ix>) -> bool {
        self.graph.is_reachable(self.from, node) && self.graph.is_reachable(node, self.to)
    }
}

impl<G: AlignmentGraph> Clone for Middle<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: AlignmentGraph> Copy for Middle<G> {}

impl<G: AlignmentGraph> AlignmentGraph for Middle<G> {
    type Ix = G::Ix;
    type Weight = G::Weight;

    fn down_count(&self) -> usize {
        self.to_offset.0 - self.from_offset.0 + 1
    }

    fn right_count(&self) -> usize {
        self.to_offset.1 - self.from_offset.1 + 1
    }

    fn depth_count(&self) -> usize {
        self.graph.depth_count()
    }

    fn root(&self) -> Node<G::Ix> {
        self.from
    }

    fn leaf(&self) -> Node<G::Ix> {
        self.to
    }

    fn edge_source(&self, edge: &Edge<G::Ix>) -> Node<G::Ix> {
        self.graph.edge_source(edge)
    }

    fn edge_target(&self, edge: &Edge<G::Ix>) -> Node<G::Ix> {
        self.graph.edge_target(edge)
    }

    fn edge_weight(&self, edge: &Edge<G::Ix>) -> G::Weight {
        self.graph.edge_weight(edge)
    }

    fn edge_elements(&self, edge: &Edge<G::Ix>) -> ElementOffsets<G::Ix> {
        self.graph.edge_elements(edge)
    }

    fn grid_offset(&self, node: Node<G::Ix>) -> (usize, usize, usize) {
        let (down, right, depth) = self.graph.grid_offset(node);
        debug_assert!(
            down >= self.from_offset.0 && right >= self.from_offset.1,
            "node outside the clamped region"
        );
        (down - self.from_offset.0, right - self.from_offset.1, depth)
    }

    fn in_edges(&self, node: Node<G::Ix>) -> impl DoubleEndedIterator<Item = Edge<G::Ix>> {
        let view = *self;
        self.graph
            .in_edges(node)
            .filter(move |edge| view.contains(view.graph.edge_source(edge)))
    }

    fn out_edges(&self, node: Node<G::Ix>) -> impl DoubleEndedIterator<Item = Edge<G::Ix>> {
        let view = *self;
        self.graph
            .out_edges(node)
            .filter(move |edge| view.contains(view.graph.edge_target(edge)))
    }

    fn row_nodes(&self, row: usize) -> impl DoubleEndedIterator<Item = Node<G::Ix>> {
        debug_assert!(row < self.down_count(), "row out of bounds");
        let view = *self;
        self.graph
            .row_nodes(self.from_offset.0 + row)
            .filter(move |node| view.contains(*node))
    }

    fn is_reachable(&self, from: Node<G::Ix>, to: Node<G::Ix>) -> bool {
        self.graph.is_reachable(from, to)
    }

    fn resident_nodes(&self) -> impl DoubleEndedIterator<Item = Node<G::Ix>> {
        let view = *self;
        self.graph
            .resident_nodes()
            .filter(move |node| view.contains(*node))
    }

    fn resident_capacity(&self) -> usize {
        self.graph.resident_capacity()
    }

    fn path_edge_capacity(&self) -> usize {
        self.graph.path_edge_capacity()
    }

    fn in_edge_capacity(&self) -> usize {
        self.graph.in_edge_capacity()
    }

    fn out_edge_capacity(&self) -> usize {
        self.graph.out_edge_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::{prefix, Middle};
    use crate::graph::{AlignmentGraph, FittingGraph, Node, Reversed};
    use crate::score::SimpleScorer;

    #[test]
    fn clamps_counts_offsets_and_edges() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("abcd", "abc", &sub, &gap, &freeride);

        let view = Middle::new(g, Node::at(1, 1, 0), Node::at(3, 2, 0));
        assert_eq!(view.down_count(), 3);
        assert_eq!(view.right_count(), 2);
        assert_eq!(view.root(), Node::at(1, 1, 0));
        assert_eq!(view.grid_offset(Node::at(2, 2, 0)), (1, 1, 0));

        // The clamped root keeps only in-box parents; the backing root's
        // freerides aim outside and disappear.
        assert_eq!(view.in_degree(Node::at(1, 1, 0)), 0);
        assert_eq!(view.in_degree(Node::at(2, 2, 0)), 3);
        let row: Vec<_> = view.row_nodes(1).collect();
        assert_eq!(row, vec![Node::at(2, 1, 0), Node::at(2, 2, 0)]);

        // Residents (backing root and leaf) fall outside the view.
        assert_eq!(view.resident_nodes().count(), 0);
    }

    #[test]
    fn prefix_keeps_root_and_its_freerides() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("abcd", "abc", &sub, &gap, &freeride);

        let view = prefix(g, Node::at(2, 1, 0));
        assert_eq!(view.root(), g.root());
        assert_eq!(view.down_count(), 3);
        // Left-column freerides survive as long as they stay in the box.
        assert!(view
            .out_edges(g.root())
            .any(|e| e.to == Node::at(2, 0, 0)));
        assert!(view.out_edges(g.root()).all(|e| e.to != Node::at(3, 0, 0)));
        assert_eq!(view.resident_nodes().count(), 1);
    }

    #[test]
    fn reversed_middle_composes() {
        let sub = SimpleScorer::substitution(1, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("abcd", "abc", &sub, &gap, &freeride);

        let view = Middle::new(g, Node::at(1, 1, 0), Node::at(3, 2, 0));
        let back = Reversed(view);
        assert_eq!(back.root(), view.leaf());
        assert_eq!(back.grid_offset(Node::at(3, 2, 0)), (0, 0, 0));
        let first_row: Vec<_> = back.row_nodes(0).collect();
        assert_eq!(first_row, vec![Node::at(3, 2, 0), Node::at(3, 1, 0)]);
    }
}
