use crate::graph::{AlignmentGraph, Edge, ElementOffsets, Node};
use crate::index::GridIndex;
use crate::score::Scorer;
use crate::seq::Seq;
use crate::weight::Weight;

/// Extended-gap (affine) alignment graph, three depth planes deep.
///
/// Depth 0 carries matches and mismatches, depth 1 insertion runs (down
/// elements), depth 2 deletion runs (right elements). Opening a run jumps
/// from depth 0 and consumes the run's first element at the initial-gap
/// score; staying in a plane consumes at the extended-gap score; closing
/// drops back to depth 0 without consuming anything, scored as a
/// freeride. Depth-1 nodes only exist below row 0 and depth-2 nodes only
/// exist right of column 0, since nothing else can enter them.
pub struct ExtendedGapGraph<'a, D: ?Sized, R: ?Sized, Sub, Open, Ext, Fr, Ix = usize> {
    down: &'a D,
    right: &'a R,
    sub: &'a Sub,
    open: &'a Open,
    extend: &'a Ext,
    freeride: &'a Fr,
    down_count: usize,
    right_count: usize,
    _ix: core::marker::PhantomData<fn() -> Ix>,
}

enum Transition {
    Substitution,
    OpenInsertion,
    ExtendInsertion,
    OpenDeletion,
    ExtendDeletion,
    Close,
}

impl<'a, D, R, Sub, Open, Ext, Fr, Ix, W> ExtendedGapGraph<'a, D, R, Sub, Open, Ext, Fr, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Open: Scorer<D::Item, R::Item, Weight = W>,
    Ext: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    pub fn new(
        down: &'a D,
        right: &'a R,
        sub: &'a Sub,
        open: &'a Open,
        extend: &'a Ext,
        freeride: &'a Fr,
    ) -> Self {
        Self {
            down,
            right,
            sub,
            open,
            extend,
            freeride,
            down_count: down.len() + 1,
            right_count: right.len() + 1,
            _ix: core::marker::PhantomData,
        }
    }

    fn transition(edge: &Edge<Ix>) -> Transition {
        match (edge.from.depth, edge.to.depth) {
            (0, 0) => Transition::Substitution,
            (0, 1) => Transition::OpenInsertion,
            (1, 1) => Transition::ExtendInsertion,
            (0, 2) => Transition::OpenDeletion,
            (2, 2) => Transition::ExtendDeletion,
            (1, 0) | (2, 0) => Transition::Close,
            _ => {
                debug_assert!(false, "no such depth transition");
                Transition::Close
            }
        }
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Open, Ext, Fr, Ix> Clone
    for ExtendedGapGraph<'a, D, R, Sub, Open, Ext, Fr, Ix>
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Open, Ext, Fr, Ix> Copy
    for ExtendedGapGraph<'a, D, R, Sub, Open, Ext, Fr, Ix>
{
}

impl<'a, D, R, Sub, Open, Ext, Fr, Ix, W> AlignmentGraph
    for ExtendedGapGraph<'a, D, R, Sub, Open, Ext, Fr, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Open: Scorer<D::Item, R::Item, Weight = W>,
    Ext: Scorer<D::Item, R::Item, Weight = W>,
    Fr: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    type Ix = Ix;
    type Weight = W;

    fn down_count(&self) -> usize {
        self.down_count
    }

    fn right_count(&self) -> usize {
        self.right_count
    }

    fn depth_count(&self) -> usize {
        3
    }

    fn root(&self) -> Node<Ix> {
        Node::at(0, 0, 0)
    }

    fn leaf(&self) -> Node<Ix> {
        Node::at(self.down_count - 1, self.right_count - 1, 0)
    }

    fn edge_weight(&self, edge: &Edge<Ix>) -> W {
        let d = edge.from.down.index();
        let r = edge.from.right.index();
        match Self::transition(edge) {
            Transition::Substitution => self.sub.score(
                Some((d, self.down.at(d))),
                Some((r, self.right.at(r))),
            ),
            Transition::OpenInsertion => self.open.score(Some((d, self.down.at(d))), None),
            Transition::ExtendInsertion => self.extend.score(Some((d, self.down.at(d))), None),
            Transition::OpenDeletion => self.open.score(None, Some((r, self.right.at(r)))),
            Transition::ExtendDeletion => self.extend.score(None, Some((r, self.right.at(r)))),
            Transition::Close => self.freeride.score(None, None),
        }
    }

    fn edge_elements(&self, edge: &Edge<Ix>) -> ElementOffsets<Ix> {
        let d = edge.from.down;
        let r = edge.from.right;
        match Self::transition(edge) {
            Transition::Substitution => Some((Some(d), Some(r))),
            Transition::OpenInsertion | Transition::ExtendInsertion => Some((Some(d), None)),
            Transition::OpenDeletion | Transition::ExtendDeletion => Some((None, Some(r))),
            Transition::Close => None,
        }
    }

    fn grid_offset(&self, node: Node<Ix>) -> (usize, usize, usize) {
        (node.down.index(), node.right.index(), node.depth as usize)
    }

    fn in_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let (d, r) = (node.down.index(), node.right.index());
        let edges: [Option<Edge<Ix>>; 3] = match node.depth {
            0 => [
                (d > 0 && r > 0).then(|| Edge::lattice(Node::at(d - 1, r - 1, 0), node)),
                (d > 0).then(|| Edge::freeride(Node::at(d, r, 1), node)),
                (r > 0).then(|| Edge::freeride(Node::at(d, r, 2), node)),
            ],
            1 => {
                debug_assert!(d >= 1, "insertion-plane node in row 0");
                [
                    Some(Edge::lattice(Node::at(d - 1, r, 0), node)),
                    (d > 1).then(|| Edge::lattice(Node::at(d - 1, r, 1), node)),
                    None,
                ]
            }
            _ => {
                debug_assert!(r >= 1, "deletion-plane node in column 0");
                [
                    Some(Edge::lattice(Node::at(d, r - 1, 0), node)),
                    (r > 1).then(|| Edge::lattice(Node::at(d, r - 1, 2), node)),
                    None,
                ]
            }
        };
        edges.into_iter().flatten()
    }

    fn out_edges(&self, node: Node<Ix>) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let (d, r) = (node.down.index(), node.right.index());
        let below = d + 1 < self.down_count;
        let beside = r + 1 < self.right_count;
        let edges: [Option<Edge<Ix>>; 3] = match node.depth {
            0 => [
                (below && beside).then(|| Edge::lattice(node, Node::at(d + 1, r + 1, 0))),
                below.then(|| Edge::lattice(node, Node::at(d + 1, r, 1))),
                beside.then(|| Edge::lattice(node, Node::at(d, r + 1, 2))),
            ],
            1 => [
                below.then(|| Edge::lattice(node, Node::at(d + 1, r, 1))),
                Some(Edge::freeride(node, Node::at(d, r, 0))),
                None,
            ],
            _ => [
                beside.then(|| Edge::lattice(node, Node::at(d, r + 1, 2))),
                Some(Edge::freeride(node, Node::at(d, r, 0))),
                None,
            ],
        };
        edges.into_iter().flatten()
    }

    fn row_nodes(&self, row: usize) -> impl DoubleEndedIterator<Item = Node<Ix>> {
        debug_assert!(row < self.down_count, "row out of bounds");
        let right_count = self.right_count;
        (0..right_count).flat_map(move |r| {
            // Depth planes first: closes within the cell point at depth 0.
            let insertion = (row >= 1).then(|| Node::at(row, r, 1));
            let deletion = (r >= 1).then(|| Node::at(row, r, 2));
            [insertion, deletion, Some(Node::at(row, r, 0))]
                .into_iter()
                .flatten()
        })
    }

    fn is_reachable(&self, from: Node<Ix>, to: Node<Ix>) -> bool {
        if from == to {
            return true;
        }
        if from.down > to.down || from.right > to.right {
            return false;
        }
        if from.down == to.down && from.right == to.right {
            // Only a close moves within a cell.
            return to.depth == 0 && from.depth != 0;
        }
        if from.down == to.down {
            // Moving right only: insertion-plane nodes are entered from above.
            return to.depth != 1;
        }
        if from.right == to.right {
            // Moving down only: deletion-plane nodes are entered from the left.
            return to.depth != 2;
        }
        true
    }

    fn resident_nodes(&self) -> impl DoubleEndedIterator<Item = Node<Ix>> {
        super::corner_residents(self.root(), self.leaf())
    }

    fn path_edge_capacity(&self) -> usize {
        // Every consumed element may carry an extra close edge.
        2 * (self.down_count + self.right_count)
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
    use super::ExtendedGapGraph;
    use crate::graph::{AlignmentGraph, Node};
    use crate::index::GridIndex;
    use crate::score::SimpleScorer;

    type G<'a> = ExtendedGapGraph<
        'a,
        str,
        str,
        SimpleScorer<i32>,
        SimpleScorer<i32>,
        SimpleScorer<i32>,
        SimpleScorer<i32>,
        usize,
    >;

    fn scorers() -> [SimpleScorer<i32>; 4] {
        [
            SimpleScorer::substitution(1, -1),
            SimpleScorer::gap(-2),
            SimpleScorer::gap(-1),
            SimpleScorer::freeride(),
        ]
    }

    #[test]
    fn transitions_route_to_their_scorers() {
        let [sub, open, extend, freeride] = scorers();
        let g: G<'_> = ExtendedGapGraph::new("ab", "cd", &sub, &open, &extend, &freeride);

        let open_ins = g
            .out_edges(Node::at(0, 0, 0))
            .find(|e| e.to.depth == 1)
            .unwrap();
        assert_eq!(g.edge_weight(&open_ins), -2);
        assert_eq!(g.edge_elements(&open_ins), Some((Some(0), None)));

        let extend_ins = g
            .out_edges(Node::at(1, 0, 1))
            .find(|e| e.to.depth == 1)
            .unwrap();
        assert_eq!(g.edge_weight(&extend_ins), -1);

        let close = g
            .out_edges(Node::at(1, 0, 1))
            .find(|e| e.to.depth == 0)
            .unwrap();
        assert_eq!(g.edge_weight(&close), 0);
        assert_eq!(g.edge_elements(&close), None);
    }

    #[test]
    fn row_order_is_topological_within_the_row() {
        let [sub, open, extend, freeride] = scorers();
        let g: G<'_> = ExtendedGapGraph::new("ab", "cd", &sub, &open, &extend, &freeride);
        let row: Vec<_> = g.row_nodes(1).collect();
        for (i, node) in row.iter().enumerate() {
            for edge in g.out_edges(*node) {
                if edge.to.down.index() == 1 {
                    let target_at = row.iter().position(|n| *n == edge.to).unwrap();
                    assert!(target_at > i, "intra-row edge must point forward");
                }
            }
        }
    }

    #[test]
    fn plane_nodes_only_exist_where_enterable() {
        let [sub, open, extend, freeride] = scorers();
        let g: G<'_> = ExtendedGapGraph::new("ab", "cd", &sub, &open, &extend, &freeride);
        assert!(g.row_nodes(0).all(|n| n.depth != 1));
        assert!(g.row_nodes(1).any(|n| n.depth == 1));
        assert!(g.row_nodes(1).all(|n| n.right.index() > 0 || n.depth != 2));
        // Reachability agrees.
        assert!(!g.is_reachable(g.root(), Node::at(0, 1, 1)));
        assert!(g.is_reachable(g.root(), Node::at(0, 1, 2)));
        assert!(!g.is_reachable(g.root(), Node::at(1, 0, 2)));
        assert!(g.is_reachable(Node::at(1, 1, 1), Node::at(1, 1, 0)));
        assert!(!g.is_reachable(Node::at(1, 1, 0), Node::at(1, 1, 1)));
    }
}
