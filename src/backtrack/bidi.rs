use crate::backtrack::slot::Slot;
use crate::backtrack::walker::ForwardWalker;
use crate::graph::{AlignmentGraph, Node, Reversed};
use crate::store::{FactoryPack, HeapPack};
use crate::weight::Weight;

/// A forward walker and a forward walker over the reversed view,
/// converging on one row.
///
/// For a node on the target row, the forward slot carries the weight of
/// the best root-to-node path and the backward slot the weight of the
/// best node-to-leaf path (walked leaf-to-node through [`Reversed`]);
/// their sum is the weight of the best root-to-leaf path through the
/// node.
pub struct BidiWalker<G: AlignmentGraph, P: FactoryPack<G::Ix, G::Weight> = HeapPack> {
    target_row: usize,
    forward: ForwardWalker<G, P>,
    backward: ForwardWalker<Reversed<G>, P>,
}

impl<G: AlignmentGraph> BidiWalker<G> {
    pub fn new(graph: G, target_row: usize) -> Self {
        Self::with_pack(graph, target_row, HeapPack)
    }

    /// Both halves of the converged slot pair at `node`, by value.
    pub fn converge(graph: G, node: Node<G::Ix>) -> (Slot<G::Ix, G::Weight>, Slot<G::Ix, G::Weight>) {
        let row = graph.grid_offset(node).0;
        let walker = Self::new(graph, row);
        let (forward, backward) = walker.find(node);
        (*forward, *backward)
    }

    /// The weight of the maximum-weight root-to-leaf path through `node`.
    pub fn converge_weight(graph: G, node: Node<G::Ix>) -> G::Weight {
        let (forward, backward) = Self::converge(graph, node);
        forward.weight + backward.weight
    }

    /// Whether some node on `node`'s row converges to `max_weight` within
    /// `tolerance` — i.e. whether a maximum-weight path crosses the row
    /// through a single edge there.
    pub fn is_node_on_max_path(
        graph: G,
        node: Node<G::Ix>,
        max_weight: G::Weight,
        tolerance: G::Weight,
    ) -> bool {
        debug_assert!(max_weight.is_finite(), "max path weight must be finite");
        debug_assert!(tolerance.is_finite(), "tolerance must be finite");
        let row = graph.grid_offset(node).0;
        let walker = Self::new(graph, row);
        graph.row_nodes(row).any(|candidate| {
            let (forward, backward) = walker.find(candidate);
            (forward.weight + backward.weight).within(max_weight, tolerance)
        })
    }
}

impl<G, P> BidiWalker<G, P>
where
    G: AlignmentGraph,
    P: FactoryPack<G::Ix, G::Weight>,
{
    pub fn with_pack(graph: G, target_row: usize, pack: P) -> Self {
        debug_assert!(target_row < graph.down_count(), "target row past final row");
        let mirrored = graph.down_count() - 1 - target_row;
        Self {
            target_row,
            forward: ForwardWalker::with_pack(graph, target_row, pack),
            backward: ForwardWalker::with_pack(Reversed(graph), mirrored, pack),
        }
    }

    pub fn target_row(&self) -> usize {
        self.target_row
    }

    /// The forward and backward slots for a node on the target row (or a
    /// resident held by both walkers).
    pub fn find(
        &self,
        node: Node<G::Ix>,
    ) -> (&Slot<G::Ix, G::Weight>, &Slot<G::Ix, G::Weight>) {
        (self.forward.find(node), self.backward.find(node))
    }
}

#[cfg(test)]
mod tests {
    use super::BidiWalker;
    use crate::graph::{AlignmentGraph, GlobalGraph, Node, Reversed};
    use crate::score::SimpleScorer;

    fn scorers() -> (SimpleScorer<i32>, SimpleScorer<i32>) {
        (SimpleScorer::substitution(1, 0), SimpleScorer::gap(0))
    }

    #[test]
    fn halves_sum_to_the_full_path_weight() {
        let (sub, gap) = scorers();
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("panama", "banana", &sub, &gap);
        let max = BidiWalker::converge_weight(g, g.leaf());
        assert_eq!(max, 4);

        // Some node on every row lies on a maximum path.
        for row in 0..g.down_count() {
            let probe = g.row_nodes(row).next().unwrap();
            assert!(BidiWalker::is_node_on_max_path(g, probe, max, 0));
        }
        assert!(!BidiWalker::is_node_on_max_path(g, g.leaf(), max + 1, 0));
    }

    #[test]
    fn converge_weight_is_mirror_symmetric() {
        let (sub, gap) = scorers();
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("cat", "cart", &sub, &gap);
        let node = Node::at(2, 2, 0);
        let forward = BidiWalker::converge_weight(g, node);
        let backward = BidiWalker::converge_weight(Reversed(g), node);
        assert_eq!(forward, backward);
    }
}
