use core::cmp::Ordering;

use crate::backtrack::slot::{ResidentTable, RowTable, Slot};
use crate::graph::{AlignmentGraph, Node};
use crate::store::{FactoryPack, HeapPack, ResidentEntry};
use crate::weight::TotalOrd;

/// Streams a graph row by row from the root, leaving behind the
/// best-predecessor slot for every node of the previous and current rows
/// and for every resident node.
///
/// After construction, [`ForwardWalker::find`] answers for any node on or
/// before the target row that is still held (previous row, current row,
/// or resident), and the answer matches what a full topological walk
/// would have produced.
pub struct ForwardWalker<G: AlignmentGraph, P: FactoryPack<G::Ix, G::Weight> = HeapPack> {
    graph: G,
    rows: RowTable<G::Ix, G::Weight, P::RowStore>,
    residents: ResidentTable<G::Ix, G::Weight, P::ResidentStore>,
}

impl<G: AlignmentGraph> ForwardWalker<G> {
    pub fn new(graph: G, target_row: usize) -> Self {
        Self::with_pack(graph, target_row, HeapPack)
    }
}

impl<G, P> ForwardWalker<G, P>
where
    G: AlignmentGraph,
    P: FactoryPack<G::Ix, G::Weight>,
{
    pub fn with_pack(graph: G, target_row: usize, pack: P) -> Self {
        debug_assert!(target_row < graph.down_count(), "target row past final row");
        let width = graph.right_count() * graph.depth_count();
        let rows = RowTable::new(
            graph.depth_count(),
            pack.row_slots(width),
            pack.row_slots(width),
        );
        let residents = ResidentTable::new(pack.resident_slots(
            graph.resident_nodes().map(|node| ResidentEntry {
                node,
                initialized: false,
                slot: Slot::default(),
            }),
        ));
        let mut walker = Self {
            graph,
            rows,
            residents,
        };
        for row in 0..=target_row {
            if row > 0 {
                walker.rows.advance_row();
            }
            for node in graph.row_nodes(row) {
                walker.visit(node);
            }
        }
        walker
    }

    /// The slot a topological walk would have left on `node`.
    ///
    /// `node` must be on or before the target row and still held:
    /// resident, previous row, or current row.
    pub fn find(&self, node: Node<G::Ix>) -> &Slot<G::Ix, G::Weight> {
        if let Some(entry) = self.residents.find(node) {
            return &entry.slot;
        }
        let offset = self.graph.grid_offset(node);
        self.rows
            .find(offset)
            .expect("node outside the walked window")
    }

    fn weight_at(&self, node: Node<G::Ix>) -> G::Weight {
        self.find(node).weight
    }

    fn visit(&mut self, node: Node<G::Ix>) {
        let graph = self.graph;

        // A resident's slot is built up incrementally as its sources are
        // visited, never by the argmax below.
        if self.residents.find(node).is_none() {
            let mut best: Option<Slot<G::Ix, G::Weight>> = None;
            for edge in graph.in_edges(node) {
                let source = graph.edge_source(&edge);
                let weight = self.weight_at(source) + graph.edge_weight(&edge);
                let improves = best
                    .as_ref()
                    .map_or(true, |b| weight.total_cmp(&b.weight) == Ordering::Greater);
                if improves {
                    best = Some(Slot {
                        edge: Some(edge),
                        weight,
                    });
                }
            }
            if let Some(best) = best {
                let offset = graph.grid_offset(node);
                *self
                    .rows
                    .find_mut(offset)
                    .expect("visited node has no row slot") = best;
            }
        }

        let node_weight = self.weight_at(node);
        for edge in graph.out_edges_to_residents(node) {
            let weight = node_weight + graph.edge_weight(&edge);
            let target = graph.edge_target(&edge);
            let entry = self
                .residents
                .find_mut(target)
                .expect("resident edge target has no slot");
            let improves = !entry.initialized
                || weight.total_cmp(&entry.slot.weight) == Ordering::Greater;
            if improves {
                entry.slot.edge = Some(edge);
                entry.slot.weight = weight;
                entry.initialized = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardWalker;
    use crate::graph::{AlignmentGraph, FittingGraph, GlobalGraph, Node};
    use crate::score::SimpleScorer;

    #[test]
    fn walks_a_global_graph_like_needleman_wunsch() {
        let sub = SimpleScorer::substitution(1i32, 0);
        let gap = SimpleScorer::gap(0);
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("panama", "banana", &sub, &gap);
        let walker = ForwardWalker::new(g, g.down_count() - 1);
        assert_eq!(walker.find(g.leaf()).weight, 4);
        // Interior prefix: "pa" vs "ba" matches once.
        assert_eq!(walker.find(Node::at(2, 2, 0)).weight, 1);
    }

    #[test]
    fn resident_slots_accumulate_freerides() {
        let sub = SimpleScorer::substitution(1i32, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("xxabxx", "ab", &sub, &gap, &freeride);
        let walker = ForwardWalker::new(g, g.down_count() - 1);
        // Fitting finds "ab" inside the longer down sequence.
        assert_eq!(walker.find(g.leaf()).weight, 2);
    }

    #[test]
    fn partial_walks_answer_for_held_rows() {
        let sub = SimpleScorer::substitution(1i32, 0);
        let gap = SimpleScorer::gap(0);
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("panama", "banana", &sub, &gap);
        let walker = ForwardWalker::new(g, 2);
        // Rows 1 and 2 are held; "pa" against "banana" matches one 'a'.
        assert_eq!(walker.find(Node::at(2, 6, 0)).weight, 1);
        assert!(walker.find(Node::at(1, 1, 0)).edge.is_some());
    }
}
