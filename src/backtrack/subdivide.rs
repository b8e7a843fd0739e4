use core::cmp::Ordering;

use crate::backtrack::bidi::BidiWalker;
use crate::backtrack::path::PathArena;
use crate::graph::{AlignmentGraph, Edge, Middle, Node};
use crate::store::{FactoryPack, HeapPack};
use crate::weight::{TotalOrd, Weight};

/// Hirschberg-style divide and conquer over one segment.
///
/// Each step converges a bidirectional walker on the segment's middle row,
/// picks the crossing edge of the best end-to-end path and recurses on the
/// two halves, splicing edges into the [`PathArena`] around the parent
/// edge. Working memory stays at two rows per live walker.
pub struct SlicedSubdivider<G: AlignmentGraph, P: FactoryPack<G::Ix, G::Weight> = HeapPack> {
    graph: G,
    pack: P,
}

enum Insert {
    Initialize,
    Prefix(usize),
    Suffix(usize),
}

impl<G: AlignmentGraph> SlicedSubdivider<G> {
    pub fn new(graph: G) -> Self {
        Self::with_pack(graph, HeapPack)
    }
}

impl<G, P> SlicedSubdivider<G, P>
where
    G: AlignmentGraph,
    P: FactoryPack<G::Ix, G::Weight>,
{
    /// The graph must have no residents except its own root and leaf;
    /// the resident segmenter guarantees that for segments it emits.
    pub fn with_pack(graph: G, pack: P) -> Self {
        debug_assert!(
            graph
                .resident_nodes()
                .all(|node| node == graph.root() || node == graph.leaf()),
            "segment contains interior residents"
        );
        Self { graph, pack }
    }

    /// A maximum-weight path through the segment, in splice order.
    pub fn subdivide(&self) -> PathArena<G::Ix, P::LinkStore> {
        let mut arena = PathArena::new(self.pack.path_links(self.graph.path_edge_capacity()));
        self.split(
            &mut arena,
            Insert::Initialize,
            self.graph.root(),
            self.graph.leaf(),
            G::Weight::zero(),
            G::Weight::zero(),
        );
        arena
    }

    fn split(
        &self,
        arena: &mut PathArena<G::Ix, P::LinkStore>,
        insert: Insert,
        from: Node<G::Ix>,
        to: Node<G::Ix>,
        weight_before: G::Weight,
        weight_after: G::Weight,
    ) {
        if from == to {
            return;
        }
        let sub = Middle::new(self.graph, from, to);
        let mid = (sub.down_count() - 1) / 2;
        let walker = BidiWalker::with_pack(sub, mid, self.pack);

        // The crossing edge of the best end-to-end path through this row:
        // the forward slot's edge where one exists (every mid-row node but
        // the segment root has one), else the backward slot's.
        struct Crossing<Ix, W> {
            total: W,
            edge: Edge<Ix>,
            before: W,
            after: W,
        }
        let mut best: Option<Crossing<G::Ix, G::Weight>> = None;
        for node in sub.row_nodes(mid) {
            let (forward, backward) = walker.find(node);
            let total = weight_before + forward.weight + backward.weight + weight_after;
            let improves = best
                .as_ref()
                .map_or(true, |b| total.total_cmp(&b.total) == Ordering::Greater);
            if !improves {
                continue;
            }
            let crossing = if let Some(edge) = forward.edge {
                let edge_weight = sub.edge_weight(&edge);
                Crossing {
                    total,
                    edge,
                    before: forward.weight - edge_weight,
                    after: backward.weight,
                }
            } else if let Some(edge) = backward.edge {
                let edge_weight = sub.edge_weight(&edge);
                Crossing {
                    total,
                    edge,
                    before: forward.weight,
                    after: backward.weight - edge_weight,
                }
            } else {
                debug_assert!(false, "mid-row node with no converging edge");
                continue;
            };
            best = Some(crossing);
        }
        let best = best.expect("segment middle row is empty");
        let edge_weight = sub.edge_weight(&best.edge);

        let at = match insert {
            Insert::Initialize => arena.initialize(best.edge),
            Insert::Prefix(parent) => arena.push_prefix(parent, best.edge),
            Insert::Suffix(parent) => arena.push_suffix(parent, best.edge),
        };

        self.split(
            arena,
            Insert::Prefix(at),
            from,
            sub.edge_source(&best.edge),
            weight_before,
            weight_after + best.after + edge_weight,
        );
        self.split(
            arena,
            Insert::Suffix(at),
            sub.edge_target(&best.edge),
            to,
            weight_before + best.before + edge_weight,
            weight_after,
        );
    }
}
