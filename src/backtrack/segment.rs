use smallvec::SmallVec;

use crate::backtrack::bidi::BidiWalker;
use crate::graph::{AlignmentGraph, Edge, Middle, Node};
use crate::store::{FactoryPack, HeapPack};

/// One element of the segment-hop chain a maximum path travels through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part<Ix> {
    /// A sub-DAG free of resident-touching interior edges; the sliced
    /// subdivider can walk it with row slots alone.
    Segment { from: Node<Ix>, to: Node<Ix> },
    /// A single resident-touching edge joining two segments.
    Hop(Edge<Ix>),
}

/// Splits a graph into segments joined by hops.
///
/// Row streaming cannot see long-range resident edges, so the sliced
/// backtracker first pins down which resident edges a maximum path uses
/// (the hops); whatever lies between two hops is a segment the subdivider
/// handles. Without this step a path travelling through a long-range
/// freeride would be invisible to the row-wise walkers.
pub struct ResidentSegmenter<P = HeapPack> {
    pack: P,
}

impl ResidentSegmenter {
    pub fn new() -> Self {
        Self { pack: HeapPack }
    }
}

impl Default for ResidentSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ResidentSegmenter<P> {
    pub fn with_pack(pack: P) -> Self {
        Self { pack }
    }

    /// The segment-hop chain of some maximum path, plus that path's
    /// weight.
    pub fn segment_chain<G>(
        &self,
        graph: G,
        tolerance: G::Weight,
    ) -> (Vec<Part<G::Ix>>, G::Weight)
    where
        G: AlignmentGraph,
        P: FactoryPack<G::Ix, G::Weight> + Copy,
    {
        let max_weight = {
            let walker =
                BidiWalker::<G, P>::with_pack(graph, graph.down_count() - 1, self.pack);
            let (forward, backward) = walker.find(graph.leaf());
            forward.weight + backward.weight
        };

        let mut residents: SmallVec<[Node<G::Ix>; 2]> = graph.resident_nodes().collect();
        residents.sort_unstable();

        // Pin down the resident edge used at every resident a maximum
        // path passes through, in path order.
        let mut resident_edges: SmallVec<[Edge<G::Ix>; 4]> = SmallVec::new();
        let mut last_to = graph.root();
        for &resident in residents.iter() {
            // Residents behind the chain so far belong to a different
            // optimal path.
            if resident < last_to {
                continue;
            }
            if !BidiWalker::is_node_on_max_path(graph, resident, max_weight, tolerance) {
                continue;
            }
            // Clamp to [last_to, leaf] so the walk cannot pick an edge
            // belonging to an optimal path that bypasses the chain built
            // so far.
            let clamped = Middle::new(graph, last_to, graph.leaf());
            if !clamped.contains(resident) {
                continue;
            }
            let (forward, backward) = BidiWalker::converge(clamped, resident);
            let picked = if graph.has_in_edges(resident) {
                forward.edge
            } else {
                backward.edge
            };
            // No converged edge: the clamp has collapsed to a point (the
            // chain already ends at this resident), nothing left to pin.
            let Some(edge) = picked else {
                continue;
            };
            resident_edges.push(edge);
            last_to = graph.edge_target(&edge);
        }

        // Stitch the chain: a segment wherever two consecutive resident
        // edges are not directly adjacent.
        let mut parts = Vec::with_capacity(resident_edges.len() * 2 + 1);
        let mut last_to = graph.root();
        for edge in resident_edges {
            let from = graph.edge_source(&edge);
            if last_to != from {
                parts.push(Part::Segment {
                    from: last_to,
                    to: from,
                });
            }
            parts.push(Part::Hop(edge));
            last_to = graph.edge_target(&edge);
        }
        if last_to != graph.leaf() {
            parts.push(Part::Segment {
                from: last_to,
                to: graph.leaf(),
            });
        }

        (parts, max_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::{Part, ResidentSegmenter};
    use crate::graph::{AlignmentGraph, EdgeKind, FittingGraph, GlobalGraph};
    use crate::score::SimpleScorer;

    #[test]
    fn global_graphs_yield_hop_segment_hop() {
        let sub = SimpleScorer::substitution(1i32, 0);
        let gap = SimpleScorer::gap(0);
        let g: GlobalGraph<'_, str, str, _, _, usize> =
            GlobalGraph::new("panama", "banana", &sub, &gap);
        let (parts, weight) = ResidentSegmenter::new().segment_chain(g, 0);
        assert_eq!(weight, 4);

        // First and last parts are the hops off the root and into the leaf.
        assert!(matches!(parts.first(), Some(Part::Hop(_))));
        assert!(matches!(parts.last(), Some(Part::Hop(_))));
        // The chain is contiguous from root to leaf.
        let mut cursor = g.root();
        for part in &parts {
            match part {
                Part::Hop(edge) => {
                    assert_eq!(g.edge_source(edge), cursor);
                    cursor = g.edge_target(edge);
                }
                Part::Segment { from, to } => {
                    assert_eq!(*from, cursor);
                    cursor = *to;
                }
            }
        }
        assert_eq!(cursor, g.leaf());
    }

    #[test]
    fn fitting_hops_can_be_freerides() {
        let sub = SimpleScorer::substitution(1i32, -1);
        let gap = SimpleScorer::gap(-1);
        let freeride = SimpleScorer::freeride();
        let g: FittingGraph<'_, str, str, _, _, _, usize> =
            FittingGraph::new("xxabxx", "ab", &sub, &gap, &freeride);
        let (parts, weight) = ResidentSegmenter::new().segment_chain(g, 0);
        assert_eq!(weight, 2);
        let has_freeride_hop = parts.iter().any(|part| {
            matches!(part, Part::Hop(edge) if edge.kind == EdgeKind::Freeride)
        });
        assert!(has_freeride_hop);
    }
}
