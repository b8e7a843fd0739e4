//! Full-grid dynamic-programming backtracker.
//!
//! Allocates one slot per grid node, walks the graph in topological order
//! driven by unvisited-parent counting, then reconstructs the path by
//! following back-pointers from the leaf. The ready queue is a LIFO stack:
//! any topological order is correct, and popping the most recently pushed
//! node keeps the working set close to the current row.

use core::cmp::Ordering;

use error_stack::{Report, Result};
use fixedbitset::FixedBitSet;

use crate::backtrack::error::BacktrackError;
use crate::graph::{AlignmentGraph, Edge, Node};
use crate::index::GridIndex;
use crate::store::{FactoryPack, HeapPack, Store};
use crate::weight::{TotalOrd, Weight};

/// Per-node record: remaining unvisited parents, best back-edge and the
/// weight accumulated through it.
#[derive(Clone, Copy, Debug)]
pub struct FullSlot<Ix, W> {
    pub node: Node<Ix>,
    pub remaining_parents: usize,
    pub edge: Option<Edge<Ix>>,
    pub weight: W,
}

impl<Ix: GridIndex, W: Weight> Default for FullSlot<Ix, W> {
    fn default() -> Self {
        Self {
            node: Node::default(),
            remaining_parents: 0,
            edge: None,
            weight: W::zero(),
        }
    }
}

/// Find a maximum-weight root-to-leaf path and its total weight.
pub fn find_max_path<G: AlignmentGraph>(
    graph: G,
) -> Result<(Vec<Edge<G::Ix>>, G::Weight), BacktrackError> {
    find_max_path_with_pack(graph, HeapPack)
}

/// [`find_max_path`] with every container drawn from `pack`.
pub fn find_max_path_with_pack<G, P>(
    graph: G,
    pack: P,
) -> Result<(P::EdgeStore, G::Weight), BacktrackError>
where
    G: AlignmentGraph,
    P: FactoryPack<G::Ix, G::Weight>,
{
    let slot_count = graph.down_count() * graph.right_count() * graph.depth_count();
    let offset_of = |node: Node<G::Ix>| {
        let (down, right, depth) = graph.grid_offset(node);
        (down * graph.right_count() + right) * graph.depth_count() + depth
    };

    // Parent counts for every node; cells that hold no node (affine plane
    // borders) keep a default slot that is never pushed.
    let mut slots = pack.grid_slots(slot_count);
    for row in 0..graph.down_count() {
        for node in graph.row_nodes(row) {
            slots.as_mut_slice()[offset_of(node)] = FullSlot {
                node,
                remaining_parents: graph.in_degree(node),
                edge: None,
                weight: G::Weight::zero(),
            };
        }
    }

    let mut finalized = FixedBitSet::with_capacity(slot_count);
    let mut ready = pack.ready_queue(slot_count);
    ready.push(offset_of(graph.root()));

    while let Some(at) = ready.pop() {
        let node = slots.as_slice()[at].node;

        // All parents must already be finalized; anything else means the
        // ready queue ran ahead, and the node will be pushed again when
        // its last parent lands.
        if graph
            .in_edges(node)
            .any(|edge| !finalized.contains(offset_of(graph.edge_source(&edge))))
        {
            continue;
        }

        let mut best: Option<(Edge<G::Ix>, G::Weight)> = None;
        for edge in graph.in_edges(node) {
            let source = offset_of(graph.edge_source(&edge));
            let weight = slots.as_slice()[source].weight + graph.edge_weight(&edge);
            let improves = best
                .as_ref()
                .map_or(true, |(_, b)| weight.total_cmp(b) == Ordering::Greater);
            if improves {
                best = Some((edge, weight));
            }
        }
        if let Some((edge, weight)) = best {
            let slot = &mut slots.as_mut_slice()[at];
            slot.edge = Some(edge);
            slot.weight = weight;
        }
        finalized.insert(at);

        for edge in graph.out_edges(node) {
            let target = offset_of(graph.edge_target(&edge));
            let slot = &mut slots.as_mut_slice()[target];
            debug_assert!(slot.remaining_parents > 0, "parent count underflow");
            slot.remaining_parents -= 1;
            if slot.remaining_parents == 0 {
                ready.push(target);
            }
        }
    }

    // Reconstruct leaf-to-root, then flip.
    let mut path = pack.edge_list(graph.path_edge_capacity());
    let mut node = graph.leaf();
    while node != graph.root() {
        let slot = &slots.as_slice()[offset_of(node)];
        let Some(edge) = slot.edge else {
            return Err(Report::new(BacktrackError::Disconnected));
        };
        path.push(edge);
        node = graph.edge_source(&edge);
        debug_assert!(
            path.len() <= graph.path_edge_capacity(),
            "path exceeds capacity"
        );
    }
    path.as_mut_slice().reverse();

    let weight = slots.as_slice()[offset_of(graph.leaf())].weight;
    Ok((path, weight))
}
