//! Alignment graphs.
//!
//! An alignment graph is a DAG implicit over a `(down × right × depth)`
//! grid: nodes are grid positions, edges consume sequence elements
//! (substitutions and gaps) or skip over them (freerides). Graphs are
//! never materialized; every accessor derives its answer from grid
//! arithmetic, so a graph value is a few references and counters that are
//! cheap to copy. Algorithms take graphs by value, and the view adaptors
//! ([`Reversed`], [`Middle`]) wrap them by value.

mod affine;
mod clamp;
mod fitting;
mod global;
mod lattice;
mod local;
mod overlap;
mod reverse;

pub use self::affine::ExtendedGapGraph;
pub use self::clamp::{prefix, suffix, Middle};
pub use self::fitting::FittingGraph;
pub use self::global::GlobalGraph;
pub use self::local::LocalGraph;
pub use self::overlap::OverlapGraph;
pub use self::reverse::Reversed;

use crate::index::GridIndex;
use crate::weight::Weight;

/// A node: its grid position. Ordered lexicographically by
/// `(down, right, depth)`, which is consistent with reachability for the
/// shapes in this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node<Ix> {
    pub down: Ix,
    pub right: Ix,
    pub depth: u8,
}

impl<Ix: GridIndex> Node<Ix> {
    pub(crate) fn at(down: usize, right: usize, depth: usize) -> Self {
        Self {
            down: ix(down),
            right: ix(right),
            depth: depth as u8,
        }
    }
}

/// Whether an edge consumes sequence elements or skips over them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A substitution or gap step between grid-adjacent nodes.
    Lattice,
    /// A zero-consumption skip (shape freerides, affine gap closes).
    Freeride,
}

/// An edge, identified by its kind and endpoints.
///
/// The endpoints are stored in the orientation of the graph that created
/// the edge; view adaptors reinterpret them through
/// [`AlignmentGraph::edge_source`] / [`AlignmentGraph::edge_target`]
/// rather than rewriting the id, so an edge observed through a view can be
/// handed back to the underlying graph unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge<Ix> {
    pub kind: EdgeKind,
    pub from: Node<Ix>,
    pub to: Node<Ix>,
}

impl<Ix> Edge<Ix> {
    pub(crate) fn lattice(from: Node<Ix>, to: Node<Ix>) -> Self {
        Self {
            kind: EdgeKind::Lattice,
            from,
            to,
        }
    }

    pub(crate) fn freeride(from: Node<Ix>, to: Node<Ix>) -> Self {
        Self {
            kind: EdgeKind::Freeride,
            from,
            to,
        }
    }
}

/// Element offsets consumed by an edge: `None` for a freeride, otherwise
/// `(down index, right index)` with `None` on the gapped side.
pub type ElementOffsets<Ix> = Option<(Option<Ix>, Option<Ix>)>;

pub(crate) fn ix<Ix: GridIndex>(value: usize) -> Ix {
    Ix::from_usize(value).expect("grid offset exceeds index width")
}

/// Root and leaf as the resident set, collapsing to one entry on the
/// degenerate single-node grid.
pub(crate) fn corner_residents<Ix: GridIndex>(
    root: Node<Ix>,
    leaf: Node<Ix>,
) -> impl DoubleEndedIterator<Item = Node<Ix>> {
    core::iter::once(root).chain((leaf != root).then_some(leaf))
}

/// The alignment graph contract.
///
/// Implementations are `Copy` handles borrowing their sequences and
/// scorers. Grid offsets are reported in the graph's own coordinate
/// system: views remap them, so the same node id can sit at different
/// offsets through different views.
pub trait AlignmentGraph: Copy {
    type Ix: GridIndex;
    type Weight: Weight;

    /// Rows in the grid (`|down| + 1` for the plain shapes).
    fn down_count(&self) -> usize;

    /// Columns in the grid (`|right| + 1` for the plain shapes).
    fn right_count(&self) -> usize;

    /// Depth planes in the grid; 1 except for the extended-gap shape.
    fn depth_count(&self) -> usize {
        1
    }

    /// The unique source node.
    fn root(&self) -> Node<Self::Ix>;

    /// The unique sink node.
    fn leaf(&self) -> Node<Self::Ix>;

    /// The node an edge leaves, in this graph's orientation.
    fn edge_source(&self, edge: &Edge<Self::Ix>) -> Node<Self::Ix> {
        edge.from
    }

    /// The node an edge enters, in this graph's orientation.
    fn edge_target(&self, edge: &Edge<Self::Ix>) -> Node<Self::Ix> {
        edge.to
    }

    /// The edge's weight, as produced by the scorer for its edge class.
    fn edge_weight(&self, edge: &Edge<Self::Ix>) -> Self::Weight;

    /// The sequence elements the edge consumes, in this graph's
    /// coordinate system.
    fn edge_elements(&self, edge: &Edge<Self::Ix>) -> ElementOffsets<Self::Ix>;

    /// A node's `(down, right, depth)` offsets, in this graph's
    /// coordinate system.
    fn grid_offset(&self, node: Node<Self::Ix>) -> (usize, usize, usize);

    /// Incoming edges, in deterministic order.
    fn in_edges(&self, node: Node<Self::Ix>) -> impl DoubleEndedIterator<Item = Edge<Self::Ix>>;

    /// Outgoing edges, in deterministic order.
    fn out_edges(&self, node: Node<Self::Ix>) -> impl DoubleEndedIterator<Item = Edge<Self::Ix>>;

    fn in_degree(&self, node: Node<Self::Ix>) -> usize {
        self.in_edges(node).count()
    }

    fn out_degree(&self, node: Node<Self::Ix>) -> usize {
        self.out_edges(node).count()
    }

    fn has_in_edges(&self, node: Node<Self::Ix>) -> bool {
        self.in_edges(node).next().is_some()
    }

    /// Nodes of one row, in an order consistent with intra-row edges
    /// (every intra-row edge points forward in the iteration).
    fn row_nodes(&self, row: usize) -> impl DoubleEndedIterator<Item = Node<Self::Ix>>;

    /// Whether `to` is reachable from `from` (reflexive).
    fn is_reachable(&self, from: Node<Self::Ix>, to: Node<Self::Ix>) -> bool;

    /// Nodes with long-range edges, which row streaming must keep resident.
    fn resident_nodes(&self) -> impl DoubleEndedIterator<Item = Node<Self::Ix>>;

    /// The subset of `node`'s outgoing edges whose target is resident.
    fn out_edges_to_residents(
        &self,
        node: Node<Self::Ix>,
    ) -> impl Iterator<Item = Edge<Self::Ix>> {
        let graph = *self;
        self.out_edges(node).filter(move |edge| {
            let target = graph.edge_target(edge);
            graph.resident_nodes().any(|resident| resident == target)
        })
    }

    /// The subset of `node`'s incoming edges whose source is resident.
    fn in_edges_from_residents(
        &self,
        node: Node<Self::Ix>,
    ) -> impl Iterator<Item = Edge<Self::Ix>> {
        let graph = *self;
        self.in_edges(node).filter(move |edge| {
            let source = graph.edge_source(edge);
            graph.resident_nodes().any(|resident| resident == source)
        })
    }

    /// Upper bound on the number of resident nodes.
    fn resident_capacity(&self) -> usize {
        2
    }

    /// Upper bound on the number of edges in any root-to-leaf path.
    fn path_edge_capacity(&self) -> usize;

    /// Upper bound on any node's in-degree.
    fn in_edge_capacity(&self) -> usize;

    /// Upper bound on any node's out-degree.
    fn out_edge_capacity(&self) -> usize;
}
