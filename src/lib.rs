//! **pairalign** is a pairwise sequence alignment graph library.
//!
//! An alignment of two sequences is modelled as a maximum-weight path
//! through a lazy directed acyclic graph laid out over a
//! `(down × right × depth)` grid. The crate provides the canonical graph
//! shapes (global, local, fitting, overlap, rotational and an affine
//! extended-gap shape), view adaptors over them, and two backtrackers that
//! extract the maximum-weight path:
//!
//! * [`backtrack::full_grid`] — walks the whole graph in topological order
//!   with one slot per node, then follows back-pointers.
//! * [`backtrack::SlicedBacktracker`] — Hirschberg-style divide and
//!   conquer. Walks the graph one row at a time and recursively bisects on
//!   the middle row, using linear working memory for a quadratic graph.
//!
//! The easiest entry points are the aligner functions in [`align`]:
//!
//! ```
//! use pairalign::align::align_global;
//! use pairalign::score::SimpleScorer;
//!
//! let sub = SimpleScorer::substitution(1i32, 0);
//! let gap = SimpleScorer::gap(0);
//! let (alignment, score) = align_global("panama", "banana", &sub, &gap).unwrap();
//! assert_eq!(score, 4);
//! assert_eq!(alignment.len(), 6);
//! ```

pub mod align;
pub mod backtrack;
pub mod graph;
pub mod index;
pub mod score;
pub mod seq;
pub mod store;
pub mod weight;

pub use crate::align::{
    align_extended_gap, align_fitting, align_global, align_local, align_overlap,
    align_rotational, Aligner, Alignment, AlignmentStep,
};
pub use crate::graph::{AlignmentGraph, Edge, EdgeKind, Node};
pub use crate::index::GridIndex;
pub use crate::score::Scorer;
pub use crate::seq::Seq;
pub use crate::weight::{TotalOrd, Weight};
