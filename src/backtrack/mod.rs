//! Maximum-weight path extraction.
//!
//! Two backtrackers share the walker machinery in this module:
//!
//! * [`full_grid::find_max_path`] keeps one slot per node for the whole
//!   graph and walks it in topological order — fastest, quadratic memory.
//! * [`SlicedBacktracker`] keeps two rows of slots plus the resident
//!   table, locating path edges by converging forward and backward walks
//!   on middle rows — linear working memory for a quadratic graph.
//!
//! Both report the same total weight; when several maximum paths exist
//! they may pick different edge sequences.

mod bidi;
mod error;
pub mod full_grid;
mod path;
mod segment;
mod sliced;
mod slot;
mod subdivide;
mod walker;

pub use self::bidi::BidiWalker;
pub use self::error::BacktrackError;
pub use self::full_grid::FullSlot;
pub use self::path::{PathArena, PathLink};
pub use self::segment::{Part, ResidentSegmenter};
pub use self::sliced::SlicedBacktracker;
pub use self::slot::{ResidentTable, RowTable, Slot};
pub use self::subdivide::SlicedSubdivider;
pub use self::walker::ForwardWalker;
