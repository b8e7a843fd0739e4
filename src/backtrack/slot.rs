use core::marker::PhantomData;

use crate::graph::{Edge, Node};
use crate::index::GridIndex;
use crate::store::{ResidentEntry, Store};
use crate::weight::Weight;

/// Best-predecessor record for one node: the edge the maximum-weight path
/// arrives through and the weight accumulated along it. A root slot keeps
/// `edge: None` and weight zero.
#[derive(Clone, Copy, Debug)]
pub struct Slot<Ix, W> {
    pub edge: Option<Edge<Ix>>,
    pub weight: W,
}

impl<Ix, W: Weight> Default for Slot<Ix, W> {
    fn default() -> Self {
        Self {
            edge: None,
            weight: W::zero(),
        }
    }
}

/// Two rows of slots: the row being filled and the row above it.
///
/// `advance_row` swaps the roles and clears the fresh current row, so the
/// forward walker never holds more than `2 × right_count × depth_count`
/// slots.
pub struct RowTable<Ix: GridIndex, W: Weight, S> {
    previous: S,
    current: S,
    depth_count: usize,
    row: usize,
    _marker: PhantomData<fn() -> (Ix, W)>,
}

impl<Ix, W, S> RowTable<Ix, W, S>
where
    Ix: GridIndex,
    W: Weight,
    S: Store<Slot<Ix, W>>,
{
    /// Both stores must be `right_count * depth_count` slots wide; the
    /// table starts primed at row 0.
    pub fn new(depth_count: usize, previous: S, current: S) -> Self {
        debug_assert_eq!(previous.len(), current.len(), "row stores differ in width");
        Self {
            previous,
            current,
            depth_count,
            row: 0,
            _marker: PhantomData,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Swap previous and current, then clear the new current row.
    pub fn advance_row(&mut self) {
        core::mem::swap(&mut self.previous, &mut self.current);
        for slot in self.current.as_mut_slice() {
            *slot = Slot::default();
        }
        self.row += 1;
    }

    fn store_for(&self, row: usize) -> Option<&S> {
        if row == self.row {
            Some(&self.current)
        } else if self.row > 0 && row == self.row - 1 {
            Some(&self.previous)
        } else {
            None
        }
    }

    /// The slot for a grid offset, if its row is previous or current.
    pub fn find(&self, offset: (usize, usize, usize)) -> Option<&Slot<Ix, W>> {
        let store = self.store_for(offset.0)?;
        Some(&store.as_slice()[offset.1 * self.depth_count + offset.2])
    }

    pub fn find_mut(&mut self, offset: (usize, usize, usize)) -> Option<&mut Slot<Ix, W>> {
        let index = offset.1 * self.depth_count + offset.2;
        if offset.0 == self.row {
            Some(&mut self.current.as_mut_slice()[index])
        } else if self.row > 0 && offset.0 == self.row - 1 {
            Some(&mut self.previous.as_mut_slice()[index])
        } else {
            None
        }
    }
}

/// Slots for the resident nodes, sorted by node id for binary search.
///
/// Unlike row slots these live for the whole walk; the `initialized` flag
/// on each entry distinguishes "never written" from "written with the
/// default weight".
pub struct ResidentTable<Ix: GridIndex, W, S> {
    entries: S,
    _marker: PhantomData<fn() -> (Ix, W)>,
}

impl<Ix, W, S> ResidentTable<Ix, W, S>
where
    Ix: GridIndex,
    W: Weight,
    S: Store<ResidentEntry<Ix, W>>,
{
    pub fn new(mut entries: S) -> Self {
        entries.as_mut_slice().sort_unstable_by_key(|entry| entry.node);
        Self {
            entries,
            _marker: PhantomData,
        }
    }

    fn position(&self, node: Node<Ix>) -> Option<usize> {
        self.entries
            .as_slice()
            .binary_search_by(|entry| entry.node.cmp(&node))
            .ok()
    }

    pub fn find(&self, node: Node<Ix>) -> Option<&ResidentEntry<Ix, W>> {
        self.position(node).map(|at| &self.entries.as_slice()[at])
    }

    pub fn find_mut(&mut self, node: Node<Ix>) -> Option<&mut ResidentEntry<Ix, W>> {
        let at = self.position(node)?;
        Some(&mut self.entries.as_mut_slice()[at])
    }
}
