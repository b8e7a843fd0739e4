//! Container factories.
//!
//! Every growable container inside the walkers and backtrackers is created
//! through a [`ContainerFactory`], so callers can pick between plain heap
//! allocation ([`HeapFactory`]) and inline, compile-time-bounded storage
//! ([`BoundedFactory`]). The [`FactoryPack`] bundles group one factory per
//! container kind the way each algorithm consumes them.

use smallvec::SmallVec;

use crate::backtrack::{FullSlot, PathLink, Slot};
use crate::graph::{Edge, Node};
use crate::index::GridIndex;
use crate::weight::Weight;

/// Minimal push-container contract shared by `Vec` and inline vectors.
pub trait Store<T> {
    fn push(&mut self, value: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;
    fn as_slice(&self) -> &[T];
    fn as_mut_slice(&mut self) -> &mut [T];

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Store<T> for Vec<T> {
    fn push(&mut self, value: T) {
        Vec::push(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn len(&self) -> usize {
        Vec::as_slice(self).len()
    }

    fn as_slice(&self) -> &[T] {
        Vec::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        Vec::as_mut_slice(self)
    }
}

impl<T, const CAP: usize> Store<T> for SmallVec<[T; CAP]> {
    fn push(&mut self, value: T) {
        debug_assert!(
            SmallVec::len(self) < CAP,
            "bounded container capacity exceeded"
        );
        SmallVec::push(self, value);
    }

    fn pop(&mut self) -> Option<T> {
        SmallVec::pop(self)
    }

    fn len(&self) -> usize {
        SmallVec::len(self)
    }

    fn as_slice(&self) -> &[T] {
        SmallVec::as_slice(self)
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        SmallVec::as_mut_slice(self)
    }
}

/// Creates one kind of container in the four shapes the algorithms need.
pub trait ContainerFactory<T> {
    type Container: Store<T>;

    fn new_empty(&self) -> Self::Container;

    fn with_capacity(&self, capacity: usize) -> Self::Container;

    fn with_size(&self, len: usize) -> Self::Container
    where
        T: Clone + Default;

    fn with_items<I>(&self, items: I) -> Self::Container
    where
        I: IntoIterator<Item = T>;
}

/// Heap-backed factory producing `Vec`s.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapFactory;

impl<T> ContainerFactory<T> for HeapFactory {
    type Container = Vec<T>;

    fn new_empty(&self) -> Vec<T> {
        Vec::new()
    }

    fn with_capacity(&self, capacity: usize) -> Vec<T> {
        Vec::with_capacity(capacity)
    }

    fn with_size(&self, len: usize) -> Vec<T>
    where
        T: Clone + Default,
    {
        vec![T::default(); len]
    }

    fn with_items<I>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().collect()
    }
}

/// Bounded factory producing inline vectors of capacity `CAP`.
///
/// Exceeding `CAP` trips a debug assertion; in release the storage spills
/// to the heap instead of corrupting anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundedFactory<const CAP: usize>;

impl<T, const CAP: usize> ContainerFactory<T> for BoundedFactory<CAP> {
    type Container = SmallVec<[T; CAP]>;

    fn new_empty(&self) -> Self::Container {
        SmallVec::new()
    }

    fn with_capacity(&self, capacity: usize) -> Self::Container {
        debug_assert!(capacity <= CAP, "bounded container capacity exceeded");
        SmallVec::new()
    }

    fn with_size(&self, len: usize) -> Self::Container
    where
        T: Clone + Default,
    {
        debug_assert!(len <= CAP, "bounded container capacity exceeded");
        core::iter::repeat_with(T::default).take(len).collect()
    }

    fn with_items<I>(&self, items: I) -> Self::Container
    where
        I: IntoIterator<Item = T>,
    {
        let container: Self::Container = items.into_iter().collect();
        debug_assert!(container.len() <= CAP, "bounded container capacity exceeded");
        container
    }
}

/// Resident-table entry: a node with its slot and an initialized flag.
#[derive(Clone, Copy, Debug)]
pub struct ResidentEntry<Ix: GridIndex, W> {
    pub node: Node<Ix>,
    pub initialized: bool,
    pub slot: Slot<Ix, W>,
}

/// One factory per container kind the walkers and backtrackers allocate.
///
/// `HeapPack` is the default everywhere; [`BoundedPack`] pins every
/// container to caller-supplied inline capacities for allocation-free
/// operation on small, statically bounded alignments.
pub trait FactoryPack<Ix: GridIndex, W: Weight>: Copy {
    type RowStore: Store<Slot<Ix, W>>;
    type ResidentStore: Store<ResidentEntry<Ix, W>>;
    type LinkStore: Store<PathLink<Ix>>;
    type EdgeStore: Store<Edge<Ix>>;
    type GridStore: Store<FullSlot<Ix, W>>;
    type QueueStore: Store<usize>;

    /// One row of slots, `right_count * depth_count` wide.
    fn row_slots(&self, len: usize) -> Self::RowStore;

    /// The resident table, from its initial entries.
    fn resident_slots<I>(&self, items: I) -> Self::ResidentStore
    where
        I: IntoIterator<Item = ResidentEntry<Ix, W>>;

    /// Path arena links, bounded by the graph's path edge capacity.
    fn path_links(&self, capacity: usize) -> Self::LinkStore;

    /// A flat edge list, bounded by the graph's path edge capacity.
    fn edge_list(&self, capacity: usize) -> Self::EdgeStore;

    /// The full-grid backtracker's per-node slot table.
    fn grid_slots(&self, len: usize) -> Self::GridStore;

    /// The full-grid backtracker's ready stack.
    fn ready_queue(&self, capacity: usize) -> Self::QueueStore;
}

/// Heap-backed factory pack; the default for every algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapPack;

impl<Ix: GridIndex, W: Weight> FactoryPack<Ix, W> for HeapPack {
    type RowStore = Vec<Slot<Ix, W>>;
    type ResidentStore = Vec<ResidentEntry<Ix, W>>;
    type LinkStore = Vec<PathLink<Ix>>;
    type EdgeStore = Vec<Edge<Ix>>;
    type GridStore = Vec<FullSlot<Ix, W>>;
    type QueueStore = Vec<usize>;

    fn row_slots(&self, len: usize) -> Self::RowStore {
        HeapFactory.with_size(len)
    }

    fn resident_slots<I>(&self, items: I) -> Self::ResidentStore
    where
        I: IntoIterator<Item = ResidentEntry<Ix, W>>,
    {
        HeapFactory.with_items(items)
    }

    fn path_links(&self, capacity: usize) -> Self::LinkStore {
        HeapFactory.with_capacity(capacity)
    }

    fn edge_list(&self, capacity: usize) -> Self::EdgeStore {
        HeapFactory.with_capacity(capacity)
    }

    fn grid_slots(&self, len: usize) -> Self::GridStore {
        HeapFactory.with_size(len)
    }

    fn ready_queue(&self, capacity: usize) -> Self::QueueStore {
        HeapFactory.with_capacity(capacity)
    }
}

/// Bounded factory pack.
///
/// * `ROW` — one row of slots (`right_count * depth_count`),
/// * `RES` — resident nodes,
/// * `PATH` — path edges,
/// * `GRID` — whole grid (`down * right * depth`), also bounds the ready
///   stack.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundedPack<
    const ROW: usize,
    const RES: usize,
    const PATH: usize,
    const GRID: usize,
>;

impl<Ix, W, const ROW: usize, const RES: usize, const PATH: usize, const GRID: usize>
    FactoryPack<Ix, W> for BoundedPack<ROW, RES, PATH, GRID>
where
    Ix: GridIndex,
    W: Weight,
{
    type RowStore = SmallVec<[Slot<Ix, W>; ROW]>;
    type ResidentStore = SmallVec<[ResidentEntry<Ix, W>; RES]>;
    type LinkStore = SmallVec<[PathLink<Ix>; PATH]>;
    type EdgeStore = SmallVec<[Edge<Ix>; PATH]>;
    type GridStore = SmallVec<[FullSlot<Ix, W>; GRID]>;
    type QueueStore = SmallVec<[usize; GRID]>;

    fn row_slots(&self, len: usize) -> Self::RowStore {
        BoundedFactory::<ROW>.with_size(len)
    }

    fn resident_slots<I>(&self, items: I) -> Self::ResidentStore
    where
        I: IntoIterator<Item = ResidentEntry<Ix, W>>,
    {
        BoundedFactory::<RES>.with_items(items)
    }

    fn path_links(&self, capacity: usize) -> Self::LinkStore {
        BoundedFactory::<PATH>.with_capacity(capacity)
    }

    fn edge_list(&self, capacity: usize) -> Self::EdgeStore {
        BoundedFactory::<PATH>.with_capacity(capacity)
    }

    fn grid_slots(&self, len: usize) -> Self::GridStore {
        BoundedFactory::<GRID>.with_size(len)
    }

    fn ready_queue(&self, capacity: usize) -> Self::QueueStore {
        BoundedFactory::<GRID>.with_capacity(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundedFactory, ContainerFactory, HeapFactory, Store};

    #[test]
    fn heap_factory_shapes() {
        let empty: Vec<u32> = HeapFactory.new_empty();
        assert!(empty.is_empty());
        let sized: Vec<u32> = HeapFactory.with_size(4);
        assert_eq!(sized.as_slice(), &[0, 0, 0, 0]);
        let items: Vec<u32> = HeapFactory.with_items([3, 1]);
        assert_eq!(items.as_slice(), &[3, 1]);
    }

    #[test]
    fn bounded_factory_shapes() {
        let factory = BoundedFactory::<8>;
        let mut store = ContainerFactory::<u16>::with_capacity(&factory, 8);
        store.push(7);
        store.push(9);
        assert_eq!(store.pop(), Some(9));
        assert_eq!(Store::len(&store), 1);
        let sized = ContainerFactory::<u16>::with_size(&factory, 3);
        assert_eq!(sized.as_slice(), &[0, 0, 0]);
    }
}
