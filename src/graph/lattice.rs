//! The shared single-depth lattice.
//!
//! Every plain shape (global, local, fitting, overlap) has the same local
//! structure: from `(d, r)` a diagonal edge consuming both elements, a
//! vertical edge consuming the down element, and a horizontal edge
//! consuming the right element. Shapes wrap this core and add their
//! freeride sets.

use core::marker::PhantomData;

use crate::graph::{ix, Edge, ElementOffsets, Node};
use crate::index::GridIndex;
use crate::score::Scorer;
use crate::seq::Seq;
use crate::weight::Weight;

pub(crate) struct LatticeCore<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix> {
    pub(crate) down: &'a D,
    pub(crate) right: &'a R,
    pub(crate) sub: &'a Sub,
    pub(crate) gap: &'a Gap,
    pub(crate) down_count: usize,
    pub(crate) right_count: usize,
    _ix: PhantomData<fn() -> Ix>,
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix> Clone for LatticeCore<'a, D, R, Sub, Gap, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, D: ?Sized, R: ?Sized, Sub, Gap, Ix> Copy for LatticeCore<'a, D, R, Sub, Gap, Ix> {}

impl<'a, D, R, Sub, Gap, Ix, W> LatticeCore<'a, D, R, Sub, Gap, Ix>
where
    D: Seq + ?Sized,
    R: Seq + ?Sized,
    Sub: Scorer<D::Item, R::Item, Weight = W>,
    Gap: Scorer<D::Item, R::Item, Weight = W>,
    Ix: GridIndex,
    W: Weight,
{
    pub(crate) fn new(down: &'a D, right: &'a R, sub: &'a Sub, gap: &'a Gap) -> Self {
        Self {
            down,
            right,
            sub,
            gap,
            down_count: down.len() + 1,
            right_count: right.len() + 1,
            _ix: PhantomData,
        }
    }

    pub(crate) fn node(&self, down: usize, right: usize) -> Node<Ix> {
        Node::at(down, right, 0)
    }

    pub(crate) fn root(&self) -> Node<Ix> {
        self.node(0, 0)
    }

    pub(crate) fn leaf(&self) -> Node<Ix> {
        self.node(self.down_count - 1, self.right_count - 1)
    }

    /// The up-to-three lattice edges into `node`: diagonal, vertical,
    /// horizontal, in that order.
    pub(crate) fn in_edges(
        &self,
        node: Node<Ix>,
    ) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let (d, r) = (node.down.index(), node.right.index());
        let diagonal = (d > 0 && r > 0).then(|| Edge::lattice(self.node(d - 1, r - 1), node));
        let vertical = (d > 0).then(|| Edge::lattice(self.node(d - 1, r), node));
        let horizontal = (r > 0).then(|| Edge::lattice(self.node(d, r - 1), node));
        [diagonal, vertical, horizontal].into_iter().flatten()
    }

    /// The up-to-three lattice edges out of `node`, mirroring
    /// [`LatticeCore::in_edges`].
    pub(crate) fn out_edges(
        &self,
        node: Node<Ix>,
    ) -> impl DoubleEndedIterator<Item = Edge<Ix>> {
        let (d, r) = (node.down.index(), node.right.index());
        let below = d + 1 < self.down_count;
        let beside = r + 1 < self.right_count;
        let diagonal = (below && beside).then(|| Edge::lattice(node, self.node(d + 1, r + 1)));
        let vertical = below.then(|| Edge::lattice(node, self.node(d + 1, r)));
        let horizontal = beside.then(|| Edge::lattice(node, self.node(d, r + 1)));
        [diagonal, vertical, horizontal].into_iter().flatten()
    }

    pub(crate) fn elements(&self, edge: &Edge<Ix>) -> ElementOffsets<Ix> {
        let (fd, fr) = (edge.from.down.index(), edge.from.right.index());
        let (td, tr) = (edge.to.down.index(), edge.to.right.index());
        if fd + 1 == td && fr + 1 == tr {
            Some((Some(ix(fd)), Some(ix(fr))))
        } else if fd + 1 == td && fr == tr {
            Some((Some(ix(fd)), None))
        } else if fd == td && fr + 1 == tr {
            Some((None, Some(ix(fr))))
        } else {
            debug_assert!(false, "not a lattice edge");
            None
        }
    }

    pub(crate) fn weight(&self, edge: &Edge<Ix>) -> W {
        match self.elements(edge) {
            Some((Some(d), Some(r))) => {
                let (d, r) = (d.index(), r.index());
                self.sub
                    .score(Some((d, self.down.at(d))), Some((r, self.right.at(r))))
            }
            Some((Some(d), None)) => {
                let d = d.index();
                self.gap.score(Some((d, self.down.at(d))), None)
            }
            Some((None, Some(r))) => {
                let r = r.index();
                self.gap.score(None, Some((r, self.right.at(r))))
            }
            _ => W::zero(),
        }
    }

    /// Every node of a row, left to right.
    pub(crate) fn row_nodes(self, row: usize) -> impl DoubleEndedIterator<Item = Node<Ix>> + 'a {
        debug_assert!(row < self.down_count, "row out of bounds");
        (0..self.right_count).map(move |r| self.node(row, r))
    }

    /// Every node of the grid, row-major.
    pub(crate) fn nodes(self) -> impl DoubleEndedIterator<Item = Node<Ix>> + 'a {
        (0..self.down_count).flat_map(move |d| self.row_nodes(d))
    }

    /// Box reachability. For all the plain shapes the freerides only ever
    /// leave the root or enter the leaf, which box-dominate every node, so
    /// this is the full reachability relation.
    pub(crate) fn is_reachable(&self, from: Node<Ix>, to: Node<Ix>) -> bool {
        from.down <= to.down && from.right <= to.right
    }
}
