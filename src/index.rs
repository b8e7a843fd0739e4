//! Grid coordinate widths.
//!
//! Alignment graphs address their grid with an unsigned coordinate type
//! chosen by the caller. A narrow type keeps the per-node slot tables small
//! on large alignments; the aligner entry points reject sequences the
//! chosen width cannot address.

use core::fmt::Debug;
use core::hash::Hash;

use funty::Unsigned;

/// An unsigned integer usable as a grid coordinate.
///
/// The type must be able to represent `max(|down|, |right|) + 1` for the
/// sequences being aligned. Implemented for `u8`, `u16`, `u32`, `u64` and
/// `usize`.
pub trait GridIndex: Unsigned + Ord + Eq + Hash + Copy + Default + Debug {
    /// Convert from `usize`, returning `None` if the value does not fit.
    fn from_usize(value: usize) -> Option<Self>;

    /// Widen to `usize`.
    fn index(self) -> usize;
}

macro_rules! impl_grid_index {
    ($($t:ty),*) => {
        $(
            impl GridIndex for $t {
                #[inline]
                fn from_usize(value: usize) -> Option<Self> {
                    if value as u128 <= <$t>::MAX as u128 {
                        Some(value as $t)
                    } else {
                        None
                    }
                }

                #[inline]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_grid_index!(u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::GridIndex;

    #[test]
    fn round_trips_within_width() {
        assert_eq!(u8::from_usize(255), Some(255u8));
        assert_eq!(u8::from_usize(256), None);
        assert_eq!(u16::from_usize(70_000), None);
        assert_eq!(u32::from_usize(70_000), Some(70_000u32));
        assert_eq!(usize::from_usize(usize::MAX), Some(usize::MAX));
        assert_eq!(200u8.index(), 200usize);
    }
}
