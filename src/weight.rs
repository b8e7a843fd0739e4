//! Edge weight traits.
//!
//! Backtrackers only ever add, subtract and compare weights, so the weight
//! contract is kept deliberately small. Floats order through
//! `f32::total_cmp`/`f64::total_cmp`; non-numeric weight-shaped values (the
//! rotational consumption-gated weight) implement [`TotalOrd`] with their
//! own predicate.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, Sub};

// We cannot blanket impl over `Ord` here because of the trait system:
// f32/f64 could in theory implement `Ord`, and the blanket impl would then
// conflict with the float impls.
pub trait TotalOrd {
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_total_ord {
    ($($t:ty),*) => {
        $(
            impl TotalOrd for $t {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

#[rustfmt::skip]
impl_total_ord!(
    (),
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize
);

impl TotalOrd for f32 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl TotalOrd for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// An accumulated path weight.
///
/// Anything with `+`, `-`, a total order and a zero qualifies. The trait is
/// implemented for the primitive integers and floats; the rotational
/// aligner brings its own weight-shaped type
/// ([`GatedWeight`](crate::score::GatedWeight)).
pub trait Weight:
    Copy + Debug + Add<Output = Self> + Sub<Output = Self> + TotalOrd
{
    /// The additive identity, used to seed root slots.
    fn zero() -> Self;

    /// Whether the value is finite. Always `true` for non-float weights.
    fn is_finite(&self) -> bool {
        true
    }

    /// Equality within `tolerance`, computed without assuming negation or
    /// `abs` exist for the type.
    fn within(self, other: Self, tolerance: Self) -> bool {
        let difference = match self.total_cmp(&other) {
            Ordering::Less => other - self,
            _ => self - other,
        };
        difference.total_cmp(&tolerance) != Ordering::Greater
    }
}

macro_rules! impl_weight_int {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

#[rustfmt::skip]
impl_weight_int!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize
);

impl Weight for f32 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl Weight for f64 {
    fn zero() -> Self {
        0.0
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}
