use core::fmt::{Display, Formatter};

use error_stack::Context;

#[derive(Debug)]
pub enum AlignError {
    /// The chosen grid index type cannot represent
    /// `max(|down|, |right|) + 1`.
    IndexTooNarrow,
    /// A floating-point tolerance was NaN or infinite.
    NonFiniteTolerance,
    /// The backtracker failed on the constructed graph.
    Backtrack,
}

impl Display for AlignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IndexTooNarrow => write!(f, "grid index type too narrow for the sequences"),
            Self::NonFiniteTolerance => write!(f, "tolerance must be finite"),
            Self::Backtrack => write!(f, "backtracking failed"),
        }
    }
}

impl Context for AlignError {}
