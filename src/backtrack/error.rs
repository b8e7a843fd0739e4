use core::fmt::{Display, Formatter};

use error_stack::Context;

#[derive(Debug)]
pub enum BacktrackError {
    /// The leaf never received a back-edge: no root-to-leaf path exists.
    Disconnected,
}

impl Display for BacktrackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "graph has no root-to-leaf path"),
        }
    }
}

impl Context for BacktrackError {}
