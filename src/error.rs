use thiserror::Error;

use crate::coord::Coord;
use crate::ports::Edge;

/// Structured errors returned by construction, validation and ticking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CircuitError {
    /// A rule is not a pure function of its four ports, or an entry is malformed.
    #[error("configuration error in rule {rule}: {reason}")]
    Configuration { rule: String, reason: String },

    /// A component drove a signal into an unoccupied coordinate under
    /// [`BoundaryPolicy::Error`](crate::config::BoundaryPolicy::Error).
    /// `target` is `None` when the neighbour would lie past the `i32` range.
    #[error("signal on {edge} edge of {from} has no receiver")]
    OutOfBoundsPropagation {
        from: Coord,
        edge: Edge,
        target: Option<Coord>,
    },

    #[error("invalid delay length {length}: must be at least 1 and below u32::MAX")]
    InvalidDelay { length: i64 },

    #[error("cell {at} is already occupied")]
    Occupied { at: Coord },

    #[error("no component at {at}")]
    Vacant { at: Coord },

    #[error("unknown catalog entry: {name}")]
    UnknownEntry { name: String },

    #[error("catalog entry {name} requires a delay length")]
    MissingDelayLength { name: String },

    #[error("catalog entry {name} takes no delay length")]
    UnexpectedDelayLength { name: String },

    #[error("unknown circuit: {name}")]
    UnknownCircuit { name: String },
}
