use serde::{Deserialize, Serialize};

/// What happens to a signal driven towards a coordinate with no component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// The signal vanishes. Dropped signals are counted in [`TickStats`](crate::board::TickStats).
    #[default]
    Drop,
    /// The tick fails with `OutOfBoundsPropagation` and the board keeps its pre-tick state.
    Error,
}

/// How the tick phases are executed. Results are identical for every schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schedule {
    #[default]
    Sequential,
    /// Evaluate and pull inputs on the rayon thread pool.
    Parallel,
}

/// Per-board settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub boundary: BoundaryPolicy,
    pub schedule: Schedule,
}

impl BoardConfig {
    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }
}
