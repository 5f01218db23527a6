//! A synchronous tick engine for digital logic laid out on a sparse 2-D grid.
//!
//! Every occupied cell holds a component with four directional ports. On each tick all
//! components evaluate against the same pre-tick snapshot, and every raised output lands on the
//! facing input of the 4-connected neighbour for the next tick.

pub mod coord;
pub mod ports;
pub mod rule;
pub mod component;
pub mod config;
pub mod error;
pub mod board;
pub mod catalog;
pub mod circuits;

pub use board::{Board, BoardSnapshot, CellView, TickStats};
pub use component::{Component, MemoryState};
pub use config::{BoardConfig, BoundaryPolicy, Schedule};
pub use coord::Coord;
pub use error::CircuitError;
pub use ports::{Edge, PortSet};
pub use rule::{DelayRule, PassRule, PortRule, StoreTrigger};
