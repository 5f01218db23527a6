//! The board: a sparse grid of components advanced in synchronous ticks.
//!
//! A tick runs in two phases over the pre-tick grid:
//! 1. **evaluate**: every component computes its outputs (and, for memory cells, its successor
//!    state) from its current ports. Results go to a back buffer; the grid is not touched.
//! 2. **pull**: every component gathers its next inputs from the back buffer. A cell's input on
//!    edge `e` is the output its neighbour across `e` drove on the opposite edge, so exactly one
//!    writer exists per input port and the phase needs no ordering.
//!
//! Only after both phases succeed are the staged inputs and memory states written back. A failed
//! tick leaves the board exactly as it was.

use std::ops::Add;

use log::{debug, trace, warn};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::component::{Component, Evaluation, MemoryState};
use crate::config::{BoardConfig, BoundaryPolicy, Schedule};
use crate::coord::Coord;
use crate::error::CircuitError;
use crate::ports::{Edge, PortSet};
use crate::rule::PortRule;

/// Counters for the most recent successful tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickStats {
    /// Index of the tick these counters describe (1 for the first tick).
    pub tick: u64,
    pub cells: usize,
    /// Output bits that reached a neighbour.
    pub propagated: usize,
    /// Output bits driven towards an empty coordinate and discarded.
    pub dropped: usize,
}

/// Read-only view of one cell for inspection and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub at: Coord,
    pub rule: String,
    pub ports: PortSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryState>,
}

impl CellView {
    fn of(c: &Component) -> Self {
        Self {
            at: c.location(),
            rule: c.rule_name().to_string(),
            ports: c.ports(),
            memory: c.memory(),
        }
    }
}

/// The whole board, ordered by coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tick: u64,
    pub cells: Vec<CellView>,
}

/// Next-tick values for one cell, produced by the pull phase.
type Staged = (Coord, PortSet, Option<MemoryState>);

/// Result of checking every driven output against the occupied set.
#[derive(Debug, Clone, Copy, Default)]
struct Scan {
    driven: usize,
    dropped: usize,
    /// Smallest `(from, edge)` that left the grid, so the reported offender does not depend on
    /// visitation order.
    first_escape: Option<(Coord, Edge)>,
}

impl Add for Scan {
    type Output = Scan;

    fn add(self, rhs: Scan) -> Scan {
        Scan {
            driven: self.driven + rhs.driven,
            dropped: self.dropped + rhs.dropped,
            first_escape: match (self.first_escape, rhs.first_escape) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: FxHashMap<Coord, Component>,
    config: BoardConfig,
    tick: u64,
    stats: TickStats,
    evaluated: FxHashMap<Coord, Evaluation>,
    staged: Vec<Staged>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn set_config(&mut self, config: BoardConfig) {
        self.config = config;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of ticks committed so far.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Counters of the last committed tick.
    #[inline]
    pub fn stats(&self) -> TickStats {
        self.stats
    }

    // ---- construction ----

    /// Adds `component` at `at`. The component's own location is overwritten with `at`.
    pub fn insert(&mut self, at: Coord, mut component: Component) -> Result<(), CircuitError> {
        if self.cells.contains_key(&at) {
            return Err(CircuitError::Occupied { at });
        }
        component.relocate(at);
        self.cells.insert(at, component);
        Ok(())
    }

    /// Builds a component from `rule` and adds it at `at`.
    pub fn place(&mut self, at: Coord, rule: impl Into<PortRule>) -> Result<(), CircuitError> {
        self.insert(at, Component::new(at, rule))
    }

    pub fn remove(&mut self, at: Coord) -> Option<Component> {
        self.cells.remove(&at)
    }

    /// Raises one input port of the cell at `at`.
    pub fn drive(&mut self, at: Coord, edge: Edge) -> Result<(), CircuitError> {
        let c = self.get_mut(at)?;
        let mut p = c.ports();
        p[edge] = true;
        c.set_ports(p);
        Ok(())
    }

    pub fn set_ports(&mut self, at: Coord, ports: PortSet) -> Result<(), CircuitError> {
        self.get_mut(at)?.set_ports(ports);
        Ok(())
    }

    pub fn clear_at(&mut self, at: Coord) -> Result<(), CircuitError> {
        self.get_mut(at)?.clear();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        for c in self.cells.values_mut() {
            c.clear();
        }
    }

    fn get_mut(&mut self, at: Coord) -> Result<&mut Component, CircuitError> {
        self.cells.get_mut(&at).ok_or(CircuitError::Vacant { at })
    }

    // ---- observation ----

    pub fn get(&self, at: Coord) -> Option<&Component> {
        self.cells.get(&at)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.cells.contains_key(&at)
    }

    pub fn ports(&self, at: Coord) -> Option<PortSet> {
        self.cells.get(&at).map(Component::ports)
    }

    /// Latch and counter of a memory cell; `None` for empty or combinational cells.
    pub fn memory(&self, at: Coord) -> Option<MemoryState> {
        self.cells.get(&at).and_then(Component::memory)
    }

    pub fn view(&self, at: Coord) -> Option<CellView> {
        self.cells.get(&at).map(CellView::of)
    }

    /// Occupied coordinates in ascending order.
    pub fn coords(&self) -> Vec<Coord> {
        let mut v: Vec<Coord> = self.cells.keys().copied().collect();
        v.sort_unstable();
        v
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells: Vec<CellView> = self.cells.values().map(CellView::of).collect();
        cells.sort_unstable_by_key(|v| v.at);
        BoardSnapshot {
            tick: self.tick,
            cells,
        }
    }

    /// Checks every rule on the board for purity, in coordinate order.
    pub fn validate(&self) -> Result<(), CircuitError> {
        for at in self.coords() {
            if let Some(c) = self.cells.get(&at) {
                c.rule().validate()?;
            }
        }
        Ok(())
    }

    // ---- ticking ----

    /// Advances the whole board by one step.
    ///
    /// On error nothing is committed: ports, memory and the tick counter keep their pre-tick
    /// values.
    pub fn tick(&mut self) -> Result<(), CircuitError> {
        let staged = match self.config.schedule {
            Schedule::Sequential => self.stage_sequential(),
            Schedule::Parallel => self.stage_parallel(),
        };

        let scan = match staged {
            Ok(scan) => scan,
            Err(e) => {
                self.staged.clear();
                warn!("tick {} aborted: {e}", self.tick + 1);
                return Err(e);
            }
        };

        for (at, inputs, memory) in self.staged.drain(..) {
            if let Some(c) = self.cells.get_mut(&at) {
                c.commit(inputs, memory);
            }
        }
        self.tick += 1;
        self.stats = TickStats {
            tick: self.tick,
            cells: self.cells.len(),
            propagated: scan.driven - scan.dropped,
            dropped: scan.dropped,
        };
        debug!(
            "tick {}: {} cells, {} signals propagated, {} dropped",
            self.tick, self.stats.cells, self.stats.propagated, self.stats.dropped
        );
        Ok(())
    }

    /// Runs `n` ticks, stopping at the first failure.
    pub fn ticks(&mut self, n: usize) -> Result<(), CircuitError> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }

    fn stage_sequential(&mut self) -> Result<Scan, CircuitError> {
        let cells = &self.cells;

        self.evaluated.clear();
        self.evaluated.extend(cells.iter().map(|(&at, c)| (at, c.peek())));

        let evaluated = &self.evaluated;
        let scan = evaluated
            .iter()
            .map(|(&at, ev)| scan_outputs(cells, at, ev.outputs))
            .fold(Scan::default(), Scan::add);
        self.check_boundary(scan)?;

        self.staged.clear();
        self.staged.extend(
            cells
                .keys()
                .map(|&at| (at, pull_inputs(evaluated, at), memory_of(evaluated, at))),
        );
        Ok(scan)
    }

    fn stage_parallel(&mut self) -> Result<Scan, CircuitError> {
        let cells = &self.cells;

        self.evaluated = cells.par_iter().map(|(&at, c)| (at, c.peek())).collect();

        let evaluated = &self.evaluated;
        let scan = evaluated
            .par_iter()
            .map(|(&at, ev)| scan_outputs(cells, at, ev.outputs))
            .reduce(Scan::default, Scan::add);
        self.check_boundary(scan)?;

        self.staged.clear();
        self.staged.par_extend(
            cells
                .par_iter()
                .map(|(&at, _)| (at, pull_inputs(evaluated, at), memory_of(evaluated, at))),
        );
        Ok(scan)
    }

    fn check_boundary(&self, scan: Scan) -> Result<(), CircuitError> {
        match (self.config.boundary, scan.first_escape) {
            (BoundaryPolicy::Error, Some((from, edge))) => {
                Err(CircuitError::OutOfBoundsPropagation {
                    from,
                    edge,
                    target: from.neighbor(edge),
                })
            }
            _ => Ok(()),
        }
    }
}

fn scan_outputs(cells: &FxHashMap<Coord, Component>, at: Coord, outputs: PortSet) -> Scan {
    let mut scan = Scan::default();
    for edge in outputs.raised() {
        scan.driven += 1;
        let received = at.neighbor(edge).is_some_and(|target| cells.contains_key(&target));
        if !received {
            trace!("signal from {at} on {edge} edge has no receiver");
            scan.dropped += 1;
            scan.first_escape = match scan.first_escape {
                Some(prev) => Some(prev.min((at, edge))),
                None => Some((at, edge)),
            };
        }
    }
    scan
}

/// Next-tick inputs of `at`: for each edge, what the neighbour across it drove back at us.
fn pull_inputs(evaluated: &FxHashMap<Coord, Evaluation>, at: Coord) -> PortSet {
    let mut inputs = PortSet::EMPTY;
    for edge in Edge::ALL {
        inputs[edge] = at
            .neighbor(edge)
            .and_then(|n| evaluated.get(&n))
            .is_some_and(|ev| ev.outputs[edge.opposite()]);
    }
    inputs
}

fn memory_of(evaluated: &FxHashMap<Coord, Evaluation>, at: Coord) -> Option<MemoryState> {
    evaluated.get(&at).and_then(|ev| ev.memory)
}
