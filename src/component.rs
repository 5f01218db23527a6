//! Grid-resident components.
//!
//! A [`Component`] owns its [`PortSet`] and a [`Logic`] value: either a combinational
//! [`PassRule`] or a [`MemoryCell`] (latched bit + elapsed-tick counter driven by a
//! [`DelayRule`]).

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::ports::PortSet;
use crate::rule::{DelayRule, PassRule, PortRule, StoreTrigger};

/// Cell footprint. Reserved for multi-cell components; propagation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u16,
    pub height: u16,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

/// Observable state of a memory cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryState {
    pub stored_bit: bool,
    pub ticks_since_store: u32,
    /// Store-rule result of the previous evaluation; only consulted for
    /// [`StoreTrigger::Rising`].
    pub last_candidate: bool,
}

/// Latched bit plus elapsed ticks, driven by a store/output rule pair.
#[derive(Debug, Clone)]
pub struct MemoryCell {
    state: MemoryState,
    rule: DelayRule,
}

impl MemoryCell {
    pub fn new(rule: DelayRule) -> Self {
        Self {
            state: MemoryState::default(),
            rule,
        }
    }

    #[inline]
    pub fn state(&self) -> MemoryState {
        self.state
    }

    #[inline]
    pub fn rule(&self) -> &DelayRule {
        &self.rule
    }

    /// Computes the successor state and the outputs for `inputs` without touching `self`.
    ///
    /// Order: store rule, latch/reset, output rule on the updated latch, then advance the
    /// counter for the next evaluation.
    pub fn step(&self, inputs: PortSet) -> (MemoryState, PortSet) {
        let mut next = self.state;
        let candidate = self.rule.store(inputs);
        let fires = match self.rule.trigger() {
            StoreTrigger::Level => candidate,
            StoreTrigger::Rising => candidate && !self.state.last_candidate,
        };
        if fires {
            next.stored_bit = true;
            next.ticks_since_store = 0;
        }
        let outputs = self.rule.output(next.stored_bit, next.ticks_since_store);
        next.ticks_since_store = next.ticks_since_store.saturating_add(1);
        next.last_candidate = candidate;
        (next, outputs)
    }

    pub fn evaluate(&mut self, inputs: PortSet) -> PortSet {
        let (next, outputs) = self.step(inputs);
        self.state = next;
        outputs
    }

    pub fn clear(&mut self) {
        self.state = MemoryState::default();
    }

    pub(crate) fn restore(&mut self, state: MemoryState) {
        self.state = state;
    }
}

/// What a component does with its inputs.
#[derive(Debug, Clone)]
pub enum Logic {
    Combinational(PassRule),
    Memory(MemoryCell),
}

/// Result of evaluating one component against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub outputs: PortSet,
    pub memory: Option<MemoryState>,
}

#[derive(Debug, Clone)]
pub struct Component {
    location: Coord,
    ports: PortSet,
    logic: Logic,
    footprint: Footprint,
}

impl Component {
    pub fn new(location: Coord, rule: impl Into<PortRule>) -> Self {
        let logic = match rule.into() {
            PortRule::Pass(r) => Logic::Combinational(r),
            PortRule::Delay(r) => Logic::Memory(MemoryCell::new(r)),
        };
        Self {
            location,
            ports: PortSet::EMPTY,
            logic,
            footprint: Footprint::default(),
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    #[inline]
    pub fn location(&self) -> Coord {
        self.location
    }

    pub(crate) fn relocate(&mut self, at: Coord) {
        self.location = at;
    }

    #[inline]
    pub fn ports(&self) -> PortSet {
        self.ports
    }

    #[inline]
    pub fn set_ports(&mut self, ports: PortSet) {
        self.ports = ports;
    }

    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[inline]
    pub fn logic(&self) -> &Logic {
        &self.logic
    }

    pub fn rule_name(&self) -> &str {
        match &self.logic {
            Logic::Combinational(r) => r.name(),
            Logic::Memory(m) => m.rule().name(),
        }
    }

    /// The rule as a standalone capability, e.g. for validation.
    pub fn rule(&self) -> PortRule {
        match &self.logic {
            Logic::Combinational(r) => PortRule::Pass(r.clone()),
            Logic::Memory(m) => PortRule::Delay(m.rule().clone()),
        }
    }

    pub fn memory(&self) -> Option<MemoryState> {
        match &self.logic {
            Logic::Combinational(_) => None,
            Logic::Memory(m) => Some(m.state()),
        }
    }

    pub fn is_memory(&self) -> bool {
        matches!(self.logic, Logic::Memory(_))
    }

    /// Applies the rule once to `inputs` and returns the outputs.
    ///
    /// Combinational components are left untouched. Memory components advance their latch and
    /// counter. The component's own ports are not modified.
    pub fn evaluate(&mut self, inputs: PortSet) -> PortSet {
        match &mut self.logic {
            Logic::Combinational(r) => r.apply(inputs),
            Logic::Memory(m) => m.evaluate(inputs),
        }
    }

    /// Evaluates the current ports in place: afterwards the ports hold the outputs.
    pub fn compute(&mut self) {
        self.ports = self.evaluate(self.ports);
    }

    /// Evaluation against the current ports with no side effects.
    pub fn peek(&self) -> Evaluation {
        match &self.logic {
            Logic::Combinational(r) => Evaluation {
                outputs: r.apply(self.ports),
                memory: None,
            },
            Logic::Memory(m) => {
                let (state, outputs) = m.step(self.ports);
                Evaluation {
                    outputs,
                    memory: Some(state),
                }
            }
        }
    }

    /// Installs next-tick inputs and, for memory cells, the post-evaluation state.
    pub(crate) fn commit(&mut self, inputs: PortSet, memory: Option<MemoryState>) {
        self.ports = inputs;
        if let (Logic::Memory(m), Some(state)) = (&mut self.logic, memory) {
            m.restore(state);
        }
    }

    /// Lowers every port and zeroes any memory.
    pub fn clear(&mut self) {
        self.ports.clear();
        if let Logic::Memory(m) = &mut self.logic {
            m.clear();
        }
    }
}
