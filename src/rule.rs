//! Component rules.
//!
//! A rule is the only behaviour a component has. It comes in exactly two shapes:
//! - [`PassRule`]: combinational, `PortSet -> PortSet`.
//! - [`DelayRule`]: sequential, a store rule `PortSet -> bool` paired with an output rule
//!   `(stored_bit, ticks_since_store) -> PortSet`.
//!
//! Rules are pure. They see nothing but their explicit arguments; all retained state lives in
//! the component (see [`crate::component::MemoryCell`]).

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CircuitError;
use crate::ports::PortSet;

type PassFn = dyn Fn(PortSet) -> PortSet + Send + Sync;
type StoreFn = dyn Fn(PortSet) -> bool + Send + Sync;
type OutputFn = dyn Fn(bool, u32) -> PortSet + Send + Sync;

/// Number of elapsed-tick values sampled when checking an output rule for purity.
const OUTPUT_SAMPLE_TICKS: u32 = 64;

/// Combinational rule: new outputs from current inputs.
#[derive(Clone)]
pub struct PassRule {
    name: Arc<str>,
    f: Arc<PassFn>,
}

impl PassRule {
    pub fn new(name: &str, f: impl Fn(PortSet) -> PortSet + Send + Sync + 'static) -> Self {
        Self {
            name: Arc::from(name),
            f: Arc::new(f),
        }
    }

    /// A rule that never drives anything.
    pub fn inert() -> Self {
        Self::new("INERT", |_| PortSet::EMPTY)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn apply(&self, inputs: PortSet) -> PortSet {
        (self.f)(inputs)
    }
}

impl fmt::Debug for PassRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PassRule").field(&self.name).finish()
    }
}

/// When a memory cell's store rule counts as firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreTrigger {
    /// Every evaluation where the store rule returns true.
    #[default]
    Level,
    /// Only evaluations where the store rule returns true after having returned false on the
    /// previous one. A held input therefore stores once.
    Rising,
}

/// Sequential rule pair driving a memory cell.
#[derive(Clone)]
pub struct DelayRule {
    name: Arc<str>,
    store: Arc<StoreFn>,
    output: Arc<OutputFn>,
    trigger: StoreTrigger,
}

impl DelayRule {
    pub fn new(
        name: &str,
        store: impl Fn(PortSet) -> bool + Send + Sync + 'static,
        output: impl Fn(bool, u32) -> PortSet + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Arc::from(name),
            store: Arc::new(store),
            output: Arc::new(output),
            trigger: StoreTrigger::Level,
        }
    }

    pub fn with_trigger(mut self, trigger: StoreTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn trigger(&self) -> StoreTrigger {
        self.trigger
    }

    #[inline]
    pub fn store(&self, inputs: PortSet) -> bool {
        (self.store)(inputs)
    }

    #[inline]
    pub fn output(&self, stored_bit: bool, ticks_since_store: u32) -> PortSet {
        (self.output)(stored_bit, ticks_since_store)
    }
}

impl fmt::Debug for DelayRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayRule")
            .field("name", &self.name)
            .field("trigger", &self.trigger)
            .finish()
    }
}

/// The rule capability: one of the two shapes above.
#[derive(Debug, Clone)]
pub enum PortRule {
    Pass(PassRule),
    Delay(DelayRule),
}

impl PortRule {
    pub fn name(&self) -> &str {
        match self {
            PortRule::Pass(r) => r.name(),
            PortRule::Delay(r) => r.name(),
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, PortRule::Delay(_))
    }

    /// Checks that the rule is observably pure: every sample, evaluated twice, must agree.
    ///
    /// Pass rules and store rules are sampled on all 16 port combinations. Output rules are
    /// sampled on both stored-bit values and the first `OUTPUT_SAMPLE_TICKS` elapsed counts.
    pub fn validate(&self) -> Result<(), CircuitError> {
        match self {
            PortRule::Pass(r) => {
                for p in PortSet::all() {
                    let (a, b) = (r.apply(p), r.apply(p));
                    if a != b {
                        return Err(impure(r.name(), format!("inputs {p} gave {a} then {b}")));
                    }
                }
            }
            PortRule::Delay(r) => {
                for p in PortSet::all() {
                    let (a, b) = (r.store(p), r.store(p));
                    if a != b {
                        return Err(impure(
                            r.name(),
                            format!("store rule on {p} gave {a} then {b}"),
                        ));
                    }
                }
                for stored in [false, true] {
                    for ticks in 0..=OUTPUT_SAMPLE_TICKS {
                        let (a, b) = (r.output(stored, ticks), r.output(stored, ticks));
                        if a != b {
                            return Err(impure(
                                r.name(),
                                format!("output rule on ({stored}, {ticks}) gave {a} then {b}"),
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<PassRule> for PortRule {
    fn from(r: PassRule) -> Self {
        PortRule::Pass(r)
    }
}

impl From<DelayRule> for PortRule {
    fn from(r: DelayRule) -> Self {
        PortRule::Delay(r)
    }
}

fn impure(rule: &str, detail: String) -> CircuitError {
    CircuitError::Configuration {
        rule: rule.to_string(),
        reason: format!("not a pure function: {detail}"),
    }
}
