//! The named rule catalog.
//!
//! The registry is built once on first use and never mutated. Entries are looked up by name
//! and act as factories: `(coordinate[, delay length]) -> Component`. The board knows nothing
//! about the catalog; any entry here is just a [`PortRule`] by the time it is placed.
//!
//! Groups:
//! - [`wires`]: reversible two-ended wires.
//! - [`gates`]: AND / OR / XOR / AND-NOT with opposing or adjacent inputs.
//! - [`delays`]: delay lines parameterised by length, and latches.

pub mod delays;
pub mod gates;
pub mod wires;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::component::Component;
use crate::coord::Coord;
use crate::error::CircuitError;
use crate::ports::Edge;
use crate::rule::PortRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Wires,
    AndGates,
    OrGates,
    XorGates,
    AndNotGates,
    DelayLines,
    Latches,
}

#[derive(Debug, Clone)]
enum Factory {
    Fixed(PortRule),
    DelayLine { input: Edge, output: Edge },
}

/// One named catalog entry.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    group: Group,
    factory: Factory,
}

impl Entry {
    fn fixed(group: Group, rule: impl Into<PortRule>) -> Self {
        let rule = rule.into();
        Self {
            name: rule.name().to_string(),
            group,
            factory: Factory::Fixed(rule),
        }
    }

    fn delay_line(input: Edge, output: Edge) -> Self {
        Self {
            name: delays::delay_name(input, output),
            group: Group::DelayLines,
            factory: Factory::DelayLine { input, output },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Group {
        self.group
    }

    /// Whether [`Entry::rule`] needs a delay length.
    pub fn takes_delay(&self) -> bool {
        matches!(self.factory, Factory::DelayLine { .. })
    }

    pub fn rule(&self, delay: Option<i64>) -> Result<PortRule, CircuitError> {
        match (&self.factory, delay) {
            (Factory::Fixed(rule), None) => Ok(rule.clone()),
            (Factory::Fixed(_), Some(_)) => Err(CircuitError::UnexpectedDelayLength {
                name: self.name.clone(),
            }),
            (Factory::DelayLine { input, output }, Some(n)) => {
                Ok(delays::delay_line(*input, *output, n)?.into())
            }
            (Factory::DelayLine { .. }, None) => Err(CircuitError::MissingDelayLength {
                name: self.name.clone(),
            }),
        }
    }

    pub fn build(&self, at: Coord, delay: Option<i64>) -> Result<Component, CircuitError> {
        Ok(Component::new(at, self.rule(delay)?))
    }
}

struct Catalog {
    entries: Vec<Entry>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    fn build() -> Self {
        let mut entries = wires::entries();
        entries.extend(gates::entries());
        entries.extend(delays::entries());
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.clone(), i))
            .collect();
        Self { entries, index }
    }
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

pub fn get(name: &str) -> Option<&'static Entry> {
    CATALOG.index.get(name).map(|&i| &CATALOG.entries[i])
}

pub fn lookup(name: &str) -> Result<&'static Entry, CircuitError> {
    get(name).ok_or_else(|| CircuitError::UnknownEntry {
        name: name.to_string(),
    })
}

/// All entries in registration order.
pub fn entries() -> &'static [Entry] {
    &CATALOG.entries
}

pub fn names() -> Vec<&'static str> {
    CATALOG.entries.iter().map(Entry::name).collect()
}

pub fn group(group: Group) -> impl Iterator<Item = &'static Entry> {
    CATALOG.entries.iter().filter(move |e| e.group == group)
}

/// Builds the named entry and places it on `board`.
pub fn place(
    board: &mut Board,
    name: &str,
    at: Coord,
    delay: Option<i64>,
) -> Result<(), CircuitError> {
    let component = lookup(name)?.build(at, delay)?;
    board.insert(at, component)
}

/// Purity-checks every entry. Delay lines are checked at length 1.
pub fn validate_all() -> Result<(), CircuitError> {
    for e in entries() {
        let delay = e.takes_delay().then_some(1);
        e.rule(delay)?.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        assert_eq!(CATALOG.index.len(), CATALOG.entries.len());
        // 6 wires, 3 x 16 symmetric gates, 32 and-not, 12 delay lines, 12 latches
        assert_eq!(entries().len(), 6 + 48 + 32 + 24);
    }

    #[test]
    fn every_entry_is_pure() {
        validate_all().unwrap();
    }

    #[test]
    fn delay_parameter_must_match_entry_shape() {
        assert_eq!(
            lookup("L_R_WIRE").unwrap().rule(Some(2)).unwrap_err(),
            CircuitError::UnexpectedDelayLength {
                name: "L_R_WIRE".into()
            }
        );
        assert_eq!(
            lookup("L_R_DELAY").unwrap().rule(None).unwrap_err(),
            CircuitError::MissingDelayLength {
                name: "L_R_DELAY".into()
            }
        );
        assert!(matches!(
            lookup("L_R_DELAY").unwrap().rule(Some(0)),
            Err(CircuitError::InvalidDelay { length: 0 })
        ));
    }

    #[test]
    fn groups_partition_the_catalog() {
        let total: usize = [
            Group::Wires,
            Group::AndGates,
            Group::OrGates,
            Group::XorGates,
            Group::AndNotGates,
            Group::DelayLines,
            Group::Latches,
        ]
        .into_iter()
        .map(|g| group(g).count())
        .sum();
        assert_eq!(total, entries().len());
        assert_eq!(group(Group::Wires).count(), 6);
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert_eq!(
            lookup("NOPE").unwrap_err(),
            CircuitError::UnknownEntry {
                name: "NOPE".into()
            }
        );
    }
}
