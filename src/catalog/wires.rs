//! Reversible wires: whatever enters one end leaves the other, in both directions.

use crate::ports::{Edge, PortSet};
use crate::rule::PassRule;

use super::{Entry, Group};

/// End pairs, opposing first then adjacent.
const ENDS: [(Edge, Edge); 6] = [
    (Edge::Left, Edge::Right),
    (Edge::Top, Edge::Bottom),
    (Edge::Top, Edge::Right),
    (Edge::Left, Edge::Bottom),
    (Edge::Left, Edge::Top),
    (Edge::Bottom, Edge::Right),
];

pub fn wire_name(a: Edge, b: Edge) -> String {
    format!("{}_{}_WIRE", a.letter(), b.letter())
}

/// A wire joining edges `a` and `b`.
pub fn wire(a: Edge, b: Edge) -> PassRule {
    PassRule::new(&wire_name(a, b), move |p| {
        let mut out = PortSet::EMPTY;
        out[a] = p[b];
        out[b] = p[a];
        out
    })
}

pub(super) fn entries() -> Vec<Entry> {
    ENDS.iter()
        .map(|&(a, b)| Entry::fixed(Group::Wires, wire(a, b)))
        .collect()
}
