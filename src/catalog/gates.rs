//! Two-input boolean gates.
//!
//! Inputs sit either on opposing edges (`TB`, `LR`) or on adjacent edges (`TL`, `LB`, `BR`,
//! `RT`). The result is driven on one free edge or on both.

use serde::{Deserialize, Serialize};

use crate::ports::{Edge, PortSet};
use crate::rule::PassRule;

use super::{Entry, Group};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    And,
    Or,
    Xor,
    /// `a and not b`, where `a` is the first input.
    AndNot,
}

impl GateOp {
    #[inline]
    pub fn eval(self, a: bool, b: bool) -> bool {
        match self {
            GateOp::And => a && b,
            GateOp::Or => a || b,
            GateOp::Xor => a ^ b,
            GateOp::AndNot => a && !b,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            GateOp::And => "AND",
            GateOp::Or => "OR",
            GateOp::Xor => "XOR",
            GateOp::AndNot => "ANT",
        }
    }

    pub fn is_symmetric(self) -> bool {
        !matches!(self, GateOp::AndNot)
    }

    fn group(self) -> Group {
        match self {
            GateOp::And => Group::AndGates,
            GateOp::Or => Group::OrGates,
            GateOp::Xor => Group::XorGates,
            GateOp::AndNot => Group::AndNotGates,
        }
    }
}

const OPPOSING: [(Edge, Edge); 2] = [(Edge::Top, Edge::Bottom), (Edge::Left, Edge::Right)];
const ADJACENT: [(Edge, Edge); 4] = [
    (Edge::Top, Edge::Left),
    (Edge::Left, Edge::Bottom),
    (Edge::Bottom, Edge::Right),
    (Edge::Right, Edge::Top),
];

fn free_edges(a: Edge, b: Edge) -> Vec<Edge> {
    Edge::ALL.into_iter().filter(|&e| e != a && e != b).collect()
}

pub fn gate_name(op: GateOp, inputs: (Edge, Edge), outputs: &[Edge]) -> String {
    let outs: String = outputs.iter().map(|e| e.letter()).collect();
    format!(
        "{}{}_{}_{}",
        inputs.0.letter(),
        inputs.1.letter(),
        outs,
        op.tag()
    )
}

/// A gate reading `inputs` and driving `op(a, b)` on every edge in `outputs`.
pub fn gate(op: GateOp, inputs: (Edge, Edge), outputs: &[Edge]) -> PassRule {
    let (a, b) = inputs;
    let outs = outputs.to_vec();
    PassRule::new(&gate_name(op, inputs, outputs), move |p| {
        let v = op.eval(p[a], p[b]);
        let mut out = PortSet::EMPTY;
        for &e in &outs {
            out[e] = v;
        }
        out
    })
}

/// Every input arrangement of `op`, with each single free output and both free outputs.
///
/// Opposing inputs only get single outputs. Asymmetric ops get both input orders.
fn variants(op: GateOp) -> Vec<((Edge, Edge), Vec<Edge>)> {
    let mut pairs: Vec<((Edge, Edge), bool)> = Vec::new();
    for &(a, b) in &OPPOSING {
        pairs.push(((a, b), false));
    }
    for &(a, b) in &ADJACENT {
        pairs.push(((a, b), true));
    }
    if !op.is_symmetric() {
        let swapped: Vec<_> = pairs.iter().map(|&((a, b), dual)| ((b, a), dual)).collect();
        pairs.extend(swapped);
    }

    let mut out = Vec::new();
    for ((a, b), dual) in pairs {
        let free = free_edges(a, b);
        for &e in &free {
            out.push(((a, b), vec![e]));
        }
        if dual {
            out.push(((a, b), free));
        }
    }
    out
}

pub(super) fn entries() -> Vec<Entry> {
    let mut out = Vec::new();
    for op in [GateOp::And, GateOp::Or, GateOp::Xor, GateOp::AndNot] {
        for (inputs, outputs) in variants(op) {
            out.push(Entry::fixed(op.group(), gate(op, inputs, &outputs)));
        }
    }
    out
}
