//! Directional signal ports.
//!
//! Every cell exposes four boolean ports, one per edge. The same [`PortSet`] holds the
//! cell's inputs before evaluation and its outputs after evaluation within one tick.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the four edges of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    /// All edges in port order (top, left, bottom, right).
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Bottom, Edge::Right];

    /// The edge a neighbour sees when a signal leaves through `self`.
    #[inline]
    pub const fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Left => Edge::Right,
            Edge::Bottom => Edge::Top,
            Edge::Right => Edge::Left,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Edge::Top => 0,
            Edge::Left => 1,
            Edge::Bottom => 2,
            Edge::Right => 3,
        }
    }

    /// Single-letter tag used in catalog entry names.
    pub const fn letter(self) -> char {
        match self {
            Edge::Top => 'T',
            Edge::Left => 'L',
            Edge::Bottom => 'B',
            Edge::Right => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Edge> {
        match c {
            'T' => Some(Edge::Top),
            'L' => Some(Edge::Left),
            'B' => Some(Edge::Bottom),
            'R' => Some(Edge::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Right => "right",
        };
        f.write_str(s)
    }
}

/// Four independent port booleans.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortSet {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
}

impl PortSet {
    pub const EMPTY: PortSet = PortSet {
        top: false,
        left: false,
        bottom: false,
        right: false,
    };

    #[inline]
    pub const fn new(top: bool, left: bool, bottom: bool, right: bool) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// A set with exactly one port raised.
    #[inline]
    pub fn only(edge: Edge) -> Self {
        let mut p = PortSet::EMPTY;
        p[edge] = true;
        p
    }

    #[inline]
    pub fn get(&self, edge: Edge) -> bool {
        self[edge]
    }

    #[inline]
    pub fn set(&mut self, edge: Edge, value: bool) {
        self[edge] = value;
    }

    #[inline]
    pub fn clear(&mut self) {
        *self = PortSet::EMPTY;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.top || self.left || self.bottom || self.right)
    }

    /// Edges whose port is raised, in port order.
    pub fn raised(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |&e| self[e])
    }

    pub fn count(&self) -> usize {
        self.raised().count()
    }

    /// Packs the ports into the low nibble: bit `Edge::index()` per port.
    #[inline]
    pub fn to_bits(self) -> u8 {
        (self.top as u8)
            | (self.left as u8) << 1
            | (self.bottom as u8) << 2
            | (self.right as u8) << 3
    }

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0)
    }

    /// All 16 possible port combinations.
    pub fn all() -> impl Iterator<Item = PortSet> {
        (0u8..16).map(PortSet::from_bits)
    }
}

impl Index<Edge> for PortSet {
    type Output = bool;

    #[inline]
    fn index(&self, edge: Edge) -> &bool {
        match edge {
            Edge::Top => &self.top,
            Edge::Left => &self.left,
            Edge::Bottom => &self.bottom,
            Edge::Right => &self.right,
        }
    }
}

impl IndexMut<Edge> for PortSet {
    #[inline]
    fn index_mut(&mut self, edge: Edge) -> &mut bool {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Left => &mut self.left,
            Edge::Bottom => &mut self.bottom,
            Edge::Right => &mut self.right,
        }
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in Edge::ALL {
            let c = if self[e] { e.letter() } else { '.' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_cover_every_combination_once() {
        let all: Vec<PortSet> = PortSet::all().collect();
        assert_eq!(all.len(), 16);
        for (i, p) in all.iter().enumerate() {
            assert_eq!(p.to_bits() as usize, i);
        }
    }

    #[test]
    fn only_raises_a_single_port() {
        for e in Edge::ALL {
            let p = PortSet::only(e);
            assert_eq!(p.raised().collect::<Vec<_>>(), vec![e]);
        }
        assert!(PortSet::EMPTY.is_empty());
    }

    #[test]
    fn display_uses_edge_letters() {
        assert_eq!(PortSet::new(true, false, false, true).to_string(), "T..R");
        assert_eq!(Edge::from_letter('B'), Some(Edge::Bottom));
        assert_eq!(Edge::from_letter('x'), None);
    }
}
